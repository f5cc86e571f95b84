//! Keyboard commands

mod shortcuts;

pub use shortcuts::handle_keyboard_shortcuts;
