//! End-to-end save/load behavior through the public API

use levelkit_core::{
    load_level, save_level, GridCoord, LevelDocument, OffGridStore, OffGridTile, PixelPos, Tile,
    TileKind, TileStore, TypeCodes,
};
use std::fs;

fn sample_stores() -> (TileStore, OffGridStore) {
    let mut tiles = TileStore::new();
    tiles.place(GridCoord::new(0, 0), Tile::new(TileKind::Grass, 1));
    tiles.place(GridCoord::new(1, 0), Tile::new(TileKind::Sand, 3));
    tiles.place(GridCoord::new(-40, 17), Tile::new(TileKind::Decor, 0));
    tiles.place(GridCoord::new(100_000, -100_000), Tile::new(TileKind::Grass, 15));

    let mut off_grid = OffGridStore::new();
    off_grid.append(OffGridTile::new(PixelPos::new(5, 5), TileKind::Decor, 2));
    off_grid.append(OffGridTile::new(PixelPos::new(-13, 250), TileKind::Decor, 0));
    off_grid.append(OffGridTile::new(PixelPos::new(5, 5), TileKind::Grass, 7));

    (tiles, off_grid)
}

#[test]
fn test_save_then_load_reproduces_stores() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.json");
    let (tiles, off_grid) = sample_stores();

    save_level(&path, &tiles, &off_grid, &TypeCodes::default()).unwrap();
    let (loaded_tiles, loaded_off_grid) = load_level(&path, &TypeCodes::default()).unwrap();

    assert_eq!(loaded_tiles, tiles);
    assert_eq!(loaded_off_grid, off_grid);
}

#[test]
fn test_save_overwrites_previous_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.json");
    let (tiles, off_grid) = sample_stores();
    save_level(&path, &tiles, &off_grid, &TypeCodes::default()).unwrap();

    save_level(
        &path,
        &TileStore::new(),
        &OffGridStore::new(),
        &TypeCodes::default(),
    )
    .unwrap();

    let document: LevelDocument =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document, LevelDocument::default());

    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn test_hand_written_level_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("0.json");
    fs::write(
        &path,
        r#"{
            "level": {
                "tiles": [
                    { "pos": [3, 4], "type": 1, "variant": 9 },
                    { "pos": [3, 4], "type": 0, "variant": 2 }
                ],
                "off_grid": [
                    { "pos": [-7, 100], "type": 2, "variant": 0 }
                ]
            }
        }"#,
    )
    .unwrap();

    let (tiles, off_grid) = load_level(&path, &TypeCodes::default()).unwrap();

    // Later entries for the same cell win
    assert_eq!(tiles.len(), 1);
    assert_eq!(
        tiles.get(GridCoord::new(3, 4)),
        Some(&Tile::new(TileKind::Grass, 2))
    );
    assert_eq!(
        off_grid.iter().copied().collect::<Vec<_>>(),
        vec![OffGridTile::new(
            PixelPos::new(-7, 100),
            TileKind::Decor,
            0
        )]
    );
}

#[test]
fn test_missing_file_then_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.json");

    let (mut tiles, off_grid) = load_level(&path, &TypeCodes::default()).unwrap();
    assert!(path.exists());

    tiles.place(GridCoord::new(2, 2), Tile::new(TileKind::Sand, 0));
    levelkit_core::autotile::run(&mut tiles);
    save_level(&path, &tiles, &off_grid, &TypeCodes::default()).unwrap();

    let (loaded, _) = load_level(&path, &TypeCodes::default()).unwrap();
    assert_eq!(loaded, tiles);
}
