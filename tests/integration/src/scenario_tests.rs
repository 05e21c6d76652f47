//! Multi-run scenarios over a fake Steam install

use std::fs;

use grid_core::{
    BatchReporter, OriginalsStore, ReconciliationEngine, SyncOutcome, SyncPaths,
};
use grid_fs::NormalizedPath;
use grid_test_utils::grid::TestGrid;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn engine(grid: &TestGrid) -> ReconciliationEngine {
    ReconciliationEngine::new(SyncPaths {
        source_dir: NormalizedPath::new(grid.source_dir()),
        destination_root: NormalizedPath::new(grid.grid_dir()),
    })
}

/// Renaming a source image to another kind moves the art to the new slot
/// and leaves the old slot alone.
#[test]
fn test_kind_change_targets_new_slot() {
    let grid = TestGrid::new();
    let old = grid.write_source("Hitman 3_grid_1659040.jpg", b"capsule");
    let engine = engine(&grid);
    engine.sync().unwrap();

    fs::rename(&old, grid.source_dir().join("Hitman 3_active_1659040.jpg")).unwrap();
    let done = engine.sync().unwrap();

    assert_eq!(done.entries[0].outcome, SyncOutcome::Updated);
    assert_eq!(grid.dest_files(), vec!["1659040.jpg", "1659040p.jpg"]);
}

/// Replacing a PNG with a JPG leaves exactly one file for the slot, and the
/// original survives in the backups.
#[rstest]
#[case("png", "jpg")]
#[case("jpg", "png")]
fn test_extension_swap(#[case] before: &str, #[case] after: &str) {
    let grid = TestGrid::new();
    grid.write_dest(&format!("230410p.{before}"), b"before");
    grid.write_source(&format!("Warframe_grid_230410.{after}"), b"after");

    engine(&grid).sync().unwrap();

    assert_eq!(grid.dest_files(), vec![format!("230410p.{after}")]);
    grid.assert_backup_content(&format!("230410p.{before}"), b"before");
}

/// Restoring a backup puts Steam's art back; the next sync replaces it
/// again since the custom image still differs.
#[test]
fn test_restore_then_resync() {
    let grid = TestGrid::new();
    grid.write_dest("1466640p.png", b"steam");
    grid.write_source("Road 96_grid_1466640.png", b"road");
    let engine = engine(&grid);
    engine.sync().unwrap();

    let root = NormalizedPath::new(grid.grid_dir());
    let store = OriginalsStore::new(&root);
    assert_eq!(store.list().unwrap(), vec!["1466640p.png"]);
    store.restore("1466640p.png", &root).unwrap().unwrap();
    grid.assert_dest_content("1466640p.png", b"steam");

    let done = engine.sync().unwrap();
    assert_eq!(done.entries[0].outcome, SyncOutcome::Updated);
    grid.assert_dest_content("1466640p.png", b"road");
}

/// A large library mixes every outcome; every valid image ends up in place.
#[test]
fn test_mixed_library() {
    let grid = TestGrid::new();
    for app_id in 1..=25u64 {
        grid.write_source(&format!("Game {app_id}_grid_{app_id}.png"), &app_id.to_le_bytes());
    }
    grid.write_dest("5p.png", &5u64.to_le_bytes());
    grid.write_source("Game 26_Grid_26.png", b"wrong case");
    grid.write_source("Game_26_grid_26.png", b"too many parts");

    let done = engine(&grid).sync().unwrap();
    let report = BatchReporter::summarize(&done);

    assert_eq!(report.counts.updated, 24);
    assert_eq!(report.counts.skipped, 1);
    assert_eq!(report.counts.invalid, 1);
    assert_eq!(report.counts.rejected, 1);
    for app_id in 1..=25u64 {
        grid.assert_dest_content(&format!("{app_id}p.png"), &app_id.to_le_bytes());
    }
    assert!(grid.backup_files().is_empty());
}
