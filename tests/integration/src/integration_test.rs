//! End-to-end integration test for the vertical slice
//!
//! This test exercises the complete flow: config loading -> scan -> plan ->
//! execute -> report.

use grid_core::{
    BatchReporter, ConfigResolver, PathOverrides, ReconciliationEngine, SyncOutcome,
};
use grid_fs::NormalizedPath;
use grid_test_utils::grid::TestGrid;
use pretty_assertions::assert_eq;

fn engine_from_config(grid: &TestGrid) -> ReconciliationEngine {
    let config = grid.write_config();
    let resolved = ConfigResolver::new(NormalizedPath::new(grid.root()))
        .with_explicit_path(Some(config))
        .resolve(&PathOverrides::default())
        .unwrap();
    ReconciliationEngine::new(resolved.paths)
}

#[test]
fn test_config_to_report() {
    let grid = TestGrid::new();
    grid.write_source("Road 96_grid_1466640.png", b"road grid");
    grid.write_source("Road 96_hero_1466640.png", b"road hero");
    grid.write_source("Road 96_logo_1466640.png", b"road logo");
    grid.write_source("Road 96_active_1466640.png", b"road active");
    grid.write_source("Road 96_banner_1466640.png", b"nope");
    grid.write_source("Thumbs.db", b"");
    grid.write_dest("1466640_hero.png", b"steam hero");

    let engine = engine_from_config(&grid);
    let plan = engine.plan(engine.scan().unwrap()).unwrap();
    let planned = BatchReporter::summarize(&plan);
    assert_eq!(planned.total, 6);
    assert_eq!(planned.counts.queued, 4);
    assert_eq!(planned.counts.invalid, 1);
    assert_eq!(planned.counts.rejected, 1);

    let done = engine.execute(plan).unwrap();
    let report = BatchReporter::summarize(&done);
    assert_eq!(report.counts.updated, 4);
    assert_eq!(report.counts.queued, 0);
    assert!(!report.had_failures());

    assert_eq!(
        grid.dest_files(),
        vec![
            "1466640.png",
            "1466640_hero.png",
            "1466640_logo.png",
            "1466640p.png"
        ]
    );
    grid.assert_backup_content("1466640_hero.png", b"steam hero");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["lines"][0]["label"], "REJECTED");
    assert_eq!(json["lines"][1]["outcome"]["status"], "invalid_format");
}

#[test]
fn test_idempotent_resync() {
    let grid = TestGrid::new();
    grid.write_source("Celeste_grid_504230.png", b"c");
    grid.write_source("Warframe_hero_230410.jpg", b"w");
    let engine = engine_from_config(&grid);

    engine.sync().unwrap();
    let snapshot: Vec<(String, Vec<u8>)> = grid
        .dest_files()
        .into_iter()
        .map(|name| {
            let bytes = std::fs::read(grid.grid_dir().join(&name)).unwrap();
            (name, bytes)
        })
        .collect();

    let second = engine.sync().unwrap();

    assert!(
        second
            .entries
            .iter()
            .all(|e| e.outcome == SyncOutcome::SkippedIdentical)
    );
    for (name, bytes) in snapshot {
        grid.assert_dest_content(&name, &bytes);
    }
}
