use serde_json::json;
use slabkit_core::ImportError;
use slabkit_designer::migration::{import_over, is_legacy_layout, migrate};
use slabkit_designer::model::{Project, SinkSide};
use slabkit_designer::serialization::{export_project, import_project};

fn two_layout_project() -> Project {
    let mut project = Project::new();
    project.info.name = "Hall bath".to_string();
    project.active_layout_mut().add_piece();
    project.add_layout();
    project
}

#[test]
fn test_legacy_detection() {
    assert!(is_legacy_layout(&json!({"pieces": []})));
    assert!(is_legacy_layout(&json!({"canvas": {"w": 90}, "layouts": null})));
    assert!(!is_legacy_layout(&json!({"layouts": [], "pieces": []})));
    assert!(!is_legacy_layout(&json!({"project": {"name": "x"}})));
    assert!(!is_legacy_layout(&json!("pieces")));
}

#[test]
fn test_legacy_payload_becomes_single_layout_project() {
    let project = import_project(
        r#"{
            "project": {"name": "Lake house", "date": "2019-05-04", "notes": ""},
            "layoutName": "Main",
            "canvas": {"w": 144, "h": 96},
            "grid": 0.5,
            "showDims": false,
            "pieces": [
                {"id": "a", "name": "Run", "w": 72, "h": 25.5, "x": 4, "y": 4,
                 "sinks": [{"id": "s", "side": "left", "w": 14, "h": 10},
                           {"id": "s", "side": "back", "w": 10, "h": 10}]}
            ],
            "dims": [{"x1": 4, "y1": 4, "x2": 76, "y2": 4, "offsetPx": 900}]
        }"#,
    )
    .unwrap();

    assert_eq!(project.layouts.len(), 1);
    assert_eq!(project.info.name, "Lake house");
    assert!(!project.ui.show_dims);
    let layout = &project.layouts[0];
    assert_eq!(layout.name, "Main");
    assert_eq!((layout.cw, layout.ch, layout.grid), (144.0, 96.0, 0.5));

    let piece = &layout.pieces[0];
    assert_ne!(piece.id, "a");
    assert_eq!(piece.sinks[0].side, SinkSide::Left);
    assert_ne!(piece.sinks[0].id, piece.sinks[1].id);

    let dim = &layout.dims[0];
    assert_eq!(dim.length(), 72.0);
    assert_eq!(dim.offset_px, 300.0);
}

#[test]
fn test_import_over_keeps_other_layouts() {
    let current = two_layout_project();
    let next = import_over(
        &current,
        &json!({"project": {"name": "Renamed"}, "pieces": [{"w": 30, "h": 20}, {"w": 10, "h": 10}]}),
    )
    .unwrap();

    assert_eq!(next.layouts.len(), 2);
    assert_eq!(next.active, 1);
    assert_eq!(next.layouts[0], current.layouts[0]);
    assert_eq!(next.layouts[1].id, current.layouts[1].id);
    assert_eq!(next.layouts[1].pieces.len(), 2);
    assert_eq!(next.info.name, "Renamed");
    // fields the payload omits are left alone
    assert_eq!(next.layouts[1].cw, current.layouts[1].cw);
}

#[test]
fn test_import_over_replaces_with_project_files() {
    let current = two_layout_project();
    let next = import_over(&current, &json!({"layouts": [{"name": "Only"}]})).unwrap();
    assert_eq!(next.layouts.len(), 1);
    assert_eq!(next.layouts[0].name, "Only");
    assert_eq!(next.info.name, "");
}

#[test]
fn test_import_over_rejects_bad_payloads() {
    let current = two_layout_project();
    assert!(matches!(
        import_over(&current, &json!({"pieces": [{"sinks": 3}]})),
        Err(ImportError::InvalidField { .. })
    ));
    assert!(matches!(
        import_over(&current, &json!({"version": 99, "layouts": [{}]})),
        Err(ImportError::UnsupportedVersion { version: 99, .. })
    ));
}

#[test]
fn test_active_index_is_kept_in_range() {
    let project = migrate(&json!({"layouts": [{}, {}], "active": 7})).unwrap();
    assert!(project.active < project.layouts.len());
}

#[test]
fn test_faucets_are_cleaned() {
    let project = migrate(&json!({
        "layouts": [{"pieces": [{"w": 40, "h": 25, "sinks": [{"faucets": [8, 3, 3, -1, 1.5, "2", 9]}]}]}]
    }))
    .unwrap();
    assert_eq!(project.layouts[0].pieces[0].sinks[0].faucets, vec![3, 8]);
}

#[test]
fn test_syntax_errors_carry_position() {
    let err = import_project("{\n  \"layouts\": [,]\n}").unwrap_err();
    match err {
        ImportError::InvalidJson { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_names_survive_round_trip() {
    let mut project = two_layout_project();
    project.layouts[0].name = String::new();
    project.layouts[0].pieces[0].name = String::new();
    let reloaded = import_project(&export_project(&project).unwrap()).unwrap();
    assert_eq!(reloaded.layouts[0].name, "");
    assert_eq!(reloaded.layouts[0].pieces[0].name, "");
    assert_eq!(reloaded.layouts, project.layouts);

    // single-layout files still fall back for blank names
    let legacy = migrate(&json!({"layoutName": "", "pieces": [{"name": "", "w": 10, "h": 10}]})).unwrap();
    assert_eq!(legacy.layouts[0].name, "Layout 1");
    assert_eq!(legacy.layouts[0].pieces[0].name, "Piece");
}

#[test]
fn test_project_dimension_offsets_kept_as_stored() {
    let project = migrate(&json!({
        "layouts": [{"dims": [{"x1": 0, "y1": 0, "x2": 10, "y2": 0, "offsetPx": 450}]}]
    }))
    .unwrap();
    assert_eq!(project.layouts[0].dims[0].offset_px, 450.0);
}
