use slabkit_core::{Error, ImportError, ShareError};
use slabkit_designer::share::{encode_token_as, ShareVersion};
use slabkit_designer::{Editor, EditorOptions};
use tempfile::tempdir;

fn furnished() -> Editor {
    let mut editor = Editor::new();
    editor.set_project_name("Smith kitchen");
    editor.set_project_notes("Templating Tuesday ½\"");
    let id = editor.add_piece();
    editor.set_piece_size(&id, 96.0, 25.5).unwrap();
    editor.set_piece_rotation(&id, 90.0).unwrap();
    editor.add_sink(&id).unwrap();
    editor.add_layout();
    editor.add_piece();
    editor
}

#[test]
fn test_save_and_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("smith.json");
    let mut editor = furnished();
    editor.save_to_file(&path).unwrap();
    assert!(!editor.is_modified);
    assert_eq!(editor.current_file_path.as_deref(), Some(path.as_path()));

    let mut reopened = Editor::new();
    reopened.load_from_file(&path).unwrap();
    assert_eq!(reopened.project.layouts, editor.project.layouts);
    assert_eq!(reopened.project.info, editor.project.info);
    assert_eq!(reopened.project.active, 1);
    assert!(!reopened.can_undo());
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let mut editor = furnished();
    let before = editor.project.clone();
    let err = editor.load_from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read project file"));
    assert_eq!(editor.project, before);
}

#[test]
fn test_export_import_round_trip() {
    let editor = furnished();
    let json = editor.export_json().unwrap();
    let mut other = Editor::new();
    other.import_json(&json).unwrap();
    assert_eq!(other.project.layouts, editor.project.layouts);
    assert_eq!(other.project.info, editor.project.info);
    // import is an undoable step
    assert!(other.undo());
    assert_eq!(other.project.layouts.len(), 1);
}

#[test]
fn test_failed_import_leaves_state_alone() {
    let mut editor = furnished();
    let before = editor.project.clone();
    let depth = editor.undo_depth();

    let err = editor.import_json("{ \"layouts\": [ }").unwrap_err();
    assert!(matches!(err, ImportError::InvalidJson { .. }));
    let err = editor.import_json("{\"version\": 9, \"layouts\": []}").unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedVersion { version: 9, .. }));
    assert!(editor.import_json("42").is_err());

    assert_eq!(editor.project, before);
    assert_eq!(editor.undo_depth(), depth);
}

#[test]
fn test_legacy_import_replaces_active_layout_only() {
    let mut editor = furnished();
    let first = editor.project.layouts[0].clone();
    editor
        .import_json(r#"{"canvas":{"w":100,"h":60},"grid":2,"pieces":[{"name":"Vanity","w":30,"h":20}]}"#)
        .unwrap();
    assert_eq!(editor.project.layouts.len(), 2);
    assert_eq!(editor.project.layouts[0], first);
    let layout = editor.layout();
    assert_eq!((layout.cw, layout.ch, layout.grid), (100.0, 60.0, 2.0));
    assert_eq!(layout.pieces.len(), 1);
    assert_eq!(layout.pieces[0].name, "Vanity");
}

#[test]
fn test_share_link_round_trip() {
    let editor = furnished();
    let token = editor.share_token().unwrap();
    assert!(token.starts_with("v2="));

    let mut other = Editor::new();
    other.load_share_token(&format!("#{token}")).unwrap();
    assert_eq!(other.project, editor.project);
}

#[test]
fn test_legacy_share_link() {
    let token = encode_token_as(
        ShareVersion::V1,
        r#"{"project":{"name":"Old link"},"pieces":[{"w":40,"h":25}]}"#,
    )
    .unwrap();
    let mut editor = Editor::new();
    editor.load_share_token(&token).unwrap();
    assert_eq!(editor.project.info.name, "Old link");
    assert_eq!(editor.layout().pieces[0].w, 40.0);
}

#[test]
fn test_bad_share_link() {
    let mut editor = furnished();
    let before = editor.project.clone();
    let err = editor.load_share_token("v7=abc").unwrap_err();
    assert!(matches!(err, Error::Share(ShareError::UnknownVersion { .. })));
    assert_eq!(editor.project, before);
}

#[test]
fn test_autosave_restore_starts_fresh_history() {
    let mut editor = furnished();
    let snapshot = editor.take_pending_save().unwrap();

    let mut recovered = Editor::new();
    recovered.restore_autosave(&snapshot).unwrap();
    assert_eq!(recovered.project, editor.project);
    assert!(!recovered.can_undo());
    assert!(!recovered.can_redo());
}

#[test]
fn test_starter_is_undoable() {
    let mut editor = Editor::new();
    editor.load_starter().unwrap();
    assert_eq!(editor.layout().pieces.len(), 9);
    assert_eq!(editor.project.info.name, "World Stone");
    assert!(editor.undo());
    assert!(editor.layout().pieces.is_empty());
}

#[test]
fn test_import_clamps_offsets_to_editor_limit() {
    let json = r#"{"version": 3, "layouts": [{"name": "A", "dims": [
        {"id": "d", "x1": 0, "y1": 0, "x2": 20, "y2": 0, "offsetPx": 450}
    ]}]}"#;

    let mut wide = Editor::with_options(EditorOptions {
        max_dimension_offset: 500.0,
        ..EditorOptions::default()
    });
    wide.import_json(json).unwrap();
    assert_eq!(wide.layout().dims[0].offset_px, 450.0);
    // the exported file keeps the wider offset
    let mut again = Editor::with_options(wide.options);
    again.import_json(&wide.export_json().unwrap()).unwrap();
    assert_eq!(again.layout().dims[0].offset_px, 450.0);

    let mut narrow = Editor::new();
    narrow.import_json(json).unwrap();
    assert_eq!(narrow.layout().dims[0].offset_px, 300.0);
}

#[test]
fn test_blank_names_survive_export_and_import() {
    let mut editor = furnished();
    editor.rename_layout(0, "").unwrap();
    let id = editor.project.layouts[1].pieces[0].id.clone();
    editor.set_piece_name(&id, "").unwrap();

    let mut other = Editor::new();
    other.import_json(&editor.export_json().unwrap()).unwrap();
    assert_eq!(other.project.layouts[0].name, "");
    assert_eq!(other.project.layouts[1].pieces[0].name, "");
    assert_eq!(other.project.layouts, editor.project.layouts);
}
