use slabkit_core::{Error, ModelError};
use slabkit_designer::model::{CornerFlags, Edge, EdgeProfile, SinkKind, SinkShape, SinkSide};
use slabkit_designer::overlay_image::OverlayPreset;
use slabkit_designer::{Editor, EditorOptions};

#[test]
fn test_new_editor_is_dated_and_clean() {
    let editor = Editor::new();
    assert_eq!(editor.project.layouts.len(), 1);
    assert_eq!(editor.project.info.date.len(), 10);
    assert!(!editor.is_modified);
    assert!(!editor.can_undo());
    assert!(!editor.has_pending_save());
}

#[test]
fn test_edits_schedule_autosave() {
    let mut editor = Editor::new();
    let revision = editor.revision();
    editor.add_piece();
    assert!(editor.revision() > revision);
    assert!(editor.is_modified);
    let snapshot = editor.take_pending_save().unwrap();
    assert!(snapshot.as_str().contains("Piece 1"));
    assert!(editor.take_pending_save().is_none());
}

#[test]
fn test_piece_properties() {
    let mut editor = Editor::new();
    let id = editor.add_piece();

    editor.set_piece_name(&id, "Island").unwrap();
    editor.set_piece_size(&id, 96.0, 42.0).unwrap();
    editor.set_piece_rotation(&id, -45.0).unwrap();
    editor.set_piece_fill_opacity(&id, 1.7).unwrap();
    editor.set_piece_color(&id, "#c0ffee").unwrap();
    editor
        .set_corner_flags(&id, CornerFlags { tl: true, br: true, ..Default::default() })
        .unwrap();
    editor.set_edge_profile(&id, Edge::Left, EdgeProfile::Ogee).unwrap();

    let piece = editor.selected_piece().unwrap();
    assert_eq!(piece.name, "Island");
    assert_eq!((piece.w, piece.h), (96.0, 42.0));
    assert_eq!(piece.rotation, 315.0);
    assert_eq!(piece.fill_opacity, 1.0);
    assert_eq!(piece.color, "#c0ffee");
    assert!(piece.corner_flags.tl && piece.corner_flags.br && !piece.corner_flags.tr);
    assert_eq!(piece.edge_profiles.get(Edge::Left), EdgeProfile::Ogee);
}

#[test]
fn test_invalid_size_keeps_previous_value() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    editor.set_piece_size(&id, f64::NAN, -3.0).unwrap();
    let piece = editor.layout().piece(&id).unwrap();
    assert_eq!((piece.w, piece.h), (24.0, 12.0));
}

#[test]
fn test_position_is_clamped() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    editor.set_piece_position(&id, 170.0, -4.0).unwrap();
    let piece = editor.layout().piece(&id).unwrap();
    assert_eq!((piece.x, piece.y), (156.0, 0.0));
}

#[test]
fn test_unknown_piece_is_reported() {
    let mut editor = Editor::new();
    let err = editor.set_piece_name("missing", "x").unwrap_err();
    assert!(matches!(err, ModelError::NotFound { .. }));
    assert!(!editor.can_undo());
}

#[test]
fn test_duplicate_and_delete() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    editor.set_piece_position(&id, 10.0, 10.0).unwrap();
    let copy = editor.duplicate_piece(&id).unwrap();

    let piece = editor.layout().piece(&copy).unwrap();
    assert_eq!(piece.name, "Piece 1 Copy");
    assert_eq!((piece.x, piece.y), (11.0, 11.0));
    assert_eq!(piece.layer, 1);
    assert_eq!(editor.project.selection.selected_id.as_deref(), Some(copy.as_str()));

    assert!(editor.delete_piece(&copy));
    assert!(editor.project.selection.selected_ids.is_empty());
    assert!(!editor.delete_piece(&copy));
    assert_eq!(editor.layout().pieces.len(), 1);
}

#[test]
fn test_delete_selected_pieces() {
    let mut editor = Editor::new();
    let a = editor.add_piece();
    let b = editor.add_piece();
    editor.add_piece();
    editor.select_piece(&a, false).unwrap();
    editor.select_piece(&b, true).unwrap();
    assert_eq!(editor.delete_selected_pieces(), 2);
    assert_eq!(editor.layout().pieces.len(), 1);
    assert_eq!(editor.layout().pieces[0].layer, 0);
}

#[test]
fn test_canvas_settings() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    editor.set_piece_position(&id, 150.0, 100.0).unwrap();

    editor.set_canvas_size(5.0, 60.0);
    assert_eq!((editor.layout().cw, editor.layout().ch), (12.0, 60.0));
    let piece = editor.layout().piece(&id).unwrap();
    assert_eq!((piece.x, piece.y), (0.0, 48.0));

    editor.set_grid(0.1);
    assert_eq!(editor.layout().grid, 0.25);
    editor.set_scale(-2.0);
    assert_eq!(editor.layout().scale, 6.0);
    editor.set_show_grid(false);
    assert!(!editor.layout().show_grid);
}

#[test]
fn test_snap_all() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    editor.set_piece_position(&id, 10.4, 20.6).unwrap();
    editor.snap_all();
    let piece = editor.layout().piece(&id).unwrap();
    assert_eq!((piece.x, piece.y), (10.0, 21.0));
}

#[test]
fn test_sink_editing() {
    let mut editor = Editor::new();
    let id = editor.add_piece();

    let index = editor.add_sink(&id).unwrap();
    {
        let sink = &editor.layout().piece(&id).unwrap().sinks[index];
        assert_eq!(sink.side, SinkSide::Back);
        assert_eq!(sink.centerline, 20.0);
        assert_eq!(sink.faucets, vec![4]);
    }

    editor.set_sink_side(&id, index, SinkSide::Left).unwrap();
    assert_eq!(editor.layout().piece(&id).unwrap().sinks[index].centerline, 12.0);

    editor.set_sink_model(&id, index, "oval-1714").unwrap();
    editor.set_sink_custom_size(&id, index, 20.0, 1200.0).unwrap();
    editor.set_sink_corner_radius(&id, index, 9.0).unwrap();
    editor.set_sink_rotation(&id, index, 400.0).unwrap();
    editor.set_sink_setback(&id, index, -1.0).unwrap();

    let sink = &editor.layout().piece(&id).unwrap().sinks[index];
    assert_eq!(sink.kind, SinkKind::Custom);
    assert_eq!(sink.shape, SinkShape::Oval);
    assert_eq!((sink.w, sink.h), (20.0, 999.0));
    assert_eq!(sink.corner_r, 4.0);
    assert_eq!(sink.rotation, 360.0);
    assert_eq!(sink.setback, 0.0);

    let err = editor.set_sink_model(&id, index, "farmhouse").unwrap_err();
    assert!(matches!(err, ModelError::NotFound { .. }));
}

#[test]
fn test_sink_limit_and_faucets() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    for _ in 0..4 {
        editor.add_sink(&id).unwrap();
    }
    let depth = editor.undo_depth();
    assert!(matches!(
        editor.add_sink(&id),
        Err(ModelError::SinkLimit { max: 4, .. })
    ));
    assert!(editor.duplicate_sink(&id, 0).is_err());
    assert_eq!(editor.layout().piece(&id).unwrap().sinks.len(), 4);
    assert_eq!(editor.undo_depth(), depth);

    assert!(editor.toggle_faucet(&id, 0, 8).unwrap());
    assert!(!editor.toggle_faucet(&id, 0, 4).unwrap());
    assert!(editor.toggle_faucet(&id, 0, 9).is_err());
    assert_eq!(editor.layout().piece(&id).unwrap().sinks[0].faucets, vec![8]);

    editor.remove_sink(&id, 3).unwrap();
    assert_eq!(editor.layout().piece(&id).unwrap().sinks.len(), 3);
}

#[test]
fn test_overlay_editing() {
    let mut editor = Editor::new();
    assert_eq!(editor.add_overlay().unwrap(), 0);
    assert_eq!(editor.add_overlay().unwrap(), 1);
    assert!(matches!(
        editor.add_overlay(),
        Err(ModelError::OverlayLimit { max: 2, .. })
    ));
    assert_eq!(editor.layout().ov_sel, 1);

    editor.set_overlay_opacity(0, 1.5).unwrap();
    editor.set_overlay_slab_size(0, 120.0, -1.0).unwrap();
    editor.set_overlay_position(0, 4.0, 5.0).unwrap();
    assert!(!editor.toggle_overlay_visible(0).unwrap());
    editor.rename_overlay(0, "Calacatta").unwrap();

    let overlay = &editor.layout().overlays[0];
    assert_eq!(overlay.opacity, 1.0);
    assert_eq!((overlay.slab_w, overlay.slab_h), (120.0, 63.0));
    assert_eq!((overlay.x, overlay.y), (4.0, 5.0));
    assert!(!overlay.visible);
    assert_eq!(overlay.name, "Calacatta");

    assert!(editor.remove_overlay(1));
    assert_eq!(editor.layout().ov_sel, 0);
    assert!(editor.select_overlay(3).is_err());
}

#[test]
fn test_overlay_preset_and_bad_image() {
    let mut editor = Editor::new();
    editor.add_overlay().unwrap();

    let image = editor.apply_overlay_preset(0, OverlayPreset::Gray).unwrap();
    assert!(image.data_url.starts_with("data:image/png;base64,"));
    let overlay = &editor.layout().overlays[0];
    assert_eq!((overlay.nat_w, overlay.nat_h), (800, 400));
    assert!(overlay.is_drawable());

    // undecodable payloads are stored as-is
    let image = editor.load_overlay_image(0, "data:image/png;base64,AAAA").unwrap();
    assert!(!image.compressed);
    assert_eq!(editor.layout().overlays[0].data_url, "data:image/png;base64,AAAA");
    assert_eq!(editor.layout().overlays[0].nat_w, 0);

    let err = editor.load_overlay_bytes(0, b"not an image").unwrap_err();
    assert!(matches!(err, Error::Overlay(_)));
    assert!(editor.load_overlay_image(5, "data:,").is_err());
}

#[test]
fn test_custom_history_depth() {
    let options = EditorOptions {
        history_depth: 3,
        ..Default::default()
    };
    let mut editor = Editor::with_options(options);
    for _ in 0..5 {
        editor.add_piece();
    }
    assert_eq!(editor.undo_depth(), 2);
}
