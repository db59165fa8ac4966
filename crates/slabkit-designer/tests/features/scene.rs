use slabkit_designer::model::UiToggles;
use slabkit_designer::overlay_image::OverlayPreset;
use slabkit_designer::scene::{render_scene, Primitive, SceneOptions};
use slabkit_designer::svg_renderer::{to_svg, OVERLAY_MASK_ID};
use slabkit_designer::Editor;

fn starter_editor() -> Editor {
    let mut editor = Editor::new();
    editor.load_starter().unwrap();
    editor
}

#[test]
fn test_starter_scene_has_every_piece() {
    let editor = starter_editor();
    let scene = render_scene(&editor.project, editor.project.active, &SceneOptions::default()).unwrap();
    assert_eq!(scene.pieces.len(), 9);
    assert_eq!((scene.width, scene.height), (1080.0, 720.0));

    let svg = to_svg(&scene);
    assert_eq!(svg.matches("<g data-id=").count(), 9);
    assert!(svg.contains("\" CL"));
}

#[test]
fn test_pieces_paint_in_layer_order() {
    let mut editor = Editor::new();
    let a = editor.add_piece();
    let b = editor.add_piece();
    editor.send_backward(&b);
    let scene = render_scene(&editor.project, 0, &SceneOptions::default()).unwrap();
    let order: Vec<&str> = scene.pieces.iter().map(|g| g.piece_id.as_str()).collect();
    assert_eq!(order, vec![b.as_str(), a.as_str()]);
}

#[test]
fn test_annotation_toggles() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    let all = render_scene(&editor.project, 0, &SceneOptions::default()).unwrap();
    assert!(all.piece(&id).unwrap().label.is_some());
    assert!(all.piece(&id).unwrap().selected);

    editor.set_ui_toggles(UiToggles {
        show_dims: false,
        show_manual_dims: false,
        show_edge_profiles: false,
        show_labels: false,
    });
    let bare = render_scene(
        &editor.project,
        0,
        &SceneOptions::for_export(&editor.project.ui),
    )
    .unwrap();
    let group = bare.piece(&id).unwrap();
    assert!(group.label.is_none());
    assert!(!group.selected);
    assert!(bare.texts().is_empty());
}

#[test]
fn test_inactive_layout_renders_without_selection() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    editor.duplicate_layout(0).unwrap();
    editor.set_active_layout(0).unwrap();
    editor.select_piece(&id, false).unwrap();
    let other = render_scene(&editor.project, 1, &SceneOptions::default()).unwrap();
    assert!(other.pieces.iter().all(|g| !g.selected));
    assert!(render_scene(&editor.project, 7, &SceneOptions::default()).is_err());
}

#[test]
fn test_masked_overlay_in_svg() {
    let mut editor = starter_editor();
    editor.add_overlay().unwrap();
    editor.apply_overlay_preset(0, OverlayPreset::White).unwrap();
    editor.set_overlay_opacity(0, 0.5).unwrap();

    let scene = render_scene(&editor.project, 0, &SceneOptions::default()).unwrap();
    assert!(scene.overlays.mask.is_none());
    assert!(scene
        .overlays
        .items
        .iter()
        .any(|p| matches!(p, Primitive::Image { opacity, .. } if *opacity == 0.5)));

    editor.set_overlay_clip(true);
    let scene = render_scene(&editor.project, 0, &SceneOptions::default()).unwrap();
    let mask = scene.overlays.mask.as_ref().unwrap();
    assert_eq!(mask.count(slabkit_designer::MaskPaint::Reveal), 9);

    let svg = to_svg(&scene);
    assert!(svg.contains(&format!("<mask id=\"{OVERLAY_MASK_ID}\"")));
    assert!(svg.contains(&format!("mask=\"url(#{OVERLAY_MASK_ID})\"")));
    assert!(svg.contains("xlink:href=\"data:image/png;base64,"));
}

#[test]
fn test_hidden_overlay_is_not_drawn() {
    let mut editor = Editor::new();
    editor.add_overlay().unwrap();
    editor.apply_overlay_preset(0, OverlayPreset::Black).unwrap();
    editor.toggle_overlay_visible(0).unwrap();
    let scene = render_scene(&editor.project, 0, &SceneOptions::default()).unwrap();
    assert!(scene.overlays.items.is_empty());
    assert!(!to_svg(&scene).contains("<image"));
}

#[test]
fn test_undecodable_overlay_is_skipped() {
    let mut editor = Editor::new();
    editor.add_overlay().unwrap();
    editor.add_overlay().unwrap();
    editor.load_overlay_image(0, "data:image/png;base64,AAAA").unwrap();
    editor.apply_overlay_preset(1, OverlayPreset::Gray).unwrap();
    assert!(editor.layout().overlays[0].is_drawable());

    let scene = render_scene(&editor.project, 0, &SceneOptions::default()).unwrap();
    let images: Vec<&str> = scene
        .overlays
        .items
        .iter()
        .filter_map(|p| match p {
            Primitive::Image { href, .. } => Some(href.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(images.len(), 1);
    assert!(images[0].starts_with("data:image/png;base64,iVBOR"));
    // backdrop plus image for the drawable overlay only
    assert_eq!(scene.overlays.items.len(), 2);
    assert!(!to_svg(&scene).contains("base64,AAAA"));
}
