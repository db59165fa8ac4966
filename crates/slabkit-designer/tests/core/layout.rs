use proptest::prelude::*;
use slabkit_core::{ModelError, Rect};
use slabkit_designer::model::{Layout, Piece};
use slabkit_designer::Editor;

fn inside_canvas(piece: &Piece, cw: f64, ch: f64) -> bool {
    Rect::new(0.0, 0.0, cw, ch).contains_rect(&piece.bounds(), 1e-9)
}

#[test]
fn test_basic_piece_placement() {
    let mut layout = Layout::new("l", "Kitchen");
    let id = layout.add_piece();
    let piece = layout.piece(&id).unwrap();
    assert_eq!((piece.w, piece.h, piece.x, piece.y), (24.0, 12.0, 0.0, 0.0));
    let bbox = piece.bounding_box();
    assert_eq!((bbox.width, bbox.height), (24.0, 12.0));
    assert!(inside_canvas(piece, 180.0, 120.0));
}

#[test]
fn test_rotated_overflow_is_clamped() {
    let mut piece = Piece::new("p", "Island", 96.0, 42.0);
    piece.x = 170.0;
    piece.y = 110.0;
    piece.set_rotation(45.0);
    piece.clamp_to_canvas(180.0, 120.0);
    assert!(inside_canvas(&piece, 180.0, 120.0));
    let bbox = piece.bounding_box();
    assert!((piece.x - (180.0 - bbox.width)).abs() < 1e-9);
    assert!((piece.y - (120.0 - bbox.height)).abs() < 1e-9);
}

#[test]
fn test_layers_stay_dense() {
    let mut layout = Layout::new("l", "Kitchen");
    let a = layout.add_piece();
    let b = layout.add_piece();
    let c = layout.add_piece();
    layout.remove_piece(&b);
    let layers: Vec<i64> = layout.pieces.iter().map(|p| p.layer).collect();
    assert_eq!(layers, vec![0, 1]);
    assert!(!layout.bring_forward(&c));
    assert!(layout.bring_forward(&a));
    assert_eq!(layout.piece(&a).unwrap().layer, 1);
    assert_eq!(layout.piece(&c).unwrap().layer, 0);
}

#[test]
fn test_layout_management() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    editor.rename_layout(0, "  Kitchen ").unwrap();

    let copy = editor.duplicate_layout(0).unwrap();
    assert_eq!(copy, 1);
    assert_eq!(editor.project.active, 1);
    assert_eq!(editor.layout().name, "Kitchen Copy");
    assert_ne!(editor.layout().pieces[0].id, id);
    assert!(editor.project.selection.selected_ids.is_empty());

    assert_eq!(editor.add_layout(), 2);
    assert_eq!(editor.layout().name, "Layout 3");

    editor.delete_layout(2).unwrap();
    assert_eq!(editor.project.active, 1);
    editor.set_active_layout(0).unwrap();
    assert_eq!(editor.layout().name, "Kitchen");

    editor.delete_layout(1).unwrap();
    assert_eq!(editor.delete_layout(0), Err(ModelError::LastLayout));
    assert!(editor.set_active_layout(4).is_err());
}

#[test]
fn test_reset_project() {
    let mut editor = Editor::new();
    editor.set_project_name("Smith");
    editor.add_layout();
    editor.add_piece();
    editor.reset_project();
    assert_eq!(editor.project.layouts.len(), 1);
    assert!(editor.layout().pieces.is_empty());
    assert_eq!(editor.project.info.name, "");
    assert!(editor.undo());
    assert_eq!(editor.project.layouts.len(), 2);
}

proptest! {
    #[test]
    fn prop_clamp_is_idempotent(
        w in 1.0f64..200.0,
        h in 1.0f64..200.0,
        rotation in -720.0f64..720.0,
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
    ) {
        let mut piece = Piece::new("p", "P", w, h);
        piece.set_rotation(rotation);
        piece.x = x;
        piece.y = y;
        piece.clamp_to_canvas(180.0, 120.0);
        let once = (piece.x, piece.y);
        piece.clamp_to_canvas(180.0, 120.0);
        prop_assert_eq!(once, (piece.x, piece.y));
        prop_assert!(piece.x >= 0.0 && piece.y >= 0.0);
    }

    #[test]
    fn prop_fitting_pieces_stay_inside(
        w in 1.0f64..80.0,
        h in 1.0f64..80.0,
        rotation in 0.0f64..360.0,
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
    ) {
        let mut piece = Piece::new("p", "P", w, h);
        piece.set_rotation(rotation);
        piece.x = x;
        piece.y = y;
        piece.clamp_to_canvas(180.0, 120.0);
        prop_assert!(inside_canvas(&piece, 180.0, 120.0));
    }
}
