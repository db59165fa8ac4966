use slabkit_core::Point;
use slabkit_designer::dimensions::{
    dimension_geometry, snap_dim_point, snap_dim_point_with, SnapTarget, ToolClick,
};
use slabkit_designer::editor::{Key, KeyEvent, Modifiers, PointerTarget};
use slabkit_designer::model::{Dimension, Layout, Piece};
use slabkit_designer::Editor;

fn layout_with_piece() -> Layout {
    let mut layout = Layout::new("l", "Layout 1");
    let mut piece = Piece::new("p", "P", 20.0, 10.0);
    piece.x = 10.0;
    piece.y = 10.0;
    layout.insert_piece(piece);
    layout
}

#[test]
fn test_snaps_to_piece_corner() {
    let layout = layout_with_piece();
    let hit = snap_dim_point(&layout, Point::new(10.3, 10.2));
    assert_eq!(hit.point, Point::new(10.0, 10.0));
    assert_eq!(
        hit.target,
        SnapTarget::Piece {
            piece_id: "p".to_string(),
            index: 0
        }
    );
}

#[test]
fn test_nearest_reference_point_wins() {
    let layout = layout_with_piece();
    // top midpoint (20, 10) is nearer than either corner
    let hit = snap_dim_point(&layout, Point::new(19.6, 10.4));
    assert_eq!(hit.point, Point::new(20.0, 10.0));
}

#[test]
fn test_grid_then_raw_fallback() {
    let layout = layout_with_piece();
    let hit = snap_dim_point(&layout, Point::new(60.2, 80.7));
    assert_eq!(hit.target, SnapTarget::Grid);
    assert_eq!(hit.point, Point::new(60.0, 81.0));

    let raw = Point::new(65.0, 85.0);
    let hit = snap_dim_point_with(&layout.pieces, 10.0, raw, 1.0);
    assert_eq!(hit.target, SnapTarget::None);
    assert_eq!(hit.point, raw);
}

#[test]
fn test_geometry_offsets_along_normal() {
    let dim = Dimension::new("d", Point::new(10.0, 50.0), Point::new(30.0, 50.0));
    let g = dimension_geometry(&dim, 6.0);
    assert_eq!(g.label, "20.00\"");
    assert_eq!((g.q1.x, g.q1.y), (60.0, 312.0));
    assert_eq!((g.q2.x, g.q2.y), (180.0, 312.0));
    assert!((g.label_pos.y - 321.6).abs() < 1e-9);
    assert_eq!(g.label_angle, 0.0);

    let reversed = Dimension::new("r", Point::new(30.0, 0.0), Point::new(10.0, 0.0));
    assert_eq!(dimension_geometry(&reversed, 6.0).label_angle, 0.0);
    let up = Dimension::new("u", Point::new(0.0, 10.0), Point::new(0.0, 0.0));
    assert_eq!(dimension_geometry(&up, 6.0).label_angle, -90.0);
}

#[test]
fn test_two_click_tool_in_editor() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    editor.set_piece_size(&id, 20.0, 10.0).unwrap();
    editor.set_piece_position(&id, 10.0, 10.0).unwrap();
    assert!(editor.toggle_dimension_tool());

    let target = editor.pointer_down(Point::new(10.3 * 6.0, 10.2 * 6.0), Modifiers::default());
    assert_eq!(target, PointerTarget::Canvas);
    assert_eq!(editor.dim_tool.pending(), Some(Point::new(10.0, 10.0)));
    assert!(editor.layout().dims.is_empty());

    editor.pointer_move(Point::new(29.9 * 6.0, 10.1 * 6.0));
    let preview = editor.dimension_preview().unwrap();
    assert_eq!(preview.point, Point::new(30.0, 10.0));

    editor.pointer_down(Point::new(29.9 * 6.0, 10.1 * 6.0), Modifiers::default());
    editor.pointer_up(Point::new(29.9 * 6.0, 10.1 * 6.0));
    let dims = &editor.layout().dims;
    assert_eq!(dims.len(), 1);
    assert_eq!(dims[0].label(), "20.00\"");
    assert_eq!(dims[0].offset_px, 12.0);
    let dim_id = dims[0].id.clone();
    assert_eq!(editor.project.selection.selected_dim_id.as_deref(), Some(dim_id.as_str()));
    assert!(editor.project.selection.selected_ids.is_empty());

    assert!(editor.key_down(KeyEvent::new(Key::Delete)));
    assert!(editor.layout().dims.is_empty());
    assert!(!editor.key_down(KeyEvent::new(Key::Backspace)));
}

#[test]
fn test_toggling_tool_off_discards_start() {
    let mut editor = Editor::new();
    editor.toggle_dimension_tool();
    assert!(matches!(
        editor.click_dimension_tool(Point::new(3.0, 4.0)),
        ToolClick::Started(_)
    ));
    assert!(!editor.toggle_dimension_tool());
    assert!(editor.dim_tool.pending().is_none());
    assert!(editor.dimension_preview().is_none());
    assert!(matches!(
        editor.click_dimension_tool(Point::new(3.0, 4.0)),
        ToolClick::Inactive
    ));
}

#[test]
fn test_offset_drag_projects_and_clamps() {
    let mut editor = Editor::new();
    editor.set_dimension_tool(true);
    editor.click_dimension_tool(Point::new(10.0, 50.0));
    editor.click_dimension_tool(Point::new(30.0, 50.0));
    editor.set_dimension_tool(false);
    let id = editor.layout().dims[0].id.clone();
    editor.clear_selection();

    let target = editor.pointer_down(Point::new(120.0, 312.0), Modifiers::default());
    assert_eq!(target, PointerTarget::Dimension(id.clone()));
    editor.pointer_move(Point::new(120.0, 400.0));
    assert_eq!(editor.layout().dimension(&id).unwrap().offset_px, 100.0);
    editor.pointer_move(Point::new(120.0, 1000.0));
    assert_eq!(editor.layout().dimension(&id).unwrap().offset_px, 300.0);
    editor.pointer_move(Point::new(120.0, -1000.0));
    assert_eq!(editor.layout().dimension(&id).unwrap().offset_px, -300.0);
    editor.pointer_leave(Point::new(120.0, -1000.0));
    assert!(!editor.is_dragging());

    assert!(editor.undo());
    assert_eq!(editor.layout().dimension(&id).unwrap().offset_px, 12.0);
}

#[test]
fn test_delete_ignored_while_typing() {
    let mut editor = Editor::new();
    editor.set_dimension_tool(true);
    editor.click_dimension_tool(Point::new(0.0, 0.0));
    editor.click_dimension_tool(Point::new(5.0, 0.0));
    let mut event = KeyEvent::new(Key::Backspace);
    event.in_text_input = true;
    assert!(!editor.key_down(event));
    assert_eq!(editor.layout().dims.len(), 1);
}
