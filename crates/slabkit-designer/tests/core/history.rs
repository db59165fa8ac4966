use slabkit_designer::history::SnapshotHistory;
use slabkit_designer::serialization::Snapshot;
use slabkit_designer::{Editor, Project};

fn snap(text: &str) -> Snapshot {
    Snapshot::from_json(text.to_string())
}

#[test]
fn test_identical_pushes_are_collapsed() {
    let mut history = SnapshotHistory::default();
    assert!(history.push(snap("{\"a\":1}")));
    assert!(!history.push(snap("{\"a\":1}")));
    assert_eq!(history.len(), 1);
    assert_eq!(history.index(), 0);
}

#[test]
fn test_push_after_undo_drops_redo_branch() {
    let mut history = SnapshotHistory::default();
    history.push(snap("0"));
    history.push(snap("1"));
    history.push(snap("2"));
    assert_eq!(history.undo().map(Snapshot::as_str), Some("1"));
    history.push(snap("3"));
    assert!(!history.can_redo());
    assert_eq!(history.len(), 3);
    assert_eq!(history.current().map(Snapshot::as_str), Some("3"));
}

#[test]
fn test_underflow_and_overflow_are_noops() {
    let mut history = SnapshotHistory::default();
    assert!(history.undo().is_none());
    history.push(snap("0"));
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
    assert_eq!(history.index(), 0);
}

#[test]
fn test_depth_is_bounded() {
    let mut history = SnapshotHistory::default();
    for i in 0..60 {
        history.push(snap(&i.to_string()));
    }
    assert_eq!(history.len(), 50);
    assert_eq!(history.current().map(Snapshot::as_str), Some("59"));
}

#[test]
fn test_editor_undo_redo_round_trip() {
    let mut editor = Editor::new();
    let before: Project = editor.project.clone();
    let id = editor.add_piece();
    editor.set_piece_name(&id, "Peninsula").unwrap();
    let after = editor.project.clone();

    assert!(editor.undo());
    assert!(editor.undo());
    assert_eq!(editor.project, before);
    assert!(!editor.undo());

    assert!(editor.redo());
    assert!(editor.redo());
    assert_eq!(editor.project, after);
    assert!(!editor.redo());
}

#[test]
fn test_noop_edit_does_not_grow_history() {
    let mut editor = Editor::new();
    let id = editor.add_piece();
    let depth = editor.undo_depth();
    editor.set_piece_name(&id, "Piece 1").unwrap();
    assert_eq!(editor.undo_depth(), depth);
}

#[test]
fn test_undo_then_edit_discards_redo() {
    let mut editor = Editor::new();
    editor.add_piece();
    editor.add_piece();
    editor.undo();
    assert!(editor.can_redo());
    editor.set_project_name("Smith kitchen");
    assert!(!editor.can_redo());
    assert_eq!(editor.layout().pieces.len(), 1);
}

#[test]
fn test_apply_snapshot_is_atomic() {
    let mut editor = Editor::new();
    editor.add_piece();
    let before = editor.project.clone();
    let err = editor.apply_snapshot(&snap("[1, 2, 3]"));
    assert!(err.is_err());
    assert_eq!(editor.project, before);
}
