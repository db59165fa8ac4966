use std::time::{Duration, Instant};

use slabkit_designer::serialization::Snapshot;
use slabkit_designer::Editor;
use slabkit_settings::{AutosaveOutcome, AutosaveSettings, AutosaveStore, Autosaver};
use tempfile::tempdir;

fn autosaver(dir: &std::path::Path) -> Autosaver {
    let settings = AutosaveSettings {
        path: Some(dir.join("autosave.json")),
        ..Default::default()
    };
    Autosaver::from_settings(&settings).unwrap()
}

#[test]
fn test_edits_are_saved_after_quiet_period() {
    let dir = tempdir().unwrap();
    let mut saver = autosaver(dir.path());
    let mut editor = Editor::new();
    let start = Instant::now();

    editor.add_piece();
    saver.observe(&mut editor, start);
    editor.set_project_name("Miller");
    saver.observe(&mut editor, start + Duration::from_millis(300));

    assert_eq!(saver.tick(start + Duration::from_millis(500)), None);
    assert!(!saver.store().path().exists());

    let outcome = saver.tick(start + Duration::from_millis(700)).unwrap();
    assert!(matches!(outcome, AutosaveOutcome::Saved { oversized: false, .. }));
    let saved = std::fs::read_to_string(saver.store().path()).unwrap();
    assert!(saved.contains("Miller"));

    // nothing new to write
    saver.observe(&mut editor, start + Duration::from_millis(800));
    assert_eq!(saver.tick(start + Duration::from_secs(2)), None);
}

#[test]
fn test_recover_restores_session() {
    let dir = tempdir().unwrap();
    let mut saver = autosaver(dir.path());
    let mut editor = Editor::new();
    let id = editor.add_piece();
    editor.set_piece_position(&id, 30.0, 40.0).unwrap();
    saver.observe(&mut editor, Instant::now());
    assert!(saver.flush().is_some());

    let mut recovered = Editor::new();
    assert!(saver.recover(&mut recovered).unwrap());
    assert_eq!(recovered.project, editor.project);
    assert!(!recovered.can_undo());
}

#[test]
fn test_recover_without_file() {
    let dir = tempdir().unwrap();
    let saver = autosaver(dir.path());
    let mut editor = Editor::new();
    assert!(!saver.recover(&mut editor).unwrap());
}

#[test]
fn test_corrupted_autosave_is_an_error() {
    let dir = tempdir().unwrap();
    let saver = autosaver(dir.path());
    std::fs::write(saver.store().path(), "not json").unwrap();
    let mut editor = Editor::new();
    let before = editor.project.clone();
    assert!(saver.recover(&mut editor).is_err());
    assert_eq!(editor.project, before);
}

#[test]
fn test_large_payload_warns_but_saves() {
    let dir = tempdir().unwrap();
    let settings = AutosaveSettings {
        path: Some(dir.path().join("a.json")),
        warn_bytes: 10,
        ..Default::default()
    };
    let store = AutosaveStore::from_settings(&settings).unwrap();
    let snapshot = Snapshot::from_json("{\"notes\":\"a long note\"}".to_string());
    assert_eq!(
        store.save(&snapshot),
        AutosaveOutcome::Saved { bytes: 23, oversized: true }
    );
    assert_eq!(store.load().unwrap(), Some(snapshot));
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    store.clear().unwrap();
}

#[test]
fn test_write_failure_is_not_fatal() {
    let dir = tempdir().unwrap();
    // a directory where the file should go
    let path = dir.path().join("slot");
    std::fs::create_dir(&path).unwrap();
    let store = AutosaveStore::new(&path);
    let outcome = store.save(&Snapshot::from_json("{}".to_string()));
    assert!(matches!(outcome, AutosaveOutcome::Failed(_)));
}
