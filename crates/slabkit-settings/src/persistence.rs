//! Autosave Persistence
//!
//! Keeps the last project snapshot on disk so an interrupted session can be
//! recovered. Saving is debounced: every edit pushes the deadline back, and
//! the snapshot is written once the editor has been quiet for the configured
//! interval. Time is passed in by the caller, so the debouncer can be driven
//! by a UI timer or stepped directly in tests.
//!
//! Autosave never fails an edit. Write errors are logged and reported as an
//! [`AutosaveOutcome`].

use slabkit_designer::serialization::Snapshot;
use slabkit_designer::Editor;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::AutosaveSettings;
use crate::error::{PersistenceError, SettingsError, SettingsResult};

/// `<data dir>/slabkit/autosave.json`
pub fn default_autosave_path() -> SettingsResult<PathBuf> {
    let dir = dirs::data_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no data directory on this platform".to_string())
    })?;
    Ok(dir.join("slabkit").join("autosave.json"))
}

/// Result of one autosave attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutosaveOutcome {
    /// Snapshot written; `oversized` when it crossed the warning threshold.
    Saved { bytes: usize, oversized: bool },
    /// Autosave is switched off in the configuration.
    Disabled,
    /// The write failed; the editor keeps working.
    Failed(String),
}

/// Single-slot autosave file.
#[derive(Debug, Clone)]
pub struct AutosaveStore {
    path: PathBuf,
    warn_bytes: usize,
    enabled: bool,
}

impl AutosaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let defaults = AutosaveSettings::default();
        Self {
            path: path.into(),
            warn_bytes: defaults.warn_bytes as usize,
            enabled: true,
        }
    }

    /// Store described by the autosave section of the configuration.
    pub fn from_settings(settings: &AutosaveSettings) -> SettingsResult<Self> {
        let path = match &settings.path {
            Some(path) => path.clone(),
            None => default_autosave_path()?,
        };
        Ok(Self {
            path,
            warn_bytes: usize::try_from(settings.warn_bytes).unwrap_or(usize::MAX),
            enabled: settings.enabled,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Writes a snapshot, replacing the previous one.
    pub fn save(&self, snapshot: &Snapshot) -> AutosaveOutcome {
        if !self.enabled {
            return AutosaveOutcome::Disabled;
        }
        let bytes = snapshot.as_str().len();
        let oversized = bytes > self.warn_bytes;
        if oversized {
            tracing::warn!(
                bytes,
                limit = self.warn_bytes,
                "autosave payload is large; consider removing overlay images"
            );
        }
        match self.write(snapshot) {
            Ok(()) => {
                tracing::debug!(bytes, path = %self.path.display(), "autosaved");
                AutosaveOutcome::Saved { bytes, oversized }
            }
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "autosave failed");
                AutosaveOutcome::Failed(err.to_string())
            }
        }
    }

    fn write(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, snapshot.as_str())?;
        Ok(())
    }

    /// Reads the saved snapshot, if there is one.
    pub fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Err(PersistenceError::Corrupted("autosave file is empty".to_string()));
        }
        Ok(Some(Snapshot::from_json(content)))
    }

    /// Removes the saved snapshot.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Trailing-edge debouncer over caller-supplied time.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Pushes the deadline to `now + delay`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Fires once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Connects an editor's autosave requests to a store through a debouncer.
#[derive(Debug)]
pub struct Autosaver {
    store: AutosaveStore,
    debouncer: Debouncer,
    pending: Option<Snapshot>,
}

impl Autosaver {
    pub fn new(store: AutosaveStore, delay: Duration) -> Self {
        Self {
            store,
            debouncer: Debouncer::new(delay),
            pending: None,
        }
    }

    pub fn from_settings(settings: &AutosaveSettings) -> SettingsResult<Self> {
        Ok(Self::new(
            AutosaveStore::from_settings(settings)?,
            Duration::from_millis(settings.debounce_ms),
        ))
    }

    pub fn store(&self) -> &AutosaveStore {
        &self.store
    }

    /// Picks up the editor's latest edits and restarts the quiet period.
    pub fn observe(&mut self, editor: &mut Editor, now: Instant) {
        if let Some(snapshot) = editor.take_pending_save() {
            self.pending = Some(snapshot);
            self.debouncer.schedule(now);
        }
    }

    /// Writes the pending snapshot once the quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<AutosaveOutcome> {
        if !self.debouncer.poll(now) {
            return None;
        }
        let snapshot = self.pending.take()?;
        Some(self.store.save(&snapshot))
    }

    /// Writes any pending snapshot immediately, e.g. on shutdown.
    pub fn flush(&mut self) -> Option<AutosaveOutcome> {
        self.debouncer.cancel();
        let snapshot = self.pending.take()?;
        Some(self.store.save(&snapshot))
    }

    /// Restores the saved session into `editor`, if one exists.
    pub fn recover(&self, editor: &mut Editor) -> SettingsResult<bool> {
        let Some(snapshot) = self.store.load()? else {
            return Ok(false);
        };
        editor
            .restore_autosave(&snapshot)
            .map_err(|e| PersistenceError::Corrupted(e.to_string()))?;
        tracing::info!(path = %self.store.path().display(), "autosave recovered");
        Ok(true)
    }
}
