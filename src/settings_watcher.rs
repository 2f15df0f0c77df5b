//! Hot reload for the settings file.
//!
//! Watches the directory containing the settings file (editors often replace
//! files instead of writing in place) and reports events for that one file.
//! The host polls once per frame and re-applies settings on change.

use crate::error::SettingsResult;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError, channel};

pub use crate::settings::default_settings_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    rx: Receiver<notify::Result<Event>>,
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> SettingsResult<Self> {
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next event concerning the settings file, if any arrived.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if let Some(settings_event) = self.classify(&event) {
                        return Some(settings_event);
                    }
                }
                Ok(Err(e)) => return Some(SettingsEvent::Error(e.to_string())),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    return Some(SettingsEvent::Error("watcher disconnected".to_string()));
                }
            }
        }
    }

    fn classify(&self, event: &Event) -> Option<SettingsEvent> {
        let file_name = self.path.file_name()?;
        if !event.paths.iter().any(|p| p.file_name() == Some(file_name)) {
            return None;
        }
        match event.kind {
            EventKind::Create(_) => Some(SettingsEvent::Created),
            EventKind::Modify(_) => Some(SettingsEvent::Modified),
            EventKind::Remove(_) => Some(SettingsEvent::Deleted),
            _ => None,
        }
    }
}
