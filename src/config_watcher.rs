//! Config file hot-reload.
//!
//! Watches the directory containing the config file (editors and
//! [`ViewerConfig::save`](crate::config::ViewerConfig::save) replace the file
//! by rename, which a watch on the file itself would miss) and reports events
//! for that file only.

use crate::error::ConfigResult;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError, channel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    Created,
    Modified,
    Deleted,
    Error(String),
}

pub struct ConfigWatcher {
    path: PathBuf,
    rx: Receiver<notify::Result<Event>>,
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf) -> ConfigResult<Self> {
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next event for the watched file, if any. Never blocks.
    pub fn poll(&mut self) -> Option<ConfigEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if !event.paths.iter().any(|p| self.is_target(p)) {
                        continue;
                    }
                    let mapped = match event.kind {
                        EventKind::Create(_) => ConfigEvent::Created,
                        EventKind::Modify(_) => ConfigEvent::Modified,
                        EventKind::Remove(_) => ConfigEvent::Deleted,
                        _ => continue,
                    };
                    return Some(mapped);
                }
                Ok(Err(e)) => return Some(ConfigEvent::Error(e.to_string())),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    // Event paths may be canonicalized, so compare by file name
    fn is_target(&self, candidate: &Path) -> bool {
        candidate.file_name().is_some() && candidate.file_name() == self.path.file_name()
    }
}
