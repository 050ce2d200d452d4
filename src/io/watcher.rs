use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the file watcher to the dashboard event loop.
#[derive(Debug)]
pub enum FileEvent {
    /// The store or config changed on disk.
    Changed(Vec<PathBuf>),
}

/// A file system watcher for the aisle/ data directory.
///
/// The dashboard holds one of these so that edits made by a concurrent CLI
/// process (or a text editor on config.toml) show up without restarting.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl StoreWatcher {
    /// Start watching the given `aisle/` directory.
    /// Returns a `StoreWatcher` whose `poll()` method should be called each tick.
    pub fn start(aisle_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let aisle_dir_owned = aisle_dir.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                // Only the store file and config matter; ignore the lock and
                // the tempfiles the atomic writer leaves behind briefly.
                let relevant: Vec<PathBuf> = event
                    .paths
                    .into_iter()
                    .filter(|p| {
                        if !p.starts_with(&aisle_dir_owned) {
                            return false;
                        }
                        matches!(
                            p.file_name().and_then(|n| n.to_str()),
                            Some("planner.json") | Some("config.toml")
                        )
                    })
                    .collect();

                if !relevant.is_empty() {
                    let _ = tx.send(FileEvent::Changed(relevant));
                }
            },
            Config::default(),
        )?;

        watcher.watch(aisle_dir, RecursiveMode::NonRecursive)?;
        Ok(StoreWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending file events.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<FileEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}
