use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use notify::{event::ModifyKind, Event, EventKind, RecursiveMode, Watcher as _};
use serdable::GlobPattern;
use tokio::sync::mpsc;

/// Editors often emit several events for one save.
pub const DEBOUNCE: Duration = Duration::from_millis(100);

fn is_save_event(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

fn push_unique(paths: &mut Vec<PathBuf>, event: Event, include: &GlobPattern) {
    if !is_save_event(&event.kind) {
        return;
    }
    for path in event.paths {
        if include.matches_file_name(&path) && path.is_file() && !paths.contains(&path) {
            paths.push(path);
        }
    }
}

/// Errors reported while watching are logged and skipped.
fn collect(paths: &mut Vec<PathBuf>, res: notify::Result<Event>, include: &GlobPattern) {
    match res {
        Ok(event) => push_unique(paths, event, include),
        Err(e) => log::warn!("File watcher error: {}", e),
    }
}

/// Watches `dir` recursively and calls `on_change` once per saved file.
/// Only setting up the watcher can fail; later watcher errors and errors from
/// `on_change` are logged.
pub async fn watch<F, Fut>(
    dir: impl AsRef<Path>,
    include: &GlobPattern,
    mut on_change: F,
) -> anyhow::Result<()>
where
    F: FnMut(PathBuf) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let dir = dir.as_ref();
    let (tx, mut rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        // The receiver is gone only when the watch loop has ended.
        let _ = tx.send(res);
    })
    .context("Failed to create a file watcher")?;
    watcher
        .watch(dir, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {:?}", dir))?;

    log::info!("Watching {:?} for '{}'", dir, include);

    while let Some(res) = rx.recv().await {
        let mut paths = Vec::new();
        collect(&mut paths, res, include);

        // Collect everything arriving within the debounce window.
        while let Ok(Some(res)) = tokio::time::timeout(DEBOUNCE, rx.recv()).await {
            collect(&mut paths, res, include);
        }

        for path in paths {
            log::debug!("Changed: {:?}", path);
            if let Err(e) = on_change(path.clone()).await {
                log::error!("{:?}: {:#}", path, e);
            }
        }
    }
    Ok(())
}
