//! File watching for rebuilds.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use marquee_config::SiteConfig;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Quiet period before a burst of file system events is flushed.
const DEBOUNCE: Duration = Duration::from_millis(150);

/// A change that requires a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum WatchEvent {
    /// `site.toml` or the sidebar file changed; the config must be reloaded.
    Config(PathBuf),

    /// A markdown document was created, modified or removed.
    Content(PathBuf),

    /// A file under the static directory changed.
    Asset(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Config(path) | Self::Content(path) | Self::Asset(path) => path,
        }
    }
}

/// The inputs of a site build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSet {
    /// Individual files: the config and sidebar files
    pub config_files: Vec<PathBuf>,

    /// Docs trees, watched recursively
    pub content_dirs: Vec<PathBuf>,

    /// Static asset tree, watched recursively
    pub static_dir: PathBuf,
}

impl WatchSet {
    /// Everything a build of `config`, loaded from `config_path`, reads.
    pub fn for_site(config_path: &Path, config: &SiteConfig) -> Self {
        Self {
            config_files: vec![absolute(config_path), absolute(&config.docs().sidebar_path)],
            content_dirs: vec![absolute(&config.docs().path), absolute(config.i18n_dir())],
            static_dir: absolute(config.static_dir()),
        }
    }

    fn classify(&self, path: &Path) -> Option<WatchEvent> {
        if self.config_files.iter().any(|file| same_file(file, path)) {
            return Some(WatchEvent::Config(path.to_path_buf()));
        }
        if self.content_dirs.iter().any(|dir| path.starts_with(dir)) {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            return matches!(ext, "md" | "mdx").then(|| WatchEvent::Content(path.to_path_buf()));
        }
        if path.starts_with(&self.static_dir) {
            return Some(WatchEvent::Asset(path.to_path_buf()));
        }
        None
    }
}

// notify reports absolute paths.
fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn same_file(watched: &Path, changed: &Path) -> bool {
    watched == changed
        || (watched.file_name() == changed.file_name()
            && watched.parent().and_then(|p| p.canonicalize().ok())
                == changed.parent().and_then(|p| p.canonicalize().ok()))
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch the inputs in `set`.
    ///
    /// Returns the watcher and a channel of debounced batches. Each batch is
    /// deduplicated and sorted with config changes first.
    pub fn new(
        set: WatchSet,
    ) -> Result<(Self, async_mpsc::Receiver<Vec<WatchEvent>>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(16);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for dir in set.content_dirs.iter().chain(Some(&set.static_dir)) {
            if dir.exists() {
                watcher
                    .watch(dir, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        // Editors replace files by rename, so watch the parent directory.
        let parents: BTreeSet<&Path> = set
            .config_files
            .iter()
            .filter_map(|file| file.parent())
            .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
            .collect();
        for parent in parents {
            if parent.exists() {
                watcher
                    .watch(parent, RecursiveMode::NonRecursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        std::thread::spawn(move || {
            while let Ok(first) = sync_rx.recv() {
                let mut batch = BTreeSet::new();
                collect(&set, &first, &mut batch);

                while let Ok(next) = sync_rx.recv_timeout(DEBOUNCE) {
                    collect(&set, &next, &mut batch);
                }

                if !batch.is_empty() && async_tx.blocking_send(batch.into_iter().collect()).is_err() {
                    break;
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

fn collect(set: &WatchSet, event: &notify::Event, batch: &mut BTreeSet<WatchEvent>) {
    use notify::EventKind;

    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return;
    }
    batch.extend(event.paths.iter().filter_map(|path| set.classify(path)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn watch_set(root: &Path) -> WatchSet {
        WatchSet {
            config_files: vec![root.join("site.toml"), root.join("sidebars.toml")],
            content_dirs: vec![root.join("docs"), root.join("i18n")],
            static_dir: root.join("static"),
        }
    }

    #[test]
    fn classifies_paths() {
        let set = watch_set(Path::new("/site"));

        assert_eq!(
            set.classify(Path::new("/site/docs/intro.md")),
            Some(WatchEvent::Content(PathBuf::from("/site/docs/intro.md")))
        );
        assert_eq!(
            set.classify(Path::new("/site/i18n/ka/docs/intro.mdx")),
            Some(WatchEvent::Content(PathBuf::from("/site/i18n/ka/docs/intro.mdx")))
        );
        assert_eq!(
            set.classify(Path::new("/site/sidebars.toml")),
            Some(WatchEvent::Config(PathBuf::from("/site/sidebars.toml")))
        );
        assert_eq!(
            set.classify(Path::new("/site/static/img/logo.svg")),
            Some(WatchEvent::Asset(PathBuf::from("/site/static/img/logo.svg")))
        );
    }

    #[test]
    fn ignores_unrelated_paths() {
        let set = watch_set(Path::new("/site"));

        assert_eq!(set.classify(Path::new("/site/docs/.intro.md.swp")), None);
        assert_eq!(set.classify(Path::new("/site/build/index.html")), None);
        assert_eq!(set.classify(Path::new("/site/README.md")), None);
    }

    #[test]
    fn config_changes_sort_first() {
        let mut events = vec![
            WatchEvent::Asset(PathBuf::from("a")),
            WatchEvent::Content(PathBuf::from("b")),
            WatchEvent::Config(PathBuf::from("c")),
        ];
        events.sort();
        assert!(matches!(events[0], WatchEvent::Config(_)));
    }

    #[tokio::test]
    async fn watches_content_changes() {
        let temp = tempdir().unwrap();
        let root = temp.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::create_dir_all(root.join("static")).unwrap();

        let (watcher, mut rx) = FileWatcher::new(watch_set(&root)).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(root.join("docs/intro.md"), "# Intro").unwrap();

        let batch = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;
        drop(watcher);

        let batch = batch
            .expect("timeout waiting for file watch event")
            .expect("channel should not be closed");
        assert!(batch
            .iter()
            .any(|event| event == &WatchEvent::Content(root.join("docs/intro.md"))));
    }
}
