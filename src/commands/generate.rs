//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::generator::{Generator, SiteContent};
use crate::{Portfolio, CONFIG_FILE};

const DEBOUNCE: Duration = Duration::from_millis(500);

/// Load all content and render every page
pub fn run(site: &Portfolio) -> Result<()> {
    let start = Instant::now();

    let content = SiteContent::load(&site.loader())?;
    tracing::info!(
        "Loaded {} items ({} projects, {} jobs, {} volunteer, {} extracurricular, {} photos)",
        content.item_count(),
        content.projects.len(),
        content.jobs.len(),
        content.volunteer.len(),
        content.extracurricular.len(),
        content.photos.len()
    );

    let generator = Generator::new(site)?;
    let routes = generator.generate(&content)?;

    tracing::info!(
        "Generated {} pages in {:.2}s",
        routes.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(site: &Portfolio) -> Result<()> {
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    watch_with(site, || {}).await
}

/// Rebuild after every debounced batch of source changes, calling
/// `on_rebuild` after each successful build
pub async fn watch_with<F>(site: &Portfolio, mut on_rebuild: F) -> Result<()>
where
    F: FnMut(),
{
    let (tx, rx) = std::sync::mpsc::channel();

    // A burst of events arrives as one batch after DEBOUNCE of quiet
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    for dir in [&site.content_dir, &site.static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    // The debouncer delivers on a std channel, so wait on it off the runtime
    let rx = Arc::new(Mutex::new(rx));
    loop {
        let rx = Arc::clone(&rx);
        let received = tokio::task::spawn_blocking(move || match rx.lock() {
            Ok(guard) => guard.recv().ok(),
            Err(_) => None,
        })
        .await?;

        match received {
            Some(Ok(events)) => {
                let changed: Vec<&Path> = events
                    .iter()
                    .map(|e| e.path.as_path())
                    .filter(|p| !is_ignored(p))
                    .collect();
                if changed.is_empty() {
                    continue;
                }
                for path in &changed {
                    tracing::info!("File changed: {}", path.display());
                }

                match rebuild(site) {
                    Ok(()) => {
                        tracing::info!("Regenerated successfully");
                        on_rebuild();
                    }
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Some(Err(e)) => tracing::error!("Watch error: {:?}", e),
            None => break,
        }
    }

    Ok(())
}

/// Editor swap files and VCS metadata never trigger a rebuild
fn is_ignored(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    path_str.contains(".git")
        || path_str.contains(".DS_Store")
        || path_str.ends_with('~')
        || path_str.ends_with(".swp")
}

/// Re-read the configuration too, since it may be what changed
pub fn rebuild(site: &Portfolio) -> Result<()> {
    let fresh = Portfolio::new(&site.base_dir)?;
    run(&fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;
    use tokio::sync::mpsc;
    use tokio::time::{sleep, timeout};

    fn project(title: &str) -> String {
        format!("---\ntitle: {}\ndescription: A project\n---\nBody\n", title)
    }

    #[test]
    fn test_is_ignored() {
        assert!(is_ignored(Path::new("content/.git/index")));
        assert!(is_ignored(Path::new("content/projects/a.md.swp")));
        assert!(is_ignored(Path::new("content/projects/a.md~")));
        assert!(!is_ignored(Path::new("content/projects/a.md")));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_watch_builds_the_last_of_quick_successive_saves() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("content/projects/loom.md");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, project("Loom")).unwrap();

        let site = Portfolio::with_config(dir.path(), SiteConfig::default());
        run(&site).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let watched = site.clone();
        let handle = tokio::spawn(async move {
            watch_with(&watched, move || {
                let _ = tx.send(());
            })
            .await
        });
        sleep(Duration::from_millis(300)).await;

        fs::write(&source, project("Loom Draft")).unwrap();
        sleep(Duration::from_millis(50)).await;
        fs::write(&source, project("Analytical Loom")).unwrap();

        let page = dir.path().join("public/projects/index.html");
        let built = timeout(Duration::from_secs(10), async {
            loop {
                if fs::read_to_string(&page)
                    .map(|html| html.contains("Analytical Loom"))
                    .unwrap_or(false)
                {
                    return true;
                }
                if rx.recv().await.is_none() {
                    return false;
                }
            }
        })
        .await;
        handle.abort();

        assert_eq!(built, Ok(true));
    }
}
