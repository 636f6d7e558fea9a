//! Post-build asset writer and page injector.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use crate::widget::WidgetAssets;

/// Configuration for injecting the widget into a built site.
#[derive(Debug, Clone)]
pub struct InjectConfig {
    /// Root of the generated site output
    pub site_dir: PathBuf,

    /// Ordered page paths relative to `site_dir`, as supplied by a host
    /// generator. `None` discovers `*.html` files by walking `site_dir`.
    pub pages: Option<Vec<PathBuf>>,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("dist"),
            pages: None,
        }
    }
}

/// Result of an injection run.
#[derive(Debug)]
pub struct InjectReport {
    /// Number of asset files written
    pub assets_written: usize,

    /// Pages that received the widget fragment
    pub pages_injected: usize,

    /// Pages without a closing body tag, left untouched
    pub pages_skipped: usize,

    /// Pages that already carried the widget from an earlier run
    pub pages_already_injected: usize,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur while writing assets or rewriting pages.
///
/// Every filesystem failure is fatal: the build must not finish with pages
/// referencing assets that were never written.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("Site directory not found: {0}")]
    SiteDirMissing(String),

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

/// What happened to a single page.
enum PageOutcome {
    Injected,
    NoBodyTag,
    AlreadyInjected,
}

/// Writes the widget assets and splices the fragment into generated pages.
pub struct AssetWriter {
    config: InjectConfig,
    assets: WidgetAssets,
}

impl AssetWriter {
    /// Create an asset writer with the stock widget.
    pub fn new(config: InjectConfig) -> Self {
        Self {
            config,
            assets: WidgetAssets::default(),
        }
    }

    /// Create an asset writer with a custom widget theme.
    pub fn with_assets(config: InjectConfig, assets: WidgetAssets) -> Self {
        Self { config, assets }
    }

    /// Run the full injection pass: write both asset files, then rewrite
    /// every page that has a closing body tag and no widget yet.
    pub fn run(&self) -> Result<InjectReport, InjectError> {
        let start = Instant::now();

        if !self.config.site_dir.exists() {
            return Err(InjectError::SiteDirMissing(
                self.config.site_dir.display().to_string(),
            ));
        }

        let assets_written = self.write_assets()?;

        let mut pages_injected = 0;
        let mut pages_skipped = 0;
        let mut pages_already_injected = 0;

        for page in self.page_paths()? {
            match self.inject_page(&page)? {
                PageOutcome::Injected => pages_injected += 1,
                PageOutcome::NoBodyTag => {
                    tracing::debug!("No closing body tag, skipping {}", page.display());
                    pages_skipped += 1;
                }
                PageOutcome::AlreadyInjected => pages_already_injected += 1,
            }
        }

        Ok(InjectReport {
            assets_written,
            pages_injected,
            pages_skipped,
            pages_already_injected,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Write the stylesheet and script to their fixed paths, creating the
    /// asset directories as needed.
    fn write_assets(&self) -> Result<usize, InjectError> {
        let files = [
            (self.assets.css_path, self.assets.stylesheet),
            (self.assets.js_path, self.assets.script),
        ];

        for (relative, content) in files {
            let path = self.config.site_dir.join(relative);

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| InjectError::Write {
                    path: parent.display().to_string(),
                    message: e.to_string(),
                })?;
            }

            fs::write(&path, content).map_err(|e| InjectError::Write {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Ok(files.len())
    }

    /// Resolve the pages to process: the host-supplied list when present,
    /// otherwise every `*.html` file under the site directory.
    fn page_paths(&self) -> Result<Vec<PathBuf>, InjectError> {
        if let Some(pages) = &self.config.pages {
            return Ok(pages
                .iter()
                .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("html"))
                .map(|p| self.config.site_dir.join(p))
                .collect());
        }

        let mut pages: Vec<PathBuf> = WalkDir::new(&self.config.site_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("html"))
            .map(|e| e.path().to_path_buf())
            .collect();

        // Deterministic order regardless of directory iteration order
        pages.sort();

        Ok(pages)
    }

    /// Splice the widget fragment immediately before the page's first
    /// closing body tag, rewriting the file in place.
    fn inject_page(&self, path: &Path) -> Result<PageOutcome, InjectError> {
        let content = fs::read_to_string(path).map_err(|e| InjectError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        // Re-running over an injected page must not duplicate the widget
        if content.contains(self.assets.container_id) {
            return Ok(PageOutcome::AlreadyInjected);
        }

        if !content.contains("</body>") {
            return Ok(PageOutcome::NoBodyTag);
        }

        let replacement = format!("{}</body>", self.assets.fragment());
        let injected = content.replacen("</body>", &replacement, 1);

        fs::write(path, injected).map_err(|e| InjectError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(PageOutcome::Injected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PAGE: &str = "<!DOCTYPE html>\n<html><head><title>Doc</title></head>\n<body>\n<h1>Hello</h1>\n</body>\n</html>\n";

    fn site_with_page(page: &str) -> (tempfile::TempDir, PathBuf) {
        let temp = tempdir().unwrap();
        let site = temp.path().join("dist");
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("index.html"), page).unwrap();
        (temp, site)
    }

    fn run(site: &PathBuf) -> InjectReport {
        AssetWriter::new(InjectConfig {
            site_dir: site.clone(),
            pages: None,
        })
        .run()
        .unwrap()
    }

    #[test]
    fn writes_both_asset_files() {
        let (_temp, site) = site_with_page(PAGE);

        let report = run(&site);

        assert_eq!(report.assets_written, 2);

        let css = fs::read_to_string(site.join("assets/css/chatbot.css")).unwrap();
        let js = fs::read_to_string(site.join("assets/js/chatbot.js")).unwrap();
        assert!(!css.is_empty());
        assert!(!js.is_empty());
    }

    #[test]
    fn injects_fragment_before_closing_body_tag() {
        let (_temp, site) = site_with_page(PAGE);

        let report = run(&site);
        assert_eq!(report.pages_injected, 1);

        let content = fs::read_to_string(site.join("index.html")).unwrap();

        assert_eq!(content.matches("chatbot-container").count(), 1);

        // The fragment sits immediately before the closing tag
        let container = content.find("id=\"chatbot-container\"").unwrap();
        let body_close = content.find("</body>").unwrap();
        assert!(container < body_close);
        assert!(content[container..body_close].ends_with('\n'));
        assert!(!content[body_close..].contains("chatbot-container"));
    }

    #[test]
    fn page_without_body_tag_is_untouched() {
        let fragmentary = "<h1>Partial content, no document shell</h1>\n";
        let (_temp, site) = site_with_page(fragmentary);

        let report = run(&site);

        assert_eq!(report.pages_injected, 0);
        assert_eq!(report.pages_skipped, 1);

        let content = fs::read_to_string(site.join("index.html")).unwrap();
        assert_eq!(content, fragmentary);
    }

    #[test]
    fn second_run_does_not_duplicate_widget() {
        let (_temp, site) = site_with_page(PAGE);

        run(&site);
        let first_pass = fs::read_to_string(site.join("index.html")).unwrap();

        let report = run(&site);
        assert_eq!(report.pages_injected, 0);
        assert_eq!(report.pages_already_injected, 1);

        let second_pass = fs::read_to_string(site.join("index.html")).unwrap();
        pretty_assertions::assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn injects_only_first_closing_body_tag() {
        let odd = "<body>one</body>\n<body>two</body>\n";
        let (_temp, site) = site_with_page(odd);

        run(&site);

        let content = fs::read_to_string(site.join("index.html")).unwrap();
        assert_eq!(content.matches("chatbot-container").count(), 1);

        let container = content.find("chatbot-container").unwrap();
        assert!(container > content.find("one").unwrap());
        assert!(container < content.find("two").unwrap());
    }

    #[test]
    fn explicit_page_list_filters_non_html() {
        let temp = tempdir().unwrap();
        let site = temp.path().join("dist");
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("page.html"), PAGE).unwrap();
        fs::write(site.join("data.json"), "{}").unwrap();

        let report = AssetWriter::new(InjectConfig {
            site_dir: site.clone(),
            pages: Some(vec![PathBuf::from("page.html"), PathBuf::from("data.json")]),
        })
        .run()
        .unwrap();

        assert_eq!(report.pages_injected, 1);
        assert_eq!(fs::read_to_string(site.join("data.json")).unwrap(), "{}");
    }

    #[test]
    fn discovers_nested_pages() {
        let temp = tempdir().unwrap();
        let site = temp.path().join("dist");
        fs::create_dir_all(site.join("guide")).unwrap();
        fs::write(site.join("index.html"), PAGE).unwrap();
        fs::write(site.join("guide/setup.html"), PAGE).unwrap();

        let report = run(&site);

        assert_eq!(report.pages_injected, 2);
    }

    #[test]
    fn missing_site_dir_is_an_error() {
        let temp = tempdir().unwrap();

        let result = AssetWriter::new(InjectConfig {
            site_dir: temp.path().join("nope"),
            pages: None,
        })
        .run();

        assert!(matches!(result, Err(InjectError::SiteDirMissing(_))));
    }
}
