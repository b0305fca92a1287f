use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::model::{Outcome, Phase, ShotType, View};

// ---------------------------------------------------------------------------
// Resource naming
// ---------------------------------------------------------------------------

/// `{ShotType}/{Phase}_{view}`, e.g. `Jumper/SP_front`.
pub fn phase_resource(shot: ShotType, phase: Phase, view: View) -> String {
    format!("{}/{}_{}", shot.label(), phase.code(), view.suffix())
}

pub fn timing_resource(shot: ShotType) -> String {
    format!("{}/timing", shot.label())
}

/// `{ShotType}/signals_make` or `{ShotType}/signals_miss`.
pub fn signal_resource(shot: ShotType, outcome: Outcome) -> String {
    let tag = match outcome {
        Outcome::Make => "make",
        Outcome::Miss => "miss",
    };
    format!("{}/signals_{tag}", shot.label())
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Somewhere raw CSV tables can be fetched from by resource name.
pub trait TableSource {
    fn fetch(&self, resource: &str) -> Result<String>;

    /// Short description for logs and the status bar.
    fn describe(&self) -> String;
}

/// Reads `{root}/{resource}.csv` from the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TableSource for DirectorySource {
    fn fetch(&self, resource: &str) -> Result<String> {
        let path = self.root.join(format!("{resource}.csv"));
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Fetches `{base_url}/{resource}.csv{query}` over HTTP.
///
/// The published dataset is served from a GitHub blob URL, which needs a
/// `?raw=true` query to return the file contents.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    base_url: String,
    query: String,
    client: reqwest::blocking::Client,
}

impl RemoteSource {
    pub fn new(base_url: impl Into<String>, query: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            query: query.unwrap_or_default(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{resource}.csv{}", self.base_url, self.query)
    }
}

impl TableSource for RemoteSource {
    fn fetch(&self, resource: &str) -> Result<String> {
        let url = self.url(resource);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()
            .with_context(|| format!("fetching {url}"))?;
        response
            .text()
            .with_context(|| format!("reading body of {url}"))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// In-memory resources keyed by resource name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    resources: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: impl Into<String>, csv: impl Into<String>) {
        self.resources.insert(resource.into(), csv.into());
    }

    pub fn remove(&mut self, resource: &str) -> Option<String> {
        self.resources.remove(resource)
    }
}

impl TableSource for MemorySource {
    fn fetch(&self, resource: &str) -> Result<String> {
        self.resources
            .get(resource)
            .cloned()
            .with_context(|| format!("no resource named '{resource}'"))
    }

    fn describe(&self) -> String {
        format!("memory ({} resources)", self.resources.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names_follow_convention() {
        assert_eq!(
            phase_resource(ShotType::Jumper, Phase::SetPoint, View::Front),
            "Jumper/SP_front"
        );
        assert_eq!(timing_resource(ShotType::ThreePoint), "Three/timing");
        assert_eq!(signal_resource(ShotType::FreeThrow, Outcome::Miss), "Free/signals_miss");
    }

    #[test]
    fn remote_url_appends_extension_and_query() {
        let source = RemoteSource::new("https://example.org/data/", Some("?raw=true".into()));
        assert_eq!(
            source.url("Set/timing"),
            "https://example.org/data/Set/timing.csv?raw=true"
        );
    }

    #[test]
    fn memory_source_reports_missing_resource() {
        let mut source = MemorySource::new();
        source.insert("Set/timing", "a,b");
        assert_eq!(source.fetch("Set/timing").unwrap(), "a,b");
        let err = source.fetch("Set/SS_front").unwrap_err();
        assert!(err.to_string().contains("Set/SS_front"));
    }
}
