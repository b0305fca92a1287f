use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::data::model::ShotType;
use crate::data::source::{DirectorySource, RemoteSource, TableSource};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_ATHLETE: &str = "John Doe";
pub const REPORT_TITLE: &str = "BASKETBALL SHOOTING REPORT";

/// Where raw tables are read from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    Directory {
        path: PathBuf,
    },
    Remote {
        base_url: String,
        #[serde(default)]
        query: Option<String>,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Directory {
            path: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl SourceConfig {
    pub fn build(&self) -> Box<dyn TableSource> {
        match self {
            SourceConfig::Directory { path } => Box::new(DirectorySource::new(path)),
            SourceConfig::Remote { base_url, query } => {
                Box::new(RemoteSource::new(base_url.clone(), query.clone()))
            }
        }
    }
}

/// Settings file, e.g.
///
/// ```json
/// {
///   "source": { "kind": "remote",
///               "base_url": "https://github.com/cdziuk/BasketballData/blob/main",
///               "query": "?raw=true" },
///   "default_shot": "Set",
///   "athlete": "John Doe"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub source: SourceConfig,
    pub default_shot: ShotType,
    pub athlete: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            default_shot: ShotType::default(),
            athlete: DEFAULT_ATHLETE.to_string(),
        }
    }
}

impl ReportConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

/// Title block shown above the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportHeader {
    pub title: String,
    pub athlete: String,
    pub date: String,
    pub time: String,
}

impl ReportHeader {
    pub fn new(athlete: &str, at: DateTime<Local>) -> Self {
        Self {
            title: REPORT_TITLE.to_string(),
            athlete: athlete.to_string(),
            date: at.format("%m/%d/%Y").to_string(),
            time: at.format("%H:%M:%S").to_string(),
        }
    }

    pub fn now(athlete: &str) -> Self {
        Self::new(athlete, Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults_read_local_data_dir() {
        let config: ReportConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.default_shot, ShotType::Set);
        assert_eq!(
            config.source,
            SourceConfig::Directory {
                path: PathBuf::from("data")
            }
        );
    }

    #[test]
    fn remote_source_and_shot_labels_parse() {
        let config: ReportConfig = serde_json::from_str(
            r#"{
                "source": { "kind": "remote", "base_url": "https://example.org", "query": "?raw=true" },
                "default_shot": "Three",
                "athlete": "A. Shooter"
            }"#,
        )
        .unwrap();
        assert_eq!(config.default_shot, ShotType::ThreePoint);
        assert_eq!(config.athlete, "A. Shooter");
        assert!(matches!(config.source, SourceConfig::Remote { ref query, .. } if query.as_deref() == Some("?raw=true")));
    }

    #[test]
    fn unknown_shot_label_is_an_error() {
        assert!(serde_json::from_str::<ReportConfig>(r#"{"default_shot": "Hook"}"#).is_err());
    }

    #[test]
    fn header_formats_date_and_time() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let header = ReportHeader::new("John Doe", at);
        assert_eq!(header.title, "BASKETBALL SHOOTING REPORT");
        assert_eq!(header.date, "03/09/2024");
        assert_eq!(header.time, "14:05:07");
    }
}
