//! Embedded publication catalogue.
//!
//! Holds the NASA Space Biology publication list in memory and answers the
//! same queries the external backend does: topic distribution and keyword /
//! topic search. The dashboard talks to it over HTTP through [`crate::api`],
//! exactly as it would talk to a separately hosted backend.
//!
//! # Loading
//!
//! The CSV needs a `Title` column and may carry `Link` and `Topic`. Rows
//! without a topic are categorised from their title (see [`topics`]). When
//! the file is missing it is downloaded once from the configured source URL.

pub mod keywords;
pub mod topics;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::backend::{ALL_TOPICS, Publication, TopicCount};
use crate::config::CatalogConfig;

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

const SUMMARY_MAX_CHARS: usize = 300;

/// Errors raised while loading the catalogue.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Download failure.
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed topic distribution file.
    #[error("topics file error: {0}")]
    Json(#[from] serde_json::Error),

    /// No local file and nowhere to download from.
    #[error("catalogue file {0} not found and no source URL configured")]
    Missing(String),
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Link", default)]
    link: Option<String>,
    #[serde(rename = "Topic", default)]
    topic: Option<String>,
}

#[derive(Debug, Clone)]
struct Record {
    id: u64,
    title: String,
    link: String,
    topic: String,
}

impl Record {
    fn to_publication(&self) -> Publication {
        Publication {
            id: self.id,
            title: self.title.clone(),
            summary: synthesize_summary(&self.title, &self.topic),
            link: self.link.clone(),
            topic: Some(self.topic.clone()),
        }
    }
}

/// In-memory publication catalogue.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
    topics_override: Option<Vec<TopicCount>>,
}

impl Catalog {
    /// Load the catalogue described by `config`.
    ///
    /// Never fails: problems are logged and leave an empty catalogue, so the
    /// API keeps answering (with no results) instead of taking the server down.
    pub async fn load(config: &CatalogConfig) -> Self {
        let mut catalog = match Self::try_load(config).await {
            Ok(c) => c,
            Err(e) => {
                error!(path = %config.csv_path, error = %e, "Failed to load catalogue");
                return Self::default();
            }
        };

        if let Some(path) = &config.topics_path {
            match read_topics_file(Path::new(path)).await {
                Ok(topics) => catalog.topics_override = Some(topics),
                Err(e) => warn!(path = %path, error = %e, "Ignoring topics file"),
            }
        }

        info!(
            name: "catalog.loaded",
            publications = catalog.len(),
            topics = catalog.topics().len(),
            "Catalogue loaded"
        );
        catalog
    }

    async fn try_load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let path = Path::new(&config.csv_path);
        if tokio::fs::try_exists(path).await? {
            let bytes = tokio::fs::read(path).await?;
            return Self::from_csv_reader(bytes.as_slice());
        }

        let Some(url) = &config.source_url else {
            return Err(CatalogError::Missing(config.csv_path.clone()));
        };

        info!(url = %url, "Downloading catalogue");
        let bytes = reqwest::get(url).await?.error_for_status()?.bytes().await?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &bytes).await?;
        Self::from_csv_reader(bytes.as_ref())
    }

    /// Parse a catalogue from CSV.
    ///
    /// Record ids are zero-based row positions.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let mut records = Vec::new();

        for (idx, row) in rdr.deserialize::<CsvRow>().enumerate() {
            let row = row?;
            let title = row.title.unwrap_or_else(|| "Untitled".to_string());
            let topic = row
                .topic
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| topics::categorize(&title).to_string());
            records.push(Record {
                id: idx as u64,
                link: row.link.unwrap_or_else(|| "#".to_string()),
                title,
                topic,
            });
        }

        Ok(Self {
            records,
            topics_override: None,
        })
    }

    /// Number of publications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalogue holds no publications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Topic distribution, largest first.
    ///
    /// A configured topics file takes precedence over counting.
    #[must_use]
    pub fn topics(&self) -> Vec<TopicCount> {
        if let Some(topics) = &self.topics_override {
            return topics.clone();
        }

        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for r in &self.records {
            *counts.entry(r.topic.as_str()).or_default() += 1;
        }

        let mut topics: Vec<TopicCount> = counts
            .into_iter()
            .map(|(name, count)| TopicCount {
                name: name.to_string(),
                count,
            })
            .collect();
        // Stable sort keeps the BTreeMap's name order among equal counts.
        topics.sort_by(|a, b| b.count.cmp(&a.count));
        topics
    }

    /// Search by free text and/or topic.
    ///
    /// A title matches when it contains any extracted keyword; a query made
    /// only of stop words falls back to a plain substring match.
    #[must_use]
    pub fn search(&self, query: Option<&str>, topic: Option<&str>, limit: usize) -> Vec<Publication> {
        let topic = topic.filter(|t| !t.is_empty() && *t != ALL_TOPICS);
        let query = query.filter(|q| !q.is_empty()).map(str::to_lowercase);
        let keywords = query
            .as_deref()
            .map(keywords::extract_keywords)
            .unwrap_or_default();

        self.records
            .iter()
            .filter(|r| topic.is_none_or(|t| r.topic == t))
            .filter(|r| {
                let Some(q) = &query else {
                    return true;
                };
                let title = r.title.to_lowercase();
                if keywords.is_empty() {
                    title.contains(q.as_str())
                } else {
                    keywords.iter().any(|k| title.contains(k.as_str()))
                }
            })
            .take(limit)
            .map(Record::to_publication)
            .collect()
    }
}

/// Summary text for a publication, capped at 300 characters plus an ellipsis.
#[must_use]
pub fn synthesize_summary(title: &str, topic: &str) -> String {
    let summary = format!(
        "This NASA bioscience publication explores {}. Categorized under {topic}, this research \
         provides valuable insights for space exploration and understanding biological processes \
         in microgravity environments.",
        title.to_lowercase()
    );

    if summary.chars().count() > SUMMARY_MAX_CHARS {
        let mut truncated: String = summary.chars().take(SUMMARY_MAX_CHARS).collect();
        truncated.push_str("...");
        truncated
    } else {
        summary
    }
}

async fn read_topics_file(path: &Path) -> Result<Vec<TopicCount>, CatalogError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
