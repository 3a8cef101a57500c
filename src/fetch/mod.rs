//! Loading of the four reference tables. Each source is fetched once and
//! independently; a source that cannot be retrieved or parsed degrades to an
//! empty dataset so the others still contribute. All four loads finish
//! before the location catalog is built.

use anyhow::{Context, Result};
use reqwest::Client;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::LoadError;
use crate::locate::LocationCatalog;
use crate::table::{Dataset, DatasetKind};

/// Where the reference tables live: an HTTP(S) base the files are served
/// under, or a local directory holding them.
#[derive(Debug, Clone)]
pub enum DataSource {
    BaseUrl(Url),
    Directory(PathBuf),
}

impl DataSource {
    /// Interpret a user-supplied string: anything starting with `http://` or
    /// `https://` is a base URL, everything else a directory path.
    pub fn parse(spec: &str) -> Result<Self> {
        if spec.starts_with("http://") || spec.starts_with("https://") {
            // A trailing slash makes Url::join append instead of replace.
            let normalized = if spec.ends_with('/') {
                spec.to_string()
            } else {
                format!("{spec}/")
            };
            let url = Url::parse(&normalized).with_context(|| format!("invalid base URL {spec}"))?;
            Ok(DataSource::BaseUrl(url))
        } else {
            Ok(DataSource::Directory(PathBuf::from(spec)))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::BaseUrl(url) => write!(f, "{url}"),
            DataSource::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// The loaded reference tables plus the catalog of selectable locations.
/// Read-only for the rest of the session once built.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub rainfall: Dataset,
    pub groundwater: Dataset,
    pub soil: Dataset,
    pub aquifer: Dataset,
    pub locations: LocationCatalog,
}

impl ReferenceData {
    pub fn datasets(&self) -> [&Dataset; 4] {
        [&self.rainfall, &self.groundwater, &self.soil, &self.aquifer]
    }
}

async fn fetch_text(client: &Client, source: &DataSource, file: &str) -> Result<String> {
    match source {
        DataSource::BaseUrl(base) => {
            let url = base.join(file).with_context(|| format!("joining {file}"))?;
            debug!(%url, "fetching");
            Ok(client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("GET {url} failed"))?
                .error_for_status()
                .with_context(|| format!("non-success status from {url}"))?
                .text()
                .await
                .with_context(|| format!("reading body from {url}"))?)
        }
        DataSource::Directory(dir) => {
            let path = dir.join(file);
            debug!(path = %path.display(), "reading");
            fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))
        }
    }
}

/// Load one reference table. Retrieval or parse trouble is logged and yields
/// an empty dataset; partial availability is normal.
pub async fn load_dataset(client: &Client, source: &DataSource, kind: DatasetKind) -> Dataset {
    match fetch_text(client, source, kind.source_file()).await {
        Ok(text) => {
            let dataset = Dataset::from_text(kind, &text);
            info!(dataset = kind.name(), rows = dataset.len(), "loaded");
            dataset
        }
        Err(err) => {
            warn!(dataset = kind.name(), error = %err, "source unavailable, continuing without it");
            Dataset::empty(kind)
        }
    }
}

/// Load all four reference tables concurrently and build the location
/// catalog from whatever came back. Fails only when no dataset yielded a
/// single recognizable location.
pub async fn load_reference_data(
    client: &Client,
    source: &DataSource,
) -> Result<ReferenceData, LoadError> {
    let (rainfall, groundwater, soil, aquifer) = tokio::join!(
        load_dataset(client, source, DatasetKind::Rainfall),
        load_dataset(client, source, DatasetKind::Groundwater),
        load_dataset(client, source, DatasetKind::Soil),
        load_dataset(client, source, DatasetKind::Aquifer),
    );

    let locations = LocationCatalog::from_datasets([&rainfall, &groundwater, &soil, &aquifer]);
    if locations.is_empty() {
        return Err(LoadError::NoLocationsFound);
    }
    info!(locations = locations.len(), "reference data ready");

    Ok(ReferenceData {
        rainfall,
        groundwater,
        soil,
        aquifer,
        locations,
    })
}
