//! Concurrent, all-or-nothing loading of the story's geometry documents.
//!
//! Every source is fetched in parallel and every document parsed before any
//! layer is populated, so a viewer never sees partial data. Any failure
//! abandons the whole load: the error is logged, the registry stays empty,
//! and no retry is attempted.

use crate::data::geojson::GeoJson;
use crate::layers::registry::LayerRegistry;
use crate::Result;
use async_trait::async_trait;
use futures::future::try_join_all;
use log::{debug, error, warn};
use std::collections::HashSet;
use std::path::PathBuf;

/// A fetchable geometry document for one layer
#[async_trait]
pub trait SlideSource: Send + Sync {
    /// Fetches the raw document text
    async fn fetch(&self) -> Result<String>;

    /// Human-readable source identity for logs
    fn describe(&self) -> String;
}

/// A GeoJSON document on the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SlideSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A GeoJSON document fetched over HTTP
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl SlideSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Fetches every source concurrently and populates the named registry
/// layers once all of them have resolved and parsed.
///
/// On any fetch or parse failure the error is logged, nothing is populated,
/// and the error is returned; the registry is left exactly as it was.
pub async fn load_all(
    registry: &mut LayerRegistry,
    sources: Vec<(String, Box<dyn SlideSource>)>,
) -> Result<()> {
    let fetches = sources.iter().map(|(name, source)| {
        let name = name.clone();
        let label = source.describe();
        async move {
            debug!("fetching layer '{}' from {}", name, label);
            let text = source.fetch().await?;
            let doc = GeoJson::from_str(&text)?;
            Ok::<(String, GeoJson), crate::Error>((name, doc))
        }
    });

    // Parse everything before populating anything.
    let documents = match try_join_all(fetches).await {
        Ok(documents) => documents,
        Err(e) => {
            error!("data load error: {}", e);
            return Err(e);
        }
    };

    // Validate every target before touching the registry: a populate error
    // mid-loop would leave earlier layers filled, and partial data is never
    // shown.
    let mut seen = HashSet::new();
    for (name, _) in &documents {
        if !seen.insert(name.as_str()) {
            let e = crate::Error::Layer(format!("duplicate source for layer '{}'", name));
            error!("data load error: {}", e);
            return Err(e);
        }
        if let Some(layer) = registry.get(name) {
            if layer.is_populated() {
                let e = crate::Error::Layer(format!("layer '{}' is already populated", name));
                error!("data load error: {}", e);
                return Err(e);
            }
        }
    }

    for (name, doc) in documents {
        match registry.get_mut(&name) {
            Some(layer) => layer.populate(doc)?,
            None => warn!("loaded document for unregistered layer '{}'", name),
        }
    }

    Ok(())
}
