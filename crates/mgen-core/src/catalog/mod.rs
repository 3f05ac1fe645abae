//! Template catalog: fetched once from the catalog endpoint, immutable afterwards.
//!
//! A failed fetch leaves the caller with [`Catalog::empty`]; every consumer must
//! work without catalog data.

mod parse;

use crate::config::{HttpConfig, MgenConfig};
use crate::http::{self, FetchError};

/// A selectable template as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    /// Catalog key, lowercase.
    pub id: String,
    pub display_name: String,
    /// Blank template image, used as a preview/icon.
    pub preview_image_url: String,
}

/// Picker entry: what a template chooser shows for one choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOption {
    /// Value passed to `set_selected_template`; empty for "no template".
    pub value: String,
    pub label: String,
    pub icon: String,
}

/// Label of the leading "no template" picker entry.
pub const NO_TEMPLATE_LABEL: &str = "Choose meme";

/// Error loading the catalog. Never fatal; see [`load_templates_or_empty`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("catalog response is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Templates in catalog fetch order, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    templates: Vec<TemplateDescriptor>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a catalog response body (JSON array of `{id, name, blank}`).
    pub fn from_json(body: &[u8]) -> Result<Self, CatalogError> {
        Ok(Self {
            templates: parse::parse_catalog(body)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates.iter()
    }

    /// Case-insensitive lookup by id.
    pub fn get(&self, id: &str) -> Option<&TemplateDescriptor> {
        let id = id.trim().to_lowercase();
        self.templates.iter().find(|t| t.id == id)
    }

    /// Picker entries: a leading "no template" entry followed by every template.
    pub fn options(&self, cfg: &MgenConfig) -> Vec<TemplateOption> {
        std::iter::once(TemplateOption {
            value: String::new(),
            label: NO_TEMPLATE_LABEL.to_string(),
            icon: cfg.placeholder_image_url.clone(),
        })
        .chain(self.templates.iter().map(|t| TemplateOption {
            value: t.id.clone(),
            label: t.display_name.clone(),
            icon: t.preview_image_url.clone(),
        }))
        .collect()
    }
}

impl From<Vec<TemplateDescriptor>> for Catalog {
    fn from(templates: Vec<TemplateDescriptor>) -> Self {
        Self { templates }
    }
}

/// Fetches and parses the catalog in the current thread (single attempt).
pub fn fetch_catalog(endpoint: &str, opts: &HttpConfig) -> Result<Catalog, CatalogError> {
    let body = http::get_bytes(endpoint, opts)?;
    let catalog = Catalog::from_json(&body)?;
    tracing::info!("loaded {} templates from {}", catalog.len(), endpoint);
    Ok(catalog)
}

/// Loads the catalog from `cfg.catalog_endpoint` on the blocking pool.
pub async fn load_templates(cfg: &MgenConfig) -> Result<Catalog, CatalogError> {
    let endpoint = cfg.catalog_endpoint.clone();
    let opts = cfg.http;
    tokio::task::spawn_blocking(move || fetch_catalog(&endpoint, &opts)).await?
}

/// Loads the catalog, logging a failure and returning an empty catalog instead.
pub async fn load_templates_or_empty(cfg: &MgenConfig) -> Catalog {
    match load_templates(cfg).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!("{}; continuing with an empty catalog", e);
            Catalog::empty()
        }
    }
}
