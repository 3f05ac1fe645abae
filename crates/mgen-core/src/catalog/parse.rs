//! Catalog JSON structures.

use serde::Deserialize;

use super::TemplateDescriptor;

/// One entry of the catalog array. Fields beyond these are ignored.
#[derive(Debug, Deserialize)]
struct RawTemplate {
    id: String,
    name: String,
    blank: String,
}

/// Parse the catalog response body into descriptors in fetch order.
///
/// Ids are lowercased; entries whose id is empty or repeats an earlier id are dropped.
pub(crate) fn parse_catalog(body: &[u8]) -> Result<Vec<TemplateDescriptor>, serde_json::Error> {
    let raw: Vec<RawTemplate> = serde_json::from_slice(body)?;
    let mut out: Vec<TemplateDescriptor> = Vec::with_capacity(raw.len());
    for entry in raw {
        let id = entry.id.trim().to_lowercase();
        if id.is_empty() {
            tracing::debug!("skipping catalog entry with empty id ({})", entry.name);
            continue;
        }
        if out.iter().any(|t| t.id == id) {
            tracing::debug!("skipping duplicate catalog id {}", id);
            continue;
        }
        out.push(TemplateDescriptor {
            id,
            display_name: entry.name,
            preview_image_url: entry.blank,
        });
    }
    Ok(out)
}
