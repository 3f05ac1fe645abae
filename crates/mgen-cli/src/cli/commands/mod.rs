//! CLI command handlers. Each command is in its own file.

mod download;
mod session;
mod templates;
mod url;

pub use download::run_download;
pub use session::run_session;
pub use templates::run_templates;
pub use url::run_url;

use mgen_core::catalog::{self, Catalog};
use mgen_core::config::MgenConfig;

/// Catalog for one-shot commands: empty when offline or when the fetch fails.
pub(crate) async fn catalog_for(cfg: &MgenConfig, offline: bool) -> Catalog {
    if offline {
        tracing::debug!("offline: skipping catalog fetch");
        return Catalog::empty();
    }
    catalog::load_templates_or_empty(cfg).await
}
