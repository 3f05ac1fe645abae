//! `mgen download` – synthesize the URL and save the image.

use anyhow::{Context, Result};
use mgen_core::config::MgenConfig;
use mgen_core::download::{DirectoryTarget, DownloadAgent};
use mgen_core::selection::SelectionController;
use std::path::Path;
use std::sync::Arc;

use super::catalog_for;
use crate::cli::SelectionArgs;

pub async fn run_download(
    cfg: &MgenConfig,
    selection: &SelectionArgs,
    dir: &Path,
    overwrite: bool,
    offline: bool,
) -> Result<()> {
    let catalog = catalog_for(cfg, offline).await;
    let mut controller = SelectionController::new(cfg.clone(), catalog);
    selection.apply(&mut controller);

    let agent = DownloadAgent::new(cfg, Arc::new(DirectoryTarget::new(dir, overwrite)));
    let url = controller.snapshot_url();
    let saved = agent
        .download(url.clone())
        .await
        .with_context(|| format!("downloading {}", url))?;
    println!("Saved {} ({} bytes)", saved.path.display(), saved.size);
    Ok(())
}
