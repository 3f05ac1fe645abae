//! `mgen url` – print the synthesized image URL.

use anyhow::Result;
use mgen_core::config::MgenConfig;
use mgen_core::selection::SelectionController;

use super::catalog_for;
use crate::cli::SelectionArgs;

pub async fn run_url(cfg: &MgenConfig, selection: &SelectionArgs, offline: bool) -> Result<()> {
    let catalog = catalog_for(cfg, offline).await;
    let mut controller = SelectionController::new(cfg.clone(), catalog);
    selection.apply(&mut controller);
    println!("{}", controller.output_url());
    Ok(())
}
