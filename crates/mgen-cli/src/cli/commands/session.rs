//! `mgen session` – line-oriented interactive editor.
//!
//! Each stdin line is one input event. The catalog loads in the background; the
//! session is usable before it arrives. Downloads run as background tasks on a
//! snapshot of the URL at the time `download` was entered. Input is read as raw
//! bytes and decoded lossily, so a line that is not valid UTF-8 is just another
//! (probably unknown) command.

use super::templates::print_options;
use anyhow::Result;
use mgen_core::catalog::{self, Catalog, CatalogError};
use mgen_core::config::MgenConfig;
use mgen_core::download::{DirectoryTarget, DownloadAgent, DownloadError, SavedImage};
use mgen_core::selection::SelectionController;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

const HELP: &str = "\
commands:
  template <id|url>   select a template (no argument clears it)
  top <text>          set the top line
  bottom <text>       set the bottom line
  clear               clear template and both lines
  show                print the current selection and URL
  templates           list loaded templates
  download            save the current image
  help                show this text
  quit                leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Template(String),
    Top(String),
    Bottom(String),
    Clear,
    Show,
    Templates,
    Download,
    Help,
    Quit,
    Nothing,
}

/// Parses one input line. The argument is everything after the first space, verbatim.
pub fn parse_session_line(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim_start();
    let (word, arg) = match line.split_once(' ') {
        Some((w, a)) => (w, a),
        None => (line.trim_end(), ""),
    };
    let cmd = match word.to_ascii_lowercase().as_str() {
        "" => SessionCommand::Nothing,
        "template" | "t" => SessionCommand::Template(arg.trim().to_string()),
        "top" => SessionCommand::Top(arg.to_string()),
        "bottom" => SessionCommand::Bottom(arg.to_string()),
        "clear" => SessionCommand::Clear,
        "show" => SessionCommand::Show,
        "templates" => SessionCommand::Templates,
        "download" | "dl" => SessionCommand::Download,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("unknown command: {} (try `help`)", other)),
    };
    Ok(cmd)
}

fn print_state(controller: &SelectionController) {
    let state = controller.state();
    let template = match (controller.selected_template(), &state.selected_template_id) {
        (Some(t), _) => format!("{} ({})", t.id, t.display_name),
        (None, Some(raw)) => raw.clone(),
        (None, None) => "(none)".to_string(),
    };
    println!("template: {}", template);
    println!("top:      {:?}", state.top_text);
    println!("bottom:   {:?}", state.bottom_text);
    println!("url:      {}", controller.output_url());
}

fn print_templates(controller: &SelectionController) {
    if controller.catalog().is_empty() {
        println!("(catalog not loaded)");
    }
    print_options(controller.catalog(), controller.config());
}

/// One raw input line as text: invalid UTF-8 becomes U+FFFD, the line ending is dropped.
fn decode_line(raw: &[u8]) -> String {
    let line = String::from_utf8_lossy(raw);
    line.trim_end_matches('\n').trim_end_matches('\r').to_string()
}

fn report_download(result: Result<Result<SavedImage, DownloadError>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(saved)) => println!("saved {} ({} bytes)", saved.path.display(), saved.size),
        Ok(Err(e)) => println!("download failed: {}", e),
        Err(e) => println!("download failed: {}", e),
    }
}

/// Applies one parsed command. Returns false when the session should end.
fn apply_command(
    controller: &mut SelectionController,
    agent: &DownloadAgent,
    downloads: &mut JoinSet<Result<SavedImage, DownloadError>>,
    cmd: SessionCommand,
) -> bool {
    match cmd {
        SessionCommand::Template(id) => println!("{}", controller.set_selected_template(id)),
        SessionCommand::Top(text) => println!("{}", controller.set_top_text(text)),
        SessionCommand::Bottom(text) => println!("{}", controller.set_bottom_text(text)),
        SessionCommand::Clear => {
            controller.clear_selected_template();
            controller.set_top_text("");
            println!("{}", controller.set_bottom_text(""));
        }
        SessionCommand::Show => print_state(controller),
        SessionCommand::Templates => print_templates(controller),
        SessionCommand::Download => {
            let agent = agent.clone();
            let url = controller.snapshot_url();
            println!("downloading {}", url);
            downloads.spawn(async move { agent.download(url).await });
        }
        SessionCommand::Help => println!("{}", HELP),
        SessionCommand::Quit => return false,
        SessionCommand::Nothing => {}
    }
    true
}

/// Runs the event loop until `quit` or end of input, then waits for in-flight
/// downloads. With `catalog_load` set, the catalog is attached when it arrives.
async fn drive<R, F>(
    controller: &mut SelectionController,
    agent: &DownloadAgent,
    mut input: R,
    catalog_load: Option<F>,
) where
    R: AsyncBufRead + Unpin,
    F: Future<Output = Result<Catalog, CatalogError>>,
{
    let mut downloads: JoinSet<Result<SavedImage, DownloadError>> = JoinSet::new();

    let mut catalog_pending = catalog_load.is_some();
    let catalog_load = async move {
        match catalog_load {
            Some(load) => load.await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(catalog_load);

    // Partial reads stay here across select! iterations; cleared once a line is handled.
    let mut raw = Vec::new();

    loop {
        tokio::select! {
            loaded = &mut catalog_load, if catalog_pending => {
                catalog_pending = false;
                match loaded {
                    Ok(catalog) => {
                        println!("loaded {} templates", catalog.len());
                        controller.attach_catalog(catalog);
                    }
                    Err(e) => {
                        tracing::warn!("{}; continuing with an empty catalog", e);
                        println!("could not load templates: {}", e);
                    }
                }
            }
            Some(done) = downloads.join_next(), if !downloads.is_empty() => {
                report_download(done);
            }
            read = input.read_until(b'\n', &mut raw) => {
                match read {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = decode_line(&raw);
                        raw.clear();
                        match parse_session_line(&line) {
                            Ok(cmd) => {
                                if !apply_command(controller, agent, &mut downloads, cmd) {
                                    break;
                                }
                            }
                            Err(msg) => println!("{}", msg),
                        }
                    }
                    Err(e) => {
                        tracing::warn!("reading session input failed: {}", e);
                        println!("input error: {}", e);
                        break;
                    }
                }
            }
        }
    }

    // Let in-flight downloads finish against the URLs they captured.
    while let Some(done) = downloads.join_next().await {
        report_download(done);
    }
}

pub async fn run_session(cfg: &MgenConfig, dir: &Path, overwrite: bool, offline: bool) -> Result<()> {
    let mut controller = SelectionController::new(cfg.clone(), Catalog::empty());
    let agent = DownloadAgent::new(cfg, Arc::new(DirectoryTarget::new(dir, overwrite)));
    let catalog_load = (!offline).then(|| catalog::load_templates(cfg));

    println!("{}", controller.output_url());
    drive(
        &mut controller,
        &agent,
        BufReader::new(tokio::io::stdin()),
        catalog_load,
    )
    .await;
    Ok(())
}
