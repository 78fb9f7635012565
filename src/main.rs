use std::path::PathBuf;

use clap::Parser;
use sketchpad::config::EngineConfig;
use sketchpad::engine::EngineCore;
use sketchpad::replay::{self, ReplayError};

#[derive(Parser, Debug)]
#[command(name = "sketchpad", about = "Replay a scripted pointer session and print the resulting document")]
struct Cli {
    /// JSON array of input events.
    script: PathBuf,

    /// Starting document: a JSON array of shapes. Starts empty when omitted.
    #[arg(long, env = "SKETCHPAD_DOCUMENT")]
    document: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let mut core = EngineCore::with_config(EngineConfig::from_env());
    if let Some(path) = &cli.document {
        let doc = replay::load_document(path)?;
        tracing::info!(shapes = doc.len(), path = %path.display(), "document loaded");
        core.load_snapshot(doc.into());
    }

    let events = replay::load_script(&cli.script)?;
    let actions = replay::replay(&mut core, &events);
    tracing::info!(events = events.len(), actions = actions.len(), shapes = core.doc.len(), "replay finished");

    let output = if cli.pretty {
        serde_json::to_string_pretty(&core.doc)?
    } else {
        serde_json::to_string(&core.doc)?
    };
    println!("{output}");
    Ok(())
}
