use anyhow::{Context, Result};
use boxtool::input::ToolId;
use boxtool::script::{GestureScript, ReplayReport};
use boxtool::{Config, Editor};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BOXTOOL_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "boxtool")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Replay drag-to-create gestures on a canvas document"
)]
struct Cli {
    /// Gesture script (TOML) to replay
    #[arg(long, short = 's', value_name = "FILE")]
    script: PathBuf,

    /// Configuration file (defaults to ~/.config/boxtool/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Tool to activate before replaying (overrides the script's `tool`)
    #[arg(long, short = 't', value_name = "TOOL")]
    tool: Option<ToolId>,

    /// Pretty-print the resulting document
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut script = GestureScript::load(&cli.script)?;
    if cli.tool.is_some() {
        script.tool = cli.tool;
    }
    log::info!(
        "Replaying {} event(s) from {}",
        script.events.len(),
        cli.script.display()
    );

    let mut editor = Editor::new(&config).context("Invalid keybindings")?;
    script.run(&mut editor);

    let document = editor.document().borrow();
    let report = ReplayReport::new(&editor, &document);
    let output = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");

    Ok(())
}
