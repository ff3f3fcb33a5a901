mod config;
mod controls;
mod headless;
#[cfg(feature = "gui")]
mod ui;

use anyhow::{Context, Result, bail};
use config::PanelDefaults;
use controls::ControlPanel;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: spectrogram-controls [--config <path>] [--gui] [--help]

Reads control events as JSON lines on stdin and writes notifications as JSON
lines on stdout. Logging goes to stderr and honours RUST_LOG.";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    gui: bool,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--gui" => parsed.gui = true,
            "-h" | "--help" => parsed.help = true,
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let defaults = match &args.config {
        Some(path) => PanelDefaults::load(path)?,
        None => PanelDefaults::load_or_default(),
    };

    if args.gui {
        return run_gui(defaults);
    }

    let mut panel = ControlPanel::new(defaults);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    headless::run(&mut panel, stdin.lock(), stdout.lock())
}

#[cfg(feature = "gui")]
fn run_gui(defaults: PanelDefaults) -> Result<()> {
    ui::run(defaults).context("running the control panel window")
}

#[cfg(not(feature = "gui"))]
fn run_gui(_defaults: PanelDefaults) -> Result<()> {
    bail!("built without the `gui` feature; rebuild with --features gui")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_known_flags() {
        let parsed = args(&["--config", "panel.json", "--gui"]).expect("valid args");
        assert_eq!(parsed.config, Some(PathBuf::from("panel.json")));
        assert!(parsed.gui);
        assert!(!parsed.help);
    }

    #[test]
    fn rejects_unknown_and_incomplete_arguments() {
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["--config"]).is_err());
    }
}
