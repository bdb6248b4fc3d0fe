use anyhow::Context;
use clap::Parser;
use jogpad::console;
use jogpad::host::{Host, Outcome};
use jogpad::{event_bus, init_logging, CommandSink, Config, SettingsPersistence, WriterSink};
use jogpad::{BUILD_DATE, VERSION};
use jogpad_core::units::get_unit_label;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Jog a CNC machine from the keyboard.
///
/// Reads one command per line on stdin (bound keys, action names such as
/// JOG_FORWARD or "SHUTTLE_ZONE 5", "press x+y-", "jog Z-1", "move X0 Y0",
/// plus connect, disconnect, state, units, program, status, quit) and
/// writes G-code lines to stdout.
///
/// "SHUTTLE_ZONE n" and keys bound to it hold the wheel at zone n, moving
/// every 100 ms, until "SHUTTLE_ZONE 0" centers it.
#[derive(Parser, Debug)]
#[command(name = "jogpad", version)]
struct Cli {
    /// Configuration file (.toml or .json). Defaults to the platform config directory.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Write G-code to this file or device instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let settings = match path {
        Some(path) => SettingsPersistence::load_or_default(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => match SettingsPersistence::load_default() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                return Ok(Config::default());
            }
        },
    };
    Ok(settings.into_config())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    tracing::info!("Jogpad {} (built {})", VERSION, BUILD_DATE);

    let config = load_config(cli.config.as_deref())?;

    let sink: Box<dyn CommandSink> = match &cli.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("opening {}", path.display()))?;
            Box::new(WriterSink::new(file))
        }
        None => Box::new(WriterSink::new(std::io::stdout())),
    };

    let mut host = Host::start(event_bus(), &config, sink)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match console::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("{:#}", e);
                continue;
            }
        };

        match host.execute(command).await? {
            Outcome::Continue => {}
            Outcome::Status { panel, units } => {
                let selected = panel
                    .selected_axis
                    .map(|axis| axis.to_string())
                    .unwrap_or_else(|| "none".to_string());
                eprintln!(
                    "selected axis: {}, panel: {}, units: {}",
                    selected,
                    if panel.enabled { "enabled" } else { "disabled" },
                    get_unit_label(units)
                );
            }
            Outcome::Quit => break,
        }
    }

    host.shutdown().await?;
    Ok(())
}
