use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use quadris_engine::{EngineConfig, PieceSeed};

use crate::{command::play::app::PlayApp, tui::Runtime, util};

mod app;
mod screens;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Engine configuration file (JSON); missing fields take their defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// Piece sequence seed (32 hexadecimal digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Gravity interval in milliseconds, overriding the configuration file
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    gravity_ms: Option<u64>,
    /// Frames per second
    #[clap(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            config: None,
            seed: None,
            gravity_ms: None,
            fps: 60,
        }
    }
}

impl PlayArg {
    /// Reads the configuration file, then applies command-line overrides.
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("engine config", path)?,
            None => EngineConfig::default(),
        };
        if let Some(millis) = self.gravity_ms {
            config.gravity_interval = Duration::from_millis(millis);
        }
        config
            .validate()
            .context("Invalid engine configuration")?;
        Ok(config)
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = arg.engine_config()?;
    let mut app = PlayApp::new(config, arg.seed, arg.fps);

    Runtime::new().run(&mut app)?;

    app.into_result().context("Failed to start a session")?;
    Ok(())
}
