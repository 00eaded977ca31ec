use anyhow::Result;
use clap::Parser;
use snake3d::logging::init_file_logging;
use snake3d::modes::HumanMode;
use snake3d::settings::Settings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake3d")]
#[command(version, about = "Snake on a 3D lattice, played in the terminal")]
struct Cli {
    /// JSON settings file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the cubic grid
    #[arg(long)]
    size: Option<i32>,

    /// Milliseconds between moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(size) = self.size {
            settings.game.grid_size = size;
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.game.tick_interval_ms = tick_ms;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let settings = cli.settings()?;
    tracing::info!(?settings, "starting");

    let mut human_mode = HumanMode::new(settings, cli.seed)?;
    human_mode.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_file_before_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake3d.json");
        std::fs::write(&path, r#"{ "game": { "grid_size": 2, "tick_interval_ms": 250 } }"#)
            .unwrap();
        let config = path.to_str().unwrap();

        let cli = Cli::parse_from(["snake3d", "--config", config, "--size", "8"]);
        let settings = cli.settings().unwrap();
        assert_eq!(settings.game.grid_size, 8);
        assert_eq!(settings.game.tick_interval_ms, 250);

        let cli = Cli::parse_from(["snake3d", "--config", config]);
        assert!(cli.settings().is_err());
    }
}
