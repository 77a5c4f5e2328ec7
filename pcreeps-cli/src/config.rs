use clap::{Parser, Subcommand};
use log::LevelFilter;
use pcreeps_core::config::{DEFAULT_CAPACITY, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use pcreeps_core::{Config as SessionConfig, LoadingPolicy};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "pcreeps", about = "Replays recorded room history captures")]
pub struct Config {
    #[arg(default_value = "info", long = "log-level", global = true)]
    pub log_level: LevelFilter,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Feed a capture through a session and write every displayed frame
    Play(PlayArgs),
    /// Write a synthetic capture of a marker moving across plain terrain
    Demo(DemoArgs),
}

#[derive(Debug, clap::Args)]
pub struct PlayArgs {
    #[arg(long = "capture")]
    pub capture: PathBuf,
    #[arg(long = "out-dir")]
    pub out_dir: PathBuf,
    #[arg(default_value = "5", long = "scale")]
    pub scale: NonZeroUsize,
    #[arg(default_value = "1000", long = "tick-ms")]
    pub tick_ms: u64,
    /// Wait for an explicit end-of-transfer message instead of the slot threshold
    #[arg(long = "end-of-transfer")]
    pub end_of_transfer: bool,
    /// Start playback even if the transfer never finished loading
    #[arg(long = "autoplay")]
    pub autoplay: bool,
}

impl PlayArgs {
    pub fn session_config(&self) -> SessionConfig {
        let loading_policy = if self.end_of_transfer {
            LoadingPolicy::EndOfTransfer
        } else {
            LoadingPolicy::default()
        };

        SessionConfig {
            scale: self.scale.get(),
            tick: self.tick(),
            loading_policy,
            ..SessionConfig::default()
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Debug, clap::Args)]
pub struct DemoArgs {
    #[arg(long = "output")]
    pub output: PathBuf,
    #[arg(default_value_t = DEFAULT_CAPACITY, long = "frames")]
    pub frames: usize,
    #[arg(default_value_t = DEFAULT_WIDTH, long = "width")]
    pub width: usize,
    #[arg(default_value_t = DEFAULT_HEIGHT, long = "height")]
    pub height: usize,
}
