mod capture;
mod config;
mod demo;
mod player;

use crate::config::{Command, Config};
use crate::player::Player;
use clap::Parser;
use log::info;
use pcreeps_core::Result;

fn main() -> Result<()> {
    let config = Config::parse();
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    match config.command {
        Command::Play(args) => {
            let mut player = Player::create(args)?;
            let written = player.run()?;
            info!("Wrote {written} frames");
        }
        Command::Demo(args) => demo::write_demo(&args)?,
    }

    Ok(())
}
