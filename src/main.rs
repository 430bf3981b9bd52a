#![cfg(not(tarpaulin_include))]

use clap::Parser;
use dashboard::app;
use dashboard::config::Config;
use env_logger::Env;
use log::error;
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    let stdout = io::stdout();

    if let Err(e) = app::run(&config, &mut stdout.lock()) {
        error!("{}", e);
        return Err(e);
    }

    Ok(())
}
