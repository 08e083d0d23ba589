use anyhow::{Context, Result};
use cclean::config::{Cli, Config, InputSource};
use cclean::render::EventRenderer;
use cclean::stream::StreamController;
use cclean::{logging, terminal};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tracing::info;

fn main() -> Result<()> {
    let config = Config::load(Cli::parse())?;
    config.validate()?;
    logging::init()?;

    info!(source = %config.input, style = ?config.style, "stream started");
    let renderer = EventRenderer::new(config.style, config.render, config.color);
    let mut controller = StreamController::new(renderer, terminal::sink());
    let outcome = match &config.input {
        InputSource::Stdin => controller.run(io::stdin().lock()),
        InputSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("Error opening file: {}", path.display()))?;
            controller.run(BufReader::new(file))
        }
    };

    match outcome {
        Ok(_) => Ok(()),
        Err(err) if err.is_broken_pipe() => Ok(()),
        Err(err) => Err(err.into()),
    }
}
