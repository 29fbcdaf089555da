use std::process;

use anyhow::{Result, bail};

use affine_gallery::{
    config::GalleryConfig,
    engine::{Engine, Sequence},
    player::Player,
    types::StatusLog,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "affine-gallery play [config.json]";
const TRACE_USAGE: &str = "affine-gallery trace [config.json]";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("play") => {
            let config = load_config(args.next())?;
            play(config)
        }
        Some("trace") => {
            let config = load_config(args.next())?;
            trace(config)
        }
        _ => bail!(
            "Affine Gallery — animated affine transforms in the terminal\n\nUsage:\n  {PLAY_USAGE}\n  {TRACE_USAGE}"
        ),
    }
}

fn load_config(path: Option<String>) -> Result<GalleryConfig> {
    let config = match path {
        Some(path) => GalleryConfig::load_from(&path)?,
        None => GalleryConfig::load(),
    };
    config.validate()?;
    Ok(config)
}

fn play(config: GalleryConfig) -> Result<()> {
    let mut player = Player::new(config);
    player.play()
}

/// Headless mode: run exactly one full animation cycle and print each step's
/// log line. Gives the engine a terminal-free path for scripts and CI.
fn trace(config: GalleryConfig) -> Result<()> {
    let sequence = if config.diagnostic {
        Sequence::Diagnostic
    } else {
        Sequence::Production
    };
    let mut engine = Engine::new(sequence);
    let mut log = StatusLog::new();

    for _ in 0..=engine.cycle_length() {
        engine.advance(&mut log);
    }
    for line in log.entries() {
        println!("{line}");
    }

    eprintln!("Traced {} steps back to identity", log.len());
    Ok(())
}
