//! Score service binary.
//!
//! Serves `GET/POST /scores` (and `/api/scores`) over a JSON file store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tetris_duel::scores::{ScoreConfig, ScoreServer};

/// Leaderboard HTTP service for tetris-duel
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind (default `TETRIS_SCORES_HOST` or 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (default `TETRIS_SCORES_PORT` or 3000)
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON file holding the scores (default `TETRIS_SCORES_DB` or scores.json)
    #[arg(short, long)]
    db: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tetris_duel::logging::init_stderr();

    let mut config = ScoreConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(db) = args.db {
        config.db_path = db;
    }

    let mut server = ScoreServer::bind(&config)
        .with_context(|| format!("failed to start score server on {}", config.addr()))?;
    server.run();
    Ok(())
}
