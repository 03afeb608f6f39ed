//! Terminal Tetris Duel runner (default binary).
//!
//! Solo by default; `--versus` puts two players on one keyboard. Uses crossterm
//! for input and the framebuffer renderer from `tetris_duel::term`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};

use tetris_duel::core::{Match, MatchConfig, MatchEvent, MatchMode};
use tetris_duel::input::{handle_key_event, should_quit, KeyLayout};
use tetris_duel::scores::{ScoreConfig, ScoreReporter};
use tetris_duel::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetris_duel::types::{PlayerSlot, TICK_MS};

/// Falling-block puzzle game with a solo line goal and two-player garbage versus
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Two players on one keyboard (P1: WASD + F, P2: arrows)
    #[arg(short, long)]
    versus: bool,

    /// Seed for reproducible piece order and garbage holes
    #[arg(short, long)]
    seed: Option<u64>,

    /// Lines needed to win; 0 plays until topping out
    #[arg(short = 'g', long)]
    line_goal: Option<u32>,

    /// Name submitted for player 1
    #[arg(long)]
    name: Option<String>,

    /// Name submitted for player 2
    #[arg(long)]
    name2: Option<String>,

    /// Score service host
    #[arg(long)]
    scores_host: Option<String>,

    /// Score service port
    #[arg(long)]
    scores_port: Option<u16>,

    /// Neither submit scores nor show the leaderboard
    #[arg(long)]
    no_scores: bool,

    /// Write logs to this file (also `TETRIS_DUEL_LOG`)
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn match_config(&self) -> MatchConfig {
        let mode = if self.versus {
            MatchMode::Versus
        } else {
            MatchMode::Solo
        };
        let mut config = MatchConfig::from_env(mode);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(goal) = self.line_goal {
            config = config.with_line_goal(Some(goal));
        }
        if let Some(name) = &self.name {
            config = config.with_player_name(PlayerSlot::One, name.clone());
        }
        if let Some(name) = &self.name2 {
            config = config.with_player_name(PlayerSlot::Two, name.clone());
        }
        config
    }

    fn score_config(&self) -> ScoreConfig {
        let mut config = ScoreConfig::from_env();
        if let Some(host) = &self.scores_host {
            config.host = host.clone();
        }
        if let Some(port) = self.scores_port {
            config.port = port;
        }
        config.disabled |= self.no_scores;
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Never log to the terminal while it is in raw mode.
    let log_path = args
        .log
        .clone()
        .or_else(|| std::env::var_os("TETRIS_DUEL_LOG").map(PathBuf::from));
    if let Some(path) = &log_path {
        tetris_duel::logging::init_file(path)?;
    }

    let config = args.match_config();
    let reporter = ScoreReporter::new(&args.score_config())?;

    let mut game = Match::new(config);
    if let Some(reporter) = &reporter {
        game = game.with_score_sink(reporter.clone());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut game);
    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    if let Some(reporter) = reporter {
        reporter.flush(Duration::from_secs(2));
        print_leaderboard(&reporter);
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut Match) -> Result<()> {
    let layout = match game.mode() {
        MatchMode::Solo => KeyLayout::Solo,
        MatchMode::Versus => KeyLayout::Versus,
    };
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();

    game.start();
    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some((slot, action)) = handle_key_event(layout, key) {
                        game.apply_action(slot, action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(clock.elapsed().as_millis() as u64);
        }

        for ev in game.take_events() {
            match ev {
                MatchEvent::Locked { board, event } => debug!(board = board.0, ?event, "locked"),
                MatchEvent::GarbageSent { from, to, lines } => {
                    debug!(from = from.0, to = to.0, lines, "garbage routed")
                }
                MatchEvent::Finished {
                    board,
                    status,
                    score,
                } => info!(board = board.0, status = status.as_str(), score, "game over"),
            }
        }
    }
}

fn print_leaderboard(reporter: &ScoreReporter) {
    match reporter.leaderboard() {
        Ok(rows) if rows.is_empty() => println!("Leaderboard is empty."),
        Ok(rows) => {
            println!("Top {}:", rows.len());
            for (i, row) in rows.iter().enumerate() {
                println!("{:>3}. {:<20} {:>8}", i + 1, row.name, row.score);
            }
        }
        Err(e) => {
            warn!(error = %e, "could not fetch leaderboard");
            eprintln!("Leaderboard unavailable ({}): {}", reporter.client().addr(), e);
        }
    }
}
