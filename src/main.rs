use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use connect_four::ai::{Agent, RandomAgent};
use connect_four::arena::play_series;
use connect_four::config::AppConfig;
use connect_four::game::{find_winner, Board, Player};

/// Connect Four engine with a minimax opponent.
#[derive(Parser)]
#[command(name = "connect-four", about = "Connect Four engine with a minimax opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml", global = true)]
    config: PathBuf,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Suggest a column for the side to move after replaying `--moves`
    Suggest {
        /// Columns played so far from an empty board, Red first (e.g. 3,3,4)
        #[arg(long, value_delimiter = ',')]
        moves: Vec<usize>,

        /// Override search depth
        #[arg(long)]
        depth: Option<usize>,

        /// Print the full search report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play the minimax engine against a random opponent
    Arena {
        /// Override number of games
        #[arg(long)]
        games: Option<usize>,

        /// Override search depth
        #[arg(long)]
        depth: Option<usize>,

        /// Seed for the random opponent
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the default configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.log_level);

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Command::Suggest { moves, depth, json } => {
            if let Some(depth) = depth {
                app_config.engine.depth = depth;
            }
            app_config.validate()?;
            suggest(&app_config, &moves, json)
        }
        Command::Arena { games, depth, seed } => {
            if let Some(games) = games {
                app_config.arena.games = games;
            }
            if let Some(depth) = depth {
                app_config.engine.depth = depth;
            }
            if seed.is_some() {
                app_config.arena.seed = seed;
            }
            app_config.validate()?;
            arena(&app_config)
        }
        Command::Config => {
            print!("{}", AppConfig::default_toml());
            Ok(())
        }
    }
}

fn suggest(config: &AppConfig, moves: &[usize], json: bool) -> Result<()> {
    let board = Board::from_moves(moves).context("replaying --moves")?;
    if let Some((winner, _)) = find_winner(&board) {
        bail!("position is already won by {}", winner.name());
    }
    let player = if moves.len() % 2 == 0 {
        Player::Red
    } else {
        Player::Yellow
    };

    let mut agent = config.engine.agent();
    let report = agent.analyze(&board, player);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{board}");
    println!();
    for (col, score) in report.scores.iter().enumerate() {
        match score {
            Some(score) => println!("  column {col}: {score:>7}"),
            None => println!("  column {col}:    full"),
        }
    }
    match report.column {
        Some(col) => println!(
            "{} should play column {col} (depth {}, {} nodes)",
            player.name(),
            report.depth,
            report.stats.nodes
        ),
        None => println!("No legal move: the board is full"),
    }
    Ok(())
}

fn arena(config: &AppConfig) -> Result<()> {
    let mut engine = config.engine.agent();
    let mut random = match config.arena.seed {
        Some(seed) => RandomAgent::with_seed(seed),
        None => RandomAgent::new(),
    };

    info!(
        games = config.arena.games,
        depth = config.engine.depth,
        "starting arena"
    );
    let tally = play_series(&mut engine, &mut random, config.arena.games)?;

    println!("-------------------------------------------");
    println!(
        "{} (depth {}) vs {}: {} games",
        engine.name(),
        config.engine.depth,
        random.name(),
        tally.total_games()
    );
    println!(
        "  wins {}  losses {}  draws {}  ({:.1}% win rate)",
        tally.wins,
        tally.losses,
        tally.draws,
        tally.win_rate() * 100.0
    );
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
