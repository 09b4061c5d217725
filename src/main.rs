//! Wordle Arena - CLI
//!
//! Play word or equation guessing games in the terminal, watch the solver
//! play, benchmark it, and browse recorded games.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use wordle_arena::{
    commands::{PlayOptions, run_auto, run_benchmark, run_history, run_play},
    config::ArenaConfig,
    core::Mode,
    game::GameService,
    logging,
    output::{write_auto_summary, write_benchmark_result},
};

#[derive(Parser)]
#[command(
    name = "wordle_arena",
    about = "Word and equation guessing games with a candidate-pruning solver",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Puzzle mode: word (default) or equation
    #[arg(short, long, global = true)]
    mode: Option<Mode>,

    /// Every guess must honor the previous turn's exact and present tokens
    #[arg(long, global = true)]
    strict: bool,

    /// Player name used for game records
    #[arg(short, long, global = true, default_value = "guest")]
    user: String,

    /// Seed for reproducible answers and solver choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Word list: one word per line, or a JSON array in a .json file
    #[arg(short = 'w', long, global = true)]
    word_list: Option<PathBuf>,

    /// Solver strategy: partition (default), entropy, minimax
    #[arg(short, long, global = true)]
    strategy: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive game (default)
    Play,

    /// Let the solver play full games through the game service
    Auto {
        /// Number of games
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Benchmark solver performance on freshly drawn pools
    Benchmark {
        /// Number of games
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,
    },

    /// Show the recorded games of --user, newest first
    History,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration
    fn apply_to(&self, mut config: ArenaConfig) -> ArenaConfig {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(path) = &self.word_list {
            config.word_list = Some(path.clone());
        }
        if let Some(strategy) = &self.strategy {
            config.strategy.clone_from(strategy);
        }
        config
    }

    fn play_options(&self) -> PlayOptions {
        PlayOptions {
            user: self.user.clone(),
            mode: self.mode.unwrap_or(Mode::Word),
            strict: self.strict,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ArenaConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let config = cli.apply_to(config);
    logging::init(&config.log_filter);

    let options = cli.play_options();

    // Default to Play mode if no command given
    match cli.command.as_ref().unwrap_or(&Commands::Play) {
        Commands::Play => {
            let service = GameService::from_config(&config);
            run_play(&service, &options, io::stdin().lock(), &mut io::stdout())?;
        }
        Commands::Auto { count } => {
            let service = GameService::from_config(&config);
            let summary = run_auto(&service, &options, *count, &mut io::stdout())?;
            write_auto_summary(&mut io::stdout(), &summary)?;
        }
        Commands::Benchmark { count } => {
            println!(
                "Running benchmark on {count} {} games with the {} strategy...",
                options.mode,
                config.session_settings().strategy.name()
            );
            let result = run_benchmark(
                &config.pool_source(),
                options.mode,
                &config.session_settings(),
                *count,
                config.seed,
                true,
            )?;
            write_benchmark_result(&mut io::stdout(), &result)?;
        }
        Commands::History => {
            let service = GameService::from_config(&config);
            run_history(&service, &options.user, &mut io::stdout())?;
        }
    }

    Ok(())
}
