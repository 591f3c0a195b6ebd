//! Memory Match - CLI
//!
//! Memory card game with TUI and line modes, plus a headless bot simulator.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use memory_match::{
    commands::{BotKind, SimulationConfig, run_simple, run_simulation},
    config::GameConfig,
    core::Deck,
    decks,
    interactive::{App, run_tui},
    output::print_simulation_result,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "memory_match",
    about = "Memory-matching card game for the terminal",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Pairs per round (overrides MEMORY_PAIRS)
    #[arg(short, long, global = true)]
    pairs: Option<usize>,

    /// Milliseconds an unmatched card stays face up (overrides MEMORY_HIDE_DELAY_MS)
    #[arg(long, global = true)]
    hide_delay_ms: Option<u64>,

    /// Deck: 'symbols' (default, 40 emoji), 'numbers', or path to file
    #[arg(short, long, global = true, default_value = "symbols")]
    deck: String,

    /// Fixed shuffle seed (overrides MEMORY_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Show hidden faces dimmed
    #[arg(long, global = true)]
    cheat: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based game without TUI)
    Simple,

    /// Let a bot play rounds on virtual time and report its performance
    Simulate {
        /// Number of rounds to play
        #[arg(short = 'n', long, default_value = "20")]
        rounds: usize,

        /// Bot: memory (default) or random
        #[arg(short, long, default_value = "memory")]
        bot: String,

        /// Virtual milliseconds between two clicks
        #[arg(long, default_value = "700")]
        click_interval_ms: u64,
    },
}

impl Cli {
    /// Environment configuration with command-line overrides
    fn game_config(&self) -> GameConfig {
        self.apply_overrides(GameConfig::from_env())
    }

    /// Flags that were given win over `config`
    fn apply_overrides(&self, mut config: GameConfig) -> GameConfig {
        if let Some(pairs) = self.pairs {
            config.pair_count = pairs;
        }
        if let Some(millis) = self.hide_delay_ms {
            config.hide_delay = Duration::from_millis(millis);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.cheat {
            config.cheat = true;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging()?;

    let config = cli.game_config();
    let deck = decks::select(&cli.deck, config.pair_count)
        .with_context(|| format!("failed to load deck '{}'", cli.deck))?;
    config.validate(&deck)?;

    tracing::info!(
        pairs = config.pair_count,
        deck = %cli.deck,
        faces = deck.len(),
        "starting"
    );

    // Default to Play mode if no command given
    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => run_play_command(config, deck),
        Commands::Simple => run_simple(config, deck),
        Commands::Simulate {
            rounds,
            bot,
            click_interval_ms,
        } => {
            let sim = SimulationConfig {
                rounds,
                bot: BotKind::from_name(&bot),
                click_interval: Duration::from_millis(click_interval_ms),
            };
            println!(
                "Simulating {rounds} rounds of {} pairs with the {} bot...",
                config.pair_count,
                sim.bot.name()
            );
            let result = run_simulation(&config, &deck, &sim)?;
            print_simulation_result(&result);
            Ok(())
        }
    }
}

fn run_play_command(config: GameConfig, deck: Deck) -> Result<()> {
    let app = App::new(config, deck)?;
    run_tui(app)
}

/// Log to a file; the terminal belongs to the game
fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "memory_match.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = log_filter(std::env::var("RUST_LOG").ok());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// `RUST_LOG` directives, or `info` when unset
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "memory_match").map_or_else(
        || std::env::temp_dir().join("memory_match").join("logs"),
        |dirs| dirs.cache_dir().join("logs"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    fn env(vars: &[(&str, &str)]) -> GameConfig {
        GameConfig::from_lookup(|key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        })
    }

    #[test]
    fn flags_override_environment() {
        let config = env(&[
            ("MEMORY_PAIRS", "4"),
            ("MEMORY_HIDE_DELAY_MS", "900"),
            ("MEMORY_SEED", "1"),
        ]);
        let cli = Cli::try_parse_from([
            "memory_match",
            "--pairs",
            "8",
            "--seed",
            "99",
            "--cheat",
            "simple",
        ])
        .unwrap();

        let config = cli.apply_overrides(config);
        assert_eq!(config.pair_count, 8);
        assert_eq!(config.seed, Some(99));
        assert!(config.cheat);
        // No flag given, environment value stays
        assert_eq!(config.hide_delay, Duration::from_millis(900));
        assert!(matches!(cli.command, Some(Commands::Simple)));
    }

    #[test]
    fn no_flags_keep_environment() {
        let config = env(&[("MEMORY_PAIRS", "6"), ("MEMORY_CHEAT", "yes")]);
        let cli = Cli::try_parse_from(["memory_match"]).unwrap();

        let merged = cli.apply_overrides(config.clone());
        assert_eq!(merged, config);
        assert_eq!(cli.deck, "symbols");
        assert!(cli.command.is_none());
    }

    #[test]
    fn simulate_arguments_parse() {
        let cli = Cli::try_parse_from([
            "memory_match",
            "simulate",
            "--rounds",
            "3",
            "--bot",
            "random",
            "--pairs",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.pairs, Some(2));
        let Some(Commands::Simulate {
            rounds,
            bot,
            click_interval_ms,
        }) = cli.command
        else {
            panic!("expected the simulate subcommand");
        };
        assert_eq!(rounds, 3);
        assert_eq!(bot, "random");
        assert_eq!(click_interval_ms, 700);
    }

    #[test]
    fn log_filter_honours_rust_log() {
        assert_eq!(
            log_filter(Some("debug".to_string())).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("memory_match=trace".to_string())).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }
}
