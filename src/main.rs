mod app;
mod cli;

use clap::Parser;
use eyre::{Result, WrapErr, eyre};
use flashcards_app::config::Config;
use flashcards_app::export::json::import_catalog;
use flashcards_app::models::{Clock, QueueOrder, StudyStreak, SystemClock, select_cards};
use flashcards_app::{ReviewStore, SqliteStore, StudyReport, StudySession};
use log::info;
use std::io;

use cli::{Cli, Commands};

fn setup_logging(cli: &Cli, config: &Config) {
    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("warn")
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config =
        Config::load(cli.config.as_deref()).wrap_err("Failed to load configuration")?;
    if let Some(database) = &cli.database {
        config.database_path = database.clone();
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog_path = catalog.clone();
    }
    setup_logging(&cli, &config);

    match cli.command {
        Commands::Study { mode, filter, seed } => {
            let mode = mode.into_mode(filter).map_err(|e| eyre!(e))?;
            let deck =
                import_catalog(&config.catalog_path).wrap_err("Failed to load card catalog")?;
            let mut store = SqliteStore::open(&config.database_path)
                .wrap_err("Failed to open review database")?;
            let clock = SystemClock;

            let cards = select_cards(&deck, &mode, &store, clock.today())?;
            info!("Studying {} ({} cards)", mode, cards.len());

            let order = match seed.or(config.seed) {
                Some(seed) => QueueOrder::seeded(seed),
                None => QueueOrder::random(),
            };
            let mut session = StudySession::with_order(cards, order, &mut store, clock);

            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let end = app::run_pass(&mut session, &mut stdin.lock(), &mut stdout)?;
            info!("Pass ended: {:?}", end);
        }
        Commands::Stats => {
            let deck =
                import_catalog(&config.catalog_path).wrap_err("Failed to load card catalog")?;
            let store = SqliteStore::open(&config.database_path)
                .wrap_err("Failed to open review database")?;
            let states = store.load_all()?;
            let streak: Option<StudyStreak> = store.load_streak()?;

            let report = StudyReport::build(
                &deck.flashcards,
                &states,
                SystemClock.today(),
                streak.as_ref(),
            );
            app::print_report(&report, &mut io::stdout())?;
        }
        Commands::Import { path } => {
            let deck = import_catalog(&path)
                .wrap_err_with(|| format!("Failed to import {}", path.display()))?;
            app::print_catalog(&deck, &mut io::stdout())?;
        }
    }

    Ok(())
}
