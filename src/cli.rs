//! Command-line interface definition.
use clap::{Parser, Subcommand, ValueEnum};
use flashcards_app::StudyMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flashcards", version, about = "Spaced-repetition flashcard review")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite review database (overrides config)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// JSON card catalog (overrides config)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an interactive review pass
    Study {
        #[arg(short, long, value_enum, default_value_t = ModeArg::Due)]
        mode: ModeArg,

        /// Case or category name, for those modes
        #[arg(short, long)]
        filter: Option<String>,

        /// Fixed shuffle seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print due count, mastery breakdown and progress by case
    Stats,
    /// Validate a catalog file and list its cases and categories
    Import { path: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    All,
    Due,
    Case,
    Category,
}

impl ModeArg {
    pub fn into_mode(self, filter: Option<String>) -> Result<StudyMode, String> {
        match (self, filter) {
            (ModeArg::All, _) => Ok(StudyMode::All),
            (ModeArg::Due, _) => Ok(StudyMode::Due),
            (ModeArg::Case, Some(name)) => Ok(StudyMode::Case(name)),
            (ModeArg::Category, Some(name)) => Ok(StudyMode::Category(name)),
            (mode, None) => Err(format!("--mode {mode:?} requires --filter").to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_study() {
        let cli = Cli::parse_from([
            "flashcards",
            "study",
            "--mode",
            "case",
            "--filter",
            "Hip",
            "--seed",
            "3",
        ]);
        match cli.command {
            Commands::Study { mode, filter, seed } => {
                assert_eq!(mode, ModeArg::Case);
                assert_eq!(filter.as_deref(), Some("Hip"));
                assert_eq!(seed, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_default_mode_is_due() {
        let cli = Cli::parse_from(["flashcards", "--verbose", "study"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Study { mode: ModeArg::Due, .. }));
    }

    #[test]
    fn test_filter_required_for_case() {
        assert!(ModeArg::Case.into_mode(None).is_err());
        assert_eq!(
            ModeArg::Category.into_mode(Some("Trauma".into())).unwrap(),
            StudyMode::Category("Trauma".into())
        );
        assert_eq!(ModeArg::All.into_mode(None).unwrap(), StudyMode::All);
    }
}
