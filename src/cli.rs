use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todo_widget::theme::ThemePreference;
use todo_widget::todo::FilterMode;

#[derive(Parser, Debug)]
#[command(name = "todo-widget")]
#[command(about = "A small terminal todo list with filters and a light/dark theme", long_about = None)]
pub struct Cli {
    /// Use this store file instead of the configured one
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, global = true, conflicts_with = "store")]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an item to the top of the list
    Add {
        text: String,
    },
    /// Print the list
    Show {
        /// all, active or completed
        #[arg(short, long, default_value_t = FilterMode::All)]
        filter: FilterMode,
    },
    /// Remove every completed item
    ClearCompleted,
    /// Print the resolved theme, or pin it to light or dark
    Theme {
        theme: Option<ThemePreference>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_runs_tui() {
        let cli = Cli::try_parse_from(["todo-widget"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.ephemeral);
    }

    #[test]
    fn test_show_filter_parses() {
        let cli = Cli::try_parse_from(["todo-widget", "show", "--filter", "active"]).unwrap();
        match cli.command {
            Some(Commands::Show { filter }) => assert_eq!(filter, FilterMode::Active),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_theme_argument_parses() {
        let cli = Cli::try_parse_from(["todo-widget", "theme", "light"]).unwrap();
        match cli.command {
            Some(Commands::Theme { theme }) => assert_eq!(theme, Some(ThemePreference::Light)),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["todo-widget", "theme", "sepia"]).is_err());
    }

    #[test]
    fn test_store_and_ephemeral_conflict() {
        assert!(Cli::try_parse_from(["todo-widget", "--store", "x.db", "--ephemeral"]).is_err());
        let cli = Cli::try_parse_from(["todo-widget", "add", "Buy milk", "--store", "x.db"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("x.db")));
    }
}
