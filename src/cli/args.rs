use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Terminal,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "triagemap")]
#[command(about = "Rule-based clinical triage records and reporting", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the nearest .triagemap.toml)
    #[arg(long, global = true, env = "TRIAGEMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Prediction store file, overriding configuration
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a triage input and record the prediction
    Triage {
        /// JSON input file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Classify without storing
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Classify an amount/category input with the legacy rules
    Legacy {
        /// JSON input file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Classify without storing
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// List recent predictions, newest first
    History {
        /// Maximum number of rows (defaults to dashboard.history_limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Summarize stored predictions by risk tier and comorbidity
    Dashboard {
        /// Number of comorbidities to show (defaults to dashboard.top_n)
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Aggregate on all cores
        #[arg(long)]
        parallel: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Print one stored prediction as JSON
    Show {
        /// Prediction id
        id: u64,
    },

    /// Remove a stored prediction
    Delete {
        /// Prediction id
        id: u64,
    },

    /// Register or list patients
    Patient {
        #[command(subcommand)]
        action: PatientCommand,
    },

    /// Write a default .triagemap.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PatientCommand {
    /// Register a patient
    Add {
        #[arg(long)]
        name: String,

        /// Age in years (0-120)
        #[arg(long, allow_negative_numbers = true)]
        age: i64,

        /// male, female or other
        #[arg(long)]
        sex: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// List registered patients, newest first
    List {
        /// Maximum number of rows
        #[arg(long, default_value_t = crate::store::DEFAULT_PATIENT_LIMIT)]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "triagemap",
            "dashboard",
            "--top",
            "5",
            "--store",
            "/tmp/p.jsonl",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, 2);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/p.jsonl")));
        match cli.command {
            Commands::Dashboard { top, parallel, format } => {
                assert_eq!(top, Some(5));
                assert!(!parallel);
                assert_eq!(format, OutputFormat::Terminal);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_patient_add_accepts_negative_age_for_validation() {
        let cli = Cli::try_parse_from([
            "triagemap", "patient", "add", "--name", "Ana", "--age", "-4", "--sex", "female",
        ])
        .unwrap();
        match cli.command {
            Commands::Patient {
                action: PatientCommand::Add { age, .. },
            } => assert_eq!(age, -4),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_patient_list_default_limit() {
        let cli = Cli::try_parse_from(["triagemap", "patient", "list"]).unwrap();
        match cli.command {
            Commands::Patient {
                action: PatientCommand::List { limit, .. },
            } => assert_eq!(limit, 100),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
