use anyhow::Result;
use triagemap::cli::{self, Cli, Commands, PatientCommand};
use triagemap::commands;
use triagemap::report::{ColorMode, Reporter};
use triagemap::core::NewPatient;
use triagemap::store::{JsonlPatientStore, JsonlStore};

fn main() -> Result<()> {
    let cli = cli::parse_args();

    let config = cli::resolve_config(cli.config.as_deref(), cli.store.clone())?;
    cli::init_logging(cli.verbosity, config.logging.level.as_deref());
    log::debug!("Using prediction store {}", config.store.path.display());

    let reporter = Reporter::new(color_mode(&cli));
    let mut store = JsonlStore::open(config.store.path.clone());

    match cli.command {
        Commands::Triage {
            input,
            dry_run,
            format,
        } => commands::handle_triage(
            &config,
            &reporter,
            &mut store,
            input.as_deref(),
            dry_run,
            format,
        ),
        Commands::Legacy {
            input,
            dry_run,
            format,
        } => commands::handle_legacy(
            &config,
            &reporter,
            &mut store,
            input.as_deref(),
            dry_run,
            format,
        ),
        Commands::History { limit, format } => {
            commands::handle_history(&config, &reporter, &store, limit, format)
        }
        Commands::Dashboard {
            top,
            parallel,
            format,
        } => commands::handle_dashboard(&config, &reporter, &store, top, parallel, format),
        Commands::Show { id } => commands::handle_show(&store, id),
        Commands::Delete { id } => commands::handle_delete(&mut store, id),
        Commands::Patient { action } => {
            let mut patients = JsonlPatientStore::open(config.store.patients_path.clone());
            match action {
                PatientCommand::Add {
                    name,
                    age,
                    sex,
                    format,
                } => commands::handle_patient_add(
                    &reporter,
                    &mut patients,
                    NewPatient::new(name, age, sex),
                    format,
                ),
                PatientCommand::List { limit, format } => {
                    commands::handle_patient_list(&reporter, &patients, limit, format)
                }
            }
        }
        Commands::Init { force } => {
            commands::init::init_config(&std::env::current_dir()?, force)
        }
    }
}

// Pure function to pick the color mode
fn color_mode(cli: &Cli) -> ColorMode {
    if cli.plain {
        ColorMode::Never
    } else {
        ColorMode::from_env()
    }
}
