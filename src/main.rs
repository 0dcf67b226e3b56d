use clap::Parser;
use roster::cli::commands::Cli;
use roster::cli::handlers;
use roster::io::config_io;
use roster::io::logging::{self, LogTarget};
use roster::io::storage::FileStore;
use roster::model::BuiltinDefaults;
use roster::store::RosterStore;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.clone().unwrap_or_else(config_io::config_path);
    let config = config_io::read_config_from(&config_path)?;
    let data_dir = config_io::resolve_data_dir(&config, cli.data_dir.as_deref());

    match cli.command {
        None => {
            // No subcommand → launch TUI; logs go to a file so the screen stays clean
            let log_path = data_dir.join("roster.log");
            logging::init_tracing(LogTarget::File(&log_path), &config.log.level)
                .map_err(|e| format!("cannot open log {}: {}", log_path.display(), e))?;
            let store = RosterStore::open(
                FileStore::new(&data_dir),
                &config.storage.key,
                Box::new(BuiltinDefaults),
            );
            roster::tui::run(store, &config.ui)
        }
        Some(command) => {
            logging::init_tracing(LogTarget::Stderr, &config.log.level)?;
            let mut store = RosterStore::open(
                FileStore::new(&data_dir),
                &config.storage.key,
                Box::new(BuiltinDefaults),
            );
            handlers::dispatch(command, cli.json, &mut store)
        }
    }
}
