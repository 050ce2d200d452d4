use aisle::cli::commands::{Cli, Commands};
use aisle::cli::handlers;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch the dashboard. No stderr logging while
            // the terminal is in raw mode.
            let planning_dir = cli.planning_dir.clone();
            if let Err(e) = aisle::tui::run(planning_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Init(args)) => {
            init_logging();
            // Init is handled before planner discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            init_logging();
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
