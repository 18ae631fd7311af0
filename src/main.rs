/* 3rd party libraries */
use std::env;
use std::process;

/* Custom libraries */
use cli::Parsed;
use config::OutputFormat;
use shared::SimulationSummary;
use simulation::Simulation;

/* Modules */
mod cli;
mod config;
mod dispatcher;
mod elevator;
mod floor;
mod registry;
mod shared;
mod simulation;

/* Main */
fn main() {
    let cli = match cli::parse(env::args_os()) {
        Parsed::Run(cli) => cli,
        Parsed::Info(info) => info.exit(),
        Parsed::Usage(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load the configuration
    let mut config = unwrap_or_exit!(config::load_config(cli.config.as_deref()));
    cli.apply_overrides(&mut config);

    let params = match config.params(cli.floors, cli.elevators, cli.calls) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: elevator-sim <FLOORS> <ELEVATORS> <CALLS>");
            eprintln!("Example: elevator-sim 10 3 20");
            process::exit(1);
        }
    };

    log::info!(
        "Building with {} floors, {} elevators, {} calls to serve",
        params.n_floors,
        params.n_elevators,
        params.n_calls
    );

    // Run until every call has been generated and serviced
    let summary = unwrap_or_exit!(Simulation::new(params, &config).run());
    print_summary(&summary, config.output.format);
}

fn print_summary(summary: &SimulationSummary, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        },
        OutputFormat::Text => {
            println!();
            println!("=== SIMULATION FINISHED ===");
            println!(
                "{} of {} calls serviced.",
                summary.serviced, summary.generated
            );
            println!("Final elevator positions:");
            for elevator in &summary.elevators {
                println!(
                    "- Elevator {}: floor {}, {} calls served",
                    elevator.id, elevator.final_floor, elevator.calls_served
                );
            }
        }
    }
}
