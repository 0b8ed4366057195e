// Clinic Flow Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/clinic-flow-sim
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/clinic-flow-sim --num-patients 40 --num-doctors 3 --assign doctor-3=5 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use clinic_flow_sim::simulation::{ClinicSimulation, LoggingConfig, ReplicationRunner};
use clinic_flow_sim::types::config::CliArgs;
use clinic_flow_sim::types::{OutputFormat, SimulationConfig};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let default_config = SimulationConfig::default();
        match default_config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = init_logging(&args) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Clinic Flow Simulator");

    if let Err(e) = run(args) {
        let span = clinic_flow_sim::error_span!("cli");
        let _enter = span.enter();
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Clinic Flow Simulator completed successfully");
}

/// Initialize logging based on CLI flags
fn init_logging(args: &CliArgs) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut logging = LoggingConfig::for_verbosity(args.verbose, args.debug);
    if args.log_json {
        logging = logging.with_json_format();
    }
    if let Some(dir) = &args.log_dir {
        logging = logging.with_file_logging(dir.clone());
    }
    logging.init()
}

/// Load, validate and run the configured clinic
fn run(args: CliArgs) -> anyhow::Result<()> {
    let dry_run = args.dry_run;
    let show_layout = args.show_layout;

    // Load configuration from CLI arguments and optional config file
    let config =
        SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    let output_format = config.get_output_format().map_err(anyhow::Error::msg)?;

    // Building the simulation validates the layout itself
    let simulation =
        ClinicSimulation::new(config.clone()).context("Failed to build clinic layout")?;

    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        if show_layout {
            eprintln!("{}", simulation.layout().render_text());
        }
        return Ok(());
    }

    print_startup_banner(&config);
    if show_layout {
        eprintln!("{}", simulation.layout().render_text());
    }

    if config.replications <= 1 {
        let snapshot = simulation.run().context("Simulation failed")?;
        match output_format {
            OutputFormat::Text => println!("{}", snapshot.generate_report()),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        }
    } else {
        let summary = ReplicationRunner::new(&simulation)
            .run(config.replications)
            .context("Replications failed")?;
        match output_format {
            OutputFormat::Text => println!("{}", summary.generate_report()),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        }
    }

    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Clinic Flow Simulator");
    eprintln!("=====================");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    let (entry, exit) = config.boundary_points();

    eprintln!("Configuration:");
    eprintln!("  Grid: {}x{}", config.grid_size, config.grid_size);
    eprintln!("  Entry / Exit: {:?} / {:?}", entry, exit);
    for (role, location) in &config.department_assignment {
        eprintln!("  {}: {}", role, location);
    }
    eprintln!("  Patients: {}", config.num_patients);
    eprintln!("  Doctors: {}", config.num_doctors);
    eprintln!("  Closing Time: {:.2}h", config.clinic_close_time);
    eprintln!(
        "  Arrival Gap: {:.2}h - {:.2}h",
        config.arrival_gap_range.0, config.arrival_gap_range.1
    );
    eprintln!(
        "  Consultation: {:.2}h - {:.2}h",
        config.consult_duration_range.0, config.consult_duration_range.1
    );
    eprintln!(
        "  Reception / Pharmacy: {:.2}h / {:.2}h",
        config.reception_duration, config.pharmacy_duration
    );
    if config.travel_hours_per_cell > 0.0 {
        eprintln!("  Travel Time per Cell: {:.3}h", config.travel_hours_per_cell);
    }
    eprintln!("  Replications: {}", config.replications);
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
