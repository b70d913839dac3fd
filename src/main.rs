// Scan Appointment Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/scan-appointment-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/scan-appointment-simulator --days 60 --seed 42 --output-format json --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use scan_appointment_simulator::calls::CallEvent;
use scan_appointment_simulator::simulation::{
    LoggingConfig, SimulationOrchestrator, SimulationOutcome,
};
use scan_appointment_simulator::types::config::CliArgs;
use scan_appointment_simulator::types::{OutputFormat, SimulationConfig};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
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

    let _logging = match LoggingConfig::from_flags(args.verbose, args.debug).init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Scan Appointment Simulator");

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Scan Appointment Simulator completed successfully");
}

fn run(args: CliArgs) -> Result<()> {
    let dry_run = args.dry_run;

    let config =
        SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    let output_format = config
        .get_output_format()
        .map_err(anyhow::Error::msg)
        .context("Invalid output format")?;

    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_startup_banner(&config);

    let mut orchestrator = SimulationOrchestrator::new(config.clone())
        .context("Failed to initialize simulation")?;
    let outcome = orchestrator.run();

    print_call_preview(&outcome.calls, config.preview_calls);
    print_report(&outcome, output_format)?;

    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Scan Appointment Simulator");
    eprintln!("==========================");
    eprintln!("Two-machine appointment scheduling simulation");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Days: {} ({} to {})", config.days, config.start_date, config.end_date());
    eprintln!(
        "  Business Hours: {:02}:00 - {:02}:00",
        config.business_hours.day_start, config.business_hours.day_end
    );
    for class in scan_appointment_simulator::RequestClass::ALL {
        let parameters = config.parameters_for(class);
        eprintln!(
            "  {}: {:.2} calls/day, mean gap {:.3} h, mean scan {:.3} h, slot {:.4} h",
            class,
            parameters.mean_daily_calls,
            parameters.inter_arrival.mean(),
            parameters.service_duration.mean(),
            parameters.slot_duration_hours
        );
    }
    eprintln!("  Expected Calls: {:.0}", config.expected_total_calls());
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}

/// Print the first generated calls as a table
fn print_call_preview(calls: &[CallEvent], limit: usize) {
    if limit == 0 || calls.is_empty() {
        return;
    }

    println!("Call Schedule (first {} of {}):", limit.min(calls.len()), calls.len());
    println!("{:<10}  {:>7}  {:>7}  {:<7}  Call Timestamp", "Date", "Time", "Scan", "Class");
    for call in calls.iter().take(limit) {
        println!("{}", call);
    }
    println!();
}

/// Print the performance report in the requested format
fn print_report(outcome: &SimulationOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", outcome.report);
            eprintln!(
                "\nSimulated {} calls in {:.2} seconds",
                outcome.calls.len(),
                outcome.elapsed.as_secs_f64()
            );
        }
        OutputFormat::Json => {
            let json = outcome.report.to_json().context("Failed to serialize report")?;
            println!("{}", json);
        }
    }
    Ok(())
}
