//! Service Load Tester - Main CLI Application
//!
//! Drives virtual users against a service health endpoint and exits
//! non-zero when any configured threshold fails.

use clap::Parser;
use service_load_tester::{
    cli::Cli,
    client::HealthCheckClient,
    config::{display_config_summary, load_config, validate_config},
    driver::LoadDriver,
    error::{AppError, Result},
    output::{render_report, ReportFormatterFactory},
    PKG_NAME, VERSION,
};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    let use_colors = cli.use_colors();
    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_colors));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        println!("{} v{} (built {})", PKG_NAME, VERSION, env!("BUILD_TIME"));
        println!("Debug mode enabled");
        println!();
    }

    // Load and validate configuration
    let config = load_config(cli)?;

    if config.debug {
        println!("Configuration loaded successfully:");
        println!("{}", display_config_summary(&config));
        println!();
    }

    // Surface soft warnings before starting
    let warnings = validate_config(&config)?;
    for warning in &warnings {
        eprintln!("{}", warning.format(config.enable_color));
    }
    let formatter = ReportFormatterFactory::create_formatter(config.enable_color);

    let client = Arc::new(HealthCheckClient::new(&config)?);

    if config.verbose || config.debug {
        println!(
            "Starting load test: {} virtual users against {} for {}",
            config.virtual_users,
            client.endpoint(),
            humantime::format_duration(config.duration)
        );
        println!();
    }

    // Execute the run
    let json_output = config.json_output;
    let verbose = config.verbose;
    let driver = LoadDriver::new(config)?;
    let result = driver.run(client).await?;

    // Render the report
    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(formatter.as_ref(), &result, verbose)?);
    }

    // Exit code reflects the verdict
    if result.passed() {
        Ok(())
    } else {
        let violated: Vec<String> = result
            .violated_thresholds()
            .iter()
            .map(|o| o.threshold.to_string())
            .collect();
        Err(AppError::threshold_violation(violated.join(", ")))
    }
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Set SERVICE_URL or pass --url with an http(s) base URL");
            eprintln!("  - Virtual users and duration must both be at least 1");
            eprintln!("  - Thresholds look like p95<1000 or fail_rate<0.1");
        }
        AppError::Request(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check that the target service is running and reachable");
            eprintln!("  - Verify the /health endpoint exists on the target");
            eprintln!("  - Check firewall settings");
        }
        AppError::Timeout(_) => {
            eprintln!();
            eprintln!("Timeout troubleshooting:");
            eprintln!("  - Increase the per-request timeout with --timeout");
            eprintln!("  - Check the target's responsiveness under load");
        }
        AppError::ThresholdViolation(_) => {
            eprintln!();
            eprintln!("The run completed; see the report above for the violated thresholds.");
        }
        _ => {}
    }
}
