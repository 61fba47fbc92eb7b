use clap::Parser;
use purgo::{cli, config, error, export, import, logging, pipeline, registry, session};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use pipeline::{CheckOptions, Progress};
use registry::{CompanyRegistry, OfflineRegistry, RegistryClient};
use session::{Credentials, Session};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("✖ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Check { master, check, output, no_enrich, no_status } => {
            println!("purgo - company check\n");
            let session = login(&config, cli.username, cli.password)?;

            println!("[1/4] Reading workbooks...");
            let master_data = import::read_first_sheet(&master)?;
            let check_data = import::read_first_sheet(&check)?;
            println!(
                "✔ master: {} rows, check: {} rows\n",
                master_data.sheet.len(),
                check_data.sheet.len()
            );

            let options = CheckOptions {
                enrich: !no_enrich,
                fetch_status: !no_status,
            };
            let mut registry: Box<dyn CompanyRegistry> = if options.enrich || options.fetch_status {
                Box::new(RegistryClient::from_config(&config)?)
            } else {
                Box::new(OfflineRegistry)
            };

            println!("[2/4] Checking companies...");
            let report = pipeline::run_check(
                &session,
                &master_data,
                &check_data,
                registry.as_mut(),
                options,
                Progress::Terminal,
            )?;
            if let Some(summary) = &report.enrich {
                println!(
                    "✔ searched {} (found {}, not found {}, errors {})",
                    summary.searched, summary.found, summary.not_found, summary.failed
                );
            }
            println!("✔ {} restricted of {}\n", report.restricted, report.reconciled.len());

            println!("[3/4] Writing results...");
            let output_path = export::output_path(output.as_deref(), &check, export::CHECK_OUTPUT_NAME);
            export::excel::write_workbook(&report.sheet, export::CHECK_SHEET_NAME, &output_path)?;
            println!("✔ saved: {}\n", output_path.display());

            println!("[4/4] Done");
        }

        Commands::Ingest { new_accounts, master, output } => {
            println!("purgo - new accounts\n");
            let session = login(&config, cli.username, cli.password)?;

            println!("[1/3] Reading workbooks...");
            let new_data = import::read_first_sheet(&new_accounts)?;
            let master_data = import::read_first_sheet(&master)?;
            println!("✔ {} new accounts\n", new_data.sheet.len());

            let mut registry = RegistryClient::from_config(&config)?;

            println!("[2/3] Searching Companies House...");
            let report = pipeline::run_ingest(
                &session,
                &new_data,
                &master_data,
                &mut registry,
                Progress::Terminal,
            )?;
            println!(
                "✔ found {}, not found {}, errors {}\n",
                report.enrich.found, report.enrich.not_found, report.enrich.failed
            );

            println!("[3/3] Writing master...");
            let default_name = export::updated_master_name(&master);
            let output_path = export::output_path(output.as_deref(), &master, &default_name);
            export::excel::write_workbook(&report.sheet, export::MASTER_SHEET_NAME, &output_path)?;
            println!("✔ appended {} rows: {}", report.appended, output_path.display());
        }

        Commands::Status { input, column, output } => {
            println!("purgo - company status\n");
            let session = login(&config, cli.username, cli.password)?;

            println!("[1/3] Reading workbook...");
            let data = import::read_first_sheet(&input)?;
            println!("✔ {} rows\n", data.sheet.len());

            let mut registry = RegistryClient::from_config(&config)?;

            println!("[2/3] Fetching statuses...");
            let report = pipeline::run_status(&session, &data, &column, &mut registry, Progress::Terminal)?;
            println!("✔ {} could not be fetched\n", report.failed);

            println!("[3/3] Writing results...");
            let default_name = export::status_output_name(&input);
            let output_path = export::output_path(output.as_deref(), &input, &default_name);
            export::excel::write_workbook(&report.sheet, export::STATUS_SHEET_NAME, &output_path)?;
            println!("✔ saved: {}", output_path.display());
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if show {
                println!("Settings:");
                println!("  Registry URL: {}", config.base_url);
                println!(
                    "  Request budget: {} per {}s",
                    config.max_requests, config.cooldown_seconds
                );
                println!("  Timeout: {}s", config.timeout_seconds);
                println!(
                    "  API key: {}",
                    if config.get_api_key().is_ok() { "set" } else { "not set" }
                );
                println!(
                    "  Login: {}",
                    if config.gate_credentials().is_ok() { "configured" } else { "not configured" }
                );
            }
        }
    }

    Ok(())
}

fn login(config: &Config, username: Option<String>, password: Option<String>) -> Result<Session> {
    let expected = config.gate_credentials()?;
    let submitted = Credentials::prompt_missing(username, password)?;
    let session = Session::authenticate(&submitted, &expected)?;
    println!("✔ logged in as {}\n", session.username());
    Ok(session)
}
