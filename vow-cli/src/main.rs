//! Vow CLI - Command line interface
//!
//! Runs promise combinator scenarios on a virtual clock and prints how each
//! one settled. Without a scenario file the built-in cases run.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, info};
use vow_api::{get_config, init_config, RunConfig, VowError};
use vow_log::{Level, Logger};

mod config;
mod logging;
mod platform;
mod scenario;

use crate::config::LogConfig;
use crate::logging::{LogFormat, TracingSink};
use crate::platform::{print_error, print_report};
use crate::scenario::{run_case, ScenarioFile};

#[derive(Parser)]
#[command(
    name = "vow",
    about = "Run promise combinator scenarios on a virtual clock",
    version = "0.1.0"
)]
struct Cli {
    /// Scenario file (JSON); the built-in cases run when omitted
    #[arg(value_name = "SCENARIO_FILE")]
    scenario: Option<PathBuf>,

    /// Only run the named case (repeatable)
    #[arg(long = "case", value_name = "NAME")]
    cases: Vec<String>,

    /// List case names and exit
    #[arg(long)]
    list: bool,

    /// Global log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Per-component log level, e.g. `combinator=debug` (repeatable)
    #[arg(long = "component-level", value_name = "COMPONENT=LEVEL")]
    component_levels: Vec<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Pretty-print JSON reports
    #[arg(long)]
    pretty: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_config = match build_log_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };
    logging::init(&log_config, cli.log_format);

    let logger = Logger::new(log_config.most_verbose()).with_sink(TracingSink);
    if let Err(e) = init_config(RunConfig::with_logger(logger)) {
        print_error(&e);
        process::exit(1);
    }

    let file = match &cli.scenario {
        Some(path) => match ScenarioFile::load(path) {
            Ok(file) => file,
            Err(e) => {
                print_error(&e);
                process::exit(1);
            }
        },
        None => ScenarioFile::builtin(),
    };

    if cli.list {
        for case in &file.cases {
            println!("{}\t{}", case.name, case.combinator.as_str());
        }
        return;
    }

    if let Err(e) = run_cases(&cli, &file) {
        print_error(&e);
        process::exit(1);
    }
}

fn build_log_config(cli: &Cli) -> Result<LogConfig, String> {
    let mut log_config = LogConfig {
        global: cli.log_level.parse::<Level>().map_err(|e| e.to_string())?,
        ..LogConfig::default()
    };
    for spec in &cli.component_levels {
        log_config.apply_override(spec)?;
    }
    Ok(log_config)
}

fn run_cases(cli: &Cli, file: &ScenarioFile) -> Result<(), VowError> {
    if let Some(unknown) = cli
        .cases
        .iter()
        .find(|name| !file.cases.iter().any(|c| &c.name == *name))
    {
        return Err(VowError::Scenario(format!("no case named '{unknown}'")));
    }

    let run_config = file.run_config(get_config());
    let selected = file
        .cases
        .iter()
        .filter(|c| cli.cases.is_empty() || cli.cases.contains(&c.name));

    for case in selected {
        debug!(case = %case.name, inputs = case.inputs.len(), "running case");
        let report = run_case(case, &run_config)?;
        info!(case = %case.name, at_ms = report.at_ms, "case finished");
        print_report(&report, cli.pretty);
    }
    Ok(())
}
