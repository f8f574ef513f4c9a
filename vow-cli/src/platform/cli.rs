//! Terminal output
//!
//! Reports go to stdout as one JSON document per case; diagnostics go to
//! stderr so piping stdout into other tools stays clean.

use vow_api::VowError;

use crate::scenario::CaseReport;

pub fn print_report(report: &CaseReport, pretty: bool) {
    let json = report.to_json();
    let rendered = if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    };
    match rendered {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("❌ cannot render report for '{}': {}", report.name, e),
    }
}

pub fn print_error(error: &VowError) {
    eprintln!("❌ {error}");
    if let Some(reason) = error.reason() {
        eprintln!("   reason: {}", reason.to_json());
    }
}
