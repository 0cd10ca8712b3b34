//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use medscribe_extractor::Extractor;
use std::io::Read;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_input(&args.input)?;
    let extractor = Extractor::new(config.extractor.clone())?;
    let report = extractor.aggregate_report(&text);

    // Text output lists failures inline; keep JSON stdout clean
    if formatter.format() == OutputFormat::Json {
        for failure in &report.failures {
            eprintln!("{}", formatter.warning(&format!("{} extraction failed: {}", failure.kind, failure.reason)));
        }
    }
    println!("{}", formatter.format_report(&report)?);

    Ok(())
}

/// Read the whole input from a file, or from stdin for `-`.
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}
