//! Patterns command implementation.

use crate::cli::PatternsArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use medscribe_extractor::{CompiledLibrary, EntityKind, PatternLibrary};

/// Execute the patterns command.
pub fn execute_patterns(args: PatternsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<EntityKind>)
        .transpose()
        .map_err(CliError::InvalidInput)?;

    let library = PatternLibrary::builtin();
    let compiled = CompiledLibrary::compile(&library, config.extractor.regex_size_limit);
    for broken in compiled.broken_kinds() {
        eprintln!("{}", formatter.warning(&format!("{} rules do not compile", broken)));
    }

    println!("{}", formatter.format_patterns(&library, kind)?);
    Ok(())
}
