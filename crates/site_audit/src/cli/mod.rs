//! Top-level CLI parsing and help output.

use crate::runtime::error::{AuditError, AuditResult};

/// Top-level `site-audit` command families.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopLevelCommand {
    Run(Vec<String>),
    Help,
}

/// Parse raw command-line arguments into a top-level command selection.
///
/// No arguments at all, or only flags, selects the full audit run.
pub fn parse(args: Vec<String>) -> AuditResult<TopLevelCommand> {
    let Some(cmd) = args.first().cloned() else {
        return Ok(TopLevelCommand::Run(Vec::new()));
    };

    match cmd.as_str() {
        "run" => Ok(TopLevelCommand::Run(args[1..].to_vec())),
        "help" | "--help" | "-h" => Ok(TopLevelCommand::Help),
        flag if flag.starts_with("--") => Ok(TopLevelCommand::Run(args)),
        other => Err(AuditError::validation(format!(
            "unknown site-audit command: {other}"
        ))),
    }
}

/// Print the canonical top-level usage text.
pub fn print_usage() {
    eprintln!(
        "Usage: site-audit [run] [options]\n\
         \n\
         Audits regional pages, the logo directory, and the service-worker precache list,\n\
         and writes a consistency report.\n\
         \n\
         Options:\n\
           --root <dir>       Site root to audit (default: current directory)\n\
           --config <path>    Audit config TOML (default: <root>/site-audit.toml if present)\n\
           --json             Print a JSON summary of classification counts\n\
           --verbose          Debug-level progress logging\n\
           --quiet            Only log warnings\n"
    );
}
