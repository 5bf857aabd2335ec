//! Consistency audit for the multi-region static site.
//!
//! The crate is a small CLI layer over an audit engine. [`audit`] correlates regional page
//! markup, the logo inventory, and the service-worker precache list into a classified report,
//! while [`runtime`] owns configuration, path resolution, errors, and logging.

pub mod audit;
pub mod cli;
pub mod commands;
pub mod runtime;

use crate::cli::TopLevelCommand;
use crate::commands::run::RunCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::AuditResult;
use crate::runtime::logging;

/// Shared command contract for top-level command families.
///
/// [`AuditCommand::parse`] is a pure translation from raw CLI arguments into typed options; side
/// effects belong in [`AuditCommand::run`].
pub trait AuditCommand {
    /// Typed options produced by CLI parsing for the command family.
    type Options;

    /// Parse command-line arguments into typed options.
    ///
    /// Implementations should return
    /// [`AuditError::validation`](crate::runtime::error::AuditError::validation) for invalid
    /// user-facing argument shapes.
    fn parse(args: &[String]) -> AuditResult<Self::Options>;

    /// Execute the command family using the shared runtime context.
    fn run(ctx: &CommandContext, options: Self::Options) -> AuditResult<()>;
}

/// Executes the `site-audit` binary using the current process arguments.
pub fn execute_from_env() -> AuditResult<()> {
    match cli::parse(std::env::args().skip(1).collect())? {
        TopLevelCommand::Run(args) => {
            let options = RunCommand::parse(&args)?;
            logging::init(options.verbosity);
            let ctx = CommandContext::new(options.root.clone(), options.config.as_deref())?;
            RunCommand::run(&ctx, options)
        }
        TopLevelCommand::Help => {
            cli::print_usage();
            Ok(())
        }
    }
}

/// Converts an audit result into a stable process exit code.
///
/// Every error that reaches this point is fatal and maps to exit code `1`.
pub fn exit_code(result: AuditResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(1)
        }
    }
}
