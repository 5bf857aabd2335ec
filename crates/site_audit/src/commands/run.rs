//! The full scan-and-report pass.

use crate::audit::report::FileReport;
use crate::audit::{self, AuditSummary};
use crate::runtime::context::CommandContext;
use crate::runtime::error::{AuditError, AuditResult};
use crate::runtime::logging::Verbosity;
use crate::AuditCommand;
use serde::Serialize;
use std::path::PathBuf;

/// `site-audit [run]`
pub struct RunCommand;

/// Typed options for [`RunCommand`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunOptions {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub verbosity: Verbosity,
}

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Serialize)]
struct RunReport<'a> {
    report: String,
    #[serde(flatten)]
    summary: &'a AuditSummary,
}

impl AuditCommand for RunCommand {
    type Options = RunOptions;

    fn parse(args: &[String]) -> AuditResult<Self::Options> {
        let mut options = RunOptions::default();
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--root" => {
                    options.root = Some(PathBuf::from(flag_value(args, i)?));
                    i += 1;
                }
                "--config" => {
                    options.config = Some(PathBuf::from(flag_value(args, i)?));
                    i += 1;
                }
                "--json" => options.json = true,
                "--verbose" => options.verbosity = Verbosity::Verbose,
                "--quiet" => options.verbosity = Verbosity::Quiet,
                other => {
                    return Err(AuditError::validation(format!(
                        "unsupported site-audit argument: {other}"
                    )))
                }
            }
            i += 1;
        }
        Ok(options)
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> AuditResult<()> {
        tracing::info!(root = %ctx.root().display(), "auditing site");
        let mut report = FileReport::new(ctx.artifacts(), &ctx.config().report);
        let summary = audit::run_full_pass(ctx, &mut report)?;

        if options.json {
            let out = JsonOut {
                ok: true,
                data: RunReport {
                    report: report.path().display().to_string(),
                    summary: &summary,
                },
            };
            let body = serde_json::to_string_pretty(&out)
                .map_err(|err| AuditError::io(format!("failed to serialize summary: {err}")))?;
            println!("{body}");
        }
        println!("Site audit report generated: {}", report.path().display());
        Ok(())
    }
}

fn flag_value(args: &[String], i: usize) -> AuditResult<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .filter(|value| !value.starts_with("--"))
        .ok_or_else(|| AuditError::validation(format!("missing value for `{}`", args[i])))
}
