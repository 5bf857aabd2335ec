use std::process::ExitCode;

fn main() -> ExitCode {
    site_audit::exit_code(site_audit::execute_from_env())
}
