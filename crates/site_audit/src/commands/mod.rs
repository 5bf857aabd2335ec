//! Command families exposed by the `site-audit` binary.

pub mod run;
