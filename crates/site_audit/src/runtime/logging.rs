//! Console diagnostics setup.

use tracing::Level;

/// How chatty the stderr log stream should be.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::WARN,
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global fmt subscriber on stderr.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(verbosity.level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
