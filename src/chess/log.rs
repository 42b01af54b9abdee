use env_logger::{Builder, Env, Target};

/// Environment variable holding the log filter, e.g. `CHESS_LOG=warn`.
pub const CHESS_LOG: &str = "CHESS_LOG";

const DEFAULT_FILTER: &str = "info";

/// Installs the stderr logger. Safe to call more than once.
pub fn init() {
    let _ = builder().try_init();
}

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().filter_or(CHESS_LOG, DEFAULT_FILTER));
    builder.target(Target::Stderr);
    builder
}
