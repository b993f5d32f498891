//! Logger set-up for the binary and tests.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `filter` takes `RUST_LOG` syntax and, like `RUST_LOG` itself, wins over
/// the level implied by `verbose`. When `verbose` is `true` the default level
/// is debug, otherwise info.
pub fn init(verbose: bool, filter: Option<&str>) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    if let Some(directives) = filter {
        builder.parse_filters(directives);
    }

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
