/// Logging seam handed to the traverser, checker and fetcher.
///
/// Components never reach for a global logger; they receive a `&dyn Logger`
/// at construction. `TracingLogger` forwards to `tracing` once `init`
/// installed a subscriber; tests hand out the silent `NoopLogger`.
use std::fmt;

use tracing::Level;

pub trait Logger {
    fn debug(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
}

#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

#[cfg(test)]
impl Logger for NoopLogger {
    fn debug(&self, _: fmt::Arguments<'_>) {}
    fn info(&self, _: fmt::Arguments<'_>) {}
    fn warn(&self, _: fmt::Arguments<'_>) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!("{args}");
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!("{args}");
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!("{args}");
    }
}

/// Install the stderr subscriber. `--verbose` lowers the threshold to debug.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}
