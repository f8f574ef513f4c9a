//! Logging setup for the CLI
//!
//! Per-component filtering on top of `tracing-subscriber`. The runtime logs
//! through `vow_log`; [`TracingSink`] forwards those records into `tracing`
//! under each component's target so the `Targets` filter applies to them.

use std::io;

use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};
use vow_config::Component;
use vow_log::{Level, LogSink, Record};

use crate::config::LogConfig;

/// Output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Colored multi-line output
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON
    Json,
}

pub fn to_tracing(level: Level) -> tracing::Level {
    match level {
        Level::Trace => tracing::Level::TRACE,
        Level::Debug => tracing::Level::DEBUG,
        Level::Info => tracing::Level::INFO,
        Level::Warn => tracing::Level::WARN,
        Level::Error => tracing::Level::ERROR,
    }
}

/// Install the global subscriber with per-component levels
pub fn init(log_config: &LogConfig, format: LogFormat) {
    let targets = Component::ALL.into_iter().fold(
        Targets::new()
            .with_default(to_tracing(log_config.global))
            .with_target("vow_cli", to_tracing(log_config.global)),
        |targets, component| {
            targets.with_target(component.target(), to_tracing(log_config.level_for(component)))
        },
    );

    let layer = create_format_layer(format, io::stderr).with_filter(targets);
    tracing_subscriber::registry().with(layer).init();
}

/// Create formatter layer based on format
fn create_format_layer<F>(format: LogFormat, make_writer: F) -> impl Layer<tracing_subscriber::Registry>
where
    F: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}

/// `tracing` callsites need a static target and level, so each component
/// target gets its own set of callsites
macro_rules! forward {
    ($target:expr, $record:expr) => {{
        let record: &Record = $record;
        let turn = record.turn;
        let module = record.target;
        match record.level {
            Level::Trace => tracing::event!(target: $target, tracing::Level::TRACE, ?turn, module, "{}", record.message),
            Level::Debug => tracing::event!(target: $target, tracing::Level::DEBUG, ?turn, module, "{}", record.message),
            Level::Info => tracing::event!(target: $target, tracing::Level::INFO, ?turn, module, "{}", record.message),
            Level::Warn => tracing::event!(target: $target, tracing::Level::WARN, ?turn, module, "{}", record.message),
            Level::Error => tracing::event!(target: $target, tracing::Level::ERROR, ?turn, module, "{}", record.message),
        }
    }};
}

/// Forwards `vow_log` records to the global `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, record: &Record) {
        match Component::for_target(record.target) {
            Some(Component::Scheduler) => forward!("vow_core::scheduler", record),
            Some(Component::Timer) => forward!("vow_core::timer", record),
            Some(Component::EventLoop) => forward!("vow_core::event_loop", record),
            Some(Component::Promise) => forward!("vow_core::promise", record),
            Some(Component::Combinator) => forward!("vow_core::promise::combinators", record),
            Some(Component::Runtime) => forward!("vow_api", record),
            None => forward!("vow", record),
        }
    }
}
