//! Level macros
//!
//! `debug!(logger, "fmt", args..)` logs under the calling module's path, which
//! is what per-component filters match on. `debug!(target: "x", logger, ..)`
//! overrides the target. The logger expression is evaluated once and the
//! message is only formatted when the level is enabled.

#[macro_export]
macro_rules! log {
    (target: $target:expr, $logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::Level = $level;
        if logger.is_enabled(level) {
            logger.log(level, $target, ::std::format!($($arg)+));
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!(target: ::std::module_path!(), $logger, $level, $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    (target: $target:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!(target: $target, $logger, $crate::Level::Trace, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    (target: $target:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!(target: $target, $logger, $crate::Level::Debug, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    (target: $target:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!(target: $target, $logger, $crate::Level::Info, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    (target: $target:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!(target: $target, $logger, $crate::Level::Warn, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    (target: $target:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!(target: $target, $logger, $crate::Level::Error, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}
