//! Minimal levelled logging to stdout.
//!
//! Every line carries a coloured level tag and a UTC wall clock timestamp. Per-timestep
//! traces go through [`event!`](crate::event) and stay silent unless `LOG_COVERAGE_EVENTS`
//! is set.

/// Name of the environment variable enabling per-timestep event traces.
pub const EVENT_LOG_VAR: &str = "LOG_COVERAGE_EVENTS";

/// Current UTC wall clock time formatted for log lines.
pub fn timestamp() -> String { chrono::Utc::now().format("%H:%M:%S").to_string() }

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        println!("\x1b[32m[INFO] [{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        println!("\x1b[35m[WARN] [{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        println!("\x1b[31m[ERROR][{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if std::env::var($crate::logger::EVENT_LOG_VAR).is_ok() {
            println!("\x1b[36m[EVENT][{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
        }
    };
}
