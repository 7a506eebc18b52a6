//! Typed contract of the Amazon Transcribe batch API (`2017-10-26`).
//!
//! The crate carries the closed enumerations, request and response records,
//! error taxonomy and operation set of the service, together with the
//! [`TranscribeApi`] trait a backend implements and a JSON 1.1 [`dispatch`]er
//! that routes wire requests onto it.

pub mod config;
pub mod dispatch;
pub mod enums;
pub mod error;
pub mod operation;
pub mod service;
pub mod shapes;
pub mod timestamp;
pub mod validate;

pub use config::CommonConfig;
pub use dispatch::{dispatch, DispatchResponse};
pub use error::TranscribeError;
pub use operation::Operation;
pub use service::{RequestContext, TranscribeApi, Unimplemented};
pub use validate::Validate;

use log::LevelFilter;

/// Initialize logging once based on provided level string.
///
/// `RUST_LOG` still takes precedence when set. Repeated calls are ignored.
pub fn init_logging_from_env(level: Option<String>) {
    let filter = level
        .as_deref()
        .map(parse_level_filter)
        .unwrap_or(LevelFilter::Info);

    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

/// Utility to parse a level string to LevelFilter.
pub fn parse_level_filter(s: &str) -> LevelFilter {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}
