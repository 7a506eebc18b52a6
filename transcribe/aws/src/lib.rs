//! AWS Transcribe backend for the `golem-transcribe` contract.
//!
//! [`AwsTranscribeClient`] implements [`golem_transcribe::TranscribeApi`] by
//! signing each call with SigV4 and posting it to the regional JSON 1.1
//! endpoint. The [`waiter`] module polls long-running jobs to completion.

pub mod client;
pub mod config;
pub mod error;
pub mod sigv4;
pub mod waiter;

pub use client::AwsTranscribeClient;
pub use config::AwsConfig;
pub use waiter::{WaitError, WaitOptions};
