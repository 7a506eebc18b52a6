//! Polls a job until it reaches a terminal status.

use golem_transcribe::enums::{CallAnalyticsJobStatus, MedicalScribeJobStatus, TranscriptionJobStatus};
use golem_transcribe::shapes::*;
use golem_transcribe::{RequestContext, TranscribeApi, TranscribeError};
use log::{debug, trace};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaitError {
    #[error("job '{name}' failed: {reason}")]
    JobFailed { name: String, reason: String },

    #[error("job '{name}' did not finish after {attempts} polls")]
    TimedOut { name: String, attempts: u32 },

    #[error("job '{name}' moved from {from} to {to}")]
    InvalidTransition {
        name: String,
        from: String,
        to: String,
    },

    #[error(transparent)]
    Api(#[from] TranscribeError),
}

trait Lifecycle: Copy + PartialEq + fmt::Display {
    fn is_terminal(&self) -> bool;
    fn is_failed(&self) -> bool;
    fn can_transition_to(&self, next: Self) -> bool;
}

macro_rules! lifecycle {
    ($($status:ty),+) => {
        $(
            impl Lifecycle for $status {
                fn is_terminal(&self) -> bool {
                    <$status>::is_terminal(self)
                }

                fn is_failed(&self) -> bool {
                    *self == Self::Failed
                }

                fn can_transition_to(&self, next: Self) -> bool {
                    <$status>::can_transition_to(self, next)
                }
            }
        )+
    };
}

lifecycle!(TranscriptionJobStatus, CallAnalyticsJobStatus, MedicalScribeJobStatus);

struct Observation<J, S> {
    job: J,
    status: Option<S>,
    failure_reason: Option<String>,
}

fn wait_until<J, S: Lifecycle>(
    name: &str,
    options: WaitOptions,
    mut poll: impl FnMut() -> Result<Observation<J, S>, TranscribeError>,
) -> Result<J, WaitError> {
    let mut last: Option<S> = None;
    for attempt in 1..=options.max_attempts.max(1) {
        let observed = poll()?;
        trace!("job {name} poll {attempt}: {:?}", observed.status.map(|s| s.to_string()));

        if let Some(status) = observed.status {
            if let Some(previous) = last {
                if !previous.can_transition_to(status) {
                    return Err(WaitError::InvalidTransition {
                        name: name.to_string(),
                        from: previous.to_string(),
                        to: status.to_string(),
                    });
                }
            }
            last = Some(status);

            if status.is_failed() {
                return Err(WaitError::JobFailed {
                    name: name.to_string(),
                    reason: observed
                        .failure_reason
                        .unwrap_or_else(|| "no failure reason reported".to_string()),
                });
            }
            if status.is_terminal() {
                debug!("job {name} finished with {status} after {attempt} poll(s)");
                return Ok(observed.job);
            }
        }

        if attempt < options.max_attempts {
            std::thread::sleep(options.interval);
        }
    }
    Err(WaitError::TimedOut {
        name: name.to_string(),
        attempts: options.max_attempts.max(1),
    })
}

fn missing(kind: &str, name: &str) -> TranscribeError {
    TranscribeError::NotFound(format!("{kind} '{name}' missing from response"))
}

pub fn wait_for_transcription_job<S: TranscribeApi + ?Sized>(
    service: &S,
    ctx: &RequestContext,
    name: &str,
    options: WaitOptions,
) -> Result<TranscriptionJob, WaitError> {
    wait_until(name, options, || {
        let job = service
            .get_transcription_job(
                ctx,
                GetTranscriptionJobRequest {
                    transcription_job_name: name.to_string(),
                },
            )?
            .transcription_job
            .ok_or_else(|| missing("TranscriptionJob", name))?;
        Ok(Observation {
            status: job.transcription_job_status,
            failure_reason: job.failure_reason.clone(),
            job,
        })
    })
}

pub fn wait_for_medical_transcription_job<S: TranscribeApi + ?Sized>(
    service: &S,
    ctx: &RequestContext,
    name: &str,
    options: WaitOptions,
) -> Result<MedicalTranscriptionJob, WaitError> {
    wait_until(name, options, || {
        let job = service
            .get_medical_transcription_job(
                ctx,
                GetMedicalTranscriptionJobRequest {
                    medical_transcription_job_name: name.to_string(),
                },
            )?
            .medical_transcription_job
            .ok_or_else(|| missing("MedicalTranscriptionJob", name))?;
        Ok(Observation {
            status: job.transcription_job_status,
            failure_reason: job.failure_reason.clone(),
            job,
        })
    })
}

pub fn wait_for_call_analytics_job<S: TranscribeApi + ?Sized>(
    service: &S,
    ctx: &RequestContext,
    name: &str,
    options: WaitOptions,
) -> Result<CallAnalyticsJob, WaitError> {
    wait_until(name, options, || {
        let job = service
            .get_call_analytics_job(
                ctx,
                GetCallAnalyticsJobRequest {
                    call_analytics_job_name: name.to_string(),
                },
            )?
            .call_analytics_job
            .ok_or_else(|| missing("CallAnalyticsJob", name))?;
        Ok(Observation {
            status: job.call_analytics_job_status,
            failure_reason: job.failure_reason.clone(),
            job,
        })
    })
}

pub fn wait_for_medical_scribe_job<S: TranscribeApi + ?Sized>(
    service: &S,
    ctx: &RequestContext,
    name: &str,
    options: WaitOptions,
) -> Result<MedicalScribeJob, WaitError> {
    wait_until(name, options, || {
        let job = service
            .get_medical_scribe_job(
                ctx,
                GetMedicalScribeJobRequest {
                    medical_scribe_job_name: name.to_string(),
                },
            )?
            .medical_scribe_job
            .ok_or_else(|| missing("MedicalScribeJob", name))?;
        Ok(Observation {
            status: job.medical_scribe_job_status,
            failure_reason: job.failure_reason.clone(),
            job,
        })
    })
}
