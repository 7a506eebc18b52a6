use golem_transcribe::enums::{CallAnalyticsJobStatus, TranscriptionJobStatus};
use golem_transcribe::shapes::*;
use golem_transcribe::{RequestContext, TranscribeApi, TranscribeError, Unimplemented};
use std::cell::RefCell;
use std::time::Duration;
use transcribe_aws::waiter::{
    wait_for_call_analytics_job, wait_for_medical_scribe_job, wait_for_transcription_job,
    WaitError, WaitOptions,
};

/// Replays a fixed sequence of job states, repeating the last one.
struct Scripted {
    statuses: RefCell<Vec<TranscriptionJobStatus>>,
    failure_reason: Option<String>,
}

impl Scripted {
    fn new(statuses: &[TranscriptionJobStatus]) -> Self {
        Self {
            statuses: RefCell::new(statuses.iter().rev().copied().collect()),
            failure_reason: None,
        }
    }

    fn next(&self) -> TranscriptionJobStatus {
        let mut statuses = self.statuses.borrow_mut();
        if statuses.len() > 1 {
            statuses.pop().unwrap()
        } else {
            statuses[0]
        }
    }
}

impl TranscribeApi for Scripted {
    fn get_transcription_job(
        &self,
        _ctx: &RequestContext,
        request: GetTranscriptionJobRequest,
    ) -> Result<GetTranscriptionJobResponse, TranscribeError> {
        Ok(GetTranscriptionJobResponse {
            transcription_job: Some(TranscriptionJob {
                transcription_job_name: Some(request.transcription_job_name),
                transcription_job_status: Some(self.next()),
                failure_reason: self.failure_reason.clone(),
                ..Default::default()
            }),
        })
    }

    fn get_call_analytics_job(
        &self,
        _ctx: &RequestContext,
        request: GetCallAnalyticsJobRequest,
    ) -> Result<GetCallAnalyticsJobResponse, TranscribeError> {
        let status = match self.next() {
            TranscriptionJobStatus::Queued => CallAnalyticsJobStatus::Queued,
            TranscriptionJobStatus::InProgress => CallAnalyticsJobStatus::InProgress,
            TranscriptionJobStatus::Failed => CallAnalyticsJobStatus::Failed,
            TranscriptionJobStatus::Completed => CallAnalyticsJobStatus::Completed,
        };
        Ok(GetCallAnalyticsJobResponse {
            call_analytics_job: Some(CallAnalyticsJob {
                call_analytics_job_name: Some(request.call_analytics_job_name),
                call_analytics_job_status: Some(status),
                ..Default::default()
            }),
        })
    }
}

fn fast(max_attempts: u32) -> WaitOptions {
    WaitOptions {
        interval: Duration::from_millis(1),
        max_attempts,
    }
}

#[test]
fn waits_until_completed() {
    use TranscriptionJobStatus::*;
    let service = Scripted::new(&[Queued, InProgress, InProgress, Completed]);
    let job =
        wait_for_transcription_job(&service, &RequestContext::default(), "job", fast(10)).unwrap();
    assert_eq!(job.transcription_job_status, Some(Completed));
    assert_eq!(job.transcription_job_name.as_deref(), Some("job"));
}

#[test]
fn failure_reason_is_surfaced() {
    use TranscriptionJobStatus::*;
    let mut service = Scripted::new(&[InProgress, Failed]);
    service.failure_reason = Some("Unsupported media format".to_string());
    let err =
        wait_for_transcription_job(&service, &RequestContext::default(), "job", fast(10)).unwrap_err();
    assert_eq!(
        err,
        WaitError::JobFailed {
            name: "job".to_string(),
            reason: "Unsupported media format".to_string(),
        }
    );
}

#[test]
fn gives_up_after_max_attempts() {
    let service = Scripted::new(&[TranscriptionJobStatus::InProgress]);
    let err =
        wait_for_transcription_job(&service, &RequestContext::default(), "slow", fast(3)).unwrap_err();
    assert!(matches!(err, WaitError::TimedOut { attempts: 3, .. }));
}

#[test]
fn status_regression_is_reported() {
    use TranscriptionJobStatus::*;
    let service = Scripted::new(&[InProgress, Queued]);
    let err =
        wait_for_call_analytics_job(&service, &RequestContext::default(), "call", fast(5)).unwrap_err();
    assert!(matches!(
        err,
        WaitError::InvalidTransition { ref from, ref to, .. } if from == "IN_PROGRESS" && to == "QUEUED"
    ));
}

#[test]
fn api_errors_propagate() {
    let err = wait_for_medical_scribe_job(&Unimplemented, &RequestContext::default(), "s", fast(2))
        .unwrap_err();
    assert!(matches!(
        err,
        WaitError::Api(TranscribeError::NotImplemented { ref operation }) if operation == "GetMedicalScribeJob"
    ));
}
