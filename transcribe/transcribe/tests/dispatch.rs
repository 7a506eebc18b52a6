use golem_transcribe::enums::{LanguageCode, TranscriptionJobStatus};
use golem_transcribe::shapes::*;
use golem_transcribe::{
    dispatch, Operation, RequestContext, TranscribeApi, TranscribeError, Unimplemented,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory backend supporting a handful of batch job operations.
#[derive(Default)]
struct Jobs {
    jobs: RefCell<BTreeMap<String, TranscriptionJob>>,
}

impl TranscribeApi for Jobs {
    fn start_transcription_job(
        &self,
        _ctx: &RequestContext,
        request: StartTranscriptionJobRequest,
    ) -> Result<StartTranscriptionJobResponse, TranscribeError> {
        let mut jobs = self.jobs.borrow_mut();
        if jobs.contains_key(&request.transcription_job_name) {
            return Err(TranscribeError::Conflict(
                "The requested job name already exists. Use a different job name.".to_string(),
            ));
        }
        let job = TranscriptionJob {
            transcription_job_name: Some(request.transcription_job_name.clone()),
            transcription_job_status: Some(TranscriptionJobStatus::InProgress),
            language_code: request.language_code,
            media: Some(request.media),
            ..Default::default()
        };
        jobs.insert(request.transcription_job_name, job.clone());
        Ok(StartTranscriptionJobResponse {
            transcription_job: Some(job),
        })
    }

    fn get_transcription_job(
        &self,
        _ctx: &RequestContext,
        request: GetTranscriptionJobRequest,
    ) -> Result<GetTranscriptionJobResponse, TranscribeError> {
        let jobs = self.jobs.borrow();
        let job = jobs.get(&request.transcription_job_name).cloned().ok_or_else(|| {
            TranscribeError::NotFound(
                "The requested job couldn't be found. Check the job name and try your request again."
                    .to_string(),
            )
        })?;
        Ok(GetTranscriptionJobResponse {
            transcription_job: Some(job),
        })
    }

    fn delete_transcription_job(
        &self,
        _ctx: &RequestContext,
        request: DeleteTranscriptionJobRequest,
    ) -> Result<(), TranscribeError> {
        self.jobs.borrow_mut().remove(&request.transcription_job_name);
        Ok(())
    }

    fn list_transcription_jobs(
        &self,
        _ctx: &RequestContext,
        request: ListTranscriptionJobsRequest,
    ) -> Result<ListTranscriptionJobsResponse, TranscribeError> {
        let summaries = self
            .jobs
            .borrow()
            .values()
            .filter(|job| request.status.is_none() || job.transcription_job_status == request.status)
            .map(|job| TranscriptionJobSummary {
                transcription_job_name: job.transcription_job_name.clone(),
                transcription_job_status: job.transcription_job_status,
                language_code: job.language_code,
                ..Default::default()
            })
            .collect();
        Ok(ListTranscriptionJobsResponse {
            status: request.status,
            next_token: None,
            transcription_job_summaries: Some(summaries),
        })
    }
}

fn call(service: &dyn TranscribeApi, op: &str, body: Value) -> (u16, Option<String>, Value) {
    let response = dispatch(
        service,
        &RequestContext::default(),
        &format!("Transcribe.{op}"),
        body.to_string().as_bytes(),
    );
    let parsed = serde_json::from_str(&response.body).unwrap();
    (response.status, response.error_type, parsed)
}

#[test]
fn start_then_get_returns_the_same_job() {
    let service = Jobs::default();
    let (status, error_type, body) = call(
        &service,
        "StartTranscriptionJob",
        json!({
            "TranscriptionJobName": "meeting-1",
            "LanguageCode": "en-US",
            "Media": {"MediaFileUri": "s3://bucket/meeting.wav"}
        }),
    );
    assert_eq!(status, 200);
    assert_eq!(error_type, None);
    assert_eq!(body["TranscriptionJob"]["TranscriptionJobStatus"], "IN_PROGRESS");

    let (status, _, body) = call(
        &service,
        "GetTranscriptionJob",
        json!({"TranscriptionJobName": "meeting-1"}),
    );
    assert_eq!(status, 200);
    assert_eq!(body["TranscriptionJob"]["TranscriptionJobName"], "meeting-1");
    assert_eq!(
        body["TranscriptionJob"]["Media"]["MediaFileUri"],
        "s3://bucket/meeting.wav"
    );
    assert!(body["TranscriptionJob"].get("CompletionTime").is_none());
}

#[test]
fn duplicate_job_name_is_a_conflict() {
    let service = Jobs::default();
    let request = json!({
        "TranscriptionJobName": "dup",
        "LanguageCode": "de-DE",
        "Media": {"MediaFileUri": "s3://bucket/a.mp3"}
    });
    assert_eq!(call(&service, "StartTranscriptionJob", request.clone()).0, 200);

    let (status, error_type, body) = call(&service, "StartTranscriptionJob", request);
    assert_eq!(status, 400);
    assert_eq!(error_type.as_deref(), Some("ConflictException"));
    assert_eq!(body["__type"], "ConflictException");
}

#[test]
fn missing_job_is_not_found() {
    let (status, error_type, _) = call(
        &Jobs::default(),
        "GetTranscriptionJob",
        json!({"TranscriptionJobName": "ghost"}),
    );
    assert_eq!(status, 400);
    assert_eq!(error_type.as_deref(), Some("NotFoundException"));
}

#[test]
fn delete_answers_with_an_empty_document() {
    let service = Jobs::default();
    let (status, _, body) = call(
        &service,
        "DeleteTranscriptionJob",
        json!({"TranscriptionJobName": "whatever"}),
    );
    assert_eq!(status, 200);
    assert_eq!(body, json!({}));
}

#[test]
fn list_accepts_an_empty_body() {
    let response = dispatch(
        &Jobs::default(),
        &RequestContext::default(),
        "Transcribe.ListTranscriptionJobs",
        b"",
    );
    assert!(response.is_success());
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["TranscriptionJobSummaries"], json!([]));
}

#[test]
fn unsupported_operations_report_not_implemented() {
    let (status, error_type, body) = call(
        &Jobs::default(),
        "CreateVocabulary",
        json!({
            "VocabularyName": "terms",
            "LanguageCode": "en-US",
            "Phrases": ["Golem"]
        }),
    );
    assert_eq!(status, 501);
    assert_eq!(error_type.as_deref(), Some("NotImplemented"));
    assert_eq!(
        body["message"],
        "API action 'CreateVocabulary' for service 'transcribe' not yet implemented"
    );
}

/// Smallest body that decodes and validates for each operation.
fn minimal_body(operation: Operation) -> Value {
    let media = json!({"MediaFileUri": "s3://bucket/call.wav"});
    let rules = json!([{"NonTalkTimeFilter": {"Threshold": 10000}}]);
    let arn = "arn:aws:transcribe:us-east-1:000000000000:transcription-job/j";
    match operation {
        Operation::CreateCallAnalyticsCategory | Operation::UpdateCallAnalyticsCategory => {
            json!({"CategoryName": "c", "Rules": rules})
        }
        Operation::DeleteCallAnalyticsCategory | Operation::GetCallAnalyticsCategory => {
            json!({"CategoryName": "c"})
        }
        Operation::CreateLanguageModel => json!({
            "LanguageCode": "en-US",
            "BaseModelName": "WideBand",
            "ModelName": "m",
            "InputDataConfig": {
                "S3Uri": "s3://bucket/train/",
                "DataAccessRoleArn": "arn:aws:iam::000000000000:role/r"
            }
        }),
        Operation::DeleteLanguageModel | Operation::DescribeLanguageModel => {
            json!({"ModelName": "m"})
        }
        Operation::CreateMedicalVocabulary | Operation::UpdateMedicalVocabulary => json!({
            "VocabularyName": "v",
            "LanguageCode": "en-US",
            "VocabularyFileUri": "s3://bucket/terms.txt"
        }),
        Operation::CreateVocabulary | Operation::UpdateVocabulary => {
            json!({"VocabularyName": "v", "LanguageCode": "en-US", "Phrases": ["Golem"]})
        }
        Operation::DeleteMedicalVocabulary
        | Operation::GetMedicalVocabulary
        | Operation::DeleteVocabulary
        | Operation::GetVocabulary => json!({"VocabularyName": "v"}),
        Operation::CreateVocabularyFilter => {
            json!({"VocabularyFilterName": "f", "LanguageCode": "en-US", "Words": ["darn"]})
        }
        Operation::UpdateVocabularyFilter => {
            json!({"VocabularyFilterName": "f", "Words": ["darn"]})
        }
        Operation::DeleteVocabularyFilter | Operation::GetVocabularyFilter => {
            json!({"VocabularyFilterName": "f"})
        }
        Operation::DeleteCallAnalyticsJob | Operation::GetCallAnalyticsJob => {
            json!({"CallAnalyticsJobName": "j"})
        }
        Operation::StartCallAnalyticsJob => json!({"CallAnalyticsJobName": "j", "Media": media}),
        Operation::DeleteMedicalScribeJob | Operation::GetMedicalScribeJob => {
            json!({"MedicalScribeJobName": "j"})
        }
        Operation::StartMedicalScribeJob => json!({
            "MedicalScribeJobName": "j",
            "Media": media,
            "OutputBucketName": "bucket",
            "DataAccessRoleArn": "arn:aws:iam::000000000000:role/r",
            "Settings": {"ChannelIdentification": true}
        }),
        Operation::DeleteMedicalTranscriptionJob | Operation::GetMedicalTranscriptionJob => {
            json!({"MedicalTranscriptionJobName": "j"})
        }
        Operation::StartMedicalTranscriptionJob => json!({
            "MedicalTranscriptionJobName": "j",
            "LanguageCode": "en-US",
            "Media": media,
            "OutputBucketName": "bucket",
            "Specialty": "PRIMARYCARE",
            "Type": "DICTATION"
        }),
        Operation::DeleteTranscriptionJob | Operation::GetTranscriptionJob => {
            json!({"TranscriptionJobName": "j"})
        }
        Operation::StartTranscriptionJob => {
            json!({"TranscriptionJobName": "j", "LanguageCode": "en-US", "Media": media})
        }
        Operation::ListCallAnalyticsCategories
        | Operation::ListCallAnalyticsJobs
        | Operation::ListLanguageModels
        | Operation::ListMedicalScribeJobs
        | Operation::ListMedicalTranscriptionJobs
        | Operation::ListMedicalVocabularies
        | Operation::ListTranscriptionJobs
        | Operation::ListVocabularies
        | Operation::ListVocabularyFilters => json!({}),
        Operation::ListTagsForResource => json!({"ResourceArn": arn}),
        Operation::TagResource => {
            json!({"ResourceArn": arn, "Tags": [{"Key": "team", "Value": "speech"}]})
        }
        Operation::UntagResource => json!({"ResourceArn": arn, "TagKeys": ["team"]}),
    }
}

#[test]
fn every_operation_of_the_stub_is_not_implemented() {
    for &operation in Operation::ALL {
        let (status, error_type, body) =
            call(&Unimplemented, operation.as_str(), minimal_body(operation));
        assert_eq!(status, 501, "{operation}: {body}");
        assert_eq!(error_type.as_deref(), Some("NotImplemented"), "{operation}");
        assert_eq!(
            body["message"],
            format!("API action '{operation}' for service 'transcribe' not yet implemented")
        );
    }
}

#[test]
fn supported_operations_skip_the_not_implemented_default() {
    let service = Jobs::default();
    let supported = [
        Operation::StartTranscriptionJob,
        Operation::GetTranscriptionJob,
        Operation::DeleteTranscriptionJob,
        Operation::ListTranscriptionJobs,
    ];
    for &operation in Operation::ALL {
        let (status, error_type, _) = call(&service, operation.as_str(), minimal_body(operation));
        if supported.contains(&operation) {
            assert_ne!(status, 501, "{operation}");
        } else {
            assert_eq!(status, 501, "{operation}");
            assert_eq!(error_type.as_deref(), Some("NotImplemented"));
        }
    }
}

#[test]
fn unknown_target_is_rejected() {
    let response = dispatch(
        &Unimplemented,
        &RequestContext::default(),
        "Transcribe.StartStreamTranscription",
        b"{}",
    );
    assert_eq!(response.status, 400);
    assert_eq!(response.error_type.as_deref(), Some("UnknownOperationException"));
}

#[test]
fn missing_required_member_is_a_serialization_error() {
    let (status, error_type, _) = call(
        &Jobs::default(),
        "StartTranscriptionJob",
        json!({"TranscriptionJobName": "no-media", "LanguageCode": "en-US"}),
    );
    assert_eq!(status, 400);
    assert_eq!(error_type.as_deref(), Some("SerializationException"));
}

#[test]
fn out_of_set_enum_value_is_rejected() {
    let (status, error_type, _) = call(
        &Jobs::default(),
        "StartTranscriptionJob",
        json!({
            "TranscriptionJobName": "bad-lang",
            "LanguageCode": "xx-XX",
            "Media": {"MediaFileUri": "s3://bucket/a.wav"}
        }),
    );
    assert_eq!(status, 400);
    assert_eq!(error_type.as_deref(), Some("SerializationException"));
}

#[test]
fn invalid_request_never_reaches_the_backend() {
    let service = Jobs::default();
    let (status, error_type, _) = call(
        &service,
        "StartTranscriptionJob",
        json!({
            "TranscriptionJobName": "has spaces",
            "LanguageCode": "en-US",
            "Media": {"MediaFileUri": "s3://bucket/a.wav"}
        }),
    );
    assert_eq!(status, 400);
    assert_eq!(error_type.as_deref(), Some("BadRequestException"));
    assert!(service.jobs.borrow().is_empty());
}

#[test]
fn filtered_listing_only_returns_matching_jobs() {
    let service = Jobs::default();
    for (name, language) in [("a", LanguageCode::EnUs), ("b", LanguageCode::FrFr)] {
        let request = StartTranscriptionJobRequest::new(name, Media::from_uri("s3://b/k.wav"))
            .with_language_code(language);
        service
            .start_transcription_job(&RequestContext::default(), request)
            .unwrap();
    }
    let (_, _, body) = call(&service, "ListTranscriptionJobs", json!({"Status": "COMPLETED"}));
    assert_eq!(body["TranscriptionJobSummaries"], json!([]));
    assert_eq!(body["Status"], "COMPLETED");

    let (_, _, body) = call(&service, "ListTranscriptionJobs", json!({"Status": "IN_PROGRESS"}));
    assert_eq!(body["TranscriptionJobSummaries"].as_array().unwrap().len(), 2);
}
