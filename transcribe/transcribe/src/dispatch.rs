//! Routes `awsJson1_1` requests onto a [`TranscribeApi`] implementation.

use crate::error::TranscribeError;
use crate::operation::Operation;
use crate::service::{RequestContext, TranscribeApi};
use crate::validate::Validate;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Outcome of a dispatched call, ready to be written as an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResponse {
    pub status: u16,
    /// `X-Amzn-ErrorType` value; set only for failures.
    pub error_type: Option<String>,
    pub body: String,
}

impl DispatchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn failure(err: &TranscribeError) -> Self {
        let body = serde_json::to_string(&err.to_body())
            .unwrap_or_else(|_| format!(r#"{{"__type":"{}"}}"#, err.code()));
        DispatchResponse {
            status: err.status_code(),
            error_type: Some(err.code().to_string()),
            body,
        }
    }
}

/// Decodes `body` for the operation named by `target`, invokes it and encodes
/// the result. Never panics; every failure becomes an error document.
pub fn dispatch<S: TranscribeApi + ?Sized>(
    service: &S,
    ctx: &RequestContext,
    target: &str,
    body: &[u8],
) -> DispatchResponse {
    let Some(operation) = Operation::from_target(target) else {
        warn!("Rejecting unknown target {target:?}");
        return DispatchResponse::failure(&TranscribeError::UnknownOperation(target.to_string()));
    };

    debug!(
        "Dispatching {operation} in {} for account {} (request id {:?})",
        ctx.region, ctx.account_id, ctx.request_id
    );

    match invoke(service, ctx, operation, body) {
        Ok(body) => DispatchResponse {
            status: 200,
            error_type: None,
            body,
        },
        Err(err) => {
            warn!("{operation} failed: {err}");
            DispatchResponse::failure(&err)
        }
    }
}

fn decode<T: DeserializeOwned + Validate>(
    operation: Operation,
    body: &[u8],
) -> Result<T, TranscribeError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };
    let request: T = serde_json::from_slice(body)
        .map_err(|e| TranscribeError::serialization(format!("invalid {operation} request"), e))?;
    request.validate()?;
    Ok(request)
}

fn encode<T: Serialize>(operation: Operation, response: T) -> Result<String, TranscribeError> {
    let value = serde_json::to_value(response)
        .map_err(|e| TranscribeError::serialization(format!("invalid {operation} response"), e))?;
    if value.is_null() {
        return Ok("{}".to_string());
    }
    Ok(value.to_string())
}

macro_rules! route {
    ($service:ident, $ctx:ident, $operation:ident, $body:ident; $($op:ident => $method:ident,)*) => {
        match $operation {
            $(
                Operation::$op => {
                    let request = decode($operation, $body)?;
                    encode($operation, $service.$method($ctx, request)?)
                }
            )*
        }
    };
}

fn invoke<S: TranscribeApi + ?Sized>(
    service: &S,
    ctx: &RequestContext,
    operation: Operation,
    body: &[u8],
) -> Result<String, TranscribeError> {
    route! { service, ctx, operation, body;
        CreateCallAnalyticsCategory => create_call_analytics_category,
        CreateLanguageModel => create_language_model,
        CreateMedicalVocabulary => create_medical_vocabulary,
        CreateVocabulary => create_vocabulary,
        CreateVocabularyFilter => create_vocabulary_filter,
        DeleteCallAnalyticsCategory => delete_call_analytics_category,
        DeleteCallAnalyticsJob => delete_call_analytics_job,
        DeleteLanguageModel => delete_language_model,
        DeleteMedicalScribeJob => delete_medical_scribe_job,
        DeleteMedicalTranscriptionJob => delete_medical_transcription_job,
        DeleteMedicalVocabulary => delete_medical_vocabulary,
        DeleteTranscriptionJob => delete_transcription_job,
        DeleteVocabulary => delete_vocabulary,
        DeleteVocabularyFilter => delete_vocabulary_filter,
        DescribeLanguageModel => describe_language_model,
        GetCallAnalyticsCategory => get_call_analytics_category,
        GetCallAnalyticsJob => get_call_analytics_job,
        GetMedicalScribeJob => get_medical_scribe_job,
        GetMedicalTranscriptionJob => get_medical_transcription_job,
        GetMedicalVocabulary => get_medical_vocabulary,
        GetTranscriptionJob => get_transcription_job,
        GetVocabulary => get_vocabulary,
        GetVocabularyFilter => get_vocabulary_filter,
        ListCallAnalyticsCategories => list_call_analytics_categories,
        ListCallAnalyticsJobs => list_call_analytics_jobs,
        ListLanguageModels => list_language_models,
        ListMedicalScribeJobs => list_medical_scribe_jobs,
        ListMedicalTranscriptionJobs => list_medical_transcription_jobs,
        ListMedicalVocabularies => list_medical_vocabularies,
        ListTagsForResource => list_tags_for_resource,
        ListTranscriptionJobs => list_transcription_jobs,
        ListVocabularies => list_vocabularies,
        ListVocabularyFilters => list_vocabulary_filters,
        StartCallAnalyticsJob => start_call_analytics_job,
        StartMedicalScribeJob => start_medical_scribe_job,
        StartMedicalTranscriptionJob => start_medical_transcription_job,
        StartTranscriptionJob => start_transcription_job,
        TagResource => tag_resource,
        UntagResource => untag_resource,
        UpdateCallAnalyticsCategory => update_call_analytics_category,
        UpdateMedicalVocabulary => update_medical_vocabulary,
        UpdateVocabulary => update_vocabulary,
        UpdateVocabularyFilter => update_vocabulary_filter,
    }
}
