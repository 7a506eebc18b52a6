use crate::config::AwsConfig;
use crate::error::{from_reqwest_error, map_error_response};
use crate::sigv4::{sign, SigV4Params};
use chrono::{DateTime, Utc};
use golem_transcribe::operation::{Operation, CONTENT_TYPE, SERVICE_NAME};
use golem_transcribe::shapes::*;
use golem_transcribe::{
    init_logging_from_env, RequestContext, TranscribeApi, TranscribeError, Validate,
};
use log::{debug, trace, warn};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Signed JSON 1.1 client for the AWS Transcribe batch API.
pub struct AwsTranscribeClient {
    config: AwsConfig,
    client: Client,
    url: Url,
    host: String,
    clock: fn() -> DateTime<Utc>,
}

impl AwsTranscribeClient {
    pub fn new(config: AwsConfig) -> Result<Self, TranscribeError> {
        let url = Url::parse(&config.endpoint())
            .map_err(|e| TranscribeError::validation(format!("invalid endpoint: {e}")))?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(TranscribeError::validation(format!(
                    "endpoint {url} has no host"
                )))
            }
        };
        let client = Client::builder()
            .timeout(config.common.timeout())
            .build()
            .map_err(|e| from_reqwest_error("failed to build http client", e))?;
        Ok(Self {
            config,
            client,
            url,
            host,
            clock: Utc::now,
        })
    }

    /// Loads the configuration from the environment and installs the logger
    /// at `TRANSCRIBE_PROVIDER_LOG_LEVEL`.
    pub fn from_env() -> Result<Self, TranscribeError> {
        let config = AwsConfig::load()?;
        init_logging_from_env(config.common.log_level.clone());
        Self::new(config)
    }

    /// Replaces the clock used to date signatures.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &AwsConfig {
        &self.config
    }

    fn call<Req, Resp>(
        &self,
        ctx: &RequestContext,
        operation: Operation,
        request: &Req,
    ) -> Result<Resp, TranscribeError>
    where
        Req: Serialize + Validate,
        Resp: DeserializeOwned,
    {
        let text = self.execute(ctx, operation, request)?;
        let text = if text.trim().is_empty() { "{}" } else { text.as_str() };
        serde_json::from_str(text)
            .map_err(|e| TranscribeError::serialization(format!("invalid {operation} response"), e))
    }

    fn call_unit<Req>(
        &self,
        ctx: &RequestContext,
        operation: Operation,
        request: &Req,
    ) -> Result<(), TranscribeError>
    where
        Req: Serialize + Validate,
    {
        self.execute(ctx, operation, request).map(|_| ())
    }

    fn execute<Req>(
        &self,
        ctx: &RequestContext,
        operation: Operation,
        request: &Req,
    ) -> Result<String, TranscribeError>
    where
        Req: Serialize + Validate,
    {
        request.validate()?;
        let body = serde_json::to_vec(request)
            .map_err(|e| TranscribeError::serialization(format!("invalid {operation} request"), e))?;
        debug!(
            "Calling {operation} in {} (request id {:?})",
            self.config.region, ctx.request_id
        );
        trace!("{operation} request: {}", String::from_utf8_lossy(&body));

        self.retrying(operation, |attempt| {
            trace!("{operation} attempt {attempt}");
            self.send_once(operation, &body)
        })
    }

    fn send_once(&self, operation: Operation, body: &[u8]) -> Result<String, TranscribeError> {
        let target = operation.target();
        let params = SigV4Params {
            access_key: &self.config.access_key_id,
            secret_key: &self.config.secret_access_key,
            session_token: self.config.session_token.as_deref(),
            region: &self.config.region,
            service: SERVICE_NAME,
        };
        let signed = sign(
            &params,
            "POST",
            self.url.path(),
            &[
                ("content-type", CONTENT_TYPE),
                ("host", &self.host),
                ("x-amz-target", &target),
            ],
            body,
            (self.clock)(),
        )?;

        let mut builder = self
            .client
            .post(self.url.clone())
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", &target)
            .header("X-Amz-Date", &signed.amz_date)
            .header("Authorization", &signed.authorization)
            .body(body.to_vec());
        if let Some(token) = &signed.security_token {
            builder = builder.header("X-Amz-Security-Token", token);
        }

        let response = builder
            .send()
            .map_err(|e| from_reqwest_error("network send error", e))?;
        let status = response.status();
        let error_type = response
            .headers()
            .get("x-amzn-errortype")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response
            .text()
            .map_err(|e| from_reqwest_error("read body error", e))?;
        trace!("{operation} response {status}: {text}");

        if status.is_success() {
            Ok(text)
        } else {
            Err(map_error_response(status.as_u16(), error_type.as_deref(), &text))
        }
    }

    fn retrying<T>(
        &self,
        operation: Operation,
        mut f: impl FnMut(u32) -> Result<T, TranscribeError>,
    ) -> Result<T, TranscribeError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match f(attempt) {
                Ok(v) => return Ok(v),
                Err(e) => {
                    if attempt > self.config.common.max_retries || !e.is_retryable() {
                        warn!("{operation} failed after {attempt} attempt(s): {e}");
                        return Err(e);
                    }
                    let backoff = backoff_delay(attempt);
                    debug!("retryable error on attempt {attempt}: {e:?}, backing off {backoff:?}");
                    std::thread::sleep(backoff);
                }
            }
        }
    }
}

/// Exponential backoff from 100ms, capped at 32 times the base, plus a
/// deterministic jitter below 100ms.
pub fn backoff_delay(attempt: u32) -> Duration {
    let base = 100u64;
    let exp = base.saturating_mul(1u64 << (attempt.min(6).saturating_sub(1)));
    let mut x = exp.wrapping_mul(0x9E3779B97F4A7C15);
    x ^= x >> 33;
    x = x.wrapping_mul(0xC2B2AE3D27D4EB4F);
    let jitter = x % 100;
    Duration::from_millis(exp + jitter)
}

macro_rules! remote_operations {
    (@method $op:ident, $method:ident, $request:ty, ()) => {
        fn $method(&self, ctx: &RequestContext, request: $request) -> Result<(), TranscribeError> {
            self.call_unit(ctx, Operation::$op, &request)
        }
    };
    (@method $op:ident, $method:ident, $request:ty, $response:ident) => {
        fn $method(
            &self,
            ctx: &RequestContext,
            request: $request,
        ) -> Result<$response, TranscribeError> {
            self.call(ctx, Operation::$op, &request)
        }
    };
    ($($op:ident => $method:ident($request:ty) -> $response:tt;)*) => {
        impl TranscribeApi for AwsTranscribeClient {
            $(
                remote_operations!(@method $op, $method, $request, $response);
            )*
        }
    };
}

remote_operations! {
    CreateCallAnalyticsCategory => create_call_analytics_category(CreateCallAnalyticsCategoryRequest) -> CreateCallAnalyticsCategoryResponse;
    CreateLanguageModel => create_language_model(CreateLanguageModelRequest) -> CreateLanguageModelResponse;
    CreateMedicalVocabulary => create_medical_vocabulary(CreateMedicalVocabularyRequest) -> CreateMedicalVocabularyResponse;
    CreateVocabulary => create_vocabulary(CreateVocabularyRequest) -> CreateVocabularyResponse;
    CreateVocabularyFilter => create_vocabulary_filter(CreateVocabularyFilterRequest) -> CreateVocabularyFilterResponse;
    DeleteCallAnalyticsCategory => delete_call_analytics_category(DeleteCallAnalyticsCategoryRequest) -> DeleteCallAnalyticsCategoryResponse;
    DeleteCallAnalyticsJob => delete_call_analytics_job(DeleteCallAnalyticsJobRequest) -> DeleteCallAnalyticsJobResponse;
    DeleteLanguageModel => delete_language_model(DeleteLanguageModelRequest) -> ();
    DeleteMedicalScribeJob => delete_medical_scribe_job(DeleteMedicalScribeJobRequest) -> ();
    DeleteMedicalTranscriptionJob => delete_medical_transcription_job(DeleteMedicalTranscriptionJobRequest) -> ();
    DeleteMedicalVocabulary => delete_medical_vocabulary(DeleteMedicalVocabularyRequest) -> ();
    DeleteTranscriptionJob => delete_transcription_job(DeleteTranscriptionJobRequest) -> ();
    DeleteVocabulary => delete_vocabulary(DeleteVocabularyRequest) -> ();
    DeleteVocabularyFilter => delete_vocabulary_filter(DeleteVocabularyFilterRequest) -> ();
    DescribeLanguageModel => describe_language_model(DescribeLanguageModelRequest) -> DescribeLanguageModelResponse;
    GetCallAnalyticsCategory => get_call_analytics_category(GetCallAnalyticsCategoryRequest) -> GetCallAnalyticsCategoryResponse;
    GetCallAnalyticsJob => get_call_analytics_job(GetCallAnalyticsJobRequest) -> GetCallAnalyticsJobResponse;
    GetMedicalScribeJob => get_medical_scribe_job(GetMedicalScribeJobRequest) -> GetMedicalScribeJobResponse;
    GetMedicalTranscriptionJob => get_medical_transcription_job(GetMedicalTranscriptionJobRequest) -> GetMedicalTranscriptionJobResponse;
    GetMedicalVocabulary => get_medical_vocabulary(GetMedicalVocabularyRequest) -> GetMedicalVocabularyResponse;
    GetTranscriptionJob => get_transcription_job(GetTranscriptionJobRequest) -> GetTranscriptionJobResponse;
    GetVocabulary => get_vocabulary(GetVocabularyRequest) -> GetVocabularyResponse;
    GetVocabularyFilter => get_vocabulary_filter(GetVocabularyFilterRequest) -> GetVocabularyFilterResponse;
    ListCallAnalyticsCategories => list_call_analytics_categories(ListCallAnalyticsCategoriesRequest) -> ListCallAnalyticsCategoriesResponse;
    ListCallAnalyticsJobs => list_call_analytics_jobs(ListCallAnalyticsJobsRequest) -> ListCallAnalyticsJobsResponse;
    ListLanguageModels => list_language_models(ListLanguageModelsRequest) -> ListLanguageModelsResponse;
    ListMedicalScribeJobs => list_medical_scribe_jobs(ListMedicalScribeJobsRequest) -> ListMedicalScribeJobsResponse;
    ListMedicalTranscriptionJobs => list_medical_transcription_jobs(ListMedicalTranscriptionJobsRequest) -> ListMedicalTranscriptionJobsResponse;
    ListMedicalVocabularies => list_medical_vocabularies(ListMedicalVocabulariesRequest) -> ListMedicalVocabulariesResponse;
    ListTagsForResource => list_tags_for_resource(ListTagsForResourceRequest) -> ListTagsForResourceResponse;
    ListTranscriptionJobs => list_transcription_jobs(ListTranscriptionJobsRequest) -> ListTranscriptionJobsResponse;
    ListVocabularies => list_vocabularies(ListVocabulariesRequest) -> ListVocabulariesResponse;
    ListVocabularyFilters => list_vocabulary_filters(ListVocabularyFiltersRequest) -> ListVocabularyFiltersResponse;
    StartCallAnalyticsJob => start_call_analytics_job(StartCallAnalyticsJobRequest) -> StartCallAnalyticsJobResponse;
    StartMedicalScribeJob => start_medical_scribe_job(StartMedicalScribeJobRequest) -> StartMedicalScribeJobResponse;
    StartMedicalTranscriptionJob => start_medical_transcription_job(StartMedicalTranscriptionJobRequest) -> StartMedicalTranscriptionJobResponse;
    StartTranscriptionJob => start_transcription_job(StartTranscriptionJobRequest) -> StartTranscriptionJobResponse;
    TagResource => tag_resource(TagResourceRequest) -> TagResourceResponse;
    UntagResource => untag_resource(UntagResourceRequest) -> UntagResourceResponse;
    UpdateCallAnalyticsCategory => update_call_analytics_category(UpdateCallAnalyticsCategoryRequest) -> UpdateCallAnalyticsCategoryResponse;
    UpdateMedicalVocabulary => update_medical_vocabulary(UpdateMedicalVocabularyRequest) -> UpdateMedicalVocabularyResponse;
    UpdateVocabulary => update_vocabulary(UpdateVocabularyRequest) -> UpdateVocabularyResponse;
    UpdateVocabularyFilter => update_vocabulary_filter(UpdateVocabularyFilterRequest) -> UpdateVocabularyFilterResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_and_caps() {
        let first = backoff_delay(1);
        assert!(first >= Duration::from_millis(100) && first < Duration::from_millis(200));
        assert!(backoff_delay(3) >= Duration::from_millis(400));
        assert_eq!(backoff_delay(6), backoff_delay(60));
        assert!(backoff_delay(60) < Duration::from_millis(3300));
    }
}
