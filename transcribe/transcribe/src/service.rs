use crate::error::TranscribeError;
use crate::operation::Operation;
use crate::shapes::*;

/// Caller identity and placement attached to every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub region: String,
    pub account_id: String,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(region: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            account_id: account_id.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new("us-east-1", "000000000000")
    }
}

/// The transcription API, one method per operation.
///
/// Every method defaults to [`TranscribeError::NotImplemented`] so a backend
/// only overrides what it supports. Deletes without a response document
/// return `()`.
pub trait TranscribeApi {
    fn create_call_analytics_category(
        &self,
        _ctx: &RequestContext,
        _request: CreateCallAnalyticsCategoryRequest,
    ) -> Result<CreateCallAnalyticsCategoryResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::CreateCallAnalyticsCategory.as_str()))
    }

    fn create_language_model(
        &self,
        _ctx: &RequestContext,
        _request: CreateLanguageModelRequest,
    ) -> Result<CreateLanguageModelResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::CreateLanguageModel.as_str()))
    }

    fn create_medical_vocabulary(
        &self,
        _ctx: &RequestContext,
        _request: CreateMedicalVocabularyRequest,
    ) -> Result<CreateMedicalVocabularyResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::CreateMedicalVocabulary.as_str()))
    }

    fn create_vocabulary(
        &self,
        _ctx: &RequestContext,
        _request: CreateVocabularyRequest,
    ) -> Result<CreateVocabularyResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::CreateVocabulary.as_str()))
    }

    fn create_vocabulary_filter(
        &self,
        _ctx: &RequestContext,
        _request: CreateVocabularyFilterRequest,
    ) -> Result<CreateVocabularyFilterResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::CreateVocabularyFilter.as_str()))
    }

    fn delete_call_analytics_category(
        &self,
        _ctx: &RequestContext,
        _request: DeleteCallAnalyticsCategoryRequest,
    ) -> Result<DeleteCallAnalyticsCategoryResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::DeleteCallAnalyticsCategory.as_str()))
    }

    fn delete_call_analytics_job(
        &self,
        _ctx: &RequestContext,
        _request: DeleteCallAnalyticsJobRequest,
    ) -> Result<DeleteCallAnalyticsJobResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::DeleteCallAnalyticsJob.as_str()))
    }

    fn delete_language_model(
        &self,
        _ctx: &RequestContext,
        _request: DeleteLanguageModelRequest,
    ) -> Result<(), TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::DeleteLanguageModel.as_str()))
    }

    fn delete_medical_scribe_job(
        &self,
        _ctx: &RequestContext,
        _request: DeleteMedicalScribeJobRequest,
    ) -> Result<(), TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::DeleteMedicalScribeJob.as_str()))
    }

    fn delete_medical_transcription_job(
        &self,
        _ctx: &RequestContext,
        _request: DeleteMedicalTranscriptionJobRequest,
    ) -> Result<(), TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::DeleteMedicalTranscriptionJob.as_str()))
    }

    fn delete_medical_vocabulary(
        &self,
        _ctx: &RequestContext,
        _request: DeleteMedicalVocabularyRequest,
    ) -> Result<(), TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::DeleteMedicalVocabulary.as_str()))
    }

    fn delete_transcription_job(
        &self,
        _ctx: &RequestContext,
        _request: DeleteTranscriptionJobRequest,
    ) -> Result<(), TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::DeleteTranscriptionJob.as_str()))
    }

    fn delete_vocabulary(
        &self,
        _ctx: &RequestContext,
        _request: DeleteVocabularyRequest,
    ) -> Result<(), TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::DeleteVocabulary.as_str()))
    }

    fn delete_vocabulary_filter(
        &self,
        _ctx: &RequestContext,
        _request: DeleteVocabularyFilterRequest,
    ) -> Result<(), TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::DeleteVocabularyFilter.as_str()))
    }

    fn describe_language_model(
        &self,
        _ctx: &RequestContext,
        _request: DescribeLanguageModelRequest,
    ) -> Result<DescribeLanguageModelResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::DescribeLanguageModel.as_str()))
    }

    fn get_call_analytics_category(
        &self,
        _ctx: &RequestContext,
        _request: GetCallAnalyticsCategoryRequest,
    ) -> Result<GetCallAnalyticsCategoryResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::GetCallAnalyticsCategory.as_str()))
    }

    fn get_call_analytics_job(
        &self,
        _ctx: &RequestContext,
        _request: GetCallAnalyticsJobRequest,
    ) -> Result<GetCallAnalyticsJobResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::GetCallAnalyticsJob.as_str()))
    }

    fn get_medical_scribe_job(
        &self,
        _ctx: &RequestContext,
        _request: GetMedicalScribeJobRequest,
    ) -> Result<GetMedicalScribeJobResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::GetMedicalScribeJob.as_str()))
    }

    fn get_medical_transcription_job(
        &self,
        _ctx: &RequestContext,
        _request: GetMedicalTranscriptionJobRequest,
    ) -> Result<GetMedicalTranscriptionJobResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::GetMedicalTranscriptionJob.as_str()))
    }

    fn get_medical_vocabulary(
        &self,
        _ctx: &RequestContext,
        _request: GetMedicalVocabularyRequest,
    ) -> Result<GetMedicalVocabularyResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::GetMedicalVocabulary.as_str()))
    }

    fn get_transcription_job(
        &self,
        _ctx: &RequestContext,
        _request: GetTranscriptionJobRequest,
    ) -> Result<GetTranscriptionJobResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::GetTranscriptionJob.as_str()))
    }

    fn get_vocabulary(
        &self,
        _ctx: &RequestContext,
        _request: GetVocabularyRequest,
    ) -> Result<GetVocabularyResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::GetVocabulary.as_str()))
    }

    fn get_vocabulary_filter(
        &self,
        _ctx: &RequestContext,
        _request: GetVocabularyFilterRequest,
    ) -> Result<GetVocabularyFilterResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::GetVocabularyFilter.as_str()))
    }

    fn list_call_analytics_categories(
        &self,
        _ctx: &RequestContext,
        _request: ListCallAnalyticsCategoriesRequest,
    ) -> Result<ListCallAnalyticsCategoriesResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::ListCallAnalyticsCategories.as_str()))
    }

    fn list_call_analytics_jobs(
        &self,
        _ctx: &RequestContext,
        _request: ListCallAnalyticsJobsRequest,
    ) -> Result<ListCallAnalyticsJobsResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::ListCallAnalyticsJobs.as_str()))
    }

    fn list_language_models(
        &self,
        _ctx: &RequestContext,
        _request: ListLanguageModelsRequest,
    ) -> Result<ListLanguageModelsResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::ListLanguageModels.as_str()))
    }

    fn list_medical_scribe_jobs(
        &self,
        _ctx: &RequestContext,
        _request: ListMedicalScribeJobsRequest,
    ) -> Result<ListMedicalScribeJobsResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::ListMedicalScribeJobs.as_str()))
    }

    fn list_medical_transcription_jobs(
        &self,
        _ctx: &RequestContext,
        _request: ListMedicalTranscriptionJobsRequest,
    ) -> Result<ListMedicalTranscriptionJobsResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::ListMedicalTranscriptionJobs.as_str()))
    }

    fn list_medical_vocabularies(
        &self,
        _ctx: &RequestContext,
        _request: ListMedicalVocabulariesRequest,
    ) -> Result<ListMedicalVocabulariesResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::ListMedicalVocabularies.as_str()))
    }

    fn list_tags_for_resource(
        &self,
        _ctx: &RequestContext,
        _request: ListTagsForResourceRequest,
    ) -> Result<ListTagsForResourceResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::ListTagsForResource.as_str()))
    }

    fn list_transcription_jobs(
        &self,
        _ctx: &RequestContext,
        _request: ListTranscriptionJobsRequest,
    ) -> Result<ListTranscriptionJobsResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::ListTranscriptionJobs.as_str()))
    }

    fn list_vocabularies(
        &self,
        _ctx: &RequestContext,
        _request: ListVocabulariesRequest,
    ) -> Result<ListVocabulariesResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::ListVocabularies.as_str()))
    }

    fn list_vocabulary_filters(
        &self,
        _ctx: &RequestContext,
        _request: ListVocabularyFiltersRequest,
    ) -> Result<ListVocabularyFiltersResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::ListVocabularyFilters.as_str()))
    }

    fn start_call_analytics_job(
        &self,
        _ctx: &RequestContext,
        _request: StartCallAnalyticsJobRequest,
    ) -> Result<StartCallAnalyticsJobResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::StartCallAnalyticsJob.as_str()))
    }

    fn start_medical_scribe_job(
        &self,
        _ctx: &RequestContext,
        _request: StartMedicalScribeJobRequest,
    ) -> Result<StartMedicalScribeJobResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::StartMedicalScribeJob.as_str()))
    }

    fn start_medical_transcription_job(
        &self,
        _ctx: &RequestContext,
        _request: StartMedicalTranscriptionJobRequest,
    ) -> Result<StartMedicalTranscriptionJobResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::StartMedicalTranscriptionJob.as_str()))
    }

    fn start_transcription_job(
        &self,
        _ctx: &RequestContext,
        _request: StartTranscriptionJobRequest,
    ) -> Result<StartTranscriptionJobResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::StartTranscriptionJob.as_str()))
    }

    fn tag_resource(
        &self,
        _ctx: &RequestContext,
        _request: TagResourceRequest,
    ) -> Result<TagResourceResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::TagResource.as_str()))
    }

    fn untag_resource(
        &self,
        _ctx: &RequestContext,
        _request: UntagResourceRequest,
    ) -> Result<UntagResourceResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::UntagResource.as_str()))
    }

    fn update_call_analytics_category(
        &self,
        _ctx: &RequestContext,
        _request: UpdateCallAnalyticsCategoryRequest,
    ) -> Result<UpdateCallAnalyticsCategoryResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::UpdateCallAnalyticsCategory.as_str()))
    }

    fn update_medical_vocabulary(
        &self,
        _ctx: &RequestContext,
        _request: UpdateMedicalVocabularyRequest,
    ) -> Result<UpdateMedicalVocabularyResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::UpdateMedicalVocabulary.as_str()))
    }

    fn update_vocabulary(
        &self,
        _ctx: &RequestContext,
        _request: UpdateVocabularyRequest,
    ) -> Result<UpdateVocabularyResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::UpdateVocabulary.as_str()))
    }

    fn update_vocabulary_filter(
        &self,
        _ctx: &RequestContext,
        _request: UpdateVocabularyFilterRequest,
    ) -> Result<UpdateVocabularyFilterResponse, TranscribeError> {
        Err(TranscribeError::not_implemented(Operation::UpdateVocabularyFilter.as_str()))
    }
}

/// Backend that supports nothing; every call fails with `NotImplemented`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unimplemented;

impl TranscribeApi for Unimplemented {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{LanguageCode, MedicalContentIdentificationType, Specialty, Type};

    #[test]
    fn defaults_report_the_operation_name() {
        let ctx = RequestContext::default();
        let err = Unimplemented
            .delete_vocabulary(&ctx, DeleteVocabularyRequest {
                vocabulary_name: "v".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, TranscribeError::not_implemented("DeleteVocabulary"));
        assert_eq!(
            err.message(),
            "API action 'DeleteVocabulary' for service 'transcribe' not yet implemented"
        );
    }

    #[test]
    fn medical_start_is_stubbed_like_the_rest() {
        let mut request = StartMedicalTranscriptionJobRequest::new(
            "job",
            LanguageCode::EnUs,
            Media::from_uri("s3://bucket/a.wav"),
            "out",
            Specialty::Primarycare,
            Type::Dictation,
        );
        request.content_identification_type = Some(MedicalContentIdentificationType::Phi);
        let err = Unimplemented
            .start_medical_transcription_job(&RequestContext::default(), request)
            .unwrap_err();
        assert!(matches!(
            err,
            TranscribeError::NotImplemented { ref operation } if operation == "StartMedicalTranscriptionJob"
        ));
        assert_eq!(err.status_code(), 501);
    }

    #[test]
    fn request_id_is_attached_on_demand() {
        let ctx = RequestContext::new("eu-west-1", "123456789012").with_request_id("req-1");
        assert_eq!(ctx.request_id.as_deref(), Some("req-1"));
        assert_eq!(ctx.region, "eu-west-1");
    }
}
