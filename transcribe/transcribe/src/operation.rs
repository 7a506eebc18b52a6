//! Operation names and the JSON 1.1 protocol constants of the service.

use crate::enums::closed_enum;

pub const SERVICE_NAME: &str = "transcribe";
pub const API_VERSION: &str = "2017-10-26";
pub const TARGET_PREFIX: &str = "Transcribe";
pub const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

closed_enum! {
    /// Every operation of the service, named as on the wire.
    pub enum Operation {
        CreateCallAnalyticsCategory => "CreateCallAnalyticsCategory",
        CreateLanguageModel => "CreateLanguageModel",
        CreateMedicalVocabulary => "CreateMedicalVocabulary",
        CreateVocabulary => "CreateVocabulary",
        CreateVocabularyFilter => "CreateVocabularyFilter",
        DeleteCallAnalyticsCategory => "DeleteCallAnalyticsCategory",
        DeleteCallAnalyticsJob => "DeleteCallAnalyticsJob",
        DeleteLanguageModel => "DeleteLanguageModel",
        DeleteMedicalScribeJob => "DeleteMedicalScribeJob",
        DeleteMedicalTranscriptionJob => "DeleteMedicalTranscriptionJob",
        DeleteMedicalVocabulary => "DeleteMedicalVocabulary",
        DeleteTranscriptionJob => "DeleteTranscriptionJob",
        DeleteVocabulary => "DeleteVocabulary",
        DeleteVocabularyFilter => "DeleteVocabularyFilter",
        DescribeLanguageModel => "DescribeLanguageModel",
        GetCallAnalyticsCategory => "GetCallAnalyticsCategory",
        GetCallAnalyticsJob => "GetCallAnalyticsJob",
        GetMedicalScribeJob => "GetMedicalScribeJob",
        GetMedicalTranscriptionJob => "GetMedicalTranscriptionJob",
        GetMedicalVocabulary => "GetMedicalVocabulary",
        GetTranscriptionJob => "GetTranscriptionJob",
        GetVocabulary => "GetVocabulary",
        GetVocabularyFilter => "GetVocabularyFilter",
        ListCallAnalyticsCategories => "ListCallAnalyticsCategories",
        ListCallAnalyticsJobs => "ListCallAnalyticsJobs",
        ListLanguageModels => "ListLanguageModels",
        ListMedicalScribeJobs => "ListMedicalScribeJobs",
        ListMedicalTranscriptionJobs => "ListMedicalTranscriptionJobs",
        ListMedicalVocabularies => "ListMedicalVocabularies",
        ListTagsForResource => "ListTagsForResource",
        ListTranscriptionJobs => "ListTranscriptionJobs",
        ListVocabularies => "ListVocabularies",
        ListVocabularyFilters => "ListVocabularyFilters",
        StartCallAnalyticsJob => "StartCallAnalyticsJob",
        StartMedicalScribeJob => "StartMedicalScribeJob",
        StartMedicalTranscriptionJob => "StartMedicalTranscriptionJob",
        StartTranscriptionJob => "StartTranscriptionJob",
        TagResource => "TagResource",
        UntagResource => "UntagResource",
        UpdateCallAnalyticsCategory => "UpdateCallAnalyticsCategory",
        UpdateMedicalVocabulary => "UpdateMedicalVocabulary",
        UpdateVocabulary => "UpdateVocabulary",
        UpdateVocabularyFilter => "UpdateVocabularyFilter",
    }
}

impl Operation {
    /// Value of the `X-Amz-Target` header selecting this operation.
    pub fn target(&self) -> String {
        format!("{TARGET_PREFIX}.{}", self.as_str())
    }

    /// Resolves an `X-Amz-Target` header value.
    pub fn from_target(target: &str) -> Option<Operation> {
        let (prefix, name) = target.trim().split_once('.')?;
        if prefix != TARGET_PREFIX {
            return None;
        }
        name.parse().ok()
    }
}
