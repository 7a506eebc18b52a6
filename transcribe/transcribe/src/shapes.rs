//! Request, response and settings records of the transcription API.
//!
//! Field names follow the service's PascalCase wire keys. `Option` fields may be
//! left out of a payload; every other field is required and decoding fails
//! without it.

use crate::enums::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Settings and entities

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AbsoluteTimeRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<i64>,
}

/// Key/value pair attached to a taggable resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChannelDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_role: Option<ParticipantRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Summarization {
    pub generate_abstractive_summary: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageIdSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_model_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentRedaction {
    pub redaction_type: RedactionType,
    pub redaction_output: RedactionOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pii_entity_types: Option<Vec<PiiEntityType>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallAnalyticsJobSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_method: Option<VocabularyFilterMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_redaction: Option<ContentRedaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_options: Option<Vec<LanguageCode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id_settings: Option<BTreeMap<LanguageCode, LanguageIdSettings>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summarization: Option<Summarization>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transcript {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_file_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacted_transcript_file_uri: Option<String>,
}

/// Location of the input media, and of its redacted copy once produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Media {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_file_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacted_media_file_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallAnalyticsSkippedFeature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<CallAnalyticsFeature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<CallAnalyticsSkippedReasonCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallAnalyticsJobDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<Vec<CallAnalyticsSkippedFeature>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallAnalyticsJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analytics_job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analytics_job_status: Option<CallAnalyticsJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analytics_job_details: Option<CallAnalyticsJobDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_sample_rate_hertz: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_format: Option<MediaFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Transcript>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified_language_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<CallAnalyticsJobSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_definitions: Option<Vec<ChannelDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallAnalyticsJobSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analytics_job_name: Option<String>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analytics_job_status: Option<CallAnalyticsJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analytics_job_details: Option<CallAnalyticsJobDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RelativeTimeRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_percentage: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_percentage: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentFilter {
    pub sentiments: Vec<SentimentValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_time_range: Option<AbsoluteTimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time_range: Option<RelativeTimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_role: Option<ParticipantRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptFilter {
    pub transcript_filter_type: TranscriptFilterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_time_range: Option<AbsoluteTimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time_range: Option<RelativeTimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_role: Option<ParticipantRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InterruptionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_role: Option<ParticipantRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_time_range: Option<AbsoluteTimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time_range: Option<RelativeTimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NonTalkTimeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_time_range: Option<AbsoluteTimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time_range: Option<RelativeTimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
}

/// A call analytics category rule. Exactly one filter is expected to be set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_talk_time_filter: Option<NonTalkTimeFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interruption_filter: Option<InterruptionFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_filter: Option<TranscriptFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_filter: Option<SentimentFilter>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClinicalNoteGenerationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_template: Option<MedicalScribeNoteTemplate>,
}

// Operations

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCallAnalyticsCategoryRequest {
    pub category_name: String,
    pub rules: Vec<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCallAnalyticsCategoryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_properties: Option<CategoryProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputDataConfig {
    pub s3_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuning_data_s3_uri: Option<String>,
    pub data_access_role_arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLanguageModelRequest {
    pub language_code: ClmLanguageCode,
    pub base_model_name: BaseModelName,
    pub model_name: String,
    pub input_data_config: InputDataConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLanguageModelResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<ClmLanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model_name: Option<BaseModelName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_data_config: Option<InputDataConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_status: Option<ModelStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateMedicalVocabularyRequest {
    pub vocabulary_name: String,
    pub language_code: LanguageCode,
    pub vocabulary_file_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateMedicalVocabularyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_state: Option<VocabularyState>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateVocabularyFilterRequest {
    pub vocabulary_filter_name: String,
    pub language_code: LanguageCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_file_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateVocabularyFilterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateVocabularyRequest {
    pub vocabulary_name: String,
    pub language_code: LanguageCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrases: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_file_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateVocabularyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_state: Option<VocabularyState>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteCallAnalyticsCategoryRequest {
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteCallAnalyticsCategoryResponse {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteCallAnalyticsJobRequest {
    pub call_analytics_job_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteCallAnalyticsJobResponse {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteLanguageModelRequest {
    pub model_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteMedicalScribeJobRequest {
    pub medical_scribe_job_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteMedicalTranscriptionJobRequest {
    pub medical_transcription_job_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteMedicalVocabularyRequest {
    pub vocabulary_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteTranscriptionJobRequest {
    pub transcription_job_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteVocabularyFilterRequest {
    pub vocabulary_filter_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteVocabularyRequest {
    pub vocabulary_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeLanguageModelRequest {
    pub model_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<ClmLanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model_name: Option<BaseModelName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_status: Option<ModelStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_availability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_data_config: Option<InputDataConfig>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeLanguageModelResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_model: Option<LanguageModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCallAnalyticsCategoryRequest {
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCallAnalyticsCategoryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_properties: Option<CategoryProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCallAnalyticsJobRequest {
    pub call_analytics_job_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCallAnalyticsJobResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analytics_job: Option<CallAnalyticsJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalScribeJobRequest {
    pub medical_scribe_job_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalScribeChannelDefinition {
    pub channel_id: i32,
    pub participant_role: MedicalScribeParticipantRole,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalScribeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_speaker_labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speaker_labels: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_identification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_method: Option<VocabularyFilterMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_note_generation_settings: Option<ClinicalNoteGenerationSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalScribeOutput {
    pub transcript_file_uri: String,
    pub clinical_document_uri: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalScribeJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_scribe_job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_scribe_job_status: Option<MedicalScribeJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<MedicalScribeLanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_scribe_output: Option<MedicalScribeOutput>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<MedicalScribeSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_definitions: Option<Vec<MedicalScribeChannelDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalScribeJobResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_scribe_job: Option<MedicalScribeJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalTranscriptionJobRequest {
    pub medical_transcription_job_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalTranscriptionSetting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_speaker_labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speaker_labels: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_identification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alternatives: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_alternatives: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalTranscript {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_file_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalTranscriptionJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_transcription_job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription_job_status: Option<TranscriptionJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_sample_rate_hertz: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_format: Option<MediaFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<MedicalTranscript>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<MedicalTranscriptionSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_identification_type: Option<MedicalContentIdentificationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<Specialty>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalTranscriptionJobResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_transcription_job: Option<MedicalTranscriptionJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalVocabularyRequest {
    pub vocabulary_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalVocabularyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_state: Option<VocabularyState>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetTranscriptionJobRequest {
    pub transcription_job_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ToxicityDetectionSettings {
    pub toxicity_categories: Vec<ToxicityCategory>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubtitlesOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<SubtitleFormat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_file_uris: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_start_index: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageCodeItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobExecutionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_deferred_execution: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_model_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_speaker_labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speaker_labels: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_identification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alternatives: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_alternatives: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_method: Option<VocabularyFilterMethod>,
}

/// A batch transcription job as reported by the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptionJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription_job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription_job_status: Option<TranscriptionJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_sample_rate_hertz: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_format: Option<MediaFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Transcript>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_settings: Option<ModelSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_execution_settings: Option<JobExecutionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_redaction: Option<ContentRedaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identify_language: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identify_multiple_languages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_options: Option<Vec<LanguageCode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified_language_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_codes: Option<Vec<LanguageCodeItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<SubtitlesOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id_settings: Option<BTreeMap<LanguageCode, LanguageIdSettings>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toxicity_detection: Option<Vec<ToxicityDetectionSettings>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetTranscriptionJobResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription_job: Option<TranscriptionJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVocabularyFilterRequest {
    pub vocabulary_filter_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVocabularyFilterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVocabularyRequest {
    pub vocabulary_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVocabularyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_state: Option<VocabularyState>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCallAnalyticsCategoriesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCallAnalyticsCategoriesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryProperties>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCallAnalyticsJobsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CallAnalyticsJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCallAnalyticsJobsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CallAnalyticsJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analytics_job_summaries: Option<Vec<CallAnalyticsJobSummary>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLanguageModelsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_equals: Option<ModelStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLanguageModelsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<LanguageModel>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalScribeJobsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MedicalScribeJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalScribeJobSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_scribe_job_name: Option<String>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<MedicalScribeLanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_scribe_job_status: Option<MedicalScribeJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalScribeJobsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MedicalScribeJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_scribe_job_summaries: Option<Vec<MedicalScribeJobSummary>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalTranscriptionJobsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TranscriptionJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalTranscriptionJobSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_transcription_job_name: Option<String>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription_job_status: Option<TranscriptionJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_location_type: Option<OutputLocationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<Specialty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_identification_type: Option<MedicalContentIdentificationType>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Type>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalTranscriptionJobsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TranscriptionJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_transcription_job_summaries: Option<Vec<MedicalTranscriptionJobSummary>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalVocabulariesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_equals: Option<VocabularyState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VocabularyInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_state: Option<VocabularyState>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalVocabulariesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VocabularyState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabularies: Option<Vec<VocabularyInfo>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTagsForResourceRequest {
    pub resource_arn: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTagsForResourceResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTranscriptionJobsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TranscriptionJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptionJobSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription_job_name: Option<String>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription_job_status: Option<TranscriptionJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_location_type: Option<OutputLocationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_redaction: Option<ContentRedaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_settings: Option<ModelSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identify_language: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identify_multiple_languages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified_language_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_codes: Option<Vec<LanguageCodeItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toxicity_detection: Option<Vec<ToxicityDetectionSettings>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTranscriptionJobsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TranscriptionJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription_job_summaries: Option<Vec<TranscriptionJobSummary>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVocabulariesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_equals: Option<VocabularyState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVocabulariesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VocabularyState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabularies: Option<Vec<VocabularyInfo>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVocabularyFiltersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VocabularyFilterInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVocabularyFiltersResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filters: Option<Vec<VocabularyFilterInfo>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartCallAnalyticsJobRequest {
    pub call_analytics_job_name: String,
    pub media: Media,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_location: Option<String>,
    #[serde(rename = "OutputEncryptionKMSKeyId", skip_serializing_if = "Option::is_none")]
    pub output_encryption_kms_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<CallAnalyticsJobSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_definitions: Option<Vec<ChannelDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartCallAnalyticsJobResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analytics_job: Option<CallAnalyticsJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartMedicalScribeJobRequest {
    pub medical_scribe_job_name: String,
    pub media: Media,
    pub output_bucket_name: String,
    #[serde(rename = "OutputEncryptionKMSKeyId", skip_serializing_if = "Option::is_none")]
    pub output_encryption_kms_key_id: Option<String>,
    #[serde(rename = "KMSEncryptionContext", skip_serializing_if = "Option::is_none")]
    pub kms_encryption_context: Option<BTreeMap<String, String>>,
    pub data_access_role_arn: String,
    pub settings: MedicalScribeSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_definitions: Option<Vec<MedicalScribeChannelDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartMedicalScribeJobResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_scribe_job: Option<MedicalScribeJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartMedicalTranscriptionJobRequest {
    pub medical_transcription_job_name: String,
    pub language_code: LanguageCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_sample_rate_hertz: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_format: Option<MediaFormat>,
    pub media: Media,
    pub output_bucket_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_key: Option<String>,
    #[serde(rename = "OutputEncryptionKMSKeyId", skip_serializing_if = "Option::is_none")]
    pub output_encryption_kms_key_id: Option<String>,
    #[serde(rename = "KMSEncryptionContext", skip_serializing_if = "Option::is_none")]
    pub kms_encryption_context: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<MedicalTranscriptionSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_identification_type: Option<MedicalContentIdentificationType>,
    pub specialty: Specialty,
    #[serde(rename = "Type")]
    pub r#type: Type,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartMedicalTranscriptionJobResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_transcription_job: Option<MedicalTranscriptionJob>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subtitles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<SubtitleFormat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_start_index: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartTranscriptionJobRequest {
    pub transcription_job_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_sample_rate_hertz: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_format: Option<MediaFormat>,
    pub media: Media,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_bucket_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_key: Option<String>,
    #[serde(rename = "OutputEncryptionKMSKeyId", skip_serializing_if = "Option::is_none")]
    pub output_encryption_kms_key_id: Option<String>,
    #[serde(rename = "KMSEncryptionContext", skip_serializing_if = "Option::is_none")]
    pub kms_encryption_context: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_settings: Option<ModelSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_execution_settings: Option<JobExecutionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_redaction: Option<ContentRedaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identify_language: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identify_multiple_languages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_options: Option<Vec<LanguageCode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<Subtitles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id_settings: Option<BTreeMap<LanguageCode, LanguageIdSettings>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toxicity_detection: Option<Vec<ToxicityDetectionSettings>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartTranscriptionJobResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription_job: Option<TranscriptionJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagResourceRequest {
    pub resource_arn: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagResourceResponse {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UntagResourceRequest {
    pub resource_arn: String,
    pub tag_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UntagResourceResponse {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCallAnalyticsCategoryRequest {
    pub category_name: String,
    pub rules: Vec<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCallAnalyticsCategoryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_properties: Option<CategoryProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateMedicalVocabularyRequest {
    pub vocabulary_name: String,
    pub language_code: LanguageCode,
    pub vocabulary_file_uri: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateMedicalVocabularyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_state: Option<VocabularyState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateVocabularyFilterRequest {
    pub vocabulary_filter_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_file_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateVocabularyFilterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateVocabularyRequest {
    pub vocabulary_name: String,
    pub language_code: LanguageCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrases: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_file_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateVocabularyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(default, with = "crate::timestamp::epoch_seconds_option", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_state: Option<VocabularyState>,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Media {
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            media_file_uri: Some(uri.into()),
            redacted_media_file_uri: None,
        }
    }
}

impl StartTranscriptionJobRequest {
    pub fn new(transcription_job_name: impl Into<String>, media: Media) -> Self {
        Self {
            transcription_job_name: transcription_job_name.into(),
            language_code: None,
            media_sample_rate_hertz: None,
            media_format: None,
            media,
            output_bucket_name: None,
            output_key: None,
            output_encryption_kms_key_id: None,
            kms_encryption_context: None,
            settings: None,
            model_settings: None,
            job_execution_settings: None,
            content_redaction: None,
            identify_language: None,
            identify_multiple_languages: None,
            language_options: None,
            subtitles: None,
            tags: None,
            language_id_settings: None,
            toxicity_detection: None,
        }
    }

    pub fn with_language_code(mut self, language_code: LanguageCode) -> Self {
        self.language_code = Some(language_code);
        self
    }

    pub fn with_media_format(mut self, media_format: MediaFormat) -> Self {
        self.media_format = Some(media_format);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }
}

impl StartMedicalTranscriptionJobRequest {
    pub fn new(
        medical_transcription_job_name: impl Into<String>,
        language_code: LanguageCode,
        media: Media,
        output_bucket_name: impl Into<String>,
        specialty: Specialty,
        r#type: Type,
    ) -> Self {
        Self {
            medical_transcription_job_name: medical_transcription_job_name.into(),
            language_code,
            media_sample_rate_hertz: None,
            media_format: None,
            media,
            output_bucket_name: output_bucket_name.into(),
            output_key: None,
            output_encryption_kms_key_id: None,
            kms_encryption_context: None,
            settings: None,
            content_identification_type: None,
            specialty,
            r#type,
            tags: None,
        }
    }
}

impl StartCallAnalyticsJobRequest {
    pub fn new(call_analytics_job_name: impl Into<String>, media: Media) -> Self {
        Self {
            call_analytics_job_name: call_analytics_job_name.into(),
            media,
            output_location: None,
            output_encryption_kms_key_id: None,
            data_access_role_arn: None,
            settings: None,
            tags: None,
            channel_definitions: None,
        }
    }
}

impl CreateVocabularyRequest {
    pub fn with_phrases(
        vocabulary_name: impl Into<String>,
        language_code: LanguageCode,
        phrases: Vec<String>,
    ) -> Self {
        Self {
            vocabulary_name: vocabulary_name.into(),
            language_code,
            phrases: Some(phrases),
            vocabulary_file_uri: None,
            tags: None,
            data_access_role_arn: None,
        }
    }
}

impl CreateVocabularyFilterRequest {
    pub fn with_words(
        vocabulary_filter_name: impl Into<String>,
        language_code: LanguageCode,
        words: Vec<String>,
    ) -> Self {
        Self {
            vocabulary_filter_name: vocabulary_filter_name.into(),
            language_code,
            words: Some(words),
            vocabulary_filter_file_uri: None,
            tags: None,
            data_access_role_arn: None,
        }
    }
}
