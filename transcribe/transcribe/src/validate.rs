//! Request checks performed before a call reaches a backend or leaves a client.

use crate::error::TranscribeError;
use crate::shapes::*;
use std::collections::HashSet;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_RESULTS: std::ops::RangeInclusive<i32> = 1..=100;
pub const MAX_ALTERNATIVES: std::ops::RangeInclusive<i32> = 2..=10;
pub const MAX_SPEAKER_LABELS: std::ops::RangeInclusive<i32> = 2..=30;
pub const SAMPLE_RATE_HERTZ: std::ops::RangeInclusive<i32> = 8000..=48000;
pub const MEDICAL_SAMPLE_RATE_HERTZ: std::ops::RangeInclusive<i32> = 16000..=48000;
pub const MAX_TAGS: usize = 200;
pub const MAX_TAG_KEY_LEN: usize = 128;
pub const MAX_TAG_VALUE_LEN: usize = 256;
pub const MAX_RULES: usize = 20;

/// Implemented by every request record. The default accepts anything.
pub trait Validate {
    fn validate(&self) -> Result<(), TranscribeError> {
        Ok(())
    }
}

/// Job, vocabulary, filter, category and model names.
pub fn validate_name(field: &str, name: &str) -> Result<(), TranscribeError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(TranscribeError::validation(format!(
            "{field} must be between 1 and {MAX_NAME_LEN} characters, got {len}"
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(TranscribeError::validation(format!(
            "{field} contains invalid character '{c}'"
        )));
    }
    Ok(())
}

fn validate_range(
    field: &str,
    value: Option<i32>,
    range: std::ops::RangeInclusive<i32>,
) -> Result<(), TranscribeError> {
    match value {
        Some(v) if !range.contains(&v) => Err(TranscribeError::validation(format!(
            "{field} must be between {} and {}, got {v}",
            range.start(),
            range.end()
        ))),
        _ => Ok(()),
    }
}

fn validate_max_results(value: Option<i32>) -> Result<(), TranscribeError> {
    validate_range("MaxResults", value, MAX_RESULTS)
}

fn validate_optional_name(field: &str, name: Option<&String>) -> Result<(), TranscribeError> {
    name.map_or(Ok(()), |n| validate_name(field, n))
}

pub fn validate_tags(tags: &[Tag]) -> Result<(), TranscribeError> {
    if tags.is_empty() || tags.len() > MAX_TAGS {
        return Err(TranscribeError::validation(format!(
            "Tags must contain between 1 and {MAX_TAGS} entries, got {}",
            tags.len()
        )));
    }
    let mut seen = HashSet::new();
    for tag in tags {
        let key_len = tag.key.chars().count();
        if key_len == 0 || key_len > MAX_TAG_KEY_LEN {
            return Err(TranscribeError::validation(format!(
                "tag key must be between 1 and {MAX_TAG_KEY_LEN} characters, got {key_len}"
            )));
        }
        if tag.value.chars().count() > MAX_TAG_VALUE_LEN {
            return Err(TranscribeError::validation(format!(
                "tag value for '{}' exceeds {MAX_TAG_VALUE_LEN} characters",
                tag.key
            )));
        }
        if !seen.insert(tag.key.as_str()) {
            return Err(TranscribeError::validation(format!(
                "duplicate tag key '{}'",
                tag.key
            )));
        }
    }
    Ok(())
}

fn validate_optional_tags(tags: Option<&Vec<Tag>>) -> Result<(), TranscribeError> {
    tags.map_or(Ok(()), |t| validate_tags(t))
}

/// Exactly one of an inline term list or a file URI.
fn validate_terms_source(
    terms_field: &str,
    terms: Option<&Vec<String>>,
    uri_field: &str,
    uri: Option<&String>,
) -> Result<(), TranscribeError> {
    match (terms, uri) {
        (Some(_), Some(_)) => Err(TranscribeError::validation(format!(
            "{terms_field} and {uri_field} are mutually exclusive"
        ))),
        (None, None) => Err(TranscribeError::validation(format!(
            "one of {terms_field} or {uri_field} is required"
        ))),
        (Some(terms), None) if terms.is_empty() => Err(TranscribeError::validation(format!(
            "{terms_field} must not be empty"
        ))),
        _ => Ok(()),
    }
}

struct SpeakerSettings {
    show_speaker_labels: Option<bool>,
    max_speaker_labels: Option<i32>,
    channel_identification: Option<bool>,
    show_alternatives: Option<bool>,
    max_alternatives: Option<i32>,
}

impl SpeakerSettings {
    fn validate(&self) -> Result<(), TranscribeError> {
        let speakers = self.show_speaker_labels.unwrap_or(false);
        if speakers && self.channel_identification.unwrap_or(false) {
            return Err(TranscribeError::validation(
                "ShowSpeakerLabels and ChannelIdentification are mutually exclusive",
            ));
        }
        match (speakers, self.max_speaker_labels.is_some()) {
            (true, false) => {
                return Err(TranscribeError::validation(
                    "ShowSpeakerLabels requires MaxSpeakerLabels",
                ))
            }
            (false, true) => {
                return Err(TranscribeError::validation(
                    "MaxSpeakerLabels requires ShowSpeakerLabels",
                ))
            }
            _ => {}
        }
        validate_range("MaxSpeakerLabels", self.max_speaker_labels, MAX_SPEAKER_LABELS)?;
        match (self.show_alternatives.unwrap_or(false), self.max_alternatives.is_some()) {
            (true, false) => {
                return Err(TranscribeError::validation(
                    "ShowAlternatives requires MaxAlternatives",
                ))
            }
            (false, true) => {
                return Err(TranscribeError::validation(
                    "MaxAlternatives requires ShowAlternatives",
                ))
            }
            _ => {}
        }
        validate_range("MaxAlternatives", self.max_alternatives, MAX_ALTERNATIVES)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_optional_name("VocabularyName", self.vocabulary_name.as_ref())?;
        validate_optional_name("VocabularyFilterName", self.vocabulary_filter_name.as_ref())?;
        SpeakerSettings {
            show_speaker_labels: self.show_speaker_labels,
            max_speaker_labels: self.max_speaker_labels,
            channel_identification: self.channel_identification,
            show_alternatives: self.show_alternatives,
            max_alternatives: self.max_alternatives,
        }
        .validate()
    }
}

impl Validate for MedicalTranscriptionSetting {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_optional_name("VocabularyName", self.vocabulary_name.as_ref())?;
        SpeakerSettings {
            show_speaker_labels: self.show_speaker_labels,
            max_speaker_labels: self.max_speaker_labels,
            channel_identification: self.channel_identification,
            show_alternatives: self.show_alternatives,
            max_alternatives: self.max_alternatives,
        }
        .validate()
    }
}

impl Validate for MedicalScribeSettings {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_optional_name("VocabularyName", self.vocabulary_name.as_ref())?;
        validate_optional_name("VocabularyFilterName", self.vocabulary_filter_name.as_ref())?;
        if !self.show_speaker_labels.unwrap_or(false)
            && !self.channel_identification.unwrap_or(false)
        {
            return Err(TranscribeError::validation(
                "medical scribe jobs need ShowSpeakerLabels or ChannelIdentification",
            ));
        }
        SpeakerSettings {
            show_speaker_labels: self.show_speaker_labels,
            max_speaker_labels: self.max_speaker_labels,
            channel_identification: self.channel_identification,
            show_alternatives: None,
            max_alternatives: None,
        }
        .validate()
    }
}

impl Validate for RelativeTimeRange {
    fn validate(&self) -> Result<(), TranscribeError> {
        for (field, value) in [
            ("StartPercentage", self.start_percentage),
            ("EndPercentage", self.end_percentage),
            ("First", self.first),
            ("Last", self.last),
        ] {
            validate_range(field, value, 0..=100)?;
        }
        Ok(())
    }
}

impl Validate for Rule {
    fn validate(&self) -> Result<(), TranscribeError> {
        let relative = [
            self.non_talk_time_filter
                .as_ref()
                .and_then(|f| f.relative_time_range.as_ref()),
            self.interruption_filter
                .as_ref()
                .and_then(|f| f.relative_time_range.as_ref()),
            self.transcript_filter
                .as_ref()
                .and_then(|f| f.relative_time_range.as_ref()),
            self.sentiment_filter
                .as_ref()
                .and_then(|f| f.relative_time_range.as_ref()),
        ];
        for range in relative.into_iter().flatten() {
            range.validate()?;
        }
        if let Some(filter) = &self.transcript_filter {
            if filter.targets.is_empty() {
                return Err(TranscribeError::validation(
                    "TranscriptFilter Targets must not be empty",
                ));
            }
        }
        if let Some(filter) = &self.sentiment_filter {
            if filter.sentiments.is_empty() {
                return Err(TranscribeError::validation(
                    "SentimentFilter Sentiments must not be empty",
                ));
            }
        }
        Ok(())
    }
}

fn validate_rules(rules: &[Rule]) -> Result<(), TranscribeError> {
    if rules.is_empty() || rules.len() > MAX_RULES {
        return Err(TranscribeError::validation(format!(
            "Rules must contain between 1 and {MAX_RULES} entries, got {}",
            rules.len()
        )));
    }
    rules.iter().try_for_each(Validate::validate)
}

impl Validate for CreateCallAnalyticsCategoryRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("CategoryName", &self.category_name)?;
        validate_rules(&self.rules)?;
        validate_optional_tags(self.tags.as_ref())
    }
}

impl Validate for UpdateCallAnalyticsCategoryRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("CategoryName", &self.category_name)?;
        validate_rules(&self.rules)
    }
}

impl Validate for CreateLanguageModelRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("ModelName", &self.model_name)?;
        validate_optional_tags(self.tags.as_ref())
    }
}

impl Validate for CreateMedicalVocabularyRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("VocabularyName", &self.vocabulary_name)?;
        validate_optional_tags(self.tags.as_ref())
    }
}

impl Validate for UpdateMedicalVocabularyRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("VocabularyName", &self.vocabulary_name)
    }
}

impl Validate for CreateVocabularyRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("VocabularyName", &self.vocabulary_name)?;
        validate_terms_source(
            "Phrases",
            self.phrases.as_ref(),
            "VocabularyFileUri",
            self.vocabulary_file_uri.as_ref(),
        )?;
        validate_optional_tags(self.tags.as_ref())
    }
}

impl Validate for UpdateVocabularyRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("VocabularyName", &self.vocabulary_name)?;
        validate_terms_source(
            "Phrases",
            self.phrases.as_ref(),
            "VocabularyFileUri",
            self.vocabulary_file_uri.as_ref(),
        )
    }
}

impl Validate for CreateVocabularyFilterRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("VocabularyFilterName", &self.vocabulary_filter_name)?;
        validate_terms_source(
            "Words",
            self.words.as_ref(),
            "VocabularyFilterFileUri",
            self.vocabulary_filter_file_uri.as_ref(),
        )?;
        validate_optional_tags(self.tags.as_ref())
    }
}

impl Validate for UpdateVocabularyFilterRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("VocabularyFilterName", &self.vocabulary_filter_name)?;
        validate_terms_source(
            "Words",
            self.words.as_ref(),
            "VocabularyFilterFileUri",
            self.vocabulary_filter_file_uri.as_ref(),
        )
    }
}

impl Validate for StartTranscriptionJobRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("TranscriptionJobName", &self.transcription_job_name)?;
        let selectors = [
            self.language_code.is_some(),
            self.identify_language.unwrap_or(false),
            self.identify_multiple_languages.unwrap_or(false),
        ];
        match selectors.iter().filter(|s| **s).count() {
            1 => {}
            0 => {
                return Err(TranscribeError::validation(
                    "one of LanguageCode, IdentifyLanguage or IdentifyMultipleLanguages is required",
                ))
            }
            _ => {
                return Err(TranscribeError::validation(
                    "LanguageCode, IdentifyLanguage and IdentifyMultipleLanguages are mutually exclusive",
                ))
            }
        }
        validate_range(
            "MediaSampleRateHertz",
            self.media_sample_rate_hertz,
            SAMPLE_RATE_HERTZ,
        )?;
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        validate_optional_tags(self.tags.as_ref())
    }
}

impl Validate for StartMedicalTranscriptionJobRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name(
            "MedicalTranscriptionJobName",
            &self.medical_transcription_job_name,
        )?;
        validate_range(
            "MediaSampleRateHertz",
            self.media_sample_rate_hertz,
            MEDICAL_SAMPLE_RATE_HERTZ,
        )?;
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        validate_optional_tags(self.tags.as_ref())
    }
}

impl Validate for StartCallAnalyticsJobRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("CallAnalyticsJobName", &self.call_analytics_job_name)?;
        if let Some(settings) = &self.settings {
            validate_optional_name("VocabularyName", settings.vocabulary_name.as_ref())?;
            validate_optional_name(
                "VocabularyFilterName",
                settings.vocabulary_filter_name.as_ref(),
            )?;
            validate_optional_name("LanguageModelName", settings.language_model_name.as_ref())?;
        }
        validate_optional_tags(self.tags.as_ref())
    }
}

impl Validate for StartMedicalScribeJobRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_name("MedicalScribeJobName", &self.medical_scribe_job_name)?;
        self.settings.validate()?;
        validate_optional_tags(self.tags.as_ref())
    }
}

impl Validate for TagResourceRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        validate_tags(&self.tags)
    }
}

impl Validate for UntagResourceRequest {
    fn validate(&self) -> Result<(), TranscribeError> {
        if self.tag_keys.is_empty() || self.tag_keys.len() > MAX_TAGS {
            return Err(TranscribeError::validation(format!(
                "TagKeys must contain between 1 and {MAX_TAGS} entries, got {}",
                self.tag_keys.len()
            )));
        }
        Ok(())
    }
}

macro_rules! validate_named {
    ($($request:ty => $field:ident as $wire:literal),* $(,)?) => {
        $(
            impl Validate for $request {
                fn validate(&self) -> Result<(), TranscribeError> {
                    validate_name($wire, &self.$field)
                }
            }
        )*
    };
}

validate_named! {
    DeleteCallAnalyticsCategoryRequest => category_name as "CategoryName",
    DeleteCallAnalyticsJobRequest => call_analytics_job_name as "CallAnalyticsJobName",
    DeleteLanguageModelRequest => model_name as "ModelName",
    DeleteMedicalScribeJobRequest => medical_scribe_job_name as "MedicalScribeJobName",
    DeleteMedicalTranscriptionJobRequest => medical_transcription_job_name as "MedicalTranscriptionJobName",
    DeleteMedicalVocabularyRequest => vocabulary_name as "VocabularyName",
    DeleteTranscriptionJobRequest => transcription_job_name as "TranscriptionJobName",
    DeleteVocabularyFilterRequest => vocabulary_filter_name as "VocabularyFilterName",
    DeleteVocabularyRequest => vocabulary_name as "VocabularyName",
    DescribeLanguageModelRequest => model_name as "ModelName",
    GetCallAnalyticsCategoryRequest => category_name as "CategoryName",
    GetCallAnalyticsJobRequest => call_analytics_job_name as "CallAnalyticsJobName",
    GetMedicalScribeJobRequest => medical_scribe_job_name as "MedicalScribeJobName",
    GetMedicalTranscriptionJobRequest => medical_transcription_job_name as "MedicalTranscriptionJobName",
    GetMedicalVocabularyRequest => vocabulary_name as "VocabularyName",
    GetTranscriptionJobRequest => transcription_job_name as "TranscriptionJobName",
    GetVocabularyFilterRequest => vocabulary_filter_name as "VocabularyFilterName",
    GetVocabularyRequest => vocabulary_name as "VocabularyName",
}

macro_rules! validate_paged {
    ($($request:ty),* $(,)?) => {
        $(
            impl Validate for $request {
                fn validate(&self) -> Result<(), TranscribeError> {
                    validate_max_results(self.max_results)
                }
            }
        )*
    };
}

validate_paged! {
    ListCallAnalyticsCategoriesRequest,
    ListCallAnalyticsJobsRequest,
    ListLanguageModelsRequest,
    ListMedicalScribeJobsRequest,
    ListMedicalTranscriptionJobsRequest,
    ListMedicalVocabulariesRequest,
    ListTranscriptionJobsRequest,
    ListVocabulariesRequest,
    ListVocabularyFiltersRequest,
}

impl Validate for ListTagsForResourceRequest {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::LanguageCode;

    fn job() -> StartTranscriptionJobRequest {
        StartTranscriptionJobRequest::new("job-1", Media::from_uri("s3://bucket/a.wav"))
            .with_language_code(LanguageCode::EnUs)
    }

    #[test]
    fn names_reject_spaces_and_overlong_values() {
        assert!(validate_name("N", "my_job.v2-final").is_ok());
        assert!(validate_name("N", "my job").is_err());
        assert!(validate_name("N", "").is_err());
        assert!(validate_name("N", &"a".repeat(201)).is_err());
        assert!(validate_name("N", &"a".repeat(200)).is_ok());
    }

    #[test]
    fn start_job_requires_exactly_one_language_selector() {
        assert!(job().validate().is_ok());

        let mut none = job();
        none.language_code = None;
        assert!(none.validate().is_err());

        let mut both = job();
        both.identify_language = Some(true);
        assert!(both.validate().is_err());

        let mut identify = job();
        identify.language_code = None;
        identify.identify_multiple_languages = Some(true);
        assert!(identify.validate().is_ok());
    }

    #[test]
    fn speaker_labels_conflict_with_channel_identification() {
        let request = job().with_settings(Settings {
            show_speaker_labels: Some(true),
            max_speaker_labels: Some(4),
            channel_identification: Some(true),
            ..Default::default()
        });
        let err = request.validate().unwrap_err();
        assert!(err.message().contains("mutually exclusive"));
    }

    #[test]
    fn speaker_labels_and_their_count_come_together() {
        let settings = |show, max| Settings {
            show_speaker_labels: show,
            max_speaker_labels: max,
            ..Default::default()
        };
        assert!(settings(Some(true), Some(2)).validate().is_ok());
        assert!(settings(None, None).validate().is_ok());
        assert!(settings(Some(false), None).validate().is_ok());

        let err = settings(Some(true), None).validate().unwrap_err();
        assert!(err.message().contains("ShowSpeakerLabels requires MaxSpeakerLabels"));
        let err = settings(None, Some(2)).validate().unwrap_err();
        assert!(err.message().contains("MaxSpeakerLabels requires ShowSpeakerLabels"));
        assert!(job().with_settings(settings(Some(true), None)).validate().is_err());
    }

    #[test]
    fn alternatives_and_their_count_come_together() {
        let err = Settings {
            show_alternatives: Some(true),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.message().contains("ShowAlternatives requires MaxAlternatives"));

        let medical = MedicalTranscriptionSetting {
            max_alternatives: Some(3),
            ..Default::default()
        };
        assert!(medical.validate().is_err());
    }

    #[test]
    fn medical_scribe_settings_need_speakers_or_channels() {
        assert!(MedicalScribeSettings::default().validate().is_err());

        let channels = MedicalScribeSettings {
            channel_identification: Some(true),
            ..Default::default()
        };
        assert!(channels.validate().is_ok());

        let speakers = MedicalScribeSettings {
            show_speaker_labels: Some(true),
            max_speaker_labels: Some(2),
            ..Default::default()
        };
        assert!(speakers.validate().is_ok());

        let unlabelled = MedicalScribeSettings {
            show_speaker_labels: Some(true),
            ..Default::default()
        };
        assert!(unlabelled.validate().is_err());
    }

    #[test]
    fn max_alternatives_bounds() {
        let settings = |n| Settings {
            show_alternatives: Some(true),
            max_alternatives: Some(n),
            ..Default::default()
        };
        assert!(settings(2).validate().is_ok());
        assert!(settings(10).validate().is_ok());
        assert!(settings(1).validate().is_err());
        assert!(settings(11).validate().is_err());
    }

    #[test]
    fn vocabulary_needs_a_single_source() {
        let inline = CreateVocabularyRequest::with_phrases(
            "terms",
            LanguageCode::EnUs,
            vec!["Los Angeles".to_string()],
        );
        assert!(inline.validate().is_ok());

        let mut both = inline.clone();
        both.vocabulary_file_uri = Some("s3://bucket/terms.txt".to_string());
        assert!(both.validate().is_err());

        let mut empty = inline;
        empty.phrases = Some(Vec::new());
        assert!(empty.validate().is_err());
    }

    #[test]
    fn duplicate_tag_keys_are_rejected() {
        let tags = vec![Tag::new("team", "a"), Tag::new("team", "b")];
        assert!(validate_tags(&tags).is_err());
        assert!(validate_tags(&[Tag::new("team", "a")]).is_ok());
        assert!(validate_tags(&[]).is_err());
    }

    #[test]
    fn list_pages_are_bounded() {
        let request = ListTranscriptionJobsRequest {
            max_results: Some(101),
            ..Default::default()
        };
        assert!(request.validate().is_err());
        assert!(ListTranscriptionJobsRequest::default().validate().is_ok());
    }

    #[test]
    fn category_rules_need_targets() {
        let rule = Rule {
            transcript_filter: Some(TranscriptFilter {
                transcript_filter_type: crate::enums::TranscriptFilterType::Exact,
                absolute_time_range: None,
                relative_time_range: None,
                participant_role: None,
                negate: None,
                targets: Vec::new(),
            }),
            ..Default::default()
        };
        let request = CreateCallAnalyticsCategoryRequest {
            category_name: "complaints".to_string(),
            rules: vec![rule],
            tags: None,
            input_type: None,
        };
        assert!(request.validate().is_err());
    }
}
