//! Closed value sets of the transcription API.
//!
//! Each enumeration accepts exactly the literals the service declares and
//! rejects everything else, both through [`FromStr`](std::str::FromStr) and
//! when decoding JSON.

use thiserror::Error;

/// Returned when a string is not one of the literals of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $literal:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $literal ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::enums::UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $literal => Ok($name::$variant), )+
                    _ => Err($crate::enums::UnknownVariant {
                        kind: stringify!($name),
                        value: value.to_string(),
                    }),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as serde::Deserialize>::deserialize(deserializer)?;
                value.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use closed_enum;

closed_enum! {
    /// Base model a custom language model is trained on top of.
    pub enum BaseModelName {
        NarrowBand => "NarrowBand",
        WideBand => "WideBand",
    }
}

closed_enum! {
    /// Languages supported by custom language models.
    pub enum ClmLanguageCode {
        EnUs => "en-US",
        HiIn => "hi-IN",
        EsUs => "es-US",
        EnGb => "en-GB",
        EnAu => "en-AU",
        DeDe => "de-DE",
        JaJp => "ja-JP",
    }
}

closed_enum! {
    pub enum CallAnalyticsFeature {
        GenerativeSummarization => "GENERATIVE_SUMMARIZATION",
    }
}

closed_enum! {
    /// Lifecycle of a call analytics job.
    pub enum CallAnalyticsJobStatus {
        Queued => "QUEUED",
        InProgress => "IN_PROGRESS",
        Failed => "FAILED",
        Completed => "COMPLETED",
    }
}

closed_enum! {
    pub enum CallAnalyticsSkippedReasonCode {
        InsufficientConversationContent => "INSUFFICIENT_CONVERSATION_CONTENT",
        FailedSafetyGuidelines => "FAILED_SAFETY_GUIDELINES",
    }
}

closed_enum! {
    /// Whether a category applies to streaming or post-call analytics.
    pub enum InputType {
        RealTime => "REAL_TIME",
        PostCall => "POST_CALL",
    }
}

closed_enum! {
    /// Language of the media. Batch jobs accept every value listed here.
    pub enum LanguageCode {
        AfZa => "af-ZA",
        ArAe => "ar-AE",
        ArSa => "ar-SA",
        DaDk => "da-DK",
        DeCh => "de-CH",
        DeDe => "de-DE",
        EnAb => "en-AB",
        EnAu => "en-AU",
        EnGb => "en-GB",
        EnIe => "en-IE",
        EnIn => "en-IN",
        EnUs => "en-US",
        EnWl => "en-WL",
        EsEs => "es-ES",
        EsUs => "es-US",
        FaIr => "fa-IR",
        FrCa => "fr-CA",
        FrFr => "fr-FR",
        HeIl => "he-IL",
        HiIn => "hi-IN",
        IdId => "id-ID",
        ItIt => "it-IT",
        JaJp => "ja-JP",
        KoKr => "ko-KR",
        MsMy => "ms-MY",
        NlNl => "nl-NL",
        PtBr => "pt-BR",
        PtPt => "pt-PT",
        RuRu => "ru-RU",
        TaIn => "ta-IN",
        TeIn => "te-IN",
        TrTr => "tr-TR",
        ZhCn => "zh-CN",
        ZhTw => "zh-TW",
        ThTh => "th-TH",
        EnZa => "en-ZA",
        EnNz => "en-NZ",
        ViVn => "vi-VN",
        SvSe => "sv-SE",
        AbGe => "ab-GE",
        AstEs => "ast-ES",
        AzAz => "az-AZ",
        BaRu => "ba-RU",
        BeBy => "be-BY",
        BgBg => "bg-BG",
        BnIn => "bn-IN",
        BsBa => "bs-BA",
        CaEs => "ca-ES",
        CkbIq => "ckb-IQ",
        CkbIr => "ckb-IR",
        CsCz => "cs-CZ",
        CyWl => "cy-WL",
        ElGr => "el-GR",
        EtEe => "et-EE",
        EtEt => "et-ET",
        EuEs => "eu-ES",
        FiFi => "fi-FI",
        GlEs => "gl-ES",
        GuIn => "gu-IN",
        HaNg => "ha-NG",
        HrHr => "hr-HR",
        HuHu => "hu-HU",
        HyAm => "hy-AM",
        IsIs => "is-IS",
        KaGe => "ka-GE",
        KabDz => "kab-DZ",
        KkKz => "kk-KZ",
        KnIn => "kn-IN",
        KyKg => "ky-KG",
        LgIn => "lg-IN",
        LtLt => "lt-LT",
        LvLv => "lv-LV",
        MhrRu => "mhr-RU",
        MiNz => "mi-NZ",
        MkMk => "mk-MK",
        MlIn => "ml-IN",
        MnMn => "mn-MN",
        MrIn => "mr-IN",
        MtMt => "mt-MT",
        NoNo => "no-NO",
        OrIn => "or-IN",
        PaIn => "pa-IN",
        PlPl => "pl-PL",
        PsAf => "ps-AF",
        RoRo => "ro-RO",
        RwRw => "rw-RW",
        SiLk => "si-LK",
        SkSk => "sk-SK",
        SlSi => "sl-SI",
        SoSo => "so-SO",
        SrRs => "sr-RS",
        SuId => "su-ID",
        SwBi => "sw-BI",
        SwKe => "sw-KE",
        SwRw => "sw-RW",
        SwTz => "sw-TZ",
        SwUg => "sw-UG",
        TlPh => "tl-PH",
        TtRu => "tt-RU",
        UgCn => "ug-CN",
        UkUa => "uk-UA",
        UzUz => "uz-UZ",
        WoSn => "wo-SN",
        ZhHk => "zh-HK",
        ZuZa => "zu-ZA",
    }
}

closed_enum! {
    /// Container format of the input media.
    pub enum MediaFormat {
        Mp3 => "mp3",
        Mp4 => "mp4",
        Wav => "wav",
        Flac => "flac",
        Ogg => "ogg",
        Amr => "amr",
        Webm => "webm",
        M4a => "m4a",
    }
}

closed_enum! {
    pub enum MedicalContentIdentificationType {
        Phi => "PHI",
    }
}

closed_enum! {
    /// Lifecycle of a medical scribe job.
    pub enum MedicalScribeJobStatus {
        Queued => "QUEUED",
        InProgress => "IN_PROGRESS",
        Failed => "FAILED",
        Completed => "COMPLETED",
    }
}

closed_enum! {
    pub enum MedicalScribeLanguageCode {
        EnUs => "en-US",
    }
}

closed_enum! {
    /// Layout of the clinical note a medical scribe job generates.
    pub enum MedicalScribeNoteTemplate {
        HistoryAndPhysical => "HISTORY_AND_PHYSICAL",
        Girpp => "GIRPP",
        Birp => "BIRP",
        Sirp => "SIRP",
        Dap => "DAP",
        BehavioralSoap => "BEHAVIORAL_SOAP",
        PhysicalSoap => "PHYSICAL_SOAP",
    }
}

closed_enum! {
    pub enum MedicalScribeParticipantRole {
        Patient => "PATIENT",
        Clinician => "CLINICIAN",
    }
}

closed_enum! {
    /// Training status of a custom language model.
    pub enum ModelStatus {
        InProgress => "IN_PROGRESS",
        Failed => "FAILED",
        Completed => "COMPLETED",
    }
}

closed_enum! {
    /// Where a finished transcript was written.
    pub enum OutputLocationType {
        CustomerBucket => "CUSTOMER_BUCKET",
        ServiceBucket => "SERVICE_BUCKET",
    }
}

closed_enum! {
    pub enum ParticipantRole {
        Agent => "AGENT",
        Customer => "CUSTOMER",
    }
}

closed_enum! {
    /// Personally identifiable information redacted from transcripts.
    pub enum PiiEntityType {
        BankAccountNumber => "BANK_ACCOUNT_NUMBER",
        BankRouting => "BANK_ROUTING",
        CreditDebitNumber => "CREDIT_DEBIT_NUMBER",
        CreditDebitCvv => "CREDIT_DEBIT_CVV",
        CreditDebitExpiry => "CREDIT_DEBIT_EXPIRY",
        Pin => "PIN",
        Email => "EMAIL",
        Address => "ADDRESS",
        Name => "NAME",
        Phone => "PHONE",
        Ssn => "SSN",
        All => "ALL",
    }
}

closed_enum! {
    /// Whether the unredacted transcript is kept next to the redacted one.
    pub enum RedactionOutput {
        Redacted => "redacted",
        RedactedAndUnredacted => "redacted_and_unredacted",
    }
}

closed_enum! {
    pub enum RedactionType {
        Pii => "PII",
    }
}

closed_enum! {
    pub enum SentimentValue {
        Positive => "POSITIVE",
        Negative => "NEGATIVE",
        Neutral => "NEUTRAL",
        Mixed => "MIXED",
    }
}

closed_enum! {
    pub enum Specialty {
        Primarycare => "PRIMARYCARE",
    }
}

closed_enum! {
    pub enum SubtitleFormat {
        Vtt => "vtt",
        Srt => "srt",
    }
}

closed_enum! {
    pub enum ToxicityCategory {
        All => "ALL",
    }
}

closed_enum! {
    pub enum TranscriptFilterType {
        Exact => "EXACT",
    }
}

closed_enum! {
    /// Lifecycle of a transcription or medical transcription job.
    pub enum TranscriptionJobStatus {
        Queued => "QUEUED",
        InProgress => "IN_PROGRESS",
        Failed => "FAILED",
        Completed => "COMPLETED",
    }
}

closed_enum! {
    /// Kind of medical audio: a conversation or a single-speaker dictation.
    pub enum Type {
        Conversation => "CONVERSATION",
        Dictation => "DICTATION",
    }
}

closed_enum! {
    /// How filtered words appear in a transcript.
    pub enum VocabularyFilterMethod {
        Remove => "remove",
        Mask => "mask",
        Tag => "tag",
    }
}

closed_enum! {
    /// Processing state of a custom vocabulary, set by the service.
    pub enum VocabularyState {
        Pending => "PENDING",
        Ready => "READY",
        Failed => "FAILED",
    }
}

macro_rules! job_lifecycle {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                /// `true` once the job has either completed or failed.
                pub const fn is_terminal(&self) -> bool {
                    matches!(self, $name::Completed | $name::Failed)
                }

                const fn rank(&self) -> u8 {
                    match self {
                        $name::Queued => 0,
                        $name::InProgress => 1,
                        $name::Completed | $name::Failed => 2,
                    }
                }

                /// Whether a job observed in `self` may later be observed in `next`.
                ///
                /// Status only moves forward and terminal statuses are final;
                /// observing the same status twice is always allowed.
                pub fn can_transition_to(&self, next: $name) -> bool {
                    *self == next || (!self.is_terminal() && self.rank() < next.rank())
                }
            }
        )+
    };
}

job_lifecycle!(
    TranscriptionJobStatus,
    CallAnalyticsJobStatus,
    MedicalScribeJobStatus,
);

impl ModelStatus {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, ModelStatus::Completed | ModelStatus::Failed)
    }

    pub fn can_transition_to(&self, next: ModelStatus) -> bool {
        *self == next || *self == ModelStatus::InProgress
    }
}

impl VocabularyState {
    /// `true` once the service has finished processing the vocabulary.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, VocabularyState::Ready | VocabularyState::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_keep_their_wire_spelling() {
        assert_eq!(LanguageCode::ALL.len(), 105);
        assert_eq!("en-US".parse::<LanguageCode>(), Ok(LanguageCode::EnUs));
        assert_eq!(LanguageCode::EnUs.to_string(), "en-US");
    }

    #[test]
    fn matching_is_exact() {
        let err = "en-us".parse::<LanguageCode>().unwrap_err();
        assert_eq!(err.kind, "LanguageCode");
        assert_eq!(err.to_string(), "'en-us' is not a valid LanguageCode");
        assert!("in_progress".parse::<TranscriptionJobStatus>().is_err());
    }

    #[test]
    fn json_rejects_values_outside_the_set() {
        let parsed: MediaFormat = serde_json::from_str(r#""flac""#).unwrap();
        assert_eq!(parsed, MediaFormat::Flac);
        assert!(serde_json::from_str::<MediaFormat>(r#""aiff""#).is_err());
        assert!(serde_json::from_str::<MediaFormat>("3").is_err());
    }

    #[test]
    fn every_literal_parses_back_to_itself() {
        for status in TranscriptionJobStatus::ALL {
            assert_eq!(status.as_str().parse::<TranscriptionJobStatus>(), Ok(*status));
        }
        for code in MedicalScribeLanguageCode::ALL {
            assert_eq!(code.as_str().parse::<MedicalScribeLanguageCode>(), Ok(*code));
        }
    }

    #[test]
    fn job_status_only_moves_forward() {
        use TranscriptionJobStatus::*;
        assert!(Queued.can_transition_to(InProgress));
        assert!(Queued.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Failed));
        assert!(InProgress.can_transition_to(InProgress));
        assert!(!InProgress.can_transition_to(Queued));
        assert!(!Completed.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(InProgress));
        assert!(Completed.is_terminal() && Failed.is_terminal());
        assert!(!Queued.is_terminal());
    }

    #[test]
    fn model_training_settles_once() {
        assert!(ModelStatus::InProgress.can_transition_to(ModelStatus::Completed));
        assert!(!ModelStatus::Completed.can_transition_to(ModelStatus::InProgress));
        assert!(VocabularyState::Ready.is_terminal());
        assert!(!VocabularyState::Pending.is_terminal());
    }
}
