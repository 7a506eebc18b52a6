use golem_transcribe::config::CommonConfig;
use golem_transcribe::TranscribeError;

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub common: CommonConfig,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub region: String,
}

impl AwsConfig {
    pub fn load() -> Result<Self, TranscribeError> {
        let common = CommonConfig::from_env()?;
        let access_key_id = required("AWS_ACCESS_KEY_ID")?;
        let secret_access_key = required("AWS_SECRET_ACCESS_KEY")?;
        let session_token = std::env::var("AWS_SESSION_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        let region = std::env::var("AWS_REGION")
            .ok()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        Ok(Self {
            common,
            access_key_id,
            secret_access_key,
            session_token,
            region,
        })
    }

    /// The configured override, or the regional public endpoint.
    pub fn endpoint(&self) -> String {
        self.common
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://transcribe.{}.amazonaws.com", self.region))
    }
}

fn required(name: &str) -> Result<String, TranscribeError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| TranscribeError::Unauthorized(format!("missing {name}")))
}
