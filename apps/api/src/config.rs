use anyhow::{bail, Context, Result};

/// Which chat-completion backend answers live requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Anthropic,
    OpenAi,
}

impl LlmProviderKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "openai" | "gpt" => Ok(Self::OpenAi),
            other => bail!("LLM_PROVIDER must be 'anthropic' or 'openai', got '{other}'"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }
}

/// Application configuration loaded from environment variables.
/// API keys are optional: a missing key only fails the live call that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub google_places_api_key: Option<String>,
    pub llm_provider: LlmProviderKind,
    pub places_enabled: bool,
    pub places_max_results: usize,
    pub demo_mode: bool,
    pub demo_delay_ms: u64,
    pub http_timeout_secs: u64,
    /// Idle sessions are pruned after this many seconds.
    pub session_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            anthropic_model: "claude-sonnet-4-5".to_string(),
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            google_places_api_key: None,
            llm_provider: LlmProviderKind::Anthropic,
            places_enabled: false,
            places_max_results: 3,
            demo_mode: true,
            demo_delay_ms: 2000,
            http_timeout_secs: 120,
            session_ttl_secs: 3600,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            anthropic_api_key: optional_key("ANTHROPIC_API_KEY"),
            anthropic_model: std::env::var("ANTHROPIC_MODEL").unwrap_or(defaults.anthropic_model),
            openai_api_key: optional_key("OPENAI_API_KEY"),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or(defaults.openai_base_url)
                .trim_end_matches('/')
                .to_string(),
            google_places_api_key: optional_key("GOOGLE_PLACES_API_KEY"),
            llm_provider: match std::env::var("LLM_PROVIDER") {
                Ok(v) => LlmProviderKind::parse(&v)?,
                Err(_) => defaults.llm_provider,
            },
            places_enabled: parse_env("PLACES_ENABLED", defaults.places_enabled)?,
            places_max_results: parse_env("PLACES_MAX_RESULTS", defaults.places_max_results)?,
            demo_mode: parse_env("DEMO_MODE", defaults.demo_mode)?,
            demo_delay_ms: parse_env("DEMO_DELAY_MS", defaults.demo_delay_ms)?,
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            session_ttl_secs: parse_env("SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn optional_key(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|v| normalize_key(&v))
}

/// Treats blank values and the "your-actual-...-key-here" placeholders as unset.
pub fn normalize_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_placeholder(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_placeholder(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.contains("your-actual") || lower.ends_with("-key-here") || lower == "changeme"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key_rejects_placeholders() {
        assert_eq!(normalize_key("sk-ant-REDACTED"), None);
        assert_eq!(normalize_key("your-actual-google-key-here"), None);
        assert_eq!(normalize_key("   "), None);
    }

    #[test]
    fn test_normalize_key_trims_real_key() {
        assert_eq!(
            normalize_key("  sk-ant-api03-abc  ").as_deref(),
            Some("sk-ant-api03-abc")
        );
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(
            LlmProviderKind::parse("Claude").unwrap(),
            LlmProviderKind::Anthropic
        );
        assert_eq!(
            LlmProviderKind::parse("openai").unwrap(),
            LlmProviderKind::OpenAi
        );
        assert!(LlmProviderKind::parse("gemini").is_err());
    }

    #[test]
    fn test_defaults_start_in_demo_mode() {
        let config = Config::default();
        assert!(config.demo_mode);
        assert!(!config.places_enabled);
        assert_eq!(config.demo_delay_ms, 2000);
        assert_eq!(config.session_ttl_secs, 3600);
    }
}
