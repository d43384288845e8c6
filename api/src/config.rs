//! Service endpoints and credentials.
//!
//! Values are baked in at compile time (the browser has no process
//! environment) and, on native targets, may be overridden at runtime by the
//! same variable names.

pub const GEMINI_API_KEY_VAR: &str = "ECOSORT_GEMINI_API_KEY";
pub const GEMINI_MODEL_VAR: &str = "ECOSORT_GEMINI_MODEL";
pub const BACKEND_URL_VAR: &str = "ECOSORT_API_URL";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Base URL of the scan archive; `None` disables archiving.
    pub backend_url: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            backend_url: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::resolve(|name| runtime_var(name).or_else(|| compiled_var(name)))
    }

    /// Build a config from an arbitrary lookup. Blank values count as unset.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            gemini_api_key: read(GEMINI_API_KEY_VAR),
            gemini_model: read(GEMINI_MODEL_VAR).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            backend_url: read(BACKEND_URL_VAR).map(|url| url.trim_end_matches('/').to_string()),
        }
    }
}

fn compiled_var(name: &str) -> Option<String> {
    let value = match name {
        GEMINI_API_KEY_VAR => option_env!("ECOSORT_GEMINI_API_KEY"),
        GEMINI_MODEL_VAR => option_env!("ECOSORT_GEMINI_MODEL"),
        BACKEND_URL_VAR => option_env!("ECOSORT_API_URL"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(target_arch = "wasm32")]
fn runtime_var(_name: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ServiceConfig::resolve(|name| match name {
            GEMINI_API_KEY_VAR => Some("  ".into()),
            BACKEND_URL_VAR => Some("http://localhost:8080/".into()),
            _ => None,
        });
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:8080"));
    }
}
