//! Backend connection settings.

use crate::error::ConfigError;

/// Name of the deployed Edge Function that serves every endpoint.
pub const FUNCTION_NAME: &str = "make-server-84730125";

pub const PROJECT_ID_VAR: &str = "SUPABASE_PROJECT_ID";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
/// Optional override of the whole base URL, e.g. a local `supabase functions serve`.
pub const BASE_URL_VAR: &str = "ARTISTDASH_API_URL";

/// Where the Edge Function lives and how to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub project_id: String,
    /// Public anon key, sent as the bearer token.
    pub anon_key: String,
    base_url: Option<String>,
}

impl ApiConfig {
    pub fn new(project_id: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let project_id = project_id.into().trim().to_string();
        let anon_key = anon_key.into().trim().to_string();

        if project_id.is_empty() {
            return Err(ConfigError::MissingVar(PROJECT_ID_VAR));
        }
        if !project_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidValue {
                name: PROJECT_ID_VAR,
                message: format!("'{}' is not a Supabase project ref", project_id),
            });
        }
        if anon_key.is_empty() {
            return Err(ConfigError::MissingVar(ANON_KEY_VAR));
        }

        Ok(Self { project_id, anon_key, base_url: None })
    }

    /// Points the client somewhere else, keeping the credentials.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// `https://{project}.supabase.co/functions/v1/make-server-84730125`
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.supabase.co/functions/v1/{}", self.project_id, FUNCTION_NAME),
        }
    }

    /// Builds from a variable lookup. Blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());

        let project_id = get(PROJECT_ID_VAR).ok_or(ConfigError::MissingVar(PROJECT_ID_VAR))?;
        let anon_key = get(ANON_KEY_VAR).ok_or(ConfigError::MissingVar(ANON_KEY_VAR))?;

        let config = Self::new(project_id, anon_key)?;
        Ok(match get(BASE_URL_VAR) {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }

    /// Reads the process environment, loading `.env` first if present.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try loading .env file
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_base_url() {
        let config = ApiConfig::new("abcd1234", "anon").unwrap();
        assert_eq!(
            config.base_url(),
            "https://abcd1234.supabase.co/functions/v1/make-server-84730125"
        );

        let local = config.with_base_url("http://localhost:54321/functions/v1/make-server-84730125/");
        assert_eq!(local.base_url(), "http://localhost:54321/functions/v1/make-server-84730125");
    }

    #[test]
    fn test_from_lookup() {
        let config = ApiConfig::from_lookup(lookup(&[
            (PROJECT_ID_VAR, "abcd1234"),
            (ANON_KEY_VAR, "eyJhbGciOi"),
        ]))
        .unwrap();
        assert_eq!(config.anon_key, "eyJhbGciOi");

        let missing = ApiConfig::from_lookup(lookup(&[(PROJECT_ID_VAR, "abcd1234"), (ANON_KEY_VAR, " ")]));
        assert!(matches!(missing, Err(ConfigError::MissingVar(ANON_KEY_VAR))));
    }

    #[test]
    fn test_rejects_bad_project_id() {
        let err = ApiConfig::new("https://abcd.supabase.co", "anon").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: PROJECT_ID_VAR, .. }));
    }
}
