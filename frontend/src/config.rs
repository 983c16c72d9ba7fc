//! Application configuration.
//!
//! Backend credentials are baked in at build time from the same variables
//! the CLI reads at run time.

use artistdash::config::{ANON_KEY_VAR, BASE_URL_VAR, PROJECT_ID_VAR};
use artistdash::{ApiConfig, ConfigError};

/// Shown in the header and the document title.
pub const APP_NAME: &str = "Artist Dashboard";

/// Toasts kept on screen at once; older ones are dropped.
pub const MAX_TOASTS: usize = 5;

/// How long a toast stays before it dismisses itself.
pub const TOAST_TTL_MS: u32 = 4000;

/// Connection settings for the Edge Function client, from
/// `SUPABASE_PROJECT_ID`, `SUPABASE_ANON_KEY` and optionally
/// `ARTISTDASH_API_URL` at build time.
pub fn api_config() -> Result<ApiConfig, ConfigError> {
    ApiConfig::from_lookup(|name| {
        let value = if name == PROJECT_ID_VAR {
            option_env!("SUPABASE_PROJECT_ID")
        } else if name == ANON_KEY_VAR {
            option_env!("SUPABASE_ANON_KEY")
        } else if name == BASE_URL_VAR {
            option_env!("ARTISTDASH_API_URL")
        } else {
            None
        };
        value.map(str::to_string)
    })
}
