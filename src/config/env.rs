// Legacy environment variables
// Deployment scripts still export the variable names of the previous backend;
// they are mapped onto config keys and win over every other source.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

pub const SECRET_KEY_VAR: &str = "DJANGO_SECRET_KEY";
pub const DEBUG_VAR: &str = "DJANGO_DEBUG";
pub const ALLOWED_HOSTS_VAR: &str = "DJANGO_ALLOWED_HOSTS";
pub const CORS_ORIGINS_VAR: &str = "CORS_ALLOWED_ORIGINS";

/// Values picked up from the legacy variables, `None` when unset
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LegacyEnv {
    pub secret_key: Option<String>,
    pub debug: Option<bool>,
    pub allowed_hosts: Option<Vec<String>>,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl LegacyEnv {
    /// Read from the process environment
    pub fn from_process() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            secret_key: lookup(SECRET_KEY_VAR),
            // Only the literal "1" enables debug
            debug: lookup(DEBUG_VAR).map(|v| v == "1"),
            allowed_hosts: lookup(ALLOWED_HOSTS_VAR).map(|v| split_list(&v)),
            cors_allowed_origins: lookup(CORS_ORIGINS_VAR).map(|v| split_list(&v)),
        }
    }

    /// Layer the values as overrides on top of a builder
    pub fn apply(
        self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_override_option("security.secret_key", self.secret_key)?
            .set_override_option("security.debug", self.debug)?
            .set_override_option("security.allowed_hosts", self.allowed_hosts)?
            .set_override_option("cors.allowed_origins", self.cors_allowed_origins)
    }
}

/// Load `.env` from the working directory or a parent.
///
/// A missing file is normal; any other problem is handed back so it can be
/// logged once logging is up.
pub fn load_dotenv() -> Option<dotenvy::Error> {
    dotenv_problem(dotenvy::dotenv())
}

fn dotenv_problem<T>(result: Result<T, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Ok(_) => None,
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => Some(e),
    }
}

/// Split a comma separated list, keeping empty segments out
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_unset_variables() {
        let env = LegacyEnv::from_lookup(|_| None);
        assert_eq!(env, LegacyEnv::default());
    }

    #[test]
    fn test_debug_only_enabled_by_one() {
        let on = LegacyEnv::from_lookup(lookup_from(&[(DEBUG_VAR, "1")]));
        assert_eq!(on.debug, Some(true));

        let off = LegacyEnv::from_lookup(lookup_from(&[(DEBUG_VAR, "0")]));
        assert_eq!(off.debug, Some(false));

        let word = LegacyEnv::from_lookup(lookup_from(&[(DEBUG_VAR, "true")]));
        assert_eq!(word.debug, Some(false));
    }

    #[test]
    fn test_missing_dotenv_is_not_a_problem() {
        let missing = std::env::temp_dir().join("animal-identifier-api-no-such.env");
        assert!(dotenv_problem(dotenvy::from_path(&missing)).is_none());
    }

    #[test]
    fn test_malformed_dotenv_is_reported() {
        let path = std::env::temp_dir().join(format!(
            "animal-identifier-api-malformed-{}.env",
            std::process::id()
        ));
        std::fs::write(&path, "THIS LINE HAS NO ASSIGNMENT\n").unwrap();
        let problem = dotenv_problem(dotenvy::from_path(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(problem, Some(dotenvy::Error::LineParse(..))));
    }

    #[test]
    fn test_comma_lists() {
        let env = LegacyEnv::from_lookup(lookup_from(&[
            (ALLOWED_HOSTS_VAR, "api.example.com, .example.org,,"),
            (CORS_ORIGINS_VAR, "http://localhost:3000,https://app.example.com"),
        ]));
        assert_eq!(
            env.allowed_hosts,
            Some(vec![
                "api.example.com".to_string(),
                ".example.org".to_string()
            ])
        );
        assert_eq!(
            env.cors_allowed_origins,
            Some(vec![
                "http://localhost:3000".to_string(),
                "https://app.example.com".to_string()
            ])
        );
    }
}
