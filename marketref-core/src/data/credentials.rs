//! API credential loading.

use std::fmt;
use thiserror::Error;

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "FINNHUB_KEY";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("please set {var} in your environment (or a local .env file)")]
    Missing { var: String },
}

/// Provider API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Wrap an explicit key. Blank keys are rejected.
    pub fn new(key: impl Into<String>) -> Result<Self, CredentialError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(CredentialError::Missing {
                var: API_KEY_VAR.to_string(),
            });
        }
        Ok(Self(key))
    }

    /// Load the key from `FINNHUB_KEY`, reading `.env` from the working directory first.
    pub fn from_env() -> Result<Self, CredentialError> {
        dotenvy::dotenv().ok();
        Self::from_var(API_KEY_VAR)
    }

    /// Load the key from an arbitrary environment variable.
    pub fn from_var(var: &str) -> Result<Self, CredentialError> {
        let missing = || CredentialError::Missing {
            var: var.to_string(),
        };
        let key = std::env::var(var).map_err(|_| missing())?;
        if key.trim().is_empty() {
            return Err(missing());
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_key_from_named_var() {
        std::env::set_var("MARKETREF_TEST_KEY_PRESENT", "TESTKEY");
        let cred = ApiCredential::from_var("MARKETREF_TEST_KEY_PRESENT").unwrap();
        assert_eq!(cred.expose(), "TESTKEY");
    }

    #[test]
    fn missing_var_is_an_error() {
        let err = ApiCredential::from_var("MARKETREF_TEST_KEY_ABSENT").unwrap_err();
        assert!(err.to_string().contains("MARKETREF_TEST_KEY_ABSENT"));
    }

    #[test]
    fn blank_key_is_rejected() {
        std::env::set_var("MARKETREF_TEST_KEY_BLANK", "   ");
        assert!(ApiCredential::from_var("MARKETREF_TEST_KEY_BLANK").is_err());
        assert!(ApiCredential::new("").is_err());
    }

    #[test]
    fn debug_redacts_secret() {
        let cred = ApiCredential::new("supersecret").unwrap();
        assert!(!format!("{cred:?}").contains("supersecret"));
    }
}
