use std::str::FromStr;

use thiserror::Error;

/// Errors related to environment-driven configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable required by the application is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable is set but its value could not be parsed.
    #[error("Invalid value for environment variable {name}: {value:?}")]
    InvalidEnvVar { name: String, value: String },
}

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads and parses an optional environment variable.
///
/// Returns `Ok(None)` when the variable is unset, and
/// [`ConfigError::InvalidEnvVar`] when it is set but does not parse as `T`.
/// Surrounding whitespace is ignored.
pub fn parse_env_var<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    let raw = match get_env_var(name) {
        Ok(v) => v,
        Err(ConfigError::MissingEnvVar(_)) => return Ok(None),
        Err(e) => return Err(e),
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    // each test uses its own variable name so they can run in parallel

    #[test]
    fn missing_var_is_structured_error() {
        let err = get_env_var("SHARED_UTILS_TEST_DEFINITELY_UNSET").unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvVar("SHARED_UTILS_TEST_DEFINITELY_UNSET".into())
        );
    }

    #[test]
    fn parse_missing_is_none() {
        let got: Option<u32> = parse_env_var("SHARED_UTILS_TEST_PARSE_UNSET").unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn parse_present_and_invalid() {
        // SAFETY: the variable is unique to this test.
        unsafe { std::env::set_var("SHARED_UTILS_TEST_PARSE_SET", " 4 ") };
        let got: Option<u32> = parse_env_var("SHARED_UTILS_TEST_PARSE_SET").unwrap();
        assert_eq!(got, Some(4));

        unsafe { std::env::set_var("SHARED_UTILS_TEST_PARSE_SET", "four") };
        let err = parse_env_var::<u32>("SHARED_UTILS_TEST_PARSE_SET").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_PARSE_SET") };
    }
}
