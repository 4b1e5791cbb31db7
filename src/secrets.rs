use crate::error::{LeonardoError, Result};
use reqwest::header::HeaderValue;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Bearer token for the Leonardo REST API.
///
/// Resolved once when the client is built and never mutated afterwards. The
/// token is kept out of `Debug` output so configs and clients can be logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into().trim().to_string())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// `Authorization` header value, marked sensitive. Fails on tokens that
    /// cannot travel in a header, such as ones with interior newlines.
    pub fn authorization_header(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.bearer()).map_err(|_| {
            LeonardoError::ConfigError(
                "API key contains characters that are not allowed in an HTTP header".into(),
            )
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// Where the API key lives outside the binary.
///
/// Written as `env:NAME` or `file:PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    Env { key: String },
    File { path: PathBuf },
}

impl SecretSource {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (scheme, rest) = input.split_once(':').ok_or_else(|| {
            LeonardoError::ConfigError(format!(
                "secret source `{}` must look like env:NAME or file:PATH",
                input
            ))
        })?;
        let rest = rest.trim();
        if rest.is_empty() {
            return Err(LeonardoError::ConfigError(format!(
                "secret source `{}` is missing its {} part",
                input,
                if scheme == "file" { "path" } else { "key" }
            )));
        }

        match scheme.trim() {
            "env" => Ok(SecretSource::Env {
                key: rest.to_string(),
            }),
            "file" => Ok(SecretSource::File {
                path: PathBuf::from(rest),
            }),
            other => Err(LeonardoError::ConfigError(format!(
                "unsupported secret source `{}`",
                other
            ))),
        }
    }

    pub fn resolve(&self) -> Result<Credential> {
        let raw = match self {
            SecretSource::Env { key } => std::env::var(key).map_err(|_| {
                LeonardoError::ConfigError(format!("environment variable {} is not set", key))
            })?,
            SecretSource::File { path } => std::fs::read_to_string(path).map_err(|e| {
                LeonardoError::ConfigError(format!(
                    "failed to read secret file {}: {}",
                    path.display(),
                    e
                ))
            })?,
        };

        let credential = Credential::new(raw);
        if credential.is_blank() {
            return Err(LeonardoError::ConfigError(format!(
                "secret from {} is empty",
                self
            )));
        }
        Ok(credential)
    }
}

impl FromStr for SecretSource {
    type Err = LeonardoError;

    fn from_str(s: &str) -> Result<Self> {
        SecretSource::parse(s)
    }
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::Env { key } => write!(f, "env:{}", key),
            SecretSource::File { path } => write!(f, "file:{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("super-secret-token");
        assert_eq!(format!("{:?}", credential), "Credential(***)");
        assert_eq!(credential.bearer(), "Bearer super-secret-token");
    }

    #[test]
    fn test_authorization_header() {
        let header = Credential::new("abc").authorization_header().unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer abc");
        assert!(header.is_sensitive());
    }

    #[test]
    fn test_interior_newline_cannot_become_a_header() {
        let err = Credential::new("line-one\nline-two")
            .authorization_header()
            .unwrap_err();
        assert!(matches!(err, LeonardoError::ConfigError(_)));
        assert!(!err.to_string().contains("line-one"));
    }

    #[test]
    fn test_credential_trims_whitespace() {
        let credential = Credential::new("  abc\n");
        assert_eq!(credential.token(), "abc");
        assert!(Credential::new(" \n").is_blank());
    }

    #[test]
    fn test_parse_sources() {
        assert_eq!(
            SecretSource::parse("env:LEONARDO_API_KEY").unwrap(),
            SecretSource::Env {
                key: "LEONARDO_API_KEY".into()
            }
        );
        assert_eq!(
            "file:/run/secrets/leonardo".parse::<SecretSource>().unwrap(),
            SecretSource::File {
                path: PathBuf::from("/run/secrets/leonardo")
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed_sources() {
        assert!(SecretSource::parse("LEONARDO_API_KEY").is_err());
        assert!(SecretSource::parse("env:").is_err());
        assert!(SecretSource::parse("vault:kv/leonardo").is_err());
    }

    #[test]
    fn test_resolve_from_env() {
        std::env::set_var("RLEONARDO_TEST_SECRET_ENV", "token-from-env");
        let source = SecretSource::parse("env:RLEONARDO_TEST_SECRET_ENV").unwrap();
        assert_eq!(source.resolve().unwrap().token(), "token-from-env");
    }

    #[test]
    fn test_resolve_missing_env_is_config_error() {
        let source = SecretSource::parse("env:RLEONARDO_TEST_SECRET_MISSING").unwrap();
        let err = source.resolve().unwrap_err();
        assert!(matches!(err, LeonardoError::ConfigError(_)));
    }

    #[test]
    fn test_resolve_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token-from-file").unwrap();

        let source = SecretSource::File {
            path: file.path().to_path_buf(),
        };
        assert_eq!(source.resolve().unwrap().token(), "token-from-file");
    }

    #[test]
    fn test_resolve_blank_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = SecretSource::File {
            path: file.path().to_path_buf(),
        };
        assert!(source.resolve().is_err());
    }
}
