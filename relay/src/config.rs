use crate::errors::RelayError;
use std::env;

/// Environment variable naming the source endpoint for the GET step.
pub const SOURCE_URL_VAR: &str = "API_GET_URL";
/// Environment variable naming the sink endpoint for the POST step.
pub const SINK_URL_VAR: &str = "API_POST_URL";
/// Environment variable naming the job table directory. Persistence is
/// skipped entirely when it is unset.
pub const JOBS_TABLE_VAR: &str = "JOBS_TABLE";

/// Configuration for one invocation, read from the process environment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Absolute URL for the GET step.
    pub source_url: String,
    /// Absolute URL for the POST step.
    pub sink_url: String,
    /// Directory backing the job table, if persistence is wanted.
    pub jobs_table: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            source_url: env::var(SOURCE_URL_VAR).unwrap_or_default(),
            sink_url: env::var(SINK_URL_VAR).unwrap_or_default(),
            jobs_table: env::var(JOBS_TABLE_VAR).ok().filter(|v| !v.is_empty()),
        }
    }

    /// Both URLs are required. This check runs before any network I/O.
    pub fn urls(&self) -> Result<(&str, &str), RelayError> {
        if self.source_url.is_empty() || self.sink_url.is_empty() {
            return Err(RelayError::UrlsNotConfigured);
        }
        Ok((&self.source_url, &self.sink_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_urls_present_pass_validation() {
        let config = Config {
            source_url: "http://source.test/data".into(),
            sink_url: "http://sink.test/ingest".into(),
            jobs_table: None,
        };
        assert_eq!(
            config.urls().unwrap(),
            ("http://source.test/data", "http://sink.test/ingest")
        );
    }

    #[test]
    fn missing_or_empty_url_fails_validation() {
        let missing_source = Config {
            source_url: String::new(),
            sink_url: "http://sink.test".into(),
            jobs_table: None,
        };
        assert!(matches!(
            missing_source.urls(),
            Err(RelayError::UrlsNotConfigured)
        ));

        let missing_sink = Config {
            source_url: "http://source.test".into(),
            sink_url: String::new(),
            jobs_table: Some("/tmp/jobs".into()),
        };
        assert!(matches!(
            missing_sink.urls(),
            Err(RelayError::UrlsNotConfigured)
        ));
    }
}
