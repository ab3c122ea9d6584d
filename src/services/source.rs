use crate::error::{Result, RosterError};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// The roster bundled with the binary, used when no source can be read
pub const SAMPLE_ROSTER: &str = include_str!("../../data/sample_roster.csv");

/// Where roster CSV text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    File(PathBuf),
    Url(String),
    /// The bundled sample roster
    Sample,
}

impl RosterSource {
    /// Interpret a command-line or config value: http(s) URLs are fetched,
    /// anything else is a file path
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.eq_ignore_ascii_case("sample") {
            RosterSource::Sample
        } else if location.starts_with("http://") || location.starts_with("https://") {
            RosterSource::Url(location.to_string())
        } else {
            RosterSource::File(PathBuf::from(location))
        }
    }

    /// Read the full CSV text. This is the only suspension point of a
    /// load; there is no retry.
    pub async fn fetch_text(&self) -> Result<String> {
        match self {
            RosterSource::File(path) => {
                debug!("Reading roster file {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| RosterError::source_unavailable(self.to_string(), e))
            }
            RosterSource::Url(url) => {
                info!("Fetching roster from {}", url);
                let response = reqwest::get(url)
                    .await
                    .map_err(|e| RosterError::source_unavailable(url.as_str(), e))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(RosterError::source_unavailable(
                        url.as_str(),
                        format!("HTTP {}", status),
                    ));
                }
                response
                    .text()
                    .await
                    .map_err(|e| RosterError::source_unavailable(url.as_str(), e))
            }
            RosterSource::Sample => Ok(SAMPLE_ROSTER.to_string()),
        }
    }
}

impl fmt::Display for RosterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterSource::File(path) => write!(f, "{}", path.display()),
            RosterSource::Url(url) => write!(f, "{}", url),
            RosterSource::Sample => write!(f, "bundled sample roster"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            RosterSource::parse("https://example.org/team.csv"),
            RosterSource::Url("https://example.org/team.csv".to_string())
        );
        assert_eq!(
            RosterSource::parse("data/team.csv"),
            RosterSource::File(PathBuf::from("data/team.csv"))
        );
        assert_eq!(RosterSource::parse("SAMPLE"), RosterSource::Sample);
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let source = RosterSource::File(PathBuf::from("/definitely/not/here.csv"));
        let err = source.fetch_text().await.unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("team.csv");
        std::fs::write(&path, "name,email,role,team\nAda,a@x.org,Dev,Core\n").unwrap();

        let text = RosterSource::File(path).fetch_text().await.unwrap();
        assert!(text.starts_with("name,email"));
    }

    #[tokio::test]
    async fn test_sample_source() {
        let text = RosterSource::Sample.fetch_text().await.unwrap();
        assert_eq!(text, SAMPLE_ROSTER);
    }
}
