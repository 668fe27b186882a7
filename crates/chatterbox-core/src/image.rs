use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in seconds, used for versioned image tags.
pub fn unix_timestamp() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs(),
        Err(e) => {
            tracing::warn!(error = %e, "system clock is before the Unix epoch");
            0
        }
    }
}

/// A registry-qualified image name plus tag, rendered as `repository:tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub repository: String,
    pub tag: String,
}

impl ImageRef {
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            tag: tag.into(),
        }
    }

    /// Versioned reference for a build started at `timestamp` (Unix seconds).
    pub fn timestamped(repository: &str, timestamp: u64) -> Self {
        Self::new(repository, format!("v{timestamp}"))
    }

    /// Same repository, different tag.
    pub fn retag(&self, tag: &str) -> Self {
        Self::new(self.repository.clone(), tag)
    }
}

impl FromStr for ImageRef {
    type Err = ImageRefError;

    /// Parse `repository[:tag]`. A missing tag means `latest`, as with docker.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // A colon followed by a slash belongs to a registry host:port.
        let (repository, tag) = match s.rsplit_once(':') {
            Some((repo, tag)) if !tag.contains('/') => (repo, tag),
            _ => (s, "latest"),
        };

        if repository.is_empty() || tag.is_empty() || repository.ends_with('/') {
            return Err(ImageRefError(s.to_owned()));
        }
        Ok(Self::new(repository, tag))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid image reference {0:?}, expected repository[:tag]")]
pub struct ImageRefError(pub String);

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

/// Both references produced by one build. They point at the same image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltImage {
    pub versioned: ImageRef,
    pub latest: ImageRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamped_tag_is_v_prefixed() {
        let image = ImageRef::timestamped("ahernandezam/chatter-box-api", 1_700_000_000);
        assert_eq!(image.tag, "v1700000000");
        assert_eq!(
            image.to_string(),
            "ahernandezam/chatter-box-api:v1700000000"
        );
    }

    #[test]
    fn parse_repository_and_tag() {
        let image: ImageRef = "ahernandezam/chatter-box-api:v1700000000".parse().unwrap();
        assert_eq!(image, ImageRef::new("ahernandezam/chatter-box-api", "v1700000000"));
    }

    #[test]
    fn parse_defaults_to_latest() {
        let image: ImageRef = "ahernandezam/chatter-box-api".parse().unwrap();
        assert_eq!(image.tag, "latest");
    }

    #[test]
    fn parse_keeps_registry_port() {
        let image: ImageRef = "localhost:5000/chatter-box-api".parse().unwrap();
        assert_eq!(image.repository, "localhost:5000/chatter-box-api");
        assert_eq!(image.tag, "latest");

        let tagged: ImageRef = "localhost:5000/chatter-box-api:v2".parse().unwrap();
        assert_eq!(tagged.repository, "localhost:5000/chatter-box-api");
        assert_eq!(tagged.tag, "v2");
    }

    #[test]
    fn parse_rejects_empty_parts() {
        assert!("".parse::<ImageRef>().is_err());
        assert!("repo:".parse::<ImageRef>().is_err());
        assert!(":tag".parse::<ImageRef>().is_err());
    }

    #[test]
    fn retag_keeps_repository() {
        let image = ImageRef::timestamped("repo/app", 42);
        let latest = image.retag("latest");
        assert_eq!(latest.repository, "repo/app");
        assert_eq!(latest.to_string(), "repo/app:latest");
    }
}
