// src/domain/post/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl PostId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::invalid("id", "post id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<PostId> for i64 {
    fn from(value: PostId) -> Self {
        value.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid("title", "can't be blank"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody(String);

impl PostBody {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid("body", "can't be blank"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Free-form label. Tags group posts informally and never gate visibility.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(String);

impl Tag {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid("tags", "can't contain blank tags"));
        }
        if trimmed.contains(',') {
            return Err(DomainError::invalid("tags", "can't contain commas"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses a list of raw tag names, dropping duplicates while keeping the
    /// first occurrence's position.
    pub fn parse_list<I, S>(values: I) -> DomainResult<Vec<Tag>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: Vec<Tag> = Vec::new();
        for value in values {
            let tag = Tag::new(value)?;
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        Ok(tags)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl(String);

impl SourceUrl {
    /// Blank input means "no source"; anything else must be an absolute
    /// http(s) URL.
    pub fn parse(value: &str) -> DomainResult<Option<Self>> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let invalid = || DomainError::invalid("source_url", "is not a valid URL");
        if trimmed.contains(char::is_whitespace) {
            return Err(invalid());
        }
        let url = reqwest::Url::parse(trimmed).map_err(|_| invalid())?;
        let has_host = url.host_str().is_some_and(|host| !host.is_empty());
        if !matches!(url.scheme(), "http" | "https") || !has_host {
            return Err(invalid());
        }
        Ok(Some(Self(trimmed.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lists_are_deduplicated() {
        let tags = Tag::parse_list(["rust", " rust ", "sql"]).unwrap();
        let names: Vec<_> = tags.iter().map(Tag::as_str).collect();
        assert_eq!(names, vec!["rust", "sql"]);
    }

    #[test]
    fn source_url_accepts_blank_as_absent() {
        assert_eq!(SourceUrl::parse("  ").unwrap(), None);
        assert!(SourceUrl::parse("https://example.com/a").unwrap().is_some());
        assert!(SourceUrl::parse("ftp://example.com").is_err());
        assert!(SourceUrl::parse("https:///path").is_err());
    }

    #[test]
    fn source_url_requires_a_host() {
        for raw in ["http://?", "https://#frag", "http://:::::", "http://", "https://:80/x"] {
            assert!(SourceUrl::parse(raw).is_err(), "{raw} should be rejected");
        }
        let kept = SourceUrl::parse(" https://gone.example/article ").unwrap().unwrap();
        assert_eq!(kept.as_str(), "https://gone.example/article");
        assert!(SourceUrl::parse("https://example.com/a b").is_err());
    }

    #[test]
    fn title_and_body_must_be_present() {
        assert!(PostTitle::new(" ").is_err());
        assert!(PostBody::new("").is_err());
    }
}
