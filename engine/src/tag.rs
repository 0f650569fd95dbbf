//! FILENAME: engine/src/tag.rs
//! PURPOSE: Column tags (hashtag + attribute set) and the Column type itself.
//! CONTEXT: A tag is declared once per column in the tag row, e.g.
//! `#org+name` or `#indicator+bool+humanitarian`. Attributes are a set: order
//! and repetition in the declaration do not matter, so they are stored sorted
//! and deduplicated. Hashtags and attributes are compared lowercase.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Attribute list. Most tags carry fewer than four attributes.
pub type Attributes = SmallVec<[String; 4]>;

// ============================================================================
// TOKEN HELPERS (shared with TagPattern)
// ============================================================================

/// Trims and lowercases a hashtag or attribute token.
pub(crate) fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Identifiers start with a letter and continue with letters, digits or `_`.
pub(crate) fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => {
            chars.all(|ch| ch.is_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

pub(crate) fn sorted_set(mut attributes: Attributes) -> Attributes {
    attributes.sort();
    attributes.dedup();
    attributes
}

// ============================================================================
// TAG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag {
    hashtag: String,
    attributes: Attributes,
}

impl Tag {
    /// Parses a tag declaration such as `#org+name`.
    pub fn parse(text: &str) -> Result<Tag, EngineError> {
        let invalid = || EngineError::InvalidPattern(text.to_string());

        let body = text.trim().strip_prefix('#').ok_or_else(invalid)?;
        let mut segments = body.split('+');

        let hashtag = normalize_token(segments.next().unwrap_or_default());
        if !is_identifier(&hashtag) {
            return Err(invalid());
        }

        let mut attributes = Attributes::new();
        for segment in segments {
            let attribute = normalize_token(segment);
            if !is_identifier(&attribute) {
                return Err(invalid());
            }
            attributes.push(attribute);
        }

        Ok(Tag {
            hashtag,
            attributes: sorted_set(attributes),
        })
    }

    /// Builds a tag from tokens that are already normalized and validated.
    pub(crate) fn from_parts(hashtag: String, attributes: Attributes) -> Tag {
        Tag {
            hashtag,
            attributes: sorted_set(attributes),
        }
    }

    pub fn hashtag(&self) -> &str {
        &self.hashtag
    }

    /// Attributes in sorted order.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes
            .binary_search_by(|a| a.as_str().cmp(attribute))
            .is_ok()
    }

    /// Two tags are tag-equal when their hashtags match, whatever the attributes.
    pub fn same_hashtag(&self, other: &Tag) -> bool {
        self.hashtag == other.hashtag
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hashtag)?;
        for attribute in &self.attributes {
            write!(f, "+{}", attribute)?;
        }
        Ok(())
    }
}

impl FromStr for Tag {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::parse(s)
    }
}

impl TryFrom<String> for Tag {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tag::parse(&value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.to_string()
    }
}

// ============================================================================
// COLUMN
// ============================================================================

/// A column of a Dataset. The header is display text only; matching is done
/// on the tag. Untagged columns exist in real data and never match a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    header: String,
    tag: Option<Tag>,
}

impl Column {
    /// Creates a column from its header and tag-row text. Blank tag text gives
    /// an untagged column; anything else must parse as a tag.
    pub fn new(header: impl Into<String>, tag_text: &str) -> Result<Column, EngineError> {
        let tag = if tag_text.trim().is_empty() {
            None
        } else {
            Some(Tag::parse(tag_text)?)
        };
        Ok(Column {
            header: header.into(),
            tag,
        })
    }

    pub fn tagged(header: impl Into<String>, tag: Tag) -> Column {
        Column {
            header: header.into(),
            tag: Some(tag),
        }
    }

    pub fn untagged(header: impl Into<String>) -> Column {
        Column {
            header: header.into(),
            tag: None,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// Canonical tag text, or an empty string for untagged columns.
    pub fn display_tag(&self) -> String {
        self.tag.as_ref().map(Tag::to_string).unwrap_or_default()
    }
}
