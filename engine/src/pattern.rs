//! FILENAME: engine/src/pattern.rs
//! PURPOSE: Tag patterns, the rules that select columns by tag.
//! CONTEXT: Every engine operation addresses data through a pattern rather
//! than a column position, so the same query works on any table that tags
//! its columns the same way.
//!
//! SYNTAX:
//! - `#hashtag`          any column with that hashtag
//! - `+attribute`        column must carry the attribute (repeatable)
//! - `-attribute`        column must NOT carry the attribute (repeatable)
//! - trailing `!`        column may carry no attributes beyond the `+` ones
//! - trailing `[n]`      only the n-th (0-based) of the columns matched by the rest
//!
//! Example: `#value+net`, `#org+name-code`, `#indicator+bool!`, `#sector[1]`.

use crate::error::EngineError;
use crate::tag::{is_identifier, normalize_token, sorted_set, Attributes, Column, Tag};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Column positions matched by a pattern. Usually one or two.
pub type ColumnIndices = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagPattern {
    hashtag: String,
    include: Attributes,
    exclude: Attributes,
    absolute: bool,
    index: Option<usize>,
}

impl TagPattern {
    pub fn parse(text: &str) -> Result<TagPattern, EngineError> {
        let invalid = || EngineError::InvalidPattern(text.to_string());

        let mut body = text.trim().strip_prefix('#').ok_or_else(invalid)?.trim_end();

        // Column-index selector, e.g. "#sector[1]"
        let mut index = None;
        if let Some(open) = body.strip_suffix(']').and_then(|rest| rest.rfind('[')) {
            let digits = &body[open + 1..body.len() - 1];
            index = Some(digits.trim().parse::<usize>().map_err(|_| invalid())?);
            body = body[..open].trim_end();
        }

        let absolute = match body.strip_suffix('!') {
            Some(rest) => {
                body = rest;
                true
            }
            None => false,
        };

        let mut hashtag = String::new();
        let mut segments: Vec<(char, String)> = Vec::new();
        for ch in body.chars() {
            match ch {
                '+' | '-' => segments.push((ch, String::new())),
                _ => match segments.last_mut() {
                    Some((_, token)) => token.push(ch),
                    None => hashtag.push(ch),
                },
            }
        }

        let hashtag = normalize_token(&hashtag);
        if !is_identifier(&hashtag) {
            return Err(invalid());
        }

        let mut include = Attributes::new();
        let mut exclude = Attributes::new();
        for (sign, token) in segments {
            let attribute = normalize_token(&token);
            if !is_identifier(&attribute) {
                return Err(invalid());
            }
            if sign == '+' {
                include.push(attribute);
            } else {
                exclude.push(attribute);
            }
        }

        Ok(TagPattern {
            hashtag,
            include: sorted_set(include),
            exclude: sorted_set(exclude),
            absolute,
            index,
        })
    }

    pub fn hashtag(&self) -> &str {
        &self.hashtag
    }

    pub fn required_attributes(&self) -> &[String] {
        &self.include
    }

    pub fn excluded_attributes(&self) -> &[String] {
        &self.exclude
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn column_index(&self) -> Option<usize> {
        self.index
    }

    /// Tests a single column. The `[n]` selector is positional and is only
    /// applied by [`TagPattern::find_columns`].
    pub fn matches(&self, column: &Column) -> bool {
        match column.tag() {
            Some(tag) => self.matches_tag(tag),
            None => false,
        }
    }

    pub fn matches_tag(&self, tag: &Tag) -> bool {
        if tag.hashtag() != self.hashtag {
            return false;
        }
        if !self.include.iter().all(|a| tag.has_attribute(a)) {
            return false;
        }
        if self.exclude.iter().any(|a| tag.has_attribute(a)) {
            return false;
        }
        // include is a subset of the tag's attributes at this point
        !self.absolute || tag.attributes().len() == self.include.len()
    }

    /// All column positions this pattern selects, in column order.
    pub fn find_columns(&self, columns: &[Column]) -> ColumnIndices {
        let matching = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| self.matches(column))
            .map(|(i, _)| i);

        match self.index {
            Some(n) => matching.skip(n).take(1).collect(),
            None => matching.collect(),
        }
    }

    /// The first column position this pattern selects.
    pub fn find_column(&self, columns: &[Column]) -> Option<usize> {
        self.find_columns(columns).first().copied()
    }

    /// The tag a column produced from this pattern carries (hashtag plus the
    /// required attributes).
    pub fn to_tag(&self) -> Tag {
        Tag::from_parts(self.hashtag.clone(), self.include.clone())
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hashtag)?;
        for attribute in &self.include {
            write!(f, "+{}", attribute)?;
        }
        for attribute in &self.exclude {
            write!(f, "-{}", attribute)?;
        }
        if self.absolute {
            write!(f, "!")?;
        }
        if let Some(index) = self.index {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

impl FromStr for TagPattern {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagPattern::parse(s)
    }
}

impl TryFrom<String> for TagPattern {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TagPattern::parse(&value)
    }
}

impl From<TagPattern> for String {
    fn from(pattern: TagPattern) -> Self {
        pattern.to_string()
    }
}
