//! Identifiers for entities, properties and statements.
//!
//! Query results and spreadsheets refer to entities by link
//! (`https://example.org/entity/Q64`, `https://example.org/wiki/Item:Q64`).
//! The constructors here accept either the bare identifier or such a link and
//! normalise to the trailing identifier.

use std::{borrow::Cow, fmt};

use thiserror::Error;

/// Errors returned when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The input was empty after trimming.
    #[error("identifier is empty")]
    Empty,
    /// The identifier did not start with a known entity prefix.
    #[error("identifier {value:?} has no recognised prefix")]
    InvalidPrefix {
        /// Offending input.
        value: String,
    },
    /// The characters after the prefix were not all ASCII digits.
    #[error("identifier {value:?} must end in a decimal number")]
    InvalidDigits {
        /// Offending input.
        value: String,
    },
    /// A statement identifier lacked the `$` separator.
    #[error("statement identifier {value:?} lacks an entity prefix")]
    InvalidStatement {
        /// Offending input.
        value: String,
    },
}

/// Return the part of a link after its last `/`.
///
/// # Examples
/// ```
/// use wikihum_core::trailing_segment;
///
/// assert_eq!(trailing_segment("https://example.org/entity/Q64"), "Q64");
/// assert_eq!(trailing_segment("Q64"), "Q64");
/// ```
#[must_use]
pub fn trailing_segment(link: &str) -> &str {
    link.rsplit('/').next().unwrap_or(link)
}

fn bare_identifier(input: &str) -> Result<&str, IdError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty);
    }
    let last_segment = trimmed.rsplit(['/', '#']).next().unwrap_or(trimmed);
    let bare = last_segment
        .rsplit(':')
        .next()
        .unwrap_or(last_segment)
        .trim();
    if bare.is_empty() {
        return Err(IdError::Empty);
    }
    Ok(bare)
}

fn split_prefix(bare: &str) -> Result<(char, &str), IdError> {
    let mut chars = bare.chars();
    let prefix = chars.next().ok_or(IdError::Empty)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(IdError::InvalidDigits {
            value: bare.to_owned(),
        });
    }
    Ok((prefix.to_ascii_uppercase(), digits))
}

/// Kind of entity addressed by an [`EntityId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// `Q` identifiers.
    Item,
    /// `P` identifiers.
    Property,
    /// `L` identifiers.
    Lexeme,
}

impl EntityKind {
    const fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'Q' => Some(Self::Item),
            'P' => Some(Self::Property),
            'L' => Some(Self::Lexeme),
            _ => None,
        }
    }

    /// Wikibase `entity-type` string for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Property => "property",
            Self::Lexeme => "lexeme",
        }
    }
}

/// Identifier of an item, property or lexeme (`Q64`, `P54`).
///
/// # Examples
/// ```
/// use wikihum_core::{EntityId, EntityKind};
///
/// let id = EntityId::parse("https://wikihum.example/wiki/Item:Q17375")?;
/// assert_eq!(id.as_str(), "Q17375");
/// assert_eq!(id.kind(), EntityKind::Item);
/// assert_eq!(id.numeric_id(), 17375);
/// # Ok::<(), wikihum_core::IdError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Cow<'static, str>);

impl EntityId {
    /// Wrap a compile-time identifier without validation.
    ///
    /// Reserved for constants whose shape is known to be valid.
    #[must_use]
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Parse a bare identifier or a link ending in one.
    pub fn parse(input: &str) -> Result<Self, IdError> {
        let bare = bare_identifier(input)?;
        let (prefix, digits) = split_prefix(bare)?;
        if EntityKind::from_prefix(prefix).is_none() {
            return Err(IdError::InvalidPrefix {
                value: bare.to_owned(),
            });
        }
        Ok(Self(Cow::Owned(format!("{prefix}{digits}"))))
    }

    /// Identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Kind derived from the prefix letter.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.0
            .chars()
            .next()
            .and_then(EntityKind::from_prefix)
            .unwrap_or(EntityKind::Item)
    }

    /// Numeric part of the identifier.
    #[must_use]
    pub fn numeric_id(&self) -> u64 {
        self.0
            .get(1..)
            .and_then(|digits| digits.parse().ok())
            .unwrap_or_default()
    }

    /// Build the item identifier `Q{number}`.
    #[must_use]
    pub fn item(number: u64) -> Self {
        Self(Cow::Owned(format!("Q{number}")))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PropertyId> for EntityId {
    fn from(value: PropertyId) -> Self {
        Self(value.0)
    }
}

/// Identifier of a property (`P54`).
///
/// Properties key qualifiers, reference snaks and statement groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct PropertyId(Cow<'static, str>);

impl PropertyId {
    /// Wrap a compile-time property identifier without validation.
    #[must_use]
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Parse a bare property identifier or a link ending in one.
    ///
    /// # Examples
    /// ```
    /// use wikihum_core::PropertyId;
    ///
    /// assert_eq!(PropertyId::parse("p54")?.as_str(), "P54");
    /// assert!(PropertyId::parse("Q54").is_err());
    /// # Ok::<(), wikihum_core::IdError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self, IdError> {
        let bare = bare_identifier(input)?;
        let (prefix, digits) = split_prefix(bare)?;
        if prefix != 'P' {
            return Err(IdError::InvalidPrefix {
                value: bare.to_owned(),
            });
        }
        Ok(Self(Cow::Owned(format!("P{digits}"))))
    }

    /// Identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PropertyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PropertyId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PropertyId> for String {
    fn from(value: PropertyId) -> Self {
        value.0.into_owned()
    }
}

/// Server-assigned statement identifier (`Q64$5627445f-43cb-...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct StatementId(String);

impl StatementId {
    /// Parse a statement identifier in API form (`Q1$uuid`).
    pub fn parse(input: &str) -> Result<Self, IdError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        let Some((entity, _)) = trimmed.split_once('$') else {
            return Err(IdError::InvalidStatement {
                value: trimmed.to_owned(),
            });
        };
        EntityId::parse(entity)?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Parse the statement node URI used by the query service.
    ///
    /// The RDF form separates entity and UUID with `-` instead of `$`; only
    /// the first dash is the separator.
    ///
    /// # Examples
    /// ```
    /// use wikihum_core::StatementId;
    ///
    /// let id = StatementId::from_uri(
    ///     "https://wikihum.example/entity/statement/Q5-8a2c-41d9",
    /// )?;
    /// assert_eq!(id.as_str(), "Q5$8a2c-41d9");
    /// # Ok::<(), wikihum_core::IdError>(())
    /// ```
    pub fn from_uri(uri: &str) -> Result<Self, IdError> {
        let segment = crate::trailing_segment(uri.trim());
        Self::parse(&segment.replacen('-', "$", 1))
    }

    /// Identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StatementId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StatementId> for String {
    fn from(value: StatementId) -> Self {
        value.0
    }
}
