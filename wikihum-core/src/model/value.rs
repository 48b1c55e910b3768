//! Typed snak values.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Point in time as Wikibase stores it.
///
/// `time` keeps the signed ISO-like text (`+2022-00-00T00:00:00Z`) so that
/// year and month precision values survive unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeValue {
    /// Timestamp text.
    pub time: String,
    /// Offset from UTC in minutes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timezone: i32,
    /// Uncertainty before the timestamp, in precision units.
    #[cfg_attr(feature = "serde", serde(default))]
    pub before: u32,
    /// Uncertainty after the timestamp, in precision units.
    #[cfg_attr(feature = "serde", serde(default))]
    pub after: u32,
    /// Precision code: 9 year, 10 month, 11 day.
    pub precision: u8,
    /// Calendar model entity URI.
    pub calendarmodel: String,
}

impl TimeValue {
    /// Calendar model used for every date written by the workflows.
    pub const GREGORIAN: &'static str = "http://www.wikidata.org/entity/Q1985727";
    /// Year precision code.
    pub const PRECISION_YEAR: u8 = 9;
    /// Day precision code.
    pub const PRECISION_DAY: u8 = 11;

    /// Gregorian timestamp with the given precision and no uncertainty.
    ///
    /// # Examples
    /// ```
    /// use wikihum_core::TimeValue;
    ///
    /// let year = TimeValue::gregorian("+2022-00-00T00:00:00Z", TimeValue::PRECISION_YEAR);
    /// assert_eq!(year.precision, 9);
    /// assert_eq!(year.calendarmodel, TimeValue::GREGORIAN);
    /// ```
    #[must_use]
    pub fn gregorian(time: &str, precision: u8) -> Self {
        Self {
            time: time.to_owned(),
            timezone: 0,
            before: 0,
            after: 0,
            precision,
            calendarmodel: Self::GREGORIAN.to_owned(),
        }
    }
}

/// Reference to another entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityRef {
    /// `item`, `property` or `lexeme`.
    #[cfg_attr(feature = "serde", serde(rename = "entity-type"))]
    pub entity_type: String,
    /// Numeric part of the identifier, absent for some entity kinds.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "numeric-id",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub numeric_id: Option<u64>,
    /// Full identifier (`Q64`).
    pub id: String,
}

impl EntityRef {
    /// Reference to `id`, filling in the entity type and numeric id.
    #[must_use]
    pub fn to(id: &crate::EntityId) -> Self {
        Self {
            entity_type: id.kind().as_str().to_owned(),
            numeric_id: Some(id.numeric_id()),
            id: id.as_str().to_owned(),
        }
    }
}

/// Text tagged with a language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonolingualText {
    /// Text.
    pub text: String,
    /// Language code.
    pub language: String,
}

/// Decimal amount with an optional unit and bounds.
///
/// Amounts are kept as the decimal strings Wikibase sends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quantity {
    /// Signed decimal amount (`+12`).
    pub amount: String,
    /// Unit entity URI, or `"1"` for dimensionless values.
    pub unit: String,
    /// Upper bound.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "upperBound", default, skip_serializing_if = "Option::is_none")
    )]
    pub upper_bound: Option<String>,
    /// Lower bound.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "lowerBound", default, skip_serializing_if = "Option::is_none")
    )]
    pub lower_bound: Option<String>,
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlobeCoordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Precision in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub precision: Option<f64>,
    /// Globe entity URI.
    pub globe: String,
}

/// Snak payload, tagged by value type.
///
/// Serialises to the Wikibase `datavalue` object: `{"type": ..., "value": ...}`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "value", rename_all = "lowercase")
)]
pub enum DataValue {
    /// Plain string; also used for URLs and external identifiers.
    String(String),
    /// Point in time.
    Time(TimeValue),
    /// Link to another entity.
    #[cfg_attr(feature = "serde", serde(rename = "wikibase-entityid"))]
    EntityId(EntityRef),
    /// Language-tagged text.
    MonolingualText(MonolingualText),
    /// Amount with unit.
    Quantity(Quantity),
    /// Coordinates.
    GlobeCoordinate(GlobeCoordinate),
}

impl DataValue {
    /// Shorthand for a string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Shorthand for a monolingual text value.
    #[must_use]
    pub fn monolingual(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self::MonolingualText(MonolingualText {
            text: text.into(),
            language: language.into(),
        })
    }

    /// Shorthand for an entity link.
    #[must_use]
    pub fn entity(id: &crate::EntityId) -> Self {
        Self::EntityId(EntityRef::to(id))
    }

    /// String payload, when this is a string value.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Monolingual payload, when this is language-tagged text.
    #[must_use]
    pub const fn as_monolingual(&self) -> Option<&MonolingualText> {
        match self {
            Self::MonolingualText(text) => Some(text),
            _ => None,
        }
    }

    /// Linked entity identifier text, when this is an entity link.
    #[must_use]
    pub fn as_entity_id(&self) -> Option<&str> {
        match self {
            Self::EntityId(reference) => Some(&reference.id),
            _ => None,
        }
    }

    /// Wire name of the value type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Time(_) => "time",
            Self::EntityId(_) => "wikibase-entityid",
            Self::MonolingualText(_) => "monolingualtext",
            Self::Quantity(_) => "quantity",
            Self::GlobeCoordinate(_) => "globecoordinate",
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Time(value) => f.write_str(&value.time),
            Self::EntityId(value) => f.write_str(&value.id),
            Self::MonolingualText(value) => write!(f, "{} ({})", value.text, value.language),
            Self::Quantity(value) => f.write_str(&value.amount),
            Self::GlobeCoordinate(value) => write!(f, "{}, {}", value.latitude, value.longitude),
        }
    }
}

/// Property datatype.
///
/// Unknown datatypes are preserved verbatim in [`Datatype::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Datatype {
    /// `string`
    String,
    /// `external-id`
    ExternalId,
    /// `url`
    Url,
    /// `time`
    Time,
    /// `wikibase-item`
    WikibaseItem,
    /// `wikibase-property`
    WikibaseProperty,
    /// `monolingualtext`
    MonolingualText,
    /// `quantity`
    Quantity,
    /// `globe-coordinate`
    GlobeCoordinate,
    /// Any other datatype string.
    Other(String),
}

impl Datatype {
    /// Wire name of the datatype.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::ExternalId => "external-id",
            Self::Url => "url",
            Self::Time => "time",
            Self::WikibaseItem => "wikibase-item",
            Self::WikibaseProperty => "wikibase-property",
            Self::MonolingualText => "monolingualtext",
            Self::Quantity => "quantity",
            Self::GlobeCoordinate => "globe-coordinate",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for Datatype {
    fn from(value: &str) -> Self {
        match value {
            "string" => Self::String,
            "external-id" => Self::ExternalId,
            "url" => Self::Url,
            "time" => Self::Time,
            "wikibase-item" => Self::WikibaseItem,
            "wikibase-property" => Self::WikibaseProperty,
            "monolingualtext" => Self::MonolingualText,
            "quantity" => Self::Quantity,
            "globe-coordinate" => Self::GlobeCoordinate,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Datatype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Datatype {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}
