//! Snaks: the atomic property/value unit.

use super::{DataValue, Datatype};
use crate::PropertyId;

/// Whether a snak carries a concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SnakType {
    /// A concrete value is present.
    #[default]
    Value,
    /// Some unknown value.
    SomeValue,
    /// Explicitly no value.
    NoValue,
}

impl SnakType {
    /// Wire name of the snak type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::SomeValue => "somevalue",
            Self::NoValue => "novalue",
        }
    }
}

/// Property, datatype and optional value.
///
/// `datavalue` is `None` unless `snak_type` is [`SnakType::Value`].
#[derive(Debug, Clone, PartialEq)]
pub struct Snak {
    /// Property the snak belongs to.
    pub property: PropertyId,
    /// Snak type.
    pub snak_type: SnakType,
    /// Property datatype, when known.
    pub datatype: Option<Datatype>,
    /// Payload, for value snaks.
    pub datavalue: Option<DataValue>,
    /// Server-computed hash; cleared on copies.
    pub hash: Option<String>,
}

impl Snak {
    /// Value snak with the given datatype and payload.
    ///
    /// # Examples
    /// ```
    /// use wikihum_core::{DataValue, Datatype, PropertyId, Snak, SnakType};
    ///
    /// let snak = Snak::value(
    ///     PropertyId::from_static("P2"),
    ///     Datatype::Url,
    ///     DataValue::string("https://example.org"),
    /// );
    /// assert_eq!(snak.snak_type, SnakType::Value);
    /// assert!(snak.hash.is_none());
    /// ```
    #[must_use]
    pub const fn value(property: PropertyId, datatype: Datatype, datavalue: DataValue) -> Self {
        Self {
            property,
            snak_type: SnakType::Value,
            datatype: Some(datatype),
            datavalue: Some(datavalue),
            hash: None,
        }
    }

    /// Snak without a value (`somevalue` or `novalue`).
    #[must_use]
    pub const fn without_value(property: PropertyId, snak_type: SnakType) -> Self {
        Self {
            property,
            snak_type,
            datatype: None,
            datavalue: None,
            hash: None,
        }
    }

    /// Copy carrying the same property, type, datatype and value but no hash.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            property: self.property.clone(),
            snak_type: self.snak_type,
            datatype: self.datatype.clone(),
            datavalue: self.datavalue.clone(),
            hash: None,
        }
    }
}
