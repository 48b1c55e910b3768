//! Serde mirrors of the Wikibase entity JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wikihum_core::{
    DataValue, Datatype, PropertyId, Qualifiers, Rank, Reference, Snak, SnakType, Statement,
    StatementId, StatementKind,
};

use super::{DecodeError, ordered::OrderedMap};

/// Label, description or alias.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct RawTerm {
    pub language: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<String>,
}

impl RawTerm {
    pub(crate) fn new(language: &str, value: &str) -> Self {
        Self {
            language: language.to_owned(),
            value: value.to_owned(),
            add: None,
            remove: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct RawSnak {
    pub snaktype: SnakType,
    pub property: PropertyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datavalue: Option<DataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Datatype>,
}

pub(crate) type RawSnaks = OrderedMap<PropertyId, Vec<RawSnak>>;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct RawReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    pub snaks: RawSnaks,
    #[serde(rename = "snaks-order", default)]
    pub snaks_order: Vec<PropertyId>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct RawStatement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StatementId>,
    pub mainsnak: RawSnak,
    #[serde(rename = "type", default)]
    pub kind: StatementKind,
    #[serde(default)]
    pub rank: Rank,
    #[serde(default, skip_serializing_if = "OrderedMap::is_empty")]
    pub qualifiers: RawSnaks,
    #[serde(
        rename = "qualifiers-order",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub qualifiers_order: Vec<PropertyId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<RawReference>,
}

/// Entity as returned by `wbgetentities`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct RawEntity {
    pub id: String,
    #[serde(default)]
    pub lastrevid: Option<u64>,
    #[serde(default)]
    pub missing: Option<serde_json::Value>,
    #[serde(default)]
    pub labels: OrderedMap<String, RawTerm>,
    #[serde(default)]
    pub descriptions: OrderedMap<String, RawTerm>,
    #[serde(default)]
    pub aliases: OrderedMap<String, Vec<RawTerm>>,
    #[serde(default, alias = "statements")]
    pub claims: OrderedMap<PropertyId, Vec<RawStatement>>,
}

impl RawSnak {
    pub(crate) fn into_snak(self) -> Result<Snak, DecodeError> {
        let datavalue = match self.snaktype {
            SnakType::Value => Some(self.datavalue.ok_or_else(|| DecodeError::MissingValue {
                property: self.property.clone(),
            })?),
            SnakType::SomeValue | SnakType::NoValue => None,
        };
        Ok(Snak {
            property: self.property,
            snak_type: self.snaktype,
            datatype: self.datatype,
            datavalue,
            hash: self.hash,
        })
    }

    pub(crate) fn from_snak(snak: &Snak) -> Self {
        Self {
            snaktype: snak.snak_type,
            property: snak.property.clone(),
            hash: snak.hash.clone(),
            datavalue: snak.datavalue.clone(),
            datatype: snak.datatype.clone(),
        }
    }
}

/// Rebuild ordered groups from a snak map and its order list.
///
/// A missing order list falls back to the key order of the object.
pub(crate) fn decode_snaks(
    order: Vec<PropertyId>,
    snaks: RawSnaks,
) -> Result<Qualifiers, DecodeError> {
    let effective = if order.is_empty() {
        snaks.keys().cloned().collect()
    } else {
        order
    };
    let mut grouped = HashMap::with_capacity(effective.len());
    for (property, values) in snaks.0 {
        let decoded = values
            .into_iter()
            .map(RawSnak::into_snak)
            .collect::<Result<Vec<_>, _>>()?;
        grouped.insert(property, decoded);
    }
    Ok(Qualifiers::from_ordered(effective, grouped)?)
}

pub(crate) fn encode_snaks(groups: &Qualifiers) -> (RawSnaks, Vec<PropertyId>) {
    let snaks = groups
        .groups()
        .map(|(property, values)| {
            (
                property.clone(),
                values.iter().map(RawSnak::from_snak).collect(),
            )
        })
        .collect();
    (snaks, groups.order().cloned().collect())
}

impl RawReference {
    pub(crate) fn into_reference(self) -> Result<Reference, DecodeError> {
        Ok(Reference {
            hash: self.hash,
            snaks: decode_snaks(self.snaks_order, self.snaks)?,
        })
    }

    pub(crate) fn from_reference(reference: &Reference) -> Self {
        let (snaks, snaks_order) = encode_snaks(&reference.snaks);
        Self {
            hash: reference.hash.clone(),
            snaks,
            snaks_order,
        }
    }
}

impl RawStatement {
    pub(crate) fn into_statement(self) -> Result<Statement, DecodeError> {
        Ok(Statement {
            id: self.id,
            main_snak: self.mainsnak.into_snak()?,
            kind: self.kind,
            rank: self.rank,
            qualifiers: decode_snaks(self.qualifiers_order, self.qualifiers)?,
            references: self
                .references
                .into_iter()
                .map(RawReference::into_reference)
                .collect::<Result<_, _>>()?,
        })
    }

    pub(crate) fn from_statement(statement: &Statement) -> Self {
        let (qualifiers, qualifiers_order) = encode_snaks(&statement.qualifiers);
        Self {
            id: statement.id.clone(),
            mainsnak: RawSnak::from_snak(&statement.main_snak),
            kind: statement.kind,
            rank: statement.rank,
            qualifiers,
            qualifiers_order,
            references: statement
                .references
                .iter()
                .map(RawReference::from_reference)
                .collect(),
        }
    }
}
