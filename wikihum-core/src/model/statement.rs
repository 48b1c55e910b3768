//! Statements and references.

use super::{Qualifiers, Snak};
use crate::{PropertyId, StatementId};

/// Provenance record: ordered snaks grouped by property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reference {
    /// Server-computed hash; cleared on copies.
    pub hash: Option<String>,
    /// Snaks in order.
    pub snaks: Qualifiers,
}

impl Reference {
    /// Reference holding `snaks` in the given order.
    #[must_use]
    pub fn from_snaks(snaks: impl IntoIterator<Item = Snak>) -> Self {
        Self {
            hash: None,
            snaks: snaks.into_iter().collect(),
        }
    }

    /// First snak filed under `property`.
    #[must_use]
    pub fn first(&self, property: &PropertyId) -> Option<&Snak> {
        self.snaks.first(property)
    }
}

/// Statement rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rank {
    /// Preferred over normal statements.
    Preferred,
    /// Default rank.
    #[default]
    Normal,
    /// Kept for the record only.
    Deprecated,
}

impl Rank {
    /// Wire name of the rank.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preferred => "preferred",
            Self::Normal => "normal",
            Self::Deprecated => "deprecated",
        }
    }
}

/// Whether the claim was stored as a full statement or a bare claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StatementKind {
    /// `statement`
    #[default]
    Statement,
    /// `claim`
    Claim,
}

impl StatementKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Statement => "statement",
            Self::Claim => "claim",
        }
    }
}

/// Typed value attached to an entity under a property.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Server-assigned id; `None` until saved.
    pub id: Option<StatementId>,
    /// Main value.
    pub main_snak: Snak,
    /// Statement or claim.
    pub kind: StatementKind,
    /// Rank.
    pub rank: Rank,
    /// Qualifiers in order.
    pub qualifiers: Qualifiers,
    /// References in order.
    pub references: Vec<Reference>,
}

impl Statement {
    /// New unsaved statement with no qualifiers or references.
    #[must_use]
    pub fn new(main_snak: Snak) -> Self {
        Self {
            id: None,
            main_snak,
            kind: StatementKind::Statement,
            rank: Rank::Normal,
            qualifiers: Qualifiers::new(),
            references: Vec::new(),
        }
    }

    /// Add a qualifier, keeping first-appearance order.
    #[must_use]
    pub fn with_qualifier(mut self, snak: Snak) -> Self {
        self.qualifiers.push(snak);
        self
    }

    /// Append a reference.
    #[must_use]
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    /// Property of the main snak.
    #[must_use]
    pub const fn property(&self) -> &PropertyId {
        &self.main_snak.property
    }
}
