//! Statement reconciliation.
//!
//! Two operations over [`Statement`] values:
//! - [`are_equivalent`] decides whether two statements carry the same value,
//!   qualifiers and references, reporting the first difference found.
//! - [`copy_statement`] and [`copy_reference`] build independent copies that
//!   can be attached to another entity or property.
//!
//! Both are pure: no store access and no logging.

use std::fmt;

use crate::{PropertyId, Qualifiers, Rank, Reference, Snak, Statement};

/// First difference found between two statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mismatch {
    /// Main snak values differ.
    Value,
    /// Qualifier property order differs.
    QualifierOrder,
    /// A qualifier value differs.
    Qualifiers,
    /// The statements hold different numbers of references.
    ReferenceCount,
    /// Both statements hold more than one reference.
    TooManyReferences,
    /// Snak order of the reference differs.
    ReferenceOrder,
    /// A reference snak value differs.
    References,
}

impl Mismatch {
    /// Human-readable reason, as written to reports.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Value => "value or language not equal",
            Self::QualifierOrder => "qualifiers order not equal",
            Self::Qualifiers => "qualifiers not equal",
            Self::ReferenceCount => "number of references not equal",
            Self::TooManyReferences => "too many references",
            Self::ReferenceOrder => "references order not equal",
            Self::References => "references not equal",
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Outcome of [`are_equivalent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equivalence {
    /// Value, qualifiers and references all match.
    Equivalent,
    /// The statements differ.
    Different(Mismatch),
}

impl Equivalence {
    /// Whether the statements matched.
    #[must_use]
    pub const fn is_equivalent(self) -> bool {
        matches!(self, Self::Equivalent)
    }

    /// Reason for the difference; empty when equivalent.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Equivalent => "",
            Self::Different(mismatch) => mismatch.reason(),
        }
    }
}

/// Compare two statements.
///
/// Checks run in a fixed order and the first failure is reported:
/// main value, qualifier order, first qualifier value per property,
/// reference count, then the snak order and first snak value per property
/// of the single reference. Statements with more than one reference are
/// never considered equivalent. Statements without references compare on
/// value and qualifiers alone.
///
/// # Examples
/// ```
/// use wikihum_core::{DataValue, Datatype, PropertyId, Snak, Statement, are_equivalent};
///
/// let main = Snak::value(
///     PropertyId::from_static("P54"),
///     Datatype::MonolingualText,
///     DataValue::monolingual("Foo", "pl"),
/// );
/// let a = Statement::new(main.clone());
/// let b = Statement::new(main);
/// assert!(are_equivalent(&a, &b).is_equivalent());
/// assert_eq!(are_equivalent(&a, &b).reason(), "");
/// ```
#[must_use]
pub fn are_equivalent(a: &Statement, b: &Statement) -> Equivalence {
    match first_mismatch(a, b) {
        Some(mismatch) => Equivalence::Different(mismatch),
        None => Equivalence::Equivalent,
    }
}

fn first_mismatch(a: &Statement, b: &Statement) -> Option<Mismatch> {
    if a.main_snak.datavalue != b.main_snak.datavalue {
        return Some(Mismatch::Value);
    }
    if !same_order(&a.qualifiers, &b.qualifiers) {
        return Some(Mismatch::QualifierOrder);
    }
    if !first_values_match(&a.qualifiers, &b.qualifiers) {
        return Some(Mismatch::Qualifiers);
    }
    if a.references.len() != b.references.len() {
        return Some(Mismatch::ReferenceCount);
    }
    if a.references.len() > 1 {
        return Some(Mismatch::TooManyReferences);
    }
    let (Some(ref_a), Some(ref_b)) = (a.references.first(), b.references.first()) else {
        return None;
    };
    if !same_order(&ref_a.snaks, &ref_b.snaks) {
        return Some(Mismatch::ReferenceOrder);
    }
    if !first_values_match(&ref_a.snaks, &ref_b.snaks) {
        return Some(Mismatch::References);
    }
    None
}

fn same_order(a: &Qualifiers, b: &Qualifiers) -> bool {
    a.len() == b.len() && a.order().eq(b.order())
}

// Only the first snak per property is compared.
fn first_values_match(a: &Qualifiers, b: &Qualifiers) -> bool {
    a.order().all(|property| {
        let left = a.first(property).map(|snak| &snak.datavalue);
        let right = b.first(property).map(|snak| &snak.datavalue);
        left == right
    })
}

/// Build an independent copy of `source`.
///
/// The copy keeps the main snak type, value and datatype, the statement kind,
/// every qualifier and every reference in order. It has no id, no hashes and
/// normal rank. When `target_property` is given, the main snak is filed under
/// it instead of the source property.
///
/// # Examples
/// ```
/// use wikihum_core::{DataValue, Datatype, PropertyId, Rank, Snak, Statement, copy_statement};
///
/// let mut source = Statement::new(Snak::value(
///     PropertyId::from_static("P54"),
///     Datatype::String,
///     DataValue::string("x"),
/// ));
/// source.rank = Rank::Preferred;
/// let copy = copy_statement(&source, Some(&PropertyId::from_static("P55")));
/// assert_eq!(copy.property().as_str(), "P55");
/// assert_eq!(copy.rank, Rank::Normal);
/// assert!(copy.id.is_none());
/// ```
#[must_use]
pub fn copy_statement(source: &Statement, target_property: Option<&PropertyId>) -> Statement {
    let mut main_snak = source.main_snak.detached();
    if let Some(property) = target_property {
        main_snak.property = property.clone();
    }
    Statement {
        id: None,
        main_snak,
        kind: source.kind,
        rank: Rank::Normal,
        qualifiers: detach_all(&source.qualifiers),
        references: source.references.iter().map(copy_reference).collect(),
    }
}

/// Build an independent copy of `source` with no hashes.
#[must_use]
pub fn copy_reference(source: &Reference) -> Reference {
    Reference {
        hash: None,
        snaks: detach_all(&source.snaks),
    }
}

fn detach_all(snaks: &Qualifiers) -> Qualifiers {
    snaks.iter().map(Snak::detached).collect()
}
