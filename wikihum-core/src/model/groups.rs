//! Ordered property groups.
//!
//! Qualifiers, reference snaks and entity claims all share one shape: values
//! grouped by property, with the group order significant. [`PropertyGroups`]
//! stores the groups as an ordered sequence and derives a lookup index from
//! it, so an order list that disagrees with the stored groups cannot be
//! represented.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::{Snak, Statement};
use crate::PropertyId;

/// Values that know the property they are filed under.
pub trait Keyed {
    /// Property this value belongs to.
    fn property(&self) -> &PropertyId;
}

impl Keyed for Snak {
    fn property(&self) -> &PropertyId {
        &self.property
    }
}

impl Keyed for Statement {
    fn property(&self) -> &PropertyId {
        &self.main_snak.property
    }
}

/// Errors raised when assembling groups from an order list and a map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnakOrderError {
    /// The order list names a property with no values.
    #[error("order lists {property} but no values are present for it")]
    MissingGroup {
        /// Property named in the order list.
        property: PropertyId,
    },
    /// Values exist for a property absent from the order list.
    #[error("values for {property} are not listed in the order")]
    UnorderedGroup {
        /// Property missing from the order list.
        property: PropertyId,
    },
    /// A value was filed under a different property than its own.
    #[error("value for {found} filed under {expected}")]
    MismatchedProperty {
        /// Group key.
        expected: PropertyId,
        /// Property carried by the value.
        found: PropertyId,
    },
    /// The order list names a property twice.
    #[error("order lists {property} more than once")]
    DuplicateOrder {
        /// Repeated property.
        property: PropertyId,
    },
}

/// Ordered multimap of property to values.
#[derive(Debug, Clone)]
pub struct PropertyGroups<T> {
    groups: Vec<(PropertyId, Vec<T>)>,
    index: HashMap<PropertyId, usize>,
}

/// Qualifiers of a statement.
pub type Qualifiers = PropertyGroups<Snak>;

/// Statements of an entity.
pub type Claims = PropertyGroups<Statement>;

impl<T> Default for PropertyGroups<T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: PartialEq> PartialEq for PropertyGroups<T> {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl<T: Keyed> PropertyGroups<T> {
    /// Empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to its property's group, creating the group at the end
    /// of the order when absent.
    pub fn push(&mut self, value: T) {
        let property = value.property().clone();
        if let Some(values) = self
            .index
            .get(&property)
            .copied()
            .and_then(|slot| self.groups.get_mut(slot))
            .map(|(_, values)| values)
        {
            values.push(value);
            return;
        }
        self.index.insert(property.clone(), self.groups.len());
        self.groups.push((property, vec![value]));
    }

    /// Build groups from an explicit order list and a property map.
    ///
    /// Every property in `order` must have values, every key in `map` must be
    /// listed, and every value must carry its group's property.
    ///
    /// # Examples
    /// ```
    /// use std::collections::HashMap;
    /// use wikihum_core::{DataValue, Datatype, PropertyId, Qualifiers, Snak};
    ///
    /// let p40 = PropertyId::from_static("P40");
    /// let snak = Snak::value(p40.clone(), Datatype::String, DataValue::string("x"));
    /// let map = HashMap::from([(p40.clone(), vec![snak])]);
    /// let groups = Qualifiers::from_ordered(vec![p40.clone()], map)?;
    /// assert_eq!(groups.order().collect::<Vec<_>>(), vec![&p40]);
    /// # Ok::<(), wikihum_core::SnakOrderError>(())
    /// ```
    pub fn from_ordered<S: std::hash::BuildHasher>(
        order: Vec<PropertyId>,
        mut map: HashMap<PropertyId, Vec<T>, S>,
    ) -> Result<Self, SnakOrderError> {
        let mut seen = HashSet::with_capacity(order.len());
        let mut groups = Self::new();
        for property in order {
            if !seen.insert(property.clone()) {
                return Err(SnakOrderError::DuplicateOrder { property });
            }
            let values = map
                .remove(&property)
                .filter(|values| !values.is_empty())
                .ok_or_else(|| SnakOrderError::MissingGroup {
                    property: property.clone(),
                })?;
            if let Some(stray) = values.iter().find(|value| value.property() != &property) {
                return Err(SnakOrderError::MismatchedProperty {
                    expected: property,
                    found: stray.property().clone(),
                });
            }
            groups.index.insert(property.clone(), groups.groups.len());
            groups.groups.push((property, values));
        }
        if let Some(property) = map.into_keys().next() {
            return Err(SnakOrderError::UnorderedGroup { property });
        }
        Ok(groups)
    }
}

impl<T> PropertyGroups<T> {
    /// Values for `property`, empty when absent.
    #[must_use]
    pub fn get(&self, property: &PropertyId) -> &[T] {
        self.index
            .get(property)
            .and_then(|slot| self.groups.get(*slot))
            .map_or(&[], |(_, values)| values.as_slice())
    }

    /// Mutable values for `property`, when present.
    pub fn get_mut(&mut self, property: &PropertyId) -> Option<&mut Vec<T>> {
        let slot = *self.index.get(property)?;
        self.groups.get_mut(slot).map(|(_, values)| values)
    }

    /// First value for `property`.
    #[must_use]
    pub fn first(&self, property: &PropertyId) -> Option<&T> {
        self.get(property).first()
    }

    /// Whether any value is filed under `property`.
    #[must_use]
    pub fn contains(&self, property: &PropertyId) -> bool {
        self.index.contains_key(property)
    }

    /// Properties in group order.
    pub fn order(&self) -> impl Iterator<Item = &PropertyId> {
        self.groups.iter().map(|(property, _)| property)
    }

    /// Groups in order.
    pub fn groups(&self) -> impl Iterator<Item = (&PropertyId, &[T])> {
        self.groups
            .iter()
            .map(|(property, values)| (property, values.as_slice()))
    }

    /// Every value, group by group.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.groups.iter().flat_map(|(_, values)| values.iter())
    }

    /// Every value, mutably, group by group.
    ///
    /// Callers must not change the property a value is filed under.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.groups.iter_mut().flat_map(|(_, values)| values.iter_mut())
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of values across all groups.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.groups.iter().map(|(_, values)| values.len()).sum()
    }

    /// Remove the whole group for `property`, returning its values.
    pub fn remove_property(&mut self, property: &PropertyId) -> Vec<T> {
        let Some(slot) = self.index.get(property).copied() else {
            return Vec::new();
        };
        if slot >= self.groups.len() {
            return Vec::new();
        }
        let (_, values) = self.groups.remove(slot);
        self.reindex();
        values
    }

    /// Keep only values matching `keep`; groups left empty are dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        for (_, values) in &mut self.groups {
            values.retain(&mut keep);
        }
        self.groups.retain(|(_, values)| !values.is_empty());
        self.reindex();
    }

    /// Drop empty groups left behind by edits through [`Self::get_mut`].
    pub fn prune(&mut self) {
        self.retain(|_| true);
    }

    fn reindex(&mut self) {
        self.index = self
            .groups
            .iter()
            .enumerate()
            .map(|(slot, (property, _))| (property.clone(), slot))
            .collect();
    }
}

impl<T: Keyed> FromIterator<T> for PropertyGroups<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut groups = Self::new();
        for value in iter {
            groups.push(value);
        }
        groups
    }
}
