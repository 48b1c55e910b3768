//! SPARQL query abstraction and result rows.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{EntityId, StatementId};

/// Errors raised while running a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The endpoint answered with a failure status.
    #[error("query endpoint {url} returned {status}: {message}")]
    Status {
        /// Endpoint URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },
    /// The request did not complete.
    #[error("query transport failure: {message}")]
    Transport {
        /// Failure detail.
        message: String,
    },
    /// The response was not valid SPARQL JSON.
    #[error("failed to decode query results: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },
}

/// Kind of RDF term in a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BindingKind {
    /// IRI.
    Uri,
    /// Literal, possibly typed or language-tagged.
    #[cfg_attr(feature = "serde", serde(alias = "typed-literal"))]
    Literal,
    /// Blank node.
    Bnode,
}

/// Value bound to one variable in one result row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Binding {
    /// Term kind.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: BindingKind,
    /// Lexical value.
    pub value: String,
    /// Language tag of a literal.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")
    )]
    pub language: Option<String>,
    /// Datatype IRI of a typed literal.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub datatype: Option<String>,
}

impl Binding {
    /// IRI binding.
    #[must_use]
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            kind: BindingKind::Uri,
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// Plain literal binding.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: BindingKind::Literal,
            value: value.into(),
            language: None,
            datatype: None,
        }
    }
}

/// One solution: variable name to binding. Unbound variables are absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QueryRow {
    bindings: BTreeMap<String, Binding>,
}

impl QueryRow {
    /// Row with the given bindings.
    #[must_use]
    pub fn new(bindings: impl IntoIterator<Item = (String, Binding)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Binding for `variable`.
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&Binding> {
        self.bindings.get(variable)
    }

    /// Lexical value bound to `variable`.
    #[must_use]
    pub fn value(&self, variable: &str) -> Option<&str> {
        self.get(variable).map(|binding| binding.value.as_str())
    }

    /// Entity id taken from the trailing segment of the bound IRI.
    #[must_use]
    pub fn entity_id(&self, variable: &str) -> Option<EntityId> {
        self.value(variable).and_then(|value| EntityId::parse(value).ok())
    }

    /// Statement id taken from a statement node IRI.
    #[must_use]
    pub fn statement_id(&self, variable: &str) -> Option<StatementId> {
        self.value(variable)
            .and_then(|value| StatementId::from_uri(value).ok())
    }
}

/// Result table of a SELECT query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryResults {
    /// Projected variables, in order.
    pub variables: Vec<String>,
    /// Solutions, in order.
    pub rows: Vec<QueryRow>,
}

impl QueryResults {
    /// Values bound to `variable`, skipping rows where it is unbound.
    pub fn column<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().filter_map(move |row| row.value(variable))
    }
}

/// Runs SPARQL SELECT queries.
pub trait QueryService {
    /// Execute `query` and return its solutions.
    fn select(&self, query: &str) -> Result<QueryResults, QueryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn row_exposes_entity_and_statement_ids() {
        let row = QueryRow::new([
            (
                "item".to_owned(),
                Binding::uri("https://wikihum.example/entity/Q17"),
            ),
            (
                "statement".to_owned(),
                Binding::uri("https://wikihum.example/entity/statement/Q17-ab-cd"),
            ),
        ]);
        assert_eq!(row.entity_id("item"), Some(EntityId::from_static("Q17")));
        assert_eq!(
            row.statement_id("statement").map(|id| id.to_string()),
            Some("Q17$ab-cd".to_owned())
        );
        assert!(row.value("missing").is_none());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn binding_decodes_language_tag() {
        let json = serde_json::json!({"type": "literal", "value": "Foo", "xml:lang": "pl"});
        let binding: Binding = serde_json::from_value(json).expect("decode binding");
        assert_eq!(binding.language.as_deref(), Some("pl"));
        assert_eq!(binding.kind, BindingKind::Literal);
    }
}
