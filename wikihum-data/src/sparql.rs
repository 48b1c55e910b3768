//! [`QueryService`] backed by a SPARQL endpoint.

use log::debug;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use wikihum_core::{QueryError, QueryResults, QueryRow, QueryService};

use crate::{
    ClientBuildError, WikibaseConfig,
    transport::{HttpSession, TransportError},
};

const RESULTS_JSON: &str = "application/sparql-results+json";

#[derive(Debug, Default, Deserialize)]
struct RawHead {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBindings {
    #[serde(default)]
    bindings: Vec<QueryRow>,
}

#[derive(Debug, Deserialize)]
struct RawResults {
    #[serde(default)]
    head: RawHead,
    #[serde(default)]
    results: RawBindings,
}

impl From<RawResults> for QueryResults {
    fn from(raw: RawResults) -> Self {
        Self {
            variables: raw.head.vars,
            rows: raw.results.bindings,
        }
    }
}

/// Decode a SPARQL 1.1 JSON results document.
///
/// # Examples
/// ```
/// use wikihum_data::decode_results;
///
/// let results = decode_results(r#"{
///     "head": {"vars": ["item"]},
///     "results": {"bindings": [
///         {"item": {"type": "uri", "value": "https://wikihum.lab.dariah.pl/entity/Q1"}}
///     ]}
/// }"#)?;
/// assert_eq!(results.rows[0].entity_id("item").map(|id| id.to_string()), Some("Q1".into()));
/// # Ok::<(), wikihum_core::QueryError>(())
/// ```
///
/// # Errors
/// Returns [`QueryError::Decode`] when the body is not a results document.
pub fn decode_results(body: &str) -> Result<QueryResults, QueryError> {
    serde_json::from_str::<RawResults>(body)
        .map(QueryResults::from)
        .map_err(|err| QueryError::Decode {
            message: err.to_string(),
        })
}

/// SPARQL client posting SELECT queries to the configured endpoint.
#[derive(Debug)]
pub struct SparqlClient {
    session: HttpSession,
    endpoint: url::Url,
}

impl SparqlClient {
    /// Client for the SPARQL endpoint in `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(config: &WikibaseConfig) -> Result<Self, ClientBuildError> {
        Ok(Self {
            session: HttpSession::new(config, false)?,
            endpoint: config.sparql_url.clone(),
        })
    }

    async fn select_async(&self, query: &str) -> Result<QueryResults, QueryError> {
        debug!("POST {} ({} bytes of SPARQL)", self.endpoint, query.len());
        let request = self
            .session
            .client()
            .post(self.endpoint.clone())
            .header(ACCEPT, RESULTS_JSON)
            .form(&[("query", query)]);
        let raw: RawResults = self
            .session
            .send_json(request, self.endpoint.as_str())
            .await
            .map_err(query_error)?;
        let results = QueryResults::from(raw);
        debug!("query returned {} rows", results.rows.len());
        Ok(results)
    }
}

impl QueryService for SparqlClient {
    fn select(&self, query: &str) -> Result<QueryResults, QueryError> {
        self.session.block_on(self.select_async(query))
    }
}

fn query_error(err: TransportError) -> QueryError {
    match err {
        TransportError::Http {
            url,
            status,
            message,
        } => QueryError::Status {
            url,
            status,
            message,
        },
        TransportError::Decode { message, .. } => QueryError::Decode { message },
        other @ (TransportError::Timeout { .. } | TransportError::Network { .. }) => {
            QueryError::Transport {
                message: other.to_string(),
            }
        }
    }
}
