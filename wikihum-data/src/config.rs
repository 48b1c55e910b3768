//! Connection settings for a Wikibase instance.

use std::{fmt, time::Duration};

use url::Url;

use crate::transport::ClientBuildError;

/// Instance the maintenance workflows were written for.
pub const DEFAULT_WIKIBASE_URL: &str = "https://wikihum.lab.dariah.pl";

/// Default user agent for API and SPARQL requests.
pub const DEFAULT_USER_AGENT: &str = "wikihum-maintenance/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How the API client authenticates.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    /// No authentication; reads only.
    #[default]
    Anonymous,
    /// OAuth 2 owner-only access token, sent as a bearer token.
    AccessToken(String),
    /// Bot password created through `Special:BotPasswords`.
    BotPassword {
        /// `User@botname`.
        username: String,
        /// Generated bot password.
        password: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Self::BotPassword { username, .. } => f
                .debug_struct("BotPassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Endpoints, identity and timeouts of a Wikibase instance.
///
/// Built once from configuration and passed by reference to the clients.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wikihum_data::WikibaseConfig;
///
/// let config = WikibaseConfig::new("https://wikihum.lab.dariah.pl")?
///     .with_timeout(Duration::from_secs(60));
/// assert_eq!(config.api_url.as_str(), "https://wikihum.lab.dariah.pl/api.php");
/// assert_eq!(config.entity_base, "https://wikihum.lab.dariah.pl/entity/");
/// # Ok::<(), wikihum_data::ClientBuildError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikibaseConfig {
    /// MediaWiki `api.php` endpoint.
    pub api_url: Url,
    /// SPARQL endpoint.
    pub sparql_url: Url,
    /// Prefix of entity concept URIs returned by SPARQL.
    pub entity_base: String,
    /// Prefix of item wiki pages, used for report links.
    pub item_page_base: String,
    /// Namespace holding item pages.
    pub item_namespace: String,
    /// Namespace holding property pages.
    pub property_namespace: String,
    /// User agent for every request.
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Authentication.
    pub credentials: Credentials,
}

impl WikibaseConfig {
    /// Configuration for the instance at `wikibase_url`, with the standard
    /// `api.php`, `bigdata/sparql` and `entity/` locations beneath it.
    ///
    /// # Errors
    /// Returns [`ClientBuildError::InvalidUrl`] when `wikibase_url` is not an
    /// absolute URL.
    pub fn new(wikibase_url: &str) -> Result<Self, ClientBuildError> {
        let base = wikibase_url.trim_end_matches('/');
        Ok(Self {
            api_url: parse_url(&format!("{base}/api.php"))?,
            sparql_url: parse_url(&format!("{base}/bigdata/sparql"))?,
            entity_base: format!("{base}/entity/"),
            item_page_base: format!("{base}/wiki/Item:"),
            item_namespace: "Item".to_owned(),
            property_namespace: "Property".to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            credentials: Credentials::Anonymous,
        })
    }

    /// Override the API endpoint.
    ///
    /// # Errors
    /// Returns [`ClientBuildError::InvalidUrl`] for a malformed URL.
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ClientBuildError> {
        self.api_url = parse_url(url)?;
        Ok(self)
    }

    /// Override the SPARQL endpoint.
    ///
    /// # Errors
    /// Returns [`ClientBuildError::InvalidUrl`] for a malformed URL.
    pub fn with_sparql_url(mut self, url: &str) -> Result<Self, ClientBuildError> {
        self.sparql_url = parse_url(url)?;
        Ok(self)
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Page title of an entity, as expected by `action=delete`.
    #[must_use]
    pub fn page_title(&self, id: &wikihum_core::EntityId) -> String {
        match id.kind() {
            wikihum_core::EntityKind::Property => {
                format!("{}:{id}", self.property_namespace)
            }
            wikihum_core::EntityKind::Item => format!("{}:{id}", self.item_namespace),
            wikihum_core::EntityKind::Lexeme => format!("Lexeme:{id}"),
        }
    }
}

fn parse_url(url: &str) -> Result<Url, ClientBuildError> {
    Url::parse(url).map_err(|source| ClientBuildError::InvalidUrl {
        url: url.to_owned(),
        source,
    })
}
