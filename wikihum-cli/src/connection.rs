//! Layered Wikibase connection settings.
//!
//! Values come from CLI flags, `WIKIHUM_CMDS_CONNECTION_*` environment
//! variables and the `[cmds.connection]` table of a configuration file, in
//! that order of precedence.

use std::time::Duration;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wikihum_data::{Credentials, DEFAULT_WIKIBASE_URL, WikibaseConfig};

use crate::CliError;

pub(crate) const ARG_WIKIBASE_URL: &str = "wikibase-url";
pub(crate) const ARG_API_URL: &str = "api-url";
pub(crate) const ARG_SPARQL_URL: &str = "sparql-url";
pub(crate) const ARG_USER_AGENT: &str = "user-agent";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_ACCESS_TOKEN: &str = "access-token";
pub(crate) const ARG_BOT_USERNAME: &str = "bot-username";
pub(crate) const ARG_BOT_PASSWORD: &str = "bot-password";
pub(crate) const ENV_BOT_USERNAME: &str = "WIKIHUM_CMDS_CONNECTION_BOT_USERNAME";
pub(crate) const ENV_BOT_PASSWORD: &str = "WIKIHUM_CMDS_CONNECTION_BOT_PASSWORD";

// Flattened into the top-level command; no doc comment so the parent keeps
// its own about text. The command name selects the configuration section.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "connection")]
#[ortho_config(prefix = "WIKIHUM")]
pub(crate) struct ConnectionArgs {
    /// Base URL of the wiki; the API and SPARQL endpoints derive from it.
    #[arg(long = ARG_WIKIBASE_URL, value_name = "url", global = true)]
    #[serde(default)]
    pub(crate) wikibase_url: Option<String>,
    /// Override the MediaWiki API endpoint (`api.php`).
    #[arg(long = ARG_API_URL, value_name = "url", global = true)]
    #[serde(default)]
    pub(crate) api_url: Option<String>,
    /// Override the SPARQL endpoint.
    #[arg(long = ARG_SPARQL_URL, value_name = "url", global = true)]
    #[serde(default)]
    pub(crate) sparql_url: Option<String>,
    /// User agent sent with every request.
    #[arg(long = ARG_USER_AGENT, value_name = "text", global = true)]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs", global = true)]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// OAuth 2 owner-only access token.
    #[arg(long = ARG_ACCESS_TOKEN, value_name = "token", global = true)]
    #[serde(default)]
    pub(crate) access_token: Option<String>,
    /// Bot password user name (`User@botname`).
    #[arg(long = ARG_BOT_USERNAME, value_name = "name", global = true)]
    #[serde(default)]
    pub(crate) bot_username: Option<String>,
    /// Bot password.
    #[arg(long = ARG_BOT_PASSWORD, value_name = "password", global = true)]
    #[serde(default)]
    pub(crate) bot_password: Option<String>,
}

impl ConnectionArgs {
    /// Merge configuration layers and resolve the connection.
    pub(crate) fn into_config(self) -> Result<WikibaseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.resolve()
    }

    /// Resolve these values, without further layering, into a config.
    pub(crate) fn resolve(self) -> Result<WikibaseConfig, CliError> {
        let credentials = self.credentials()?;
        let base = self.wikibase_url.as_deref().unwrap_or(DEFAULT_WIKIBASE_URL);
        let mut config = WikibaseConfig::new(base)?.with_credentials(credentials);
        if let Some(url) = self.api_url.as_deref() {
            config = config.with_api_url(url)?;
        }
        if let Some(url) = self.sparql_url.as_deref() {
            config = config.with_sparql_url(url)?;
        }
        if let Some(agent) = self.user_agent {
            config = config.with_user_agent(agent);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    fn credentials(&self) -> Result<Credentials, CliError> {
        match (
            self.access_token.clone(),
            self.bot_username.clone(),
            self.bot_password.clone(),
        ) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(CliError::ConflictingCredentials),
            (Some(token), None, None) => Ok(Credentials::AccessToken(token)),
            (None, Some(username), Some(password)) => {
                Ok(Credentials::BotPassword { username, password })
            }
            (None, Some(_), None) => Err(CliError::MissingArgument {
                field: ARG_BOT_PASSWORD,
                env: ENV_BOT_PASSWORD,
            }),
            (None, None, Some(_)) => Err(CliError::MissingArgument {
                field: ARG_BOT_USERNAME,
                env: ENV_BOT_USERNAME,
            }),
            (None, None, None) => Ok(Credentials::Anonymous),
        }
    }
}
