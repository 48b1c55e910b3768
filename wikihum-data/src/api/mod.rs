//! [`EntityStore`] backed by the MediaWiki action API.
//!
//! Reads use `wbgetentities`; writes use `wbeditentity` with `baserevid` so an
//! entity edited by someone else since it was loaded is reported as a
//! conflict instead of being overwritten. Deletions go through
//! `action=delete` on the entity's page.
//!
//! Authentication is lazy: bot-password clients log in before their first
//! write, and the CSRF token is fetched once and reused until the API
//! rejects it.

mod response;

use std::cell::{Cell, RefCell};

use log::{debug, info};
use reqwest::{Method, RequestBuilder};
use wikihum_core::{Entity, EntityId, EntityStore, RevisionId, StoreError, WriteError};

use crate::{
    ClientBuildError, Credentials, WikibaseConfig,
    transport::{HttpSession, TransportError},
    wire::encode_edit,
};
use response::{
    BAD_TOKEN, DeleteResponse, EditResponse, GetEntitiesResponse, LoginResponse, TokenResponse,
    entity_from_response, revision_from_response, write_error,
};

type Params = Vec<(&'static str, String)>;

/// MediaWiki API client for one Wikibase instance.
///
/// # Examples
/// ```no_run
/// use wikihum_core::{EntityId, EntityStore};
/// use wikihum_data::{MediaWikiClient, WikibaseConfig};
///
/// let config = WikibaseConfig::new("https://wikihum.lab.dariah.pl")?;
/// let client = MediaWikiClient::new(config)?;
/// let entity = client.get(&EntityId::parse("Q17375")?)?;
/// println!("{:?}", entity.label("pl"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct MediaWikiClient {
    session: HttpSession,
    config: WikibaseConfig,
    csrf_token: RefCell<Option<String>>,
    logged_in: Cell<bool>,
}

impl MediaWikiClient {
    /// Client for the API configured in `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(config: WikibaseConfig) -> Result<Self, ClientBuildError> {
        let session = HttpSession::new(&config, true)?;
        Ok(Self {
            session,
            config,
            csrf_token: RefCell::new(None),
            logged_in: Cell::new(false),
        })
    }

    /// Configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &WikibaseConfig {
        &self.config
    }

    fn request(&self, method: Method, params: &Params) -> RequestBuilder {
        let builder = self
            .session
            .client()
            .request(method.clone(), self.config.api_url.clone());
        let with_params = if method == Method::GET {
            builder.query(params)
        } else {
            builder.form(params)
        };
        match &self.config.credentials {
            Credentials::AccessToken(token) => with_params.bearer_auth(token),
            Credentials::Anonymous | Credentials::BotPassword { .. } => with_params,
        }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        params: &Params,
    ) -> Result<T, TransportError> {
        let action = params
            .iter()
            .find(|(key, _)| *key == "action")
            .map_or("", |(_, value)| value.as_str());
        debug!("{method} {} action={action}", self.config.api_url);
        self.session
            .send_json(self.request(method, params), self.config.api_url.as_str())
            .await
    }

    async fn token(&self, kind: &str) -> Result<Option<String>, WriteError> {
        let response: TokenResponse = self
            .call(Method::GET, &token_params(kind))
            .await
            .map_err(transport_write_error)?;
        if let Some(error) = response.error {
            return Err(WriteError::Api {
                code: error.code,
                message: error.info,
            });
        }
        let tokens = response.query.map(|query| query.tokens).unwrap_or_default();
        Ok(match kind {
            "login" => tokens.logintoken,
            _ => tokens.csrftoken,
        })
    }

    async fn ensure_login(&self) -> Result<(), WriteError> {
        let Credentials::BotPassword { username, password } = &self.config.credentials else {
            return Ok(());
        };
        if self.logged_in.get() {
            return Ok(());
        }
        let login_token = self.token("login").await?.ok_or_else(|| WriteError::Api {
            code: "login-failed".to_owned(),
            message: "no login token returned".to_owned(),
        })?;
        let response: LoginResponse = self
            .call(Method::POST, &login_params(username, password, &login_token))
            .await
            .map_err(transport_write_error)?;
        check_login(response)?;
        info!("logged in to {} as {username}", self.config.api_url);
        self.logged_in.set(true);
        Ok(())
    }

    async fn csrf_token(&self) -> Result<String, WriteError> {
        if let Some(token) = self.csrf_token.borrow().clone() {
            return Ok(token);
        }
        self.ensure_login().await?;
        let token = self.token("csrf").await?.ok_or_else(|| WriteError::Api {
            code: BAD_TOKEN.to_owned(),
            message: "no CSRF token returned".to_owned(),
        })?;
        self.csrf_token.replace(Some(token.clone()));
        Ok(token)
    }

    fn forget_token_on(&self, err: &WriteError) {
        if matches!(err, WriteError::Api { code, .. } if code == BAD_TOKEN) {
            self.csrf_token.replace(None);
        }
    }

    async fn get_async(&self, id: &EntityId) -> Result<Entity, StoreError> {
        let response: GetEntitiesResponse = self
            .call(Method::GET, &get_params(id))
            .await
            .map_err(|err| StoreError::Transport {
                message: err.to_string(),
            })?;
        entity_from_response(id, response)
    }

    async fn write_async(&self, entity: &Entity, summary: &str) -> Result<RevisionId, WriteError> {
        let data = encode_edit(entity).map_err(|err| WriteError::Transport {
            message: format!("failed to encode edit of {}: {err}", entity.id),
        })?;
        let token = self.csrf_token().await?;
        let response: EditResponse = self
            .call(Method::POST, &edit_params(entity, data, summary, token))
            .await
            .map_err(transport_write_error)?;
        revision_from_response(&entity.id, response).inspect_err(|err| self.forget_token_on(err))
    }

    async fn delete_async(&self, id: &EntityId, reason: &str) -> Result<(), WriteError> {
        let token = self.csrf_token().await?;
        let title = self.config.page_title(id);
        let response: DeleteResponse = self
            .call(Method::POST, &delete_params(&title, reason, token))
            .await
            .map_err(transport_write_error)?;
        if let Some(error) = response.error {
            let err = write_error(id, error);
            self.forget_token_on(&err);
            return Err(err);
        }
        if response.delete.is_none() {
            return Err(WriteError::Api {
                code: "no-delete".to_owned(),
                message: format!("deletion of {title} was not confirmed"),
            });
        }
        Ok(())
    }
}

impl EntityStore for MediaWikiClient {
    fn get(&self, id: &EntityId) -> Result<Entity, StoreError> {
        self.session.block_on(self.get_async(id))
    }

    fn write(&self, entity: &Entity, summary: &str) -> Result<RevisionId, WriteError> {
        self.session.block_on(self.write_async(entity, summary))
    }

    fn delete(&self, id: &EntityId, reason: &str) -> Result<(), WriteError> {
        self.session.block_on(self.delete_async(id, reason))
    }
}

fn transport_write_error(err: TransportError) -> WriteError {
    WriteError::Transport {
        message: err.to_string(),
    }
}

fn check_login(response: LoginResponse) -> Result<(), WriteError> {
    if let Some(error) = response.error {
        return Err(WriteError::Api {
            code: error.code,
            message: error.info,
        });
    }
    match response.login {
        Some(login) if login.result == "Success" => Ok(()),
        Some(login) => Err(WriteError::Api {
            code: "login-failed".to_owned(),
            message: login.reason.unwrap_or(login.result),
        }),
        None => Err(WriteError::Api {
            code: "login-failed".to_owned(),
            message: "empty login response".to_owned(),
        }),
    }
}

fn get_params(id: &EntityId) -> Params {
    vec![
        ("action", "wbgetentities".to_owned()),
        ("ids", id.to_string()),
        ("format", "json".to_owned()),
    ]
}

fn token_params(kind: &str) -> Params {
    vec![
        ("action", "query".to_owned()),
        ("meta", "tokens".to_owned()),
        ("type", kind.to_owned()),
        ("format", "json".to_owned()),
    ]
}

fn login_params(username: &str, password: &str, token: &str) -> Params {
    vec![
        ("action", "login".to_owned()),
        ("lgname", username.to_owned()),
        ("lgpassword", password.to_owned()),
        ("lgtoken", token.to_owned()),
        ("format", "json".to_owned()),
    ]
}

fn edit_params(entity: &Entity, data: String, summary: &str, token: String) -> Params {
    let mut params = vec![
        ("action", "wbeditentity".to_owned()),
        ("id", entity.id.to_string()),
        ("data", data),
        ("summary", summary.to_owned()),
        ("bot", "1".to_owned()),
        ("format", "json".to_owned()),
    ];
    if let Some(revision) = entity.last_revision {
        params.push(("baserevid", revision.to_string()));
    }
    params.push(("token", token));
    params
}

fn delete_params(title: &str, reason: &str, token: String) -> Params {
    vec![
        ("action", "delete".to_owned()),
        ("title", title.to_owned()),
        ("reason", reason.to_owned()),
        ("format", "json".to_owned()),
        ("token", token),
    ]
}
