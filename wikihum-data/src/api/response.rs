//! MediaWiki API response bodies and their mapping onto store errors.

use std::collections::BTreeMap;

use serde::Deserialize;
use wikihum_core::{Entity, EntityId, StoreError, WriteError};

use crate::wire::{DecodeError, RawEntity, entity_from_raw};

/// Error codes meaning the entity changed underneath the edit.
pub(crate) const CONFLICT_CODES: [&str; 3] = ["editconflict", "modification-failed", "failed-modify"];

/// Error code for a stale or foreign CSRF token.
pub(crate) const BAD_TOKEN: &str = "badtoken";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ApiError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetEntitiesResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub entities: BTreeMap<String, RawEntity>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Tokens {
    #[serde(default)]
    pub csrftoken: Option<String>,
    #[serde(default)]
    pub logintoken: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenQuery {
    #[serde(default)]
    pub tokens: Tokens,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub query: Option<TokenQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResult {
    pub result: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub login: Option<LoginResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EditedEntity {
    pub lastrevid: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EditResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub entity: Option<EditedEntity>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub delete: Option<serde_json::Value>,
}

pub(crate) fn store_error(id: &EntityId, error: ApiError) -> StoreError {
    if error.code == "no-such-entity" {
        return StoreError::Missing { id: id.clone() };
    }
    StoreError::Api {
        code: error.code,
        message: error.info,
    }
}

pub(crate) fn write_error(id: &EntityId, error: ApiError) -> WriteError {
    if CONFLICT_CODES.contains(&error.code.as_str()) {
        return WriteError::Conflict {
            id: id.clone(),
            message: error.info,
        };
    }
    WriteError::Api {
        code: error.code,
        message: error.info,
    }
}

/// Entity `id` out of a `wbgetentities` response.
pub(crate) fn entity_from_response(
    id: &EntityId,
    response: GetEntitiesResponse,
) -> Result<Entity, StoreError> {
    if let Some(error) = response.error {
        return Err(store_error(id, error));
    }
    let GetEntitiesResponse { mut entities, .. } = response;
    let raw = entities
        .remove(id.as_str())
        .ok_or_else(|| StoreError::Missing { id: id.clone() })?;
    entity_from_raw(raw).map_err(|err| match err {
        DecodeError::MissingEntity { .. } => StoreError::Missing { id: id.clone() },
        other => StoreError::Decode {
            id: id.clone(),
            message: other.to_string(),
        },
    })
}

pub(crate) fn revision_from_response(
    id: &EntityId,
    response: EditResponse,
) -> Result<u64, WriteError> {
    if let Some(error) = response.error {
        return Err(write_error(id, error));
    }
    response
        .entity
        .map(|entity| entity.lastrevid)
        .ok_or_else(|| WriteError::Api {
            code: "no-revision".to_owned(),
            message: format!("edit of {id} returned no revision"),
        })
}
