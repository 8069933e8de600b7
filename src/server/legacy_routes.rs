//! Legacy nickname routes. Failures answer with plain text.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::warn;

use super::state::{GuardedLegacyLibrary, ServerState};
use super::ServerConfig;
use crate::legacy::NickError;

#[derive(Debug, Deserialize)]
pub struct SetNickQuery {
    pub id: Option<String>,
    pub nick: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveNickQuery {
    pub nick: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NickQuery {
    pub nick: Option<String>,
}

fn nick_failure(err: NickError) -> Response {
    let code = match err {
        NickError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    (code, err.to_string()).into_response()
}

async fn set_nick(
    State(legacy): State<GuardedLegacyLibrary>,
    Query(params): Query<SetNickQuery>,
) -> Response {
    let id = params.id.unwrap_or_default();
    let nick = params.nick.unwrap_or_default();
    match legacy.set_nick(&id, &nick) {
        Ok(()) => format!("id: {}, nick: {} writed: true", id, nick).into_response(),
        Err(err) => nick_failure(err),
    }
}

async fn resolve_nick(
    State(legacy): State<GuardedLegacyLibrary>,
    State(config): State<ServerConfig>,
    Query(params): Query<ResolveNickQuery>,
) -> Response {
    let nick = params.nick.unwrap_or_default();
    if nick.is_empty() {
        return nick_failure(NickError::EmptyField("nick"));
    }
    let max = params
        .max
        .and_then(|max| max.parse::<usize>().ok())
        .filter(|max| *max > 0)
        .unwrap_or(config.nick_max_results);

    let found = legacy.read().resolve_nick(&nick, max);
    Json(found).into_response()
}

async fn delete_nick(
    State(legacy): State<GuardedLegacyLibrary>,
    Query(params): Query<NickQuery>,
) -> Response {
    let nick = params.nick.unwrap_or_default();
    match legacy.delete_nick(&nick) {
        Ok(_) => StatusCode::OK.into_response(),
        Err(err) => nick_failure(err),
    }
}

async fn list_nicks(State(legacy): State<GuardedLegacyLibrary>) -> Response {
    Json(legacy.nicks()).into_response()
}

async fn list_songs(State(legacy): State<GuardedLegacyLibrary>) -> Response {
    Json(legacy.songs()).into_response()
}

async fn reload(State(legacy): State<GuardedLegacyLibrary>) -> Response {
    match legacy.reload() {
        Ok(()) => Json("ok").into_response(),
        Err(err) => {
            warn!("Legacy reload failed, keeping previous data: {:#}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, Json("failure")).into_response()
        }
    }
}

pub fn legacy_routes() -> Router<ServerState> {
    Router::new()
        .route("/set", get(set_nick))
        .route("/get", get(resolve_nick))
        .route("/del", get(delete_nick))
        .route("/nicks", get(list_nicks))
        .route("/songs", get(list_songs))
        .route("/reload", get(reload))
}
