//! SDVX HTTP routes.
//!
//! Lookups return plain JSON. Alias administration and the id helpers wrap
//! their payload in a `{msg, status, ...}` envelope carrying a [`Status`].

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::state::{GuardedSdvxManager, ServerState};
use crate::sdvx::{AliasError, AliasMatch, MatchMode, TrackId};
use crate::status::Status;

#[derive(Debug, Deserialize)]
pub struct GetTracksQuery {
    pub id: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Flags are enabled by any value other than `"0"`.
#[derive(Debug, Deserialize)]
pub struct MatchIdQuery {
    pub query: Option<String>,
    pub isnocase: Option<String>,
    pub isfuzzy: Option<String>,
    pub isalias: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AliasQuery {
    pub id: Option<String>,
    pub alias: Option<String>,
}

#[derive(Serialize)]
struct StatusResponse {
    msg: String,
    status: Status,
}

impl StatusResponse {
    fn success() -> StatusResponse {
        StatusResponse {
            msg: String::new(),
            status: Status::Success,
        }
    }

    fn failure(status: Status, msg: impl Into<String>) -> StatusResponse {
        StatusResponse {
            msg: msg.into(),
            status,
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum MatchContents {
    Titles(Vec<TrackId>),
    Aliases(Vec<AliasMatch>),
}

#[derive(Serialize)]
struct MatchIdResponse {
    msg: String,
    status: Status,
    contents: Option<MatchContents>,
}

#[derive(Serialize)]
struct ExistResponse {
    msg: String,
    status: Status,
    exist: bool,
}

#[derive(Serialize)]
struct TrackAliasesResponse {
    aliases: Option<Vec<String>>,
    status: Status,
    msg: String,
}

fn reply<T: Serialize>(code: StatusCode, body: T) -> Response {
    (code, Json(body)).into_response()
}

fn flag(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| value != "0")
}

fn alias_failure(err: AliasError) -> Response {
    let code = match err {
        AliasError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    warn!("Alias request rejected: {}", err);
    reply(code, StatusResponse::failure(err.status(), err.to_string()))
}

/// `id` returns one record (or `null`), `query` runs the resolution cascade,
/// neither returns the whole catalog.
async fn get_tracks(
    State(sdvx): State<GuardedSdvxManager>,
    Query(params): Query<GetTracksQuery>,
) -> Response {
    if let Some(id) = params.id {
        return Json(sdvx.get_track(id.as_str()).ok()).into_response();
    }
    if let Some(query) = params.query {
        return Json(sdvx.resolve_tracks(&query)).into_response();
    }
    let catalog = sdvx.catalog();
    Json(catalog.as_ref()).into_response()
}

async fn reload(State(sdvx): State<GuardedSdvxManager>) -> Response {
    match sdvx.reload() {
        Ok(()) => Json("ok").into_response(),
        Err(err) => {
            warn!("SDVX reload failed, keeping previous data: {}", err);
            reply(StatusCode::INTERNAL_SERVER_ERROR, "failure")
        }
    }
}

async fn get_aliases(
    State(sdvx): State<GuardedSdvxManager>,
    Query(params): Query<IdQuery>,
) -> Response {
    let Some(id) = params.id else {
        return Json(sdvx.list_aliases()).into_response();
    };
    let response = match sdvx.aliases_for(id.as_str()) {
        Ok(aliases) => TrackAliasesResponse {
            aliases: Some(aliases),
            status: Status::Success,
            msg: String::new(),
        },
        Err(err) => TrackAliasesResponse {
            aliases: None,
            status: err.status(),
            msg: err.to_string(),
        },
    };
    Json(response).into_response()
}

async fn match_id(
    State(sdvx): State<GuardedSdvxManager>,
    Query(params): Query<MatchIdQuery>,
) -> Response {
    let Some(query) = params.query.as_deref() else {
        return reply(
            StatusCode::BAD_REQUEST,
            MatchIdResponse {
                msg: "missing query parameters".to_owned(),
                status: Status::MissingParameters,
                contents: None,
            },
        );
    };

    let mode = MatchMode::new(flag(&params.isnocase), flag(&params.isfuzzy));
    let contents = if flag(&params.isalias) {
        MatchContents::Aliases(sdvx.match_alias(query, mode))
    } else {
        MatchContents::Titles(sdvx.match_title(query, mode))
    };

    Json(MatchIdResponse {
        msg: String::new(),
        status: Status::Success,
        contents: Some(contents),
    })
    .into_response()
}

async fn id_exists(
    State(sdvx): State<GuardedSdvxManager>,
    Query(params): Query<IdQuery>,
) -> Response {
    let Some(id) = params.id else {
        return reply(
            StatusCode::BAD_REQUEST,
            ExistResponse {
                msg: "missing id parameters".to_owned(),
                status: Status::MissingParameters,
                exist: false,
            },
        );
    };

    match sdvx.track_exists(id.as_str()) {
        Ok(exist) => Json(ExistResponse {
            msg: String::new(),
            status: Status::Success,
            exist,
        })
        .into_response(),
        Err(err) => reply(
            StatusCode::BAD_REQUEST,
            ExistResponse {
                msg: err.to_string(),
                status: Status::UnknownError,
                exist: false,
            },
        ),
    }
}

async fn add_alias(
    State(sdvx): State<GuardedSdvxManager>,
    Query(params): Query<AliasQuery>,
) -> Response {
    let (Some(id), Some(alias)) = (params.id, params.alias) else {
        return reply(
            StatusCode::BAD_REQUEST,
            StatusResponse::failure(
                Status::MissingParameters,
                "missing 'id' or 'alias' parameters",
            ),
        );
    };

    let alias = alias.trim();
    if alias.is_empty() {
        return alias_failure(AliasError::EmptyString);
    }

    match sdvx.add_alias(id.as_str(), alias) {
        Ok(()) => Json(StatusResponse::success()).into_response(),
        Err(err) => alias_failure(err),
    }
}

async fn delete_alias(
    State(sdvx): State<GuardedSdvxManager>,
    Query(params): Query<AliasQuery>,
) -> Response {
    let Some(alias) = params.alias else {
        return reply(
            StatusCode::BAD_REQUEST,
            StatusResponse::failure(Status::MissingParameters, "missing 'alias' parameters"),
        );
    };

    let alias = alias.trim();
    if alias.is_empty() {
        return alias_failure(AliasError::EmptyString);
    }

    match sdvx.delete_alias(alias) {
        Ok(()) => Json(StatusResponse::success()).into_response(),
        Err(err) => alias_failure(err),
    }
}

pub fn sdvx_routes() -> Router<ServerState> {
    Router::new()
        .route("/get", get(get_tracks))
        .route("/reload", get(reload))
        .route("/aliases", get(get_aliases))
        .route("/matchid", get(match_id))
        .route("/existid", get(id_exists))
        .route("/addali", get(add_alias))
        .route("/delali", get(delete_alias))
}
