//! Device endpoints: `/<domain>/<id>` reads and `/<domain>/<id>/<command>` calls.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query, State};
use axum::http::{Method, Uri};

use nodeweb_domain::command::CommandParams;
use nodeweb_domain::record::Record;

use crate::error::ApiError;
use crate::state::AppState;

type RawParams = BTreeMap<String, String>;

/// Fallback handler for every path not claimed by another route.
///
/// Paths outside the five domain prefixes, malformed device paths and unknown
/// devices are 404 whatever the verb. Only GET and POST are accepted on a
/// registered device; the query string and an url-encoded form body
/// are merged into the command parameters, the body winning on conflicts.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    query: Result<Query<RawParams>, QueryRejection>,
    form: Result<Form<RawParams>, FormRejection>,
) -> Result<Json<Record>, ApiError> {
    let path = uri.path();
    if !state.gateway.can_handle(path) {
        return Err(ApiError::NotFound);
    }
    state.gateway.resolve(path)?;
    if method != Method::GET && method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let mut params = match query {
        Ok(Query(raw)) => CommandParams::from(raw),
        Err(rejection) => return Err(ApiError::BadRequest(rejection.body_text())),
    };
    match form {
        Ok(Form(raw)) => params.extend(CommandParams::from(raw)),
        // No body, or not a form: only the query string applies.
        Err(FormRejection::InvalidFormContentType(_)) => {}
        Err(rejection) => return Err(ApiError::BadRequest(rejection.body_text())),
    }

    let record = state.gateway.handle(path, &params)?;
    Ok(Json(record))
}
