use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::{
    engine::{EMPTY_REQUEST_MESSAGE, StatsEngine},
    error::Error,
    spotify::Catalog,
    types::{AggregateResult, StatsRequest},
};

/// Prefix of the validation message for a body that is not a stats request.
pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

/// `POST /playlist-stats`
///
/// Body: `{"playlistIds": ["id", ...], "merge": false}`. An empty body counts
/// as an empty id list; any other body that does not decode into that shape
/// is rejected with the decoder's message.
pub async fn playlist_stats<C: Catalog + 'static>(
    State(engine): State<Arc<StatsEngine<C>>>,
    body: Bytes,
) -> Result<Json<AggregateResult>, Error> {
    let request = parse_request(&body)?;

    let result = engine.aggregate(request).await?;
    Ok(Json(result))
}

/// Decodes a stats request body.
///
/// # Errors
///
/// [`Error::Validation`] with the empty-list message for a blank body, or
/// `invalid request body: <reason>` when the JSON does not fit the shape.
pub fn parse_request(body: &[u8]) -> Result<StatsRequest, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::Validation(EMPTY_REQUEST_MESSAGE.to_string()));
    }
    serde_json::from_slice(body)
        .map_err(|e| Error::Validation(format!("{INVALID_BODY_MESSAGE}: {e}")))
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Auth(_) => {
                error!(error = %self, "credential exchange failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            Error::Upstream(e) => {
                error!(error = %e, "playlist-stats error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Server error fetching playlist stats: {e}"),
                )
            }
            Error::Config(_) | Error::Io(_) => {
                warn!(error = %self, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
