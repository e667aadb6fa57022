use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use uuid::Uuid;

/// Header carrying the caller's client id. Clients are created implicitly on
/// first use, so there is no registration round-trip.
pub(crate) const CLIENT_ID_HEADER: &str = "x-client-id";

type Rejection = (StatusCode, &'static str);

#[derive(Clone, Copy)]
pub(crate) struct ExtractClientId(pub Uuid);

impl<S> FromRequestParts<S> for ExtractClientId
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(CLIENT_ID_HEADER)
            .ok_or((StatusCode::BAD_REQUEST, "missing X-Client-Id header"))?;
        let value = value
            .to_str()
            .map_err(|_| (StatusCode::BAD_REQUEST, "X-Client-Id header is not valid text"))?;
        let client_id = value
            .parse::<Uuid>()
            .map_err(|_| (StatusCode::BAD_REQUEST, "X-Client-Id header is not a UUID"))?;
        Ok(Self(client_id))
    }
}
