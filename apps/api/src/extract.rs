//! JSON body extractors that reject with the API error body instead of
//! axum's plain-text responses.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// A required JSON body.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// A JSON body that may be left out.
///
/// An empty body yields `T::default()`. A body that is present must parse.
pub struct OptionalJsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for OptionalJsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        parse_optional(&bytes).map(Self)
    }
}

fn parse_optional<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("Failed to parse the request body as JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Options {
        target_role: Option<String>,
    }

    #[test]
    fn test_blank_body_uses_defaults() {
        assert_eq!(parse_optional::<Options>(b"").unwrap(), Options::default());
        assert_eq!(parse_optional::<Options>(b" \n").unwrap(), Options::default());
    }

    #[test]
    fn test_present_body_must_parse() {
        let parsed: Options = parse_optional(br#"{"targetRole":"Analyst"}"#).unwrap();
        assert_eq!(parsed.target_role.as_deref(), Some("Analyst"));
        assert!(matches!(
            parse_optional::<Options>(b"{not json"),
            Err(AppError::BadRequest(_))
        ));
    }
}
