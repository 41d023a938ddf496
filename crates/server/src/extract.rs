//! Request extractors and body helpers shared by the JSON handlers.

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use listmate_core::{Fields, Schema, WriteMode};

use crate::error::AppError;

/// Path parameters that must name an existing resource.
///
/// Unlike [`Path`], a value that fails to parse (for example a list ID that
/// is not a UUID) is answered with 404: such a resource cannot exist.
pub struct Ids<T>(pub T);

impl<S, T> FromRequestParts<S> for Ids<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(ids)| Self(ids))
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "unparseable path parameters");
                AppError::NotFound
            })
    }
}

/// Parse a raw request body as JSON.
///
/// An empty body is treated as `{}` so that validation, not the parser,
/// reports which fields are missing.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the body is not valid JSON.
pub fn parse_json(body: &Bytes) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("JSON parse error - {e}")))
}

/// Parse a raw body and validate it against `schema`.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for malformed JSON and
/// `AppError::Validation` for schema violations.
pub fn validated(schema: &Schema, body: &Bytes, mode: WriteMode) -> Result<Fields, AppError> {
    let value = parse_json(body)?;
    Ok(schema.validate(&value, mode)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use listmate_core::{FieldKind, FieldSpec, ShoppingListId};
    use tower::ServiceExt;

    static NAME_ONLY: Schema = Schema::new(&[FieldSpec {
        name: "name",
        kind: FieldKind::Text { max_length: 10 },
    }]);

    fn app() -> axum::Router {
        axum::Router::new().route(
            "/lists/{id}",
            axum::routing::get(|Ids(id): Ids<ShoppingListId>| async move { id.to_string() }),
        )
    }

    async fn status_for(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_ids_parse_uuid() {
        let id = ShoppingListId::generate();
        assert_eq!(status_for(&format!("/lists/{id}")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unparseable_id_is_not_found() {
        assert_eq!(status_for("/lists/not-a-uuid").await, StatusCode::NOT_FOUND);
        assert_eq!(status_for("/lists/42").await, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        let value = parse_json(&Bytes::new()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_malformed_json_is_bad_request() {
        let err = parse_json(&Bytes::from_static(b"{\"name\":")).err().unwrap();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_validated_reports_field_errors() {
        let err = validated(&NAME_ONLY, &Bytes::from_static(b"{}"), WriteMode::Create)
            .err()
            .unwrap();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.get("name").is_some());
    }

    #[test]
    fn test_validated_partial_accepts_empty_object() {
        let fields = validated(&NAME_ONLY, &Bytes::from_static(b"{}"), WriteMode::Partial).unwrap();
        assert!(fields.is_empty());
    }
}
