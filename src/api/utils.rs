//! Request-processing helpers shared by the handlers.

use axum::http::{header, HeaderMap};
use http_body_util::BodyExt;

use super::error::ApiError;

/// Require an `application/json` Content-Type (charset parameters are
/// fine; `application/jsonp`, `text/json` and friends are not).
pub fn ensure_json(headers: &HeaderMap) -> Result<(), ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::InvalidPayload("missing Content-Type header".into()))?;

    let media_type: mime::Mime = content_type
        .parse()
        .map_err(|_| ApiError::InvalidPayload(format!("invalid Content-Type: {content_type}")))?;

    if media_type.type_() != mime::APPLICATION || media_type.subtype() != mime::JSON {
        return Err(ApiError::InvalidPayload(format!(
            "Content-Type must be application/json, got: {}/{}",
            media_type.type_(),
            media_type.subtype()
        )));
    }

    Ok(())
}

/// Collect the request body, rejecting anything over `max_bytes`.
/// Decompression has already happened at the middleware layer, so the
/// limit applies to the decompressed payload.
pub async fn read_body_limited(body: axum::body::Body, max_bytes: usize) -> Result<Vec<u8>, ApiError> {
    let data = body
        .collect()
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .to_bytes();

    if data.len() > max_bytes {
        return Err(ApiError::PayloadTooLarge(data.len()));
    }

    Ok(data.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;

    fn headers_with_content_type(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_json_content_types() {
        assert!(ensure_json(&headers_with_content_type("application/json")).is_ok());
        assert!(ensure_json(&headers_with_content_type("application/json; charset=utf-8")).is_ok());
    }

    #[test]
    fn rejects_non_json_content_types() {
        assert!(ensure_json(&HeaderMap::new()).is_err());
        assert!(ensure_json(&headers_with_content_type("text/json")).is_err());
        assert!(ensure_json(&headers_with_content_type("application/jsonp")).is_err());
        assert!(ensure_json(&headers_with_content_type("text/plain")).is_err());
        assert!(ensure_json(&headers_with_content_type("nonsense")).is_err());
    }

    #[tokio::test]
    async fn body_within_limit_is_returned() {
        let data = read_body_limited(Body::from("hello"), 16).await.unwrap();
        assert_eq!(data, b"hello");
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let err = read_body_limited(Body::from(vec![0u8; 32]), 16)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge(32)));
    }
}
