//! Shared HTTP response checks for provider clients.

use crate::error::TranslateError;

/// Map 429 to [`TranslateError::RateLimited`] and any other non-success
/// status to [`TranslateError::Api`]. Successful responses pass through.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, TranslateError> {
    if resp.status() == 429 {
        return Err(TranslateError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(TranslateError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// `Retry-After` in seconds, 60 when absent or not numeric.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, retry_after: Option<&str>) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body("quota exceeded").unwrap())
    }

    #[test]
    fn retry_after_header_is_parsed() {
        assert_eq!(parse_retry_after(&mock_response(429, Some("15"))), 15);
        assert_eq!(parse_retry_after(&mock_response(429, Some("soon"))), 60);
        assert_eq!(parse_retry_after(&mock_response(429, None)), 60);
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let err = check_response(mock_response(429, Some("30")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TranslateError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn server_error_carries_body() {
        let err = check_response(mock_response(503, None)).await.unwrap_err();
        match err {
            TranslateError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, None)).await.is_ok());
    }
}
