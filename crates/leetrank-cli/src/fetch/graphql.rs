//! Structured ranking lookup through the LeetCode GraphQL endpoint.

use serde_json::{json, Value};

use crate::fetch::http_client::HttpClient;
use crate::types::{FetchError, FetchResult};

/// Profile query; only `profile.ranking` is read back.
pub const PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!) {
    matchedUser(username: $username) {
        username
        profile {
            ranking
        }
        submitStats {
            acSubmissionNum {
                difficulty
                count
            }
        }
    }
}
"#;

/// Request body carrying the query and the `username` variable.
pub fn request_body(username: &str) -> Value {
    json!({
        "query": PROFILE_QUERY,
        "variables": { "username": username },
    })
}

/// Pull `data.matchedUser.profile.ranking` out of a response payload.
///
/// Accepts integers, integral floats and numeric strings. Zero, null and
/// anything else count as "no ranking".
pub fn parse_ranking(payload: &Value) -> Option<u64> {
    let ranking = payload
        .get("data")?
        .get("matchedUser")?
        .get("profile")?
        .get("ranking")?;

    let rank = match ranking {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;

    (rank > 0).then_some(rank)
}

/// Run the profile query for `username`.
///
/// `Ok(None)` means the endpoint answered but gave no usable ranking
/// (non-2xx status, unknown user, hidden profile). Network failures and
/// undecodable 2xx bodies are errors.
pub async fn query_ranking(
    client: &HttpClient,
    url: &str,
    username: &str,
) -> FetchResult<Option<u64>> {
    let resp = client.post_json(url, &request_body(username)).await?;

    if !resp.is_success() {
        tracing::debug!(url, status = resp.status, "GraphQL endpoint returned non-success status");
        return Ok(None);
    }

    let payload: Value = serde_json::from_str(&resp.body).map_err(|source| FetchError::Json {
        url: url.to_string(),
        source,
    })?;

    if let Some(errors) = payload.get("errors") {
        tracing::debug!(%errors, "GraphQL response carried errors");
    }

    Ok(parse_ranking(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload(ranking: Value) -> Value {
        json!({
            "data": {
                "matchedUser": {
                    "username": "someone",
                    "profile": { "ranking": ranking },
                    "submitStats": { "acSubmissionNum": [] }
                }
            }
        })
    }

    #[test]
    fn test_request_body_shape() {
        let body = request_body("someone");
        assert_eq!(body["variables"]["username"], "someone");
        assert!(body["query"].as_str().unwrap().contains("matchedUser(username: $username)"));
    }

    #[test]
    fn test_parse_ranking_integer() {
        assert_eq!(parse_ranking(&payload(json!(123456))), Some(123456));
    }

    #[test]
    fn test_parse_ranking_numeric_string_and_float() {
        assert_eq!(parse_ranking(&payload(json!("98765"))), Some(98765));
        assert_eq!(parse_ranking(&payload(json!(1500.0))), Some(1500));
        assert_eq!(parse_ranking(&payload(json!(1500.5))), None);
    }

    #[test]
    fn test_parse_ranking_absent_cases() {
        assert_eq!(parse_ranking(&payload(json!(0))), None);
        assert_eq!(parse_ranking(&payload(Value::Null)), None);
        assert_eq!(parse_ranking(&payload(json!(-3))), None);
        assert_eq!(parse_ranking(&json!({"data": {"matchedUser": null}})), None);
        assert_eq!(parse_ranking(&json!({"data": null})), None);
        assert_eq!(parse_ranking(&json!({"errors": [{"message": "boom"}]})), None);
    }

    #[tokio::test]
    async fn test_query_ranking_hits_endpoint_with_username() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql/"))
            .and(body_partial_json(json!({"variables": {"username": "someone"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload(json!(4321))))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/graphql/", server.uri());
        let rank = query_ranking(&client, &url, "someone").await.unwrap();
        assert_eq!(rank, Some(4321));
    }

    #[tokio::test]
    async fn test_query_ranking_error_status_is_no_value() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = HttpClient::new(Duration::from_secs(5)).unwrap();
        let rank = query_ranking(&client, &server.uri(), "someone").await.unwrap();
        assert_eq!(rank, None);
    }

    #[tokio::test]
    async fn test_query_ranking_html_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new(Duration::from_secs(5)).unwrap();
        let err = query_ranking(&client, &server.uri(), "someone").await.unwrap_err();
        assert!(matches!(err, FetchError::Json { .. }));
    }
}
