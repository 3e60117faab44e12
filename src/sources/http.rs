//! The one place adapters touch the network.

use super::FetchContext;
use crate::error::SourceError;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

fn classify(ctx: &FetchContext, url: &Url, err: reqwest::Error, budget: Duration) -> SourceError {
    if err.is_timeout() && ctx.deadline_passed() {
        SourceError::Cancelled
    } else if err.is_timeout() {
        SourceError::Timeout(budget)
    } else {
        SourceError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// GET `url` and return the body as text.
///
/// Waits for the host's politeness slot first (bounded by the run deadline),
/// then sends the request with the remaining request budget as timeout.
/// Non-2xx responses become [`SourceError::Status`].
#[instrument(level = "debug", skip_all, fields(%url))]
pub async fn get_text(ctx: &FetchContext, url: &Url) -> Result<String, SourceError> {
    match ctx.remaining() {
        Some(left) => tokio::time::timeout(left, ctx.politeness.wait(url))
            .await
            .map_err(|_| SourceError::Cancelled)?,
        None => ctx.politeness.wait(url).await,
    }

    let budget = ctx.request_budget()?;
    let started = std::time::Instant::now();
    let response = ctx
        .client
        .get(url.clone())
        .timeout(budget)
        .send()
        .await
        .map_err(|e| classify(ctx, url, e, budget))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| classify(ctx, url, e, budget))?;
    debug!(
        bytes = body.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Fetched page"
    );
    Ok(body)
}

/// Build the shared client every adapter uses.
pub fn build_client(user_agent: &str) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|e| SourceError::Config(format!("http client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ctx() -> FetchContext {
        FetchContext::new(reqwest::Client::new(), Region::India)
    }

    #[tokio::test]
    async fn test_get_text_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/education"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&format!("{}/education", mock_server.uri())).unwrap();
        let body = get_text(&ctx(), &url).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_get_text_status_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&format!("{}/down", mock_server.uri())).unwrap();
        let err = get_text(&ctx(), &url).await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_get_text_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let mut c = ctx();
        c.request_timeout = Duration::from_millis(200);
        let url = Url::parse(&format!("{}/slow", mock_server.uri())).unwrap();
        let err = get_text(&c, &url).await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_get_text_after_deadline_is_cancelled() {
        let mut c = ctx();
        c.deadline = Some(tokio::time::Instant::now());
        let url = Url::parse("http://127.0.0.1:9/never").unwrap();
        assert_eq!(get_text(&c, &url).await, Err(SourceError::Cancelled));
    }
}
