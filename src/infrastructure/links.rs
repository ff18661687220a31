use crate::application::ports::links::{LinkStatus, RedirectValidator};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;

const MAX_REDIRECTS: usize = 5;

/// Resolves a source URL over HTTP, following up to five redirects.
#[derive(Clone)]
pub struct HttpRedirectValidator {
    client: reqwest::Client,
}

impl HttpRedirectValidator {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("blog_core/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RedirectValidator for HttpRedirectValidator {
    async fn check(&self, url: &str) -> LinkStatus {
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => LinkStatus::Reachable {
                final_url: response.url().to_string(),
            },
            Ok(response) => LinkStatus::Unreachable {
                reason: format!("responded with {}", response.status()),
            },
            Err(err) if err.is_timeout() => LinkStatus::Unreachable {
                reason: "timed out".into(),
            },
            Err(err) if err.is_redirect() => LinkStatus::Unreachable {
                reason: "too many redirects".into(),
            },
            Err(err) => LinkStatus::Unreachable {
                reason: err.to_string(),
            },
        }
    }
}

/// Accepts every URL. Wired in when source URL validation is disabled.
#[derive(Default, Clone)]
pub struct AcceptAllLinks;

#[async_trait]
impl RedirectValidator for AcceptAllLinks {
    async fn check(&self, url: &str) -> LinkStatus {
        LinkStatus::Reachable {
            final_url: url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn validator() -> HttpRedirectValidator {
        HttpRedirectValidator::new(Duration::from_millis(500)).unwrap()
    }

    #[tokio::test]
    async fn follows_redirects_to_the_final_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", format!("{}/new", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let status = validator().check(&format!("{}/old", server.uri())).await;
        assert_eq!(
            status,
            LinkStatus::Reachable {
                final_url: format!("{}/new", server.uri())
            }
        );
    }

    #[tokio::test]
    async fn error_status_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let status = validator().check(&format!("{}/gone", server.uri())).await;
        assert!(!status.is_reachable());
    }

    #[tokio::test]
    async fn redirect_loops_are_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/loop"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("Location", format!("{}/loop", server.uri())),
            )
            .mount(&server)
            .await;

        let status = validator().check(&format!("{}/loop", server.uri())).await;
        assert!(!status.is_reachable());
    }

    #[tokio::test]
    async fn slow_hosts_time_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let status = validator().check(&server.uri()).await;
        assert_eq!(
            status,
            LinkStatus::Unreachable {
                reason: "timed out".into()
            }
        );
    }
}
