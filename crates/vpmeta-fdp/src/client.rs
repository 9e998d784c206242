//! Async HTTP client for the FAIR Data Point publish protocol.
//!
//! A resource goes through two registry states: a draft created by posting
//! its Turtle description, then a published resource after a state change.
//! Every call authenticates afresh; the client holds no token between calls.

use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use vpmeta_core::Record;
use vpmeta_rdf::{GraphBuilder, RdfDocument, Renderer};

use crate::{
  config::RegistryConfig,
  error::{Error, Result},
};

#[derive(Serialize)]
struct TokenRequest<'a> {
  email:    &'a str,
  password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
  #[serde(default)]
  token: Option<String>,
}

#[derive(Serialize)]
struct StateChange {
  current: &'static str,
}

const PUBLISHED: StateChange = StateChange { current: "PUBLISHED" };

/// Client for one registry.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone, Debug)]
pub struct FdpClient {
  client: Client,
  config: RegistryConfig,
}

impl FdpClient {
  pub fn new(config: RegistryConfig) -> Result<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &RegistryConfig { &self.config }

  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
  }

  // ── Protocol ──────────────────────────────────────────────────────────────

  /// `POST /tokens` with the configured credentials; returns the bearer
  /// token.
  pub async fn authenticate(&self) -> Result<String> {
    let url = self.url("tokens");
    tracing::debug!(%url, username = %self.config.username, "requesting token");

    let resp = self
      .client
      .post(&url)
      .json(&TokenRequest {
        email:    &self.config.username,
        password: &self.config.password,
      })
      .send()
      .await?;
    let status = resp.status();
    let body = resp.text().await?;

    let failure = |reason: String| Error::Authentication {
      url: url.clone(),
      username: self.config.username.clone(),
      reason,
    };

    let parsed: TokenResponse = serde_json::from_str(&body)
      .map_err(|e| failure(format!("status {status}, unreadable response ({e})")))?;

    match parsed.token {
      Some(token) if !token.is_empty() => Ok(token),
      _ => Err(failure(format!("status {status}, response carries no token"))),
    }
  }

  /// `POST /{resource_type}` with the document as Turtle.
  ///
  /// Returns the identity URL exactly as the registry's `Location` header
  /// gives it. The new resource is still a draft.
  pub async fn create_draft(
    &self,
    document: &RdfDocument,
    resource_type: &str,
  ) -> Result<String> {
    let token = self.authenticate().await?;
    let url = self.url(resource_type);
    tracing::debug!(%url, bytes = document.text.len(), "submitting draft");

    let resp = self
      .client
      .post(&url)
      .header(header::CONTENT_TYPE, "text/turtle")
      .bearer_auth(&token)
      .body(document.text.clone())
      .send()
      .await?;
    let status = resp.status();

    let location = resp
      .headers()
      .get(header::LOCATION)
      .and_then(|v| v.to_str().ok())
      .filter(|v| !v.is_empty())
      .map(str::to_string);

    match location {
      Some(location) => {
        tracing::info!(%location, resource_type, "created draft");
        Ok(location)
      }
      None => {
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(%url, %status, "registry response:\n{body}");
        Err(Error::Submission {
          url,
          status: status.as_u16(),
        })
      }
    }
  }

  /// `PUT <identity>/meta/state` with `{"current":"PUBLISHED"}`.
  ///
  /// A non-success status is retried according to the configured publish
  /// policy, authenticating again on every attempt.
  pub async fn publish(&self, identity_url: &str) -> Result<()> {
    let state_url = format!("{}/meta/state", self.config.endpoint_url(identity_url));
    let attempts = self.config.publish_attempts.max(1);
    let mut last_status = StatusCode::INTERNAL_SERVER_ERROR;

    for attempt in 1..=attempts {
      let token = self.authenticate().await?;
      tracing::debug!(%state_url, attempt, "publishing");

      let resp = self
        .client
        .put(&state_url)
        .bearer_auth(&token)
        .json(&PUBLISHED)
        .send()
        .await?;
      let status = resp.status();

      if status.is_success() {
        tracing::info!(url = identity_url, "published");
        return Ok(());
      }

      tracing::warn!(
        %state_url,
        status = status.as_u16(),
        attempt,
        attempts,
        "publish state transition failed"
      );
      last_status = status;

      if attempt < attempts {
        tokio::time::sleep(self.config.publish_retry_delay).await;
      }
    }

    Err(Error::PublishTransition {
      url: identity_url.to_string(),
      status: last_status.as_u16(),
      attempts,
    })
  }

  /// Create a draft and publish it. Returns the identity URL.
  pub async fn submit(&self, document: &RdfDocument, resource_type: &str) -> Result<String> {
    let identity = self.create_draft(document, resource_type).await?;
    self.publish(&identity).await?;
    Ok(identity)
  }

  /// Build `record` with `builder` and submit it.
  pub async fn publish_record<R: Renderer>(
    &self,
    builder: &GraphBuilder<R>,
    record: &Record,
  ) -> Result<String> {
    let document = builder.build(record)?;
    self.submit(&document, record.resource_type()).await
  }

  /// `GET url`; only a 200 counts as present.
  pub async fn exists(&self, url: &str) -> Result<bool> {
    let resp = self.client.get(url).send().await?;
    tracing::debug!(%url, status = %resp.status(), "existence check");
    Ok(resp.status() == StatusCode::OK)
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use httpmock::prelude::*;
  use serde_json::json;
  use vpmeta_core::{FieldSet, RecordType};

  use super::*;

  const USER: &str = "albert.einstein@example.com";
  const PASSWORD: &str = "s3cret-pw";

  fn test_config(server: &MockServer) -> RegistryConfig {
    RegistryConfig::new(server.base_url(), USER, PASSWORD)
      .with_timeout(Duration::from_secs(5))
      .with_publish_policy(3, Duration::ZERO)
  }

  fn dataset() -> Record {
    let fields = FieldSet::new()
      .with("parent_url", "https://registry.example/catalog/1")
      .with("title", "Example dataset")
      .with("description", "Some data")
      .with("theme", "http://www.orpha.net/ORDO/Orphanet_558")
      .with("publisher", "https://registry.example/org/1")
      .with("contact_point", "mailto:data@example.org")
      .with("language", "en")
      .with("personal_data", false)
      .with("keyword", "rare|disease");
    Record::from_fields(RecordType::Dataset, &fields).unwrap()
  }

  fn mock_token<'a>(server: &'a MockServer) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
      when
        .method(POST)
        .path("/tokens")
        .json_body(json!({ "email": USER, "password": PASSWORD }));
      then
        .status(200)
        .header("content-type", "application/json")
        .json_body(json!({ "token": "tok-1" }));
    })
  }

  #[tokio::test]
  async fn dataset_is_created_and_published() {
    let server = MockServer::start();
    let token = mock_token(&server);
    let create = server.mock(|when, then| {
      when
        .method(POST)
        .path("/dataset")
        .header("content-type", "text/turtle")
        .header("authorization", "Bearer tok-1");
      then
        .status(201)
        .header("location", "https://registry.example/dataset/123");
    });
    let publish = server.mock(|when, then| {
      when
        .method(PUT)
        .path("/dataset/123/meta/state")
        .header("authorization", "Bearer tok-1")
        .json_body(json!({ "current": "PUBLISHED" }));
      then.status(200);
    });

    let client = FdpClient::new(
      test_config(&server).with_persistent_url("https://registry.example"),
    )
    .unwrap();
    let builder = GraphBuilder::embedded().unwrap();

    let identity = client.publish_record(&builder, &dataset()).await.unwrap();

    assert_eq!(identity, "https://registry.example/dataset/123");
    assert_eq!(token.calls(), 2, "one token per request");
    assert_eq!(create.calls(), 1);
    assert_eq!(publish.calls(), 1);
  }

  #[tokio::test]
  async fn missing_token_stops_before_submission() {
    let server = MockServer::start();
    let _token = server.mock(|when, then| {
      when.method(POST).path("/tokens");
      then
        .status(200)
        .header("content-type", "application/json")
        .json_body(json!({ "status": "error" }));
    });
    let create = server.mock(|when, then| {
      when.method(POST).path("/dataset");
      then.status(201).header("location", "https://registry.example/dataset/1");
    });

    let client = FdpClient::new(test_config(&server)).unwrap();
    let doc = GraphBuilder::embedded().unwrap().build(&dataset()).unwrap();
    let err = client.submit(&doc, "dataset").await.unwrap_err();

    assert!(err.is_authentication(), "got {err}");
    let message = err.to_string();
    assert!(message.contains(USER));
    assert!(!message.contains(PASSWORD));
    assert!(message.contains("'/'"));
    assert_eq!(create.calls(), 0);
  }

  #[tokio::test]
  async fn non_json_token_response_is_an_authentication_error() {
    let server = MockServer::start();
    let _token = server.mock(|when, then| {
      when.method(POST).path("/tokens");
      then.status(401).body("Unauthorized");
    });

    let client = FdpClient::new(test_config(&server)).unwrap();
    let err = client.authenticate().await.unwrap_err();
    assert!(matches!(err, Error::Authentication { ref username, .. } if username == USER));
  }

  #[tokio::test]
  async fn empty_token_is_rejected() {
    let server = MockServer::start();
    let _token = server.mock(|when, then| {
      when.method(POST).path("/tokens");
      then.status(200).json_body(json!({ "token": "" }));
    });

    let client = FdpClient::new(test_config(&server)).unwrap();
    assert!(client.authenticate().await.unwrap_err().is_authentication());
  }

  #[tokio::test]
  async fn missing_location_is_a_submission_error() {
    let server = MockServer::start();
    let _token = mock_token(&server);
    let _create = server.mock(|when, then| {
      when.method(POST).path("/biobank");
      then.status(400).body("SHACL validation failed");
    });

    let client = FdpClient::new(test_config(&server)).unwrap();
    let doc = GraphBuilder::embedded().unwrap().build(&dataset()).unwrap();
    let err = client.create_draft(&doc, "biobank").await.unwrap_err();

    match err {
      Error::Submission { status, ref url } => {
        assert_eq!(status, 400);
        assert!(url.ends_with("/biobank"));
        assert!(err.to_string().contains("registry logs"));
      }
      other => panic!("expected a submission error, got {other}"),
    }
  }

  #[tokio::test]
  async fn publish_gives_up_after_configured_attempts() {
    let server = MockServer::start();
    let token = mock_token(&server);
    let state = server.mock(|when, then| {
      when.method(PUT).path("/dataset/9/meta/state");
      then.status(503);
    });

    let client = FdpClient::new(test_config(&server)).unwrap();
    let identity = server.url("/dataset/9");
    let err = client.publish(&identity).await.unwrap_err();

    match err {
      Error::PublishTransition { url, status, attempts } => {
        assert_eq!(url, identity);
        assert_eq!(status, 503);
        assert_eq!(attempts, 3);
      }
      other => panic!("expected a publish error, got {other}"),
    }
    assert_eq!(state.calls(), 3);
    assert_eq!(token.calls(), 3);
  }

  #[tokio::test]
  async fn exists_only_on_200() {
    let server = MockServer::start();
    let _found = server.mock(|when, then| {
      when.method(GET).path("/dataset/1");
      then.status(200).body("<> a <http://www.w3.org/ns/dcat#Dataset> .");
    });
    let _missing = server.mock(|when, then| {
      when.method(GET).path("/dataset/2");
      then.status(404);
    });
    let _moved = server.mock(|when, then| {
      when.method(GET).path("/dataset/3");
      then.status(204);
    });

    let client = FdpClient::new(test_config(&server)).unwrap();
    assert!(client.exists(&server.url("/dataset/1")).await.unwrap());
    assert!(!client.exists(&server.url("/dataset/2")).await.unwrap());
    assert!(!client.exists(&server.url("/dataset/3")).await.unwrap());
  }

  #[tokio::test]
  async fn unreachable_registry_is_a_transport_error() {
    let client = FdpClient::new(
      RegistryConfig::new("http://127.0.0.1:1", USER, PASSWORD)
        .with_timeout(Duration::from_secs(2)),
    )
    .unwrap();
    let err = client.exists("http://127.0.0.1:1/dataset/1").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
  }
}
