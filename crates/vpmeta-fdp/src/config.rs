//! Connection settings for a FAIR Data Point.

use std::{fmt, time::Duration};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PUBLISH_ATTEMPTS: u32 = 3;
pub const DEFAULT_PUBLISH_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Registry endpoint, credentials and publish policy.
///
/// `persistent_url` is the public prefix the registry puts in the `Location`
/// of new resources. It can differ from `base_url` when the registry sits
/// behind a proxy; follow-up calls replace the prefix with `base_url`.
#[derive(Clone)]
pub struct RegistryConfig {
  pub base_url:            String,
  pub persistent_url:      String,
  pub username:            String,
  pub password:            String,
  pub timeout:             Duration,
  pub publish_attempts:    u32,
  pub publish_retry_delay: Duration,
}

impl RegistryConfig {
  /// Settings with the persistent URL equal to `base_url` and default
  /// timeout and publish policy.
  pub fn new(
    base_url: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
  ) -> Self {
    let base_url = base_url.into();
    Self {
      persistent_url: base_url.clone(),
      base_url,
      username: username.into(),
      password: password.into(),
      timeout: DEFAULT_TIMEOUT,
      publish_attempts: DEFAULT_PUBLISH_ATTEMPTS,
      publish_retry_delay: DEFAULT_PUBLISH_RETRY_DELAY,
    }
  }

  pub fn with_persistent_url(mut self, url: impl Into<String>) -> Self {
    self.persistent_url = url.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// At least one attempt is always made.
  pub fn with_publish_policy(mut self, attempts: u32, delay: Duration) -> Self {
    self.publish_attempts = attempts.max(1);
    self.publish_retry_delay = delay;
    self
  }

  /// Map an identity URL onto the endpoint base.
  ///
  /// A URL under `persistent_url` gets that prefix replaced with `base_url`;
  /// anything else is returned unchanged.
  pub fn endpoint_url(&self, identity_url: &str) -> String {
    match identity_url.strip_prefix(self.persistent_url.as_str()) {
      Some(rest) if !self.persistent_url.is_empty() => {
        format!("{}{rest}", self.base_url)
      }
      _ => identity_url.to_string(),
    }
  }
}

impl fmt::Debug for RegistryConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RegistryConfig")
      .field("base_url", &self.base_url)
      .field("persistent_url", &self.persistent_url)
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .field("timeout", &self.timeout)
      .field("publish_attempts", &self.publish_attempts)
      .field("publish_retry_delay", &self.publish_retry_delay)
      .finish()
  }
}
