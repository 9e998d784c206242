use thiserror::Error;

/// Errors raised while talking to a FAIR Data Point.
#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "could not obtain an authentication token from {url} as {username}: \
     {reason}. Check the registry URL, username and password, and make sure \
     the URLs don't end with a '/' character"
  )]
  Authentication {
    url:      String,
    username: String,
    reason:   String,
  },

  #[error(
    "registry at {url} returned no Location header (status {status}); the \
     document probably failed validation, check the registry logs"
  )]
  Submission { url: String, status: u16 },

  #[error(
    "could not publish {url}: state transition returned {status} after \
     {attempts} attempt(s)"
  )]
  PublishTransition {
    url:      String,
    status:   u16,
    attempts: u32,
  },

  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error(transparent)]
  Rdf(#[from] vpmeta_rdf::Error),
}

impl Error {
  /// Authentication failures abort a whole run; everything else is
  /// specific to one record.
  pub fn is_authentication(&self) -> bool {
    matches!(self, Self::Authentication { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
