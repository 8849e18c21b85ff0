//! Admin authentication boundary.
//!
//! Credential verification sits behind [`CredentialVerifier`] so nothing in
//! the application embeds a literal secret. The persisted session carries the
//! username and issue time only, never credential material, and expires a
//! fixed 24 hours after issue.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::warn;

use crate::storage::{SessionStorage, StorageError};

/// Sessions expire this many seconds after issue.
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Errors from the auth boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Where admin credentials are checked. Implementations decide what a valid
/// credential is; the rest of the application only sees this boundary.
#[automock]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Whether the username/password pair is valid.
    async fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError>;
}

/// Verifier backed by a configured username and SHA-256 password digest.
#[derive(Debug, Clone)]
pub struct Sha256Verifier {
    username: String,
    password_sha256: String,
}

impl Sha256Verifier {
    /// Create a verifier for the given username and hex-encoded SHA-256
    /// digest of the password.
    pub fn new(username: impl Into<String>, password_sha256: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_sha256: password_sha256.into(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for Sha256Verifier {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let digest = format!("{:x}", Sha256::digest(password.as_bytes()));

        Ok(username == self.username && digest.eq_ignore_ascii_case(&self.password_sha256))
    }
}

/// Admin session persisted between launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    pub username: String,
    pub issued_at: Timestamp,
}

impl AdminSession {
    /// Whether the fixed 24-hour window has elapsed.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.as_second() - self.issued_at.as_second() >= SESSION_TTL_SECS
    }
}

/// Login, session lookup and logout over a verifier and durable session
/// storage.
pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    sessions: Arc<dyn SessionStorage>,
}

impl AuthService {
    /// Create a service over the given verifier and session storage.
    pub fn new(verifier: Arc<dyn CredentialVerifier>, sessions: Arc<dyn SessionStorage>) -> Self {
        Self { verifier, sessions }
    }

    /// Verify credentials and persist a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on a failed check, or a
    /// storage error when the session cannot be written.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        now: Timestamp,
    ) -> Result<AdminSession, AuthError> {
        if !self.verifier.verify(username, password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let session = AdminSession {
            username: username.to_string(),
            issued_at: now,
        };

        self.sessions.save(&session)?;

        Ok(session)
    }

    /// The current session, when one exists and has not expired. Expired or
    /// unreadable sessions are purged and reported as absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the session blob cannot be read or
    /// purged.
    pub fn current_session(&self, now: Timestamp) -> Result<Option<AdminSession>, AuthError> {
        let session = match self.sessions.load() {
            Ok(Some(session)) => session,
            Ok(None) => return Ok(None),
            Err(StorageError::Corrupt(error)) => {
                warn!("discarding unreadable session: {error}");
                self.sessions.clear()?;
                return Ok(None);
            }
            Err(error) => return Err(AuthError::Storage(error)),
        };

        if session.is_expired(now) {
            self.sessions.clear()?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Drop the persisted session.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the blob cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear().map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MockSessionStorage;

    use super::*;

    // SHA-256 of "secret".
    const SECRET_SHA256: &str = "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b";

    fn epoch() -> Timestamp {
        Timestamp::UNIX_EPOCH
    }

    #[tokio::test]
    async fn verifier_accepts_the_configured_credentials() -> TestResult {
        let verifier = Sha256Verifier::new("admin", SECRET_SHA256);

        assert!(verifier.verify("admin", "secret").await?);
        assert!(!verifier.verify("admin", "wrong").await?);
        assert!(!verifier.verify("root", "secret").await?);

        Ok(())
    }

    #[tokio::test]
    async fn login_persists_a_session_without_the_password() -> TestResult {
        let mut sessions = MockSessionStorage::new();
        sessions
            .expect_save()
            .times(1)
            .withf(|session| session.username == "admin")
            .returning(|_| Ok(()));

        let service = AuthService::new(
            Arc::new(Sha256Verifier::new("admin", SECRET_SHA256)),
            Arc::new(sessions),
        );

        let session = service.login("admin", "secret", epoch()).await?;

        assert_eq!(session.username, "admin");
        assert_eq!(session.issued_at, epoch());

        Ok(())
    }

    #[tokio::test]
    async fn failed_login_saves_nothing() {
        // No save expectation: a write would fail the test.
        let sessions = MockSessionStorage::new();

        let service = AuthService::new(
            Arc::new(Sha256Verifier::new("admin", SECRET_SHA256)),
            Arc::new(sessions),
        );

        let result = service.login("admin", "wrong", epoch()).await;

        assert!(
            matches!(result, Err(AuthError::InvalidCredentials)),
            "expected InvalidCredentials"
        );
    }

    #[test]
    fn session_expires_at_exactly_24_hours() {
        let session = AdminSession {
            username: "admin".to_string(),
            issued_at: epoch(),
        };

        let just_before = epoch() + jiff::Span::new().seconds(SESSION_TTL_SECS - 1);
        let exactly = epoch() + jiff::Span::new().seconds(SESSION_TTL_SECS);

        assert!(!session.is_expired(just_before));
        assert!(session.is_expired(exactly));
    }

    #[test]
    fn expired_session_is_purged_and_absent() -> TestResult {
        let mut sessions = MockSessionStorage::new();
        sessions.expect_load().returning(|| {
            Ok(Some(AdminSession {
                username: "admin".to_string(),
                issued_at: Timestamp::UNIX_EPOCH,
            }))
        });
        sessions.expect_clear().times(1).returning(|| Ok(()));

        let service = AuthService::new(
            Arc::new(Sha256Verifier::new("admin", SECRET_SHA256)),
            Arc::new(sessions),
        );

        let now = epoch() + jiff::Span::new().hours(25);

        assert!(service.current_session(now)?.is_none());

        Ok(())
    }

    #[test]
    fn live_session_is_returned() -> TestResult {
        let mut sessions = MockSessionStorage::new();
        sessions.expect_load().returning(|| {
            Ok(Some(AdminSession {
                username: "admin".to_string(),
                issued_at: Timestamp::UNIX_EPOCH,
            }))
        });

        let service = AuthService::new(
            Arc::new(Sha256Verifier::new("admin", SECRET_SHA256)),
            Arc::new(sessions),
        );

        let now = epoch() + jiff::Span::new().hours(1);
        let session = service.current_session(now)?.ok_or("expected a session")?;

        assert_eq!(session.username, "admin");

        Ok(())
    }

    #[test]
    fn corrupt_session_is_treated_as_absent() -> TestResult {
        let mut sessions = MockSessionStorage::new();
        sessions.expect_load().returning(|| {
            let parse_error = serde_json::from_str::<AdminSession>("{not json")
                .expect_err("garbage should not parse");
            Err(StorageError::Corrupt(parse_error))
        });
        sessions.expect_clear().times(1).returning(|| Ok(()));

        let service = AuthService::new(
            Arc::new(Sha256Verifier::new("admin", SECRET_SHA256)),
            Arc::new(sessions),
        );

        assert!(service.current_session(epoch())?.is_none());

        Ok(())
    }
}
