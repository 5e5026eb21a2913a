use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{ClientError, Identity};
use crate::infrastructure::credentials::CredentialStore;
use crate::infrastructure::http::{decode, ResourceClient};

/// Terminal outcome of one guard activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Credential verified; the protected view may proceed.
    Authorized(Identity),
    /// No usable session; the caller hands control to the login flow.
    RedirectToLogin,
}

impl GuardState {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authorized(identity) => Some(identity),
            Self::RedirectToLogin => None,
        }
    }
}

/// Gate in front of every protected view.
///
/// Each activation verifies the stored credential against `GET /auth/me`.
/// Without a stored credential the guard redirects immediately and issues
/// no request at all. With one, any verification failure - rejection,
/// transport fault, or an identity the client cannot decode - means the
/// session is over: the credential is cleared so the next activation starts
/// from the unauthenticated state. There is no retry; a transiently failing
/// verification is indistinguishable from an invalid token at this layer,
/// and re-login is the recovery path for both.
#[derive(Debug)]
pub struct SessionGuard<C> {
    client: Arc<C>,
    credentials: Arc<CredentialStore>,
}

impl<C: ResourceClient> SessionGuard<C> {
    pub fn new(client: Arc<C>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Run one activation check.
    pub async fn activate(&self) -> GuardState {
        if !self.credentials.is_present() {
            debug!("No stored credential, redirecting to login");
            return GuardState::RedirectToLogin;
        }

        match self.verify().await {
            Ok(identity) => {
                debug!(handle = %identity.handle, "Session verified");
                GuardState::Authorized(identity)
            }
            Err(e) => {
                warn!(error = %e, "Credential verification failed, clearing session");
                self.credentials.clear();
                GuardState::RedirectToLogin
            }
        }
    }

    async fn verify(&self) -> Result<Identity, ClientError> {
        let payload = self.client.get("/auth/me").await?;
        decode(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BearerToken;
    use crate::infrastructure::credentials::InMemoryTokenStorage;
    use crate::infrastructure::http::HttpResourceClient;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials_with_token(token: &str) -> Arc<CredentialStore> {
        Arc::new(CredentialStore::new(Box::new(
            InMemoryTokenStorage::with_token(BearerToken::new(token)),
        )))
    }

    fn guard_for(server: &MockServer, credentials: Arc<CredentialStore>) -> SessionGuard<HttpResourceClient> {
        let client = Arc::new(HttpResourceClient::new(server.uri(), credentials.clone()));
        SessionGuard::new(client, credentials)
    }

    #[tokio::test]
    async fn test_no_credential_redirects_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let credentials = Arc::new(CredentialStore::new(Box::new(InMemoryTokenStorage::new())));
        let guard = guard_for(&server, credentials);

        assert_eq!(guard.activate().await, GuardState::RedirectToLogin);
        server.verify().await;
    }

    #[tokio::test]
    async fn test_valid_credential_is_authorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"handle": "jdoe", "displayName": "Jane Doe"})),
            )
            .mount(&server)
            .await;

        let credentials = credentials_with_token("tok");
        let guard = guard_for(&server, credentials.clone());

        let state = guard.activate().await;
        assert!(state.is_authorized());
        assert_eq!(
            state.identity().map(|i| i.handle.as_str()),
            Some("jdoe")
        );
        assert!(credentials.is_present());
    }

    #[tokio::test]
    async fn test_rejected_credential_is_cleared() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let credentials = credentials_with_token("stale");
        let guard = guard_for(&server, credentials.clone());

        assert_eq!(guard.activate().await, GuardState::RedirectToLogin);
        assert!(!credentials.is_present());
    }

    #[tokio::test]
    async fn test_server_error_is_treated_as_session_loss() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let credentials = credentials_with_token("tok");
        let guard = guard_for(&server, credentials.clone());

        assert_eq!(guard.activate().await, GuardState::RedirectToLogin);
        assert!(!credentials.is_present());
    }

    #[tokio::test]
    async fn test_undecodable_identity_is_treated_as_session_loss() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
            .mount(&server)
            .await;

        let credentials = credentials_with_token("tok");
        let guard = guard_for(&server, credentials.clone());

        assert_eq!(guard.activate().await, GuardState::RedirectToLogin);
        assert!(!credentials.is_present());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_treated_as_session_loss() {
        let credentials = credentials_with_token("tok");
        let client = Arc::new(HttpResourceClient::new(
            "http://127.0.0.1:1",
            credentials.clone(),
        ));
        let guard = SessionGuard::new(client, credentials.clone());

        assert_eq!(guard.activate().await, GuardState::RedirectToLogin);
        assert!(!credentials.is_present());
    }

    #[tokio::test]
    async fn test_repeated_activation_after_clear_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = credentials_with_token("stale");
        let guard = guard_for(&server, credentials);

        // First activation verifies and clears; the second must not touch
        // the network again.
        assert_eq!(guard.activate().await, GuardState::RedirectToLogin);
        assert_eq!(guard.activate().await, GuardState::RedirectToLogin);
        server.verify().await;
    }
}
