//! Credential verification for the clinical portal.
//!
//! The shell only talks to [`CredentialVerifier`]; the demo build plugs in
//! [`DemoVerifier`], which compares against one configured account after an
//! artificial delay. This is a demo gate, not security.

use std::time::Duration;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use tracing::info;

use crate::core::config::DemoAccount;
use crate::core::timing;

pub const REJECTED_MESSAGE: &str =
    "Invalid clinical credentials. Please check your email and password.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated,
    Rejected,
}

pub trait CredentialVerifier {
    fn verify<'a>(&'a self, identity: &'a str, secret: &'a str) -> LocalBoxFuture<'a, AuthOutcome>;
}

#[derive(Debug, Clone)]
pub struct DemoVerifier {
    account: DemoAccount,
}

impl DemoVerifier {
    pub fn new(account: DemoAccount) -> Self {
        Self { account }
    }

    pub fn delay(&self) -> Duration {
        self.account.verify_delay
    }
}

impl CredentialVerifier for DemoVerifier {
    fn verify<'a>(&'a self, identity: &'a str, secret: &'a str) -> LocalBoxFuture<'a, AuthOutcome> {
        async move {
            timing::sleep(self.account.verify_delay).await;
            let outcome = if identity == self.account.email && secret == self.account.password {
                AuthOutcome::Authenticated
            } else {
                AuthOutcome::Rejected
            };
            info!(identity, ?outcome, "credential check finished");
            outcome
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DEFAULT_DEMO_EMAIL, DEFAULT_DEMO_PASSWORD};

    fn quick_verifier() -> DemoVerifier {
        DemoVerifier::new(DemoAccount {
            verify_delay: Duration::from_millis(1),
            ..DemoAccount::default()
        })
    }

    #[tokio::test]
    async fn demo_credentials_pass() {
        let outcome = quick_verifier()
            .verify(DEFAULT_DEMO_EMAIL, DEFAULT_DEMO_PASSWORD)
            .await;
        assert_eq!(outcome, AuthOutcome::Authenticated);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let outcome = quick_verifier().verify(DEFAULT_DEMO_EMAIL, "password2025").await;
        assert_eq!(outcome, AuthOutcome::Rejected);
    }

    #[tokio::test]
    async fn comparison_is_exact() {
        let verifier = quick_verifier();
        assert_eq!(
            verifier.verify("Clinician@oncovision.ai", DEFAULT_DEMO_PASSWORD).await,
            AuthOutcome::Rejected
        );
        assert_eq!(
            verifier.verify(DEFAULT_DEMO_EMAIL, " password2026").await,
            AuthOutcome::Rejected
        );
    }

    #[test]
    fn default_delay_is_noticeable() {
        assert_eq!(
            DemoVerifier::new(DemoAccount::default()).delay(),
            Duration::from_millis(1_200)
        );
    }
}
