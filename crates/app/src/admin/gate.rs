//! Admin gate.

use zeroize::Zeroizing;

use crate::admin::{errors::AdminError, session::SessionStore};

/// Proof that the admin flag was checked. Required by every mutation.
#[derive(Debug)]
pub struct Authorized(());

pub struct AdminGate {
    password: Option<Zeroizing<String>>,
    session: SessionStore,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("configured", &self.password.is_some())
            .field("session", &self.session)
            .finish()
    }
}

impl AdminGate {
    #[must_use]
    pub fn new(password: Option<String>, session: SessionStore) -> Self {
        Self {
            password: password.filter(|p| !p.is_empty()).map(Zeroizing::new),
            session,
        }
    }

    /// Compare `attempt` with the configured password and set the flag.
    ///
    /// # Errors
    ///
    /// - [`AdminError::NotConfigured`]: no password is configured.
    /// - [`AdminError::InvalidPassword`]: the attempt does not match.
    /// - [`AdminError::Session`]: the flag could not be persisted.
    pub async fn login(&self, attempt: &str) -> Result<Authorized, AdminError> {
        let password = self.password.as_ref().ok_or(AdminError::NotConfigured)?;

        if attempt != password.as_str() {
            return Err(AdminError::InvalidPassword);
        }

        self.session.set_authenticated(true).await?;

        Ok(Authorized(()))
    }

    /// Clear the flag.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Session`] if the flag could not be persisted.
    pub async fn logout(&self) -> Result<(), AdminError> {
        Ok(self.session.set_authenticated(false).await?)
    }

    /// Check the persisted flag.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Unauthorized`]: the flag is not set.
    /// - [`AdminError::Session`]: the flag could not be read.
    pub async fn require(&self) -> Result<Authorized, AdminError> {
        if self.session.is_authenticated().await? {
            Ok(Authorized(()))
        } else {
            Err(AdminError::Unauthorized)
        }
    }

    #[cfg(test)]
    pub(crate) fn authorized() -> Authorized {
        Authorized(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn login_logout_round_trip() -> TestResult {
        let dir = tempfile::tempdir()?;
        let gate = AdminGate::new(
            Some("hunter2".to_string()),
            SessionStore::new(dir.path().join("session.json")),
        );

        let before = gate.require().await;

        assert!(
            matches!(before, Err(AdminError::Unauthorized)),
            "expected Unauthorized, got {before:?}"
        );

        gate.login("hunter2").await?;
        gate.require().await?;
        gate.logout().await?;

        let after = gate.require().await;

        assert!(
            matches!(after, Err(AdminError::Unauthorized)),
            "expected Unauthorized, got {after:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_leaves_the_flag_unset() -> TestResult {
        let dir = tempfile::tempdir()?;
        let gate = AdminGate::new(
            Some("hunter2".to_string()),
            SessionStore::new(dir.path().join("session.json")),
        );

        let result = gate.login("hunter3").await;

        assert!(
            matches!(result, Err(AdminError::InvalidPassword)),
            "expected InvalidPassword, got {result:?}"
        );
        assert!(gate.require().await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn unconfigured_gate_never_opens() -> TestResult {
        let dir = tempfile::tempdir()?;
        let gate = AdminGate::new(
            Some(String::new()),
            SessionStore::new(dir.path().join("session.json")),
        );

        let result = gate.login("").await;

        assert!(
            matches!(result, Err(AdminError::NotConfigured)),
            "expected NotConfigured, got {result:?}"
        );

        Ok(())
    }
}
