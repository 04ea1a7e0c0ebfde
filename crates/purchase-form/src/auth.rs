//! Authentication adapter
//!
//! Resolves the current user under one of two strategies chosen at
//! configuration time:
//!
//! - **Interactive**: the user signs in and out through a popup-style flow.
//!   Submitting without a signed-in account is refused.
//! - **Delegated**: the hosting platform has already authenticated the user;
//!   the principal is read once at start-up. If it cannot be resolved the
//!   form stays usable and submissions carry a placeholder identity, because
//!   access to the page is enforced upstream.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use purchase_core::constants::LOGIN_SCOPE;
use purchase_core::models::{Account, Identity};
use purchase_core::{AuthStrategyKind, ErrorMetadata, FormError, FormResult};
use purchase_infra::PrincipalSource;

use crate::ports::FormView;

/// Interactive sign-in collaborator (popup login/logout).
#[async_trait]
pub trait LoginPopup: Send + Sync {
    /// Accounts remembered from an earlier sign-in in this session.
    fn cached_accounts(&self) -> Vec<Account>;

    /// Run the credential exchange requesting `scopes`.
    async fn login(&self, scopes: &[String]) -> Result<Account>;

    async fn logout(&self, account: &Account) -> Result<()>;
}

pub enum AuthStrategy {
    Interactive(Arc<dyn LoginPopup>),
    Delegated(Arc<dyn PrincipalSource>),
}

pub struct AuthAdapter {
    strategy: AuthStrategy,
    scopes: Vec<String>,
    account: Option<Account>,
    identity: Option<Identity>,
}

impl AuthAdapter {
    pub fn interactive(popup: Arc<dyn LoginPopup>, scopes: Vec<String>) -> Self {
        let scopes = if scopes.is_empty() {
            vec![LOGIN_SCOPE.to_string()]
        } else {
            scopes
        };
        Self {
            strategy: AuthStrategy::Interactive(popup),
            scopes,
            account: None,
            identity: None,
        }
    }

    pub fn delegated(source: Arc<dyn PrincipalSource>) -> Self {
        Self {
            strategy: AuthStrategy::Delegated(source),
            scopes: Vec::new(),
            account: None,
            identity: None,
        }
    }

    pub fn kind(&self) -> AuthStrategyKind {
        match self.strategy {
            AuthStrategy::Interactive(_) => AuthStrategyKind::Interactive,
            AuthStrategy::Delegated(_) => AuthStrategyKind::Delegated,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    /// Resolve any identity that already exists, without user interaction.
    pub async fn initialize(&mut self, view: &dyn FormView) {
        match &self.strategy {
            AuthStrategy::Interactive(popup) => {
                if let Some(account) = popup.cached_accounts().into_iter().next() {
                    tracing::info!(username = %account.username, "Restored cached account");
                    self.adopt_account(account);
                }
            }
            AuthStrategy::Delegated(source) => {
                // Page access is gated upstream; show the form before the lookup finishes.
                view.set_form_visible(true);
                match source.current_principal().await {
                    Ok(Some(principal)) => {
                        tracing::info!(user_id = %principal.user_id, "Resolved platform principal");
                        self.identity = Some(principal.into());
                    }
                    Ok(None) => {
                        tracing::warn!("Platform reported no signed-in principal");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to resolve platform principal");
                    }
                }
            }
        }
        self.update_ui(view);
    }

    /// Interactive sign-in. Failures are shown to the user and leave the
    /// adapter signed out.
    pub async fn login(&mut self, view: &dyn FormView) -> FormResult<()> {
        let popup = match &self.strategy {
            AuthStrategy::Interactive(popup) => popup.clone(),
            AuthStrategy::Delegated(_) => {
                tracing::debug!("Login requested under delegated session; ignoring");
                return Ok(());
            }
        };

        match popup.login(&self.scopes).await {
            Ok(account) => {
                tracing::info!(username = %account.username, "Signed in");
                self.adopt_account(account);
                self.update_ui(view);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Login error");
                let err = FormError::SignInFailed(e.to_string());
                view.show_error(&err.client_message());
                view.scroll_to_status();
                Err(err)
            }
        }
    }

    /// Interactive sign-out. Returns `true` when the session was cleared so
    /// the caller can reset the rest of the form.
    pub async fn logout(&mut self, view: &dyn FormView) -> bool {
        let popup = match &self.strategy {
            AuthStrategy::Interactive(popup) => popup.clone(),
            AuthStrategy::Delegated(_) => {
                tracing::debug!("Logout requested under delegated session; ignoring");
                return false;
            }
        };

        if let Some(account) = &self.account {
            if let Err(e) = popup.logout(account).await {
                tracing::error!(error = %e, "Logout error");
                return false;
            }
        }

        tracing::info!("Signed out");
        self.account = None;
        self.identity = None;
        self.update_ui(view);
        true
    }

    /// Identity to put on a submission.
    pub fn identity_for_submit(&self) -> FormResult<Identity> {
        match (&self.identity, &self.strategy) {
            (Some(identity), _) => Ok(identity.clone()),
            (None, AuthStrategy::Interactive(_)) => Err(FormError::Unauthorized),
            (None, AuthStrategy::Delegated(_)) => {
                tracing::warn!("No principal resolved; submitting with placeholder identity");
                Ok(Identity::placeholder())
            }
        }
    }

    pub fn update_ui(&self, view: &dyn FormView) {
        view.set_signed_in(self.identity.as_ref());
        match self.strategy {
            AuthStrategy::Interactive(_) => view.set_form_visible(self.identity.is_some()),
            AuthStrategy::Delegated(_) => view.set_form_visible(true),
        }
    }

    fn adopt_account(&mut self, account: Account) {
        self.identity = Some(Identity::from(account.clone()));
        self.account = Some(account);
    }
}
