use serde::{Deserialize, Serialize};

/// The signed-in user as resolved by the authentication adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    pub email_or_username: String,
    pub stable_id: String,
    pub provider: Option<String>,
}

impl Identity {
    /// Stand-in used by delegated sessions when no principal was ever resolved.
    pub fn placeholder() -> Self {
        Self {
            display_name: "Unknown user".to_string(),
            email_or_username: "unknown".to_string(),
            stable_id: "anonymous".to_string(),
            provider: None,
        }
    }

    /// Best human-readable name: display name, falling back to the username.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.email_or_username
        } else {
            &self.display_name
        }
    }
}

/// Account returned by the interactive sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub name: Option<String>,
    pub username: String,
    pub home_account_id: String,
}

impl From<Account> for Identity {
    fn from(account: Account) -> Self {
        Self {
            display_name: account.name.unwrap_or_default(),
            email_or_username: account.username,
            stable_id: account.home_account_id,
            provider: None,
        }
    }
}

/// Principal reported by the hosting platform's `/.auth/me` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPrincipal {
    pub user_details: String,
    pub user_id: String,
    pub identity_provider: Option<String>,
}

impl ClientPrincipal {
    /// A principal without a user id or details is treated as absent.
    pub fn is_valid(&self) -> bool {
        !self.user_id.trim().is_empty() && !self.user_details.trim().is_empty()
    }
}

impl From<ClientPrincipal> for Identity {
    fn from(principal: ClientPrincipal) -> Self {
        Self {
            display_name: principal.user_details.clone(),
            email_or_username: principal.user_details,
            stable_id: principal.user_id,
            provider: principal.identity_provider,
        }
    }
}

/// Body of the `/.auth/me` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMeResponse {
    #[serde(default)]
    pub client_principal: Option<ClientPrincipal>,
}
