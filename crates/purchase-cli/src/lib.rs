pub mod files;
pub mod login;
pub mod view;

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;

use purchase_core::{AuthStrategyKind, FormConfig};
use purchase_form::{AuthAdapter, LoginPopup};
use purchase_infra::PrincipalClient;

pub use files::{attach_path, attach_paths, IntakeSummary};
pub use login::{stable_account_id, TerminalLogin};
pub use view::TerminalView;

/// Build the authentication adapter for the configured strategy. `login` is
/// only used by the interactive strategy.
pub fn build_auth(config: &FormConfig, login: Arc<dyn LoginPopup>) -> Result<AuthAdapter> {
    let auth = match config.auth_strategy {
        AuthStrategyKind::Interactive => {
            AuthAdapter::interactive(login, config.login_scopes.clone())
        }
        AuthStrategyKind::Delegated => {
            let client = PrincipalClient::from_config(config)
                .context("Failed to create principal client")?;
            AuthAdapter::delegated(Arc::new(client))
        }
    };
    Ok(auth)
}

pub fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}
