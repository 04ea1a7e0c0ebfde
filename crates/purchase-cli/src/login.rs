//! Terminal sign-in: prompts for a name and username on stdin.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Mutex;
use uuid::Uuid;

use purchase_core::models::Account;
use purchase_form::LoginPopup;

/// Stable account id derived from the username (UUID v5, case-insensitive).
pub fn stable_account_id(username: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, username.trim().to_lowercase().as_bytes()).to_string()
}

pub struct TerminalLogin {
    input: Mutex<Box<dyn BufRead + Send>>,
    cache: Mutex<Vec<Account>>,
}

impl TerminalLogin {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(io::stdin()))
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            input: Mutex::new(Box::new(reader)),
            cache: Mutex::new(Vec::new()),
        }
    }

    fn prompt(&self, label: &str) -> Result<String> {
        eprint!("{}: ", label);
        io::stderr().flush().context("Failed to write prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .map_err(|_| anyhow!("Terminal input lock poisoned"))?
            .read_line(&mut line)
            .context("Failed to read from terminal")?;
        if read == 0 {
            bail!("Sign-in cancelled: no input");
        }
        Ok(line.trim().to_string())
    }
}

#[async_trait]
impl LoginPopup for TerminalLogin {
    fn cached_accounts(&self) -> Vec<Account> {
        self.cache
            .lock()
            .map(|cache| cache.clone())
            .unwrap_or_default()
    }

    async fn login(&self, scopes: &[String]) -> Result<Account> {
        tracing::debug!(scopes = ?scopes, "Prompting for terminal sign-in");

        let name = self.prompt("Name")?;
        let username = self.prompt("Username (email)")?;
        if username.is_empty() {
            bail!("A username is required to sign in");
        }

        let account = Account {
            name: Some(name).filter(|n| !n.is_empty()),
            home_account_id: stable_account_id(&username),
            username,
        };

        self.cache
            .lock()
            .map_err(|_| anyhow!("Account cache lock poisoned"))?
            .push(account.clone());
        Ok(account)
    }

    async fn logout(&self, account: &Account) -> Result<()> {
        self.cache
            .lock()
            .map_err(|_| anyhow!("Account cache lock poisoned"))?
            .retain(|a| a.home_account_id != account.home_account_id);
        Ok(())
    }
}
