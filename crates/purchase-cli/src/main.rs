//! Purchase CLI: fill in and submit a purchase request from the terminal.
//!
//! Set WEBHOOK_URL (and optionally AUTH_STRATEGY, AUTH_BASE_URL, ...) in the
//! environment or a `.env` file.

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use purchase_cli::{
    attach_paths, build_auth, print_json, IntakeSummary, TerminalLogin, TerminalView,
};
use purchase_core::models::{FileCollection, FormFields};
use purchase_core::{AuthStrategyKind, ErrorMetadata, FormConfig, IntakeConfig};
use purchase_form::{FileIntake, FormEvent, PurchaseForm, SubmissionOutcome};
use purchase_infra::{init_telemetry, LogFormat, WebhookClient, WebhookClientConfig};

#[derive(Parser)]
#[command(name = "purchase", about = "Purchase request form CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a purchase request
    Submit {
        /// Purchase value bucket, e.g. "<=$1000" or "$1001-$6000"
        #[arg(long)]
        purchase_value: String,
        #[arg(long)]
        budget: String,
        #[arg(long)]
        items: String,
        /// Total cost; must be below 6001
        #[arg(long)]
        total_cost: String,
        #[arg(long)]
        remarks: Option<String>,
        /// Supporting document (repeatable)
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,
    },
    /// Check files against the attachment rules without submitting
    CheckFiles {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Show the identity a submission would carry
    Whoami,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry(LogFormat::from_env())
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            purchase_value,
            budget,
            items,
            total_cost,
            remarks,
            files,
        } => {
            let config = FormConfig::from_env().context("Failed to load configuration")?;
            let fields = FormFields {
                purchase_value: Some(purchase_value),
                budget,
                items,
                total_cost,
                remarks,
            };
            submit(&config, fields, files).await?;
        }
        Commands::CheckFiles { paths } => {
            let intake = FileIntake::new(IntakeConfig::from_env());
            let view = TerminalView::silent(FormFields::default());
            let mut collection = FileCollection::new();

            let files = attach_paths(&paths).await?;
            let report = intake.on_files_selected(&mut collection, files, &view);
            print_json(&IntakeSummary::from(&report))?;

            if !report.rejected.is_empty() {
                bail!("{} file(s) rejected", report.rejected.len());
            }
        }
        Commands::Whoami => {
            let config = FormConfig::from_env().context("Failed to load configuration")?;
            let view = TerminalView::new(FormFields::default());
            let mut auth = build_auth(&config, Arc::new(TerminalLogin::stdin()))?;

            auth.initialize(&view).await;
            if config.auth_strategy == AuthStrategyKind::Interactive && !auth.is_signed_in() {
                auth.login(&view)
                    .await
                    .map_err(|e| anyhow!(e.client_message()))?;
            }

            let identity = auth
                .identity_for_submit()
                .map_err(|e| anyhow!(e.client_message()))?;
            print_json(&identity)?;
        }
    }

    Ok(())
}

async fn submit(
    config: &FormConfig,
    fields: FormFields,
    paths: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let view = Arc::new(TerminalView::new(fields));
    let sink = Arc::new(
        WebhookClient::new(WebhookClientConfig::from(config))
            .context("Failed to create webhook client")?,
    );
    let auth = build_auth(config, Arc::new(TerminalLogin::stdin()))?;
    let mut form = PurchaseForm::new(config, auth, sink, view);

    form.initialize().await;
    if config.auth_strategy == AuthStrategyKind::Interactive && !form.auth().is_signed_in() {
        form.handle(FormEvent::LoginRequested).await;
        if !form.auth().is_signed_in() {
            bail!("Sign-in failed");
        }
    }

    if !paths.is_empty() {
        let files = attach_paths(&paths).await?;
        form.handle(FormEvent::FilesSelected(files)).await;
        if form.session().files.len() != paths.len() {
            bail!("Some files were rejected; nothing was submitted");
        }
    }

    match form.handle(FormEvent::SubmitRequested).await {
        Some(SubmissionOutcome::Submitted) => Ok(()),
        Some(SubmissionOutcome::Rejected(e)) => Err(anyhow!(e.client_message())),
        None => bail!("Submit request produced no outcome"),
    }
}
