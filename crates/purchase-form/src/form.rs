//! The purchase request form: owns the session and dispatches user events.

use std::sync::Arc;
use tokio::sync::mpsc;

use purchase_core::models::FileCollection;
use purchase_core::FormConfig;
use purchase_infra::SubmissionSink;

use crate::auth::AuthAdapter;
use crate::intake::FileIntake;
use crate::orchestrator::{SubmissionOrchestrator, SubmissionOutcome};
use crate::ports::{FormEvent, FormView};

/// State of one open form.
#[derive(Debug, Default)]
pub struct FormSession {
    pub files: FileCollection,
}

pub struct PurchaseForm {
    session: FormSession,
    auth: AuthAdapter,
    intake: FileIntake,
    orchestrator: SubmissionOrchestrator,
    view: Arc<dyn FormView>,
}

impl PurchaseForm {
    pub fn new(
        config: &FormConfig,
        auth: AuthAdapter,
        sink: Arc<dyn SubmissionSink>,
        view: Arc<dyn FormView>,
    ) -> Self {
        Self {
            session: FormSession::default(),
            auth,
            intake: FileIntake::new(config.intake.clone()),
            orchestrator: SubmissionOrchestrator::new(sink),
            view,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn auth(&self) -> &AuthAdapter {
        &self.auth
    }

    /// Resolve any existing identity and render the initial state.
    pub async fn initialize(&mut self) {
        self.auth.initialize(self.view.as_ref()).await;
    }

    /// Process one user event. Returns the outcome when the event was a
    /// submit request.
    pub async fn handle(&mut self, event: FormEvent) -> Option<SubmissionOutcome> {
        let view = self.view.as_ref();
        match event {
            FormEvent::FilesSelected(files) => {
                self.intake
                    .on_files_selected(&mut self.session.files, files, view);
                None
            }
            FormEvent::RemoveFile(name) => {
                self.intake.remove_file(&mut self.session.files, &name, view);
                None
            }
            FormEvent::SubmitRequested => Some(
                self.orchestrator
                    .submit(&self.auth, &mut self.session.files, view)
                    .await,
            ),
            FormEvent::LoginRequested => {
                // Failures are already shown to the user by the adapter.
                let _ = self.auth.login(view).await;
                None
            }
            FormEvent::LogoutRequested => {
                if self.auth.logout(view).await {
                    view.reset_form();
                    self.intake.clear(&mut self.session.files, view);
                    view.hide_messages();
                }
                None
            }
        }
    }

    /// Handle events one at a time until the channel closes or shutdown is
    /// signalled. Dropping the shutdown sender also stops the loop.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<FormEvent>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) -> Self {
        tracing::info!(strategy = ?self.auth.kind(), "Purchase form started");

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        if let Some(outcome) = self.handle(event).await {
                            tracing::debug!(submitted = outcome.is_submitted(), "Submit handled");
                        }
                    }
                    None => {
                        tracing::info!("Event channel closed");
                        break;
                    }
                },
                _ = shutdown_rx.recv() => {
                    tracing::info!("Purchase form shutting down");
                    break;
                }
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use purchase_core::models::PurchaseBucket;

    fn config() -> FormConfig {
        FormConfig::from_lookup(|key| match key {
            "WEBHOOK_URL" => Some("https://hooks.example.com/purchase".to_string()),
            _ => None,
        })
        .unwrap()
    }

    fn form(
        auth: AuthAdapter,
        sink: Arc<RecordingSink>,
        view: Arc<RecordingView>,
    ) -> PurchaseForm {
        PurchaseForm::new(&config(), auth, sink, view)
    }

    #[tokio::test]
    async fn login_then_submit_through_events() {
        let view = Arc::new(RecordingView::with_fields(fields(
            PurchaseBucket::UP_TO_1000_LABEL,
            "250",
        )));
        let sink = Arc::new(RecordingSink::default());
        let popup = Arc::new(MockLoginPopup::new(Some(account())));
        let mut form = form(
            AuthAdapter::interactive(popup, vec![]),
            sink.clone(),
            view.clone(),
        );

        form.initialize().await;
        assert!(!view.snapshot().form_visible);

        form.handle(FormEvent::LoginRequested).await;
        assert!(view.snapshot().form_visible);

        form.handle(FormEvent::FilesSelected(vec![pdf("quote.pdf")]))
            .await;
        let outcome = form.handle(FormEvent::SubmitRequested).await.unwrap();

        assert!(outcome.is_submitted());
        assert_eq!(sink.calls(), 1);
        assert!(form.session().files.is_empty());
    }

    #[tokio::test]
    async fn logout_clears_form_files_and_banners() {
        let view = Arc::new(RecordingView::with_fields(fields("", "1")));
        let sink = Arc::new(RecordingSink::default());
        let popup = Arc::new(MockLoginPopup::with_cached(account()));
        let mut form = form(
            AuthAdapter::interactive(popup, vec![]),
            sink,
            view.clone(),
        );
        form.initialize().await;

        form.handle(FormEvent::FilesSelected(vec![pdf("a.pdf")])).await;
        form.handle(FormEvent::SubmitRequested).await;
        assert!(view.snapshot().error_visible);

        form.handle(FormEvent::LogoutRequested).await;

        let state = view.snapshot();
        assert!(form.session().files.is_empty());
        assert!(state.file_entries.is_empty());
        assert!(!state.error_visible);
        assert!(!state.form_visible);
        assert_eq!(state.fields, Default::default());
        assert!(form.auth().identity().is_none());
    }

    #[tokio::test]
    async fn remove_event_drops_attachment() {
        let view = Arc::new(RecordingView::default());
        let mut form = form(
            AuthAdapter::delegated(Arc::new(StaticPrincipal(None))),
            Arc::new(RecordingSink::default()),
            view.clone(),
        );

        form.handle(FormEvent::FilesSelected(vec![pdf("a.pdf"), pdf("b.pdf")]))
            .await;
        form.handle(FormEvent::RemoveFile("a.pdf".into())).await;

        assert_eq!(form.session().files.names(), vec!["b.pdf"]);
        assert_eq!(view.entry_names(), vec!["b.pdf"]);
    }

    #[tokio::test]
    async fn run_processes_events_until_channel_closes() {
        let view = Arc::new(RecordingView::with_fields(fields("Other", "10")));
        let sink = Arc::new(RecordingSink::default());
        let form = form(
            AuthAdapter::delegated(Arc::new(StaticPrincipal(None))),
            sink.clone(),
            view.clone(),
        );

        let (tx, rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let handle = tokio::spawn(form.run(rx, shutdown_rx));

        tx.send(FormEvent::FilesSelected(vec![pdf("a.pdf")]))
            .await
            .unwrap();
        tx.send(FormEvent::SubmitRequested).await.unwrap();
        drop(tx);

        let form = handle.await.unwrap();
        assert_eq!(sink.calls(), 1);
        assert!(form.session().files.is_empty());
        assert!(view.snapshot().success_visible);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let form = form(
            AuthAdapter::delegated(Arc::new(StaticPrincipal(None))),
            Arc::new(RecordingSink::default()),
            Arc::new(RecordingView::default()),
        );

        let (_tx, rx) = mpsc::channel::<FormEvent>(1);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        shutdown_tx.send(()).await.unwrap();

        let form = form.run(rx, shutdown_rx).await;
        assert!(form.session().files.is_empty());
    }
}
