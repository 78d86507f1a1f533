use crate::core::{DocumentStore, FormSubmission, Notifier, Result};
use crate::domain::model::OutboundEmail;
use crate::domain::model::SubmissionDocument;
use std::sync::Arc;

/// Outcome of a processed submission: the stored document id and whatever the
/// form evaluated to.
#[derive(Debug)]
pub struct ProcessedSubmission<O> {
    pub id: String,
    pub outcome: Option<O>,
}

/// The one pipeline shared by all form endpoints: validate, evaluate, persist,
/// notify. Each form kind plugs in through [`FormSubmission`].
pub struct SubmissionPipeline<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    notify_from: String,
    notify_to: String,
}

impl<S, N> Clone for SubmissionPipeline<S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
            notify_from: self.notify_from.clone(),
            notify_to: self.notify_to.clone(),
        }
    }
}

impl<S, N> SubmissionPipeline<S, N>
where
    S: DocumentStore + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, notify_from: String, notify_to: String) -> Self {
        Self {
            store,
            notifier,
            notify_from,
            notify_to,
        }
    }

    /// Validation failures reject before any evaluation runs; a storage
    /// failure fails the request. The notification is fire-and-forget: its
    /// outcome never reaches the caller.
    pub async fn process<F: FormSubmission>(
        &self,
        form: F,
    ) -> Result<ProcessedSubmission<F::Outcome>> {
        form.validate()?;

        let outcome = form.evaluate();
        let result_value = outcome
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        let document =
            SubmissionDocument::new(F::KIND, serde_json::to_value(&form)?, result_value);
        self.store.insert(F::KIND.collection(), &document).await?;
        tracing::info!("📨 Stored {} submission {}", F::KIND, document.id);

        let notification = form.notification(outcome.as_ref());
        let email = OutboundEmail {
            from: self.notify_from.clone(),
            to: self.notify_to.clone(),
            subject: notification.subject,
            text: notification.body,
        };
        let notifier = Arc::clone(&self.notifier);
        let kind = F::KIND;
        tokio::spawn(async move {
            match notifier.send(&email).await {
                Ok(()) => tracing::debug!("Notification sent for {} submission", kind),
                Err(e) => tracing::warn!("Notification for {} submission failed: {}", kind, e),
            }
        });

        Ok(ProcessedSubmission {
            id: document.id,
            outcome,
        })
    }
}
