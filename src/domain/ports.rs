use crate::domain::model::{FormKind, Notification, OutboundEmail, SubmissionDocument, SubmissionPage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use async_trait::async_trait;
use serde::Serialize;

/// Append-only document persistence, one collection per form kind.
pub trait DocumentStore: Send + Sync {
    fn insert(
        &self,
        collection: &str,
        document: &SubmissionDocument,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Page through a collection, newest first.
    fn list(
        &self,
        collection: &str,
        limit: usize,
        offset: usize,
    ) -> impl std::future::Future<Output = Result<SubmissionPage>> + Send;
}

/// Outbound notification transport.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// One marketing-site form: a validated payload, an optional deterministic
/// evaluation, and a notification summary. The pipeline treats every form
/// through this interface, so the evaluation step is interchangeable.
pub trait FormSubmission: Validate + Serialize + Send + Sync {
    type Outcome: Serialize + Send + Sync;

    const KIND: FormKind;

    /// The form's deterministic formula, if it has one. Runs only on
    /// validated payloads and cannot fail.
    fn evaluate(&self) -> Option<Self::Outcome>;

    /// Plain-text summary of input and result for the internal notification.
    fn notification(&self, outcome: Option<&Self::Outcome>) -> Notification;
}
