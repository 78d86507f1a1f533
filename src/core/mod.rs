pub mod pipeline;

pub use crate::domain::model::{FormKind, SubmissionDocument, SubmissionPage};
pub use crate::domain::ports::{DocumentStore, FormSubmission, Notifier};
pub use crate::utils::error::Result;
