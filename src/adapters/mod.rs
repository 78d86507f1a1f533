// Adapters layer: concrete implementations of the domain ports.

pub mod mailer;
pub mod store;
