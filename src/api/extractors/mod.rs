//! Custom request extractors.

mod validated_form;

pub use validated_form::{validation_messages, FormSubmission};
