use crate::core::form::{SubmitOutcome, SubscriptionForm};
use crate::core::validation::Field;
use crate::domain::ports::{Notifier, SubscriptionBackend};

/// Runs one form session per call against a backend and notification sink.
///
/// Validation errors are returned in the outcome, not logged; the caller
/// decides how to show them.
pub struct SubscriptionService<B: SubscriptionBackend, N: Notifier> {
    backend: B,
    notifier: N,
}

impl<B: SubscriptionBackend, N: Notifier> SubscriptionService<B, N> {
    pub fn new(backend: B, notifier: N) -> Self {
        Self { backend, notifier }
    }

    /// Fills a fresh form as if typed by the user, then submits it.
    pub async fn subscribe(
        &self,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> SubmitOutcome {
        let mut form = SubscriptionForm::new();
        form.set_field(Field::FullName, full_name);
        if let Some(email) = email {
            form.set_field(Field::Email, email);
        }
        if let Some(phone) = phone {
            form.set_field(Field::PhoneNumber, phone);
        }

        self.submit(&mut form).await
    }

    pub async fn submit(&self, form: &mut SubscriptionForm) -> SubmitOutcome {
        let outcome = form.submit(&self.backend, &self.notifier).await;
        if matches!(outcome, SubmitOutcome::Busy) {
            tracing::warn!("Submission already in progress");
        }
        outcome
    }
}
