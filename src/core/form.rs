use crate::core::validation::{sanitize_phone, validate_subscription, Field, FieldErrors};
use crate::domain::model::{
    Notification, NotificationVariant, SubscriptionRequest, SubscriptionResponse,
};
use crate::domain::ports::{Notifier, SubscriptionBackend};
use crate::utils::error::{PortfolioError, Result};

pub const SUCCESS_TITLE_NEW: &str = "You're subscribed!";
pub const SUCCESS_TITLE_UPDATED: &str = "Subscription updated";
pub const SUCCESS_FALLBACK: &str = "You'll receive updates soon.";
pub const FAILURE_TITLE: &str = "Subscription failed";
pub const REJECTION_FALLBACK: &str = "Failed to subscribe";
pub const TRANSPORT_FAILURE: &str = "Something went wrong. Please try again.";

/// Why `begin_submit` did not produce a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A submission is already in flight.
    Busy,
    Invalid(FieldErrors),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Subscribed(Notification),
    Rejected(Notification),
    TransportFailed(Notification),
    Invalid(FieldErrors),
    Busy,
}

impl SubmitOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            SubmitOutcome::Subscribed(n)
            | SubmitOutcome::Rejected(n)
            | SubmitOutcome::TransportFailed(n) => Some(n),
            SubmitOutcome::Invalid(_) | SubmitOutcome::Busy => None,
        }
    }
}

/// State of the "Subscribe to Updates" dialog for one modal session.
///
/// Every transition is an explicit method; while a submission is in flight
/// edits and cancel are ignored, matching disabled inputs.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionForm {
    full_name: String,
    phone_number: String,
    email: String,
    errors: FieldErrors,
    is_submitting: bool,
    is_open: bool,
}

impl SubscriptionForm {
    /// 建立並開啟對話框
    pub fn new() -> Self {
        Self {
            is_open: true,
            ..Self::default()
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Reopening keeps whatever was entered before a cancel.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Applies one edit. The phone value is sanitized on every call, and only
    /// the edited field's error is cleared. Returns `false` while submitting.
    pub fn set_field(&mut self, field: Field, value: &str) -> bool {
        if self.is_submitting {
            tracing::debug!("Ignoring edit to {} while submitting", field);
            return false;
        }

        match field {
            Field::FullName => self.full_name = value.to_string(),
            Field::PhoneNumber => self.phone_number = sanitize_phone(value),
            Field::Email => self.email = value.to_string(),
        }
        self.errors.remove(&field);
        true
    }

    /// Closes without clearing values or sending anything.
    pub fn cancel(&mut self) -> bool {
        if self.is_submitting {
            return false;
        }
        self.is_open = false;
        true
    }

    pub fn reset(&mut self) {
        self.full_name.clear();
        self.phone_number.clear();
        self.email.clear();
        self.errors.clear();
    }

    /// Validates the current values; on success marks the form as submitting
    /// and returns the payload to send.
    pub fn begin_submit(&mut self) -> std::result::Result<SubscriptionRequest, SubmitBlocked> {
        if self.is_submitting {
            return Err(SubmitBlocked::Busy);
        }

        let errors = validate_subscription(&self.full_name, &self.phone_number, &self.email);
        self.errors = errors.clone();
        if !errors.is_empty() {
            tracing::debug!("Validation failed on {} field(s)", errors.len());
            return Err(SubmitBlocked::Invalid(errors));
        }

        self.is_submitting = true;
        Ok(SubscriptionRequest {
            full_name: self.full_name.clone(),
            phone_number: non_empty(&self.phone_number),
            email: non_empty(&self.email),
        })
    }

    /// Settles an in-flight submission and builds its single notification.
    /// Returns `None`, leaving the form untouched, when nothing is in flight.
    pub fn complete_submit(
        &mut self,
        result: Result<SubscriptionResponse>,
    ) -> Option<SubmitOutcome> {
        if !self.is_submitting {
            tracing::debug!("Ignoring completion with no submission in flight");
            return None;
        }
        Some(self.settle(result))
    }

    fn settle(&mut self, result: Result<SubscriptionResponse>) -> SubmitOutcome {
        self.is_submitting = false;

        match result {
            Ok(response) => {
                let notification = self.success_notification(&response);
                self.reset();
                self.close();
                SubmitOutcome::Subscribed(notification)
            }
            Err(PortfolioError::Rejected { status, message }) => {
                tracing::warn!("Subscription rejected with status {}", status);
                SubmitOutcome::Rejected(failure(
                    message.unwrap_or_else(|| REJECTION_FALLBACK.to_string()),
                ))
            }
            Err(e) => {
                tracing::warn!("Subscription request did not complete: {}", e);
                SubmitOutcome::TransportFailed(failure(TRANSPORT_FAILURE.to_string()))
            }
        }
    }

    /// Validate, send one request, and show one notification.
    pub async fn submit<B, N>(&mut self, backend: &B, notifier: &N) -> SubmitOutcome
    where
        B: SubscriptionBackend + ?Sized,
        N: Notifier + ?Sized,
    {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(SubmitBlocked::Busy) => return SubmitOutcome::Busy,
            Err(SubmitBlocked::Invalid(errors)) => return SubmitOutcome::Invalid(errors),
        };

        tracing::info!(
            has_phone = request.phone_number.is_some(),
            has_email = request.email.is_some(),
            "📨 Submitting subscription"
        );
        let result = backend.subscribe(&request).await;
        let outcome = self.settle(result);

        if let Some(notification) = outcome.notification() {
            notifier.notify(notification);
        }
        outcome
    }

    fn success_notification(&self, response: &SubscriptionResponse) -> Notification {
        let mut description = response
            .message
            .clone()
            .unwrap_or_else(|| SUCCESS_FALLBACK.to_string());

        if response.email_sent.unwrap_or(false) && !self.email.is_empty() {
            description.push_str(&format!(
                " A welcome email has been sent to {}.",
                self.email
            ));
        }

        let title = if response.is_new_subscription.unwrap_or(false) {
            SUCCESS_TITLE_NEW
        } else {
            SUCCESS_TITLE_UPDATED
        };

        Notification {
            title: title.to_string(),
            description,
            variant: NotificationVariant::Default,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn failure(description: String) -> Notification {
    Notification {
        title: FAILURE_TITLE.to_string(),
        description,
        variant: NotificationVariant::Destructive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{CONTACT_REQUIRED, NAME_REQUIRED};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockBackend {
        reply: Mutex<Option<Result<SubscriptionResponse>>>,
        requests: Mutex<Vec<SubscriptionRequest>>,
    }

    impl MockBackend {
        fn new(reply: Result<SubscriptionResponse>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<SubscriptionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SubscriptionBackend for MockBackend {
        async fn subscribe(&self, request: &SubscriptionRequest) -> Result<SubscriptionResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply
                .lock()
                .unwrap()
                .take()
                .expect("backend called more than once")
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        shown: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: &Notification) {
            self.shown.lock().unwrap().push(notification.clone());
        }
    }

    fn filled_form() -> SubscriptionForm {
        let mut form = SubscriptionForm::new();
        form.set_field(Field::FullName, "Asha Rao");
        form.set_field(Field::Email, "asha@example.com");
        form
    }

    #[test]
    fn test_phone_sanitized_on_every_edit() {
        let mut form = SubscriptionForm::new();
        form.set_field(Field::PhoneNumber, "+91-98765 43210 ext 5");
        assert_eq!(form.phone_number(), "9198765432");
        form.set_field(Field::Email, "  Mixed@Case.com ");
        assert_eq!(form.email(), "  Mixed@Case.com ");
    }

    #[test]
    fn test_edit_clears_only_that_field_error() {
        let mut form = SubscriptionForm::new();
        assert!(form.begin_submit().is_err());
        assert_eq!(form.error(Field::FullName), Some(NAME_REQUIRED));
        assert_eq!(form.error(Field::Email), Some(CONTACT_REQUIRED));

        form.set_field(Field::Email, "x");
        assert_eq!(form.error(Field::Email), None);
        assert_eq!(form.error(Field::FullName), Some(NAME_REQUIRED));
        assert_eq!(form.error(Field::PhoneNumber), Some(CONTACT_REQUIRED));
    }

    #[test]
    fn test_begin_submit_builds_payload_and_locks_form() {
        let mut form = filled_form();
        let request = form.begin_submit().unwrap();
        assert_eq!(request.full_name, "Asha Rao");
        assert_eq!(request.phone_number, None);
        assert_eq!(request.email.as_deref(), Some("asha@example.com"));
        assert!(form.is_submitting());

        assert_eq!(form.begin_submit(), Err(SubmitBlocked::Busy));
        assert!(!form.set_field(Field::FullName, "Other"));
        assert!(!form.cancel());
        assert_eq!(form.full_name(), "Asha Rao");
        assert!(form.is_open());
    }

    #[test]
    fn test_cancel_keeps_values() {
        let mut form = filled_form();
        assert!(form.cancel());
        assert!(!form.is_open());
        form.open();
        assert_eq!(form.full_name(), "Asha Rao");
        assert_eq!(form.email(), "asha@example.com");
    }

    #[test]
    fn test_completion_without_submission_is_ignored() {
        let mut form = filled_form();

        let outcome = form.complete_submit(Ok(SubscriptionResponse::default()));

        assert!(outcome.is_none());
        assert_eq!(form.full_name(), "Asha Rao");
        assert_eq!(form.email(), "asha@example.com");
        assert!(form.is_open());
    }

    #[test]
    fn test_completion_settles_in_flight_submission() {
        let mut form = filled_form();
        form.begin_submit().unwrap();

        let outcome = form
            .complete_submit(Err(PortfolioError::Rejected {
                status: 409,
                message: None,
            }))
            .unwrap();

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert!(!form.is_submitting());
        assert_eq!(form.complete_submit(Ok(SubscriptionResponse::default())), None);
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let backend = MockBackend::new(Ok(SubscriptionResponse::default()));
        let notifier = RecordingNotifier::default();
        let mut form = SubscriptionForm::new();
        form.set_field(Field::FullName, "Asha Rao");

        let outcome = form.submit(&backend, &notifier).await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.len() == 2));
        assert!(backend.requests().is_empty());
        assert!(notifier.shown.lock().unwrap().is_empty());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_success_resets_and_closes() {
        let backend = MockBackend::new(Ok(SubscriptionResponse {
            message: None,
            is_new_subscription: Some(true),
            email_sent: Some(true),
        }));
        let notifier = RecordingNotifier::default();
        let mut form = filled_form();

        let outcome = form.submit(&backend, &notifier).await;

        let notification = outcome.notification().unwrap();
        assert_eq!(notification.title, SUCCESS_TITLE_NEW);
        assert_eq!(
            notification.description,
            "You'll receive updates soon. A welcome email has been sent to asha@example.com."
        );
        assert_eq!(backend.requests().len(), 1);
        assert_eq!(notifier.shown.lock().unwrap().len(), 1);
        assert_eq!(form.full_name(), "");
        assert_eq!(form.email(), "");
        assert!(!form.is_open());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_updated_subscription_without_email_note() {
        let backend = MockBackend::new(Ok(SubscriptionResponse {
            message: Some("Details updated".to_string()),
            is_new_subscription: Some(false),
            email_sent: Some(true),
        }));
        let notifier = RecordingNotifier::default();
        let mut form = SubscriptionForm::new();
        form.set_field(Field::FullName, "Asha Rao");
        form.set_field(Field::PhoneNumber, "9876543210");

        let outcome = form.submit(&backend, &notifier).await;

        let notification = outcome.notification().unwrap();
        assert_eq!(notification.title, SUCCESS_TITLE_UPDATED);
        assert_eq!(notification.description, "Details updated");
    }

    #[tokio::test]
    async fn test_rejection_preserves_state() {
        let backend = MockBackend::new(Err(PortfolioError::Rejected {
            status: 409,
            message: Some("Email already subscribed".to_string()),
        }));
        let notifier = RecordingNotifier::default();
        let mut form = filled_form();

        let outcome = form.submit(&backend, &notifier).await;

        let notification = outcome.notification().unwrap();
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(notification.title, FAILURE_TITLE);
        assert_eq!(notification.description, "Email already subscribed");
        assert!(notification.is_failure());
        assert_eq!(form.full_name(), "Asha Rao");
        assert_eq!(form.email(), "asha@example.com");
        assert!(form.is_open());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_fallback() {
        let backend = MockBackend::new(Err(PortfolioError::Rejected {
            status: 500,
            message: None,
        }));
        let notifier = RecordingNotifier::default();
        let mut form = filled_form();

        let outcome = form.submit(&backend, &notifier).await;
        assert_eq!(outcome.notification().unwrap().description, REJECTION_FALLBACK);
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic() {
        let parse_error = serde_json::from_str::<SubscriptionResponse>("<html>").unwrap_err();
        let backend = MockBackend::new(Err(PortfolioError::SerializationError(parse_error)));
        let notifier = RecordingNotifier::default();
        let mut form = filled_form();

        let outcome = form.submit(&backend, &notifier).await;

        assert!(matches!(outcome, SubmitOutcome::TransportFailed(_)));
        assert_eq!(outcome.notification().unwrap().description, TRANSPORT_FAILURE);
        assert_eq!(notifier.shown.lock().unwrap().len(), 1);
        assert_eq!(form.full_name(), "Asha Rao");
        assert!(!form.is_submitting());
    }
}
