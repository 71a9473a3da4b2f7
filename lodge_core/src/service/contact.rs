use std::{fmt, net::IpAddr, sync::Arc};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{entity::prelude::*, ids::ContactMessageId};

const MAX_NAME_CHARS: usize = 100;
const MAX_CUSTOM_SUBJECT_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &str) {
        self.0.push(FieldError {
            field,
            message: message.to_owned(),
        });
    }

    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self.0.iter().map(|error| error.field).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

#[derive(Debug, Error)]
pub enum ContactServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("{0}")]
    Validation(ValidationErrors),
}

#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// Tells the lodge secretary about a new contact message.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &ContactMessageModel) -> Result<(), NotifyError>;
}

/// Writes the notification to the log instead of sending it anywhere.
pub struct LogNotifier {
    recipient: String,
}

impl LogNotifier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &ContactMessageModel) -> Result<(), NotifyError> {
        info!(
            to = %self.recipient,
            from = %message.email,
            subject = %format!("Nuevo mensaje de contacto: {}", message.subject_line()),
            "contact notification"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    #[serde(default)]
    pub custom_subject: Option<String>,
    pub message: String,
}

impl Default for ContactSubmission {
    fn default() -> Self {
        ContactSubmission {
            name: String::new(),
            email: String::new(),
            subject: ContactSubject::Information,
            custom_subject: None,
            message: String::new(),
        }
    }
}

pub fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((user, domain)) => {
            !user.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "Este campo es obligatorio.");
        } else if name.chars().count() > MAX_NAME_CHARS {
            errors.push("name", "El nombre es demasiado largo.");
        }

        if !looks_like_email(self.email.trim()) {
            errors.push("email", "Introduzca una dirección de correo electrónico válida.");
        }

        let custom = self.custom_subject.as_deref().map(str::trim).unwrap_or_default();
        if self.subject == ContactSubject::Other && custom.is_empty() {
            errors.push("custom_subject", "Especifica el asunto de tu mensaje");
        } else if custom.chars().count() > MAX_CUSTOM_SUBJECT_CHARS {
            errors.push("custom_subject", "El asunto es demasiado largo.");
        }

        if self.message.trim().is_empty() {
            errors.push("message", "Este campo es obligatorio.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// What the contact page lists next to the form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactDetails {
    pub channels: Vec<ContactChannelModel>,
    pub office_hours: Vec<OfficeHoursModel>,
}

#[derive(Clone)]
pub struct ContactService {
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
}

impl ContactService {
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    /// Active channels with the primary ones first, and the office hours
    /// by weekday.
    pub async fn details(&self) -> Result<ContactDetails, ContactServiceError> {
        let channels = ContactChannel::find()
            .filter(ContactChannelColumn::IsActive.eq(true))
            .order_by_desc(ContactChannelColumn::IsPrimary)
            .order_by_asc(ContactChannelColumn::SortOrder)
            .all(&self.db)
            .await?;

        let office_hours = OfficeHours::find()
            .order_by_asc(OfficeHoursColumn::Weekday)
            .all(&self.db)
            .await?;

        Ok(ContactDetails {
            channels,
            office_hours,
        })
    }

    /// Stores a contact message, then notifies. A failed notification is
    /// logged and does not undo the stored message.
    pub async fn submit(
        &self,
        submission: ContactSubmission,
        source_ip: Option<IpAddr>,
    ) -> Result<ContactMessageModel, ContactServiceError> {
        submission
            .validate()
            .map_err(ContactServiceError::Validation)?;

        let custom_subject = submission
            .custom_subject
            .map(|custom| custom.trim().to_owned())
            .filter(|custom| !custom.is_empty());

        let message = ContactMessageActiveModel {
            id: Set(ContactMessageId::new()),
            name: Set(submission.name.trim().to_owned()),
            email: Set(submission.email.trim().to_owned()),
            subject: Set(submission.subject),
            custom_subject: Set(custom_subject),
            message: Set(submission.message),
            sent_at: Set(Utc::now()),
            source_ip: Set(source_ip.map(|ip| ip.to_string())),
            is_read: Set(false),
            is_answered: Set(false),
        }
        .insert(&self.db)
        .await?;

        info!(message = %message.id, subject = %message.subject_line(), "contact message stored");

        if let Err(err) = self.notifier.notify(&message).await {
            warn!(message = %message.id, error = %err, "could not send contact notification");
        }

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::test_utils;

    struct FailingNotifier {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(&self, _message: &ContactMessageModel) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(NotifyError("smtp unreachable".to_owned()))
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Juan Pérez".to_owned(),
            email: "juan@example.org".to_owned(),
            subject: ContactSubject::Visit,
            custom_subject: None,
            message: "Quisiera visitar el templo.".to_owned(),
        }
    }

    #[test]
    fn test_other_subject_needs_custom_text() {
        let mut form = submission();
        form.subject = ContactSubject::Other;

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.for_field("custom_subject"),
            Some("Especifica el asunto de tu mensaje")
        );

        form.custom_subject = Some("Donación de libros".to_owned());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_validation_collects_every_field() {
        let form = ContactSubmission {
            email: "no es correo".to_owned(),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();

        assert!(errors.for_field("name").is_some());
        assert!(errors.for_field("email").is_some());
        assert!(errors.for_field("message").is_some());
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("a@b.mx"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.mx"));
        assert!(!looks_like_email("a b@c.mx"));
    }

    #[tokio::test]
    async fn test_submit_stores_message_with_ip() {
        let db = test_utils::setup_test_db().await;
        let service = ContactService::new(db.clone(), Arc::new(LogNotifier::new("sec@logia.mx")));

        let stored = service
            .submit(submission(), Some("10.0.0.7".parse().unwrap()))
            .await
            .unwrap();

        assert_eq!(stored.source_ip.as_deref(), Some("10.0.0.7"));
        assert_eq!(stored.subject_line(), "Solicitar visita");
        assert!(!stored.is_read);
        assert_eq!(ContactMessage::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failing_notifier_keeps_message() {
        let db = test_utils::setup_test_db().await;
        let notifier = Arc::new(FailingNotifier {
            calls: AtomicUsize::new(0),
        });
        let service = ContactService::new(db.clone(), notifier.clone());

        let stored = service.submit(submission(), None).await;

        assert!(stored.is_ok());
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ContactMessage::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submission_is_not_stored() {
        let db = test_utils::setup_test_db().await;
        let service = ContactService::new(db.clone(), Arc::new(LogNotifier::new("sec@logia.mx")));
        let mut form = submission();
        form.subject = ContactSubject::Other;

        let result = service.submit(form, None).await;

        assert!(matches!(result, Err(ContactServiceError::Validation(_))));
        assert_eq!(ContactMessage::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_details_list_primary_channels_first() {
        let db = test_utils::setup_test_db().await;
        let service = ContactService::new(db.clone(), Arc::new(LogNotifier::new("sec@logia.mx")));
        let mut phone = test_utils::contact_channel("Secretaría", ChannelKind::Phone, "999 123 4567");
        phone.sort_order = Set(1);
        phone.insert(&db).await.unwrap();
        let mut email = test_utils::contact_channel("Correo", ChannelKind::Email, "sec@logia.mx");
        email.sort_order = Set(5);
        email.is_primary = Set(true);
        email.insert(&db).await.unwrap();
        let mut hidden = test_utils::contact_channel("Fax", ChannelKind::Other, "n/a");
        hidden.is_active = Set(false);
        hidden.insert(&db).await.unwrap();
        test_utils::office_hours(4).insert(&db).await.unwrap();
        let mut monday = test_utils::office_hours(0);
        monday.closed = Set(true);
        monday.insert(&db).await.unwrap();

        let details = service.details().await.unwrap();

        let titles: Vec<_> = details.channels.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Correo", "Secretaría"]);
        assert_eq!(details.channels[0].href().as_deref(), Some("mailto:sec@logia.mx"));
        assert_eq!(details.channels[1].href().as_deref(), Some("tel:+9991234567"));
        let hours: Vec<_> = details.office_hours.iter().map(|h| h.describe()).collect();
        assert_eq!(hours, vec!["Lunes - Cerrado", "Viernes: 09:00 - 14:00"]);
    }
}
