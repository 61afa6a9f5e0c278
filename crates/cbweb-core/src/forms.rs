//! Lead-capture forms (contact page and about page).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ContentClient, FetchError, Transport};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email address is not valid")]
    InvalidEmail,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Which endpoint a lead form posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    About,
}

impl FormKind {
    pub fn path(self) -> &'static str {
        match self {
            FormKind::Contact => "/forms/contact",
            FormKind::About => "/forms/about",
        }
    }
}

/// Visitor-entered lead form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl LeadForm {
    /// Name, email and message are required; email must look like `local@domain`.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(FormError::MissingField("email"));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(FormError::InvalidEmail);
        }
        if self.message.trim().is_empty() {
            return Err(FormError::MissingField("message"));
        }
        Ok(())
    }

    /// Request body: trimmed values, empty optional fields omitted.
    pub fn to_body(&self) -> Value {
        let body = LeadForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_empty(&self.phone),
            company: non_empty(&self.company),
            message: self.message.trim().to_string(),
        };
        serde_json::to_value(body).unwrap_or(Value::Null)
    }
}

/// Submission flags shown next to the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStatus {
    pub submitting: bool,
    pub success: bool,
    pub error: bool,
}

/// A lead form together with its submission status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadFormState {
    #[serde(skip)]
    kind: FormKind,
    pub form: LeadForm,
    pub status: FormStatus,
}

impl LeadFormState {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            form: LeadForm::default(),
            status: FormStatus::default(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Validates and posts the form. On success the form is reset and
    /// `status.success` is set; on failure the entered values are kept.
    pub async fn submit<T: Transport>(
        &mut self,
        client: &ContentClient<T>,
    ) -> Result<Value, SubmitError> {
        self.form.validate()?;

        self.status.submitting = true;
        self.status.error = false;
        let outcome = client.submit_form(self.kind, &self.form).await;
        self.status.submitting = false;

        match outcome {
            Ok(ack) => {
                self.status.success = true;
                self.form = LeadForm::default();
                Ok(ack)
            }
            Err(e) => {
                tracing::error!("error submitting {:?} form: {}", self.kind, e);
                self.status.error = true;
                Err(e.into())
            }
        }
    }

    /// Clears the success banner.
    pub fn clear_success(&mut self) {
        self.status.success = false;
    }
}
