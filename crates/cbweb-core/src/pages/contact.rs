//! Contact page: header copy, contact details and the contact lead form.

use serde::Serialize;
use serde_json::Value;

use super::{MountToken, Slice};
use crate::api::{ContentClient, FetchError, Transport};
use crate::forms::{FormKind, LeadFormState};
use crate::reconcile::{reconcile, select_payload, ContentSection, FieldReader};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactHeader {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
}

impl ContactHeader {
    fn from_reader(r: &FieldReader<'_>) -> Self {
        Self {
            title: r.opt_text(&["title"]),
            subtitle: r.opt_text(&["subtitle"]),
            description: r.opt_text(&["description"]),
        }
    }

    pub fn fallback() -> Self {
        Self {
            title: Some("Get in".to_string()),
            subtitle: Some("touch today".to_string()),
            description: Some("Lorem ipsum dolor sit amet consectetur adipiscing elit semper dalar elementum tempus hac tellus libero accumsan.".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub section_title: String,
    pub location_label: String,
    pub location_value: Option<String>,
    pub phone_label: String,
    pub phone_value: Option<String>,
    pub email_label: String,
    pub email_value: Option<String>,
}

impl ContactDetails {
    /// Reads a contact record; labels default, values stay absent.
    pub fn from_reader(r: &FieldReader<'_>) -> Self {
        Self {
            section_title: r.text(&["section_title", "title"], "Contact details"),
            location_label: r.text(&["location_label", "address_label"], "Our location"),
            location_value: r.opt_text(&["location_value", "address", "location"]),
            phone_label: r.text(&["phone_label"], "Call us"),
            phone_value: r.opt_text(&["phone_value", "phone"]),
            email_label: r.text(&["email_label"], "Email us"),
            email_value: r.opt_text(&["email_value", "email"]),
        }
    }

    pub fn fallback() -> Self {
        Self {
            section_title: "Contact details".to_string(),
            location_label: "Our location".to_string(),
            location_value: Some("58 Middle Point Rd\nSan Francisco, 94124".to_string()),
            phone_label: "Call us".to_string(),
            phone_value: Some("(123) 456 - 789".to_string()),
            email_label: "Email us".to_string(),
            email_value: Some("contact@company.com".to_string()),
        }
    }

    /// Location with line breaks turned into `<br>`.
    pub fn formatted_location(&self) -> String {
        self.location_value
            .as_deref()
            .unwrap_or_default()
            .replace("\r\n", "<br>")
            .replace('\n', "<br>")
    }

    pub fn phone_href(&self) -> String {
        let digits: String = self
            .phone_value
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }

    pub fn email_href(&self) -> String {
        format!("mailto:{}", self.email_value.as_deref().unwrap_or_default())
    }
}

/// First record of a `/contact` response (a bare array, or one wrapped in
/// an envelope). An object payload is taken as the record itself.
fn first_contact_record(resp: &Value) -> ContentSection {
    let record = match select_payload(resp) {
        Value::Array(items) => items.first(),
        other => Some(other),
    };
    record
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPage {
    pub header: Slice<ContactHeader>,
    pub details: Slice<ContactDetails>,
    pub form: LeadFormState,
}

impl Default for ContactPage {
    fn default() -> Self {
        Self {
            header: Slice::default(),
            details: Slice::default(),
            form: LeadFormState::new(FormKind::Contact),
        }
    }
}

impl ContactPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the last form submission failed.
    pub fn submit_error(&self) -> bool {
        self.form.status.error
    }

    pub async fn mount<T: Transport>(&mut self, client: &ContentClient<T>, mount: &MountToken) {
        let content = match client.page_content("contact").await {
            Ok(resp) => reconcile(&resp),
            Err(e) => {
                // Both slices come from the one page fetch.
                self.header.resolve(
                    mount,
                    "contact header",
                    Err::<ContactHeader, _>(&e),
                    ContactHeader::fallback,
                );
                self.details.resolve(
                    mount,
                    "contact details",
                    Err::<ContactDetails, _>(&e),
                    ContactDetails::fallback,
                );
                return;
            }
        };

        let r = FieldReader::new(&content);
        self.header.resolve(
            mount,
            "contact header",
            Ok::<_, FetchError>(ContactHeader::from_reader(&r.section(&["header"]))),
            ContactHeader::fallback,
        );

        let embedded = r.section(&["contact", "contact_details"]);
        if !embedded.is_empty() {
            self.details.resolve(
                mount,
                "contact details",
                Ok::<_, FetchError>(ContactDetails::from_reader(&embedded)),
                ContactDetails::fallback,
            );
            return;
        }
        if !mount.is_mounted() {
            return;
        }
        let details = client.contact_details().await.map(|resp| {
            let record = first_contact_record(&resp);
            ContactDetails::from_reader(&FieldReader::new(&record))
        });
        self.details
            .resolve(mount, "contact details", details, ContactDetails::fallback);
    }
}

pub async fn load<T: Transport>(client: &ContentClient<T>, mount: &MountToken) -> ContactPage {
    let mut page = ContactPage::new();
    page.mount(client, mount).await;
    page
}
