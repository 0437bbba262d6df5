//! Contact form view-model and the webhook that receives submissions.
//!
//! The form moves `Idle -> Submitting -> Success | Error`. Fields are
//! read-only while `Submitting`; editing one after a finished submission
//! returns the form to `Idle`.

use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use reqwest::multipart::Form;
use tracing::{info, instrument, warn};

use vanguard_feeds::build_client;
use vanguard_shared::{
    ContactConfig, ContactSubmission, InterestArea, Result, VanguardError, parse_http_url,
};

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmitState {
    /// Status line shown under the form.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Submitting => Some("Sending..."),
            Self::Success => {
                Some("Message sent successfully! We'll get back to you within 24 hours.")
            }
            Self::Error => Some("Error sending message. Please try again or contact us directly."),
        }
    }
}

/// Editable form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Email,
    Company,
    InterestArea,
    Message,
}

impl Field {
    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Company => "company",
            Self::InterestArea => "interestArea",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub interest_area: Option<InterestArea>,
    pub message: String,
}

impl ContactFields {
    /// First required field left blank. Presence only; no format checks.
    pub fn missing_required(&self) -> Option<Field> {
        [
            (Field::FullName, &self.full_name),
            (Field::Email, &self.email),
            (Field::Message, &self.message),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    fields: ContactFields,
    state: SubmitState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// The submit button is disabled while a request is in flight.
    pub fn is_submit_enabled(&self) -> bool {
        self.state != SubmitState::Submitting
    }

    /// Update one input. An empty interest area clears the selection.
    ///
    /// Inputs are locked while a submission is in flight.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<()> {
        if self.state == SubmitState::Submitting {
            return Err(VanguardError::validation(format!(
                "{} cannot change while a submission is in progress",
                field.name()
            )));
        }

        match field {
            Field::FullName => self.fields.full_name = value.to_string(),
            Field::Email => self.fields.email = value.to_string(),
            Field::Company => self.fields.company = value.to_string(),
            Field::Message => self.fields.message = value.to_string(),
            Field::InterestArea => {
                self.fields.interest_area = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
        }

        if matches!(self.state, SubmitState::Success | SubmitState::Error) {
            self.state = SubmitState::Idle;
        }
        Ok(())
    }

    /// Clear every field and return to `Idle`.
    pub fn reset(&mut self) {
        self.fields = ContactFields::default();
        self.state = SubmitState::Idle;
    }

    /// Validate, timestamp, and enter `Submitting`.
    ///
    /// Refused while another submission is in flight or when a required
    /// field is blank; the state is left unchanged in both cases.
    pub fn begin_submit(&mut self, source_label: &str) -> Result<ContactSubmission> {
        if self.state == SubmitState::Submitting {
            return Err(VanguardError::validation("a submission is already in progress"));
        }
        if let Some(field) = self.fields.missing_required() {
            return Err(VanguardError::validation(format!(
                "{} is required",
                field.name()
            )));
        }

        self.state = SubmitState::Submitting;
        Ok(ContactSubmission {
            full_name: self.fields.full_name.clone(),
            email: self.fields.email.clone(),
            company: self.fields.company.clone(),
            interest_area: self.fields.interest_area,
            message: self.fields.message.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            source_label: source_label.to_string(),
        })
    }

    /// Record the webhook outcome. Success clears the fields.
    pub fn finish(&mut self, outcome: &Result<()>) {
        match outcome {
            Ok(()) => {
                self.fields = ContactFields::default();
                self.state = SubmitState::Success;
            }
            Err(_) => self.state = SubmitState::Error,
        }
    }

    /// Run a full submit cycle against `submitter`.
    ///
    /// Returns an error only when the submission is refused before sending.
    /// Delivery failures land in [`SubmitState::Error`].
    pub async fn submit(&mut self, submitter: &ContactSubmitter) -> Result<SubmitState> {
        let submission = self.begin_submit(submitter.source_label())?;
        let outcome = submitter.send(&submission).await;
        if let Err(e) = &outcome {
            warn!(error = %e, "contact submission failed");
        }
        self.finish(&outcome);
        Ok(self.state)
    }
}

// ---------------------------------------------------------------------------
// Webhook
// ---------------------------------------------------------------------------

/// Serialize a submission as multipart form data, in wire order.
pub fn multipart_form(submission: &ContactSubmission) -> Form {
    submission
        .form_fields()
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value))
}

/// Posts submissions to the automation webhook. No auth, no timeout, no retry.
#[derive(Debug, Clone)]
pub struct ContactSubmitter {
    client: Client,
    webhook_url: String,
    source_label: String,
}

impl ContactSubmitter {
    pub fn new(config: &ContactConfig) -> Result<Self> {
        parse_http_url("contact.webhook_url", &config.webhook_url)?;
        Ok(Self {
            client: build_client(None)?,
            webhook_url: config.webhook_url.clone(),
            source_label: config.source_label.clone(),
        })
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// POST one submission. Any 2xx counts as delivered; the body is ignored.
    #[instrument(skip_all, fields(url = %self.webhook_url))]
    pub async fn send(&self, submission: &ContactSubmission) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .multipart(multipart_form(submission))
            .send()
            .await
            .map_err(|e| VanguardError::Network(format!("{}: {e}", self.webhook_url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VanguardError::status(&self.webhook_url, status.as_u16()));
        }

        info!(status = status.as_u16(), "contact submission delivered");
        Ok(())
    }
}
