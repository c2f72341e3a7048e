//! Form descriptors, values and validation.
//!
//! A form is a list of [`FormField`] descriptors. Each descriptor's
//! [`FieldKind`] decides how it is rendered and how its raw string value is
//! read back. Raw input is held in [`FormValues`] until it validates into a
//! typed value such as [`AppointmentFormData`].

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::datetime;
use crate::{AppointmentCreateRequest, AppointmentStatus, AppointmentUpdateRequest};

pub const TITLE: &str = "title";
pub const START_TIME: &str = "startTime";
pub const END_TIME: &str = "endTime";
pub const LOCATION: &str = "location";
pub const STATUS: &str = "status";
pub const CLIENT_ID: &str = "clientId";
pub const PROPERTY_ID: &str = "propertyId";
pub const NOTES: &str = "notes";

pub const SUBMIT_LABEL: &str = "Save Appointment";
pub const BUSY_SUBMIT_LABEL: &str = "Saving...";
pub const CANCEL_LABEL: &str = "Cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// How a field is edited
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea { rows: u32 },
    DateTimeLocal,
    /// `empty_label` adds a leading "nothing selected" option
    Select {
        options: Vec<SelectOption>,
        empty_label: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<&'static str>,
}

impl FormField {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            placeholder: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn required_message(&self) -> String {
        format!("{} is required", self.label)
    }
}

/// Raw, unvalidated input keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value, `None` when blank
    pub fn non_blank(&self, name: &str) -> Option<&str> {
        let value = self.get(name).trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Overlay `other` on top of `self`
    pub fn merged(mut self, other: &FormValues) -> Self {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Per-field messages; at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Errors whose field is not among `shown`, e.g. the hidden owner id
    pub fn outside(&self, shown: &[FormField]) -> Vec<FieldError> {
        self.iter()
            .filter(|error| !shown.iter().any(|field| field.name == error.field))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.0.iter().map(|(field, message)| FieldError {
            field: field.clone(),
            message: message.clone(),
        })
    }
}

/// Check every required field for a non-blank value
pub fn validate_required(fields: &[FormField], values: &FormValues) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in fields.iter().filter(|field| field.required) {
        if values.non_blank(field.name).is_none() {
            errors.insert(field.name, field.required_message());
        }
    }
    errors
}

/// What the appointment form needs from its surroundings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentFormContext {
    pub clients: Vec<SelectOption>,
    pub properties: Vec<SelectOption>,
    /// Owner used when the initial values carry none; unknown until the
    /// signed-in user has been loaded
    pub user_id: Option<i64>,
}

impl AppointmentFormContext {
    fn knows(options: &[SelectOption], id: i64) -> bool {
        options.iter().any(|option| option.value == id.to_string())
    }
}

/// The appointment form's descriptors, in display order
pub fn appointment_fields(context: &AppointmentFormContext) -> Vec<FormField> {
    let status_options = AppointmentStatus::ALL
        .iter()
        .map(|status| SelectOption::new(status.as_str(), status.label()))
        .collect();

    vec![
        FormField::new(TITLE, "Title", FieldKind::Text)
            .required()
            .placeholder("Meeting with client"),
        FormField::new(START_TIME, "Start Time", FieldKind::DateTimeLocal).required(),
        FormField::new(END_TIME, "End Time", FieldKind::DateTimeLocal).required(),
        FormField::new(LOCATION, "Location", FieldKind::Text)
            .placeholder("Office, Client site, etc."),
        FormField::new(
            STATUS,
            "Status",
            FieldKind::Select {
                options: status_options,
                empty_label: None,
            },
        )
        .required(),
        FormField::new(
            CLIENT_ID,
            "Client",
            FieldKind::Select {
                options: context.clients.clone(),
                empty_label: Some("-- Select --".to_string()),
            },
        ),
        FormField::new(
            PROPERTY_ID,
            "Property",
            FieldKind::Select {
                options: context.properties.clone(),
                empty_label: Some("-- Select --".to_string()),
            },
        ),
        FormField::new(NOTES, "Notes", FieldKind::TextArea { rows: 3 })
            .placeholder("Additional notes..."),
    ]
}

/// A validated appointment form
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentFormData {
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub user_id: i64,
    pub client_id: Option<i64>,
    pub property_id: Option<i64>,
}

impl AppointmentFormData {
    pub fn into_create_request(self) -> AppointmentCreateRequest {
        AppointmentCreateRequest {
            title: self.title,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            notes: self.notes,
            status: self.status,
            user_id: self.user_id,
            client_id: self.client_id,
            property_id: self.property_id,
        }
    }

    pub fn into_update_request(self) -> AppointmentUpdateRequest {
        AppointmentUpdateRequest {
            title: Some(self.title),
            start_time: Some(self.start_time),
            end_time: Some(self.end_time),
            location: self.location,
            notes: self.notes,
            status: Some(self.status),
            client_id: self.client_id,
            property_id: self.property_id,
        }
    }
}

/// Hidden field carrying the owner between edit pre-fill and submit
pub const USER_ID: &str = "userId";

pub const OWNER_UNKNOWN_MESSAGE: &str = "Your user profile is not loaded yet, sign in again";

fn parse_datetime_field(
    values: &FormValues,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDateTime> {
    let raw = values.non_blank(field)?;
    let parsed = datetime::parse_local(raw);
    if parsed.is_none() {
        errors.insert(field, format!("{} must be a valid date and time", label));
    }
    parsed
}

fn parse_reference(
    values: &FormValues,
    field: &str,
    options: &[SelectOption],
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    let raw = values.non_blank(field)?;
    match raw.parse::<i64>() {
        Ok(id) if AppointmentFormContext::knows(options, id) => Some(id),
        _ => {
            errors.insert(field, message);
            None
        }
    }
}

/// Validate raw appointment input
pub fn validate_appointment(
    values: &FormValues,
    context: &AppointmentFormContext,
) -> Result<AppointmentFormData, ValidationErrors> {
    let fields = appointment_fields(context);
    let mut errors = validate_required(&fields, values);

    let start_time = parse_datetime_field(values, START_TIME, "Start Time", &mut errors);
    let end_time = parse_datetime_field(values, END_TIME, "End Time", &mut errors);
    if let (Some(start), Some(end)) = (start_time, end_time) {
        if end <= start {
            errors.insert(END_TIME, "End time must be after start time");
        }
    }

    let status = values.non_blank(STATUS).and_then(|raw| {
        let parsed = raw.parse::<AppointmentStatus>().ok();
        if parsed.is_none() {
            errors.insert(STATUS, "Select a valid status");
        }
        parsed
    });

    let client_id = parse_reference(
        values,
        CLIENT_ID,
        &context.clients,
        "Select a valid client",
        &mut errors,
    );
    let property_id = parse_reference(
        values,
        PROPERTY_ID,
        &context.properties,
        "Select a valid property",
        &mut errors,
    );

    let user_id = values
        .non_blank(USER_ID)
        .and_then(|raw| raw.parse::<i64>().ok())
        .or(context.user_id);
    if user_id.is_none() {
        errors.insert(USER_ID, OWNER_UNKNOWN_MESSAGE);
    }

    match (values.non_blank(TITLE), start_time, end_time, status, user_id) {
        (Some(title), Some(start_time), Some(end_time), Some(status), Some(user_id))
            if errors.is_empty() =>
        {
            Ok(AppointmentFormData {
                title: title.to_string(),
                start_time,
                end_time,
                status,
                location: values.non_blank(LOCATION).map(str::to_string),
                notes: values.non_blank(NOTES).map(str::to_string),
                user_id,
                client_id,
                property_id,
            })
        }
        _ => Err(errors),
    }
}

/// Editing state of a form: raw values, field errors and submission status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub values: FormValues,
    pub errors: ValidationErrors,
    pub submitting: bool,
    /// Error thrown by the submit handler, shown as a dismissible banner
    pub submit_error: Option<String>,
}

impl FormState {
    pub fn new(initial: FormValues) -> Self {
        Self {
            values: initial,
            ..Default::default()
        }
    }

    /// Set a field and forget its previous error
    pub fn edit(&mut self, name: &str, value: impl Into<String>) {
        self.values.set(name, value);
        self.errors.remove(name);
    }

    /// Validate before handing off to the submit handler.
    ///
    /// On failure the field errors are stored and nothing else happens.
    pub fn prepare_submit<T, V>(&mut self, validate: V) -> Option<T>
    where
        V: FnOnce(&FormValues) -> Result<T, ValidationErrors>,
    {
        match validate(&self.values) {
            Ok(valid) => {
                self.start_submission();
                Some(valid)
            }
            Err(errors) => {
                self.reject(errors);
                None
            }
        }
    }

    pub fn reject(&mut self, errors: ValidationErrors) {
        log::debug!("Form blocked by {} field error(s)", errors.len());
        self.errors = errors;
    }

    pub fn start_submission(&mut self) {
        self.errors = ValidationErrors::default();
        self.submit_error = None;
        self.submitting = true;
    }

    /// Record the submit handler's outcome; the form stays open on error
    pub fn finish_submit(&mut self, outcome: Result<(), String>) {
        self.submitting = false;
        self.submit_error = outcome.err();
    }

    pub fn dismiss_submit_error(&mut self) {
        self.submit_error = None;
    }

    /// Controls are disabled while either the caller or the form is busy
    pub fn is_busy(&self, external_loading: bool) -> bool {
        external_loading || self.submitting
    }

    pub fn submit_label(&self, external_loading: bool) -> &'static str {
        if self.is_busy(external_loading) {
            BUSY_SUBMIT_LABEL
        } else {
            SUBMIT_LABEL
        }
    }
}
