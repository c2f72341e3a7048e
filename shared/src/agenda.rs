//! View state of the agenda page: which week is shown, which modal is open
//! and what the form is pre-filled with.
//!
//! Appointment data itself stays in [`crate::appointments::AppointmentsState`];
//! this module only decides what to ask for and what to show.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::appointments::Operation;
use crate::datetime;
use crate::form::{self, AppointmentFormData, FormValues};
use crate::week::{self, DateRange, HourRange, WeekDay};
use crate::{
    ApiError, Appointment, AppointmentCreateRequest, AppointmentStatus, AppointmentUpdateRequest,
};

/// Colour family shared by status badges and toasts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    pub fn as_class(&self) -> &'static str {
        match self {
            Tone::Info => "info",
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Error => "error",
        }
    }
}

pub fn status_tone(status: AppointmentStatus) -> Tone {
    match status {
        AppointmentStatus::Scheduled => Tone::Info,
        AppointmentStatus::Completed => Tone::Success,
        AppointmentStatus::Cancelled => Tone::Error,
        AppointmentStatus::NoShow => Tone::Warning,
    }
}

/// A user-facing message produced by a finished operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(tone: Tone, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tone,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Toast for the outcome of an operation; successful reads stay silent
pub fn notice_for<T>(operation: Operation, outcome: &Result<T, ApiError>) -> Option<Notice> {
    let (done, verb, failed) = match operation {
        Operation::Create => ("Appointment created", "created", "Create failed"),
        Operation::Update => ("Appointment updated", "updated", "Update failed"),
        Operation::Delete => ("Appointment deleted", "deleted", "Delete failed"),
        Operation::FetchList { .. } | Operation::FetchOne => ("", "", "Connection error"),
    };
    match outcome {
        Ok(_) if done.is_empty() => None,
        Ok(_) => Some(Notice::new(
            Tone::Success,
            done,
            format!("The appointment was successfully {}", verb),
        )),
        Err(error) => {
            let title = match operation {
                Operation::FetchList { .. } => "Failed to load appointments",
                other => other.fallback_message(),
            };
            Some(Notice::new(Tone::Error, title, error.message_or(failed)))
        }
    }
}

/// Which form the modal shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal {
    #[default]
    Closed,
    Create {
        initial: FormValues,
    },
    Edit {
        id: i64,
        initial: FormValues,
    },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Modal::Edit { .. } => "Edit Appointment",
            _ => "New Appointment",
        }
    }

    pub fn initial_values(&self) -> Option<&FormValues> {
        match self {
            Modal::Closed => None,
            Modal::Create { initial } | Modal::Edit { initial, .. } => Some(initial),
        }
    }

    /// Turn a validated form into the remote call this modal stands for
    pub fn mutation(&self, data: AppointmentFormData) -> Option<Mutation> {
        match self {
            Modal::Closed => None,
            Modal::Create { .. } => Some(Mutation::Create(data.into_create_request())),
            Modal::Edit { id, .. } => Some(Mutation::Update(*id, data.into_update_request())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(AppointmentCreateRequest),
    Update(i64, AppointmentUpdateRequest),
}

impl Mutation {
    pub fn operation(&self) -> Operation {
        match self {
            Mutation::Create(_) => Operation::Create,
            Mutation::Update(..) => Operation::Update,
        }
    }
}

/// Form values for a click on an empty `day`@`hour` cell: one hour, scheduled
pub fn create_prefill(day: NaiveDate, hour: u32) -> FormValues {
    let start = day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN));
    let end = start + Duration::hours(1);
    FormValues::new()
        .with(form::TITLE, "")
        .with(form::START_TIME, datetime::to_input_value(&start))
        .with(form::END_TIME, datetime::to_input_value(&end))
        .with(form::STATUS, AppointmentStatus::Scheduled.as_str())
}

/// Form values for editing an existing appointment
pub fn edit_prefill(appointment: &Appointment) -> FormValues {
    let optional_id = |id: Option<i64>| id.map(|id| id.to_string()).unwrap_or_default();
    FormValues::new()
        .with(form::TITLE, appointment.title.clone())
        .with(form::START_TIME, datetime::to_input_value(&appointment.start_time))
        .with(form::END_TIME, datetime::to_input_value(&appointment.end_time))
        .with(form::STATUS, appointment.status.as_str())
        .with(form::LOCATION, appointment.location.clone().unwrap_or_default())
        .with(form::NOTES, appointment.notes.clone().unwrap_or_default())
        .with(form::CLIENT_ID, optional_id(appointment.client_id))
        .with(form::PROPERTY_ID, optional_id(appointment.property_id))
        .with(form::USER_ID, appointment.user_id.to_string())
}

/// Detail panel timestamp such as `Wed, Jun 5, 2024 10:30`
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    format!(
        "{}, {} {}, {} {:02}:{:02}",
        week::short_day_name(value.weekday()),
        week::short_month_name(value.month()),
        value.day(),
        value.year(),
        value.hour(),
        value.minute()
    )
}

/// Event chip time such as `10:30 - 11:30`
pub fn format_time_span(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    format!(
        "{:02}:{:02} - {:02}:{:02}",
        start.hour(),
        start.minute(),
        end.hour(),
        end.minute()
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaView {
    week_start: NaiveDate,
    today: NaiveDate,
    hours: HourRange,
    /// Bumped whenever the shown week must be (re)loaded
    reloads: u64,
    pub modal: Modal,
    pub detail_open: bool,
}

impl AgendaView {
    pub fn new(today: NaiveDate, hours: HourRange) -> Self {
        Self {
            week_start: week::monday_of(today),
            today,
            hours,
            reloads: 0,
            modal: Modal::Closed,
            detail_open: false,
        }
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn hours(&self) -> HourRange {
        self.hours
    }

    pub fn days(&self) -> [WeekDay; 7] {
        week::week_days(self.week_start, self.today)
    }

    pub fn range(&self) -> DateRange {
        DateRange::for_week(self.week_start)
    }

    pub fn header(&self) -> String {
        week::format_week_range(self.week_start)
    }

    pub fn previous_week(&mut self) -> DateRange {
        self.change_week(week::shift_weeks(self.week_start, -1))
    }

    pub fn next_week(&mut self) -> DateRange {
        self.change_week(week::shift_weeks(self.week_start, 1))
    }

    /// Jump back to the week containing `today`, which also refreshes the
    /// "is today" marker when the page has been open past midnight
    pub fn go_to_today(&mut self, today: NaiveDate) -> DateRange {
        self.today = today;
        self.change_week(week::monday_of(today))
    }

    fn change_week(&mut self, week_start: NaiveDate) -> DateRange {
        self.week_start = week::monday_of(week_start);
        log::debug!("Week changed to {}", self.week_start);
        self.request_reload()
    }

    /// Ask for the week on screen to be fetched again, e.g. after a mutation.
    /// Returns the range that reload will cover.
    pub fn request_reload(&mut self) -> DateRange {
        self.reloads += 1;
        self.range()
    }

    /// Changes exactly when a list fetch is due; the fetch always targets
    /// [`AgendaView::range`] at that moment
    pub fn reload_key(&self) -> (NaiveDate, u64) {
        (self.week_start, self.reloads)
    }

    /// "Add Appointment" without a slot: blank form, status scheduled
    pub fn add_appointment(&mut self) {
        self.modal = Modal::Create {
            initial: FormValues::new().with(form::STATUS, AppointmentStatus::Scheduled.as_str()),
        };
    }

    pub fn slot_clicked(&mut self, day: NaiveDate, hour: u32) {
        self.modal = Modal::Create {
            initial: create_prefill(day, hour),
        };
    }

    /// Open the detail panel for the appointment behind a clicked event;
    /// an id missing from the loaded week closes it instead
    pub fn event_clicked(&mut self, appointment: Option<&Appointment>) {
        self.detail_open = appointment.is_some();
    }

    pub fn edit(&mut self, appointment: &Appointment) {
        self.detail_open = false;
        self.modal = Modal::Edit {
            id: appointment.id,
            initial: edit_prefill(appointment),
        };
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }
}
