//! Placement of appointments into the (day, hour) cells of the weekly grid.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::week::{HourRange, WeekDay};
use crate::{Appointment, AppointmentStatus, Client, Property};

/// Render-only projection of an [`Appointment`]
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub client_name: Option<String>,
    pub property_title: Option<String>,
}

impl CalendarEvent {
    /// Project an appointment, preferring the backend's denormalized labels
    /// and falling back to the locally loaded clients/properties
    pub fn from_appointment(
        appointment: &Appointment,
        clients: &[Client],
        properties: &[Property],
    ) -> Self {
        let client_name = appointment.client_name.clone().or_else(|| {
            appointment.client_id.and_then(|id| {
                clients
                    .iter()
                    .find(|client| client.id == id)
                    .map(|client| client.name.clone())
            })
        });
        let property_title = appointment.property_title.clone().or_else(|| {
            appointment.property_id.and_then(|id| {
                properties
                    .iter()
                    .find(|property| property.id == id)
                    .map(|property| property.title.clone())
            })
        });

        Self {
            id: appointment.id,
            title: appointment.title.clone(),
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            status: appointment.status,
            client_name,
            property_title,
        }
    }

    /// The single cell this event is drawn in (its start, hour truncated)
    pub fn slot(&self) -> Slot {
        Slot {
            day: self.start_time.date(),
            hour: self.start_time.hour(),
        }
    }
}

/// Project a whole list, keeping its order
pub fn project_events(
    appointments: &[Appointment],
    clients: &[Client],
    properties: &[Property],
) -> Vec<CalendarEvent> {
    appointments
        .iter()
        .map(|appointment| CalendarEvent::from_appointment(appointment, clients, properties))
        .collect()
}

/// A (calendar day, hour-of-day) cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub day: NaiveDate,
    pub hour: u32,
}

/// Events starting on `day` during `hour`, in list order
pub fn events_in_slot(events: &[CalendarEvent], day: NaiveDate, hour: u32) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|event| event.start_time.date() == day && event.start_time.hour() == hour)
        .collect()
}

/// Events of one visible week bucketed by cell.
///
/// An event that spans several hours only occupies the cell of its start.
/// Events that start outside the visible days or hours are kept aside in
/// [`SlotGrid::outside_window`] and are not drawn.
#[derive(Debug, Default)]
pub struct SlotGrid<'a> {
    cells: HashMap<Slot, Vec<&'a CalendarEvent>>,
    outside: Vec<&'a CalendarEvent>,
}

impl<'a> SlotGrid<'a> {
    pub fn build(events: &'a [CalendarEvent], days: &[WeekDay], hours: HourRange) -> Self {
        let mut grid = SlotGrid::default();
        for event in events {
            let slot = event.slot();
            let visible_day = days.iter().any(|day| day.date == slot.day);
            if visible_day && hours.contains(slot.hour) {
                grid.cells.entry(slot).or_default().push(event);
            } else {
                grid.outside.push(event);
            }
        }
        grid
    }

    pub fn events_at(&self, day: NaiveDate, hour: u32) -> &[&'a CalendarEvent] {
        self.cells
            .get(&Slot { day, hour })
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn outside_window(&self) -> &[&'a CalendarEvent] {
        &self.outside
    }

    pub fn placed_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}
