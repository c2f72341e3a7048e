use chrono::NaiveDate;
use shared::agenda::{format_time_span, status_tone};
use shared::slots::{CalendarEvent, SlotGrid};
use shared::week::{hour_label, HourRange, WeekDay};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WeeklyCalendarProps {
    pub days: Vec<WeekDay>,
    pub hours: HourRange,
    pub events: Vec<CalendarEvent>,
    pub header: AttrValue,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub selected_id: Option<i64>,
    pub on_prev: Callback<()>,
    pub on_next: Callback<()>,
    pub on_today: Callback<()>,
    pub on_slot_click: Callback<(NaiveDate, u32)>,
    pub on_event_click: Callback<i64>,
}

fn event_chip(event: &CalendarEvent, selected: bool, on_event_click: &Callback<i64>) -> Html {
    let id = event.id;
    let onclick = {
        let on_event_click = on_event_click.clone();
        // Keep the click from reaching the slot underneath
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_event_click.emit(id);
        })
    };
    let span = format_time_span(&event.start_time, &event.end_time);

    html! {
        <div
            key={id}
            class={classes!(
                "event-chip",
                status_tone(event.status).as_class(),
                selected.then_some("selected")
            )}
            title={format!("{} ({})", event.title, span)}
            {onclick}
        >
            <div class="event-title">{&event.title}</div>
            <div class="event-time">{span}</div>
            if let Some(client) = &event.client_name {
                <div class="event-meta">{format!("👤 {}", client)}</div>
            }
            if let Some(property) = &event.property_title {
                <div class="event-meta">{format!("🏠 {}", property)}</div>
            }
        </div>
    }
}

#[function_component(WeeklyCalendar)]
pub fn weekly_calendar(props: &WeeklyCalendarProps) -> Html {
    let grid = SlotGrid::build(&props.events, &props.days, props.hours);

    let nav = |callback: &Callback<()>| {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };

    let columns = props.days.iter().map(|day| {
        let slots = props.hours.into_iter().map(|hour| {
            let onclick = {
                let on_slot_click = props.on_slot_click.clone();
                let date = day.date;
                Callback::from(move |_: MouseEvent| on_slot_click.emit((date, hour)))
            };

            html! {
                <div key={hour} class="time-slot" {onclick}>
                    <span class="slot-label">{hour_label(hour)}</span>
                    <div class="slot-events">
                        {for grid.events_at(day.date, hour).iter().map(|event| {
                            event_chip(event, props.selected_id == Some(event.id), &props.on_event_click)
                        })}
                    </div>
                </div>
            }
        });

        html! {
            <div key={day.date.to_string()} class="day-column">
                <div class={classes!(
                    "day-header",
                    day.is_today.then_some("today"),
                    (!day.is_current_month).then_some("other-month")
                )}>
                    <div class="day-name">{day.day_name}</div>
                    <div class="day-number">{day.day_number}</div>
                </div>
                <div class="day-timeline">
                    {for slots}
                </div>
            </div>
        }
    });

    let hidden = grid.outside_window().len();

    html! {
        <div class="weekly-calendar">
            <div class="calendar-toolbar">
                <div class="calendar-nav">
                    <button type="button" class="btn btn-secondary btn-sm" aria-label="Previous week" onclick={nav(&props.on_prev)}>
                        {"‹"}
                    </button>
                    <button type="button" class="btn btn-secondary btn-sm" onclick={nav(&props.on_today)}>
                        {"Today"}
                    </button>
                    <button type="button" class="btn btn-secondary btn-sm" aria-label="Next week" onclick={nav(&props.on_next)}>
                        {"›"}
                    </button>
                </div>
                <h2 class="calendar-range">{props.header.clone()}</h2>
                if props.loading {
                    <span class="calendar-loading">{"Loading..."}</span>
                }
            </div>

            <div class="calendar-grid">
                {for columns}
            </div>

            if hidden > 0 {
                <div class="calendar-footnote">
                    {format!("{} appointment(s) outside the visible hours", hidden)}
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use shared::week::week_days;
    use shared::AppointmentStatus;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_grid_places_event_in_visible_slot() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let days = week_days(monday, monday).to_vec();
        let start = monday
            .checked_add_days(Days::new(2))
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let events = vec![CalendarEvent {
            id: 1,
            title: "Viewing".to_string(),
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            status: AppointmentStatus::Scheduled,
            client_name: None,
            property_title: None,
        }];

        let grid = SlotGrid::build(&events, &days, HourRange::default());
        assert_eq!(grid.events_at(days[2].date, 10).len(), 1);
        assert_eq!(format_time_span(&events[0].start_time, &events[0].end_time), "10:30 - 11:30");
    }
}
