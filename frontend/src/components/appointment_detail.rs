use shared::agenda::{format_timestamp, status_tone};
use shared::datetime;
use shared::Appointment;
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AppointmentDetailProps {
    pub appointment: Appointment,
    #[prop_or_default]
    pub client_name: Option<String>,
    #[prop_or_default]
    pub property_title: Option<String>,
    pub loading: bool,
    pub on_edit: Callback<Appointment>,
    pub on_delete: Callback<i64>,
    pub on_close: Callback<()>,
}

fn audit_line(label: &str, stamp: &Option<String>, by: &Option<String>) -> Html {
    let Some(stamp) = stamp else {
        return html! {};
    };
    let when = datetime::parse_local(stamp)
        .map(|value| format_timestamp(&value))
        .unwrap_or_else(|| stamp.clone());
    let who = by.as_ref().map(|by| format!(" by {}", by)).unwrap_or_default();
    html! { <div>{format!("{}: {}{}", label, when, who)}</div> }
}

#[function_component(AppointmentDetail)]
pub fn appointment_detail(props: &AppointmentDetailProps) -> Html {
    let appointment = &props.appointment;

    let on_edit = {
        let on_edit = props.on_edit.clone();
        let appointment = appointment.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(appointment.clone()))
    };

    let on_delete = {
        let on_delete = props.on_delete.clone();
        let id = appointment.id;
        Callback::from(move |_: MouseEvent| on_delete.emit(id))
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <aside class="detail-view">
            <div class="detail-header">
                <h3>{"Appointment Details"}</h3>
                <button type="button" class="modal-close" aria-label="Close" onclick={on_close}>{"×"}</button>
            </div>

            <div class="detail-body">
                <div><strong>{"Title: "}</strong>{&appointment.title}</div>
                <div>
                    <strong>{"Status: "}</strong>
                    <span class={classes!("status-badge", status_tone(appointment.status).as_class())}>
                        {appointment.status.label()}
                    </span>
                </div>
                <div><strong>{"Start: "}</strong>{format_timestamp(&appointment.start_time)}</div>
                <div><strong>{"End: "}</strong>{format_timestamp(&appointment.end_time)}</div>

                if let Some(location) = &appointment.location {
                    <div><strong>{"Location: "}</strong>{location}</div>
                }
                if let Some(client) = &props.client_name {
                    <div><strong>{"Client: "}</strong>{client}</div>
                }
                if let Some(property) = &props.property_title {
                    <div><strong>{"Property: "}</strong>{property}</div>
                }
                if let Some(username) = &appointment.username {
                    <div><strong>{"Agent: "}</strong>{username}</div>
                }
                if let Some(notes) = &appointment.notes {
                    <div>
                        <strong>{"Notes:"}</strong>
                        <p class="detail-notes">{notes}</p>
                    </div>
                }

                <div class="detail-audit">
                    {audit_line("Created", &appointment.created_at, &appointment.created_by)}
                    {audit_line("Updated", &appointment.updated_at, &appointment.updated_by)}
                </div>
            </div>

            <div class="detail-actions">
                <button type="button" class="btn btn-primary btn-sm" onclick={on_edit}>{"Edit"}</button>
                <button
                    type="button"
                    class="btn btn-danger btn-sm"
                    disabled={props.loading}
                    onclick={on_delete}
                >
                    {"Delete"}
                </button>
            </div>
        </aside>
    }
}
