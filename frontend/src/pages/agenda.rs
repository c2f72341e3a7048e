use std::rc::Rc;

use chrono::NaiveDate;
use shared::agenda::{notice_for, AgendaView, Mutation};
use shared::appointments::Operation;
use shared::auth::User;
use shared::form::AppointmentFormContext;
use shared::slots::project_events;
use shared::Appointment;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::appointment_detail::AppointmentDetail;
use crate::components::appointment_form::{AppointmentForm, SubmitRequest};
use crate::components::modal::Modal;
use crate::components::toast::ToastStack;
use crate::components::weekly_calendar::WeeklyCalendar;
use crate::hooks::use_appointments::use_appointments;
use crate::hooks::use_directory::use_directory;
use crate::hooks::use_toasts::use_toasts;
use crate::services::api::ApiClient;
use crate::services::config::AppConfig;
use crate::services::date_utils;

pub enum ViewAction {
    PreviousWeek,
    NextWeek,
    Today(NaiveDate),
    AddAppointment,
    SlotClicked(NaiveDate, u32),
    EventClicked(Option<Appointment>),
    Edit(Appointment),
    CloseModal,
    CloseDetail,
    /// Refetch whichever week is on screen when this is reduced
    Reload,
}

/// `AgendaView` as a Yew reducer
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaStore(AgendaView);

impl Reducible for AgendaStore {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut view = self.0.clone();
        match action {
            ViewAction::PreviousWeek => {
                view.previous_week();
            }
            ViewAction::NextWeek => {
                view.next_week();
            }
            ViewAction::Today(today) => {
                view.go_to_today(today);
            }
            ViewAction::AddAppointment => view.add_appointment(),
            ViewAction::SlotClicked(day, hour) => view.slot_clicked(day, hour),
            ViewAction::EventClicked(appointment) => view.event_clicked(appointment.as_ref()),
            ViewAction::Edit(appointment) => view.edit(&appointment),
            ViewAction::CloseModal => view.close_modal(),
            ViewAction::CloseDetail => view.close_detail(),
            ViewAction::Reload => {
                view.request_reload();
            }
        }
        Rc::new(AgendaStore(view))
    }
}

#[derive(Properties, PartialEq)]
pub struct AgendaPageProps {
    pub api_client: ApiClient,
    #[prop_or_default]
    pub user: Option<User>,
    /// Session problem worth showing, e.g. the profile failed to load
    #[prop_or_default]
    pub auth_error: Option<String>,
    pub on_logout: Callback<()>,
}

#[function_component(AgendaPage)]
pub fn agenda_page(props: &AgendaPageProps) -> Html {
    let config = use_context::<Rc<AppConfig>>().unwrap_or_default();
    let appointments = use_appointments(&props.api_client);
    let directory = use_directory(&props.api_client);
    let toasts = use_toasts(config.toast_timeout_ms);
    let view = {
        let hours = config.visible_hours;
        use_reducer(move || AgendaStore(AgendaView::new(date_utils::today(), hours)))
    };

    // Navigation, mutations and the first render all change the reload key
    {
        let actions = appointments.actions.clone();
        let push = toasts.push.clone();
        let range = view.0.range();
        use_effect_with(view.0.reload_key(), move |_| {
            spawn_local(async move {
                if let Some(notice) = actions.load_week(range).await {
                    push.emit(notice);
                }
            });
            || ()
        });
    }

    let form_context = AppointmentFormContext {
        clients: directory.client_options(),
        properties: directory.property_options(),
        user_id: props.user.as_ref().and_then(User::numeric_id),
    };

    let events = project_events(&appointments.state.appointments, &directory.clients, &directory.properties);

    let on_prev = {
        let dispatcher = view.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(ViewAction::PreviousWeek))
    };

    let on_next = {
        let dispatcher = view.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(ViewAction::NextWeek))
    };

    let on_close_modal = {
        let dispatcher = view.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(ViewAction::CloseModal))
    };

    let on_add = {
        let dispatcher = view.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(ViewAction::AddAppointment))
    };

    let on_today = {
        let dispatcher = view.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(ViewAction::Today(date_utils::today())))
    };

    let on_slot_click = {
        let dispatcher = view.dispatcher();
        Callback::from(move |(day, hour): (NaiveDate, u32)| {
            dispatcher.dispatch(ViewAction::SlotClicked(day, hour))
        })
    };

    let on_event_click = {
        let dispatcher = view.dispatcher();
        let state = appointments.state.clone();
        let actions = appointments.actions.clone();
        Callback::from(move |id: i64| {
            let picked = state.find(id).cloned();
            actions.select(picked.clone());
            dispatcher.dispatch(ViewAction::EventClicked(picked));
        })
    };

    let on_close_detail = {
        let dispatcher = view.dispatcher();
        let actions = appointments.actions.clone();
        Callback::from(move |_: ()| {
            actions.select(None);
            dispatcher.dispatch(ViewAction::CloseDetail);
        })
    };

    let on_edit = {
        let dispatcher = view.dispatcher();
        Callback::from(move |appointment: Appointment| dispatcher.dispatch(ViewAction::Edit(appointment)))
    };

    let on_delete = {
        let dispatcher = view.dispatcher();
        let actions = appointments.actions.clone();
        let push = toasts.push.clone();
        Callback::from(move |id: i64| {
            let dispatcher = dispatcher.clone();
            let actions = actions.clone();
            let push = push.clone();
            spawn_local(async move {
                let outcome = actions.delete(id).await;
                if let Some(notice) = notice_for(Operation::Delete, &outcome) {
                    push.emit(notice);
                }
                if outcome.is_ok() {
                    dispatcher.dispatch(ViewAction::CloseDetail);
                    dispatcher.dispatch(ViewAction::Reload);
                }
            });
        })
    };

    let on_submit = {
        let dispatcher = view.dispatcher();
        let modal = view.0.modal.clone();
        let actions = appointments.actions.clone();
        let push = toasts.push.clone();
        Callback::from(move |(data, done): SubmitRequest| {
            let Some(mutation) = modal.mutation(data) else {
                done.emit(Err("No appointment form is open".to_string()));
                return;
            };
            let dispatcher = dispatcher.clone();
            let actions = actions.clone();
            let push = push.clone();
            spawn_local(async move {
                let operation = mutation.operation();
                let outcome = match mutation {
                    Mutation::Create(request) => actions.create(request).await.map(|_| ()),
                    Mutation::Update(id, patch) => actions.update(id, patch).await.map(|_| ()),
                };
                if let Some(notice) = notice_for(operation, &outcome) {
                    push.emit(notice);
                }
                match outcome {
                    Ok(()) => {
                        done.emit(Ok(()));
                        dispatcher.dispatch(ViewAction::CloseModal);
                        dispatcher.dispatch(ViewAction::Reload);
                    }
                    Err(error) => done.emit(Err(error.message_or(operation.fallback_message()))),
                }
            });
        })
    };

    let on_clear_error = {
        let actions = appointments.actions.clone();
        Callback::from(move |_: MouseEvent| actions.clear_error())
    };

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    let agenda = &view.0;
    let state = &appointments.state;
    let selected = state.selected.clone().filter(|_| agenda.detail_open);

    // Labels the backend did not send are joined from the directory
    let detail = selected.map(|appointment| {
        let client_name = appointment.client_name.clone().or_else(|| {
            appointment
                .client_id
                .and_then(|id| directory.clients.iter().find(|client| client.id == id))
                .map(|client| client.name.clone())
        });
        let property_title = appointment.property_title.clone().or_else(|| {
            appointment
                .property_id
                .and_then(|id| directory.properties.iter().find(|property| property.id == id))
                .map(|property| property.title.clone())
        });
        (appointment, client_name, property_title)
    });

    let user_label = props.user.as_ref().map(|user| {
        if user.name.is_empty() {
            user.email.clone()
        } else {
            user.name.clone()
        }
    });

    html! {
        <div class="agenda-page">
            <header class="agenda-header">
                <h1>{"Agenda"}</h1>
                <div class="agenda-header-actions">
                    if let Some(label) = user_label {
                        <span class="agenda-user">{label}</span>
                    }
                    <button type="button" class="btn btn-primary" onclick={on_add}>
                        {"Add Appointment"}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_logout}>
                        {"Log out"}
                    </button>
                </div>
            </header>

            if let Some(error) = &props.auth_error {
                <div class="form-message error" role="alert">
                    <span>{error}</span>
                </div>
            }

            if let Some(error) = &state.error {
                <div class="form-message error" role="alert">
                    <span>{error}</span>
                    <button type="button" class="form-message-dismiss" aria-label="Dismiss" onclick={on_clear_error}>
                        {"×"}
                    </button>
                </div>
            }

            <div class="agenda-body">
                <WeeklyCalendar
                    days={agenda.days().to_vec()}
                    hours={agenda.hours()}
                    {events}
                    header={agenda.header()}
                    loading={state.loading}
                    selected_id={state.selected_id()}
                    {on_prev}
                    {on_next}
                    {on_today}
                    {on_slot_click}
                    {on_event_click}
                />

                if let Some((appointment, client_name, property_title)) = detail {
                    <AppointmentDetail
                        {appointment}
                        {client_name}
                        {property_title}
                        loading={state.loading}
                        {on_edit}
                        {on_delete}
                        on_close={on_close_detail}
                    />
                }
            </div>

            <Modal is_open={agenda.modal.is_open()} title={agenda.modal.title()} on_close={on_close_modal.clone()}>
                if let Some(initial) = agenda.modal.initial_values() {
                    <AppointmentForm
                        initial={initial.clone()}
                        context={form_context}
                        loading={state.loading}
                        {on_submit}
                        on_cancel={on_close_modal}
                    />
                }
            </Modal>

            <ToastStack toasts={toasts.toasts.clone()} on_dismiss={toasts.dismiss.clone()} />
        </div>
    }
}
