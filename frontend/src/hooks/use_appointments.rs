use std::ops::Deref;
use std::rc::Rc;

use shared::agenda::{notice_for, Notice};
use shared::appointments::{self, AppointmentsAction, AppointmentsState, Operation, RequestSequence};
use shared::week::DateRange;
use shared::{ApiError, Appointment, AppointmentCreateRequest, AppointmentUpdateRequest};
use yew::prelude::*;

use crate::services::api::ApiClient;

/// `AppointmentsState` as a Yew reducer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentsStore(AppointmentsState);

impl Deref for AppointmentsStore {
    type Target = AppointmentsState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Reducible for AppointmentsStore {
    type Action = AppointmentsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.0.apply(action);
        Rc::new(next)
    }
}

/// Async operations bound to one store instance
#[derive(Clone)]
pub struct UseAppointmentsActions {
    api_client: ApiClient,
    dispatcher: UseReducerDispatcher<AppointmentsStore>,
    sequence: Rc<RequestSequence>,
}

impl UseAppointmentsActions {
    fn dispatch(&self) -> impl Fn(AppointmentsAction) {
        let dispatcher = self.dispatcher.clone();
        move |action| dispatcher.dispatch(action)
    }

    /// Replace the list with the week in `range` and return the toast for a
    /// failed load. Outcomes of requests superseded by a newer list request
    /// stay silent.
    pub async fn load_week(&self, range: DateRange) -> Option<Notice> {
        let request_id = self.sequence.next();
        let outcome =
            appointments::fetch_by_date_range(&self.api_client, request_id, range, self.dispatch()).await;
        if !self.sequence.is_latest(request_id) {
            log::debug!("Dropping outcome of superseded request {}", request_id);
            return None;
        }
        notice_for(Operation::FetchList { request_id }, &outcome)
    }

    pub async fn create(&self, request: AppointmentCreateRequest) -> Result<Appointment, ApiError> {
        appointments::create(&self.api_client, request, self.dispatch()).await
    }

    pub async fn update(&self, id: i64, patch: AppointmentUpdateRequest) -> Result<Appointment, ApiError> {
        appointments::update(&self.api_client, id, patch, self.dispatch()).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        appointments::delete(&self.api_client, id, self.dispatch()).await
    }

    pub fn select(&self, appointment: Option<Appointment>) {
        self.dispatcher.dispatch(AppointmentsAction::SetSelected(appointment));
    }

    pub fn clear_error(&self) {
        self.dispatcher.dispatch(AppointmentsAction::ClearError);
    }
}

pub struct UseAppointmentsResult {
    pub state: UseReducerHandle<AppointmentsStore>,
    pub actions: UseAppointmentsActions,
}

#[hook]
pub fn use_appointments(api_client: &ApiClient) -> UseAppointmentsResult {
    let state = use_reducer(AppointmentsStore::default);
    let sequence = use_memo((), |_| RequestSequence::default());

    let actions = UseAppointmentsActions {
        api_client: api_client.clone(),
        dispatcher: state.dispatcher(),
        sequence,
    };

    UseAppointmentsResult { state, actions }
}
