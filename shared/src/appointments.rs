//! Appointment store slice.
//!
//! State lives in [`AppointmentsState`] and only changes through
//! [`AppointmentsState::apply`]. The async operations at the bottom of the
//! file drive one remote call each and report it as pending, then
//! fulfilled or rejected, through a caller-supplied `dispatch`.
//!
//! List fetches carry a request id. A list response older than the latest
//! list request is dropped, so a slow answer for a week the user already
//! navigated away from cannot overwrite the week on screen.

use std::cell::Cell;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::endpoints::AppointmentQuery;
use crate::week::DateRange;
use crate::{
    ApiError, Appointment, AppointmentCreateRequest, AppointmentStatus, AppointmentUpdateRequest,
};

/// Remote operations the slice needs
#[async_trait(?Send)]
pub trait AppointmentGateway {
    async fn list_appointments(&self, query: AppointmentQuery) -> Result<Vec<Appointment>, ApiError>;

    async fn appointments_in_range(&self, range: DateRange) -> Result<Vec<Appointment>, ApiError>;

    async fn get_appointment(&self, id: i64) -> Result<Appointment, ApiError>;

    async fn create_appointment(
        &self,
        request: &AppointmentCreateRequest,
    ) -> Result<Appointment, ApiError>;

    async fn update_appointment(
        &self,
        id: i64,
        request: &AppointmentUpdateRequest,
    ) -> Result<Appointment, ApiError>;

    async fn delete_appointment(&self, id: i64) -> Result<(), ApiError>;
}

/// Monotonic ids for list requests
#[derive(Debug, Default)]
pub struct RequestSequence {
    last: Cell<u64>,
}

impl RequestSequence {
    pub fn next(&self) -> u64 {
        let id = self.last.get() + 1;
        self.last.set(id);
        id
    }

    /// Whether no list request was issued after `id`
    pub fn is_latest(&self, id: u64) -> bool {
        id == self.last.get()
    }
}

/// The remote operation an action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchList { request_id: u64 },
    FetchOne,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Error text used when the server gave nothing better
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Operation::FetchList { .. } => "Failed to fetch appointments",
            Operation::FetchOne => "Failed to fetch appointment",
            Operation::Create => "Failed to create appointment",
            Operation::Update => "Failed to update appointment",
            Operation::Delete => "Failed to delete appointment",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentFilters {
    pub user_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentsAction {
    Pending(Operation),
    ListFulfilled {
        request_id: u64,
        appointments: Vec<Appointment>,
    },
    FetchOneFulfilled(Appointment),
    CreateFulfilled(Appointment),
    UpdateFulfilled(Appointment),
    DeleteFulfilled(i64),
    Rejected {
        operation: Operation,
        message: String,
    },
    SetSelected(Option<Appointment>),
    ClearError,
    SetFilters(AppointmentFilters),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentsState {
    pub appointments: Vec<Appointment>,
    /// At most one appointment drives the detail panel
    pub selected: Option<Appointment>,
    /// Shared by every operation of the slice
    pub loading: bool,
    pub error: Option<String>,
    pub filters: AppointmentFilters,
    latest_list_request: u64,
}

impl AppointmentsState {
    pub fn apply(&mut self, action: AppointmentsAction) {
        match action {
            AppointmentsAction::Pending(operation) => {
                if let Operation::FetchList { request_id } = operation {
                    self.latest_list_request = self.latest_list_request.max(request_id);
                }
                self.loading = true;
                self.error = None;
            }
            AppointmentsAction::ListFulfilled {
                request_id,
                appointments,
            } => {
                if self.is_stale(request_id) {
                    log::debug!("Dropping stale appointment list #{}", request_id);
                    return;
                }
                self.loading = false;
                self.appointments = appointments;
            }
            AppointmentsAction::FetchOneFulfilled(appointment) => {
                self.loading = false;
                self.selected = Some(appointment);
            }
            AppointmentsAction::CreateFulfilled(appointment) => {
                self.loading = false;
                self.appointments.push(appointment);
            }
            AppointmentsAction::UpdateFulfilled(appointment) => {
                self.loading = false;
                if let Some(existing) = self
                    .appointments
                    .iter_mut()
                    .find(|existing| existing.id == appointment.id)
                {
                    *existing = appointment.clone();
                }
                if self.selected_id() == Some(appointment.id) {
                    self.selected = Some(appointment);
                }
            }
            AppointmentsAction::DeleteFulfilled(id) => {
                self.loading = false;
                self.appointments.retain(|appointment| appointment.id != id);
                if self.selected_id() == Some(id) {
                    self.selected = None;
                }
            }
            AppointmentsAction::Rejected { operation, message } => {
                if let Operation::FetchList { request_id } = operation {
                    if self.is_stale(request_id) {
                        log::debug!("Dropping stale failure of appointment list #{}", request_id);
                        return;
                    }
                }
                self.loading = false;
                self.error = Some(message);
            }
            AppointmentsAction::SetSelected(selected) => self.selected = selected,
            AppointmentsAction::ClearError => self.error = None,
            AppointmentsAction::SetFilters(filters) => self.filters = filters,
        }
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected.as_ref().map(|appointment| appointment.id)
    }

    pub fn find(&self, id: i64) -> Option<&Appointment> {
        self.appointments.iter().find(|appointment| appointment.id == id)
    }

    fn is_stale(&self, request_id: u64) -> bool {
        request_id < self.latest_list_request
    }
}

fn reject<D>(dispatch: &D, operation: Operation, error: &ApiError)
where
    D: Fn(AppointmentsAction),
{
    let message = error.message_or(operation.fallback_message());
    log::warn!("⚠️ {:?} failed: {}", operation, error);
    dispatch(AppointmentsAction::Rejected { operation, message });
}

async fn run_list<D, F>(request_id: u64, dispatch: &D, call: F) -> Result<Vec<Appointment>, ApiError>
where
    D: Fn(AppointmentsAction),
    F: std::future::Future<Output = Result<Vec<Appointment>, ApiError>>,
{
    let operation = Operation::FetchList { request_id };
    dispatch(AppointmentsAction::Pending(operation));
    match call.await {
        Ok(appointments) => {
            log::info!("📅 Loaded {} appointments (request #{})", appointments.len(), request_id);
            dispatch(AppointmentsAction::ListFulfilled {
                request_id,
                appointments: appointments.clone(),
            });
            Ok(appointments)
        }
        Err(error) => {
            reject(dispatch, operation, &error);
            Err(error)
        }
    }
}

/// Replace the list with every appointment starting inside `range`
pub async fn fetch_by_date_range<G, D>(
    gateway: &G,
    request_id: u64,
    range: DateRange,
    dispatch: D,
) -> Result<Vec<Appointment>, ApiError>
where
    G: AppointmentGateway + ?Sized,
    D: Fn(AppointmentsAction),
{
    log::debug!("📅 Fetching appointments {} .. {}", range.start, range.end);
    run_list(request_id, &dispatch, gateway.appointments_in_range(range)).await
}

/// Replace the list with all appointments, or those of one user or status
pub async fn fetch_appointments<G, D>(
    gateway: &G,
    request_id: u64,
    query: AppointmentQuery,
    dispatch: D,
) -> Result<Vec<Appointment>, ApiError>
where
    G: AppointmentGateway + ?Sized,
    D: Fn(AppointmentsAction),
{
    run_list(request_id, &dispatch, gateway.list_appointments(query)).await
}

/// Load one appointment into the selection
pub async fn fetch_by_id<G, D>(gateway: &G, id: i64, dispatch: D) -> Result<Appointment, ApiError>
where
    G: AppointmentGateway + ?Sized,
    D: Fn(AppointmentsAction),
{
    dispatch(AppointmentsAction::Pending(Operation::FetchOne));
    match gateway.get_appointment(id).await {
        Ok(appointment) => {
            dispatch(AppointmentsAction::FetchOneFulfilled(appointment.clone()));
            Ok(appointment)
        }
        Err(error) => {
            reject(&dispatch, Operation::FetchOne, &error);
            Err(error)
        }
    }
}

pub async fn create<G, D>(
    gateway: &G,
    request: AppointmentCreateRequest,
    dispatch: D,
) -> Result<Appointment, ApiError>
where
    G: AppointmentGateway + ?Sized,
    D: Fn(AppointmentsAction),
{
    dispatch(AppointmentsAction::Pending(Operation::Create));
    match gateway.create_appointment(&request).await {
        Ok(appointment) => {
            log::info!("✅ Created appointment {}", appointment.id);
            dispatch(AppointmentsAction::CreateFulfilled(appointment.clone()));
            Ok(appointment)
        }
        Err(error) => {
            reject(&dispatch, Operation::Create, &error);
            Err(error)
        }
    }
}

pub async fn update<G, D>(
    gateway: &G,
    id: i64,
    patch: AppointmentUpdateRequest,
    dispatch: D,
) -> Result<Appointment, ApiError>
where
    G: AppointmentGateway + ?Sized,
    D: Fn(AppointmentsAction),
{
    dispatch(AppointmentsAction::Pending(Operation::Update));
    match gateway.update_appointment(id, &patch).await {
        Ok(appointment) => {
            log::info!("✅ Updated appointment {}", appointment.id);
            dispatch(AppointmentsAction::UpdateFulfilled(appointment.clone()));
            Ok(appointment)
        }
        Err(error) => {
            reject(&dispatch, Operation::Update, &error);
            Err(error)
        }
    }
}

pub async fn delete<G, D>(gateway: &G, id: i64, dispatch: D) -> Result<(), ApiError>
where
    G: AppointmentGateway + ?Sized,
    D: Fn(AppointmentsAction),
{
    dispatch(AppointmentsAction::Pending(Operation::Delete));
    match gateway.delete_appointment(id).await {
        Ok(()) => {
            log::info!("🗑️ Deleted appointment {}", id);
            dispatch(AppointmentsAction::DeleteFulfilled(id));
            Ok(())
        }
        Err(error) => {
            reject(&dispatch, Operation::Delete, &error);
            Err(error)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    pub(crate) fn sample(id: i64, title: &str) -> Appointment {
        let start = NaiveDate::from_ymd_opt(2024, 6, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        Appointment {
            id,
            title: title.to_string(),
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            status: AppointmentStatus::Scheduled,
            location: None,
            notes: None,
            user_id: 1,
            username: None,
            client_id: None,
            client_name: None,
            property_id: None,
            property_title: None,
            created_by: None,
            updated_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Answers calls from a queue of canned results and records every call
    #[derive(Default)]
    struct MockGateway {
        lists: RefCell<VecDeque<Result<Vec<Appointment>, ApiError>>>,
        singles: RefCell<VecDeque<Result<Appointment, ApiError>>>,
        deletes: RefCell<VecDeque<Result<(), ApiError>>>,
        calls: RefCell<Vec<String>>,
    }

    impl MockGateway {
        fn list(self, result: Result<Vec<Appointment>, ApiError>) -> Self {
            self.lists.borrow_mut().push_back(result);
            self
        }

        fn single(self, result: Result<Appointment, ApiError>) -> Self {
            self.singles.borrow_mut().push_back(result);
            self
        }

        fn deletion(self, result: Result<(), ApiError>) -> Self {
            self.deletes.borrow_mut().push_back(result);
            self
        }

        fn next_list(&self) -> Result<Vec<Appointment>, ApiError> {
            self.lists
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(ApiError::Network("no canned list".into())))
        }

        fn next_single(&self) -> Result<Appointment, ApiError> {
            self.singles
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(ApiError::Network("no canned appointment".into())))
        }
    }

    #[async_trait(?Send)]
    impl AppointmentGateway for MockGateway {
        async fn list_appointments(&self, query: AppointmentQuery) -> Result<Vec<Appointment>, ApiError> {
            self.calls.borrow_mut().push(format!("list {:?}", query));
            self.next_list()
        }

        async fn appointments_in_range(&self, range: DateRange) -> Result<Vec<Appointment>, ApiError> {
            self.calls.borrow_mut().push(format!("range {}", range.start));
            self.next_list()
        }

        async fn get_appointment(&self, id: i64) -> Result<Appointment, ApiError> {
            self.calls.borrow_mut().push(format!("get {}", id));
            self.next_single()
        }

        async fn create_appointment(
            &self,
            request: &AppointmentCreateRequest,
        ) -> Result<Appointment, ApiError> {
            self.calls.borrow_mut().push(format!("create {}", request.title));
            self.next_single()
        }

        async fn update_appointment(
            &self,
            id: i64,
            _request: &AppointmentUpdateRequest,
        ) -> Result<Appointment, ApiError> {
            self.calls.borrow_mut().push(format!("update {}", id));
            self.next_single()
        }

        async fn delete_appointment(&self, id: i64) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(format!("delete {}", id));
            self.deletes
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(ApiError::Network("no canned delete".into())))
        }
    }

    fn week() -> DateRange {
        DateRange::for_week(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
    }

    fn create_request(title: &str) -> AppointmentCreateRequest {
        let appointment = sample(0, title);
        AppointmentCreateRequest {
            title: title.to_string(),
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            location: None,
            notes: None,
            status: AppointmentStatus::Scheduled,
            user_id: 1,
            client_id: None,
            property_id: None,
        }
    }

    #[tokio::test]
    async fn test_range_fetch_replaces_list_and_records_transitions() {
        let gateway = MockGateway::default().list(Ok(vec![sample(1, "A"), sample(2, "B")]));
        let state = RefCell::new(AppointmentsState {
            appointments: vec![sample(9, "old")],
            ..Default::default()
        });
        let seen = RefCell::new(Vec::new());

        let result = fetch_by_date_range(&gateway, 1, week(), |action| {
            seen.borrow_mut().push(state.borrow().loading);
            state.borrow_mut().apply(action);
            seen.borrow_mut().push(state.borrow().loading);
        })
        .await;

        assert_eq!(result.unwrap().len(), 2);
        let state = state.into_inner();
        let ids: Vec<i64> = state.appointments.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(!state.loading);
        assert_eq!(state.error, None);
        // idle -> loading -> idle
        assert_eq!(seen.into_inner(), vec![false, true, true, false]);
        assert_eq!(gateway.calls.into_inner(), vec!["range 2024-06-03 00:00:00".to_string()]);
    }

    #[tokio::test]
    async fn test_range_fetch_failure_keeps_previous_list() {
        let gateway = MockGateway::default()
            .list(Err(ApiError::Http { status: 500, message: String::new() }));
        let state = RefCell::new(AppointmentsState {
            appointments: vec![sample(9, "kept")],
            ..Default::default()
        });

        let result = fetch_by_date_range(&gateway, 1, week(), |a| state.borrow_mut().apply(a)).await;

        assert!(result.is_err());
        let state = state.into_inner();
        assert_eq!(state.appointments, vec![sample(9, "kept")]);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch appointments"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_range_fetch_is_idempotent_against_stable_backend() {
        let list = vec![sample(1, "A"), sample(2, "B")];
        let gateway = MockGateway::default().list(Ok(list.clone())).list(Ok(list));
        let sequence = RequestSequence::default();
        let state = RefCell::new(AppointmentsState::default());

        fetch_by_date_range(&gateway, sequence.next(), week(), |a| state.borrow_mut().apply(a))
            .await
            .unwrap();
        let first = state.borrow().appointments.clone();
        fetch_by_date_range(&gateway, sequence.next(), week(), |a| state.borrow_mut().apply(a))
            .await
            .unwrap();

        assert_eq!(state.borrow().appointments, first);
    }

    #[test]
    fn test_stale_list_response_is_discarded() {
        let mut state = AppointmentsState::default();
        state.apply(AppointmentsAction::Pending(Operation::FetchList { request_id: 1 }));
        state.apply(AppointmentsAction::Pending(Operation::FetchList { request_id: 2 }));
        state.apply(AppointmentsAction::ListFulfilled {
            request_id: 2,
            appointments: vec![sample(20, "current week")],
        });
        state.apply(AppointmentsAction::ListFulfilled {
            request_id: 1,
            appointments: vec![sample(10, "previous week")],
        });
        state.apply(AppointmentsAction::Rejected {
            operation: Operation::FetchList { request_id: 1 },
            message: "late failure".to_string(),
        });

        assert_eq!(state.appointments, vec![sample(20, "current week")]);
        assert_eq!(state.error, None);
        assert!(!state.loading);
    }

    #[test]
    fn test_request_sequence_is_monotonic() {
        let sequence = RequestSequence::default();
        let ids: Vec<u64> = (0..3).map(|_| sequence.next()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(sequence.is_latest(3));
        assert!(!sequence.is_latest(2));
    }

    #[tokio::test]
    async fn test_fetch_appointments_by_status() {
        let gateway = MockGateway::default().list(Ok(vec![sample(4, "done")]));
        let state = RefCell::new(AppointmentsState::default());

        fetch_appointments(
            &gateway,
            1,
            AppointmentQuery::ByStatus(AppointmentStatus::Completed),
            |a| state.borrow_mut().apply(a),
        )
        .await
        .unwrap();

        assert_eq!(state.borrow().appointments.len(), 1);
        assert_eq!(gateway.calls.into_inner(), vec!["list ByStatus(Completed)".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_by_id_selects() {
        let gateway = MockGateway::default().single(Ok(sample(5, "one")));
        let state = RefCell::new(AppointmentsState::default());

        fetch_by_id(&gateway, 5, |a| state.borrow_mut().apply(a)).await.unwrap();

        assert_eq!(state.borrow().selected_id(), Some(5));
        assert!(state.borrow().appointments.is_empty());
    }

    #[tokio::test]
    async fn test_create_appends_and_failure_leaves_list() {
        let gateway = MockGateway::default()
            .single(Ok(sample(3, "new")))
            .single(Err(ApiError::Rejected("Start time must be in the future".into())));
        let state = RefCell::new(AppointmentsState {
            appointments: vec![sample(1, "A")],
            ..Default::default()
        });

        create(&gateway, create_request("new"), |a| state.borrow_mut().apply(a))
            .await
            .unwrap();
        assert_eq!(state.borrow().appointments.len(), 2);
        assert_eq!(state.borrow().appointments[1].id, 3);

        let error = create(&gateway, create_request("again"), |a| state.borrow_mut().apply(a))
            .await
            .unwrap_err();
        assert_eq!(error.message_or("Create failed"), "Start time must be in the future");
        assert_eq!(state.borrow().appointments.len(), 2);
        assert_eq!(
            state.borrow().error.as_deref(),
            Some("Start time must be in the future")
        );
    }

    #[tokio::test]
    async fn test_update_replaces_entry_and_refreshes_selection() {
        let mut renamed = sample(2, "Renamed");
        renamed.status = AppointmentStatus::Completed;
        let gateway = MockGateway::default().single(Ok(renamed.clone()));
        let state = RefCell::new(AppointmentsState {
            appointments: vec![sample(1, "A"), sample(2, "B")],
            selected: Some(sample(2, "B")),
            ..Default::default()
        });

        update(
            &gateway,
            2,
            AppointmentUpdateRequest {
                title: Some("Renamed".into()),
                ..Default::default()
            },
            |a| state.borrow_mut().apply(a),
        )
        .await
        .unwrap();

        let state = state.into_inner();
        assert_eq!(state.appointments[1], renamed);
        assert_eq!(state.appointments[0], sample(1, "A"));
        assert_eq!(state.selected, Some(renamed));
    }

    #[tokio::test]
    async fn test_update_rejected_leaves_entry_untouched() {
        let gateway = MockGateway::default().single(Err(ApiError::Http {
            status: 409,
            message: "Appointment overlaps another one".into(),
        }));
        let state = RefCell::new(AppointmentsState {
            appointments: vec![sample(2, "B")],
            ..Default::default()
        });

        let error = update(&gateway, 2, AppointmentUpdateRequest::default(), |a| {
            state.borrow_mut().apply(a)
        })
        .await
        .unwrap_err();

        assert_eq!(error.message_or("Update failed"), "Appointment overlaps another one");
        let state = state.into_inner();
        assert_eq!(state.appointments, vec![sample(2, "B")]);
        assert_eq!(state.error.as_deref(), Some("Appointment overlaps another one"));
    }

    #[tokio::test]
    async fn test_update_rejected_without_message_uses_fallback() {
        let gateway = MockGateway::default().single(Err(ApiError::MissingData));
        let state = RefCell::new(AppointmentsState::default());

        let error = update(&gateway, 2, AppointmentUpdateRequest::default(), |a| {
            state.borrow_mut().apply(a)
        })
        .await
        .unwrap_err();

        assert_eq!(error.message_or("Update failed"), "Update failed");
        assert_eq!(state.borrow().error.as_deref(), Some("Failed to update appointment"));
    }

    #[tokio::test]
    async fn test_delete_selected_clears_selection() {
        let gateway = MockGateway::default().deletion(Ok(()));
        let state = RefCell::new(AppointmentsState {
            appointments: vec![sample(1, "A"), sample(2, "B")],
            selected: Some(sample(2, "B")),
            ..Default::default()
        });

        delete(&gateway, 2, |a| state.borrow_mut().apply(a)).await.unwrap();

        let state = state.into_inner();
        assert!(state.find(2).is_none());
        assert_eq!(state.appointments.len(), 1);
        assert_eq!(state.selected, None);
    }

    #[tokio::test]
    async fn test_delete_other_keeps_selection_and_failure_keeps_list() {
        let gateway = MockGateway::default()
            .deletion(Ok(()))
            .deletion(Err(ApiError::Network("offline".into())));
        let state = RefCell::new(AppointmentsState {
            appointments: vec![sample(1, "A"), sample(2, "B")],
            selected: Some(sample(2, "B")),
            ..Default::default()
        });

        delete(&gateway, 1, |a| state.borrow_mut().apply(a)).await.unwrap();
        assert_eq!(state.borrow().selected_id(), Some(2));

        assert!(delete(&gateway, 2, |a| state.borrow_mut().apply(a)).await.is_err());
        assert_eq!(state.borrow().appointments.len(), 1);
        assert_eq!(state.borrow().error.as_deref(), Some("offline"));
    }

    #[test]
    fn test_plain_reducers() {
        let mut state = AppointmentsState::default();
        state.apply(AppointmentsAction::SetSelected(Some(sample(1, "A"))));
        assert_eq!(state.selected_id(), Some(1));
        state.apply(AppointmentsAction::SetSelected(None));
        assert_eq!(state.selected_id(), None);

        state.error = Some("boom".into());
        state.apply(AppointmentsAction::ClearError);
        assert_eq!(state.error, None);

        let filters = AppointmentFilters {
            status: Some(AppointmentStatus::Cancelled),
            ..Default::default()
        };
        state.apply(AppointmentsAction::SetFilters(filters.clone()));
        assert_eq!(state.filters, filters);
    }

    #[test]
    fn test_single_loading_flag_is_shared() {
        let mut state = AppointmentsState::default();
        state.apply(AppointmentsAction::Pending(Operation::Create));
        state.apply(AppointmentsAction::Pending(Operation::FetchList { request_id: 1 }));
        state.apply(AppointmentsAction::CreateFulfilled(sample(1, "A")));
        // the create finishing clears the one flag even though the fetch is in flight
        assert!(!state.loading);
    }
}
