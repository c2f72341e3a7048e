//! Paths of the back-office REST API, relative to the configured base URL.

use crate::datetime;
use crate::week::DateRange;
use crate::AppointmentStatus;

/// Which appointment listing to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppointmentQuery {
    #[default]
    All,
    ByUser(i64),
    ByStatus(AppointmentStatus),
}

pub fn appointments(query: AppointmentQuery) -> String {
    match query {
        AppointmentQuery::All => "/appointments".to_string(),
        AppointmentQuery::ByUser(user_id) => format!("/appointments/user/{}", user_id),
        AppointmentQuery::ByStatus(status) => format!("/appointments/status/{}", status.as_str()),
    }
}

pub fn appointment(id: i64) -> String {
    format!("/appointments/{}", id)
}

pub fn appointments_in_range(range: &DateRange) -> String {
    format!(
        "/appointments/range?start={}&end={}",
        datetime::to_wire(&range.start),
        datetime::to_wire(&range.end)
    )
}

pub fn create_appointment() -> &'static str {
    "/appointments/create"
}

pub fn update_appointment(id: i64) -> String {
    format!("/appointments/{}/update", id)
}

pub fn delete_appointment(id: i64) -> String {
    format!("/appointments/{}/delete", id)
}

/// Page request for the directory listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 100 }
    }
}

pub fn clients(page: PageRequest) -> String {
    format!("/clients?sort=name,asc&page={}&size={}", page.page, page.size)
}

pub fn properties(page: PageRequest) -> String {
    format!("/properties?page={}&size={}", page.page, page.size)
}

pub fn login() -> &'static str {
    "/auth/login"
}

pub fn logout() -> &'static str {
    "/auth/logout"
}

pub fn current_user() -> &'static str {
    "/auth/me"
}

pub fn refresh_token() -> &'static str {
    "/auth/refresh"
}

/// Join the base URL and a path without doubling or dropping the slash
pub fn join(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_appointment_paths() {
        assert_eq!(appointments(AppointmentQuery::All), "/appointments");
        assert_eq!(appointments(AppointmentQuery::ByUser(4)), "/appointments/user/4");
        assert_eq!(
            appointments(AppointmentQuery::ByStatus(AppointmentStatus::NoShow)),
            "/appointments/status/NO_SHOW"
        );
        assert_eq!(update_appointment(12), "/appointments/12/update");
        assert_eq!(delete_appointment(12), "/appointments/12/delete");
    }

    #[test]
    fn test_range_path_uses_week_bounds() {
        let range = DateRange::for_week(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(
            appointments_in_range(&range),
            "/appointments/range?start=2024-06-03T00:00:00&end=2024-06-10T00:00:00"
        );
    }

    #[test]
    fn test_directory_paths() {
        assert_eq!(
            clients(PageRequest::default()),
            "/clients?sort=name,asc&page=0&size=100"
        );
        assert_eq!(properties(PageRequest { page: 2, size: 10 }), "/properties?page=2&size=10");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("http://localhost:8080/api/", "/appointments"), "http://localhost:8080/api/appointments");
        assert_eq!(join("http://localhost:8080/api", "auth/me"), "http://localhost:8080/api/auth/me");
        assert_eq!(join("http://x/api", "https://other/y"), "https://other/y");
    }
}
