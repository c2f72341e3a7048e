use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

pub mod agenda;
pub mod appointments;
pub mod auth;
pub mod datetime;
pub mod directory;
pub mod endpoints;
pub mod error;
pub mod form;
pub mod slots;
pub mod week;

pub use error::ApiError;

/// Lifecycle status of an appointment, serialized the way the backend enum is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Every status in the order the status picker lists them
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    /// Wire representation (also used as the `<select>` option value)
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::NoShow => "NO_SHOW",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "No Show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown appointment status: {}", s))
    }
}

/// An appointment as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(with = "datetime::local")]
    pub start_time: NaiveDateTime,
    #[serde(with = "datetime::local")]
    pub end_time: NaiveDateTime,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub user_id: i64,
    /// Denormalized owner name
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub client_id: Option<i64>,
    /// Denormalized client name, when the backend joined it
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub property_id: Option<i64>,
    /// Denormalized property title, when the backend joined it
    #[serde(default)]
    pub property_title: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /appointments/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCreateRequest {
    pub title: String,
    #[serde(with = "datetime::local")]
    pub start_time: NaiveDateTime,
    #[serde(with = "datetime::local")]
    pub end_time: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<i64>,
}

/// Body of `PUT /appointments/{id}/update`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        with = "datetime::local_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveDateTime>,
    #[serde(
        default,
        with = "datetime::local_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<i64>,
}

/// The `{ success, message, data }` envelope every backend response uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, turning `success: false` into [`ApiError::Rejected`]
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(self.message));
        }
        self.data.ok_or(ApiError::MissingData)
    }

    /// Like [`ApiResponse::into_data`] for endpoints whose payload is irrelevant
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(self.message))
        }
    }
}

/// Spring-style page wrapper used by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub last: bool,
}

/// A client of the agency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A property listed by the agency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_round_trips_through_wire_names() {
        for status in AppointmentStatus::ALL {
            assert_eq!(status.as_str().parse::<AppointmentStatus>().unwrap(), status);
        }
        assert!("BOGUS".parse::<AppointmentStatus>().is_err());
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::NoShow).unwrap(),
            "\"NO_SHOW\""
        );
    }

    #[test]
    fn test_appointment_deserializes_backend_payload() {
        let json = r#"{
            "id": 7,
            "userId": 1,
            "username": "agent",
            "clientId": 3,
            "clientName": "Maria Silva",
            "propertyId": null,
            "propertyTitle": null,
            "startTime": "2024-06-05T10:30",
            "endTime": "2024-06-05T11:30:00",
            "notes": null,
            "location": "Office",
            "status": "SCHEDULED",
            "title": "Viewing",
            "createdAt": "2024-06-01T09:00:00",
            "updatedAt": "2024-06-01T09:00:00",
            "createdBy": "agent",
            "updatedBy": "agent"
        }"#;

        let appointment: Appointment = serde_json::from_str(json).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(appointment.start_time, day.and_hms_opt(10, 30, 0).unwrap());
        assert_eq!(appointment.end_time, day.and_hms_opt(11, 30, 0).unwrap());
        assert_eq!(appointment.client_name.as_deref(), Some("Maria Silva"));
        assert_eq!(appointment.property_id, None);
        assert_eq!(appointment.location.as_deref(), Some("Office"));
    }

    #[test]
    fn test_update_request_omits_untouched_fields() {
        let request = AppointmentUpdateRequest {
            title: Some("Renamed".to_string()),
            status: Some(AppointmentStatus::Completed),
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["title"], "Renamed");
        assert_eq!(object["status"], "COMPLETED");
    }

    #[test]
    fn test_envelope_unwrapping() {
        let ok: ApiResponse<Vec<i64>> =
            serde_json::from_str(r#"{"success":true,"message":"OK","data":[1,2]}"#).unwrap();
        assert_eq!(ok.into_data().unwrap(), vec![1, 2]);

        let rejected: ApiResponse<Vec<i64>> =
            serde_json::from_str(r#"{"success":false,"message":"Appointment not found","data":null}"#)
                .unwrap();
        assert_eq!(
            rejected.into_data().unwrap_err(),
            ApiError::Rejected("Appointment not found".to_string())
        );

        let empty: ApiResponse<Vec<i64>> =
            serde_json::from_str(r#"{"success":true,"message":"OK"}"#).unwrap();
        assert_eq!(empty.into_data().unwrap_err(), ApiError::MissingData);
    }

    #[test]
    fn test_paged_response_tolerates_missing_fields() {
        let page: PagedResponse<Client> = serde_json::from_str(
            r#"{"content":[{"id":1,"name":"Ana"}],"totalElements":1,"totalPages":1,"last":true}"#,
        )
        .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.page, 0);
        assert!(page.last);
    }
}
