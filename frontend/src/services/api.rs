use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::appointments::AppointmentGateway;
use shared::auth::{AuthGateway, AuthResponse, LoginRequest, RefreshRequest, TokenStore, User};
use shared::directory::DirectoryGateway;
use shared::endpoints::{self, AppointmentQuery, PageRequest};
use shared::week::DateRange;
use shared::{
    ApiError, ApiResponse, Appointment, AppointmentCreateRequest, AppointmentUpdateRequest, Client,
    PagedResponse, Property,
};

use crate::services::config::AppConfig;
use crate::services::session::SessionStore;

/// Some endpoints answer with the `{ success, message, data }` envelope and
/// some with the bare payload
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Enveloped(ApiResponse<T>),
    Bare(T),
}

impl<T> Payload<T> {
    fn into_data(self) -> Result<T, ApiError> {
        match self {
            Payload::Enveloped(envelope) => envelope.into_data(),
            Payload::Bare(data) => Ok(data),
        }
    }
}

/// API client for the back-office REST backend.
///
/// Every request carries `Accept: application/json` and, when a session
/// exists, the bearer token read from the session store.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            session: SessionStore::new(config),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        endpoints::join(&self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match self.session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let method = request.method();
        let url = request.url();
        log::debug!("➡️ {:?} {}", method, url);

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(response.status(), &response.status_text(), &body);
        log::warn!("⚠️ {:?} {} -> {}", method, url, error);
        Err(error)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .into_data()
    }

    /// For the auth endpoints that may skip the envelope
    async fn decode_lenient<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<Payload<T>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .into_data()
    }

    /// Success with an empty body or a `data`-less envelope
    async fn expect_unit(response: Response) -> Result<(), ApiError> {
        let body = response.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            return Ok(());
        }
        serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .into_unit()
    }

    fn build(builder: RequestBuilder) -> Result<Request, ApiError> {
        builder.build().map_err(|e| ApiError::Network(e.to_string()))
    }

    fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Request, ApiError> {
        builder
            .json(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))
    }

    async fn get_response(&self, path: &str) -> Result<Response, ApiError> {
        let request = Self::build(self.authorize(Request::get(&self.url(path))))?;
        self.send(request).await
    }

    async fn post_response<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let request = Self::with_json(self.authorize(Request::post(&self.url(path))), body)?;
        self.send(request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::decode(self.get_response(path).await?).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        Self::decode(self.post_response(path, body).await?).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let request = Self::with_json(self.authorize(Request::put(&self.url(path))), body)?;
        Self::decode(self.send(request).await?).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = Self::build(self.authorize(Request::delete(&self.url(path))))?;
        Self::expect_unit(self.send(request).await?).await
    }
}

#[async_trait(?Send)]
impl AppointmentGateway for ApiClient {
    async fn list_appointments(&self, query: AppointmentQuery) -> Result<Vec<Appointment>, ApiError> {
        self.get(&endpoints::appointments(query)).await
    }

    async fn appointments_in_range(&self, range: DateRange) -> Result<Vec<Appointment>, ApiError> {
        self.get(&endpoints::appointments_in_range(&range)).await
    }

    async fn get_appointment(&self, id: i64) -> Result<Appointment, ApiError> {
        self.get(&endpoints::appointment(id)).await
    }

    async fn create_appointment(
        &self,
        request: &AppointmentCreateRequest,
    ) -> Result<Appointment, ApiError> {
        self.post(endpoints::create_appointment(), request).await
    }

    async fn update_appointment(
        &self,
        id: i64,
        request: &AppointmentUpdateRequest,
    ) -> Result<Appointment, ApiError> {
        self.put(&endpoints::update_appointment(id), request).await
    }

    async fn delete_appointment(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::delete_appointment(id)).await
    }
}

#[async_trait(?Send)]
impl DirectoryGateway for ApiClient {
    async fn list_clients(&self, page: PageRequest) -> Result<PagedResponse<Client>, ApiError> {
        self.get(&endpoints::clients(page)).await
    }

    async fn list_properties(&self, page: PageRequest) -> Result<PagedResponse<Property>, ApiError> {
        self.get(&endpoints::properties(page)).await
    }
}

#[async_trait(?Send)]
impl AuthGateway for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post(endpoints::login(), credentials).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let request = Self::build(self.authorize(Request::post(&self.url(endpoints::logout()))))?;
        self.send(request).await.map(|_| ())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        Self::decode_lenient(self.get_response(endpoints::current_user()).await?).await
    }

    async fn refresh(&self, request: &RefreshRequest) -> Result<AuthResponse, ApiError> {
        Self::decode_lenient(self.post_response(endpoints::refresh_token(), request).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_payload_accepts_envelope_or_bare_value() {
        let enveloped: Payload<User> = serde_json::from_str(
            r#"{"success":true,"message":"OK","data":{"id":1,"name":"Agent"}}"#,
        )
        .unwrap();
        assert_eq!(enveloped.into_data().unwrap().name, "Agent");

        let bare: Payload<User> = serde_json::from_str(r#"{"id":"7","name":"Agent"}"#).unwrap();
        assert_eq!(bare.into_data().unwrap().id, "7");

        let rejected: Payload<User> =
            serde_json::from_str(r#"{"success":false,"message":"Bad credentials","data":null}"#)
                .unwrap();
        assert_eq!(
            rejected.into_data().unwrap_err(),
            ApiError::Rejected("Bad credentials".to_string())
        );
    }

    #[wasm_bindgen_test]
    fn test_urls_join_base() {
        let client = ApiClient::new(&AppConfig {
            api_base_url: "http://localhost:8080/api/".to_string(),
            ..AppConfig::default()
        });
        assert_eq!(
            client.url(&endpoints::delete_appointment(3)),
            "http://localhost:8080/api/appointments/3/delete"
        );
    }
}
