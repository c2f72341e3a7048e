//! Authentication slice and session persistence.
//!
//! The token lives in a [`TokenStore`] (browser local storage in the app)
//! and is written through on every change, so a reload starts from whatever
//! the last login left behind.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl User {
    /// The id as the numeric owner id appointments use, when it is one
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.parse().ok()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[async_trait(?Send)]
pub trait AuthGateway {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    async fn current_user(&self) -> Result<User, ApiError>;

    async fn refresh(&self, request: &RefreshRequest) -> Result<AuthResponse, ApiError>;
}

/// Where the session tokens are persisted between page loads
pub trait TokenStore {
    fn token(&self) -> Option<String>;

    fn refresh_token(&self) -> Option<String>;

    fn save(&self, token: &str, refresh_token: Option<&str>);

    fn clear(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Pending,
    SessionStarted(AuthResponse),
    LoginRejected(String),
    LoggedOut,
    RefreshRejected(String),
    UserLoaded(User),
    UserRejected(String),
    SetUser(User),
    ClearError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_authenticated: bool,
}

impl AuthState {
    /// Initial state: authenticated iff a token survived in the store
    pub fn from_store<S: TokenStore + ?Sized>(store: &S) -> Self {
        let token = store.token();
        Self {
            is_authenticated: token.is_some(),
            token,
            refresh_token: store.refresh_token(),
            ..Default::default()
        }
    }

    pub fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::Pending => {
                self.loading = true;
                self.error = None;
            }
            AuthAction::SessionStarted(response) => {
                self.loading = false;
                self.user = Some(response.user);
                self.token = Some(response.token);
                // A refresh may rotate only the access token
                if let Some(refresh_token) = response.refresh_token {
                    self.refresh_token = Some(refresh_token);
                }
                self.is_authenticated = true;
            }
            AuthAction::LoginRejected(message) => {
                self.loading = false;
                self.error = Some(message);
                self.is_authenticated = false;
            }
            AuthAction::LoggedOut => {
                self.end_session();
                self.error = None;
            }
            AuthAction::RefreshRejected(message) => {
                self.end_session();
                self.error = Some(message);
            }
            AuthAction::UserLoaded(user) | AuthAction::SetUser(user) => {
                self.loading = false;
                self.user = Some(user);
                self.is_authenticated = true;
            }
            AuthAction::UserRejected(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            AuthAction::ClearError => self.error = None,
        }
    }

    fn end_session(&mut self) {
        self.loading = false;
        self.user = None;
        self.token = None;
        self.refresh_token = None;
        self.is_authenticated = false;
    }
}

pub async fn login<G, S, D>(
    gateway: &G,
    store: &S,
    credentials: LoginRequest,
    dispatch: D,
) -> Result<User, ApiError>
where
    G: AuthGateway + ?Sized,
    S: TokenStore + ?Sized,
    D: Fn(AuthAction),
{
    dispatch(AuthAction::Pending);
    match gateway.login(&credentials).await {
        Ok(response) => {
            store.save(&response.token, response.refresh_token.as_deref());
            log::info!("🔐 Signed in as {}", credentials.username);
            let user = response.user.clone();
            dispatch(AuthAction::SessionStarted(response));
            Ok(user)
        }
        Err(error) => {
            log::warn!("⚠️ Login failed: {}", error);
            dispatch(AuthAction::LoginRejected(error.message_or("Login failed")));
            Err(error)
        }
    }
}

/// End the session locally whatever the server says
pub async fn logout<G, S, D>(gateway: &G, store: &S, dispatch: D)
where
    G: AuthGateway + ?Sized,
    S: TokenStore + ?Sized,
    D: Fn(AuthAction),
{
    dispatch(AuthAction::Pending);
    if let Err(error) = gateway.logout().await {
        log::warn!("Logout error ignored: {}", error);
    }
    store.clear();
    dispatch(AuthAction::LoggedOut);
}

pub async fn refresh<G, S, D>(gateway: &G, store: &S, dispatch: D) -> Result<(), ApiError>
where
    G: AuthGateway + ?Sized,
    S: TokenStore + ?Sized,
    D: Fn(AuthAction),
{
    dispatch(AuthAction::Pending);
    let result = match store.refresh_token() {
        Some(refresh_token) => gateway.refresh(&RefreshRequest { refresh_token }).await,
        None => Err(ApiError::Rejected("No refresh token available".to_string())),
    };
    match result {
        Ok(response) => {
            store.save(&response.token, response.refresh_token.as_deref());
            dispatch(AuthAction::SessionStarted(response));
            Ok(())
        }
        Err(error) => {
            log::warn!("⚠️ Token refresh failed, dropping session: {}", error);
            store.clear();
            dispatch(AuthAction::RefreshRejected(error.message_or("Token refresh failed")));
            Err(error)
        }
    }
}

pub async fn get_current_user<G, D>(gateway: &G, dispatch: D) -> Result<User, ApiError>
where
    G: AuthGateway + ?Sized,
    D: Fn(AuthAction),
{
    dispatch(AuthAction::Pending);
    match gateway.current_user().await {
        Ok(user) => {
            dispatch(AuthAction::UserLoaded(user.clone()));
            Ok(user)
        }
        Err(error) => {
            dispatch(AuthAction::UserRejected(error.message_or("Failed to fetch user")));
            Err(error)
        }
    }
}
