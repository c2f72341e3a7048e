pub mod use_appointments;
pub mod use_auth;
pub mod use_directory;
pub mod use_toasts;
