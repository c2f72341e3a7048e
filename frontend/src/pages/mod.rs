pub mod agenda;
pub mod login;
