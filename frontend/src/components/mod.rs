pub mod appointment_detail;
pub mod appointment_form;
pub mod dynamic_form;
pub mod modal;
pub mod toast;
pub mod weekly_calendar;
