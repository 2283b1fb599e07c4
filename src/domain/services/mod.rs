pub mod availability;
pub mod booking;
pub mod calendar;
pub mod slots;
pub mod status;
pub mod validation;
