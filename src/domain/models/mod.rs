pub mod appointment;
pub mod notification;
pub mod opening_hours;
pub mod slot;
