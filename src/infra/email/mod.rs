pub mod http_email_service;
pub mod notifier;
