use crate::config::AppConfig;
use crate::services::backend::BookingBackend;
use crate::services::notify::ConfirmationMailer;

pub struct AppState {
    pub config: AppConfig,
    pub backend: Box<dyn BookingBackend>,
    pub mailer: Box<dyn ConfirmationMailer>,
}
