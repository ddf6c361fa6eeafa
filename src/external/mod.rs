pub mod mailer;
pub mod whatsapp;

pub use mailer::MailService;
pub use whatsapp::WhatsAppService;
