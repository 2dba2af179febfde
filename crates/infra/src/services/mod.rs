mod email;

pub use email::{reminder_html, reminder_subject, HttpEmailSender, IEmailSender};
