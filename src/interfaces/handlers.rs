pub mod contact;
pub mod content;
pub mod dashboard;
pub mod home;
pub mod images;
pub mod json_error;
pub mod messages;
pub mod system;
pub mod uploads;
