pub mod contact;
pub mod dashboard;
pub mod experience;
pub mod extractors;
pub mod projects;
pub mod settings;
pub mod skills;
pub mod social_links;
pub mod uploads;
