pub mod contact_message;
pub mod dashboard;
pub mod experience;
pub mod project;
pub mod setting;
pub mod skill;
pub mod social_link;
pub mod sqlx_repo;
