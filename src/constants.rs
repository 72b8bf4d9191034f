use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Upper bound on ids accepted by one bulk message request.
pub const MAX_BULK_IDS: usize = 500;

pub const API_PREFIX: &str = "/api/v1";
pub const ADMIN_PREFIX: &str = "/api/v1/admin";
