pub mod auth;
pub mod db;
pub mod email;
pub mod limiter;
pub mod storage;
pub mod utils;
