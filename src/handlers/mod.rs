pub mod auth;
pub mod days;
pub mod health;
