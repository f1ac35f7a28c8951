pub mod day;
pub mod session;
pub mod user;
