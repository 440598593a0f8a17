//! Backend for a multi-club campus network: admins charter clubs and onboard
//! accounts, faculty coordinators run club rosters and events, and students
//! and guests enroll and register.

pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod store;
pub mod util;
