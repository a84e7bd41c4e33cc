//! API handlers for What's Open REST endpoints

pub mod alerts;
pub mod categories;
pub mod facilities;
pub mod health;
pub mod openapi;
pub mod schedules;
