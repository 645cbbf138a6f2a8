//! SeaORM entities.

pub mod reminder;
pub mod user;
