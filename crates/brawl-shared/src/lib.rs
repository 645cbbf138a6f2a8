//! # Brawl Shared
//!
//! Wire types shared by the API server and the `brawl` client.

pub mod dto;
pub mod response;

pub use response::{
    ErrorResponse, HealthResponse, INVALID_TOKEN_MSG, MISSING_TOKEN_MSG, MessageResponse,
};
