// ABOUTME: HTTP client for the Spring Cloud management API.
// ABOUTME: Implements the service directory and slot registry traits over reqwest.

mod client;
mod error;
mod lro;
mod models;
mod operations;
mod upload;

pub use client::{
    API_VERSION, DEFAULT_ENDPOINT, DEFAULT_POLL_INTERVAL, ManagementClient,
    ManagementClientBuilder, SUCCESS_CODES, is_success,
};
pub use error::{ApiError, Operation};
