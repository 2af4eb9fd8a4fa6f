/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod checklists;
pub mod client;
pub mod error;
pub mod notifications;
pub mod tasks;

pub use client::{ClientConfig, Credentials, RoomflowClient};
pub use error::{AdapterError, Result};
