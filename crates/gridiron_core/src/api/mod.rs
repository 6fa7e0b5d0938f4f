pub mod json_api;

pub use json_api::{
    effective_completion_json, simulate_drive_json, CompletionRequest, CompletionResponse,
    DriveRequest, DriveResponse,
};
