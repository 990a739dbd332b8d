pub mod orchestrator;
pub mod routes;

/// Upload cap for the multipart `image` field.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
