//! Client provisioning and publishing service.

mod publisher;

pub use publisher::{ClientPublishError, ClientPublishResult, ClientPublisher, ClientReport};
