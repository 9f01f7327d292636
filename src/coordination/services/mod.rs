//! Application services for publishing documents into the coordination tree.

mod publisher;

pub use publisher::{NodePublishError, NodePublishResult, NodePublisher};
