//! Domain model for coordination tree addressing.

mod error;
mod path;

pub use error::TreePathError;
pub use path::TreePath;
