//! Domain logic - pure release rules independent of git and the filesystem

pub mod branch;
pub mod request;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use request::{ReleaseRequest, ReleaseStage};
pub use tag::TagPattern;
pub use version::ReleaseVersion;
