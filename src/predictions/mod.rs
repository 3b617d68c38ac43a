pub mod error;
pub mod fallback;
pub mod group;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod source;

pub use group::Group;
pub use loader::{FailurePolicy, LoadOutcome, Loader};
pub use models::TeamEntry;
pub use normalize::{normalize, Normalized};
pub use source::source_for;
