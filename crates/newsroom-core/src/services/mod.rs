//! Application services - business rules on top of the ports.

mod posts;

pub use posts::{EmptyListPolicy, PostService};
