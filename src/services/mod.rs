pub mod summary;

pub use summary::{LoadError, SummaryClient, SummarySource};
