pub mod cache;
pub mod exporter;
pub mod fetcher;
pub mod normalizer;
pub mod standings;

pub use cache::*;
pub use exporter::*;
pub use fetcher::*;
