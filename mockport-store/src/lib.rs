pub mod cache;
pub mod journal;
pub mod logs;
pub mod persist;

pub use cache::CatalogCache;
pub use journal::LogJournal;
pub use logs::MemoryLogStore;
