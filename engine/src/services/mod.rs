//! Service implementations backing the collaborator traits

pub mod directory;
pub mod memory_store;
pub mod retry;

pub use directory::MemoryDirectory;
pub use memory_store::MemoryStore;
pub use retry::RetryPolicy;

#[cfg(test)]
mod tests;
