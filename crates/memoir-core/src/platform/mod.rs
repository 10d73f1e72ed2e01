//! Platform storage implementations

pub mod file;
pub mod memory;
pub mod noop;
#[cfg(feature = "web")]
pub mod web;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use noop::NoopStorage;
#[cfg(feature = "web")]
pub use web::WebStorage;
