// Adapters layer: concrete implementations of the platform ports.

pub mod downloads;
pub mod history;
pub mod store;
pub mod viewport;

pub use downloads::{LocalDownloads, MemoryDownloads};
pub use history::MemoryHistory;
pub use store::{FileStore, MemoryStore};
pub use viewport::RecordingViewport;
