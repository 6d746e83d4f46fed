pub mod collection;
pub mod date;
pub mod dom;
pub mod file;
pub mod number;
pub mod query;
pub mod storage;
pub mod text;
pub mod timing;

pub use crate::domain::model::{Download, Element, Record, ScrollTarget, SharedElement, SortOrder};
pub use crate::domain::ports::{DownloadTarget, KeyValueStore, Navigator, Viewport};
pub use crate::utils::error::Result;
