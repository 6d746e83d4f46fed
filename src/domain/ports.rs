use crate::domain::model::{Download, ScrollTarget};
use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// Origin-scoped string key-value store (the page's local storage).
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Current location plus a history that can be pushed without reloading.
pub trait Navigator {
    fn location(&self) -> &Url;
    fn push_state(&mut self, url: Url);
}

pub trait Viewport {
    fn scroll_to(&mut self, target: ScrollTarget);
}

#[async_trait]
pub trait DownloadTarget: Send + Sync {
    async fn save(&self, download: &Download) -> Result<()>;

    /// 釋放 object URL；預設不需處理
    async fn revoke(&self, _object_url: &str) -> Result<()> {
        Ok(())
    }
}
