//! Legacy store manager gateway.
//!
//! The legacy system is emulated: every notification is written to a scratch
//! file, read back and removed. Delivery is best effort: the write is handed
//! to a detached blocking task and failures are only logged.

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use async_trait::async_trait;
use fulfilment_domain::Store;
use tokio::task::JoinHandle;

use crate::infrastructure::ports::LegacyStorePort;

pub struct LegacyStoreManager {
    /// Directory for scratch files; the system temp dir when `None`.
    scratch_dir: Option<PathBuf>,
}

impl LegacyStoreManager {
    pub fn new(scratch_dir: Option<PathBuf>) -> Self {
        Self { scratch_dir }
    }

    fn render(store: &Store) -> String {
        format!(
            "Store created. [ name ={} ] [ items on stock ={}]",
            store.name, store.quantity_products_in_stock
        )
    }

    fn write_to_file(scratch_dir: Option<PathBuf>, content: String) -> std::io::Result<String> {
        let mut file = match scratch_dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
            None => tempfile::NamedTempFile::new()?,
        };
        tracing::debug!(path = %file.path().display(), "Legacy scratch file created");

        file.write_all(content.as_bytes())?;
        file.flush()?;

        let mut read_back = String::new();
        file.as_file_mut().seek(SeekFrom::Start(0))?;
        file.as_file_mut().read_to_string(&mut read_back)?;

        // NamedTempFile removes itself on close
        file.close()?;
        Ok(read_back)
    }

    /// Hands the notification to a blocking task and returns without waiting for it.
    fn send(&self, event: &'static str, store: &Store) -> JoinHandle<()> {
        let content = Self::render(store);
        let scratch_dir = self.scratch_dir.clone();
        let store_id = store.id;

        tokio::task::spawn_blocking(move || match Self::write_to_file(scratch_dir, content) {
            Ok(delivered) => {
                tracing::info!(store_id = %store_id, event, payload = %delivered, "Legacy store manager notified");
            }
            Err(e) => {
                tracing::error!(store_id = %store_id, event, error = %e, "Failed to write store to legacy file");
            }
        })
    }
}

impl Default for LegacyStoreManager {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl LegacyStorePort for LegacyStoreManager {
    async fn store_created(&self, store: &Store) {
        drop(self.send("created", store));
    }

    async fn store_updated(&self, store: &Store) {
        drop(self.send("updated", store));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fulfilment_domain::{StoreId, StoreName};

    fn store() -> Store {
        Store {
            id: StoreId::new(1),
            name: StoreName::new("TONSTAD").unwrap(),
            quantity_products_in_stock: 10,
        }
    }

    #[test]
    fn renders_legacy_payload() {
        assert_eq!(
            LegacyStoreManager::render(&store()),
            "Store created. [ name =TONSTAD ] [ items on stock =10]"
        );
    }

    #[test]
    fn scratch_file_is_read_back_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let read_back = LegacyStoreManager::write_to_file(
            Some(dir.path().to_path_buf()),
            LegacyStoreManager::render(&store()),
        )
        .unwrap();

        assert!(read_back.contains("TONSTAD"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn missing_scratch_dir_is_swallowed() {
        let manager = LegacyStoreManager::new(Some(PathBuf::from("/definitely/not/here")));
        // Must not panic or surface the error
        manager.store_updated(&store()).await;
        manager.send("updated", &store()).await.unwrap();
    }

    #[tokio::test]
    async fn notification_completes_in_the_background() {
        let dir = tempfile::tempdir().unwrap();
        let manager = LegacyStoreManager::new(Some(dir.path().to_path_buf()));

        let delivery = manager.send("created", &store());
        delivery.await.unwrap();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
