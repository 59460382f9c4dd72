//! The JSON-document engine.
//!
//! Each collection is one JSON file. A missing file reads as the
//! collection's default (empty); a write serializes the whole collection to
//! a temp file and renames it into place, so a document is either the old
//! version or the new one, never a torn write.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// The store's documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Document {
    Users,
    Orders,
    Sessions,
    Carts,
}

impl Document {
    pub(crate) const fn file_name(self) -> &'static str {
        match self {
            Self::Users => "users.json",
            Self::Orders => "orders.json",
            Self::Sessions => "sessions.json",
            Self::Carts => "carts.json",
        }
    }
}

/// Handle to the document store. Cheaply cloneable; all clones share the
/// per-document locks.
#[derive(Debug, Clone)]
pub struct JsonStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    dir: PathBuf,
    users_lock: Mutex<()>,
    orders_lock: Mutex<()>,
    sessions_lock: Mutex<()>,
    carts_lock: Mutex<()>,
}

impl JsonStore {
    /// Open (and create if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::debug!(dir = %dir.display(), "document store opened");
        Ok(Self {
            inner: Arc::new(Inner {
                dir,
                users_lock: Mutex::new(()),
                orders_lock: Mutex::new(()),
                sessions_lock: Mutex::new(()),
                carts_lock: Mutex::new(()),
            }),
        })
    }

    /// Repository over the users document.
    #[must_use]
    pub const fn users(&self) -> crate::users::UserRepository<'_> {
        crate::users::UserRepository::new(self)
    }

    /// Repository over the orders document.
    #[must_use]
    pub const fn orders(&self) -> crate::orders::OrderRepository<'_> {
        crate::orders::OrderRepository::new(self)
    }

    /// Repository over the sessions document.
    #[must_use]
    pub const fn sessions(&self) -> crate::sessions::SessionRepository<'_> {
        crate::sessions::SessionRepository::new(self)
    }

    /// Repository over the carts document.
    #[must_use]
    pub const fn carts(&self) -> crate::carts::CartRepository<'_> {
        crate::carts::CartRepository::new(self)
    }

    fn lock_for(&self, doc: Document) -> &Mutex<()> {
        match doc {
            Document::Users => &self.inner.users_lock,
            Document::Orders => &self.inner.orders_lock,
            Document::Sessions => &self.inner.sessions_lock,
            Document::Carts => &self.inner.carts_lock,
        }
    }

    fn path_for(&self, doc: Document) -> PathBuf {
        self.inner.dir.join(doc.file_name())
    }

    async fn load<T>(&self, doc: Document) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path_for(doc);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            document: doc.file_name(),
            message: e.to_string(),
        })
    }

    async fn persist<T>(&self, doc: Document, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let json = serde_json::to_vec_pretty(value).map_err(|e| StoreError::Serialize {
            document: doc.file_name(),
            message: e.to_string(),
        })?;
        let path = self.path_for(doc);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read a whole document. A missing file is the empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Corrupt`].
    pub(crate) async fn read<T>(&self, doc: Document) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        self.load(doc).await
    }

    /// Read-modify-write a whole document under its lock.
    ///
    /// The mutation runs on the loaded value; if it errors, nothing is
    /// written and the document is untouched. On success, the full
    /// collection is serialized and atomically swapped in.
    ///
    /// The error type is generic so repositories can surface their own
    /// rejection variants (e.g. registration conflicts) from inside the
    /// critical section.
    ///
    /// # Errors
    ///
    /// Propagates the mutation's error, or [`StoreError::Io`] /
    /// [`StoreError::Corrupt`] / [`StoreError::Serialize`] from the engine.
    pub(crate) async fn update<T, R, E>(
        &self,
        doc: Document,
        mutate: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Result<R, E>
    where
        T: DeserializeOwned + Serialize + Default,
        E: From<StoreError>,
    {
        let _guard = self.lock_for(doc).lock().await;
        let mut value: T = self.load(doc).await.map_err(E::from)?;
        let result = mutate(&mut value)?;
        self.persist(doc, &value).await.map_err(E::from)?;
        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("boostline-store-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_missing_document_reads_as_default() {
        let store = JsonStore::open(temp_dir()).await.unwrap();
        let value: Vec<String> = store.read(Document::Orders).await.unwrap();
        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn test_update_persists_and_rereads() {
        let dir = temp_dir();
        let store = JsonStore::open(&dir).await.unwrap();

        store
            .update(Document::Users, |doc: &mut Vec<String>| {
                doc.push("one".to_owned());
                Ok::<_, StoreError>(())
            })
            .await
            .unwrap();

        // A separate handle over the same directory sees the write.
        let other = JsonStore::open(&dir).await.unwrap();
        let value: Vec<String> = other.read(Document::Users).await.unwrap();
        assert_eq!(value, vec!["one".to_owned()]);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_document_untouched() {
        let dir = temp_dir();
        let store = JsonStore::open(&dir).await.unwrap();

        store
            .update(Document::Carts, |doc: &mut Vec<u32>| {
                doc.push(1);
                Ok::<_, StoreError>(())
            })
            .await
            .unwrap();

        let result: Result<(), StoreError> = store
            .update(Document::Carts, |doc: &mut Vec<u32>| {
                doc.push(2);
                Err(StoreError::NotFound("nope".to_owned()))
            })
            .await;
        assert!(result.is_err());

        let value: Vec<u32> = store.read(Document::Carts).await.unwrap();
        assert_eq!(value, vec![1]);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_reported() {
        let dir = temp_dir();
        let store = JsonStore::open(&dir).await.unwrap();
        tokio::fs::write(dir.join("orders.json"), b"{ not json")
            .await
            .unwrap();

        let result: Result<Vec<u32>, _> = store.read(Document::Orders).await;
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }
}
