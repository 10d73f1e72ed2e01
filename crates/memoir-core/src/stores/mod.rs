//! Domain stores
//!
//! Typed accessors over the sync gateway, one per persisted key. Each
//! [`Collection`] fixes the key, the value type and the default returned when
//! nothing valid is stored.

pub mod memories;
pub mod moods;
pub mod photos;
pub mod songs;
pub mod todos;
pub mod vault;

use crate::gateway::SyncGateway;
use memoir_types::{
    default_songs, MemoryEntry, MoodMap, Song, TodoItem, VaultData, MEMORIES_KEY, MOODS_KEY,
    PHOTOS_KEY, SONGS_KEY, TODOS_KEY, VAULT_KEY,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

pub trait Collection {
    const KEY: &'static str;
    type Value: Serialize + DeserializeOwned + PartialEq + Send + Sync;

    fn fallback() -> Self::Value;
}

pub struct Memories;
pub struct Moods;
pub struct Vault;
pub struct Todos;
pub struct Songs;
pub struct Photos;

impl Collection for Memories {
    const KEY: &'static str = MEMORIES_KEY;
    type Value = Vec<MemoryEntry>;

    fn fallback() -> Self::Value {
        Vec::new()
    }
}

impl Collection for Moods {
    const KEY: &'static str = MOODS_KEY;
    type Value = MoodMap;

    fn fallback() -> Self::Value {
        MoodMap::new()
    }
}

impl Collection for Vault {
    const KEY: &'static str = VAULT_KEY;
    type Value = VaultData;

    fn fallback() -> Self::Value {
        VaultData::default()
    }
}

impl Collection for Todos {
    const KEY: &'static str = TODOS_KEY;
    type Value = Vec<TodoItem>;

    fn fallback() -> Self::Value {
        Vec::new()
    }
}

impl Collection for Songs {
    const KEY: &'static str = SONGS_KEY;
    type Value = Vec<Song>;

    fn fallback() -> Self::Value {
        default_songs()
    }
}

impl Collection for Photos {
    const KEY: &'static str = PHOTOS_KEY;
    type Value = Vec<String>;

    fn fallback() -> Self::Value {
        Vec::new()
    }
}

pub type MemoriesStore = DomainStore<Memories>;
pub type MoodsStore = DomainStore<Moods>;
pub type VaultStore = DomainStore<Vault>;
pub type TodosStore = DomainStore<Todos>;
pub type SongsStore = DomainStore<Songs>;
pub type PhotosStore = DomainStore<Photos>;

pub struct DomainStore<C: Collection> {
    gateway: Arc<SyncGateway>,
    _collection: PhantomData<fn() -> C>,
}

impl<C: Collection> Clone for DomainStore<C> {
    fn clone(&self) -> Self {
        Self::new(self.gateway.clone())
    }
}

impl<C: Collection> DomainStore<C> {
    pub fn new(gateway: Arc<SyncGateway>) -> Self {
        Self {
            gateway,
            _collection: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        C::KEY
    }

    pub fn gateway(&self) -> &Arc<SyncGateway> {
        &self.gateway
    }

    pub async fn load(&self) -> C::Value {
        self.gateway.load(C::KEY, C::fallback()).await
    }

    pub async fn save(&self, value: &C::Value) {
        self.gateway.save(C::KEY, value).await;
    }

    /// Load, modify and save back. Last write wins; there is no locking across
    /// concurrent updates.
    pub async fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut C::Value) -> R,
    {
        let mut value = self.load().await;
        let result = f(&mut value);
        self.save(&value).await;
        result
    }

    /// Like [`DomainStore::update`] but nothing is saved when `f` fails
    pub async fn try_update<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut C::Value) -> Result<R, E>,
    {
        let mut value = self.load().await;
        let result = f(&mut value)?;
        self.save(&value).await;
        Ok(result)
    }
}

/// All domain stores sharing one gateway
#[derive(Clone)]
pub struct Stores {
    pub memories: MemoriesStore,
    pub moods: MoodsStore,
    pub vault: VaultStore,
    pub todos: TodosStore,
    pub songs: SongsStore,
    pub photos: PhotosStore,
}

impl Stores {
    pub fn new(gateway: Arc<SyncGateway>) -> Self {
        Self {
            memories: DomainStore::new(gateway.clone()),
            moods: DomainStore::new(gateway.clone()),
            vault: DomainStore::new(gateway.clone()),
            todos: DomainStore::new(gateway.clone()),
            songs: DomainStore::new(gateway.clone()),
            photos: DomainStore::new(gateway),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::cache::LocalCache;
    use crate::gateway::SyncGateway;
    use crate::platform::MemoryStorage;
    use std::sync::Arc;

    pub fn gateway() -> Arc<SyncGateway> {
        Arc::new(SyncGateway::local_only(LocalCache::new(Arc::new(
            MemoryStorage::new(),
        ))))
    }
}
