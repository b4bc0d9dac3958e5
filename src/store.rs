//! 歌词文档的持久化接口，以及一个基于内存的实现。
//!
//! 每首歌最多对应一份歌词文档，以歌曲 ID 为键。存储层负责为文档和行分配 ID，
//! 并在写入时把行号整理为从 1 开始连续。

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use tracing::debug;
use uuid::Uuid;

use crate::{
    converter::LyricDocument,
    error::{LyricsError, Result},
};

/// 歌词文档的存储接口。
#[async_trait]
pub trait LyricsStore: Send + Sync {
    /// 读取某首歌的歌词文档。
    async fn get(&self, song_id: &str) -> Result<Option<LyricDocument>>;

    /// 为某首歌创建歌词文档。已存在时返回 `DocumentExists`。
    async fn create(&self, song_id: &str, document: LyricDocument) -> Result<LyricDocument>;

    /// 整体替换某首歌的歌词文档：旧的行全部删除后重新创建。
    /// 不存在时返回 `DocumentNotFound`。
    async fn replace(&self, song_id: &str, document: LyricDocument) -> Result<LyricDocument>;

    /// 删除某首歌的歌词文档，返回是否确实删除了内容。
    async fn delete(&self, song_id: &str) -> Result<bool>;

    /// 文档存在时替换，否则创建。
    async fn create_or_replace(
        &self,
        song_id: &str,
        document: LyricDocument,
    ) -> Result<LyricDocument> {
        if self.get(song_id).await?.is_some() {
            self.replace(song_id, document).await
        } else {
            self.create(song_id, document).await
        }
    }
}

/// 基于 `DashMap` 的内存存储，适用于测试和单进程场景。
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: DashMap<String, LyricDocument>,
}

impl MemoryStore {
    /// 创建一个空的存储。
    pub fn new() -> Self {
        Self::default()
    }

    /// 已存储的文档数量。
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// 是否没有任何文档。
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// 按 `order` 稳定排序后重新编号，并为所有行分配新的 ID。
fn normalize(mut document: LyricDocument, document_id: String) -> LyricDocument {
    document.lines.sort_by_key(|line| line.order);
    document.renumber();
    for line in &mut document.lines {
        line.id = Some(Uuid::new_v4().to_string());
    }
    document.id = Some(document_id);
    document
}

#[async_trait]
impl LyricsStore for MemoryStore {
    async fn get(&self, song_id: &str) -> Result<Option<LyricDocument>> {
        Ok(self.documents.get(song_id).map(|doc| doc.value().clone()))
    }

    async fn create(&self, song_id: &str, document: LyricDocument) -> Result<LyricDocument> {
        match self.documents.entry(song_id.to_string()) {
            Entry::Occupied(_) => Err(LyricsError::DocumentExists(song_id.to_string())),
            Entry::Vacant(vacant) => {
                let stored = normalize(document, Uuid::new_v4().to_string());
                debug!("[MemoryStore] 为歌曲 {song_id} 创建了 {} 行歌词。", stored.lines.len());
                vacant.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn replace(&self, song_id: &str, document: LyricDocument) -> Result<LyricDocument> {
        match self.documents.entry(song_id.to_string()) {
            Entry::Vacant(_) => Err(LyricsError::DocumentNotFound(song_id.to_string())),
            Entry::Occupied(mut occupied) => {
                let document_id = occupied
                    .get()
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let stored = normalize(document, document_id);
                debug!("[MemoryStore] 替换了歌曲 {song_id} 的歌词，共 {} 行。", stored.lines.len());
                occupied.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn delete(&self, song_id: &str) -> Result<bool> {
        Ok(self.documents.remove(song_id).is_some())
    }

    /// 在同一个 entry 锁内判断并写入，并发调用不会因为竞争而返回 `DocumentExists`。
    async fn create_or_replace(
        &self,
        song_id: &str,
        document: LyricDocument,
    ) -> Result<LyricDocument> {
        let stored = match self.documents.entry(song_id.to_string()) {
            Entry::Occupied(mut occupied) => {
                let document_id = occupied
                    .get()
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let stored = normalize(document, document_id);
                occupied.insert(stored.clone());
                stored
            }
            Entry::Vacant(vacant) => {
                let stored = normalize(document, Uuid::new_v4().to_string());
                vacant.insert(stored.clone());
                stored
            }
        };
        debug!("[MemoryStore] 已写入歌曲 {song_id} 的歌词，共 {} 行。", stored.lines.len());
        Ok(stored)
    }
}
