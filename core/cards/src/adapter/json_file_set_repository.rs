//! カードセットを `<dir>/<set_id>.json` に書き出す SetRepository

use std::path::PathBuf;
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{now_iso8601, FileSystem};
use serde::{Deserialize, Serialize};

use crate::domain::{NewCard, SetId, SetName};
use crate::ports::outbound::{IdGenerator, SetRepository};

/// 保存ファイルの中身
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSet {
    pub id: SetId,
    pub name: SetName,
    pub created_at: String,
    pub cards: Vec<NewCard>,
}

pub struct JsonFileSetRepository {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
    id_gen: Arc<dyn IdGenerator>,
}

impl JsonFileSetRepository {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl Into<PathBuf>, id_gen: Arc<dyn IdGenerator>) -> Self {
        Self {
            fs,
            dir: dir.into(),
            id_gen,
        }
    }

    pub fn path_for(&self, id: &SetId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

impl SetRepository for JsonFileSetRepository {
    fn save_set(&self, name: &SetName, cards: &[NewCard]) -> Result<SetId, Error> {
        let id = SetId::new(self.id_gen.next_id().to_string());
        let stored = StoredSet {
            id: id.clone(),
            name: name.clone(),
            created_at: now_iso8601(),
            cards: cards.to_vec(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| Error::json(e.to_string()))?;
        self.fs.write_atomic(&self.path_for(&id), &json)?;
        Ok(id)
    }
}
