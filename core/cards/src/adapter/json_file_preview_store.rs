//! プレビューを JSON ファイルとして読み書きする PreviewStore

use std::path::Path;
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::FileSystem;

use crate::domain::GenerationPreview;
use crate::ports::outbound::PreviewStore;

pub struct JsonFilePreviewStore {
    fs: Arc<dyn FileSystem>,
}

impl JsonFilePreviewStore {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl PreviewStore for JsonFilePreviewStore {
    fn load(&self, path: &Path) -> Result<GenerationPreview, Error> {
        let contents = self.fs.read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
    }

    fn save(&self, path: &Path, preview: &GenerationPreview) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(preview).map_err(|e| Error::json(e.to_string()))?;
        self.fs.write_atomic(path, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CardCandidate, GenerationResult, SetName, TmpId, TokenUsage};
    use common::adapter::StdFileSystem;
    use common::domain::ModelName;

    fn preview() -> GenerationPreview {
        let result = GenerationResult::new(
            vec![CardCandidate::new("Q", "A").unwrap()],
            SetName::from_suggestion(Some("Set")),
            ModelName::new("m"),
            TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
            },
        )
        .unwrap();
        GenerationPreview::from_result(&result, || TmpId::new("00000001")).unwrap()
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preview.json");
        let store = JsonFilePreviewStore::new(Arc::new(StdFileSystem));
        let p = preview();
        store.save(&path, &p).unwrap();
        assert_eq!(store.load(&path).unwrap(), p);
        assert!(!dir.path().join("nested").join("preview.json.tmp").exists());
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.json");
        std::fs::write(
            &path,
            r#"{"suggested_name":"S","model":"m","prompt_tokens":0,"completion_tokens":0,
                "cards":[{"tmp_id":"a","front":"1","back":"2"},{"tmp_id":"a","front":"3","back":"4"}]}"#,
        )
        .unwrap();
        let store = JsonFilePreviewStore::new(Arc::new(StdFileSystem));
        let err = store.load(&path).unwrap_err();
        assert_eq!(err.exit_code(), 65);
        assert!(err.to_string().contains("preview.json"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreviewStore::new(Arc::new(StdFileSystem));
        let err = store.load(&dir.path().join("none.json")).unwrap_err();
        assert_eq!(err.exit_code(), 74);
    }
}
