//! 證明文檔導出與加載模塊
//!
//! 證明文檔以 JSON 保存，`proof` 字段與核心庫的證明格式一致：
//!
//! ```json
//! {
//!   "leaf": "apple",
//!   "leaf_index": 0,
//!   "algorithm": "sha256",
//!   "root": "<64 位十六進制>",
//!   "proof": [
//!     { "data": "<64 位十六進制>", "position": "right" },
//!     { "data": "<64 位十六進制>", "position": "right" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{CliError, Result};
use crate::types::ProofDocument;

impl ProofDocument {
    /// 將文檔序列化為 JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };

        json.map_err(|e| CliError::Serialization(format!("Failed to serialize proof document: {}", e)))
    }

    /// 從 JSON 反序列化文檔
    ///
    /// 未知的 position 標籤或長度錯誤的摘要會在此處被拒絕
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            CliError::Merkle(merkle_core::MerkleError::MalformedProof(e.to_string()))
        })
    }

    /// 導出文檔到文件
    ///
    /// # 錯誤
    /// - 序列化失敗: 返回 `Serialization` 錯誤
    /// - 文件寫入失敗: 返回 `Io` 錯誤
    pub fn export_json<P: AsRef<Path>>(&self, path: P, pretty: bool) -> Result<()> {
        let path = path.as_ref();
        info!("Exporting proof document to: {}", path.display());

        let json = self.to_json(pretty)?;
        let json_len = json.len();

        fs::write(path, json).map_err(|e| {
            CliError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write proof document to {}: {}", path.display(), e),
            ))
        })?;

        info!("Proof document exported: {} bytes", json_len);

        Ok(())
    }

    /// 從文件加載文檔
    ///
    /// # 錯誤
    /// - 文件不存在或無法讀取: 返回 `Io` 錯誤
    /// - JSON 格式錯誤: 返回 `MalformedProof` 錯誤
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading proof document from: {}", path.display());

        let json = fs::read_to_string(path).map_err(|e| {
            CliError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read proof document from {}: {}", path.display(), e),
            ))
        })?;

        let document = Self::from_json(&json)?;

        info!(
            "Proof document loaded: leaf_index={}, steps={}",
            document.leaf_index,
            document.proof.len()
        );

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{prove, verify_document};
    use crate::types::{HashAlgorithm, LeafSelector};
    use merkle_core::MerkleError;

    fn document() -> ProofDocument {
        let leaves: Vec<String> = vec!["apple".into(), "banana".into(), "cherry".into()];
        prove(&leaves, HashAlgorithm::Sha256, &LeafSelector::Index(0)).unwrap()
    }

    #[test]
    fn test_export_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proof.json");

        let original = document();
        original.export_json(&path, true).unwrap();

        let restored = ProofDocument::load_json(&path).unwrap();
        assert_eq!(original, restored);
        assert!(verify_document(&restored));
    }

    #[test]
    fn test_json_field_names() {
        let json = document().to_json(false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["leaf"], "apple");
        assert_eq!(value["algorithm"], "sha256");
        assert_eq!(value["proof"][0]["position"], "right");
    }

    #[test]
    fn test_bad_position_is_malformed() {
        let json = document()
            .to_json(false)
            .unwrap()
            .replace("\"right\"", "\"up\"");

        assert!(matches!(
            ProofDocument::from_json(&json),
            Err(CliError::Merkle(MerkleError::MalformedProof(_)))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ProofDocument::load_json("/nonexistent/proof.json");
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
