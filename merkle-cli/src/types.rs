//! 共享數據類型定義
//!
//! 本模塊定義命令行工具中各個子系統共享的數據結構

use std::fmt;
use std::str::FromStr;

use merkle_core::{Digest, Proof};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// 默克爾樹哈希算法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum HashAlgorithm {
    /// SHA-256（默認）
    #[default]
    #[serde(rename = "sha256", alias = "sha-256")]
    #[value(name = "sha256")]
    Sha256,

    /// SHA3-256
    #[serde(rename = "sha3-256", alias = "sha3_256")]
    #[value(name = "sha3-256")]
    Sha3_256,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha3_256 => "sha3-256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha3-256" | "sha3_256" => Ok(HashAlgorithm::Sha3_256),
            other => Err(CliError::Config(format!("Unknown hash algorithm: {}", other))),
        }
    }
}

/// 命令行工具配置
///
/// 可以從配置文件（TOML、JSON、YAML）或 `MERKLE_` 前綴的環境變量加載
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    /// 哈希算法
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,

    /// 是否去除每行葉子首尾空白
    #[serde(default = "default_true")]
    pub trim_whitespace: bool,

    /// 是否跳過空行
    #[serde(default = "default_true")]
    pub skip_empty_lines: bool,

    /// 輸出 JSON 是否美化
    #[serde(default)]
    pub pretty_json: bool,

    /// 單棵樹允許的最大葉子數
    #[serde(default = "default_max_leaves")]
    pub max_leaves: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_leaves() -> usize {
    1 << 20
}

/// 內置默認值
///
/// 環境變量覆蓋由 [`crate::config::load_config_from_env`] 處理，解析失敗時返回錯誤
impl Default for CliConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::default(),
            trim_whitespace: true,
            skip_empty_lines: true,
            pretty_json: false,
            max_leaves: default_max_leaves(),
        }
    }
}

/// 選擇要生成證明的葉子
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafSelector {
    /// 按索引（首選，可區分重複葉子）
    Index(usize),

    /// 按值（返回第一個匹配的葉子）
    Value(String),
}

/// 樹摘要
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeSummary {
    pub algorithm: HashAlgorithm,
    pub leaf_count: usize,
    pub depth: usize,
    pub root: Digest,
}

/// 證明文檔
///
/// `prove` 子命令的輸出，`verify` 子命令的輸入
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProofDocument {
    /// 葉子原始值
    pub leaf: String,

    /// 葉子索引（從 0 開始）
    pub leaf_index: usize,

    /// 構建樹使用的哈希算法
    pub algorithm: HashAlgorithm,

    /// 默克爾根
    pub root: Digest,

    /// 從葉子到根的兄弟節點路徑
    pub proof: Proof,
}
