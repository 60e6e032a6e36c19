//! 默克爾樹命令行工具
//!
//! 本 crate 在 `merkle-core` 之上提供:
//! 1. 從葉子文件構建默克爾樹並輸出根
//! 2. 為指定葉子生成 JSON 證明文檔
//! 3. 僅憑證明文檔和根驗證葉子成員關係
//! 4. 逐層查看樹的所有摘要
//!
//! # 架構
//!
//! ```text
//! ┌──────────────┐
//! │   main.rs    │  ← 參數解析、日誌、配置
//! └──────┬───────┘
//!        │
//!   ┌────┴────┬──────────┬──────────┐
//!   ▼         ▼          ▼          ▼
//! Leaves  Commands    Report     Config
//!            │
//!            ▼
//!       merkle-core
//! ```
//!
//! # 示例用法
//!
//! ```no_run
//! use merkle_cli::{commands, leaves, types::LeafSelector, CliConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CliConfig::default();
//!     let leaves = leaves::read_leaves("leaves.txt", &config)?;
//!
//!     let document = commands::prove(&leaves, config.hash_algorithm, &LeafSelector::Index(0))?;
//!     assert!(commands::verify_document(&document));
//!
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod leaves;
pub mod report;
pub mod types;

// Re-export 常用類型
pub use error::{CliError, Result};
pub use types::{CliConfig, HashAlgorithm, LeafSelector, ProofDocument, TreeSummary};
