//! 命令行工具統一錯誤類型定義
//!
//! 使用 thiserror crate 提供良好的錯誤鏈和上下文信息。

use thiserror::Error;

/// 命令行工具錯誤類型
#[derive(Error, Debug)]
pub enum CliError {
    /// 默克爾樹錯誤
    ///
    /// 空葉子序列、葉子不存在、索引越界或證明格式錯誤
    #[error("Merkle error: {0}")]
    Merkle(#[from] merkle_core::MerkleError),

    /// 配置錯誤
    ///
    /// 當配置文件格式錯誤或參數不合法時返回此錯誤
    #[error("Configuration error: {0}")]
    Config(String),

    /// 葉子輸入錯誤
    #[error("Invalid leaf input: {0}")]
    InvalidInput(String),

    /// 序列化/反序列化錯誤
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O 錯誤
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 類型別名
pub type Result<T> = std::result::Result<T, CliError>;
