//! 葉子輸入解析模塊
//!
//! 葉子文件每行一個葉子，行內容的 UTF-8 字節即為葉子值。

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{CliError, Result};
use crate::types::CliConfig;

/// 從文件讀取葉子
///
/// # 錯誤
/// - 文件不存在或無法讀取: 返回 `Io` 錯誤
/// - 葉子數超過 `max_leaves`: 返回 `InvalidInput` 錯誤
pub fn read_leaves<P: AsRef<Path>>(path: P, config: &CliConfig) -> Result<Vec<String>> {
    let path = path.as_ref();
    info!("Reading leaves from: {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read leaves from {}: {}", path.display(), e),
        ))
    })?;

    parse_leaves(&content, config)
}

/// 將文本內容解析為葉子列表
///
/// 保持行的原始順序；是否去除空白、是否跳過空行由配置決定
pub fn parse_leaves(content: &str, config: &CliConfig) -> Result<Vec<String>> {
    let leaves: Vec<String> = content
        .lines()
        .map(|line| {
            if config.trim_whitespace {
                line.trim()
            } else {
                line
            }
        })
        .filter(|line| !(config.skip_empty_lines && line.is_empty()))
        .map(str::to_string)
        .collect();

    if leaves.len() > config.max_leaves {
        return Err(CliError::InvalidInput(format!(
            "{} leaves exceed the configured maximum of {}",
            leaves.len(),
            config.max_leaves
        )));
    }

    debug!("Parsed {} leaves", leaves.len());

    Ok(leaves)
}
