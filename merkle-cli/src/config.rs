//! 配置管理模塊
//!
//! 負責加載和驗證命令行工具配置

use crate::error::{CliError, Result};
use crate::types::CliConfig;
use config::{Config, Environment, File};
use std::path::Path;

/// 環境變量前綴
pub const ENV_PREFIX: &str = "MERKLE";

/// 從配置文件加載配置
///
/// # 參數
/// - `config_path`: 配置文件路徑（支持 TOML、JSON、YAML）
///
/// # 返回
/// - `Ok(CliConfig)`: 成功加載的配置
/// - `Err(CliError)`: 配置文件格式錯誤或字段值不合法
///
/// # 示例
/// ```no_run
/// use merkle_cli::config::load_config;
///
/// let config = load_config("merkle.toml").expect("Failed to load config");
/// println!("Hash algorithm: {}", config.hash_algorithm);
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<CliConfig> {
    let config = Config::builder()
        .add_source(File::from(config_path.as_ref()))
        .build()
        .map_err(|e| CliError::Config(format!("Failed to load config file: {}", e)))?;

    let cli_config: CliConfig = config
        .try_deserialize()
        .map_err(|e| CliError::Config(format!("Failed to parse config: {}", e)))?;

    validate_config(&cli_config)?;

    Ok(cli_config)
}

/// 從環境變量加載配置
///
/// 環境變量前綴: `MERKLE_`
/// 示例: `MERKLE_HASH_ALGORITHM`, `MERKLE_MAX_LEAVES`
///
/// 未設置的字段使用默認值；設置了但無法解析的值返回 `Config` 錯誤，不會被靜默忽略
pub fn load_config_from_env() -> Result<CliConfig> {
    let config = Config::builder()
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .map_err(|e| CliError::Config(format!("Failed to load env vars: {}", e)))?;

    let cli_config: CliConfig = config
        .try_deserialize()
        .map_err(|e| CliError::Config(format!("Failed to parse env config: {}", e)))?;

    validate_config(&cli_config)?;

    Ok(cli_config)
}

/// 驗證配置的有效性
pub fn validate_config(config: &CliConfig) -> Result<()> {
    if config.max_leaves == 0 {
        return Err(CliError::Config(
            "max_leaves must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
