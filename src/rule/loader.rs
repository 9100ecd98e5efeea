//! 规则文件加载管理器
//! 按解释器实现定位规则文件并解析为规则表

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::parser::RuleParser;
use super::model::RuleTable;
use crate::config::GlobalConfig;
use crate::error::{RspyResult, RspydistError};

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 指定实现对应的规则文件路径（<pydist_dir>/<impl>_fallback）
    pub fn rule_file_path(config: &GlobalConfig, impl_name: &str) -> PathBuf {
        config.pydist_dir.join(format!("{}_fallback", impl_name))
    }

    /// 从指定路径加载规则表
    pub fn load_from_path(path: &Path) -> RspyResult<RuleTable> {
        let content = fs::read_to_string(path).map_err(|e| {
            RspydistError::RuleLoadError(format!("读取 {} 失败：{}", path.display(), e))
        })?;
        let table = RuleParser::parse_table(&content, &path.display().to_string())?;
        debug!("规则文件加载成功：{}，规则名总数：{}", path.display(), table.len());
        Ok(table)
    }

    /// 按实现加载规则表
    pub fn load(config: &GlobalConfig, impl_name: &str) -> RspyResult<RuleTable> {
        Self::load_from_path(&Self::rule_file_path(config, impl_name))
    }
}
