//! 规则表缓存管理
//! 以（规则文件路径, 实现标识）为键的进程内缓存，带显式 clear 以便测试隔离

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::loader::RuleLoader;
use super::model::RuleTable;
use crate::error::RspyResult;

/// 规则表缓存
/// 相同键的重复请求返回同一份 Arc，填充过程持锁，检查与写入原子完成
#[derive(Debug, Default)]
pub struct RuleCache {
    tables: Mutex<HashMap<(PathBuf, String), Arc<RuleTable>>>,
}

impl RuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 命中缓存直接返回，未命中则加载、入缓存后返回
    pub fn get_or_load(&self, path: &Path, impl_name: &str) -> RspyResult<Arc<RuleTable>> {
        let key = (path.to_path_buf(), impl_name.to_string());
        let mut tables = self.tables.lock().expect("规则缓存锁被污染");
        if let Some(table) = tables.get(&key) {
            debug!("规则表缓存命中：{}（{}）", path.display(), impl_name);
            return Ok(table.clone());
        }

        let table = Arc::new(RuleLoader::load_from_path(path)?);
        tables.insert(key, table.clone());
        Ok(table)
    }

    /// 清空缓存（测试隔离用）
    pub fn clear(&self) {
        self.tables.lock().expect("规则缓存锁被污染").clear();
    }

    /// 已缓存的键数量
    pub fn len(&self) -> usize {
        self.tables.lock().expect("规则缓存锁被污染").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
