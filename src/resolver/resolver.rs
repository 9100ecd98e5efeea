//! 名称解析器：Python发行名 -> 目标发行依赖表达式
//! 规则表命中即返回映射结果，未命中时退化为启发式改名并输出诊断告警

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::context::ResolveContext;
use crate::config::GlobalConfig;
use crate::error::RspyResult;
use crate::rule::{RuleCache, RuleLoader};

// 启发式改名时去掉的尾缀
static TRAILING_PYTHON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-python$").expect("尾缀正则编译失败")
});

/// 版本约束：比较符 + 版本号文本（如 ">=" 与 "1.2.3"）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    pub comparator: String,
    pub version: String,
}

impl VersionConstraint {
    pub fn new(comparator: &str, version: &str) -> Self {
        Self {
            comparator: comparator.to_string(),
            version: version.to_string(),
        }
    }

    /// ">=" 约束的简写
    pub fn ge(version: &str) -> Self {
        Self::new(">=", version)
    }
}

/// 名称解析器
/// 持有规则表缓存；解析本身是纯查找，除诊断输出外无副作用
#[derive(Debug)]
pub struct NameResolver {
    config: GlobalConfig,
    cache: RuleCache,
}

impl NameResolver {
    pub fn new(config: GlobalConfig) -> Self {
        Self {
            config,
            cache: RuleCache::new(),
        }
    }

    /// 规则表的规范键形式：连字符转下划线（幂等）
    pub fn normalize_name(name: &str) -> String {
        name.replace('-', "_")
    }

    fn pkg_prefix(impl_name: &str) -> &'static str {
        if impl_name == "cpython2" {
            "python-"
        } else {
            "python3-"
        }
    }

    /// 启发式改名：去掉尾部 -python，下划线转连字符并小写，
    /// 两种 python 前缀都不存在时补上实现对应的前缀
    pub fn fallback_name(name: &str, impl_name: &str) -> String {
        let pkg = TRAILING_PYTHON_RE
            .replace(name, "")
            .replace('_', "-")
            .to_lowercase();
        if pkg.starts_with("python-") || pkg.starts_with("python3-") {
            pkg
        } else {
            format!("{}{}", Self::pkg_prefix(impl_name), pkg)
        }
    }

    /// 解析Python发行名为目标依赖表达式
    /// 未知名称不报错：输出告警后返回启发式结果（不保证目标包真实存在）
    pub fn resolve(&self, python_name: &str, impl_name: &str) -> RspyResult<String> {
        let normalized = Self::normalize_name(python_name);

        let path = RuleLoader::rule_file_path(&self.config, impl_name);
        let table = self.cache.get_or_load(&path, impl_name)?;

        if let Some(rule) = table.first(&normalized) {
            if self.config.verbose {
                debug!("规则命中：{} -> {}", normalized, rule.dependency);
            }
            return Ok(rule.dependency.clone());
        }

        warn!("规则表中未找到包：{}", normalized);
        warn!("尝试转换为 '{}*' 形式…", Self::pkg_prefix(impl_name));
        let target = Self::fallback_name(&normalized, impl_name);
        warn!("无法保证以下包真实存在：{}", target);

        Ok(target)
    }

    /// 解析并追加版本约束子句
    /// 未显式给出约束时退回需求表的最低版本（">="）；
    /// epoch 表命中时在版本号前加 "<epoch>:"；无任何版本信息则只返回包名
    pub fn resolve_versioned(
        &self,
        python_name: &str,
        impl_name: &str,
        constraint: Option<VersionConstraint>,
        ctx: &ResolveContext,
    ) -> RspyResult<String> {
        let name = self.resolve(python_name, impl_name)?;

        let constraint = constraint.or_else(|| {
            ctx.requirements
                .get(python_name)
                .map(|version| VersionConstraint::ge(version))
        });

        match constraint {
            Some(c) => {
                let epoch = ctx
                    .epochs
                    .get(python_name)
                    .map(|e| format!("{}:", e))
                    .unwrap_or_default();
                Ok(format!("{} ({} {}{})", name, c.comparator, epoch, c.version))
            }
            None => Ok(name),
        }
    }

    /// 清空规则表缓存（测试隔离用）
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
