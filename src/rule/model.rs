//! 规则数据模型定义
//! 存储发行映射规则与版本翻译指令，支持序列化/反序列化

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RspyResult, RspydistError};
use crate::version::{Version, VersionRange};

// 替换串中 \N 形式的分组引用（统一转成 regex 库的 $N 形式）
static GROUP_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(\d+)").expect("分组引用正则编译失败")
});

// PEP386 预发布标记 -> Debian 波浪号版本
static PEP386_ALPHA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.-]?alpha(\d+)").expect("PEP386 alpha正则编译失败")
});
static PEP386_BETA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.-]?beta(\d+)").expect("PEP386 beta正则编译失败")
});
static PEP386_RC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.-]?rc(\d+)").expect("PEP386 rc正则编译失败")
});
static PEP386_SHORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d)[.-]?([abc])(\d+)").expect("PEP386 短标记正则编译失败")
});

/// 版本翻译指令（上游版本串 -> 打包目标版本串）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationRule {
    /// s/模式/替换串/ 形式的正则替换，替换串支持 \N 或 $N 分组引用
    Substitute { pattern: String, replacement: String },
    /// tr/abc/xyz/ 或 y/abc/xyz/ 形式的逐字符转写
    Translate { from: String, to: String },
}

impl TranslationRule {
    /// 解析单条翻译指令文本
    pub fn parse(text: &str) -> RspyResult<Self> {
        let directive = text.trim();

        if directive.starts_with("tr") || directive.starts_with('y') {
            let body = if directive.starts_with("tr") {
                &directive[2..]
            } else {
                &directive[1..]
            };
            let sep = body.chars().next().ok_or_else(|| {
                RspydistError::InvalidInput(format!("翻译指令缺少分隔符：{}", directive))
            })?;
            let parts: Vec<&str> = body.split(sep).collect();
            if parts.len() < 3 {
                return Err(RspydistError::InvalidInput(format!(
                    "翻译指令格式非法：{}",
                    directive
                )));
            }
            let (from, to) = (parts[1], parts[2]);
            if from.chars().count() != to.chars().count() {
                return Err(RspydistError::InvalidInput(format!(
                    "转写指令两侧字符数不一致：{}",
                    directive
                )));
            }
            return Ok(Self::Translate {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        if let Some(body) = directive.strip_prefix('s') {
            let sep = body.chars().next().ok_or_else(|| {
                RspydistError::InvalidInput(format!("替换指令缺少分隔符：{}", directive))
            })?;
            // 没有这个检查，"s/foo" 也会被接受
            if !directive.ends_with(sep) || body.len() < 2 {
                return Err(RspydistError::InvalidInput(format!(
                    "替换指令格式非法：{}",
                    directive
                )));
            }
            let parts: Vec<&str> = body.split(sep).collect();
            if parts.len() < 3 {
                return Err(RspydistError::InvalidInput(format!(
                    "替换指令格式非法：{}",
                    directive
                )));
            }
            return Ok(Self::Substitute {
                pattern: parts[1].to_string(),
                replacement: parts[2].to_string(),
            });
        }

        Err(RspydistError::InvalidInput(format!(
            "未知翻译指令：{}",
            directive
        )))
    }

    /// 对上游版本串应用本条指令
    pub fn apply(&self, version: &str) -> RspyResult<String> {
        match self {
            Self::Substitute {
                pattern,
                replacement,
            } => {
                let regex = Regex::new(pattern).map_err(|e| {
                    RspydistError::InvalidInput(format!("替换模式编译失败：{}（{}）", pattern, e))
                })?;
                let converted = GROUP_REF_RE.replace_all(replacement, "$$$1");
                Ok(regex.replace_all(version, converted.as_ref()).into_owned())
            }
            Self::Translate { from, to } => {
                let mapping: HashMap<char, char> =
                    from.chars().zip(to.chars()).collect();
                Ok(version
                    .chars()
                    .map(|c| mapping.get(&c).copied().unwrap_or(c))
                    .collect())
            }
        }
    }
}

/// 按顺序应用全部翻译指令；standard 为真时追加 PEP386 预发布标记转换
pub fn translate_version(
    version: &str,
    rules: &[TranslationRule],
    standard: bool,
) -> RspyResult<String> {
    let mut result = version.to_string();
    for rule in rules {
        result = rule.apply(&result)?;
    }
    if standard {
        result = PEP386_ALPHA_RE.replace_all(&result, "~a$1").into_owned();
        result = PEP386_BETA_RE.replace_all(&result, "~b$1").into_owned();
        result = PEP386_RC_RE.replace_all(&result, "~c$1").into_owned();
        result = PEP386_SHORT_RE.replace_all(&result, "$1~$2$3").into_owned();
    }
    Ok(result)
}

/// 单条发行映射规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRule {
    /// 规范化后的Python发行名（连字符已转下划线）
    pub name: String,
    /// 可选的适用版本范围
    pub version_range: Option<VersionRange>,
    /// 目标发行依赖表达式（自由文本，如 "python3-foo (>= 1.2)"）
    pub dependency: String,
    /// PEP386 版本翻译语义标记
    pub standard: bool,
    /// 版本翻译指令序列
    pub translation_rules: Vec<TranslationRule>,
}

impl DistributionRule {
    /// 规则是否适用于指定版本（无范围视为全匹配）
    pub fn matches(&self, version: &Version) -> bool {
        match &self.version_range {
            Some(range) => range.contains(version),
            None => true,
        }
    }

    /// 用本条规则的指令翻译上游版本串
    pub fn translate(&self, version: &str) -> RspyResult<String> {
        translate_version(version, &self.translation_rules, self.standard)
    }
}

/// 规则表：规范化名 -> 有序规则列表
/// 同名多条规则按版本范围区分，查询返回首个匹配或首条记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleTable {
    entries: HashMap<String, Vec<DistributionRule>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条规则（同名规则保持录入顺序）
    pub fn insert(&mut self, rule: DistributionRule) {
        self.entries.entry(rule.name.clone()).or_default().push(rule);
    }

    /// 查询指定名称的全部规则
    pub fn lookup(&self, name: &str) -> Option<&[DistributionRule]> {
        self.entries.get(name).map(|rules| rules.as_slice())
    }

    /// 首条记录（名称解析用的"首条即胜"语义）
    pub fn first(&self, name: &str) -> Option<&DistributionRule> {
        self.entries.get(name).and_then(|rules| rules.first())
    }

    /// 首个版本范围匹配的规则，全部不匹配时退回首条
    pub fn lookup_in_range(
        &self,
        name: &str,
        version: &Version,
    ) -> Option<&DistributionRule> {
        let rules = self.entries.get(name)?;
        rules
            .iter()
            .find(|rule| rule.matches(version))
            .or_else(|| rules.first())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
