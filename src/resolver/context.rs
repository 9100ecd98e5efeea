//! 解析上下文：epoch 表与最低版本需求表等外部协作数据
//! 两张表均为预解析的简单键值结构，由调用方按需装载

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::RspyResult;

// 需求行文法：包名 + 可选的约束表达式（注释与空行忽略）
static REQUIREMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z0-9][A-Za-z0-9_.\-]*)\s*(?P<specs>.*)$")
        .expect("需求行正则编译失败")
});

/// 名称解析上下文
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// 目标解释器实现（cpython2/cpython3/pypy）
    pub implementation: String,
    /// 包名 -> epoch 整数
    pub epochs: HashMap<String, u32>,
    /// 包名 -> 最低版本号
    pub requirements: HashMap<String, String>,
}

impl ResolveContext {
    pub fn new(implementation: &str) -> Self {
        Self {
            implementation: implementation.to_string(),
            ..Self::default()
        }
    }

    pub fn with_epochs(mut self, epochs: HashMap<String, u32>) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_requirements(mut self, requirements: HashMap<String, String>) -> Self {
        self.requirements = requirements;
        self
    }
}

/// 解析 epoch YAML 文档（顶层 epochs 映射）
pub fn parse_epochs(text: &str) -> RspyResult<HashMap<String, u32>> {
    #[derive(Debug, Deserialize)]
    struct EpochFile {
        epochs: HashMap<String, u32>,
    }

    let parsed: EpochFile = serde_yaml::from_str(text)?;
    Ok(parsed.epochs)
}

/// 解析需求行，提取每个包名的 ">=" 下界版本
/// 行内 "#" 之后为注释；无 ">=" 约束的行只登记包名时跳过
pub fn parse_requirements<'a>(lines: impl IntoIterator<Item = &'a str>) -> HashMap<String, String> {
    let mut requirements = HashMap::new();

    for raw in lines {
        let line = match raw.split_once('#') {
            Some((before, _)) => before.trim(),
            None => raw.trim(),
        };
        if line.is_empty() {
            continue;
        }

        let Some(caps) = REQUIREMENT_RE.captures(line) else {
            continue;
        };
        let name = caps["name"].to_string();
        let specs = caps.name("specs").map_or("", |m| m.as_str());

        for spec in specs.split(',') {
            if let Some(version) = spec.trim().strip_prefix(">=") {
                requirements.insert(name.clone(), version.trim().to_string());
                break;
            }
        }
    }

    requirements
}
