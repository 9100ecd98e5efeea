//! 版本模型：可解析、可比较的版本值与版本范围匹配
//! 组件数不同的版本按字典序比较，缺失的尾部组件排在存在的组件之前

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RspyResult, RspydistError};

static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(?:\.\d+)*$").expect("版本号正则编译失败")
});

/// 解释器或包的版本值（主版本 + 可选的次级组件）
/// 构造后不可变；Vec字典序即为规范比较顺序
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    components: Vec<u32>,
}

impl Version {
    /// 仅主版本号的版本（例如 Version::new(2) -> "2"）
    pub fn new(major: u32) -> Self {
        Self {
            components: vec![major],
        }
    }

    /// 从组件序列构造
    pub fn from_parts(parts: &[u32]) -> Self {
        Self {
            components: parts.to_vec(),
        }
    }

    /// 解析点分数字版本串（如 "3.5"、"2.7.18"）
    /// 不符合数字点分文法时返回 VersionParseError
    pub fn parse(text: &str) -> RspyResult<Self> {
        let trimmed = text.trim();
        if !VERSION_RE.is_match(trimmed) {
            return Err(RspydistError::VersionParseError(text.to_string()));
        }

        let mut components = Vec::new();
        for part in trimmed.split('.') {
            let value = part
                .parse::<u32>()
                .map_err(|_| RspydistError::VersionParseError(text.to_string()))?;
            components.push(value);
        }
        Ok(Self { components })
    }

    /// 主版本号
    pub fn major(&self) -> u32 {
        self.components[0]
    }

    /// 次版本号（缺失时为 None，区别于 0）
    pub fn minor(&self) -> Option<u32> {
        self.components.get(1).copied()
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }
}

impl FromStr for Version {
    type Err = RspydistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", text)
    }
}

/// 版本范围（下界含等，上界存在时含等、缺失时开放）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    pub lower: Option<Version>,
    pub upper: Option<Version>,
}

impl VersionRange {
    /// 双向开放的范围，匹配一切版本
    pub fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// 解析规则文件中的范围文法
    /// 支持四种形式："A-B"、"A-"（上界开放）、"-B"（下界开放）、"A"（精确匹配）
    /// 空串视为无范围，返回 Ok(None)
    pub fn parse(text: &str) -> RspyResult<Option<Self>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if let Some(rest) = trimmed.strip_prefix('-') {
            // "-B"：仅上界
            return Ok(Some(Self {
                lower: None,
                upper: Some(Version::parse(rest)?),
            }));
        }

        let range = match trimmed.split_once('-') {
            Some((low, "")) => Self {
                lower: Some(Version::parse(low)?),
                upper: None,
            },
            Some((low, high)) => Self {
                lower: Some(Version::parse(low)?),
                upper: Some(Version::parse(high)?),
            },
            None => {
                // 无横线即单点范围
                let exact = Version::parse(trimmed)?;
                Self {
                    lower: Some(exact.clone()),
                    upper: Some(exact),
                }
            }
        };
        Ok(Some(range))
    }

    /// 版本是否落在范围内
    pub fn contains(&self, version: &Version) -> bool {
        if let Some(lower) = &self.lower {
            if version < lower {
                return false;
            }
        }
        if let Some(upper) = &self.upper {
            if version > upper {
                return false;
            }
        }
        true
    }
}

/// 各解释器实现注册的默认版本（默认感知渲染用）
pub fn default_version(implementation: &str) -> Option<Version> {
    match implementation {
        "cpython2" => Some(Version::from_parts(&[2, 7])),
        "cpython3" => Some(Version::from_parts(&[3, 13])),
        _ => None,
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_versions() {
        assert_eq!(Version::parse("2").unwrap(), Version::new(2));
        assert_eq!(Version::parse("3.5").unwrap(), Version::from_parts(&[3, 5]));
        assert_eq!(
            Version::parse("2.7.18").unwrap(),
            Version::from_parts(&[2, 7, 18])
        );
    }

    #[test]
    fn test_parse_invalid_versions() {
        // 测试场景：非数字点分文法，应返回 VersionParseError
        for bad in ["", "abc", "1.", ".5", "1.2.x", "1..2", "-1"] {
            assert!(
                matches!(Version::parse(bad), Err(RspydistError::VersionParseError(_))),
                "应拒绝：{}",
                bad
            );
        }
    }

    #[test]
    fn test_ordering_absent_before_present() {
        // 测试场景：缺失的尾部组件排在存在的组件之前（2 < 2.0）
        assert!(Version::new(2) < Version::from_parts(&[2, 0]));
        assert!(Version::from_parts(&[2, 6]) < Version::from_parts(&[2, 7]));
        assert!(Version::from_parts(&[2, 7]) < Version::from_parts(&[3]));
        assert_eq!(Version::parse("3.5").unwrap(), Version::from_parts(&[3, 5]));
    }

    #[test]
    fn test_unbounded_range_contains_everything() {
        // 测试场景：双向开放范围对任意合法版本为真
        let range = VersionRange::unbounded();
        for v in ["1", "2.7", "3.13.1", "0.0.0"] {
            assert!(range.contains(&Version::parse(v).unwrap()));
        }
    }

    #[test]
    fn test_range_parse_forms() {
        // 闭区间
        let range = VersionRange::parse("2.6-2.7").unwrap().unwrap();
        assert!(range.contains(&Version::parse("2.6").unwrap()));
        assert!(range.contains(&Version::parse("2.7").unwrap()));
        assert!(!range.contains(&Version::parse("3.0").unwrap()));

        // 上界开放
        let range = VersionRange::parse("3.0-").unwrap().unwrap();
        assert!(range.contains(&Version::parse("3.13").unwrap()));
        assert!(!range.contains(&Version::parse("2.7").unwrap()));

        // 下界开放
        let range = VersionRange::parse("-3.0").unwrap().unwrap();
        assert!(range.contains(&Version::parse("2.6").unwrap()));
        assert!(!range.contains(&Version::parse("3.1").unwrap()));

        // 单点
        let range = VersionRange::parse("2.7").unwrap().unwrap();
        assert!(range.contains(&Version::parse("2.7").unwrap()));
        assert!(!range.contains(&Version::parse("2.7.1").unwrap()));

        // 空串无范围
        assert!(VersionRange::parse("  ").unwrap().is_none());
    }

    #[test]
    fn test_default_versions() {
        assert_eq!(
            default_version("cpython2"),
            Some(Version::from_parts(&[2, 7]))
        );
        assert!(default_version("pypy").is_none());
        assert!(default_version("").is_none());
    }

    #[test]
    fn test_display_roundtrip() {
        assert_eq!(Version::parse("3.13").unwrap().to_string(), "3.13");
        assert_eq!(Version::new(2).to_string(), "2");
    }
}
