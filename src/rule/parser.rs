//! 规则文件行文法解析器
//! 每个非注释、非空行都必须命中文法，否则整体加载失败（快速失败，不跳行）

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{DistributionRule, RuleTable, TranslationRule};
use crate::error::{RspyResult, RspydistError};
use crate::version::VersionRange;

// 规则行文法：<名称> [<版本范围>] [<依赖表达式>] [; [PEP386] [<翻译指令>]]
static PYDIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<name>[A-Za-z][A-Za-z0-9_.\-]*)              # Python发行名
        \s*
        (?P<vrange>(?:-?\d\.\d+(?:-(?:\d\.\d+)?)?)?)     # 版本范围
        \s*
        (?P<dependency>(?:[a-z][^;]*)?)                  # 目标依赖表达式
        (?:                                              # 可选的版本翻译段
            ;\s*
            (?P<standard>PEP386)?                        # PEP386 模式
            \s*
            (?P<rules>(?:s|tr|y).*)?                     # 翻译指令
        )?$
        ",
    )
    .expect("规则行正则编译失败")
});

/// 规则行解析器
pub struct RuleParser;

impl RuleParser {
    /// 解析单条规则行
    pub fn parse_line(line: &str) -> RspyResult<DistributionRule> {
        let caps = PYDIST_RE.captures(line).ok_or_else(|| {
            RspydistError::InvalidInput("不符合规则行文法".to_string())
        })?;

        let name = caps["name"].to_string();
        let version_range =
            VersionRange::parse(caps.name("vrange").map_or("", |m| m.as_str()))?;
        let dependency = caps
            .name("dependency")
            .map_or("", |m| m.as_str())
            .trim()
            .to_string();
        let standard = caps.name("standard").is_some();

        let mut translation_rules = Vec::new();
        if let Some(rules_text) = caps.name("rules") {
            for piece in rules_text.as_str().split(';') {
                let piece = piece.trim();
                if piece.is_empty() {
                    continue;
                }
                translation_rules.push(TranslationRule::parse(piece)?);
            }
        }

        Ok(DistributionRule {
            name,
            version_range,
            dependency,
            standard,
            translation_rules,
        })
    }

    /// 解析整个规则文件内容为规则表
    /// source 仅用于错误信息定位（通常是文件路径）
    pub fn parse_table(content: &str, source: &str) -> RspyResult<RuleTable> {
        let mut table = RuleTable::new();
        for raw in content.lines() {
            let line = raw.trim_end_matches(['\r', '\n']);
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            let rule = Self::parse_line(line).map_err(|e| RspydistError::RuleParseError {
                reason: e.to_string(),
                line: line.to_string(),
                file: source.to_string(),
            })?;
            table.insert(rule);
        }
        Ok(table)
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn test_parse_line_with_range_and_dependency() {
        // 测试场景：带版本范围的完整规则行
        let rule =
            RuleParser::parse_line("requests 2.6-2.7 python-requests (>= 2.0.0)").unwrap();
        assert_eq!(rule.name, "requests");
        // 依赖段与原文逐字节一致
        assert_eq!(rule.dependency, "python-requests (>= 2.0.0)");
        let range = rule.version_range.unwrap();
        assert!(range.contains(&Version::parse("2.7").unwrap()));
        assert!(!range.contains(&Version::parse("3.0").unwrap()));
        assert!(!rule.standard);
        assert!(rule.translation_rules.is_empty());
    }

    #[test]
    fn test_parse_line_name_only() {
        let rule = RuleParser::parse_line("six").unwrap();
        assert_eq!(rule.name, "six");
        assert!(rule.version_range.is_none());
        assert!(rule.dependency.is_empty());
    }

    #[test]
    fn test_parse_line_with_translator() {
        // 测试场景：PEP386 标记 + 翻译指令序列
        let rule = RuleParser::parse_line(
            "zope.interface 3.0- python3-zope.interface; PEP386 s/-/~/; tr/_/+/",
        )
        .unwrap();
        assert_eq!(rule.name, "zope.interface");
        assert_eq!(rule.dependency, "python3-zope.interface");
        assert!(rule.standard);
        assert_eq!(rule.translation_rules.len(), 2);
        assert_eq!(rule.translate("1.0-a1").unwrap(), "1.0~a1");
    }

    #[test]
    fn test_parse_line_rejects_garbage() {
        // 测试场景：尾部无法归入任何字段的内容应判为文法失败
        assert!(RuleParser::parse_line("foo bar; Xunknown").is_err());
        assert!(RuleParser::parse_line("0leading-digit python-foo").is_err());
    }

    #[test]
    fn test_parse_table_skips_comments_and_blanks() {
        let content = "\
# 注释行
requests 2.6-2.7 python-requests (>= 2.0.0)

six python-six
";
        let table = RuleParser::parse_table(content, "cpython2_fallback").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.first("requests").unwrap().dependency,
            "python-requests (>= 2.0.0)"
        );
        assert_eq!(table.first("six").unwrap().dependency, "python-six");
    }

    #[test]
    fn test_parse_table_fails_fast_with_context() {
        // 测试场景：单条非法行导致整体失败，错误需携带行与来源文件
        let content = "six python-six\n??? !!!\n";
        let err = RuleParser::parse_table(content, "cpython3_fallback").unwrap_err();
        match err {
            RspydistError::RuleParseError { line, file, .. } => {
                assert_eq!(line, "??? !!!");
                assert_eq!(file, "cpython3_fallback");
            }
            other => panic!("期望 RuleParseError，实际：{:?}", other),
        }
    }

    #[test]
    fn test_same_name_rules_keep_listed_order() {
        let content = "foo 2.6-2.7 python-foo\nfoo 3.0- python3-foo\n";
        let table = RuleParser::parse_table(content, "test").unwrap();
        let rules = table.lookup("foo").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].dependency, "python-foo");
        assert_eq!(rules[1].dependency, "python3-foo");
    }
}
