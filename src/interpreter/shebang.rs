//! shebang 行解析
//! 宽容解析：字段全部可缺失，解析不出的字段保持默认值

use once_cell::sync::Lazy;
use regex::Regex;

use super::identity::Interpreter;
use crate::version::Version;

// shebang 文法：[#!][路径前缀]("python"|"pypy")[版本][-dbg][尾部选项]
static SHEBANG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?:\#!\s*)?                  # shebang 前缀
        (?P<path>.*?/bin/.*?)?       # 路径前缀
        (?P<name>python|pypy)
        (?P<version>\d[.\d]*)?
        (?P<debug>-dbg)?
        (?P<options>.*)              # 尾部选项，原样保留
        ",
    )
    .expect("shebang正则编译失败")
});

/// 由解释器名与版本推断实现标识
pub(crate) fn implementation_for(name: &str, version: Option<&Version>) -> String {
    if name == "pypy" {
        return "pypy".to_string();
    }
    match version {
        Some(v) if v.major() >= 3 => "cpython3".to_string(),
        Some(_) => "cpython2".to_string(),
        None => String::new(),
    }
}

impl Interpreter {
    /// 从 shebang 行解析解释器标识
    /// 完全不命中文法时返回默认标识
    pub fn from_shebang(text: &str) -> Interpreter {
        let Some(caps) = SHEBANG_RE.captures(text.trim()) else {
            return Interpreter::default();
        };

        let mut builder = Interpreter::builder();
        if let Some(path) = caps.name("path") {
            builder = builder.path(path.as_str());
        }

        let name = caps["name"].to_string();
        builder = builder.name(&name);

        let version = caps
            .name("version")
            .and_then(|m| Version::parse(m.as_str()).ok());
        if let Some(v) = &version {
            builder = builder.version(v.clone());
        }

        builder = builder.debug(caps.name("debug").is_some());
        builder = builder.implementation(&implementation_for(&name, version.as_ref()));

        if let Some(options) = caps.name("options") {
            let tokens: Vec<String> = options
                .as_str()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            builder = builder.options(tokens);
        }

        builder.build()
    }
}
