//! 编译扩展文件名解析
//! 区分三种 .so 后缀形态：稳定ABI（.abiN.so）、平台标签
//! （.<impl>-<两位版本><flags>[-<multiarch>].so）、裸 .so，外加 _d 调试标记

use once_cell::sync::Lazy;
use regex::Regex;

use super::identity::Interpreter;
use super::shebang::implementation_for;
use crate::version::Version;

static EXTFILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<name>.*?)
        (?:
            \.(?P<stableabi>abi\d+)          # 稳定ABI后缀
          | \.
            (?P<impl>cpython|pypy)
            -
            (?P<ver>\d{2})                   # 两位版本标签
            (?P<flags>[a-z]*)                # ABI标志位
            (?:-(?P<multiarch>[^/]*?))?      # multiarch 三元组
        )?
        (?P<debug>_d)?                       # 调试标记
        \.so$
        ",
    )
    .expect("扩展文件名正则编译失败")
});

/// 扩展文件名的结构化解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionTag {
    /// 去掉后缀标签的模块基名
    pub base: String,
    /// 稳定ABI标签（如 "abi3"）
    pub stable_abi: Option<String>,
    /// 实现家族（cpython/pypy 推断出的 cpython2/cpython3/pypy，可为空）
    pub implementation: String,
    /// 标签里的版本（两位数字，首位主版本、次位次版本）
    pub version: Option<Version>,
    /// ABI标志位原文
    pub flags: String,
    /// multiarch 三元组
    pub multiarch: Option<String>,
    /// 调试变体（_d 标记或 flags 含 d）
    pub debug: bool,
}

impl ExtensionTag {
    /// 解析编译扩展文件名；非 .so 文件返回 None
    pub fn parse(filename: &str) -> Option<Self> {
        let caps = EXTFILE_RE.captures(filename)?;

        let version = caps.name("ver").map(|m| {
            let digits = m.as_str().as_bytes();
            Version::from_parts(&[(digits[0] - b'0') as u32, (digits[1] - b'0') as u32])
        });

        let flags = caps
            .name("flags")
            .map_or(String::new(), |m| m.as_str().to_string());
        let debug = caps.name("debug").is_some() || flags.contains('d');

        let family = caps.name("impl").map_or("", |m| m.as_str());
        let implementation = if family == "pypy" {
            "pypy".to_string()
        } else if family == "cpython" {
            implementation_for("python", version.as_ref())
        } else {
            String::new()
        };

        Some(Self {
            base: caps["name"].to_string(),
            stable_abi: caps.name("stableabi").map(|m| m.as_str().to_string()),
            implementation,
            version,
            flags,
            multiarch: caps.name("multiarch").map(|m| m.as_str().to_string()),
            debug,
        })
    }

    /// 转为解释器标识
    pub fn interpreter(&self) -> Interpreter {
        let mut builder = Interpreter::builder()
            .debug(self.debug)
            .implementation(&self.implementation);
        if self.implementation == "pypy" {
            builder = builder.name("pypy");
        }
        if let Some(version) = &self.version {
            builder = builder.version(version.clone());
        }
        builder.build()
    }
}
