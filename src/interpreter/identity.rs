//! 解释器标识模型与规范化渲染
//! 字段全部在构造期显式给定，构造后不可变

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::version::{Version, default_version};

/// 解释器标识
///
/// - path：二进制所在目录前缀，默认 /usr/bin/
/// - name：python 或 pypy，默认 python
/// - version：解释器版本，可缺失
/// - debug：是否 -dbg 变体
/// - implementation：cpython2 / cpython3 / pypy，可为空串
/// - options：shebang 尾部选项的原样token序列，不做二次解析
#[derive(Debug, Clone)]
pub struct Interpreter {
    pub path: String,
    pub name: String,
    pub version: Option<Version>,
    pub debug: bool,
    pub implementation: String,
    pub options: Vec<String>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self {
            path: "/usr/bin/".to_string(),
            name: "python".to_string(),
            version: None,
            debug: false,
            implementation: String::new(),
            options: Vec::new(),
        }
    }
}

/// 解释器标识构建器：未覆盖的字段取默认值
#[derive(Debug, Clone, Default)]
pub struct InterpreterBuilder {
    inner: Interpreter,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: &str) -> Self {
        self.inner.path = path.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.inner.name = name.to_string();
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.inner.version = Some(version);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.inner.debug = debug;
        self
    }

    pub fn implementation(mut self, implementation: &str) -> Self {
        self.inner.implementation = implementation.to_string();
        self
    }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.inner.options = options;
        self
    }

    pub fn build(self) -> Interpreter {
        self.inner
    }
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// 规范文本形式的统一出口
    /// consider_default 为真时做默认版本感知：命中实现默认版本则省略版本后缀
    fn vstr(&self, version_override: Option<&Version>, consider_default: bool) -> String {
        if self.implementation == "pypy" {
            // 约定每个系统只分发一个 pypy 变体，永远渲染裸名
            return self.name.clone();
        }

        let effective = version_override.cloned().or_else(|| self.version.clone());
        let mut version_text = effective
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_default();

        if consider_default {
            let default = default_version(&self.implementation);
            if version_text.is_empty() || (effective.is_some() && effective == default) {
                version_text = if self.implementation == "cpython3" {
                    "3".to_string()
                } else {
                    String::new()
                };
            } else if effective == Some(Version::new(2)) {
                // 不提升 /usr/bin/python2
                version_text = String::new();
            }
        }

        if self.debug {
            format!("python{}-dbg", version_text)
        } else {
            format!("{}{}", self.name, version_text)
        }
    }

    /// 规范显示形式（可选的版本覆盖）
    pub fn render(&self, version_override: Option<&Version>) -> String {
        self.vstr(version_override, false)
    }

    /// 二进制完整路径
    pub fn binary(&self, version: Option<&Version>) -> String {
        let mut path = self.path.clone();
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        format!("{}{}", path, self.vstr(version, false))
    }

    /// 默认版本感知的二进制路径
    /// 版本与实现默认版本一致时指向不带版本后缀的符号链接
    pub fn binary_dv(&self) -> String {
        let mut path = self.path.clone();
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        format!("{}{}", path, self.vstr(None, true))
    }

    /// 本实现注册的默认版本
    pub fn default_version(&self) -> Option<Version> {
        default_version(&self.implementation)
    }
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}

// 文本相等：默认版本感知渲染结果一致即视为同一解释器引用
impl PartialEq for Interpreter {
    fn eq(&self, other: &Self) -> bool {
        self.binary_dv() == other.binary_dv()
    }
}

impl Eq for Interpreter {}

impl Hash for Interpreter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.binary_dv().hash(state);
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cpython2_major_only_render_roundtrip() {
        // 测试场景：cpython2 + Version(2)
        // binary_dv 不带版本后缀，binary 保留
        let interpreter = Interpreter::builder()
            .implementation("cpython2")
            .version(Version::new(2))
            .build();
        assert_eq!(interpreter.binary_dv(), "/usr/bin/python");
        assert_eq!(interpreter.binary(None), "/usr/bin/python2");
    }

    #[test]
    fn test_default_version_collapses_suffix() {
        // cpython3 默认版本渲染为 python3
        let interpreter = Interpreter::builder()
            .implementation("cpython3")
            .version(default_version("cpython3").unwrap())
            .build();
        assert_eq!(interpreter.binary_dv(), "/usr/bin/python3");
        // 非默认版本保留完整后缀
        let interpreter = Interpreter::builder()
            .implementation("cpython3")
            .version(Version::from_parts(&[3, 5]))
            .build();
        assert_eq!(interpreter.binary_dv(), "/usr/bin/python3.5");
        assert_eq!(interpreter.binary(None), "/usr/bin/python3.5");
    }

    #[test]
    fn test_pypy_always_bare() {
        let interpreter = Interpreter::builder()
            .name("pypy")
            .implementation("pypy")
            .version(Version::from_parts(&[7, 3]))
            .build();
        assert_eq!(interpreter.render(None), "pypy");
        assert_eq!(interpreter.binary_dv(), "/usr/bin/pypy");
    }

    #[test]
    fn test_debug_render() {
        let interpreter = Interpreter::builder()
            .implementation("cpython3")
            .version(Version::from_parts(&[3, 5]))
            .debug(true)
            .build();
        assert_eq!(interpreter.render(None), "python3.5-dbg");
        assert_eq!(interpreter.binary(None), "/usr/bin/python3.5-dbg");
    }

    #[test]
    fn test_version_override() {
        let interpreter = Interpreter::builder()
            .implementation("cpython3")
            .version(Version::from_parts(&[3, 5]))
            .build();
        let override_version = Version::from_parts(&[3, 9]);
        assert_eq!(
            interpreter.render(Some(&override_version)),
            "python3.9"
        );
    }

    #[test]
    fn test_textual_equality_and_dedup() {
        // 默认感知渲染一致即相等（版本写法不同也算同一引用）
        let a = Interpreter::builder()
            .implementation("cpython3")
            .version(default_version("cpython3").unwrap())
            .build();
        let b = Interpreter::builder().implementation("cpython3").build();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_binary_path_slash_normalized() {
        let interpreter = Interpreter::builder()
            .path("/usr/local/bin")
            .implementation("cpython3")
            .version(Version::from_parts(&[3, 5]))
            .build();
        assert_eq!(interpreter.binary(None), "/usr/local/bin/python3.5");
    }
}
