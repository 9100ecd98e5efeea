//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 目标打包风格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecStyle {
    Debian,
    Ubuntu,
}

impl Default for SpecStyle {
    fn default() -> Self {
        SpecStyle::Debian
    }
}

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 规则文件目录（每个解释器实现一个 <impl>_fallback 文件）
    pub pydist_dir: PathBuf,
    // 目标打包风格
    pub spec_style: SpecStyle,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            pydist_dir: PathBuf::from("pydist"),
            spec_style: SpecStyle::Debian,
            verbose: false,
        }
    }
}

/// 配置管理器（单例）
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn pydist_dir(mut self, dir: PathBuf) -> Self {
        self.config.pydist_dir = dir;
        self
    }

    pub fn spec_style(mut self, style: SpecStyle) -> Self {
        self.config.spec_style = style;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
