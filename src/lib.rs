//! rspydist - Python发行包名到Debian系打包依赖的解析核心
//! 规则表解析与缓存、名称映射、版本约束渲染、解释器标识解析

// 导出全局错误类型
pub use self::error::{RspydistError, RspyResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder, SpecStyle};

// 导出版本模型核心接口
pub use self::version::{Version, VersionRange, default_version};

// 导出规则模块核心接口
pub use self::rule::{
    DistributionRule, RuleTable, TranslationRule, translate_version,
    RuleParser, RuleLoader, RuleCache,
};

// 导出名称解析模块核心接口
pub use self::resolver::{
    NameResolver, VersionConstraint, ResolveContext,
    parse_epochs, parse_requirements,
};

// 导出解释器模块核心接口
pub use self::interpreter::{Interpreter, InterpreterBuilder, ExtensionTag};

// 导出工具模块核心接口
pub use self::utils::LicenseConverter;

// 声明所有子模块
pub mod config;
pub mod error;
pub mod version;
pub mod rule;
pub mod resolver;
pub mod interpreter;
pub mod utils;
