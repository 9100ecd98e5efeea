//! 规则模块：负责规则文件的解析、加载、缓存与数据模型定义
pub mod model;
pub mod parser;
pub mod loader;
pub mod cache;

// 导出核心接口
pub use self::model::{
    DistributionRule, RuleTable, TranslationRule, translate_version,
};
pub use self::parser::RuleParser;
pub use self::loader::RuleLoader;
pub use self::cache::RuleCache;
