//! 名称解析模块：规则表查找、启发式退化与版本约束渲染
pub mod context;
pub mod resolver;

// 导出核心接口
pub use self::context::{ResolveContext, parse_epochs, parse_requirements};
pub use self::resolver::{NameResolver, VersionConstraint};
