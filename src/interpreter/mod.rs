//! 解释器模块：标识模型、shebang 解析与扩展文件名解析
pub mod identity;
pub mod shebang;
pub mod extfile;

// 导出核心接口
pub use self::identity::{Interpreter, InterpreterBuilder};
pub use self::extfile::ExtensionTag;
