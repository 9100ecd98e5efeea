//! 全局错误类型定义

use thiserror::Error;
use std::io::Error as IoError;
use serde_yaml::Error as YamlError;

#[derive(Error, Debug)]
pub enum RspydistError {
    // 规则相关错误
    #[error("规则行解析失败：{reason}（行：{line}，文件：{file}）")]
    RuleParseError {
        reason: String,
        line: String,
        file: String,
    },
    #[error("规则文件加载失败：{0}")]
    RuleLoadError(String),

    // 版本相关错误
    #[error("版本号格式非法：{0}")]
    VersionParseError(String),

    // License相关错误
    #[error("未知License标识：{0}")]
    UnknownLicenseError(String),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("YAML解析失败：{0}")]
    YamlError(#[from] YamlError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type RspyResult<T> = Result<T, RspydistError>;
