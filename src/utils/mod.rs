//! 工具模块：License转换等辅助能力
pub mod license_converter;

pub use self::license_converter::LicenseConverter;
