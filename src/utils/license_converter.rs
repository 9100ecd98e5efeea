//! SPDX License 标识转换工具
//! Debian 风格下按重映射表转换，未收录的标识属终止性错误（查表，不猜测）

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::config::SpecStyle;
use crate::error::{RspyResult, RspydistError};

static SPDX_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Apache-1.1", "ASL 1.1"),
        ("Apache-2.0", "ASL 2.0"),
        ("BSD-3-Clause", "BSD"),
        ("GPL-1.0+", "GPL+"),
        ("GPL-2.0", "GPLv2"),
        ("GPL-2.0+", "GPLv2+"),
        ("GPL-3.0", "GPLv3"),
        ("GPL-3.0+", "GPLv3+"),
        ("LGPL-2.1", "LGPLv2.1"),
        ("LGPL-2.1+", "LGPLv2+"),
        ("LGPL-2.0", "LGPLv2 with exceptions"),
        ("LGPL-2.0+", "LGPLv2+ with exceptions"),
        ("LGPL-3.0", "LGPLv3"),
        ("LGPL-3.0+", "LGPLv3+"),
        ("MIT", "MIT with advertising"),
        ("MPL-1.0", "MPLv1.0"),
        ("MPL-1.1", "MPLv1.1"),
        ("MPL-2.0", "MPLv2.0"),
        ("Python-2.0", "Python"),
    ])
});

/// License转换工具
pub struct LicenseConverter;

impl LicenseConverter {
    /// 将SPDX标识转为目标风格的License文本
    pub fn convert(spdx: &str, style: SpecStyle) -> RspyResult<String> {
        match style {
            SpecStyle::Debian => SPDX_MAPPING
                .get(spdx)
                .map(|mapped| mapped.to_string())
                .ok_or_else(|| RspydistError::UnknownLicenseError(spdx.to_string())),
            // 其余风格直接使用SPDX标识
            _ => Ok(spdx.to_string()),
        }
    }
}
