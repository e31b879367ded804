//! # yuce (预测)
//!
//! 纯 Rust 实现的 HEVC 编码器像素预测核心.
//!
//! - **图像缓冲**: 带边距的 YUV 平面、CTU/最小块地址表、外部图像导入
//! - **低分辨率帧**: 2:1 降采样与半像素平面, 前瞻分析代价缓存
//! - **预测引擎**: 帧内角度预测、帧间分像素运动补偿、平均与显式加权合成
//! - **加权估计**: 为 P/B 片搜索显式加权预测参数
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use yuce::core::ChromaFormat;
//! use yuce::picture::PictureBuffer;
//!
//! let mut pic = PictureBuffer::new();
//! pic.create(1920, 1088, ChromaFormat::I420, 64, 64, 4).unwrap();
//! println!("亮度跨度: {}", pic.stride());
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `yuce-core` | 像素类型、色度格式、运动矢量、加权参数、配置与错误 |
//! | `yuce-dsp` | 像素内核接口与标量实现 |
//! | `yuce-picture` | 图像缓冲与低分辨率帧 |
//! | `yuce-predict` | 预测引擎与加权参数估计 |

use anyhow::Context;

/// 核心类型与工具
pub use yuce_core as core;

/// 像素内核
pub use yuce_dsp as dsp;

/// 图像缓冲与低分辨率帧
pub use yuce_picture as picture;

/// 预测引擎与加权估计
pub use yuce_predict as predict;

pub mod logging;

/// 获取 yuce 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 从 JSON 解析编码器配置并检查合法性, 缺省字段使用默认值
pub fn config_from_json(json: &str) -> anyhow::Result<yuce_core::EncoderConfig> {
    let config: yuce_core::EncoderConfig = serde_json::from_str(json).context("解析编码器配置失败")?;
    config.validate().context("编码器配置不合法")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_config_from_json() {
        let config = config_from_json(r#"{"bframes": 3, "weighted_bipred": true}"#).unwrap();
        assert_eq!(config.bframes, 3);
        assert!(config.weighted_bipred);
        assert_eq!(config.max_cu_size, 64, "缺省字段使用默认值");

        assert!(config_from_json(r#"{"max_cu_size": 48}"#).is_err(), "非 2 的幂应被拒绝");
        assert!(config_from_json("{").is_err());
    }
}
