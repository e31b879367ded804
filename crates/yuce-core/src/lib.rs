//! # yuce-core
//!
//! yuce 预测核心的基础库, 提供像素类型、色度格式、运动矢量、加权参数、
//! 配置、错误处理等公共定义.

pub mod bits;
pub mod config;
pub mod error;
pub mod format;
pub mod mem;
pub mod mv;
pub mod pixel;
pub mod weight;

// 重导出常用类型
pub use config::{EncoderConfig, SliceType};
pub use error::{YuceError, YuceResult};
pub use format::{ChromaFormat, PlaneMask};
pub use mv::MotionVector;
pub use pixel::{PIXEL_DEPTH, PIXEL_MAX, Pixel, clip_pixel};
pub use weight::{WeightParam, WeightTable};
