//! 色度格式与平面选择.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 色度采样格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChromaFormat {
    /// 仅亮度
    I400,
    /// 4:2:0
    #[default]
    I420,
    /// 4:2:2
    I422,
    /// 4:4:4
    I444,
}

impl ChromaFormat {
    /// 获取色度子采样移位 (log2_chroma_w, log2_chroma_h)
    ///
    /// 4:0:0 返回 (1, 1), 与 4:2:0 共用平面布局.
    pub const fn chroma_shifts(&self) -> (u32, u32) {
        match self {
            Self::I400 | Self::I420 => (1, 1),
            Self::I422 => (1, 0),
            Self::I444 => (0, 0),
        }
    }

    /// 水平色度移位
    pub const fn hshift(&self) -> u32 {
        self.chroma_shifts().0
    }

    /// 垂直色度移位
    pub const fn vshift(&self) -> u32 {
        self.chroma_shifts().1
    }

    /// 是否包含色度平面
    pub const fn has_chroma(&self) -> bool {
        !matches!(self, Self::I400)
    }
}

impl fmt::Display for ChromaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I400 => "i400",
            Self::I420 => "i420",
            Self::I422 => "i422",
            Self::I444 => "i444",
        };
        write!(f, "{name}")
    }
}

bitflags! {
    /// 需要处理的平面
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlaneMask: u8 {
        /// 亮度
        const LUMA = 0x01;
        /// 两个色度平面
        const CHROMA = 0x02;
    }
}
