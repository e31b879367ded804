//! 编码器配置与全局常量.

use serde::{Deserialize, Serialize};

use crate::error::{YuceError, YuceResult};

/// 最大 CTU 尺寸
pub const MAX_CU_SIZE: usize = 64;
/// CTU 最大划分深度
pub const MAX_CU_DEPTH: u32 = 4;
/// 最大连续 B 帧数
pub const BFRAME_MAX: usize = 16;
/// 低分辨率分析块尺寸
pub const LOWRES_CU_SIZE: usize = 8;
/// 低分辨率分析块尺寸的 log2
pub const LOWRES_CU_BITS: u32 = 3;

/// 片类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SliceType {
    #[default]
    I,
    P,
    B,
}

/// 编码器配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EncoderConfig {
    #[serde(default = "default_max_cu_size")]
    pub max_cu_size: usize,
    #[serde(default = "default_max_cu_depth")]
    pub max_cu_depth: u32,
    /// 最大连续 B 帧数
    #[serde(default = "default_bframes")]
    pub bframes: usize,
    /// P 片显式加权预测
    #[serde(default = "default_true")]
    pub weighted_pred: bool,
    /// B 片显式加权双向预测
    #[serde(default)]
    pub weighted_bipred: bool,
    /// 自适应量化 (决定低分辨率帧是否分配 AQ 数组)
    #[serde(default = "default_true")]
    pub adaptive_quant: bool,
    /// 32x32 强帧内平滑
    #[serde(default = "default_true")]
    pub strong_intra_smoothing: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_cu_size() -> usize {
    MAX_CU_SIZE
}

fn default_max_cu_depth() -> u32 {
    MAX_CU_DEPTH
}

fn default_bframes() -> usize {
    4
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_cu_size: default_max_cu_size(),
            max_cu_depth: default_max_cu_depth(),
            bframes: default_bframes(),
            weighted_pred: true,
            weighted_bipred: false,
            adaptive_quant: true,
            strong_intra_smoothing: true,
        }
    }
}

impl EncoderConfig {
    /// 检查配置合法性
    pub fn validate(&self) -> YuceResult<()> {
        if !self.max_cu_size.is_power_of_two() || !(16..=MAX_CU_SIZE).contains(&self.max_cu_size) {
            return Err(YuceError::InvalidArgument(format!(
                "CTU 尺寸必须是 16~{} 的 2 的幂, 实际 {}",
                MAX_CU_SIZE, self.max_cu_size
            )));
        }
        if self.max_cu_depth == 0 || self.max_cu_depth > MAX_CU_DEPTH {
            return Err(YuceError::InvalidArgument(format!(
                "CTU 划分深度超出范围: {}",
                self.max_cu_depth
            )));
        }
        if (self.max_cu_size >> self.max_cu_depth) < 4 {
            return Err(YuceError::InvalidArgument(format!(
                "最小块尺寸小于 4: size={}, depth={}",
                self.max_cu_size, self.max_cu_depth
            )));
        }
        if self.bframes > BFRAME_MAX {
            return Err(YuceError::InvalidArgument(format!(
                "连续 B 帧数超出上限 {}: {}",
                BFRAME_MAX, self.bframes
            )));
        }
        Ok(())
    }
}
