//! 加权预测参数.

use std::fmt;

/// 每个参考列表的最大参考帧数
pub const MAX_NUM_REF: usize = 16;

/// 单个平面的加权参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightParam {
    /// 是否在片头中显式携带
    pub present: bool,
    /// 权重
    pub weight: i32,
    /// log2 分母, 同一列表内所有平面共享
    pub log2_denom: u32,
    /// 偏移 (8 bit 尺度)
    pub offset: i32,
}

impl Default for WeightParam {
    fn default() -> Self {
        Self::absent(0)
    }
}

impl WeightParam {
    /// 未启用的参数, 权重等于 1 << denom
    pub const fn absent(log2_denom: u32) -> Self {
        Self {
            present: false,
            weight: 1 << log2_denom,
            log2_denom,
            offset: 0,
        }
    }

    /// 显式参数
    pub const fn new(weight: i32, log2_denom: u32, offset: i32) -> Self {
        Self {
            present: true,
            weight,
            log2_denom,
            offset,
        }
    }

    /// 由权重和偏移设置参数
    ///
    /// `normalize` 为真时, 在权重超过 127 时同步缩小权重和分母.
    pub fn set_from_weight_and_offset(&mut self, weight: i32, offset: i32, log2_denom: u32, normalize: bool) {
        self.offset = offset;
        self.log2_denom = log2_denom;
        self.weight = weight;
        while normalize && self.log2_denom > 0 && self.weight > 127 {
            self.log2_denom -= 1;
            self.weight >>= 1;
        }
        self.weight = self.weight.min(127);
    }

    /// 实际生效的 (权重, 偏移)
    pub const fn effective(&self) -> (i32, i32) {
        if self.present {
            (self.weight, self.offset)
        } else {
            (1 << self.log2_denom, 0)
        }
    }

    /// 是否为恒等变换
    pub const fn is_identity(&self) -> bool {
        let (w, o) = self.effective();
        w == 1 << self.log2_denom && o == 0
    }
}

impl fmt::Display for WeightParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}/{}{:+}}}", self.weight, 1 << self.log2_denom, self.offset)
    }
}

/// 片级加权表 `[list][ref][plane]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    entries: [[[WeightParam; 3]; MAX_NUM_REF]; 2],
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            entries: [[[WeightParam::default(); 3]; MAX_NUM_REF]; 2],
        }
    }
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 某参考帧的三个平面参数
    pub fn get(&self, list: usize, ref_idx: usize) -> &[WeightParam; 3] {
        &self.entries[list][ref_idx]
    }

    pub fn get_mut(&mut self, list: usize, ref_idx: usize) -> &mut [WeightParam; 3] {
        &mut self.entries[list][ref_idx]
    }

    /// 列表中是否有任一参数启用
    pub fn any_present(&self, list: usize) -> bool {
        self.entries[list]
            .iter()
            .any(|planes| planes.iter().any(|w| w.present))
    }
}
