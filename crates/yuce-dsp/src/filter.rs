//! HEVC 插值滤波器系数.

/// 亮度 8 抽头, 1/4 像素相位
pub const LUMA_FILTER: [[i16; 8]; 4] = [
    [0, 0, 0, 64, 0, 0, 0, 0],
    [-1, 4, -10, 58, 17, -5, 1, 0],
    [-1, 4, -11, 40, 40, -11, 4, -1],
    [0, 1, -5, 17, 58, -10, 4, -1],
];

/// 色度 4 抽头, 1/8 像素相位
pub const CHROMA_FILTER: [[i16; 4]; 8] = [
    [0, 64, 0, 0],
    [-2, 58, 10, -2],
    [-4, 54, 16, -2],
    [-6, 46, 28, -4],
    [-4, 36, 36, -4],
    [-4, 28, 46, -6],
    [-2, 16, 54, -4],
    [-2, 10, 58, -2],
];

/// 滤波器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Luma,
    Chroma,
}

impl FilterKind {
    /// 抽头数
    pub const fn taps(self) -> usize {
        match self {
            Self::Luma => 8,
            Self::Chroma => 4,
        }
    }

    /// 中心之前的抽头数 (taps / 2 - 1)
    pub const fn lead(self) -> usize {
        self.taps() / 2 - 1
    }

    /// 相位个数
    pub const fn phases(self) -> usize {
        match self {
            Self::Luma => 4,
            Self::Chroma => 8,
        }
    }

    /// 指定相位的系数
    pub fn coeffs(self, frac: usize) -> &'static [i16] {
        match self {
            Self::Luma => &LUMA_FILTER[frac],
            Self::Chroma => &CHROMA_FILTER[frac],
        }
    }
}
