//! 运动矢量.
//!
//! 亮度以 1/4 像素为单位; 4:2:0 色度按 1/8 像素解释.

use std::ops::{Add, Sub};

/// 运动矢量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MotionVector {
    pub x: i32,
    pub y: i32,
}

/// 低分辨率运动矢量 "尚未搜索" 哨兵 (写在 x 分量)
pub const MV_NOT_SEARCHED: i32 = 0x7FFF;

impl MotionVector {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 哨兵矢量
    pub const fn not_searched() -> Self {
        Self {
            x: MV_NOT_SEARCHED,
            y: 0,
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// 将两个分量分别裁剪到 [min, max]
    pub fn clipped(self, min: MotionVector, max: MotionVector) -> Self {
        Self {
            x: self.x.clamp(min.x, max.x),
            y: self.y.clamp(min.y, max.y),
        }
    }

    /// 两个分量左移
    pub const fn shl(self, bits: u32) -> Self {
        Self {
            x: self.x << bits,
            y: self.y << bits,
        }
    }

    /// 两个分量分别算术右移
    pub const fn shr(self, bits_x: u32, bits_y: u32) -> Self {
        Self {
            x: self.x >> bits_x,
            y: self.y >> bits_y,
        }
    }
}

impl Add for MotionVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for MotionVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipped() {
        let mv = MotionVector::new(-100, 300);
        let out = mv.clipped(MotionVector::new(-40, -40), MotionVector::new(40, 40));
        assert_eq!(out, MotionVector::new(-40, 40));
    }

    #[test]
    fn test_shr_is_arithmetic() {
        let mv = MotionVector::new(-3, 5).shr(1, 1);
        assert_eq!(mv, MotionVector::new(-2, 2), "负数右移应向下取整");
    }

    #[test]
    fn test_not_searched_sentinel() {
        assert_eq!(MotionVector::not_searched().x, 0x7FFF);
    }
}
