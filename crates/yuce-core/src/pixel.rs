//! 内部像素类型与位深.
//!
//! 位深在编译期固定: 默认 8 bit (`u8`), 启用 `high-bit-depth` 特性时为 10 bit (`u16`).

/// 内部像素采样类型
#[cfg(not(feature = "high-bit-depth"))]
pub type Pixel = u8;

/// 内部像素采样类型
#[cfg(feature = "high-bit-depth")]
pub type Pixel = u16;

/// 内部像素位深
#[cfg(not(feature = "high-bit-depth"))]
pub const PIXEL_DEPTH: u32 = 8;

/// 内部像素位深
#[cfg(feature = "high-bit-depth")]
pub const PIXEL_DEPTH: u32 = 10;

/// 像素最大值
pub const PIXEL_MAX: i32 = (1 << PIXEL_DEPTH) - 1;

/// 插值中间结果精度 (bit)
pub const IF_INTERNAL_PREC: u32 = 14;

/// 插值滤波器系数精度 (bit)
pub const IF_FILTER_PREC: u32 = 6;

/// 中间结果偏移, 使 i16 中间值以 0 为中心
pub const IF_INTERNAL_OFFS: i32 = 1 << (IF_INTERNAL_PREC - 1);

/// 将整数裁剪到像素取值范围
#[inline]
pub fn clip_pixel(value: i32) -> Pixel {
    value.clamp(0, PIXEL_MAX) as Pixel
}
