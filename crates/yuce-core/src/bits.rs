//! Exp-Golomb 码长计算.
//!
//! 只计算 ue(v)/se(v) 的比特数, 用于估计片头加权表的信令代价.

/// ue(v) 码长
#[inline]
pub fn size_ue(value: u32) -> u32 {
    let v = value as u64 + 1;
    2 * (63 - v.leading_zeros()) + 1
}

/// se(v) 码长
#[inline]
pub fn size_se(value: i32) -> u32 {
    let mapped = if value > 0 {
        2 * value as i64 - 1
    } else {
        -2 * value as i64
    };
    size_ue(mapped as u32)
}
