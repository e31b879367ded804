//! 平面边距扩展.

use yuce_core::Pixel;

/// 用最近的有效采样填充平面四周边距
///
/// 先逐行复制左右两端采样, 再把首行和末行 (已含左右扩展) 复制到上下边距,
/// 因此四个角落等于最近的角点采样.
pub fn extend_plane(
    buf: &mut [Pixel],
    origin: usize,
    stride: usize,
    width: usize,
    height: usize,
    margin_x: usize,
    margin_y: usize,
) {
    debug_assert!(origin >= margin_y * stride + margin_x, "原点前缺少边距");
    for y in 0..height {
        let row = origin + y * stride;
        let left = buf[row];
        let right = buf[row + width - 1];
        buf[row - margin_x..row].fill(left);
        buf[row + width..row + width + margin_x].fill(right);
    }

    let line = width + 2 * margin_x;
    let top = origin - margin_x;
    for y in 1..=margin_y {
        buf.copy_within(top..top + line, top - y * stride);
    }
    let bottom = origin + (height - 1) * stride - margin_x;
    for y in 1..=margin_y {
        buf.copy_within(bottom..bottom + line, bottom + y * stride);
    }
}
