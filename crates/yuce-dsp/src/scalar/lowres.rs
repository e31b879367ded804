//! 低分辨率平面生成.

use yuce_core::Pixel;

use crate::view::{PlaneView, PlaneViewMut};

#[inline]
fn avg4(a: Pixel, b: Pixel, c: Pixel, d: Pixel) -> Pixel {
    let ab = (a as u32 + b as u32 + 1) >> 1;
    let cd = (c as u32 + d as u32 + 1) >> 1;
    ((ab + cd + 1) >> 1) as Pixel
}

/// 每个输出采样取 2x2 源采样的两级平均; 半像素平面分别向右、向下、向右下偏移一个源采样
pub(super) fn frame_init_lowres_core(
    src: PlaneView<'_, Pixel>,
    dst: [&mut PlaneViewMut<'_, Pixel>; 4],
    width: usize,
    height: usize,
) {
    let [d0, dh, dv, dc] = dst;
    for y in 0..height {
        let r0 = src.row(2 * y, 2 * width + 2);
        let r1 = src.row(2 * y + 1, 2 * width + 2);
        let r2 = src.row(2 * y + 2, 2 * width + 2);
        for x in 0..width {
            let (c0, c1, c2) = (2 * x, 2 * x + 1, 2 * x + 2);
            d0.set(x, y, avg4(r0[c0], r1[c0], r0[c1], r1[c1]));
            dh.set(x, y, avg4(r0[c1], r1[c1], r0[c2], r1[c2]));
            dv.set(x, y, avg4(r1[c0], r2[c0], r1[c1], r2[c1]));
            dc.set(x, y, avg4(r1[c1], r2[c1], r1[c2], r2[c2]));
        }
    }
}
