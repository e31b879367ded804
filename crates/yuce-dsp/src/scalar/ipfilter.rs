//! 标量可分离插值.
//!
//! 取整规则与 HEVC 参考实现一致:
//! - pp: `(sum + 32) >> 6` 并裁剪
//! - ps: `(sum - (8192 << s)) >> s`, s = 6 - (14 - depth)
//! - sp: `(sum + round + (8192 << 6)) >> (6 + 14 - depth)` 并裁剪
//! - ss: `sum >> 6`

use yuce_core::pixel::{IF_FILTER_PREC, IF_INTERNAL_OFFS, IF_INTERNAL_PREC, PIXEL_DEPTH};
use yuce_core::{Pixel, clip_pixel};

use crate::filter::FilterKind;
use crate::view::{PlaneView, PlaneViewMut};

const HEAD_ROOM: u32 = IF_INTERNAL_PREC - PIXEL_DEPTH;

#[inline]
fn dot<T: Copy + Into<i32>>(samples: &[T], coeffs: &[i16]) -> i32 {
    samples
        .iter()
        .zip(coeffs)
        .map(|(&s, &c)| s.into() * c as i32)
        .sum()
}

/// 水平滤波通用实现, `finish` 把累加和转换为输出采样
fn filter_horizontal<S, D>(
    kind: FilterKind,
    dst: &mut PlaneViewMut<'_, D>,
    src: PlaneView<'_, S>,
    width: usize,
    height: usize,
    frac: usize,
    finish: impl Fn(i32) -> D,
) where
    S: Copy + Into<i32>,
    D: Copy,
{
    let coeffs = kind.coeffs(frac);
    let taps = kind.taps();
    let lead = kind.lead() as isize;
    for y in 0..height {
        let row = src.row_from(-lead, y as isize, width + taps - 1);
        let out = dst.row_mut(y, width);
        for (x, o) in out.iter_mut().enumerate() {
            *o = finish(dot(&row[x..x + taps], coeffs));
        }
    }
}

/// 垂直滤波通用实现
fn filter_vertical<S, D>(
    kind: FilterKind,
    dst: &mut PlaneViewMut<'_, D>,
    src: PlaneView<'_, S>,
    width: usize,
    height: usize,
    frac: usize,
    finish: impl Fn(i32) -> D,
) where
    S: Copy + Into<i32>,
    D: Copy,
{
    let coeffs = kind.coeffs(frac);
    let lead = kind.lead() as isize;
    let mut column = [0i32; 8];
    for y in 0..height {
        let out = dst.row_mut(y, width);
        for (x, o) in out.iter_mut().enumerate() {
            for (i, c) in column.iter_mut().take(coeffs.len()).enumerate() {
                *c = src.at(x as isize, y as isize - lead + i as isize).into();
            }
            let sum: i32 = column
                .iter()
                .zip(coeffs)
                .map(|(&s, &c)| s * c as i32)
                .sum();
            *o = finish(sum);
        }
    }
}

pub(super) fn hpp(
    kind: FilterKind,
    dst: &mut PlaneViewMut<'_, Pixel>,
    src: PlaneView<'_, Pixel>,
    width: usize,
    height: usize,
    frac: usize,
) {
    let offset = 1 << (IF_FILTER_PREC - 1);
    filter_horizontal(kind, dst, src, width, height, frac, |sum| {
        clip_pixel((sum + offset) >> IF_FILTER_PREC)
    });
}

pub(super) fn hps(
    kind: FilterKind,
    dst: &mut PlaneViewMut<'_, i16>,
    src: PlaneView<'_, Pixel>,
    width: usize,
    height: usize,
    frac: usize,
    row_ext: bool,
) {
    let shift = IF_FILTER_PREC - HEAD_ROOM;
    let offset = -IF_INTERNAL_OFFS << shift;
    let (src, height) = if row_ext {
        (src.shifted(0, -(kind.lead() as isize)), height + kind.taps() - 1)
    } else {
        (src, height)
    };
    filter_horizontal(kind, dst, src, width, height, frac, |sum| {
        ((sum + offset) >> shift) as i16
    });
}

pub(super) fn vpp(
    kind: FilterKind,
    dst: &mut PlaneViewMut<'_, Pixel>,
    src: PlaneView<'_, Pixel>,
    width: usize,
    height: usize,
    frac: usize,
) {
    let offset = 1 << (IF_FILTER_PREC - 1);
    filter_vertical(kind, dst, src, width, height, frac, |sum| {
        clip_pixel((sum + offset) >> IF_FILTER_PREC)
    });
}

pub(super) fn vps(
    kind: FilterKind,
    dst: &mut PlaneViewMut<'_, i16>,
    src: PlaneView<'_, Pixel>,
    width: usize,
    height: usize,
    frac: usize,
) {
    let shift = IF_FILTER_PREC - HEAD_ROOM;
    let offset = -IF_INTERNAL_OFFS << shift;
    filter_vertical(kind, dst, src, width, height, frac, |sum| {
        ((sum + offset) >> shift) as i16
    });
}

pub(super) fn vsp(
    kind: FilterKind,
    dst: &mut PlaneViewMut<'_, Pixel>,
    src: PlaneView<'_, i16>,
    width: usize,
    height: usize,
    frac: usize,
) {
    let shift = IF_FILTER_PREC + HEAD_ROOM;
    let offset = (1 << (shift - 1)) + (IF_INTERNAL_OFFS << IF_FILTER_PREC);
    filter_vertical(kind, dst, src, width, height, frac, |sum| {
        clip_pixel((sum + offset) >> shift)
    });
}

pub(super) fn vss(
    kind: FilterKind,
    dst: &mut PlaneViewMut<'_, i16>,
    src: PlaneView<'_, i16>,
    width: usize,
    height: usize,
    frac: usize,
) {
    filter_vertical(kind, dst, src, width, height, frac, |sum| {
        (sum >> IF_FILTER_PREC) as i16
    });
}
