//! 标量块运算: 复制、转换、平均、加权、SAD/SATD.

use byteorder::{ByteOrder, LittleEndian};
use yuce_core::pixel::{IF_INTERNAL_OFFS, IF_INTERNAL_PREC, PIXEL_DEPTH, PIXEL_MAX};
use yuce_core::{Pixel, clip_pixel};

use crate::view::{PlaneView, PlaneViewMut};
use crate::{BiWeight, UniWeight};

const P2S_SHIFT: u32 = IF_INTERNAL_PREC - PIXEL_DEPTH;

pub(super) fn copy_pp(dst: &mut PlaneViewMut<'_, Pixel>, src: PlaneView<'_, Pixel>, width: usize, height: usize) {
    for y in 0..height {
        dst.row_mut(y, width).copy_from_slice(src.row(y, width));
    }
}

pub(super) fn pixel_to_short(dst: &mut PlaneViewMut<'_, i16>, src: PlaneView<'_, Pixel>, width: usize, height: usize) {
    for y in 0..height {
        let s = src.row(y, width);
        for (d, &p) in dst.row_mut(y, width).iter_mut().zip(s) {
            *d = (((p as i32) << P2S_SHIFT) - IF_INTERNAL_OFFS) as i16;
        }
    }
}

pub(super) fn convert_plane_u8(
    dst: &mut PlaneViewMut<'_, Pixel>,
    src: &[u8],
    src_stride: usize,
    width: usize,
    height: usize,
    shift_left: u32,
) {
    for y in 0..height {
        let s = &src[y * src_stride..y * src_stride + width];
        for (d, &v) in dst.row_mut(y, width).iter_mut().zip(s) {
            *d = ((v as i32) << shift_left) as Pixel;
        }
    }
}

pub(super) fn convert_plane_u16le(
    dst: &mut PlaneViewMut<'_, Pixel>,
    src: &[u8],
    src_stride: usize,
    width: usize,
    height: usize,
    shift_right: u32,
    shift_left: u32,
) {
    for y in 0..height {
        let s = &src[y * src_stride..y * src_stride + width * 2];
        for (d, bytes) in dst.row_mut(y, width).iter_mut().zip(s.chunks_exact(2)) {
            let v = LittleEndian::read_u16(bytes) as i32;
            *d = (((v >> shift_right) << shift_left) & PIXEL_MAX) as Pixel;
        }
    }
}

pub(super) fn add_avg(
    dst: &mut PlaneViewMut<'_, Pixel>,
    src0: PlaneView<'_, i16>,
    src1: PlaneView<'_, i16>,
    width: usize,
    height: usize,
) {
    let shift = IF_INTERNAL_PREC + 1 - PIXEL_DEPTH;
    let offset = (1 << (shift - 1)) + 2 * IF_INTERNAL_OFFS;
    for y in 0..height {
        let a = src0.row(y, width);
        let b = src1.row(y, width);
        for ((d, &p0), &p1) in dst.row_mut(y, width).iter_mut().zip(a).zip(b) {
            *d = clip_pixel((p0 as i32 + p1 as i32 + offset) >> shift);
        }
    }
}

pub(super) fn pixel_avg(
    dst: &mut PlaneViewMut<'_, Pixel>,
    a: PlaneView<'_, Pixel>,
    b: PlaneView<'_, Pixel>,
    width: usize,
    height: usize,
) {
    for y in 0..height {
        let ra = a.row(y, width);
        let rb = b.row(y, width);
        for ((d, &p0), &p1) in dst.row_mut(y, width).iter_mut().zip(ra).zip(rb) {
            *d = ((p0 as u32 + p1 as u32 + 1) >> 1) as Pixel;
        }
    }
}

pub(super) fn weight_sp(
    dst: &mut PlaneViewMut<'_, Pixel>,
    src: PlaneView<'_, i16>,
    width: usize,
    height: usize,
    w: UniWeight,
) {
    for y in 0..height {
        let s = src.row(y, width);
        for (d, &v) in dst.row_mut(y, width).iter_mut().zip(s) {
            let x = v as i32 + IF_INTERNAL_OFFS;
            *d = clip_pixel(((w.w0 * x + w.round) >> w.shift) + w.offset);
        }
    }
}

pub(super) fn weight_pp(
    dst: &mut PlaneViewMut<'_, Pixel>,
    src: PlaneView<'_, Pixel>,
    width: usize,
    height: usize,
    w: UniWeight,
) {
    for y in 0..height {
        let s = src.row(y, width);
        for (d, &p) in dst.row_mut(y, width).iter_mut().zip(s) {
            let x = (p as i32) << P2S_SHIFT;
            *d = clip_pixel(((w.w0 * x + w.round) >> w.shift) + w.offset);
        }
    }
}

pub(super) fn weight_bi(
    dst: &mut PlaneViewMut<'_, Pixel>,
    src0: PlaneView<'_, i16>,
    src1: PlaneView<'_, i16>,
    width: usize,
    height: usize,
    w: BiWeight,
) {
    let offset = w.offset << (w.shift - 1);
    for y in 0..height {
        let a = src0.row(y, width);
        let b = src1.row(y, width);
        for ((d, &p0), &p1) in dst.row_mut(y, width).iter_mut().zip(a).zip(b) {
            let sum = w.w0 * (p0 as i32 + IF_INTERNAL_OFFS) + w.w1 * (p1 as i32 + IF_INTERNAL_OFFS);
            *d = clip_pixel((sum + w.round + offset) >> w.shift);
        }
    }
}

pub(super) fn sad(a: PlaneView<'_, Pixel>, b: PlaneView<'_, Pixel>, width: usize, height: usize) -> u32 {
    let mut sum = 0u32;
    for y in 0..height {
        for (&p0, &p1) in a.row(y, width).iter().zip(b.row(y, width)) {
            sum += (p0 as i32 - p1 as i32).unsigned_abs();
        }
    }
    sum
}

fn satd_4x4(a: PlaneView<'_, Pixel>, b: PlaneView<'_, Pixel>) -> u32 {
    let mut m = [[0i32; 4]; 4];
    for (y, row) in m.iter_mut().enumerate() {
        let ra = a.row(y, 4);
        let rb = b.row(y, 4);
        let d: [i32; 4] = std::array::from_fn(|x| ra[x] as i32 - rb[x] as i32);
        let t0 = d[0] + d[1];
        let t1 = d[0] - d[1];
        let t2 = d[2] + d[3];
        let t3 = d[2] - d[3];
        *row = [t0 + t2, t1 + t3, t0 - t2, t1 - t3];
    }
    let mut sum = 0u32;
    for x in 0..4 {
        let t0 = m[0][x] + m[1][x];
        let t1 = m[0][x] - m[1][x];
        let t2 = m[2][x] + m[3][x];
        let t3 = m[2][x] - m[3][x];
        sum += (t0 + t2).unsigned_abs()
            + (t1 + t3).unsigned_abs()
            + (t0 - t2).unsigned_abs()
            + (t1 - t3).unsigned_abs();
    }
    sum >> 1
}

pub(super) fn satd(a: PlaneView<'_, Pixel>, b: PlaneView<'_, Pixel>, width: usize, height: usize) -> u32 {
    debug_assert!(width % 4 == 0 && height % 4 == 0, "SATD 块尺寸必须是 4 的倍数");
    let mut sum = 0;
    for y in (0..height).step_by(4) {
        for x in (0..width).step_by(4) {
            let (dx, dy) = (x as isize, y as isize);
            sum += satd_4x4(a.shifted(dx, dy), b.shifted(dx, dy));
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_avg_of_p2s_is_identity() {
        let src: Vec<Pixel> = (0..64).map(|v| (v * 3) as Pixel).collect();
        let mut s0 = vec![0i16; 64];
        pixel_to_short(&mut PlaneViewMut::new(&mut s0, 0, 8), PlaneView::new(&src, 0, 8), 8, 8);
        let mut out = vec![0 as Pixel; 64];
        add_avg(
            &mut PlaneViewMut::new(&mut out, 0, 8),
            PlaneView::new(&s0, 0, 8),
            PlaneView::new(&s0, 0, 8),
            8,
            8,
        );
        assert_eq!(out, src, "同一预测的平均应还原像素");
    }

    #[test]
    fn test_satd_of_dc_difference() {
        let a = vec![10 as Pixel; 16];
        let b = vec![8 as Pixel; 16];
        // 常数差 2 只落在 DC 系数: 16 * 2 / 2
        let v = satd(PlaneView::new(&a, 0, 4), PlaneView::new(&b, 0, 4), 4, 4);
        assert_eq!(v, 16);
        assert_eq!(sad(PlaneView::new(&a, 0, 4), PlaneView::new(&b, 0, 4), 4, 4), 32);
    }

    #[test]
    fn test_convert_u16le_right_shift_and_mask() {
        let src = [0xFFu8, 0xFF, 0x00, 0x04];
        let mut out = vec![0 as Pixel; 2];
        convert_plane_u16le(&mut PlaneViewMut::new(&mut out, 0, 2), &src, 4, 2, 1, 8, 0);
        assert_eq!(out[0] as i32, 0xFF & PIXEL_MAX);
        assert_eq!(out[1] as i32, 4);
    }

    #[test]
    fn test_weight_bi_matches_explicit_formula() {
        let a: Vec<Pixel> = (0..64).map(|v| (v * 3 + 5) as Pixel).collect();
        let b: Vec<Pixel> = (0..64).map(|v| (250 - v * 2) as Pixel).collect();
        let mut s0 = vec![0i16; 64];
        let mut s1 = vec![0i16; 64];
        pixel_to_short(&mut PlaneViewMut::new(&mut s0, 0, 8), PlaneView::new(&a, 0, 8), 8, 8);
        pixel_to_short(&mut PlaneViewMut::new(&mut s1, 0, 8), PlaneView::new(&b, 0, 8), 8, 8);

        let denom = 6;
        let (w0, w1) = (90, 30);
        let (o0, o1) = (5 << (PIXEL_DEPTH - 8), 12 << (PIXEL_DEPTH - 8));
        let log2_wd = denom + P2S_SHIFT;
        let w = BiWeight {
            w0,
            w1,
            round: 1 << log2_wd,
            shift: log2_wd + 1,
            offset: o0 + o1,
        };
        let mut out = vec![0 as Pixel; 64];
        weight_bi(
            &mut PlaneViewMut::new(&mut out, 0, 8),
            PlaneView::new(&s0, 0, 8),
            PlaneView::new(&s1, 0, 8),
            8,
            8,
            w,
        );
        for i in 0..64 {
            let p0 = (a[i] as i32) << P2S_SHIFT;
            let p1 = (b[i] as i32) << P2S_SHIFT;
            let expect = clip_pixel((p0 * w0 + p1 * w1 + ((o0 + o1 + 1) << log2_wd)) >> (log2_wd + 1));
            assert_eq!(out[i], expect, "第 {i} 个采样");
        }
    }

    #[test]
    fn test_weight_pp_identity() {
        let src: Vec<Pixel> = (0..16).map(|v| (v * 7) as Pixel).collect();
        let mut out = vec![0 as Pixel; 16];
        let denom = 6;
        let w = UniWeight {
            w0: 1 << denom,
            round: (1 << (denom - 1)) << P2S_SHIFT,
            shift: denom + P2S_SHIFT,
            offset: 0,
        };
        weight_pp(&mut PlaneViewMut::new(&mut out, 0, 4), PlaneView::new(&src, 0, 4), 4, 4, w);
        assert_eq!(out, src, "权重 1 偏移 0 不改变像素");
    }
}
