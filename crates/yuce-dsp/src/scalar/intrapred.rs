//! 标量帧内预测: Planar, DC, 角度 2..=34.

use yuce_core::config::MAX_CU_SIZE;
use yuce_core::{Pixel, clip_pixel};

use crate::view::PlaneViewMut;

const ANG_TABLE: [i32; 9] = [0, 2, 5, 9, 13, 17, 21, 26, 32];
const INV_ANG_TABLE: [i32; 9] = [0, 4096, 1638, 910, 630, 482, 390, 315, 256];

const REF_ORIGIN: usize = MAX_CU_SIZE;

pub(super) fn intra_pred(
    dst: &mut PlaneViewMut<'_, Pixel>,
    ref_left: &[Pixel],
    ref_above: &[Pixel],
    mode: u32,
    width: usize,
    edge_filter: bool,
) {
    debug_assert!(width.is_power_of_two() && (4..=MAX_CU_SIZE).contains(&width));
    debug_assert!(ref_left.len() > 2 * width && ref_above.len() > 2 * width);
    match mode {
        0 => planar(dst, ref_left, ref_above, width),
        1 => dc(dst, ref_left, ref_above, width, edge_filter),
        2..=34 => angular(dst, ref_left, ref_above, mode, width, edge_filter),
        _ => debug_assert!(false, "无效帧内模式 {mode}"),
    }
}

fn planar(dst: &mut PlaneViewMut<'_, Pixel>, left: &[Pixel], above: &[Pixel], width: usize) {
    let n = width as i32;
    let shift = width.trailing_zeros() + 1;
    let top_right = above[width + 1] as i32;
    let bottom_left = left[width + 1] as i32;
    for y in 0..width {
        let yi = y as i32;
        let row = dst.row_mut(y, width);
        for (x, out) in row.iter_mut().enumerate() {
            let xi = x as i32;
            let v = (n - 1 - xi) * left[y + 1] as i32
                + (xi + 1) * top_right
                + (n - 1 - yi) * above[x + 1] as i32
                + (yi + 1) * bottom_left
                + n;
            *out = (v >> shift) as Pixel;
        }
    }
}

fn dc(dst: &mut PlaneViewMut<'_, Pixel>, left: &[Pixel], above: &[Pixel], width: usize, edge_filter: bool) {
    let sum: i32 = above[1..=width]
        .iter()
        .chain(&left[1..=width])
        .map(|&p| p as i32)
        .sum();
    let dc_val = (sum + width as i32) >> (width.trailing_zeros() + 1);
    for y in 0..width {
        dst.row_mut(y, width).fill(dc_val as Pixel);
    }
    if edge_filter {
        dst.set(0, 0, ((above[1] as i32 + left[1] as i32 + 2 * dc_val + 2) >> 2) as Pixel);
        for x in 1..width {
            dst.set(x, 0, ((above[x + 1] as i32 + 3 * dc_val + 2) >> 2) as Pixel);
        }
        for y in 1..width {
            dst.set(0, y, ((left[y + 1] as i32 + 3 * dc_val + 2) >> 2) as Pixel);
        }
    }
}

fn angular(
    dst: &mut PlaneViewMut<'_, Pixel>,
    left: &[Pixel],
    above: &[Pixel],
    mode: u32,
    width: usize,
    edge_filter: bool,
) {
    let n = width as i32;
    let is_hor = mode < 18;
    let raw_angle = if is_hor { 10 - mode as i32 } else { mode as i32 - 26 };
    let abs_idx = raw_angle.unsigned_abs() as usize;
    let angle = raw_angle.signum() * ANG_TABLE[abs_idx];
    let inv_angle = INV_ANG_TABLE[abs_idx];

    let (main_src, side) = if is_hor { (left, above) } else { (above, left) };

    // ref_main[k] = main[REF_ORIGIN + k], k 可为负
    let mut main = [0 as Pixel; 3 * MAX_CU_SIZE + 1];
    if angle < 0 {
        main[REF_ORIGIN..=REF_ORIGIN + width].copy_from_slice(&main_src[..=width]);
        let last = (n * angle) >> 5;
        if last < -1 {
            let mut inv_sum = 128;
            let mut k = -1;
            while k > last {
                inv_sum += inv_angle;
                main[(REF_ORIGIN as i32 + k) as usize] = side[(inv_sum >> 8) as usize];
                k -= 1;
            }
        }
    } else {
        main[REF_ORIGIN..=REF_ORIGIN + 2 * width].copy_from_slice(&main_src[..=2 * width]);
    }
    let at = |k: i32| main[(REF_ORIGIN as i32 + k) as usize] as i32;

    let mut pred = [0 as Pixel; MAX_CU_SIZE * MAX_CU_SIZE];
    if angle == 0 {
        for k in 0..width {
            for l in 0..width {
                pred[k * width + l] = at(l as i32 + 1) as Pixel;
            }
        }
        if edge_filter {
            let corner = side[0] as i32;
            for k in 0..width {
                pred[k * width] = clip_pixel(at(1) + ((side[k + 1] as i32 - corner) >> 1));
            }
        }
    } else {
        let mut delta_pos = 0;
        for k in 0..width {
            delta_pos += angle;
            let delta_int = delta_pos >> 5;
            let delta_fract = delta_pos & 31;
            for l in 0..width {
                let base = l as i32 + delta_int;
                pred[k * width + l] = if delta_fract != 0 {
                    (((32 - delta_fract) * at(base + 1) + delta_fract * at(base + 2) + 16) >> 5) as Pixel
                } else {
                    at(base + 1) as Pixel
                };
            }
        }
    }

    for y in 0..width {
        let row = dst.row_mut(y, width);
        for (x, out) in row.iter_mut().enumerate() {
            *out = if is_hor { pred[x * width + y] } else { pred[y * width + x] };
        }
    }
}

pub(super) fn intra_pred_all_angs(
    dst: &mut [Pixel],
    raw: (&[Pixel], &[Pixel]),
    filtered: (&[Pixel], &[Pixel]),
    width: usize,
    filtered_modes: u64,
    edge_filter: bool,
) {
    let block = width * width;
    debug_assert!(dst.len() >= 33 * block);
    for mode in 2u32..=34 {
        let (left, above) = if filtered_modes & (1 << mode) != 0 { filtered } else { raw };
        let start = (mode as usize - 2) * block;
        let mut view = PlaneViewMut::new(&mut dst[start..start + block], 0, width);
        angular(&mut view, left, above, mode, width, edge_filter);
    }
}
