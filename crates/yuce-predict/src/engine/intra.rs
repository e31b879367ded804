//! 帧内角度预测.
//!
//! 参考采样按 `[角点, 第 1 个, ..., 第 2N 个]` 存放, 左侧自上而下, 上方自左而右.
//! 平滑版本对整条 L 形边界做 [1,2,1] 滤波, 32x32 平坦边界可改用强平滑的双线性插值.

use yuce_core::config::MAX_CU_SIZE;
use yuce_core::{ChromaFormat, PIXEL_DEPTH, Pixel};
use yuce_dsp::PlaneViewMut;

use super::PredictionEngine;
use super::scratch::{ANGULAR_MODES, INTRA_REF_LEN};

pub const PLANAR_IDX: u32 = 0;
pub const DC_IDX: u32 = 1;
pub const HOR_IDX: u32 = 10;
pub const VER_IDX: u32 = 26;

/// 与水平/垂直方向的最小角度差超过该阈值时使用平滑参考, 下标为 log2(宽) - 2
const INTRA_FILTER_THRESHOLD: [u32; 5] = [10, 7, 1, 0, 10];

/// 是否对该方向与块宽使用平滑参考
pub fn filter_decision(dir: u32, width: usize) -> bool {
    if dir == DC_IDX {
        return false;
    }
    let diff = dir.abs_diff(HOR_IDX).min(dir.abs_diff(VER_IDX));
    let size_idx = width.trailing_zeros() as usize - 2;
    diff > INTRA_FILTER_THRESHOLD[size_idx]
}

/// 当前块的相邻采样 (已完成不可用采样替换)
#[derive(Debug, Clone, Copy)]
pub struct IntraNeighbors<'a> {
    /// 左上角
    pub corner: Pixel,
    /// 上方及右上, 至少 2 倍块宽
    pub above: &'a [Pixel],
    /// 左侧及左下, 至少 2 倍块高, 自上而下
    pub left: &'a [Pixel],
}

fn load_refs(neighbors: &IntraNeighbors<'_>, len: usize, left: &mut [Pixel], above: &mut [Pixel]) {
    debug_assert!(neighbors.above.len() >= len && neighbors.left.len() >= len);
    left[0] = neighbors.corner;
    above[0] = neighbors.corner;
    left[1..=len].copy_from_slice(&neighbors.left[..len]);
    above[1..=len].copy_from_slice(&neighbors.above[..len]);
}

/// 对 L 形边界做 [1,2,1] 滤波, 两个端点保持不变
///
/// `left_len`/`above_len` 为不含角点的采样数.
#[allow(clippy::too_many_arguments)]
fn smooth_l_shape(
    left: &[Pixel],
    above: &[Pixel],
    left_len: usize,
    above_len: usize,
    border: &mut [Pixel],
    border_flt: &mut [Pixel],
    left_out: &mut [Pixel],
    above_out: &mut [Pixel],
) {
    let size = left_len + above_len + 1;
    for i in 0..left_len {
        border[i] = left[left_len - i];
    }
    border[left_len] = left[0];
    border[left_len + 1..size].copy_from_slice(&above[1..=above_len]);

    border_flt[0] = border[0];
    border_flt[size - 1] = border[size - 1];
    for i in 1..size - 1 {
        let sum = border[i - 1] as u32 + 2 * border[i] as u32 + border[i + 1] as u32 + 2;
        border_flt[i] = (sum >> 2) as Pixel;
    }

    for i in 0..left_len {
        left_out[left_len - i] = border_flt[i];
    }
    left_out[0] = border_flt[left_len];
    above_out[0] = border_flt[left_len];
    above_out[1..=above_len].copy_from_slice(&border_flt[left_len + 1..size]);
}

/// 32x32 平坦边界的强平滑判定
fn use_strong_smoothing(left: &[Pixel], above: &[Pixel], width: usize) -> bool {
    let threshold = 1 << (PIXEL_DEPTH - 5);
    let corner = left[0] as i32;
    let bottom_left = left[2 * width] as i32;
    let top_right = above[2 * width] as i32;
    (bottom_left + corner - 2 * left[width] as i32).abs() < threshold
        && (corner + top_right - 2 * above[width] as i32).abs() < threshold
}

/// 角点到远端的双线性插值
fn bilinear_refs(src: &[Pixel], out: &mut [Pixel], len: usize) {
    let shift = len.trailing_zeros();
    let corner = src[0] as i32;
    let end = src[len] as i32;
    for (i, o) in out.iter_mut().take(len).enumerate() {
        let i = i as i32;
        *o = ((((len as i32) - i) * corner + i * end + (1 << (shift - 1))) >> shift) as Pixel;
    }
    out[len] = src[len];
}

impl PredictionEngine {
    /// 载入亮度参考并生成平滑版本
    pub fn prepare_intra_references(&mut self, neighbors: &IntraNeighbors<'_>, width: usize, strong_smoothing: bool) {
        debug_assert!(width.is_power_of_two() && (4..=MAX_CU_SIZE).contains(&width));
        let len = 2 * width;
        let s = &mut self.scratch;
        load_refs(neighbors, len, &mut s.ref_left, &mut s.ref_above);

        if strong_smoothing && width == 32 && use_strong_smoothing(&s.ref_left, &s.ref_above, width) {
            bilinear_refs(&s.ref_left, &mut s.ref_left_flt, len);
            bilinear_refs(&s.ref_above, &mut s.ref_above_flt, len);
            return;
        }
        smooth_l_shape(
            &s.ref_left,
            &s.ref_above,
            len,
            len,
            &mut s.border,
            &mut s.border_flt,
            &mut s.ref_left_flt,
            &mut s.ref_above_flt,
        );
    }

    /// 亮度帧内预测, 参考须先经 [`Self::prepare_intra_references`] 载入
    pub fn predict_luma_angular(&self, dir: u32, dst: &mut PlaneViewMut<'_, Pixel>, width: usize) {
        let s = &self.scratch;
        let (left, above) = if filter_decision(dir, width) {
            (&s.ref_left_flt, &s.ref_above_flt)
        } else {
            (&s.ref_left, &s.ref_above)
        };
        let edge_filter = width <= 16 && dir != PLANAR_IDX;
        self.kernels.intra_pred(dst, left, above, dir, width, edge_filter);
    }

    /// 色度帧内预测
    ///
    /// 只有 4:4:4 按亮度规则平滑参考, 其余格式始终使用原始参考; 不做边界滤波.
    pub fn predict_chroma_angular(
        &mut self,
        neighbors: &IntraNeighbors<'_>,
        dir: u32,
        dst: &mut PlaneViewMut<'_, Pixel>,
        width: usize,
        height: usize,
    ) {
        debug_assert_eq!(width, height, "色度帧内块必须为正方形");
        let mut left = [0 as Pixel; INTRA_REF_LEN];
        let mut above = [0 as Pixel; INTRA_REF_LEN];
        load_refs(neighbors, 2 * width, &mut left, &mut above);

        if self.format == ChromaFormat::I444 && filter_decision(dir, width) {
            let mut left_flt = [0 as Pixel; INTRA_REF_LEN];
            let mut above_flt = [0 as Pixel; INTRA_REF_LEN];
            let s = &mut self.scratch;
            smooth_l_shape(
                &left,
                &above,
                2 * height,
                2 * width,
                &mut s.border,
                &mut s.border_flt,
                &mut left_flt,
                &mut above_flt,
            );
            self.kernels.intra_pred(dst, &left_flt, &above_flt, dir, width, false);
        } else {
            self.kernels.intra_pred(dst, &left, &above, dir, width, false);
        }
    }

    /// 生成模式 2..=34 的全部预测, 按模式顺序每块 `width * width` 连续存放
    pub fn predict_all_angular(&mut self, width: usize) -> &[Pixel] {
        let filtered_modes = (2u32..=34)
            .filter(|&mode| filter_decision(mode, width))
            .fold(0u64, |mask, mode| mask | (1 << mode));
        let s = &mut self.scratch;
        let block = width * width;
        self.kernels.intra_pred_all_angs(
            &mut s.all_angs[..ANGULAR_MODES * block],
            (s.ref_left.as_slice(), s.ref_above.as_slice()),
            (s.ref_left_flt.as_slice(), s.ref_above_flt.as_slice()),
            width,
            filtered_modes,
            width <= 16,
        );
        &s.all_angs[..ANGULAR_MODES * block]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize, start: u32, step: u32) -> Vec<Pixel> {
        (0..len as u32).map(|i| (start + i * step) as Pixel).collect()
    }

    fn predict(engine: &PredictionEngine, dir: u32, width: usize) -> Vec<Pixel> {
        let mut out = vec![0 as Pixel; width * width];
        engine.predict_luma_angular(dir, &mut PlaneViewMut::new(&mut out, 0, width), width);
        out
    }

    #[test]
    fn test_filter_decision_thresholds() {
        assert!(!filter_decision(DC_IDX, 8), "DC 从不平滑");
        assert!(!filter_decision(2, 4));
        assert!(filter_decision(2, 8));
        assert!(!filter_decision(11, 16));
        assert!(filter_decision(12, 16));
        assert!(filter_decision(11, 32));
        assert!(!filter_decision(HOR_IDX, 32));
        assert!(!filter_decision(VER_IDX, 32));
        assert!(!filter_decision(PLANAR_IDX, 4));
        assert!(filter_decision(PLANAR_IDX, 8));
        assert!(!filter_decision(PLANAR_IDX, 64), "64x64 阈值为 10");
        assert!(filter_decision(18, 64));
    }

    #[test]
    fn test_reference_smoothing_across_corner() {
        let mut engine = PredictionEngine::new(ChromaFormat::I420).unwrap();
        let above = vec![100 as Pixel; 8];
        let left = vec![20 as Pixel; 8];
        let neighbors = IntraNeighbors {
            corner: 60,
            above: &above,
            left: &left,
        };
        engine.prepare_intra_references(&neighbors, 4, true);
        let s = &engine.scratch;
        assert_eq!(s.ref_above_flt[0], 60, "角点 (20 + 120 + 100 + 2) >> 2");
        assert_eq!(s.ref_above_flt[1], ((60 + 200 + 100 + 2) >> 2) as Pixel);
        assert_eq!(s.ref_above_flt[2], 100);
        assert_eq!(s.ref_above_flt[8], 100, "端点保持不变");
        assert_eq!(s.ref_left_flt[1], ((60 + 40 + 20 + 2) >> 2) as Pixel);
        assert_eq!(s.ref_left_flt[8], 20);
    }

    #[test]
    fn test_strong_smoothing_uses_bilinear() {
        let mut engine = PredictionEngine::new(ChromaFormat::I420).unwrap();
        // 线性边界满足平坦判定
        let above = ramp(64, 41, 1);
        let left = ramp(64, 41, 1);
        let neighbors = IntraNeighbors {
            corner: 40,
            above: &above,
            left: &left,
        };
        engine.prepare_intra_references(&neighbors, 32, true);
        let s = &engine.scratch;
        for i in 0..=64usize {
            let expect = ((64 - i as i32) * 40 + i as i32 * 104 + 32) >> 6;
            assert_eq!(s.ref_above_flt[i] as i32, expect, "上方第 {i} 个");
        }

        let mut plain = PredictionEngine::new(ChromaFormat::I420).unwrap();
        let mut bumpy_above = above.clone();
        bumpy_above[31] = 200;
        let neighbors = IntraNeighbors {
            corner: 40,
            above: &bumpy_above,
            left: &left,
        };
        plain.prepare_intra_references(&neighbors, 32, true);
        let s = &plain.scratch;
        assert_eq!(
            s.ref_above_flt[32] as u32,
            (bumpy_above[30] as u32 + 2 * 200 + bumpy_above[32] as u32 + 2) >> 2,
            "不平坦时退回 [1,2,1] 平滑"
        );
    }

    #[test]
    fn test_vertical_edge_filter_for_small_blocks() {
        let mut engine = PredictionEngine::new(ChromaFormat::I420).unwrap();
        let above = vec![80 as Pixel; 16];
        let left = ramp(16, 84, 4);
        let neighbors = IntraNeighbors {
            corner: 80,
            above: &above,
            left: &left,
        };
        engine.prepare_intra_references(&neighbors, 8, false);
        let out = predict(&engine, VER_IDX, 8);
        for y in 0..8 {
            let expect = 80 + ((left[y] as i32 - 80) >> 1);
            assert_eq!(out[y * 8] as i32, expect, "第 {y} 行首列按左侧梯度修正");
            assert_eq!(out[y * 8 + 1], 80);
        }
    }

    #[test]
    fn test_chroma_smoothing_only_for_444() {
        let above = ramp(16, 10, 9);
        let mut left = vec![30 as Pixel; 16];
        left[1] = 90;
        let neighbors = IntraNeighbors {
            corner: 30,
            above: &above,
            left: &left,
        };
        let run = |format: ChromaFormat| {
            let mut engine = PredictionEngine::new(format).unwrap();
            let mut out = vec![0 as Pixel; 64];
            engine.predict_chroma_angular(&neighbors, 2, &mut PlaneViewMut::new(&mut out, 0, 8), 8, 8);
            out
        };
        let sub = run(ChromaFormat::I420);
        assert_eq!(sub[0], 90, "4:2:0 直接使用原始参考");
        let full = run(ChromaFormat::I444);
        assert_eq!(full[0], ((30 + 180 + 30 + 2) >> 2) as Pixel, "4:4:4 使用 [1,2,1] 平滑参考");
    }

    #[test]
    fn test_all_angular_matches_single_mode() {
        let mut engine = PredictionEngine::new(ChromaFormat::I420).unwrap();
        let above = ramp(16, 5, 7);
        let left = ramp(16, 200, 3);
        let neighbors = IntraNeighbors {
            corner: 120,
            above: &above,
            left: &left,
        };
        engine.prepare_intra_references(&neighbors, 8, true);
        let singles: Vec<Vec<Pixel>> = (2u32..=34).map(|mode| predict(&engine, mode, 8)).collect();
        let all = engine.predict_all_angular(8).to_vec();
        for (i, single) in singles.iter().enumerate() {
            assert_eq!(&all[i * 64..(i + 1) * 64], &single[..], "模式 {} 不一致", i + 2);
        }
    }
}
