//! 半分辨率分析帧.
//!
//! 由原始图像降采样得到四个半像素平面, 并缓存前瞻分析产生的每块代价与运动矢量.
//! 每个并发帧槽位只分配一次, 之后每帧调用 [`LowResFrame::init`] 原地重置.

use log::debug;
use yuce_core::config::{LOWRES_CU_BITS, LOWRES_CU_SIZE};
use yuce_core::mem::try_vec;
use yuce_core::mv::MV_NOT_SEARCHED;
use yuce_core::{MotionVector, Pixel, SliceType, YuceError, YuceResult};
use yuce_dsp::{PlaneView, PlaneViewMut, primitives};

use crate::border::extend_plane;
use crate::picture::{PLANE_Y, PictureBuffer};

/// 代价未知
pub const COST_UNKNOWN: i32 = -1;

/// 帧内代价未计算
pub const INTRA_COST_UNKNOWN: i32 = i32::MAX;

/// 半分辨率帧
#[derive(Debug, Default)]
pub struct LowResFrame {
    width: usize,
    lines: usize,
    stride: usize,
    margin_x: usize,
    margin_y: usize,
    origin: usize,
    width_in_cu: usize,
    height_in_cu: usize,
    bframes: usize,

    /// 整像素, 水平半像素, 垂直半像素, 中心半像素
    planes: [Vec<Pixel>; 4],

    intra_cost: Vec<i32>,
    row_satds: Vec<Vec<i32>>,
    lowres_costs: Vec<Vec<u16>>,
    lowres_mvs: [Vec<Vec<MotionVector>>; 2],
    lowres_mv_costs: [Vec<Vec<i32>>; 2],
    propagate_cost: Vec<u16>,
    qp_aq_offset: Option<Vec<f64>>,
    inv_qscale_factor: Option<Vec<i32>>,
    qp_cutree_offset: Option<Vec<f64>>,

    pub slice_type: SliceType,
    /// 显示顺序
    pub frame_num: i32,
    pub is_keyframe: bool,
    pub scenecut: bool,
    pub last_minigop_bframe: bool,
    pub intra_calculated: bool,
    pub leading_bframes: usize,
    /// 整帧 SATD 代价, -1 表示未知
    pub satd_cost: i64,
    cost_est: Vec<i32>,
    weighted_cost_delta: Vec<i32>,
    intra_mbs: Vec<i32>,

    /// 每个平面的采样和
    pub wp_sum: [u64; 3],
    /// 每个平面的交流能量
    pub wp_ssd: [u64; 3],

    created: bool,
}

impl LowResFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按原始图像尺寸分配平面与所有每块数组
    pub fn create(&mut self, orig: &PictureBuffer, bframes: usize, adaptive_quant: bool) -> YuceResult<()> {
        if !orig.is_created() {
            return Err(YuceError::InvalidArgument("原始图像缓冲尚未创建".into()));
        }
        self.destroy();
        let result = self.allocate(orig, bframes, adaptive_quant);
        if result.is_err() {
            self.destroy();
        }
        result
    }

    fn allocate(&mut self, orig: &PictureBuffer, bframes: usize, adaptive_quant: bool) -> YuceResult<()> {
        self.width_in_cu = (orig.width() / 2).div_ceil(LOWRES_CU_SIZE);
        self.height_in_cu = (orig.height() / 2).div_ceil(LOWRES_CU_SIZE);
        self.width = self.width_in_cu << LOWRES_CU_BITS;
        self.lines = self.height_in_cu << LOWRES_CU_BITS;
        self.margin_x = orig.luma_margin_x();
        self.margin_y = orig.luma_margin_y();
        self.stride = (self.width + 2 * self.margin_x + 31) & !31;
        self.origin = self.margin_y * self.stride + self.margin_x;
        self.bframes = bframes;

        let plane_size = self.stride * (self.lines + 2 * self.margin_y);
        for plane in &mut self.planes {
            *plane = try_vec(plane_size, 0, "低分辨率平面")?;
        }

        let cu_count = self.cu_count();
        let dims = bframes + 2;
        self.intra_cost = try_vec(cu_count, INTRA_COST_UNKNOWN, "帧内代价")?;
        self.propagate_cost = try_vec(cu_count, 0, "传播代价")?;
        self.row_satds = Vec::with_capacity(dims * dims);
        self.lowres_costs = Vec::with_capacity(dims * dims);
        for _ in 0..dims * dims {
            self.row_satds.push(try_vec(self.height_in_cu, 0, "行 SATD")?);
            self.lowres_costs.push(try_vec(cu_count, 0, "低分辨率代价")?);
        }
        for list in 0..2 {
            self.lowres_mvs[list] = Vec::with_capacity(bframes + 1);
            self.lowres_mv_costs[list] = Vec::with_capacity(bframes + 1);
            for _ in 0..=bframes {
                self.lowres_mvs[list].push(try_vec(cu_count, MotionVector::ZERO, "低分辨率运动矢量")?);
                self.lowres_mv_costs[list].push(try_vec(cu_count, 0, "运动矢量代价")?);
            }
        }
        if adaptive_quant {
            self.qp_aq_offset = Some(try_vec(cu_count, 0.0, "AQ 偏移")?);
            self.inv_qscale_factor = Some(try_vec(cu_count, 0, "逆量化因子")?);
            self.qp_cutree_offset = Some(try_vec(cu_count, 0.0, "CU-tree 偏移")?);
        }
        self.cost_est = try_vec(dims * dims, COST_UNKNOWN, "代价估计")?;
        self.weighted_cost_delta = try_vec(dims, 0, "加权代价差")?;
        self.intra_mbs = try_vec(dims, 0, "帧内块计数")?;

        self.created = true;
        debug!(
            "低分辨率帧创建: {}x{}, stride={}, {} 个分析块, bframes={}",
            self.width, self.lines, self.stride, cu_count, bframes
        );
        Ok(())
    }

    /// 释放所有缓冲
    pub fn destroy(&mut self) {
        *self = Self::default();
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    /// 为新一帧重置状态并由 `orig` 生成四个平面
    pub fn init(&mut self, orig: &PictureBuffer, frame_num: i32, slice_type: SliceType) {
        debug_assert!(self.created, "低分辨率帧尚未创建");
        self.slice_type = slice_type;
        self.frame_num = frame_num;
        self.is_keyframe = false;
        self.scenecut = true;
        self.last_minigop_bframe = false;
        self.intra_calculated = false;
        self.leading_bframes = 0;
        self.satd_cost = -1;
        self.cost_est.fill(COST_UNKNOWN);
        self.weighted_cost_delta.fill(0);
        self.intra_mbs.fill(0);
        self.intra_cost.fill(INTRA_COST_UNKNOWN);
        self.wp_sum = [0; 3];
        self.wp_ssd = [0; 3];
        for row in &mut self.row_satds {
            row[0] = COST_UNKNOWN;
        }
        for list in &mut self.lowres_mvs {
            for mvs in list.iter_mut() {
                mvs[0] = MotionVector::not_searched();
            }
        }

        let [p0, p1, p2, p3] = &mut self.planes;
        let mut v0 = PlaneViewMut::new(p0, self.origin, self.stride);
        let mut v1 = PlaneViewMut::new(p1, self.origin, self.stride);
        let mut v2 = PlaneViewMut::new(p2, self.origin, self.stride);
        let mut v3 = PlaneViewMut::new(p3, self.origin, self.stride);
        primitives().frame_init_lowres_core(
            orig.plane_view(PLANE_Y),
            [&mut v0, &mut v1, &mut v2, &mut v3],
            self.width,
            self.lines,
        );
        for plane in &mut self.planes {
            extend_plane(plane, self.origin, self.stride, self.width, self.lines, self.margin_x, self.margin_y);
        }
    }

    /// 统计加权预测所需的每平面采样和与交流能量
    ///
    /// 亮度按 16x16 块, 色度按对应的子采样块, 覆盖补齐到 16 的整个图像区域.
    pub fn compute_weight_stats(&mut self, orig: &PictureBuffer) {
        let width = orig.width().div_ceil(16) * 16;
        let height = orig.height().div_ceil(16) * 16;
        let planes = if orig.format().has_chroma() { 3 } else { 1 };
        for plane in 0..planes {
            let (hs, vs) = if plane == PLANE_Y { (0, 0) } else { (orig.hshift(), orig.vshift()) };
            let (bw, bh): (usize, usize) = (16 >> hs, 16 >> vs);
            let shift = (bw * bh).trailing_zeros();
            let view = orig.plane_view(plane);
            let (mut total_sum, mut total_ssd) = (0u64, 0u64);
            for by in (0..height >> vs).step_by(bh) {
                for bx in (0..width >> hs).step_by(bw) {
                    let (mut sum, mut sqr) = (0u64, 0u64);
                    for y in 0..bh {
                        for &p in view.row_from(bx as isize, (by + y) as isize, bw) {
                            sum += p as u64;
                            sqr += p as u64 * p as u64;
                        }
                    }
                    total_sum += sum;
                    total_ssd += sqr - ((sum * sum) >> shift);
                }
            }
            self.wp_sum[plane] = total_sum;
            self.wp_ssd[plane] = total_ssd;
        }
    }

    /// 8x8 块的半像素运动补偿
    ///
    /// MV 以低分辨率 1/4 像素为单位. 半像素位置直接返回对应平面,
    /// 1/4 像素位置在 `buf` 中平均两个相邻半像素平面后返回.
    pub fn lowres_mc<'a>(&'a self, block_offset: usize, mv: MotionVector, buf: &'a mut [Pixel]) -> PlaneView<'a, Pixel> {
        if (mv.x | mv.y) & 1 != 0 {
            let mv_b = mv + MotionVector::new((mv.x & 1) * 2, (mv.y & 1) * 2);
            let a = self.half_pel_view(block_offset, mv);
            let b = self.half_pel_view(block_offset, mv_b);
            let mut out = PlaneViewMut::new(buf, 0, LOWRES_CU_SIZE);
            primitives().pixel_avg(&mut out, a, b, LOWRES_CU_SIZE, LOWRES_CU_SIZE);
            PlaneView::new(buf, 0, LOWRES_CU_SIZE)
        } else {
            self.half_pel_view(block_offset, mv)
        }
    }

    fn half_pel_view(&self, block_offset: usize, mv: MotionVector) -> PlaneView<'_, Pixel> {
        let hpel = ((mv.y & 2) | ((mv.x & 2) >> 1)) as usize;
        let offset = (self.origin + block_offset) as isize
            + (mv.x >> 2) as isize
            + (mv.y >> 2) as isize * self.stride as isize;
        PlaneView::new(&self.planes[hpel], offset as usize, self.stride)
    }

    // ========================================================================
    // 访问
    // ========================================================================

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn width_in_cu(&self) -> usize {
        self.width_in_cu
    }

    pub fn height_in_cu(&self) -> usize {
        self.height_in_cu
    }

    pub fn cu_count(&self) -> usize {
        self.width_in_cu * self.height_in_cu
    }

    pub fn bframes(&self) -> usize {
        self.bframes
    }

    /// 第 `hpel` 个平面以原点为基准的视图
    pub fn plane_view(&self, hpel: usize) -> PlaneView<'_, Pixel> {
        PlaneView::new(&self.planes[hpel], self.origin, self.stride)
    }

    pub fn intra_cost(&self) -> &[i32] {
        &self.intra_cost
    }

    pub fn intra_cost_mut(&mut self) -> &mut [i32] {
        &mut self.intra_cost
    }

    pub fn propagate_cost_mut(&mut self) -> &mut [u16] {
        &mut self.propagate_cost
    }

    /// 距离 `dist` (1 起) 的运动矢量, 下标为 dist - 1
    pub fn lowres_mvs(&self, list: usize, idx: usize) -> &[MotionVector] {
        &self.lowres_mvs[list][idx]
    }

    pub fn lowres_mvs_mut(&mut self, list: usize, idx: usize) -> &mut [MotionVector] {
        &mut self.lowres_mvs[list][idx]
    }

    pub fn lowres_mv_costs_mut(&mut self, list: usize, idx: usize) -> &mut [i32] {
        &mut self.lowres_mv_costs[list][idx]
    }

    /// 前瞻是否已在该距离上搜索过运动矢量
    pub fn has_searched(&self, list: usize, idx: usize) -> bool {
        self.lowres_mvs
            .get(list)
            .and_then(|l| l.get(idx))
            .is_some_and(|mvs| mvs[0].x != MV_NOT_SEARCHED)
    }

    pub fn row_satds(&self, b: usize, p0: usize) -> &[i32] {
        &self.row_satds[b * (self.bframes + 2) + p0]
    }

    pub fn row_satds_mut(&mut self, b: usize, p0: usize) -> &mut [i32] {
        let dims = self.bframes + 2;
        &mut self.row_satds[b * dims + p0]
    }

    pub fn lowres_costs_mut(&mut self, b: usize, p0: usize) -> &mut [u16] {
        let dims = self.bframes + 2;
        &mut self.lowres_costs[b * dims + p0]
    }

    pub fn cost_est(&self, b: usize, p0: usize) -> i32 {
        self.cost_est[b * (self.bframes + 2) + p0]
    }

    pub fn set_cost_est(&mut self, b: usize, p0: usize, cost: i32) {
        let dims = self.bframes + 2;
        self.cost_est[b * dims + p0] = cost;
    }

    pub fn weighted_cost_delta_mut(&mut self) -> &mut [i32] {
        &mut self.weighted_cost_delta
    }

    pub fn intra_mbs_mut(&mut self) -> &mut [i32] {
        &mut self.intra_mbs
    }

    /// 自适应量化数组 (AQ 偏移, 逆量化因子, CU-tree 偏移), 未启用时为 None
    pub fn aq_arrays(&self) -> Option<(&[f64], &[i32], &[f64])> {
        match (&self.qp_aq_offset, &self.inv_qscale_factor, &self.qp_cutree_offset) {
            (Some(a), Some(b), Some(c)) => Some((a, b, c)),
            _ => None,
        }
    }
}
