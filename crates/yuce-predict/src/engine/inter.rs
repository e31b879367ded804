//! 帧间运动补偿与预测合成.
//!
//! 单方向预测按 MV 的分数部分选择复制、单向滤波或两级滤波;
//! 双向预测按片类型与加权开关决定平均、显式加权或单侧预测.

use yuce_core::{MotionVector, Pixel, PlaneMask, SliceType, WeightParam, WeightTable};
use yuce_dsp::{FilterKind, PixelPrimitives, PlaneView, PlaneViewMut};
use yuce_picture::{PLANE_CB, PLANE_CR, PLANE_Y, PictureBuffer};

use super::PredictionEngine;
use super::weighted;
use super::yuv::{PredYuv, ShortYuv};

/// MV 允许超出图像边界的像素数
const MV_CLIP_MARGIN: i32 = 8;

/// 预测方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredList {
    L0,
    L1,
    /// 双向 (或按有效参考退化为单向)
    Bi,
}

impl PredList {
    fn single(self) -> Option<usize> {
        match self {
            Self::L0 => Some(0),
            Self::L1 => Some(1),
            Self::Bi => None,
        }
    }
}

/// 参考帧
#[derive(Debug, Clone, Copy)]
pub struct RefPicture<'a> {
    /// 显示顺序
    pub poc: i32,
    /// 重建图像, 边距须已扩展
    pub recon: &'a PictureBuffer,
}

/// 片级预测参数
#[derive(Debug, Clone, Copy)]
pub struct SliceContext<'a> {
    pub slice_type: SliceType,
    /// 显式加权单向预测 (P 片)
    pub weighted_pred: bool,
    /// 显式加权双向预测 (B 片)
    pub weighted_bipred: bool,
    pub ref_lists: [&'a [RefPicture<'a>]; 2],
    pub weights: &'a WeightTable,
}

/// 单个列表的运动信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionInfo {
    /// 参考下标, 负数表示该列表不参与预测
    pub ref_idx: i8,
    pub mv: MotionVector,
}

impl Default for MotionInfo {
    fn default() -> Self {
        Self::NONE
    }
}

impl MotionInfo {
    pub const NONE: Self = Self {
        ref_idx: -1,
        mv: MotionVector::ZERO,
    };

    pub const fn new(ref_idx: i8, mv: MotionVector) -> Self {
        Self { ref_idx, mv }
    }

    pub const fn is_valid(&self) -> bool {
        self.ref_idx >= 0
    }
}

/// 预测块
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionUnit {
    /// CTU 光栅地址
    pub cu_addr: usize,
    /// 块在 CTU 内的亮度偏移, 也是写入 CU 预测缓冲的位置
    pub part_x: usize,
    pub part_y: usize,
    pub width: usize,
    pub height: usize,
    pub motion: [MotionInfo; 2],
}

impl<'a> SliceContext<'a> {
    fn reference(&self, list: usize, motion: &MotionInfo) -> &'a PictureBuffer {
        debug_assert!(motion.is_valid(), "列表 {list} 没有有效参考");
        self.ref_lists[list][motion.ref_idx as usize].recon
    }

    fn weights_for(&self, list: usize, motion: &MotionInfo) -> &'a [WeightParam; 3] {
        self.weights.get(list, motion.ref_idx as usize)
    }

    /// 两个方向指向同一参考帧且 MV 相同, 双向预测可退化为 L0 单向
    fn is_identical_motion(&self, pu: &PredictionUnit) -> bool {
        if self.slice_type != SliceType::B || self.weighted_bipred {
            return false;
        }
        let [m0, m1] = &pu.motion;
        if !m0.is_valid() || !m1.is_valid() {
            return false;
        }
        let poc0 = self.ref_lists[0][m0.ref_idx as usize].poc;
        let poc1 = self.ref_lists[1][m1.ref_idx as usize].poc;
        poc0 == poc1 && m0.mv == m1.mv
    }
}

/// 将 MV 裁剪到块周围允许的范围
///
/// 水平范围 `[(-maxCU - 8 - x + 1) * 4, (picW + 8 - x - 1) * 4]`, 垂直同理.
pub fn clip_mv(mv: MotionVector, pic: &PictureBuffer, x: usize, y: usize) -> MotionVector {
    let (x, y) = (x as i32, y as i32);
    let min = MotionVector::new(
        (-(pic.max_cu_width() as i32) - MV_CLIP_MARGIN - x + 1) << 2,
        (-(pic.max_cu_height() as i32) - MV_CLIP_MARGIN - y + 1) << 2,
    );
    let max = MotionVector::new(
        (pic.width() as i32 + MV_CLIP_MARGIN - x - 1) << 2,
        (pic.height() as i32 + MV_CLIP_MARGIN - y - 1) << 2,
    );
    mv.clipped(min, max)
}

/// 单个平面的运动补偿任务
#[derive(Clone, Copy)]
pub(crate) struct PlaneJob<'r> {
    pub plane: usize,
    pub kind: FilterKind,
    /// 已按 MV 整数部分平移的源视图
    pub src: PlaneView<'r, Pixel>,
    pub frac_x: usize,
    pub frac_y: usize,
    pub width: usize,
    pub height: usize,
}

/// 按 PU 与裁剪后的 MV 生成各平面的源视图与分数相位
///
/// 色度 MV 在子采样方向上按 1/8 像素解释, 4:4:4 的 1/4 像素相位映射到偶数 1/8 相位.
fn plane_jobs<'r>(
    recon: &'r PictureBuffer,
    pu: &PredictionUnit,
    mv: MotionVector,
    planes: PlaneMask,
) -> [Option<PlaneJob<'r>>; 3] {
    let bu = recon.bu_index(pu.part_x, pu.part_y);
    let mut jobs = [None, None, None];
    if planes.contains(PlaneMask::LUMA) {
        let base = PlaneView::new(recon.plane(PLANE_Y), recon.luma_addr(pu.cu_addr, bu), recon.stride());
        jobs[PLANE_Y] = Some(PlaneJob {
            plane: PLANE_Y,
            kind: FilterKind::Luma,
            src: base.shifted((mv.x >> 2) as isize, (mv.y >> 2) as isize),
            frac_x: (mv.x & 3) as usize,
            frac_y: (mv.y & 3) as usize,
            width: pu.width,
            height: pu.height,
        });
    }
    if planes.contains(PlaneMask::CHROMA) && recon.format().has_chroma() {
        let (hs, vs) = (recon.hshift(), recon.vshift());
        let offset = recon.chroma_addr(pu.cu_addr, bu);
        let frac = |v: i32, s: u32| ((v & ((1 << (2 + s)) - 1)) << (1 - s)) as usize;
        for plane in [PLANE_CB, PLANE_CR] {
            let base = PlaneView::new(recon.plane(plane), offset, recon.chroma_stride());
            jobs[plane] = Some(PlaneJob {
                plane,
                kind: FilterKind::Chroma,
                src: base.shifted((mv.x >> (2 + hs)) as isize, (mv.y >> (2 + vs)) as isize),
                frac_x: frac(mv.x, hs),
                frac_y: frac(mv.y, vs),
                width: pu.width >> hs,
                height: pu.height >> vs,
            });
        }
    }
    jobs
}

/// 生成最终精度预测, `immed` 至少 `width * (height + taps - 1)`
pub(crate) fn mc_pixel(kernels: &dyn PixelPrimitives, immed: &mut [i16], job: &PlaneJob<'_>, dst: &mut PlaneViewMut<'_, Pixel>) {
    let PlaneJob {
        kind,
        src,
        frac_x,
        frac_y,
        width,
        height,
        ..
    } = *job;
    match (frac_x, frac_y) {
        (0, 0) => kernels.copy_pp(dst, src, width, height),
        (_, 0) => kernels.interp_hpp(kind, dst, src, width, height, frac_x),
        (0, _) => kernels.interp_vpp(kind, dst, src, width, height, frac_y),
        _ => {
            kernels.interp_hps(kind, &mut PlaneViewMut::new(immed, 0, width), src, width, height, frac_x, true);
            let tmp = PlaneView::new(immed, kind.lead() * width, width);
            kernels.interp_vsp(kind, dst, tmp, width, height, frac_y);
        }
    }
}

/// 生成 14 bit 中间精度预测
fn mc_short(kernels: &dyn PixelPrimitives, immed: &mut [i16], job: &PlaneJob<'_>, dst: &mut PlaneViewMut<'_, i16>) {
    let PlaneJob {
        kind,
        src,
        frac_x,
        frac_y,
        width,
        height,
        ..
    } = *job;
    match (frac_x, frac_y) {
        (0, 0) => kernels.pixel_to_short(dst, src, width, height),
        (_, 0) => kernels.interp_hps(kind, dst, src, width, height, frac_x, false),
        (0, _) => kernels.interp_vps(kind, dst, src, width, height, frac_y),
        _ => {
            kernels.interp_hps(kind, &mut PlaneViewMut::new(immed, 0, width), src, width, height, frac_x, true);
            let tmp = PlaneView::new(immed, kind.lead() * width, width);
            kernels.interp_vss(kind, dst, tmp, width, height, frac_y);
        }
    }
}

/// 解析参考帧并裁剪 MV
fn resolve<'r>(slice: &SliceContext<'r>, pu: &PredictionUnit, list: usize) -> (&'r PictureBuffer, MotionVector) {
    let motion = &pu.motion[list];
    let recon = slice.reference(list, motion);
    let (cu_x, cu_y) = recon.cu_pel_position(pu.cu_addr);
    (recon, clip_mv(motion.mv, recon, cu_x + pu.part_x, cu_y + pu.part_y))
}

#[allow(clippy::too_many_arguments)]
fn predict_uni_pixel(
    kernels: &dyn PixelPrimitives,
    immed: &mut [i16],
    slice: &SliceContext<'_>,
    pu: &PredictionUnit,
    list: usize,
    dst: &mut PredYuv,
    planes: PlaneMask,
) {
    let (recon, mv) = resolve(slice, pu, list);
    for job in plane_jobs(recon, pu, mv, planes).iter().flatten() {
        mc_pixel(kernels, immed, job, &mut dst.block_mut(job.plane, pu.part_x, pu.part_y));
    }
}

#[allow(clippy::too_many_arguments)]
fn predict_uni_short(
    kernels: &dyn PixelPrimitives,
    immed: &mut [i16],
    slice: &SliceContext<'_>,
    pu: &PredictionUnit,
    list: usize,
    dst: &mut ShortYuv,
    planes: PlaneMask,
) {
    let (recon, mv) = resolve(slice, pu, list);
    for job in plane_jobs(recon, pu, mv, planes).iter().flatten() {
        mc_short(kernels, immed, job, &mut dst.block_mut(job.plane, pu.part_x, pu.part_y));
    }
}

impl PredictionEngine {
    /// 帧间预测, 结果写入 `dst` 中 PU 对应的位置
    ///
    /// 单方向请求在启用显式加权时经中间精度加权, 否则直接生成最终精度预测.
    /// 双向请求按以下优先级合成:
    /// 1. 两侧有效且未启用加权双向: 平均
    /// 2. 两侧有效且 B 片启用加权双向: 显式双向加权
    /// 3. 单侧有效且 B 片启用加权双向: 该侧单向加权
    /// 4. P 片启用加权: L0 单向加权
    /// 5. 其余: 复制有效一侧
    pub fn motion_compensation(
        &mut self,
        slice: &SliceContext<'_>,
        pu: &PredictionUnit,
        dst: &mut PredYuv,
        list: PredList,
        planes: PlaneMask,
    ) {
        debug_assert!(pu.width % 4 == 0 && pu.height % 4 == 0, "块尺寸须为 4 的倍数");
        let kernels = self.kernels;
        let format = self.format;
        let s = &mut self.scratch;

        if let Some(l) = list.single() {
            if slice.weighted_pred {
                predict_uni_short(kernels, &mut s.immed, slice, pu, l, &mut s.pred_short[0], planes);
                let params = slice.weights_for(l, &pu.motion[l]);
                weighted::weight_uni(kernels, &s.pred_short[0], params, pu, dst, planes, format);
            } else {
                predict_uni_pixel(kernels, &mut s.immed, slice, pu, l, dst, planes);
            }
            return;
        }

        if slice.is_identical_motion(pu) {
            predict_uni_pixel(kernels, &mut s.immed, slice, pu, 0, dst, planes);
            return;
        }

        let [m0, m1] = pu.motion;
        let weighted_b = slice.weighted_bipred && slice.slice_type == SliceType::B;
        if m0.is_valid() && m1.is_valid() {
            for l in 0..2 {
                predict_uni_short(kernels, &mut s.immed, slice, pu, l, &mut s.pred_short[l], planes);
            }
            let [short0, short1] = &s.pred_short;
            if weighted_b {
                let p0 = slice.weights_for(0, &m0);
                let p1 = slice.weights_for(1, &m1);
                weighted::weight_bi(kernels, short0, short1, p0, p1, pu, dst, planes, format);
            } else {
                weighted::add_avg(kernels, short0, short1, pu, dst, planes, format);
            }
        } else if weighted_b {
            let Some(l) = pu.motion.iter().position(MotionInfo::is_valid) else {
                return;
            };
            predict_uni_short(kernels, &mut s.immed, slice, pu, l, &mut s.pred_short[l], planes);
            let params = slice.weights_for(l, &pu.motion[l]);
            weighted::weight_uni(kernels, &s.pred_short[l], params, pu, dst, planes, format);
        } else if slice.weighted_pred && slice.slice_type == SliceType::P {
            if m0.is_valid() {
                predict_uni_short(kernels, &mut s.immed, slice, pu, 0, &mut s.pred_short[0], planes);
                let params = slice.weights_for(0, &m0);
                weighted::weight_uni(kernels, &s.pred_short[0], params, pu, dst, planes, format);
            }
        } else if let Some(l) = pu.motion.iter().position(MotionInfo::is_valid) {
            predict_uni_pixel(kernels, &mut s.immed, slice, pu, l, &mut s.pred_yuv[l], planes);
            weighted::copy_part(kernels, &s.pred_yuv[l], pu, dst, planes, format);
        }
    }
}
