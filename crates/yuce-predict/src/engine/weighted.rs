//! 预测合成: 平均、显式单向/双向加权、直接复制.
//!
//! 所有函数按 PU 在 CU 缓冲内的亮度坐标定位各平面的块.

use yuce_core::pixel::{IF_INTERNAL_PREC, PIXEL_DEPTH};
use yuce_core::{ChromaFormat, PlaneMask, WeightParam};
use yuce_dsp::{BiWeight, PixelPrimitives, UniWeight};

use super::inter::PredictionUnit;
use super::yuv::{PredYuv, ShortYuv};

/// 14 bit 中间精度相对像素位深的额外位数
const SHIFT_NUM: u32 = IF_INTERNAL_PREC - PIXEL_DEPTH;

/// 单向加权内核参数
pub fn uni_weight(param: &WeightParam) -> UniWeight {
    let (weight, offset) = param.effective();
    let shift = param.log2_denom + SHIFT_NUM;
    UniWeight {
        w0: weight,
        round: if shift > 0 { 1 << (shift - 1) } else { 0 },
        shift,
        offset: offset << (PIXEL_DEPTH - 8),
    }
}

/// 双向加权内核参数, 两侧分母相同
pub fn bi_weight(p0: &WeightParam, p1: &WeightParam) -> BiWeight {
    let (w0, o0) = p0.effective();
    let (w1, o1) = p1.effective();
    let shift = p0.log2_denom + 1 + SHIFT_NUM;
    BiWeight {
        w0,
        w1,
        round: 1 << (shift - 1),
        shift,
        offset: (o0 + o1) << (PIXEL_DEPTH - 8),
    }
}

/// 参与运算的平面编号及其块尺寸
pub(crate) fn active_planes(
    planes: PlaneMask,
    format: ChromaFormat,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, usize, usize)> {
    let luma = planes.contains(PlaneMask::LUMA);
    let chroma = planes.contains(PlaneMask::CHROMA) && format.has_chroma();
    let (hs, vs) = format.chroma_shifts();
    (0..3).filter_map(move |plane| match plane {
        0 if luma => Some((0, width, height)),
        1 | 2 if chroma => Some((plane, width >> hs, height >> vs)),
        _ => None,
    })
}

/// 对中间精度预测做单向加权
pub(crate) fn weight_uni(
    kernels: &dyn PixelPrimitives,
    src: &ShortYuv,
    params: &[WeightParam; 3],
    pu: &PredictionUnit,
    dst: &mut PredYuv,
    planes: PlaneMask,
    format: ChromaFormat,
) {
    for (plane, w, h) in active_planes(planes, format, pu.width, pu.height) {
        kernels.weight_sp(
            &mut dst.block_mut(plane, pu.part_x, pu.part_y),
            src.block(plane, pu.part_x, pu.part_y),
            w,
            h,
            uni_weight(&params[plane]),
        );
    }
}

/// 两个中间精度预测的显式双向加权
#[allow(clippy::too_many_arguments)]
pub(crate) fn weight_bi(
    kernels: &dyn PixelPrimitives,
    src0: &ShortYuv,
    src1: &ShortYuv,
    params0: &[WeightParam; 3],
    params1: &[WeightParam; 3],
    pu: &PredictionUnit,
    dst: &mut PredYuv,
    planes: PlaneMask,
    format: ChromaFormat,
) {
    for (plane, w, h) in active_planes(planes, format, pu.width, pu.height) {
        kernels.weight_bi(
            &mut dst.block_mut(plane, pu.part_x, pu.part_y),
            src0.block(plane, pu.part_x, pu.part_y),
            src1.block(plane, pu.part_x, pu.part_y),
            w,
            h,
            bi_weight(&params0[plane], &params1[plane]),
        );
    }
}

/// 两个中间精度预测取平均
pub(crate) fn add_avg(
    kernels: &dyn PixelPrimitives,
    src0: &ShortYuv,
    src1: &ShortYuv,
    pu: &PredictionUnit,
    dst: &mut PredYuv,
    planes: PlaneMask,
    format: ChromaFormat,
) {
    for (plane, w, h) in active_planes(planes, format, pu.width, pu.height) {
        kernels.add_avg(
            &mut dst.block_mut(plane, pu.part_x, pu.part_y),
            src0.block(plane, pu.part_x, pu.part_y),
            src1.block(plane, pu.part_x, pu.part_y),
            w,
            h,
        );
    }
}

/// 复制单方向预测
pub(crate) fn copy_part(
    kernels: &dyn PixelPrimitives,
    src: &PredYuv,
    pu: &PredictionUnit,
    dst: &mut PredYuv,
    planes: PlaneMask,
    format: ChromaFormat,
) {
    for (plane, w, h) in active_planes(planes, format, pu.width, pu.height) {
        kernels.copy_pp(
            &mut dst.block_mut(plane, pu.part_x, pu.part_y),
            src.block(plane, pu.part_x, pu.part_y),
            w,
            h,
        );
    }
}
