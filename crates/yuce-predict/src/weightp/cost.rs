//! 加权估计的代价模型与简化运动补偿.
//!
//! 亮度在低分辨率平面上按 8x8 块计算, 色度在原始分辨率上计算.
//! 运动矢量全部来自前瞻分析的低分辨率搜索结果.

use yuce_core::bits::{size_se, size_ue};
use yuce_core::config::{LOWRES_CU_BITS, LOWRES_CU_SIZE};
use yuce_core::{ChromaFormat, MotionVector, Pixel, WeightParam};
use yuce_dsp::{FilterKind, PixelPrimitives, PlaneView, PlaneViewMut};
use yuce_picture::LowResFrame;

use crate::engine::{PlaneJob, mc_pixel, uni_weight};

/// 运动补偿允许越出平面的像素数
const MC_CLIP_MARGIN: i32 = 8;

/// 块代价的统计方式
#[derive(Debug, Clone, Copy)]
pub(crate) enum CostBlocks<'a> {
    /// 低分辨率亮度 8x8 块, 每块代价不超过该块的帧内代价
    Luma { intra_cost: &'a [i32], width_in_cu: usize },
    /// 色度正方形块
    Chroma { size: usize },
}

impl CostBlocks<'_> {
    pub fn chroma(format: ChromaFormat) -> Self {
        let size = if format == ChromaFormat::I444 { 16 } else { 8 };
        Self::Chroma { size }
    }
}

/// 片头中单个平面加权参数的信令代价
pub(crate) fn slice_header_cost(w: &WeightParam, lambda: u32, chroma: bool) -> u32 {
    // 色度在原始分辨率上计算代价, λ 放大 4 倍
    let lambda = if chroma { lambda * 4 } else { lambda };
    let denom_cost = size_ue(w.log2_denom) * (2 - chroma as u32);
    lambda * (10 + denom_cost + 2 * (size_se(w.weight) + size_se(w.offset)))
}

fn clip_block_mv(mv: MotionVector, x: usize, y: usize, width: usize, height: usize) -> MotionVector {
    let (x, y) = (x as i32, y as i32);
    let min = MotionVector::new((-x - MC_CLIP_MARGIN) << 2, (-y - MC_CLIP_MARGIN) << 2);
    let max = MotionVector::new(
        (width as i32 - x - 1 + MC_CLIP_MARGIN) << 2,
        (height as i32 - y - 1 + MC_CLIP_MARGIN) << 2,
    );
    mv.clipped(min, max)
}

/// 加权后参考与当前帧的块代价和
///
/// `weight` 为 `None` 时直接比较参考平面. 加权副本写入 `weight_buf`,
/// 宽度补齐到 16, 跨度与参考视图相同.
#[allow(clippy::too_many_arguments)]
pub(crate) fn weight_cost(
    kernels: &dyn PixelPrimitives,
    fenc: PlaneView<'_, Pixel>,
    fref: PlaneView<'_, Pixel>,
    weight_buf: &mut [Pixel],
    width: usize,
    height: usize,
    weight: Option<&WeightParam>,
    blocks: CostBlocks<'_>,
) -> u32 {
    let fref = match weight {
        Some(w) => {
            let stride = fref.stride();
            let padded = width.div_ceil(16) * 16;
            kernels.weight_pp(&mut PlaneViewMut::new(weight_buf, 0, stride), fref, padded, height, uni_weight(w));
            PlaneView::new(&weight_buf[..], 0, stride)
        }
        None => fref,
    };

    let block_cost = |x: usize, y: usize, size: usize| {
        let (x, y) = (x as isize, y as isize);
        kernels.satd(fref.shifted(x, y), fenc.shifted(x, y), size, size)
    };
    let mut cost = 0u32;
    match blocks {
        CostBlocks::Luma { intra_cost, width_in_cu } => {
            for y in (LOWRES_CU_SIZE..height).step_by(LOWRES_CU_SIZE) {
                for x in (LOWRES_CU_SIZE..width).step_by(LOWRES_CU_SIZE) {
                    let cu = (y >> LOWRES_CU_BITS) * width_in_cu + (x >> LOWRES_CU_BITS);
                    let satd = block_cost(x, y, LOWRES_CU_SIZE);
                    cost += satd.min(intra_cost[cu].max(0) as u32);
                }
            }
        }
        CostBlocks::Chroma { size } => {
            for y in (size..height).step_by(size) {
                for x in (size..width).step_by(size) {
                    cost += block_cost(x, y, size);
                }
            }
        }
    }
    cost
}

/// 按低分辨率 MV 对参考亮度做 8x8 块运动补偿, 结果以原点 0、参考跨度写入 `out`
pub(crate) fn mc_luma(kernels: &dyn PixelPrimitives, reference: &LowResFrame, mvs: &[MotionVector], out: &mut [Pixel]) {
    let stride = reference.stride();
    let (width, lines) = (reference.width(), reference.lines());
    let mut block = [0 as Pixel; LOWRES_CU_SIZE * LOWRES_CU_SIZE];
    let mut cu = 0;
    for y in (0..lines).step_by(LOWRES_CU_SIZE) {
        for x in (0..width).step_by(LOWRES_CU_SIZE) {
            let mv = clip_block_mv(mvs[cu], x, y, width, lines);
            let src = reference.lowres_mc(y * stride + x, mv, &mut block);
            let mut dst = PlaneViewMut::new(&mut *out, y * stride + x, stride);
            kernels.copy_pp(&mut dst, src, LOWRES_CU_SIZE, LOWRES_CU_SIZE);
            cu += 1;
        }
    }
}

/// 按低分辨率 MV 对参考色度平面做运动补偿
///
/// 每块对应 16x16 亮度区域, 即一个低分辨率块. MV 先放大到原始分辨率,
/// 再按子采样移位换算为色度 1/4 像素.
#[allow(clippy::too_many_arguments)]
pub(crate) fn mc_chroma(
    kernels: &dyn PixelPrimitives,
    src: PlaneView<'_, Pixel>,
    mvs: &[MotionVector],
    width_in_cu: usize,
    format: ChromaFormat,
    width: usize,
    height: usize,
    out: &mut [Pixel],
) {
    let (hs, vs) = format.chroma_shifts();
    let (bw, bh) = (16 >> hs, 16 >> vs);
    let stride = src.stride();
    let mut immed = [0i16; 16 * (16 + 3)];
    for y in (0..height).step_by(bh) {
        for x in (0..width).step_by(bw) {
            let cu = (y / bh) * width_in_cu + x / bw;
            let mv = clip_block_mv(mvs[cu].shl(1).shr(hs, vs), x, y, width, height);
            let job = PlaneJob {
                plane: 0,
                kind: FilterKind::Chroma,
                src: src.shifted(x as isize + (mv.x >> 2) as isize, y as isize + (mv.y >> 2) as isize),
                frac_x: ((mv.x & 3) << 1) as usize,
                frac_y: ((mv.y & 3) << 1) as usize,
                width: bw,
                height: bh,
            };
            let mut dst = PlaneViewMut::new(&mut *out, y * stride + x, stride);
            mc_pixel(kernels, &mut immed, &job, &mut dst);
        }
    }
}
