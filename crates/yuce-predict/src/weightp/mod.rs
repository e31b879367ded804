//! 显式加权预测参数估计.
//!
//! 对 P/B 片每个列表的参考 0, 依次为亮度、Cb、Cr 搜索 (权重, 偏移, 分母),
//! 使运动补偿后的块代价加上片头信令代价最小. 只有代价明显下降时才启用加权.
//!
//! 亮度代价在低分辨率平面上计算, 色度在原始分辨率上计算;
//! 运动矢量复用前瞻分析的低分辨率搜索结果.

mod cost;
mod stats;

use std::fmt::Write;

use log::{debug, log_enabled, warn};
use yuce_core::mem::try_vec;
use yuce_core::weight::MAX_NUM_REF;
use yuce_core::{PIXEL_DEPTH, Pixel, SliceType, WeightParam, WeightTable, YuceResult};
use yuce_dsp::{PixelPrimitives, PlaneView, primitives};
use yuce_picture::{LowResFrame, PLANE_Y, PictureBuffer};

use cost::{CostBlocks, mc_chroma, mc_luma, slice_header_cost, weight_cost};

pub use stats::WeightStats;

/// 前瞻固定 QP 对应的 λ
const LOOKAHEAD_LAMBDA: u32 = if PIXEL_DEPTH > 8 { 4 } else { 1 };
/// 搜索起点的分母
const INITIAL_DENOM: u32 = 7;
const SCALE_DIST: i32 = 4;
const OFFSET_DIST: i32 = 2;
/// 接受加权所需的最大代价比
const MAX_COST_RATIO: f32 = 0.998;

/// 参考帧
#[derive(Debug)]
pub struct WeightReference<'a> {
    pub poc: i32,
    /// 原始图像, 色度边距在首次用作运动补偿源时扩展
    pub orig: &'a mut PictureBuffer,
    pub lowres: &'a LowResFrame,
}

/// 待分析的片
#[derive(Debug, Clone, Copy)]
pub struct WeightSlice<'a> {
    pub slice_type: SliceType,
    pub poc: i32,
    /// 每个列表的参考帧数
    pub num_ref_idx: [usize; 2],
    /// 每个列表参考 0 在参考数组中的下标
    pub ref0: [usize; 2],
    /// 当前帧原始图像
    pub fenc: &'a PictureBuffer,
    /// 当前帧低分辨率数据, 须已调用 `compute_weight_stats`
    pub fenc_lowres: &'a LowResFrame,
}

/// 加权参数估计器
///
/// 工作缓冲按需增长并在多次分析间复用.
pub struct WeightEstimator {
    kernels: &'static dyn PixelPrimitives,
    lambda: u32,
    mc_buf: Vec<Pixel>,
    weight_buf: Vec<Pixel>,
}

impl Default for WeightEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WeightEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightEstimator")
            .field("kernels", &self.kernels.name())
            .field("lambda", &self.lambda)
            .field("scratch", &self.mc_buf.len())
            .finish()
    }
}

/// 单个平面的代价输入
struct PlaneInput<'a> {
    fenc: PlaneView<'a, Pixel>,
    fref: PlaneView<'a, Pixel>,
    width: usize,
    height: usize,
    blocks: CostBlocks<'a>,
}

impl PlaneInput<'_> {
    fn cost(&self, kernels: &dyn PixelPrimitives, buf: &mut [Pixel], weight: Option<&WeightParam>) -> u32 {
        weight_cost(kernels, self.fenc, self.fref, buf, self.width, self.height, weight, self.blocks)
    }
}

/// 平面均值与方差比的估计
#[derive(Debug, Clone, Copy, Default)]
struct PlaneGuess {
    scale: f32,
    fenc_mean: f32,
    ref_mean: f32,
}

impl PlaneGuess {
    fn new(fenc: &LowResFrame, reference: &LowResFrame, plane: usize, pixels: usize) -> Self {
        let ref_flat = (reference.wp_ssd[plane] == 0) as u64;
        let fenc_var = fenc.wp_ssd[plane] + ref_flat;
        let ref_var = reference.wp_ssd[plane] + ref_flat;
        let norm = pixels as f32 * (1 << (PIXEL_DEPTH - 8)) as f32;
        Self {
            scale: (fenc_var as f32 / ref_var as f32).sqrt(),
            fenc_mean: fenc.wp_sum[plane] as f32 / norm,
            ref_mean: reference.wp_sum[plane] as f32 / norm,
        }
    }

    /// 均值与方差都几乎不变, 无需加权
    fn is_unchanged(&self) -> bool {
        (self.ref_mean - self.fenc_mean).abs() < 0.5 && (1.0 - self.scale).abs() < 1.0 / 128.0
    }

    fn initial_scale(&self, denom: u32) -> i32 {
        (self.scale * (1 << denom) as f32 + 0.5) as i32
    }
}

impl WeightEstimator {
    pub fn new() -> Self {
        Self::with_kernels(primitives())
    }

    pub fn with_kernels(kernels: &'static dyn PixelPrimitives) -> Self {
        Self {
            kernels,
            lambda: LOOKAHEAD_LAMBDA,
            mc_buf: Vec::new(),
            weight_buf: Vec::new(),
        }
    }

    fn reserve_scratch(&mut self, len: usize) -> YuceResult<()> {
        if self.mc_buf.len() >= len {
            return Ok(());
        }
        let result = try_vec(len, 0, "加权估计运动补偿缓冲")
            .and_then(|mc| Ok((mc, try_vec(len, 0, "加权估计加权缓冲")?)));
        match result {
            Ok((mc, weighted)) => {
                self.mc_buf = mc;
                self.weight_buf = weighted;
                Ok(())
            }
            Err(err) => {
                self.mc_buf = Vec::new();
                self.weight_buf = Vec::new();
                Err(err)
            }
        }
    }

    /// 为片估计加权表
    ///
    /// I 片或工作缓冲分配失败时返回全部未启用的默认表.
    pub fn analyse(&mut self, slice: &WeightSlice<'_>, refs: &mut [WeightReference<'_>]) -> WeightTable {
        let mut table = WeightTable::default();
        let lists = match slice.slice_type {
            SliceType::I => return table,
            SliceType::P => 1,
            SliceType::B => 2,
        };

        let fenc = slice.fenc;
        let fenc_lowres = slice.fenc_lowres;
        let format = fenc.format();
        let (hs, vs) = format.chroma_shifts();
        let plane_count = if format.has_chroma() { 3 } else { 1 };

        let scratch = (fenc_lowres.stride() * fenc_lowres.lines()).max(fenc.chroma_stride() * (fenc.height() >> vs));
        if let Err(err) = self.reserve_scratch(scratch) {
            warn!("{err}, 本片不使用加权预测");
            return table;
        }
        let Self {
            kernels,
            lambda,
            mc_buf,
            weight_buf,
        } = self;
        let kernels: &dyn PixelPrimitives = *kernels;

        let w16 = fenc.width().div_ceil(16) * 16;
        let h16 = fenc.height().div_ceil(16) * 16;
        let pixels = [w16 * h16, (w16 * h16) >> (hs + vs), (w16 * h16) >> (hs + vs)];
        let chroma_width = ((fenc.width() >> 4) << 4) >> hs;
        let chroma_height = ((fenc.height() >> 4) << 4) >> vs;

        let mut luma_denom = INITIAL_DENOM;
        let mut chroma_denom = INITIAL_DENOM;
        for list in 0..lists {
            let reference = &mut refs[slice.ref0[list]];
            let diff_poc = (slice.poc - reference.poc).unsigned_abs() as usize;
            let mvs = ((1..=fenc_lowres.bframes() + 1).contains(&diff_poc)
                && fenc_lowres.has_searched(list, diff_poc - 1))
            .then(|| fenc_lowres.lowres_mvs(list, diff_poc - 1));
            // 色度运动补偿会读到边距, 首次作为补偿源时扩展
            if mvs.is_some() && reference.orig.ensure_chroma_extended() {
                debug!("参考帧 poc {} 色度边距扩展", reference.poc);
            }

            let mut guess = [PlaneGuess::default(); 3];
            for (plane, g) in guess.iter_mut().enumerate().take(plane_count) {
                *g = PlaneGuess::new(fenc_lowres, reference.lowres, plane, pixels[plane]);
            }

            // 两个色度的初始权重都要能用 7 bit 表示
            if list == 0 && plane_count == 3 {
                while chroma_denom > 0 {
                    let thresh = 127.0 / (1 << chroma_denom) as f32;
                    if guess[1].scale < thresh && guess[2].scale < thresh {
                        break;
                    }
                    chroma_denom -= 1;
                }
            }

            let mut weights = [
                WeightParam::absent(0),
                WeightParam::absent(chroma_denom),
                WeightParam::absent(chroma_denom),
            ];

            for plane in 0..plane_count {
                let denom = if plane == PLANE_Y { luma_denom } else { chroma_denom };
                if plane != PLANE_Y && !weights[PLANE_Y].present {
                    break;
                }
                let g = guess[plane];
                if g.is_unchanged() {
                    weights[plane] = WeightParam::absent(denom);
                    continue;
                }

                if plane == PLANE_Y {
                    weights[plane].set_from_weight_and_offset(g.initial_scale(denom), 0, denom, list == 0);
                } else {
                    let scale = g.initial_scale(denom).clamp(0, 255);
                    if scale > 127 {
                        continue;
                    }
                    weights[plane].weight = scale;
                }

                let input = if plane == PLANE_Y {
                    let fref = match mvs {
                        Some(mvs) => {
                            mc_luma(kernels, reference.lowres, mvs, mc_buf);
                            PlaneView::new(&mc_buf[..], 0, reference.lowres.stride())
                        }
                        None => reference.lowres.plane_view(0),
                    };
                    PlaneInput {
                        fenc: fenc_lowres.plane_view(0),
                        fref,
                        width: fenc_lowres.width(),
                        height: fenc_lowres.lines(),
                        blocks: CostBlocks::Luma {
                            intra_cost: fenc_lowres.intra_cost(),
                            width_in_cu: fenc_lowres.width_in_cu(),
                        },
                    }
                } else {
                    let src = reference.orig.plane_view(plane);
                    let fref = match mvs {
                        Some(mvs) => {
                            let width_in_cu = fenc_lowres.width_in_cu();
                            mc_chroma(kernels, src, mvs, width_in_cu, format, chroma_width, chroma_height, mc_buf);
                            PlaneView::new(&mc_buf[..], 0, src.stride())
                        }
                        None => src,
                    };
                    PlaneInput {
                        fenc: fenc.plane_view(plane),
                        fref,
                        width: chroma_width,
                        height: chroma_height,
                        blocks: CostBlocks::chroma(format),
                    }
                };

                let search = SearchParams {
                    start: weights[plane],
                    fallback_denom: denom,
                    guess: g,
                    chroma: plane != PLANE_Y,
                    reduce_denom: plane == PLANE_Y && list == 0,
                };
                weights[plane] = search_plane(kernels, *lambda, weight_buf, &input, &search);
            }

            if weights[0].present && weights[1].present != weights[2].present {
                if weights[1].present {
                    weights[2] = weights[1];
                } else {
                    weights[1] = weights[2];
                }
            }

            luma_denom = weights[0].log2_denom;
            chroma_denom = weights[1].log2_denom;
            *table.get_mut(list, 0) = weights;
            for ref_idx in 1..slice.num_ref_idx[list].min(MAX_NUM_REF) {
                *table.get_mut(list, ref_idx) = [
                    WeightParam::absent(luma_denom),
                    WeightParam::absent(chroma_denom),
                    WeightParam::absent(chroma_denom),
                ];
            }
        }
        table
    }
}

/// 单个平面的搜索起点
struct SearchParams {
    start: WeightParam,
    /// 不启用加权时使用的分母
    fallback_denom: u32,
    guess: PlaneGuess,
    chroma: bool,
    /// 结果权重为偶数时同步缩小分母
    reduce_denom: bool,
}

/// 在初始权重附近做局部搜索
fn search_plane(
    kernels: &dyn PixelPrimitives,
    lambda: u32,
    weight_buf: &mut [Pixel],
    input: &PlaneInput<'_>,
    params: &SearchParams,
) -> WeightParam {
    let not_present = WeightParam::absent(params.fallback_denom);
    let orig_score = input.cost(kernels, weight_buf, None);
    if orig_score == 0 {
        return not_present;
    }

    let PlaneGuess {
        fenc_mean, ref_mean, ..
    } = params.guess;
    let mut denom = params.start.log2_denom;
    let one = 1i32 << denom;
    let mut min_scale = params.start.weight;
    let mut min_off = 0;
    let mut min_score = orig_score;
    let mut found = false;

    let start_scale = (min_scale - SCALE_DIST).clamp(0, 127);
    let end_scale = (min_scale + SCALE_DIST).clamp(0, 127);
    for scale in start_scale..=end_scale {
        let delta = scale - one;
        if delta > 127 || delta <= -128 {
            continue;
        }
        let mut cur_scale = scale;
        let mut cur_offset = (fenc_mean - ref_mean * cur_scale as f32 / one as f32 + 0.5) as i32;
        if !(-128..=127).contains(&cur_offset) {
            // 偏移越界时固定偏移, 反推权重
            cur_offset = cur_offset.clamp(-128, 127);
            cur_scale = ((one as f32 * (fenc_mean - cur_offset as f32) / ref_mean + 0.5) as i32).clamp(0, 127);
        }

        let start_offset = (cur_offset - OFFSET_DIST).clamp(-128, 127);
        let end_offset = (cur_offset + OFFSET_DIST).clamp(-128, 127);
        for off in start_offset..=end_offset {
            let candidate = WeightParam::new(cur_scale, denom, off);
            let score = input.cost(kernels, weight_buf, Some(&candidate))
                + slice_header_cost(&candidate, lambda, params.chroma);
            if score < min_score {
                min_score = score;
                min_scale = cur_scale;
                min_off = off;
                found = true;
            }
            if min_off == start_offset && off != start_offset {
                break;
            }
        }
    }

    if params.reduce_denom && denom > 0 && min_scale & 1 == 0 {
        let shift = min_scale.trailing_zeros().min(denom);
        denom -= shift;
        min_scale >>= shift;
    }

    let trivial = min_scale == 1 << denom && min_off == 0;
    if !found || trivial || min_score as f32 / orig_score as f32 > MAX_COST_RATIO {
        not_present
    } else {
        WeightParam::new(min_scale, denom, min_off)
    }
}

/// 估计加权表并在调试日志中输出启用的参数
pub fn weight_analyse(
    estimator: &mut WeightEstimator,
    slice: &WeightSlice<'_>,
    refs: &mut [WeightReference<'_>],
) -> WeightTable {
    let table = estimator.analyse(slice, refs);
    if log_enabled!(log::Level::Debug) {
        if let Some(line) = describe_weights(slice.poc, slice.slice_type, &table) {
            debug!("{line}");
        }
    }
    table
}

/// 列出每个列表参考 0 启用的加权参数, 没有任何加权时返回 None
fn describe_weights(poc: i32, slice_type: SliceType, table: &WeightTable) -> Option<String> {
    let lists = match slice_type {
        SliceType::I => 0,
        SliceType::P => 1,
        SliceType::B => 2,
    };
    let mut line = format!("poc: {poc} weights:");
    let mut weighted = false;
    for list in 0..lists {
        let planes = table.get(list, 0);
        if !planes.iter().any(|w| w.present) {
            continue;
        }
        weighted = true;
        let _ = write!(line, " [L{list}:R0 ");
        for (name, w) in ["Y", "U", "V"].iter().zip(planes) {
            if w.present {
                let _ = write!(line, "{name}{w}");
            }
        }
        line.push(']');
    }
    weighted.then_some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{noise_planes, picture_from_planes};
    use yuce_core::{ChromaFormat, MotionVector};
    use yuce_picture::InputPicture;

    const W: usize = 128;
    const H: usize = 128;

    fn lowres_of(orig: &PictureBuffer, frame_num: i32) -> LowResFrame {
        let mut lowres = LowResFrame::new();
        lowres.create(orig, 2, false).unwrap();
        lowres.init(orig, frame_num, SliceType::P);
        lowres.compute_weight_stats(orig);
        lowres
    }

    /// 只扩展亮度边距的图像
    fn luma_extended(planes: [&[u8]; 3]) -> PictureBuffer {
        let mut pic = PictureBuffer::new();
        pic.create(W, H, ChromaFormat::I420, 64, 64, 4).unwrap();
        let input = InputPicture {
            planes,
            strides: [W, W / 2, W / 2],
            bit_depth: 8,
            format: ChromaFormat::I420,
        };
        pic.ingest(&input, (0, 0)).unwrap();
        pic.extend_luma_border();
        pic
    }

    fn brighter(planes: &[Vec<u8>; 3], delta: u8) -> [Vec<u8>; 3] {
        planes.clone().map(|p| p.into_iter().map(|v| v + delta).collect())
    }

    #[test]
    fn test_brightness_offset_detected() {
        let ref_planes = noise_planes(W, H, ChromaFormat::I420, 51);
        let fenc_planes = brighter(&ref_planes, 30);
        let fenc = picture_from_planes(W, H, ChromaFormat::I420, [&fenc_planes[0], &fenc_planes[1], &fenc_planes[2]]);
        let mut ref_orig = luma_extended([&ref_planes[0], &ref_planes[1], &ref_planes[2]]);
        let fenc_lowres = lowres_of(&fenc, 4);
        let ref_lowres = lowres_of(&ref_orig, 0);

        let slice = WeightSlice {
            slice_type: SliceType::P,
            poc: 4,
            num_ref_idx: [3, 0],
            ref0: [0, 0],
            fenc: &fenc,
            fenc_lowres: &fenc_lowres,
        };
        let mut estimator = WeightEstimator::new();
        let table = {
            let mut refs = [WeightReference {
                poc: 0,
                orig: &mut ref_orig,
                lowres: &ref_lowres,
            }];
            weight_analyse(&mut estimator, &slice, &mut refs)
        };
        assert!(!ref_orig.is_chroma_extended(), "没有前瞻运动矢量时不做运动补偿, 不扩展色度");

        let [y, u, v] = *table.get(0, 0);
        assert_eq!(y, WeightParam::new(1, 0, 30), "亮度: 偶数权重应约去分母");
        assert_eq!(u, WeightParam::new(64, 6, 30));
        assert_eq!(v, u);
        for ref_idx in 1..3 {
            let planes = table.get(0, ref_idx);
            assert!(planes.iter().all(|w| !w.present));
            assert_eq!(planes[0].log2_denom, 0, "亮度分母传播到其余参考");
            assert_eq!(planes[1].log2_denom, 6, "色度分母传播到其余参考");
        }
        assert!(!table.get(0, 3)[0].present);

        // 接受的参数至少降低 0.2% 的代价
        let kernels = primitives();
        let mut buf = vec![0 as Pixel; fenc_lowres.stride() * fenc_lowres.lines()];
        let input = PlaneInput {
            fenc: fenc_lowres.plane_view(0),
            fref: ref_lowres.plane_view(0),
            width: fenc_lowres.width(),
            height: fenc_lowres.lines(),
            blocks: CostBlocks::Luma {
                intra_cost: fenc_lowres.intra_cost(),
                width_in_cu: fenc_lowres.width_in_cu(),
            },
        };
        let baseline = input.cost(kernels, &mut buf, None);
        let weighted = input.cost(kernels, &mut buf, Some(&y)) + slice_header_cost(&y, LOOKAHEAD_LAMBDA, false);
        assert!((weighted as f64) < baseline as f64 * 0.998, "加权代价 {weighted} 基线 {baseline}");

        assert_eq!(
            describe_weights(4, SliceType::P, &table).as_deref(),
            Some("poc: 4 weights: [L0:R0 Y{1/1+30}U{64/64+30}V{64/64+30}]")
        );
    }

    #[test]
    fn test_searched_mvs_extend_reference_chroma() {
        let ref_planes = noise_planes(W, H, ChromaFormat::I420, 53);
        let fenc_planes = brighter(&ref_planes, 30);
        let fenc = picture_from_planes(W, H, ChromaFormat::I420, [&fenc_planes[0], &fenc_planes[1], &fenc_planes[2]]);
        let mut ref_orig = luma_extended([&ref_planes[0], &ref_planes[1], &ref_planes[2]]);
        let mut fenc_lowres = lowres_of(&fenc, 1);
        let ref_lowres = lowres_of(&ref_orig, 0);
        // 前瞻在距离 1 上得到全零运动矢量
        fenc_lowres.lowres_mvs_mut(0, 0).fill(MotionVector::ZERO);
        assert!(fenc_lowres.has_searched(0, 0));

        let slice = WeightSlice {
            slice_type: SliceType::P,
            poc: 1,
            num_ref_idx: [1, 0],
            ref0: [0, 0],
            fenc: &fenc,
            fenc_lowres: &fenc_lowres,
        };
        let mut estimator = WeightEstimator::new();
        let table = {
            let mut refs = [WeightReference {
                poc: 0,
                orig: &mut ref_orig,
                lowres: &ref_lowres,
            }];
            weight_analyse(&mut estimator, &slice, &mut refs)
        };
        assert!(ref_orig.is_chroma_extended(), "作为运动补偿源前应扩展参考色度边距");

        let [y, u, v] = *table.get(0, 0);
        assert_eq!(y, WeightParam::new(1, 0, 30), "零运动矢量补偿与直接比较结果一致");
        assert!(u.present && v.present);
        assert_eq!(u.offset, 30);
    }

    #[test]
    fn test_identical_frames_not_weighted() {
        let planes = noise_planes(W, H, ChromaFormat::I420, 61);
        let views = [planes[0].as_slice(), planes[1].as_slice(), planes[2].as_slice()];
        let fenc = picture_from_planes(W, H, ChromaFormat::I420, views);
        let mut ref_orig = picture_from_planes(W, H, ChromaFormat::I420, views);
        let fenc_lowres = lowres_of(&fenc, 2);
        let ref_lowres = lowres_of(&ref_orig, 0);
        let slice = WeightSlice {
            slice_type: SliceType::B,
            poc: 2,
            num_ref_idx: [1, 1],
            ref0: [0, 0],
            fenc: &fenc,
            fenc_lowres: &fenc_lowres,
        };
        let mut refs = [WeightReference {
            poc: 0,
            orig: &mut ref_orig,
            lowres: &ref_lowres,
        }];
        let table = WeightEstimator::new().analyse(&slice, &mut refs);
        for list in 0..2 {
            assert!(table.get(list, 0).iter().all(|w| !w.present), "列表 {list} 不应启用加权");
        }
        assert_eq!(table.get(0, 0)[0].log2_denom, INITIAL_DENOM);
        assert!(describe_weights(2, SliceType::B, &table).is_none());
    }

    #[test]
    fn test_zero_baseline_cost_not_weighted() {
        let ref_planes = noise_planes(W, H, ChromaFormat::I420, 71);
        let fenc_planes = brighter(&ref_planes, 20);
        let fenc = picture_from_planes(W, H, ChromaFormat::I420, [&fenc_planes[0], &fenc_planes[1], &fenc_planes[2]]);
        let mut ref_orig = picture_from_planes(W, H, ChromaFormat::I420, [&ref_planes[0], &ref_planes[1], &ref_planes[2]]);
        let mut fenc_lowres = lowres_of(&fenc, 1);
        // 帧内代价为 0 时每块代价上限为 0, 基线代价为 0
        fenc_lowres.intra_cost_mut().fill(0);
        let ref_lowres = lowres_of(&ref_orig, 0);
        let slice = WeightSlice {
            slice_type: SliceType::P,
            poc: 1,
            num_ref_idx: [1, 0],
            ref0: [0, 0],
            fenc: &fenc,
            fenc_lowres: &fenc_lowres,
        };
        let mut refs = [WeightReference {
            poc: 0,
            orig: &mut ref_orig,
            lowres: &ref_lowres,
        }];
        let table = WeightEstimator::new().analyse(&slice, &mut refs);
        let [y, u, v] = *table.get(0, 0);
        assert_eq!(y, WeightParam::absent(INITIAL_DENOM));
        assert!(!u.present && !v.present, "亮度未启用时不分析色度");
    }

    #[test]
    fn test_intra_slice_returns_default() {
        let planes = noise_planes(64, 64, ChromaFormat::I420, 3);
        let pic = picture_from_planes(64, 64, ChromaFormat::I420, [&planes[0], &planes[1], &planes[2]]);
        let lowres = lowres_of(&pic, 0);
        let slice = WeightSlice {
            slice_type: SliceType::I,
            poc: 0,
            num_ref_idx: [0, 0],
            ref0: [0, 0],
            fenc: &pic,
            fenc_lowres: &lowres,
        };
        let table = WeightEstimator::new().analyse(&slice, &mut []);
        assert_eq!(table, WeightTable::default());
    }
}
