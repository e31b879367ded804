//! 预测流水线集成测试.
//!
//! 覆盖 导入 → 低分辨率帧 → 加权估计 → 帧间/帧内预测 的完整路径.

use yuce::core::{ChromaFormat, MotionVector, PIXEL_DEPTH, Pixel, PlaneMask, SliceType, WeightParam, WeightTable};
use yuce::dsp::PlaneViewMut;
use yuce::picture::{InputPicture, LowResFrame, PLANE_CB, PLANE_Y, PictureBuffer};
use yuce::predict::engine::VER_IDX;
use yuce::predict::{
    IntraNeighbors, MotionInfo, PredList, PredYuv, PredictionEngine, PredictionUnit, RefPicture, SliceContext,
    WeightEstimator, WeightReference, WeightSlice, WeightStats, weight_analyse,
};

const WIDTH: usize = 128;
const HEIGHT: usize = 128;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 取值 [16, 220) 的伪随机平面
fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            16 + ((state >> 16) % 204) as u8
        })
        .collect()
}

fn noise_planes(seed: u32) -> [Vec<u8>; 3] {
    let chroma = (WIDTH / 2) * (HEIGHT / 2);
    [noise(WIDTH * HEIGHT, seed), noise(chroma, seed + 1), noise(chroma, seed + 2)]
}

fn ingest(planes: &[Vec<u8>; 3]) -> PictureBuffer {
    let mut pic = PictureBuffer::new();
    pic.create(WIDTH, HEIGHT, ChromaFormat::I420, 64, 64, 4).expect("创建图像缓冲失败");
    let input = InputPicture {
        planes: [&planes[0], &planes[1], &planes[2]],
        strides: [WIDTH, WIDTH / 2, WIDTH / 2],
        bit_depth: 8,
        format: ChromaFormat::I420,
    };
    pic.ingest(&input, (0, 0)).expect("导入图像失败");
    pic.extend_luma_border();
    pic
}

fn lowres_of(pic: &PictureBuffer, poc: i32, slice_type: SliceType) -> LowResFrame {
    let mut lowres = LowResFrame::new();
    lowres.create(pic, 2, false).expect("创建低分辨率帧失败");
    lowres.init(pic, poc, slice_type);
    lowres.compute_weight_stats(pic);
    lowres
}

fn pu(cu_addr: usize, part_x: usize, part_y: usize, motion: [MotionInfo; 2]) -> PredictionUnit {
    PredictionUnit {
        cu_addr,
        part_x,
        part_y,
        width: 16,
        height: 16,
        motion,
    }
}

#[test]
fn test_weighted_pipeline_recovers_brightness_change() {
    init_logger();
    let ref_planes = noise_planes(1000);
    let fenc_planes = ref_planes.clone().map(|p| p.into_iter().map(|v| v + 30).collect::<Vec<u8>>());
    let mut ref_pic = ingest(&ref_planes);
    let mut fenc_pic = ingest(&fenc_planes);
    fenc_pic.ensure_chroma_extended();
    assert!(!ref_pic.is_chroma_extended());
    let ref_lowres = lowres_of(&ref_pic, 0, SliceType::P);
    let mut fenc_lowres = lowres_of(&fenc_pic, 1, SliceType::P);

    let mut estimator = WeightEstimator::new();
    let mut run_analysis = |ref_pic: &mut PictureBuffer, fenc_lowres: &LowResFrame| {
        let slice = WeightSlice {
            slice_type: SliceType::P,
            poc: 1,
            num_ref_idx: [1, 0],
            ref0: [0, 0],
            fenc: &fenc_pic,
            fenc_lowres,
        };
        let mut refs = [WeightReference {
            poc: 0,
            orig: ref_pic,
            lowres: &ref_lowres,
        }];
        weight_analyse(&mut estimator, &slice, &mut refs)
    };

    // 前瞻尚未搜索时直接比较低分辨率平面, 参考色度不作为补偿源
    let unsearched = run_analysis(&mut ref_pic, &fenc_lowres);
    assert!(!ref_pic.is_chroma_extended(), "未搜索时不扩展参考色度");

    // 前瞻给出运动矢量后, 参考色度在补偿前扩展一次
    fenc_lowres.lowres_mvs_mut(0, 0).fill(MotionVector::ZERO);
    let table = run_analysis(&mut ref_pic, &fenc_lowres);
    assert!(ref_pic.is_chroma_extended(), "作为补偿源时扩展参考色度");
    assert_eq!(unsearched, table, "零运动矢量与直接比较结果一致");

    let luma = table.get(0, 0)[0];
    assert!(luma.present, "亮度整体变亮应启用加权");
    assert_eq!(luma, WeightParam::new(1, 0, 30), "偶数权重约去分母");
    assert!(table.get(0, 0)[PLANE_CB].present);

    let mut stats = WeightStats::new();
    stats.record(SliceType::P, &table);
    assert_eq!(stats.p_ratio(), Some((100.0, 100.0)));
    stats.log_summary();

    // 零 MV 加权预测应恰好重建当前帧
    let refs = [RefPicture { poc: 0, recon: &ref_pic }];
    let weighted = SliceContext {
        slice_type: SliceType::P,
        weighted_pred: true,
        weighted_bipred: false,
        ref_lists: [&refs, &[]],
        weights: &table,
    };
    let plain = SliceContext {
        weighted_pred: false,
        ..weighted
    };
    let mut engine = PredictionEngine::new(ChromaFormat::I420).expect("创建预测引擎失败");
    let unit = pu(3, 32, 16, [MotionInfo::new(0, MotionVector::ZERO), MotionInfo::NONE]);
    let mut with_weights = PredYuv::new(ChromaFormat::I420).expect("分配预测缓冲失败");
    let mut without = PredYuv::new(ChromaFormat::I420).expect("分配预测缓冲失败");
    engine.motion_compensation(&weighted, &unit, &mut with_weights, PredList::L0, PlaneMask::all());
    engine.motion_compensation(&plain, &unit, &mut without, PredList::L0, PlaneMask::all());

    let (cu_x, cu_y) = fenc_pic.cu_pel_position(3);
    let a = with_weights.block(PLANE_Y, 32, 16);
    let b = without.block(PLANE_Y, 32, 16);
    for y in 0..16 {
        for x in 0..16 {
            let (px, py) = ((cu_x + 32 + x) as isize, (cu_y + 16 + y) as isize);
            let (xi, yi) = (x as isize, y as isize);
            assert_eq!(a.at(xi, yi), fenc_pic.sample(PLANE_Y, px, py), "加权预测 ({x},{y})");
            assert_eq!(b.at(xi, yi), ref_pic.sample(PLANE_Y, px, py), "未加权预测 ({x},{y})");
        }
    }
}

#[test]
fn test_bi_prediction_averages_two_references() {
    init_logger();
    let mut a = ingest(&noise_planes(7));
    let mut b = ingest(&noise_planes(8));
    a.ensure_chroma_extended();
    b.ensure_chroma_extended();
    let list0 = [RefPicture { poc: 0, recon: &a }];
    let list1 = [RefPicture { poc: 8, recon: &b }];
    let weights = WeightTable::default();
    let slice = SliceContext {
        slice_type: SliceType::B,
        weighted_pred: false,
        weighted_bipred: false,
        ref_lists: [&list0, &list1],
        weights: &weights,
    };
    let zero = MotionInfo::new(0, MotionVector::ZERO);
    let unit = pu(0, 16, 16, [zero, zero]);
    let mut engine = PredictionEngine::new(ChromaFormat::I420).expect("创建预测引擎失败");
    let mut dst = PredYuv::new(ChromaFormat::I420).expect("分配预测缓冲失败");
    engine.motion_compensation(&slice, &unit, &mut dst, PredList::Bi, PlaneMask::all());

    let luma = dst.block(PLANE_Y, 16, 16);
    let cb = dst.block(PLANE_CB, 16, 16);
    for y in 0..16isize {
        for x in 0..16isize {
            let expect = (a.sample(PLANE_Y, 16 + x, 16 + y) as u32 + b.sample(PLANE_Y, 16 + x, 16 + y) as u32 + 1) >> 1;
            assert_eq!(luma.at(x, y) as u32, expect, "亮度 ({x},{y})");
        }
    }
    for y in 0..8isize {
        for x in 0..8isize {
            let expect = (a.sample(PLANE_CB, 8 + x, 8 + y) as u32 + b.sample(PLANE_CB, 8 + x, 8 + y) as u32 + 1) >> 1;
            assert_eq!(cb.at(x, y) as u32, expect, "色度 ({x},{y})");
        }
    }
}

#[test]
fn test_vertical_intra_from_picture_neighbors() {
    init_logger();
    let pic = ingest(&noise_planes(42));
    let (bx, by) = (64isize, 32isize);
    let above: Vec<Pixel> = (0..16).map(|i| pic.sample(PLANE_Y, bx + i, by - 1)).collect();
    let left: Vec<Pixel> = (0..16).map(|i| pic.sample(PLANE_Y, bx - 1, by + i)).collect();
    let neighbors = IntraNeighbors {
        corner: pic.sample(PLANE_Y, bx - 1, by - 1),
        above: &above,
        left: &left,
    };

    let mut engine = PredictionEngine::new(ChromaFormat::I420).expect("创建预测引擎失败");
    engine.prepare_intra_references(&neighbors, 8, true);
    let mut out = vec![0 as Pixel; 64];
    engine.predict_luma_angular(VER_IDX, &mut PlaneViewMut::new(&mut out, 0, 8), 8);
    for y in 0..8 {
        for x in 1..8 {
            assert_eq!(out[y * 8 + x], above[x], "垂直模式 ({x},{y}) 复制上方参考");
        }
    }
    let max = (1i32 << PIXEL_DEPTH) - 1;
    for y in 0..8 {
        let expect = (above[0] as i32 + ((left[y] as i32 - neighbors.corner as i32) >> 1)).clamp(0, max);
        assert_eq!(out[y * 8] as i32, expect, "第 {y} 行首列边界滤波");
    }
}
