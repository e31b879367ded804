//! 预测引擎的工作缓冲.

use yuce_core::config::MAX_CU_SIZE;
use yuce_core::mem::try_vec;
use yuce_core::{ChromaFormat, Pixel, YuceResult};

use super::yuv::{PredYuv, ShortYuv};

/// 亮度 8 抽头两级滤波的中间缓冲行数
const IMMED_ROWS: usize = MAX_CU_SIZE + 8 - 1;

/// 帧内参考长度: 角点 + 2 倍块宽
pub(crate) const INTRA_REF_LEN: usize = 2 * MAX_CU_SIZE + 1;

/// 所有角度模式预测的块数
pub(crate) const ANGULAR_MODES: usize = 33;

/// 每个引擎实例独占, 一次分配后不再重新分配
#[derive(Debug)]
pub(crate) struct PredictionScratch {
    /// 水平滤波输出, 供垂直滤波读取
    pub immed: Vec<i16>,
    pub pred_yuv: [PredYuv; 2],
    pub pred_short: [ShortYuv; 2],

    pub ref_left: Vec<Pixel>,
    pub ref_above: Vec<Pixel>,
    pub ref_left_flt: Vec<Pixel>,
    pub ref_above_flt: Vec<Pixel>,
    /// L 形边界 (左列自下而上, 角点, 上行) 及其滤波结果
    pub border: Vec<Pixel>,
    pub border_flt: Vec<Pixel>,

    pub all_angs: Vec<Pixel>,
}

impl PredictionScratch {
    pub fn new(format: ChromaFormat) -> YuceResult<Self> {
        let border_len = 2 * INTRA_REF_LEN - 1;
        Ok(Self {
            immed: try_vec(MAX_CU_SIZE * IMMED_ROWS, 0, "插值中间缓冲")?,
            pred_yuv: [PredYuv::new(format)?, PredYuv::new(format)?],
            pred_short: [ShortYuv::new(format)?, ShortYuv::new(format)?],
            ref_left: try_vec(INTRA_REF_LEN, 0, "左侧参考")?,
            ref_above: try_vec(INTRA_REF_LEN, 0, "上方参考")?,
            ref_left_flt: try_vec(INTRA_REF_LEN, 0, "左侧滤波参考")?,
            ref_above_flt: try_vec(INTRA_REF_LEN, 0, "上方滤波参考")?,
            border: try_vec(border_len, 0, "L 形边界")?,
            border_flt: try_vec(border_len, 0, "L 形边界滤波")?,
            all_angs: try_vec(ANGULAR_MODES * MAX_CU_SIZE * MAX_CU_SIZE, 0, "全角度预测缓冲")?,
        })
    }
}
