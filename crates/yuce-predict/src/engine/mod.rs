//! 预测引擎.
//!
//! 每个工作线程持有一个 [`PredictionEngine`], 其工作缓冲在创建时一次分配,
//! 所有预测入口都通过 `&mut self` 独占使用.

mod inter;
mod intra;
mod scratch;
mod weighted;
mod yuv;

use log::debug;
use yuce_core::{ChromaFormat, YuceResult};
use yuce_dsp::{PixelPrimitives, primitives};

use scratch::PredictionScratch;

pub use inter::{MotionInfo, PredList, PredictionUnit, RefPicture, SliceContext, clip_mv};
pub(crate) use inter::{PlaneJob, mc_pixel};
pub use intra::{DC_IDX, HOR_IDX, IntraNeighbors, PLANAR_IDX, VER_IDX, filter_decision};
pub use weighted::{bi_weight, uni_weight};
pub use yuv::{CuBuffer, PredYuv, ShortYuv};

/// 帧内/帧间预测引擎
pub struct PredictionEngine {
    kernels: &'static dyn PixelPrimitives,
    format: ChromaFormat,
    scratch: PredictionScratch,
}

impl PredictionEngine {
    /// 按色度格式分配工作缓冲, 像素内核使用进程级后端
    pub fn new(format: ChromaFormat) -> YuceResult<Self> {
        Self::with_kernels(format, primitives())
    }

    /// 使用指定的像素内核后端
    pub fn with_kernels(format: ChromaFormat, kernels: &'static dyn PixelPrimitives) -> YuceResult<Self> {
        let scratch = PredictionScratch::new(format)?;
        debug!("预测引擎创建: 色度格式 {}, 内核 {}", format, kernels.name());
        Ok(Self {
            kernels,
            format,
            scratch,
        })
    }

    pub fn format(&self) -> ChromaFormat {
        self.format
    }
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("kernels", &self.kernels.name())
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
