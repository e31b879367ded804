//! # yuce-predict
//!
//! 预测引擎与加权参数估计.
//!
//! - [`PredictionEngine`]: 帧内角度预测、帧间运动补偿与加权合成, 每个工作线程一个实例
//! - [`WeightEstimator`]: 基于低分辨率帧为 P/B 片估计显式加权参数

pub mod engine;
pub mod weightp;

#[cfg(test)]
mod test_util;

pub use engine::{
    IntraNeighbors, MotionInfo, PredList, PredYuv, PredictionEngine, PredictionUnit, RefPicture,
    ShortYuv, SliceContext,
};
pub use weightp::{WeightEstimator, WeightReference, WeightSlice, WeightStats, weight_analyse};
