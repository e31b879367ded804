//! 加权预测使用情况统计.

use log::info;
use yuce_core::{SliceType, WeightTable};

/// 整个编码过程中启用显式加权的 P/B 帧计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightStats {
    pub p_frames: u32,
    pub p_luma: u32,
    pub p_chroma: u32,
    pub b_frames: u32,
    pub b_luma: u32,
    pub b_chroma: u32,
}

impl WeightStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一帧的加权表, 只看每个列表的参考 0
    pub fn record(&mut self, slice_type: SliceType, table: &WeightTable) {
        let lists = match slice_type {
            SliceType::I => return,
            SliceType::P => 1,
            SliceType::B => 2,
        };
        let mut luma = false;
        let mut chroma = false;
        for list in 0..lists {
            let w = table.get(list, 0);
            luma |= w[0].present;
            chroma |= w[1].present || w[2].present;
        }
        let (frames, luma_count, chroma_count) = match slice_type {
            SliceType::P => (&mut self.p_frames, &mut self.p_luma, &mut self.p_chroma),
            _ => (&mut self.b_frames, &mut self.b_luma, &mut self.b_chroma),
        };
        *frames += 1;
        *luma_count += luma as u32;
        *chroma_count += chroma as u32;
    }

    /// 亮度/色度加权 P 帧百分比
    pub fn p_ratio(&self) -> Option<(f64, f64)> {
        percent(self.p_frames, self.p_luma, self.p_chroma)
    }

    /// 亮度/色度加权 B 帧百分比
    pub fn b_ratio(&self) -> Option<(f64, f64)> {
        percent(self.b_frames, self.b_luma, self.b_chroma)
    }

    /// 输出汇总日志
    pub fn log_summary(&self) {
        if let Some((y, uv)) = self.p_ratio() {
            info!("Weighted P-Frames: Y:{y:.1}% UV:{uv:.1}%");
        }
        if let Some((y, uv)) = self.b_ratio() {
            info!("Weighted B-Frames: Y:{y:.1}% UV:{uv:.1}%");
        }
    }
}

fn percent(frames: u32, luma: u32, chroma: u32) -> Option<(f64, f64)> {
    (frames > 0).then(|| {
        let total = frames as f64;
        (100.0 * luma as f64 / total, 100.0 * chroma as f64 / total)
    })
}
