//! CU 尺寸的三平面预测缓冲.

use yuce_core::config::MAX_CU_SIZE;
use yuce_core::mem::try_vec;
use yuce_core::{ChromaFormat, Pixel, YuceResult};
use yuce_dsp::{PlaneView, PlaneViewMut};

/// 最大 CU 尺寸的 Y/Cb/Cr 缓冲, 亮度跨度固定为 `MAX_CU_SIZE`
#[derive(Debug, Clone)]
pub struct CuBuffer<T> {
    planes: [Vec<T>; 3],
    hshift: u32,
    vshift: u32,
}

/// 最终精度预测
pub type PredYuv = CuBuffer<Pixel>;

/// 14 bit 中间精度预测
pub type ShortYuv = CuBuffer<i16>;

impl<T: Copy + Default> CuBuffer<T> {
    pub fn new(format: ChromaFormat) -> YuceResult<Self> {
        let (hshift, vshift) = format.chroma_shifts();
        let chroma = (MAX_CU_SIZE >> hshift) * (MAX_CU_SIZE >> vshift);
        Ok(Self {
            planes: [
                try_vec(MAX_CU_SIZE * MAX_CU_SIZE, T::default(), "CU 亮度预测缓冲")?,
                try_vec(chroma, T::default(), "CU Cb 预测缓冲")?,
                try_vec(chroma, T::default(), "CU Cr 预测缓冲")?,
            ],
            hshift,
            vshift,
        })
    }

    pub fn stride(&self, plane: usize) -> usize {
        if plane == 0 { MAX_CU_SIZE } else { MAX_CU_SIZE >> self.hshift }
    }

    pub fn hshift(&self) -> u32 {
        self.hshift
    }

    pub fn vshift(&self) -> u32 {
        self.vshift
    }

    /// 块在平面内的下标, (x, y) 为亮度坐标
    fn block_offset(&self, plane: usize, x: usize, y: usize) -> usize {
        if plane == 0 {
            y * MAX_CU_SIZE + x
        } else {
            (y >> self.vshift) * self.stride(plane) + (x >> self.hshift)
        }
    }

    /// 以 CU 内亮度坐标 (x, y) 处的块为原点的只读视图
    pub fn block(&self, plane: usize, x: usize, y: usize) -> PlaneView<'_, T> {
        PlaneView::new(&self.planes[plane], self.block_offset(plane, x, y), self.stride(plane))
    }

    /// 以 CU 内亮度坐标 (x, y) 处的块为原点的可写视图
    pub fn block_mut(&mut self, plane: usize, x: usize, y: usize) -> PlaneViewMut<'_, T> {
        let offset = self.block_offset(plane, x, y);
        let stride = self.stride(plane);
        PlaneViewMut::new(&mut self.planes[plane], offset, stride)
    }

    /// 读取块内 (x, y) 处的采样, 坐标为平面自身坐标
    pub fn sample(&self, plane: usize, x: usize, y: usize) -> T {
        self.planes[plane][y * self.stride(plane) + x]
    }

    pub fn plane(&self, plane: usize) -> &[T] {
        &self.planes[plane]
    }
}
