//! 带边距的 YUV 图像缓冲.
//!
//! 三个平面分别分配, 每个平面四周保留边距, 供超出图像边界的运动矢量和
//! 插值滤波器读取. 同时预计算 CTU 与最小块的地址偏移表.

use log::debug;
use yuce_core::mem::try_vec;
use yuce_core::{ChromaFormat, Pixel, PIXEL_DEPTH, YuceError, YuceResult};
use yuce_dsp::{PlaneView, PlaneViewMut, primitives};

use crate::border::extend_plane;

/// 亮度水平边距在 CTU 宽度之外的额外量
const LUMA_MARGIN_X_EXTRA: usize = 32;
/// 亮度垂直边距在 CTU 高度之外的额外量
const LUMA_MARGIN_Y_EXTRA: usize = 16;

/// 平面编号
pub const PLANE_Y: usize = 0;
pub const PLANE_CB: usize = 1;
pub const PLANE_CR: usize = 2;

/// 外部输入图像
///
/// 平面按字节存储: 位深 8 时每采样 1 字节, 位深大于 8 时每采样 2 字节小端.
#[derive(Debug, Clone, Copy)]
pub struct InputPicture<'a> {
    pub planes: [&'a [u8]; 3],
    /// 每个平面的行跨度 (字节)
    pub strides: [usize; 3],
    /// 声明位深, 8~16
    pub bit_depth: u32,
    pub format: ChromaFormat,
}

/// 带边距的图像缓冲
#[derive(Debug, Default)]
pub struct PictureBuffer {
    width: usize,
    height: usize,
    format: ChromaFormat,
    hshift: u32,
    vshift: u32,

    max_cu_width: usize,
    max_cu_height: usize,
    max_cu_depth: u32,
    num_cu_in_width: usize,
    num_cu_in_height: usize,

    luma_margin_x: usize,
    luma_margin_y: usize,
    chroma_margin_x: usize,
    chroma_margin_y: usize,
    stride: usize,
    chroma_stride: usize,

    planes: [Vec<Pixel>; 3],
    origins: [usize; 3],

    cu_offset_y: Vec<usize>,
    cu_offset_c: Vec<usize>,
    bu_offset_y: Vec<usize>,
    bu_offset_c: Vec<usize>,

    chroma_extended: bool,
    created: bool,
}

impl PictureBuffer {
    /// 创建未初始化的缓冲
    pub fn new() -> Self {
        Self::default()
    }

    /// 分配平面与地址表
    ///
    /// `width`/`height` 必须已经对齐到最小块尺寸. 任一分配失败时释放已分配部分并返回错误.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        width: usize,
        height: usize,
        format: ChromaFormat,
        max_cu_width: usize,
        max_cu_height: usize,
        max_cu_depth: u32,
    ) -> YuceResult<()> {
        if width == 0 || height == 0 || max_cu_width == 0 || max_cu_height == 0 {
            return Err(YuceError::InvalidArgument(format!(
                "图像尺寸无效: {width}x{height}, CTU {max_cu_width}x{max_cu_height}"
            )));
        }
        if (max_cu_width >> max_cu_depth) == 0 || (max_cu_height >> max_cu_depth) == 0 {
            return Err(YuceError::InvalidArgument(format!(
                "CTU 划分深度 {max_cu_depth} 过大"
            )));
        }

        self.destroy();
        let result = self.allocate(width, height, format, max_cu_width, max_cu_height, max_cu_depth);
        if result.is_err() {
            self.destroy();
        }
        result
    }

    fn allocate(
        &mut self,
        width: usize,
        height: usize,
        format: ChromaFormat,
        max_cu_width: usize,
        max_cu_height: usize,
        max_cu_depth: u32,
    ) -> YuceResult<()> {
        let (hshift, vshift) = format.chroma_shifts();
        self.width = width;
        self.height = height;
        self.format = format;
        self.hshift = hshift;
        self.vshift = vshift;
        self.max_cu_width = max_cu_width;
        self.max_cu_height = max_cu_height;
        self.max_cu_depth = max_cu_depth;

        self.num_cu_in_width = width.div_ceil(max_cu_width);
        self.num_cu_in_height = height.div_ceil(max_cu_height);
        let padded_width = self.num_cu_in_width * max_cu_width;
        let padded_height = self.num_cu_in_height * max_cu_height;

        self.luma_margin_x = max_cu_width + LUMA_MARGIN_X_EXTRA;
        self.luma_margin_y = max_cu_height + LUMA_MARGIN_Y_EXTRA;
        self.chroma_margin_x = self.luma_margin_x;
        self.chroma_margin_y = self.luma_margin_y >> vshift;

        self.stride = padded_width + 2 * self.luma_margin_x;
        self.chroma_stride = (padded_width >> hshift) + 2 * self.chroma_margin_x;

        let luma_size = self
            .stride
            .checked_mul(padded_height + 2 * self.luma_margin_y)
            .ok_or_else(|| YuceError::OutOfMemory(format!("亮度平面尺寸溢出: {width}x{height}")))?;
        let chroma_size = self
            .chroma_stride
            .checked_mul((padded_height >> vshift) + 2 * self.chroma_margin_y)
            .ok_or_else(|| YuceError::OutOfMemory(format!("色度平面尺寸溢出: {width}x{height}")))?;

        self.planes[PLANE_Y] = try_vec(luma_size, 0, "亮度平面")?;
        self.planes[PLANE_CB] = try_vec(chroma_size, 0, "Cb 平面")?;
        self.planes[PLANE_CR] = try_vec(chroma_size, 0, "Cr 平面")?;
        self.origins = [
            self.luma_margin_y * self.stride + self.luma_margin_x,
            self.chroma_margin_y * self.chroma_stride + self.chroma_margin_x,
            self.chroma_margin_y * self.chroma_stride + self.chroma_margin_x,
        ];

        let num_cus = self.num_cu_in_width * self.num_cu_in_height;
        self.cu_offset_y = try_vec(num_cus, 0, "CTU 亮度偏移表")?;
        self.cu_offset_c = try_vec(num_cus, 0, "CTU 色度偏移表")?;
        for cu_row in 0..self.num_cu_in_height {
            for cu_col in 0..self.num_cu_in_width {
                let idx = cu_row * self.num_cu_in_width + cu_col;
                self.cu_offset_y[idx] = self.stride * cu_row * max_cu_height + cu_col * max_cu_width;
                self.cu_offset_c[idx] = self.chroma_stride * cu_row * (max_cu_height >> vshift)
                    + cu_col * (max_cu_width >> hshift);
            }
        }

        let side = 1usize << max_cu_depth;
        let bu_width = max_cu_width >> max_cu_depth;
        let bu_height = max_cu_height >> max_cu_depth;
        self.bu_offset_y = try_vec(side * side, 0, "最小块亮度偏移表")?;
        self.bu_offset_c = try_vec(side * side, 0, "最小块色度偏移表")?;
        for bu_row in 0..side {
            for bu_col in 0..side {
                let idx = (bu_row << max_cu_depth) + bu_col;
                self.bu_offset_y[idx] = self.stride * bu_row * bu_height + bu_col * bu_width;
                self.bu_offset_c[idx] = self.chroma_stride * bu_row * (bu_height >> vshift)
                    + bu_col * (bu_width >> hshift);
            }
        }

        self.chroma_extended = false;
        self.created = true;
        debug!(
            "图像缓冲创建: {}x{} {}, stride={}/{}, CTU {}x{}",
            width, height, format, self.stride, self.chroma_stride, self.num_cu_in_width, self.num_cu_in_height
        );
        Ok(())
    }

    /// 释放所有缓冲, 对未创建或已释放的缓冲调用也是安全的
    pub fn destroy(&mut self) {
        for plane in &mut self.planes {
            *plane = Vec::new();
        }
        self.cu_offset_y = Vec::new();
        self.cu_offset_c = Vec::new();
        self.bu_offset_y = Vec::new();
        self.bu_offset_c = Vec::new();
        self.origins = [0; 3];
        self.chroma_extended = false;
        self.created = false;
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    // ========================================================================
    // 输入
    // ========================================================================

    /// 导入外部图像并转换到内部位深
    ///
    /// `pad` 为 (右侧, 底部) 填充量, 实际内容尺寸为 `width - pad.0` x `height - pad.1`.
    /// 内容宽高不是 16 的倍数时, 内部填充量改为补齐到 16 的倍数, 再多加一列一行.
    /// 返回实际使用的亮度填充量.
    pub fn ingest(&mut self, input: &InputPicture<'_>, pad: (usize, usize)) -> YuceResult<(usize, usize)> {
        if !self.created {
            return Err(YuceError::InvalidArgument("图像缓冲尚未创建".into()));
        }
        if !(8..=16).contains(&input.bit_depth) {
            return Err(YuceError::InvalidArgument(format!(
                "不支持的输入位深: {}",
                input.bit_depth
            )));
        }
        if input.format != self.format {
            return Err(YuceError::InvalidArgument(format!(
                "输入色度格式 {} 与缓冲 {} 不一致",
                input.format, self.format
            )));
        }
        if pad.0 >= self.width || pad.1 >= self.height {
            return Err(YuceError::InvalidArgument(format!(
                "填充量 {pad:?} 超出图像尺寸 {}x{}",
                self.width, self.height
            )));
        }

        let width = self.width - pad.0;
        let height = self.height - pad.1;
        let pad_x = (if width & 15 != 0 { 16 - (width & 15) } else { pad.0 }) + 1;
        let pad_y = (if height & 15 != 0 { 16 - (height & 15) } else { pad.1 }) + 1;

        let planes = if self.format.has_chroma() { 3 } else { 1 };
        for plane in 0..planes {
            let (hs, vs) = if plane == PLANE_Y { (0, 0) } else { (self.hshift, self.vshift) };
            self.convert_plane(input, plane, width >> hs, height >> vs)?;
            self.extend_ingested(plane, width >> hs, height >> vs, pad_x >> hs, pad_y >> vs);
        }
        if !self.format.has_chroma() {
            let mid = (1 << (PIXEL_DEPTH - 1)) as Pixel;
            self.planes[PLANE_CB].fill(mid);
            self.planes[PLANE_CR].fill(mid);
        }

        self.chroma_extended = false;
        Ok((pad_x, pad_y))
    }

    fn convert_plane(&mut self, input: &InputPicture<'_>, plane: usize, width: usize, height: usize) -> YuceResult<()> {
        let bytes = if input.bit_depth > 8 { 2 } else { 1 };
        let src = input.planes[plane];
        let src_stride = input.strides[plane];
        let needed = (height - 1) * src_stride + width * bytes;
        if src_stride < width * bytes || src.len() < needed {
            return Err(YuceError::InvalidData(format!(
                "平面 {plane} 数据不足: 需要 {needed} 字节, 实际 {} 字节, stride={src_stride}",
                src.len()
            )));
        }

        let kernels = primitives();
        let stride = self.plane_stride(plane);
        let origin = self.origins[plane];
        let mut dst = PlaneViewMut::new(&mut self.planes[plane], origin, stride);
        if bytes == 1 {
            kernels.convert_plane_u8(&mut dst, src, src_stride, width, height, PIXEL_DEPTH - 8);
        } else {
            let shift_right = input.bit_depth.saturating_sub(PIXEL_DEPTH);
            let shift_left = PIXEL_DEPTH.saturating_sub(input.bit_depth);
            kernels.convert_plane_u16le(&mut dst, src, src_stride, width, height, shift_right, shift_left);
        }
        Ok(())
    }

    /// 右侧复制最后一列, 底部整行复制最后一行 (含右侧扩展)
    fn extend_ingested(&mut self, plane: usize, width: usize, height: usize, pad_x: usize, pad_y: usize) {
        let stride = self.plane_stride(plane);
        let origin = self.origins[plane];
        let buf = &mut self.planes[plane];
        for y in 0..height {
            let row = origin + y * stride;
            let last = buf[row + width - 1];
            buf[row + width..row + width + pad_x].fill(last);
        }
        let last_row = origin + (height - 1) * stride;
        let line = width + pad_x;
        for y in 1..=pad_y {
            buf.copy_within(last_row..last_row + line, last_row + y * stride);
        }
    }

    // ========================================================================
    // 边距扩展
    // ========================================================================

    /// 扩展亮度平面边距
    pub fn extend_luma_border(&mut self) {
        let origin = self.origins[PLANE_Y];
        extend_plane(
            &mut self.planes[PLANE_Y],
            origin,
            self.stride,
            self.width,
            self.height,
            self.luma_margin_x,
            self.luma_margin_y,
        );
    }

    /// 扩展两个色度平面边距
    pub fn extend_chroma_borders(&mut self) {
        let width = self.width >> self.hshift;
        let height = self.height >> self.vshift;
        for plane in [PLANE_CB, PLANE_CR] {
            let origin = self.origins[plane];
            extend_plane(
                &mut self.planes[plane],
                origin,
                self.chroma_stride,
                width,
                height,
                self.chroma_margin_x,
                self.chroma_margin_y,
            );
        }
    }

    /// 色度边距只在首次作为运动补偿源时扩展一次, 返回本次是否执行了扩展
    pub fn ensure_chroma_extended(&mut self) -> bool {
        if self.chroma_extended {
            return false;
        }
        self.extend_chroma_borders();
        self.chroma_extended = true;
        true
    }

    pub fn is_chroma_extended(&self) -> bool {
        self.chroma_extended
    }

    // ========================================================================
    // 访问与寻址
    // ========================================================================

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> ChromaFormat {
        self.format
    }

    pub fn hshift(&self) -> u32 {
        self.hshift
    }

    pub fn vshift(&self) -> u32 {
        self.vshift
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn chroma_stride(&self) -> usize {
        self.chroma_stride
    }

    pub fn plane_stride(&self, plane: usize) -> usize {
        if plane == PLANE_Y { self.stride } else { self.chroma_stride }
    }

    pub fn luma_margin_x(&self) -> usize {
        self.luma_margin_x
    }

    pub fn luma_margin_y(&self) -> usize {
        self.luma_margin_y
    }

    pub fn chroma_margin_x(&self) -> usize {
        self.chroma_margin_x
    }

    pub fn chroma_margin_y(&self) -> usize {
        self.chroma_margin_y
    }

    pub fn max_cu_width(&self) -> usize {
        self.max_cu_width
    }

    pub fn max_cu_height(&self) -> usize {
        self.max_cu_height
    }

    pub fn max_cu_depth(&self) -> u32 {
        self.max_cu_depth
    }

    pub fn num_cu_in_width(&self) -> usize {
        self.num_cu_in_width
    }

    pub fn num_cu_in_height(&self) -> usize {
        self.num_cu_in_height
    }

    /// 平面原始数据 (含边距)
    pub fn plane(&self, plane: usize) -> &[Pixel] {
        &self.planes[plane]
    }

    pub fn plane_mut(&mut self, plane: usize) -> &mut [Pixel] {
        &mut self.planes[plane]
    }

    /// 平面原点 (第 0 行第 0 列) 在数据中的下标
    pub fn origin(&self, plane: usize) -> usize {
        self.origins[plane]
    }

    /// 以原点为基准的只读视图
    pub fn plane_view(&self, plane: usize) -> PlaneView<'_, Pixel> {
        PlaneView::new(&self.planes[plane], self.origins[plane], self.plane_stride(plane))
    }

    /// 以原点为基准的可写视图
    pub fn plane_view_mut(&mut self, plane: usize) -> PlaneViewMut<'_, Pixel> {
        let stride = self.plane_stride(plane);
        PlaneViewMut::new(&mut self.planes[plane], self.origins[plane], stride)
    }

    /// CTU 左上角像素坐标
    pub fn cu_pel_position(&self, cu_addr: usize) -> (usize, usize) {
        (
            (cu_addr % self.num_cu_in_width) * self.max_cu_width,
            (cu_addr / self.num_cu_in_width) * self.max_cu_height,
        )
    }

    /// 最小块在 CTU 内的光栅序号
    pub fn bu_index(&self, part_x: usize, part_y: usize) -> usize {
        let bu_width = self.max_cu_width >> self.max_cu_depth;
        let bu_height = self.max_cu_height >> self.max_cu_depth;
        ((part_y / bu_height) << self.max_cu_depth) + part_x / bu_width
    }

    /// CTU 内最小块左上角的亮度采样下标
    pub fn luma_addr(&self, cu_addr: usize, bu_idx: usize) -> usize {
        self.origins[PLANE_Y] + self.cu_offset_y[cu_addr] + self.bu_offset_y[bu_idx]
    }

    /// CTU 内最小块左上角的色度采样下标 (Cb 与 Cr 相同)
    pub fn chroma_addr(&self, cu_addr: usize, bu_idx: usize) -> usize {
        self.origins[PLANE_CB] + self.cu_offset_c[cu_addr] + self.bu_offset_c[bu_idx]
    }

    /// 读取原点坐标系下 (x, y) 处的采样, 坐标可以落在边距内
    pub fn sample(&self, plane: usize, x: isize, y: isize) -> Pixel {
        self.plane_view(plane).at(x, y)
    }
}
