//! # yuce-dsp
//!
//! 像素内核后端. 预测引擎只通过 [`PixelPrimitives`] 访问像素运算,
//! 具体实现在进程启动时按 CPU 能力选择一次, 之后不再做逐块分支.
//!
//! 当前只提供可移植的标量实现 [`ScalarPrimitives`].

pub mod detect;
pub mod filter;
pub mod scalar;
pub mod view;

use std::sync::OnceLock;

use log::debug;
use yuce_core::Pixel;

pub use filter::FilterKind;
pub use scalar::ScalarPrimitives;
pub use view::{PlaneView, PlaneViewMut};

/// 单向加权参数: `clip(((w0 * x + round) >> shift) + offset)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniWeight {
    pub w0: i32,
    pub round: i32,
    pub shift: u32,
    pub offset: i32,
}

/// 双向加权参数, `offset` 为两侧偏移之和
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiWeight {
    pub w0: i32,
    pub w1: i32,
    pub round: i32,
    pub shift: u32,
    pub offset: i32,
}

/// 像素内核接口
///
/// 所有块尺寸参数要求调用方保证合法 (宽高为 4 的倍数等), 内核只做调试断言.
/// 源视图的原点可以位于边距附近, 内核会按滤波器长度读取原点之外的采样.
#[allow(clippy::too_many_arguments)]
pub trait PixelPrimitives: Send + Sync {
    /// 后端名称
    fn name(&self) -> &'static str;

    // ========================================================================
    // 复制与格式转换
    // ========================================================================

    /// 块复制
    fn copy_pp(&self, dst: &mut PlaneViewMut<'_, Pixel>, src: PlaneView<'_, Pixel>, width: usize, height: usize);

    /// 像素转 14 bit 中间精度
    fn pixel_to_short(&self, dst: &mut PlaneViewMut<'_, i16>, src: PlaneView<'_, Pixel>, width: usize, height: usize);

    /// 8 bit 存储的外部平面转内部像素, 左移 `shift_left`
    fn convert_plane_u8(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: &[u8],
        src_stride: usize,
        width: usize,
        height: usize,
        shift_left: u32,
    );

    /// 16 bit 小端存储的外部平面转内部像素, 先右移再左移, 结果按内部位深掩码
    fn convert_plane_u16le(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: &[u8],
        src_stride: usize,
        width: usize,
        height: usize,
        shift_right: u32,
        shift_left: u32,
    );

    // ========================================================================
    // 可分离插值
    // ========================================================================

    /// 水平滤波, 像素到像素
    fn interp_hpp(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
        frac: usize,
    );

    /// 水平滤波, 像素到中间精度; `row_ext` 时上下各多输出 (taps/2-1, taps/2) 行
    fn interp_hps(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, i16>,
        src: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
        frac: usize,
        row_ext: bool,
    );

    /// 垂直滤波, 像素到像素
    fn interp_vpp(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
        frac: usize,
    );

    /// 垂直滤波, 像素到中间精度
    fn interp_vps(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, i16>,
        src: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
        frac: usize,
    );

    /// 垂直滤波, 中间精度到像素
    fn interp_vsp(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: PlaneView<'_, i16>,
        width: usize,
        height: usize,
        frac: usize,
    );

    /// 垂直滤波, 中间精度到中间精度
    fn interp_vss(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, i16>,
        src: PlaneView<'_, i16>,
        width: usize,
        height: usize,
        frac: usize,
    );

    // ========================================================================
    // 合成与加权
    // ========================================================================

    /// 两个中间精度预测取平均并回到像素
    fn add_avg(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src0: PlaneView<'_, i16>,
        src1: PlaneView<'_, i16>,
        width: usize,
        height: usize,
    );

    /// 两个像素块取平均 `(a + b + 1) >> 1`
    fn pixel_avg(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        a: PlaneView<'_, Pixel>,
        b: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
    );

    /// 中间精度单向加权
    fn weight_sp(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: PlaneView<'_, i16>,
        width: usize,
        height: usize,
        weight: UniWeight,
    );

    /// 像素单向加权 (内部模拟像素到中间精度的左移, 不减偏移)
    fn weight_pp(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
        weight: UniWeight,
    );

    /// 中间精度双向加权
    fn weight_bi(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src0: PlaneView<'_, i16>,
        src1: PlaneView<'_, i16>,
        width: usize,
        height: usize,
        weight: BiWeight,
    );

    // ========================================================================
    // 代价
    // ========================================================================

    fn sad(&self, a: PlaneView<'_, Pixel>, b: PlaneView<'_, Pixel>, width: usize, height: usize) -> u32;

    /// 4x4 Hadamard 变换差的绝对值和, 宽高必须是 4 的倍数
    fn satd(&self, a: PlaneView<'_, Pixel>, b: PlaneView<'_, Pixel>, width: usize, height: usize) -> u32;

    // ========================================================================
    // 帧内预测
    // ========================================================================

    /// 单个模式的帧内预测
    ///
    /// `ref_left`/`ref_above` 下标 0 为左上角, 1..=2*width 为邻近采样.
    /// `edge_filter` 控制 DC 边缘滤波以及纯水平/垂直模式的梯度滤波.
    fn intra_pred(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        ref_left: &[Pixel],
        ref_above: &[Pixel],
        mode: u32,
        width: usize,
        edge_filter: bool,
    );

    /// 一次生成 2..=34 全部角度模式, 每个模式连续存放 width*width 个采样
    ///
    /// `filtered_modes` 的第 m 位为 1 时模式 m 使用平滑后的参考.
    fn intra_pred_all_angs(
        &self,
        dst: &mut [Pixel],
        raw: (&[Pixel], &[Pixel]),
        filtered: (&[Pixel], &[Pixel]),
        width: usize,
        filtered_modes: u64,
        edge_filter: bool,
    );

    // ========================================================================
    // 低分辨率
    // ========================================================================

    /// 2:1 降采样并同时生成三个半像素平面 (整像素, 水平, 垂直, 中心)
    fn frame_init_lowres_core(
        &self,
        src: PlaneView<'_, Pixel>,
        dst: [&mut PlaneViewMut<'_, Pixel>; 4],
        width: usize,
        height: usize,
    );
}

static SCALAR: ScalarPrimitives = ScalarPrimitives;

static ACTIVE: OnceLock<&'static dyn PixelPrimitives> = OnceLock::new();

/// 按 CPU 能力选择后端
pub fn select(caps: detect::CpuCapabilities) -> &'static dyn PixelPrimitives {
    debug!("像素内核: 检测到 {}, 使用 {} 后端", caps.best_level(), SCALAR.name());
    &SCALAR
}

/// 进程级后端, 首次调用时检测并固定
pub fn primitives() -> &'static dyn PixelPrimitives {
    *ACTIVE.get_or_init(|| select(detect::detect()))
}
