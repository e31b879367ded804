//! 可移植的标量后端.

mod intrapred;
mod ipfilter;
mod lowres;
mod pixel;

use yuce_core::Pixel;

use crate::filter::FilterKind;
use crate::view::{PlaneView, PlaneViewMut};
use crate::{BiWeight, PixelPrimitives, UniWeight};

/// 标量实现, 所有架构可用
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarPrimitives;

#[allow(clippy::too_many_arguments)]
impl PixelPrimitives for ScalarPrimitives {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn copy_pp(&self, dst: &mut PlaneViewMut<'_, Pixel>, src: PlaneView<'_, Pixel>, width: usize, height: usize) {
        pixel::copy_pp(dst, src, width, height);
    }

    fn pixel_to_short(&self, dst: &mut PlaneViewMut<'_, i16>, src: PlaneView<'_, Pixel>, width: usize, height: usize) {
        pixel::pixel_to_short(dst, src, width, height);
    }

    fn convert_plane_u8(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: &[u8],
        src_stride: usize,
        width: usize,
        height: usize,
        shift_left: u32,
    ) {
        pixel::convert_plane_u8(dst, src, src_stride, width, height, shift_left);
    }

    fn convert_plane_u16le(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: &[u8],
        src_stride: usize,
        width: usize,
        height: usize,
        shift_right: u32,
        shift_left: u32,
    ) {
        pixel::convert_plane_u16le(dst, src, src_stride, width, height, shift_right, shift_left);
    }

    fn interp_hpp(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
        frac: usize,
    ) {
        ipfilter::hpp(kind, dst, src, width, height, frac);
    }

    fn interp_hps(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, i16>,
        src: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
        frac: usize,
        row_ext: bool,
    ) {
        ipfilter::hps(kind, dst, src, width, height, frac, row_ext);
    }

    fn interp_vpp(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
        frac: usize,
    ) {
        ipfilter::vpp(kind, dst, src, width, height, frac);
    }

    fn interp_vps(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, i16>,
        src: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
        frac: usize,
    ) {
        ipfilter::vps(kind, dst, src, width, height, frac);
    }

    fn interp_vsp(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: PlaneView<'_, i16>,
        width: usize,
        height: usize,
        frac: usize,
    ) {
        ipfilter::vsp(kind, dst, src, width, height, frac);
    }

    fn interp_vss(
        &self,
        kind: FilterKind,
        dst: &mut PlaneViewMut<'_, i16>,
        src: PlaneView<'_, i16>,
        width: usize,
        height: usize,
        frac: usize,
    ) {
        ipfilter::vss(kind, dst, src, width, height, frac);
    }

    fn add_avg(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src0: PlaneView<'_, i16>,
        src1: PlaneView<'_, i16>,
        width: usize,
        height: usize,
    ) {
        pixel::add_avg(dst, src0, src1, width, height);
    }

    fn pixel_avg(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        a: PlaneView<'_, Pixel>,
        b: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
    ) {
        pixel::pixel_avg(dst, a, b, width, height);
    }

    fn weight_sp(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: PlaneView<'_, i16>,
        width: usize,
        height: usize,
        weight: UniWeight,
    ) {
        pixel::weight_sp(dst, src, width, height, weight);
    }

    fn weight_pp(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src: PlaneView<'_, Pixel>,
        width: usize,
        height: usize,
        weight: UniWeight,
    ) {
        pixel::weight_pp(dst, src, width, height, weight);
    }

    fn weight_bi(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        src0: PlaneView<'_, i16>,
        src1: PlaneView<'_, i16>,
        width: usize,
        height: usize,
        weight: BiWeight,
    ) {
        pixel::weight_bi(dst, src0, src1, width, height, weight);
    }

    fn sad(&self, a: PlaneView<'_, Pixel>, b: PlaneView<'_, Pixel>, width: usize, height: usize) -> u32 {
        pixel::sad(a, b, width, height)
    }

    fn satd(&self, a: PlaneView<'_, Pixel>, b: PlaneView<'_, Pixel>, width: usize, height: usize) -> u32 {
        pixel::satd(a, b, width, height)
    }

    fn intra_pred(
        &self,
        dst: &mut PlaneViewMut<'_, Pixel>,
        ref_left: &[Pixel],
        ref_above: &[Pixel],
        mode: u32,
        width: usize,
        edge_filter: bool,
    ) {
        intrapred::intra_pred(dst, ref_left, ref_above, mode, width, edge_filter);
    }

    fn intra_pred_all_angs(
        &self,
        dst: &mut [Pixel],
        raw: (&[Pixel], &[Pixel]),
        filtered: (&[Pixel], &[Pixel]),
        width: usize,
        filtered_modes: u64,
        edge_filter: bool,
    ) {
        intrapred::intra_pred_all_angs(dst, raw, filtered, width, filtered_modes, edge_filter);
    }

    fn frame_init_lowres_core(
        &self,
        src: PlaneView<'_, Pixel>,
        dst: [&mut PlaneViewMut<'_, Pixel>; 4],
        width: usize,
        height: usize,
    ) {
        lowres::frame_init_lowres_core(src, dst, width, height);
    }
}
