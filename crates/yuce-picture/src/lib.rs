//! # yuce-picture
//!
//! 图像缓冲: 带边距的 YUV 平面、CTU/最小块地址表, 以及前瞻分析使用的半分辨率帧.

pub mod border;
pub mod lowres;
pub mod picture;

pub use border::extend_plane;
pub use lowres::{COST_UNKNOWN, INTRA_COST_UNKNOWN, LowResFrame};
pub use picture::{InputPicture, PLANE_CB, PLANE_CR, PLANE_Y, PictureBuffer};

#[cfg(test)]
mod tests {
    use super::*;
    use yuce_core::{ChromaFormat, PIXEL_DEPTH, Pixel};

    fn gradient(width: usize, height: usize, stride: usize) -> Vec<u8> {
        let mut data = vec![0u8; stride * height];
        for y in 0..height {
            for x in 0..width {
                data[y * stride + x] = ((x * 3 + y * 7) % 251) as u8;
            }
        }
        data
    }

    #[test]
    fn test_ingest_8bit_round_trip() {
        let mut pic = PictureBuffer::new();
        pic.create(64, 48, ChromaFormat::I420, 32, 32, 3).unwrap();
        let luma = gradient(64, 48, 70);
        let cb = gradient(32, 24, 40);
        let cr: Vec<u8> = gradient(32, 24, 40).iter().map(|v| 250 - v).collect();
        let input = InputPicture {
            planes: [&luma, &cb, &cr],
            strides: [70, 40, 40],
            bit_depth: 8,
            format: ChromaFormat::I420,
        };
        pic.ingest(&input, (0, 0)).unwrap();
        let scale = PIXEL_DEPTH - 8;
        for (plane, src, width, height, stride) in [
            (PLANE_Y, &luma, 64, 48, 70),
            (PLANE_CB, &cb, 32, 24, 40),
            (PLANE_CR, &cr, 32, 24, 40),
        ] {
            for y in 0..height {
                for x in 0..width {
                    let expect = (src[y * stride + x] as Pixel) << scale;
                    assert_eq!(pic.sample(plane, x as isize, y as isize), expect, "平面 {plane} ({x},{y})");
                }
            }
        }
    }

    /// 检查导入后右侧与底部的复制填充
    fn check_padding(pic: &PictureBuffer, plane: usize, width: usize, height: usize, pad_x: usize, pad_y: usize) {
        let (w, h) = (width as isize, height as isize);
        for y in 0..h {
            let last = pic.sample(plane, w - 1, y);
            for x in w..w + pad_x as isize {
                assert_eq!(pic.sample(plane, x, y), last, "平面 {plane} 右侧填充 ({x},{y})");
            }
        }
        for y in h..h + pad_y as isize {
            for x in 0..w + pad_x as isize {
                assert_eq!(pic.sample(plane, x, y), pic.sample(plane, x, h - 1), "平面 {plane} 底部填充 ({x},{y})");
            }
        }
    }

    #[test]
    fn test_ingest_replicates_padding() {
        for (pic_w, pic_h) in [(64, 64), (72, 40)] {
            for pad in [(0, 0), (1, 1), (4, 6), (7, 3), (16, 16)] {
                let mut pic = PictureBuffer::new();
                pic.create(pic_w, pic_h, ChromaFormat::I420, 32, 32, 3).unwrap();
                let (width, height) = (pic_w - pad.0, pic_h - pad.1);
                let (cw, ch) = (width >> 1, height >> 1);
                let luma = gradient(width, height, width);
                let chroma = gradient(cw, ch, cw);
                let input = InputPicture {
                    planes: [&luma, &chroma, &chroma],
                    strides: [width, cw, cw],
                    bit_depth: 8,
                    format: ChromaFormat::I420,
                };
                let (pad_x, pad_y) = pic.ingest(&input, pad).unwrap();
                let expect_x = if width % 16 != 0 { 16 - width % 16 } else { pad.0 } + 1;
                let expect_y = if height % 16 != 0 { 16 - height % 16 } else { pad.1 } + 1;
                assert_eq!((pad_x, pad_y), (expect_x, expect_y), "{pic_w}x{pic_h} 填充 {pad:?}");

                check_padding(&pic, PLANE_Y, width, height, pad_x, pad_y);
                check_padding(&pic, PLANE_CB, cw, ch, pad_x >> 1, pad_y >> 1);
                check_padding(&pic, PLANE_CR, cw, ch, pad_x >> 1, pad_y >> 1);
            }
        }
    }

    #[test]
    fn test_ingest_monochrome_fills_mid_gray() {
        let mut pic = PictureBuffer::new();
        pic.create(32, 32, ChromaFormat::I400, 32, 32, 3).unwrap();
        let luma = gradient(32, 32, 32);
        let input = InputPicture {
            planes: [&luma, &[], &[]],
            strides: [32, 0, 0],
            bit_depth: 8,
            format: ChromaFormat::I400,
        };
        pic.ingest(&input, (0, 0)).unwrap();
        let mid = (1 << (PIXEL_DEPTH - 1)) as Pixel;
        assert_eq!(pic.sample(PLANE_CB, 3, 3), mid);
        assert_eq!(pic.sample(PLANE_CR, 0, 15), mid);
    }

    #[test]
    fn test_ingest_16bit_reduces_to_internal_depth() {
        let mut pic = PictureBuffer::new();
        pic.create(16, 16, ChromaFormat::I444, 16, 16, 2).unwrap();
        let mut plane = vec![0u8; 16 * 16 * 2];
        for (i, chunk) in plane.chunks_exact_mut(2).enumerate() {
            let value = ((i as u16) << 2) & 0x3FF;
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        let input = InputPicture {
            planes: [&plane, &plane, &plane],
            strides: [32, 32, 32],
            bit_depth: 10,
            format: ChromaFormat::I444,
        };
        pic.ingest(&input, (0, 0)).unwrap();
        let raw = ((17u32 << 2) & 0x3FF) as i64;
        let expect = if PIXEL_DEPTH >= 10 { raw << (PIXEL_DEPTH - 10) } else { raw >> (10 - PIXEL_DEPTH) };
        assert_eq!(pic.sample(PLANE_Y, 1, 1) as i64, expect);
    }

    #[cfg(feature = "high-bit-depth")]
    #[test]
    fn test_ingest_8bit_scales_up() {
        let mut pic = PictureBuffer::new();
        pic.create(16, 16, ChromaFormat::I444, 16, 16, 2).unwrap();
        let plane = vec![200u8; 16 * 16];
        let input = InputPicture {
            planes: [&plane, &plane, &plane],
            strides: [16, 16, 16],
            bit_depth: 8,
            format: ChromaFormat::I444,
        };
        pic.ingest(&input, (0, 0)).unwrap();
        assert_eq!(pic.sample(PLANE_Y, 4, 4), 200 << 2, "8 位输入左移到内部 10 位");
    }

    #[test]
    fn test_border_replicates_after_extend() {
        let mut pic = PictureBuffer::new();
        pic.create(32, 32, ChromaFormat::I420, 32, 32, 3).unwrap();
        let luma = gradient(32, 32, 32);
        let chroma = gradient(16, 16, 16);
        let input = InputPicture {
            planes: [&luma, &chroma, &chroma],
            strides: [32, 16, 16],
            bit_depth: 8,
            format: ChromaFormat::I420,
        };
        pic.ingest(&input, (0, 0)).unwrap();
        pic.extend_luma_border();
        let mx = pic.luma_margin_x() as isize;
        let my = pic.luma_margin_y() as isize;
        assert_eq!(pic.sample(PLANE_Y, -mx, -my), pic.sample(PLANE_Y, 0, 0));
        assert_eq!(pic.sample(PLANE_Y, 31 + mx, 5), pic.sample(PLANE_Y, 31, 5));
        assert_eq!(pic.sample(PLANE_Y, 4, 31 + my), pic.sample(PLANE_Y, 4, 31));
        assert!(pic.ensure_chroma_extended());
        assert_eq!(pic.sample(PLANE_CR, -3, -3), pic.sample(PLANE_CR, 0, 0));
    }
}
