//! 测试用图像构造.

use yuce_core::ChromaFormat;
use yuce_picture::{InputPicture, PictureBuffer};

/// 线性同余生成的 8 bit 采样, 取值范围 [16, 220)
pub(crate) fn noise_bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            16 + ((state >> 16) % 204) as u8
        })
        .collect()
}

/// 由 8 bit 平面数据构造图像并扩展全部边距
pub(crate) fn picture_from_planes(width: usize, height: usize, format: ChromaFormat, planes: [&[u8]; 3]) -> PictureBuffer {
    let hs = format.hshift();
    let mut pic = PictureBuffer::new();
    pic.create(width, height, format, 64, 64, 4).unwrap();
    let input = InputPicture {
        planes,
        strides: [width, width >> hs, width >> hs],
        bit_depth: 8,
        format,
    };
    pic.ingest(&input, (0, 0)).unwrap();
    pic.extend_luma_border();
    pic.ensure_chroma_extended();
    pic
}

/// 三个平面的噪声数据
pub(crate) fn noise_planes(width: usize, height: usize, format: ChromaFormat, seed: u32) -> [Vec<u8>; 3] {
    let (hs, vs) = format.chroma_shifts();
    let chroma = (width >> hs) * (height >> vs);
    [
        noise_bytes(width * height, seed),
        noise_bytes(chroma, seed.wrapping_add(101)),
        noise_bytes(chroma, seed.wrapping_add(202)),
    ]
}

/// 噪声图像, 边距已扩展
pub(crate) fn noise_picture(width: usize, height: usize, format: ChromaFormat, seed: u32) -> PictureBuffer {
    let [y, u, v] = noise_planes(width, height, format, seed);
    picture_from_planes(width, height, format, [&y, &u, &v])
}
