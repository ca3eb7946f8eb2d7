//! Conversions between GPU texture rows and the packed RGB the screenshot
//! writer expects.

use rayon::prelude::*;

/// Byte order of a 4-byte-per-pixel texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgba,
    Bgra,
}

/// Row pitch of a texture copy: `width * bytes_per_pixel` rounded up to
/// `alignment`.
#[must_use]
pub fn padded_bytes_per_row(width: u32, bytes_per_pixel: u32, alignment: u32) -> u32 {
    let unpadded = width * bytes_per_pixel;
    unpadded.div_ceil(alignment) * alignment
}

/// Drops row padding and alpha, reordering to RGB.
///
/// # Panics
/// Panics if `src` holds fewer than `height` rows of `bytes_per_row` bytes,
/// or a row is narrower than `width` pixels.
#[must_use]
pub fn padded_rows_to_rgb(
    src: &[u8],
    width: u32,
    height: u32,
    bytes_per_row: u32,
    order: ChannelOrder,
) -> Vec<u8> {
    let width = width as usize;
    let height = height as usize;
    let bytes_per_row = bytes_per_row as usize;

    assert!(
        bytes_per_row >= width * 4,
        "row pitch {bytes_per_row} is too small for {width} pixels"
    );
    assert!(
        src.len() >= bytes_per_row * height,
        "source length {} is too small for {height} rows of {bytes_per_row} bytes",
        src.len()
    );

    let mut rgb = vec![0; width * height * 3];
    if width == 0 {
        return rgb;
    }

    rgb.par_chunks_exact_mut(width * 3)
        .zip(src.par_chunks(bytes_per_row))
        .for_each(|(dst_row, src_row)| {
            for (dst, src) in dst_row
                .chunks_exact_mut(3)
                .zip(src_row[..width * 4].chunks_exact(4))
            {
                match order {
                    ChannelOrder::Rgba => dst.copy_from_slice(&src[..3]),
                    ChannelOrder::Bgra => {
                        dst[0] = src[2];
                        dst[1] = src[1];
                        dst[2] = src[0];
                    }
                }
            }
        });

    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_bytes_per_row_rounds_up_to_alignment() {
        assert_eq!(padded_bytes_per_row(1, 4, 256), 256);
        assert_eq!(padded_bytes_per_row(64, 4, 256), 256);
        assert_eq!(padded_bytes_per_row(65, 4, 256), 512);
        assert_eq!(padded_bytes_per_row(1280, 4, 256), 5120);
    }

    #[test]
    fn rgba_rows_drop_alpha_and_padding() {
        let src = vec![
            255, 0, 0, 255, 0, 255, 0, 255, 9, 9, 9, 9, // row 0 + padding
            0, 0, 255, 255, 10, 20, 30, 40, 9, 9, 9, 9, // row 1 + padding
        ];

        let rgb = padded_rows_to_rgb(&src, 2, 2, 12, ChannelOrder::Rgba);

        assert_eq!(rgb, vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30]);
    }

    #[test]
    fn bgra_rows_are_swizzled() {
        let src = vec![30, 20, 10, 255, 3, 2, 1, 0];

        let rgb = padded_rows_to_rgb(&src, 2, 1, 8, ChannelOrder::Bgra);

        assert_eq!(rgb, vec![10, 20, 30, 1, 2, 3]);
    }

    #[test]
    fn empty_image_converts_to_empty_buffer() {
        let rgb = padded_rows_to_rgb(&[], 0, 0, 0, ChannelOrder::Rgba);

        assert!(rgb.is_empty());
    }

    #[test]
    #[should_panic(expected = "too small")]
    fn short_source_panics() {
        let _ = padded_rows_to_rgb(&[0; 8], 2, 2, 8, ChannelOrder::Rgba);
    }
}
