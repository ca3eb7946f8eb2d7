use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use image::ColorType;

use crate::core::data::pixel_buffer::PixelBuffer;
use crate::storage::errors::ScreenshotError;

/// `Screenshot_YYYY-MM-DD_HH-MM-SS.png`, every field zero padded.
#[must_use]
pub fn screenshot_file_name<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("Screenshot_%Y-%m-%d_%H-%M-%S.png").to_string()
}

pub fn write_png(buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> Result<(), ScreenshotError> {
    image::save_buffer(
        filepath,
        buffer.buffer(),
        buffer.width(),
        buffer.height(),
        ColorType::Rgb8,
    )?;

    Ok(())
}

/// Writes `buffer` into `dir` under a name stamped with `at`, creating `dir`
/// if needed. Returns the written path.
pub fn write_screenshot<Tz>(
    buffer: &PixelBuffer,
    dir: impl AsRef<Path>,
    at: &DateTime<Tz>,
) -> Result<PathBuf, ScreenshotError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let path = dir.join(screenshot_file_name(at));
    write_png(buffer, &path)?;
    log::info!(
        "saved {}x{} screenshot to {}",
        buffer.width(),
        buffer.height(),
        path.display()
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "fractal_viewer_{name}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height)
            .flat_map(|i| [i as u8, (i * 2) as u8, 255])
            .collect();
        PixelBuffer::from_data(width, height, data).unwrap()
    }

    #[test]
    fn file_name_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();

        assert_eq!(
            screenshot_file_name(&at),
            "Screenshot_2024-03-07_09-05-02.png"
        );
    }

    #[test]
    fn write_screenshot_creates_readable_png() {
        let dir = scratch_dir("png");
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 58).unwrap();
        let buffer = gradient(4, 3);

        let path = write_screenshot(&buffer, &dir, &at).unwrap();

        assert_eq!(path, dir.join("Screenshot_2025-12-31_23-59-58.png"));
        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.as_raw(), buffer.buffer());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn write_png_to_missing_directory_fails() {
        let dir = scratch_dir("missing");
        let buffer = gradient(2, 2);

        let result = write_png(&buffer, dir.join("nested").join("out.png"));

        assert!(matches!(result, Err(ScreenshotError::Encode(_))));
    }
}
