//! Source-image metadata: header-only dimension probe, EXIF orientation,
//! and the display label shown for accessibility.

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::metadata::Orientation;

use crate::error::Error;

#[derive(Debug, Clone)]
pub struct ImageMeta {
    pub path: PathBuf,
    pub raw_w: u32,
    pub raw_h: u32,
    /// Dimensions after EXIF orientation is applied, i.e. what a viewer shows.
    pub display_w: u32,
    pub display_h: u32,
    pub exif_orientation: u16,
    /// Human-readable label for the composed canvas, taken from the file name.
    pub label: String,
}

/// Read only the header for dimensions plus the EXIF orientation tag.
pub fn probe(path: &Path) -> Result<ImageMeta, Error> {
    let (raw_w, raw_h) = image::image_dimensions(path)?;
    if raw_w == 0 || raw_h == 0 {
        return Err(Error::BadImage(format!(
            "{} has degenerate dimensions {raw_w}x{raw_h}",
            path.display()
        )));
    }
    let o = read_exif_orientation(path).unwrap_or(1);
    let swap = matches!(o, 5 | 6 | 7 | 8);
    let (display_w, display_h) = if swap { (raw_h, raw_w) } else { (raw_w, raw_h) };
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ImageMeta {
        path: path.to_path_buf(),
        raw_w,
        raw_h,
        display_w,
        display_h,
        exif_orientation: o,
        label,
    })
}

/// Decode the image and apply its EXIF orientation so the pixels match the
/// probed display dimensions.
pub fn load_oriented(meta: &ImageMeta) -> Result<RgbaImage, Error> {
    let mut img = image::open(&meta.path)?;
    if let Some(orientation) = Orientation::from_exif(meta.exif_orientation as u8) {
        img.apply_orientation(orientation);
    }
    Ok(img.to_rgba8())
}

fn read_exif_orientation(path: &Path) -> Option<u16> {
    let f = fs::File::open(path).ok()?;
    let mut buf = BufReader::new(f);
    let reader = exif::Reader::new().read_from_container(&mut buf).ok()?;
    use exif::{In, Tag, Value};
    let field = reader.get_field(Tag::Orientation, In::PRIMARY)?;
    match &field.value {
        Value::Short(arr) if !arr.is_empty() => Some(arr[0]),
        Value::Long(arr) if !arr.is_empty() => Some(arr[0] as u16),
        _ => Some(1),
    }
}
