// crates/lumacut-cli/src/helpers/png_io.rs
//
// PNG ⇄ packed RGBA8. Every input colour type is normalised to RGBA so the
// raster chain only ever sees one layout.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

pub struct RgbaImage {
    pub width:  u32,
    pub height: u32,
    pub data:   Vec<u8>,
}

pub fn read_rgba(path: &Path) -> Result<RgbaImage> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("{} is not a PNG", path.display()))?;
    let size = reader
        .output_buffer_size()
        .ok_or_else(|| anyhow!("{} is too large to decode", path.display()))?;
    let mut buf = vec![0u8; size];
    let info = reader.next_frame(&mut buf)?;
    let px = &buf[..info.buffer_size()];

    let data: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => px.to_vec(),
        png::ColorType::Rgb => px
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => px
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => px.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        other => bail!("unsupported PNG colour type {other:?} in {}", path.display()),
    };

    log::debug!("[png] read {} ({}x{})", path.display(), info.width, info.height);
    Ok(RgbaImage { width: info.width, height: info.height, data })
}

pub fn write_rgba(path: &Path, img: &RgbaImage) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let w = &mut BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, img.width, img.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&img.data)?;
    writer.finish()?;
    log::debug!("[png] wrote {} ({}x{})", path.display(), img.width, img.height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_survives_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let img = RgbaImage {
            width:  2,
            height: 1,
            data:   vec![255, 0, 0, 255, 0, 0, 255, 128],
        };
        write_rgba(&path, &img).unwrap();

        let back = read_rgba(&path).unwrap();
        assert_eq!((back.width, back.height), (2, 1));
        assert_eq!(back.data, img.data);
    }

    #[test]
    fn rgb_input_gets_opaque_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        {
            let file = File::create(&path).unwrap();
            let mut enc = png::Encoder::new(BufWriter::new(file), 1, 1);
            enc.set_color(png::ColorType::Rgb);
            enc.set_depth(png::BitDepth::Eight);
            enc.write_header().unwrap().write_image_data(&[10, 20, 30]).unwrap();
        }
        assert_eq!(read_rgba(&path).unwrap().data, vec![10, 20, 30, 255]);
    }

    #[test]
    fn non_png_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(read_rgba(&path).is_err());
    }
}
