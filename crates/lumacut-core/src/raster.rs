// crates/lumacut-core/src/raster.rs
//
// Software render path: applies a FilterValue (+ ImageExtras) to an RGBA8
// frame the way the browser applies the equivalent render string.
//
// Stages run in render-string order:
//   brightness → contrast → saturate → blur → hue-rotate → sepia → grayscale
//   → invert → opacity
// Identity stages are skipped entirely, so an identity filter leaves the
// buffer bit-for-bit unchanged. Work is split by rows across rayon's pool;
// the blur is a separable gaussian with sigma = blur px, edges clamped.

use rayon::prelude::*;
use thiserror::Error;

use crate::filter::FilterValue;
use crate::helpers::color::{self, ColorMatrix};
use crate::render::ImageExtras;
use crate::transform::{Orientation, Rotation};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("buffer is {actual} bytes, expected {expected} for a {width}x{height} RGBA frame")]
    BufferSize { width: u32, height: u32, expected: usize, actual: usize },
}

fn check_len(data: &[u8], width: u32, height: u32) -> Result<(), RasterError> {
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(RasterError::BufferSize { width, height, expected, actual: data.len() });
    }
    Ok(())
}

// ── Per-pixel stages ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
enum PixelOp {
    Brightness(f32),
    Contrast(f32),
    Matrix(ColorMatrix),
    Invert(f32),
    Opacity(f32),
}

impl PixelOp {
    #[inline]
    fn apply(&self, px: &mut [f32; 4]) {
        match self {
            PixelOp::Brightness(a) => {
                for c in &mut px[..3] { *c = color::brightness(*c, *a); }
            }
            PixelOp::Contrast(a) => {
                for c in &mut px[..3] { *c = color::contrast(*c, *a); }
            }
            PixelOp::Matrix(m) => {
                let [r, g, b] = m.apply([px[0], px[1], px[2]]);
                px[0] = r;
                px[1] = g;
                px[2] = b;
            }
            PixelOp::Invert(a) => {
                for c in &mut px[..3] { *c = color::invert(*c, *a); }
            }
            PixelOp::Opacity(a) => {
                px[3] = color::clamp01(px[3] * color::clamp01(*a));
            }
        }
    }
}

/// (ops before blur, blur sigma, ops after blur). Identity stages omitted.
fn plan(f: &FilterValue, extras: &ImageExtras) -> (Vec<PixelOp>, f32, Vec<PixelOp>) {
    let mut pre  = Vec::with_capacity(3);
    let mut post = Vec::with_capacity(5);

    if f.brightness != 100.0 { pre.push(PixelOp::Brightness(f.brightness / 100.0)); }
    if f.contrast   != 100.0 { pre.push(PixelOp::Contrast(f.contrast / 100.0)); }
    if f.saturation != 100.0 { pre.push(PixelOp::Matrix(ColorMatrix::saturate(f.saturation / 100.0))); }

    if f.hue        != 0.0   { post.push(PixelOp::Matrix(ColorMatrix::hue_rotate(f.hue))); }
    if f.sepia      > 0.0    { post.push(PixelOp::Matrix(ColorMatrix::sepia(f.sepia / 100.0))); }
    if f.grayscale  > 0.0    { post.push(PixelOp::Matrix(ColorMatrix::grayscale(f.grayscale / 100.0))); }
    if extras.invert  > 0.0   { post.push(PixelOp::Invert(extras.invert / 100.0)); }
    if extras.opacity < 100.0 { post.push(PixelOp::Opacity(extras.opacity / 100.0)); }

    let sigma = if f.blur.is_finite() { f.blur.max(0.0) } else { 0.0 };
    (pre, sigma, post)
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Apply `f` and `extras` to a packed RGBA8 frame in place.
pub fn apply_filter(
    data:   &mut [u8],
    width:  u32,
    height: u32,
    f:      &FilterValue,
    extras: &ImageExtras,
) -> Result<(), RasterError> {
    check_len(data, width, height)?;

    let (pre, sigma, post) = plan(f, extras);
    let blur = sigma >= 0.05;
    if pre.is_empty() && post.is_empty() && !blur {
        return Ok(());
    }
    if width == 0 || height == 0 {
        return Ok(());
    }
    log::debug!(
        "[raster] {width}x{height}: {} pre ops, sigma {sigma}, {} post ops",
        pre.len(),
        post.len(),
    );

    let w = width as usize;
    let mut px: Vec<[f32; 4]> = data
        .par_chunks_exact(4)
        .map(|p| [color::to_unit(p[0]), color::to_unit(p[1]), color::to_unit(p[2]), color::to_unit(p[3])])
        .collect();

    run_ops(&mut px, w, &pre);
    if blur {
        gaussian_blur(&mut px, w, height as usize, sigma);
    }
    run_ops(&mut px, w, &post);

    data.par_chunks_exact_mut(4)
        .zip(px.par_iter())
        .for_each(|(out, p)| {
            out[0] = color::to_byte(p[0]);
            out[1] = color::to_byte(p[1]);
            out[2] = color::to_byte(p[2]);
            out[3] = color::to_byte(p[3]);
        });
    Ok(())
}

/// Rotate/flip a packed RGBA8 frame. Returns the new buffer and dimensions.
/// Flips are applied after rotation, matching the transform-string order.
pub fn apply_orientation(
    data:   &[u8],
    width:  u32,
    height: u32,
    o:      &Orientation,
) -> Result<(Vec<u8>, u32, u32), RasterError> {
    check_len(data, width, height)?;
    if o.is_identity() || data.is_empty() {
        let (ow, oh) = if o.rotation.is_quarter() { (height, width) } else { (width, height) };
        return Ok((data.to_vec(), ow, oh));
    }

    let (w, h) = (width as usize, height as usize);
    let (ow, oh) = if o.rotation.is_quarter() { (h, w) } else { (w, h) };
    let mut out = vec![0u8; data.len()];

    out.par_chunks_exact_mut(ow * 4)
        .enumerate()
        .for_each(|(oy, row)| {
            for ox in 0..ow {
                // Undo the flips first (they were applied last), then the rotation.
                let fx = if o.flip_h { ow - 1 - ox } else { ox };
                let fy = if o.flip_v { oh - 1 - oy } else { oy };
                let (sx, sy) = match o.rotation {
                    Rotation::Deg0   => (fx, fy),
                    Rotation::Deg90  => (fy, h - 1 - fx),
                    Rotation::Deg180 => (w - 1 - fx, h - 1 - fy),
                    Rotation::Deg270 => (w - 1 - fy, fx),
                };
                let si = (sy * w + sx) * 4;
                row[ox * 4..ox * 4 + 4].copy_from_slice(&data[si..si + 4]);
            }
        });

    Ok((out, ow as u32, oh as u32))
}

// ── Internals ─────────────────────────────────────────────────────────────────

fn run_ops(px: &mut [[f32; 4]], width: usize, ops: &[PixelOp]) {
    if ops.is_empty() {
        return;
    }
    px.par_chunks_mut(width.max(1)).for_each(|row| {
        for p in row.iter_mut() {
            for op in ops {
                op.apply(p);
            }
        }
    });
}

/// Taps past `max_radius` would only re-sample the clamped edge pixel, so the
/// radius never exceeds it.
fn gaussian_kernel(sigma: f32, max_radius: usize) -> Vec<f32> {
    let max_radius = max_radius.max(1);
    let want = (sigma * 3.0).ceil().max(1.0);
    let radius = if want >= max_radius as f32 { max_radius } else { want as usize };
    let denom  = 2.0 * sigma * sigma;
    let mut k: Vec<f32> = (0..=radius * 2)
        .map(|i| {
            let d = i as f32 - radius as f32;
            (-(d * d) / denom).exp()
        })
        .collect();
    let sum: f32 = k.iter().sum();
    for v in &mut k {
        *v /= sum;
    }
    k
}

/// Separable gaussian, clamp-to-edge.
fn gaussian_blur(px: &mut [[f32; 4]], width: usize, height: usize, sigma: f32) {
    let kernel = gaussian_kernel(sigma, width.max(height));
    let radius = (kernel.len() / 2) as isize;

    // Horizontal pass: px → tmp.
    let mut tmp = vec![[0.0f32; 4]; px.len()];
    tmp.par_chunks_mut(width)
        .zip(px.par_chunks(width))
        .for_each(|(dst, src)| {
            for x in 0..width {
                let mut acc = [0.0f32; 4];
                for (i, k) in kernel.iter().enumerate() {
                    let sx = (x as isize + i as isize - radius).clamp(0, width as isize - 1) as usize;
                    for c in 0..4 {
                        acc[c] += src[sx][c] * k;
                    }
                }
                dst[x] = acc;
            }
        });

    // Vertical pass: tmp → px.
    let tmp = &tmp;
    px.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, dst)| {
            for (x, out) in dst.iter_mut().enumerate() {
                let mut acc = [0.0f32; 4];
                for (i, k) in kernel.iter().enumerate() {
                    let sy = (y as isize + i as isize - radius).clamp(0, height as isize - 1) as usize;
                    let src = tmp[sy * width + x];
                    for c in 0..4 {
                        acc[c] += src[c] * k;
                    }
                }
                *out = acc.map(color::clamp01);
            }
        });
}
