// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Software preview raster: one pick ray per pixel, front-to-back blending of
//! visible front-faced materials over a white background.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use qecp_scene_port::{CameraState, PortError, Side};

use crate::HeadlessScene;

/// Largest edge of an exported image in pixels.
const MAX_EDGE: f32 = 4096.0;

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub(crate) fn rasterize(scene: &HeadlessScene, scale: f32) -> (u32, u32, Vec<u8>) {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    let (vw, vh, _) = scene.viewport;
    let w = (vw.max(1) as f32 * scale).round().clamp(1.0, MAX_EDGE) as u32;
    let h = (vh.max(1) as f32 * scale).round().clamp(1.0, MAX_EDGE) as u32;
    let aspect = w as f32 / h as f32;
    let mut pixels = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let ndc = CameraState::pixel_to_ndc(x as f32 + 0.5, y as f32 + 0.5, w, h);
            let ray = scene.camera.ray_through(ndc, aspect);
            let mut rgb = [0.0_f32; 3];
            let mut remaining = 1.0_f32;
            for (id, _) in scene.world_hits(&ray) {
                let Some(mesh) = scene.object(id) else {
                    continue;
                };
                if !mesh.visible {
                    continue;
                }
                let Some(mat) = scene.material_desc(mesh.material) else {
                    continue;
                };
                // back-faced shells only show as a rim on a real rasterizer
                if mat.side == Side::Back {
                    continue;
                }
                let alpha = mat.opacity.clamp(0.0, 1.0) * remaining;
                for (acc, c) in rgb.iter_mut().zip(mat.color.to_f32()) {
                    *acc += c * alpha;
                }
                remaining -= alpha;
                if remaining <= 0.01 {
                    break;
                }
            }
            for c in rgb {
                pixels.push(((c + remaining) * 255.0).round().clamp(0.0, 255.0) as u8);
            }
            pixels.push(255);
        }
    }
    (w, h, pixels)
}

pub(crate) fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, PortError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(rgba, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| PortError::Backend(e.to_string()))?;
    Ok(out)
}

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Standard padded base64, enough for data URLs.
pub(crate) fn base64(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let b = [
            chunk[0],
            chunk.get(1).copied().unwrap_or(0),
            chunk.get(2).copied().unwrap_or(0),
        ];
        let n = (u32::from(b[0]) << 16) | (u32::from(b[1]) << 8) | u32::from(b[2]);
        let emit = chunk.len() + 1;
        for k in 0..4 {
            if k < emit {
                out.push(char::from(ALPHABET[((n >> (18 - 6 * k)) & 63) as usize]));
            } else {
                out.push('=');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_padding() {
        assert_eq!(base64(b"Ma"), "TWE=");
        assert_eq!(base64(b"Man"), "TWFu");
        assert_eq!(base64(b"M"), "TQ==");
        assert_eq!(base64(b""), "");
    }

    #[test]
    fn empty_scene_is_white() {
        let mut scene = HeadlessScene::new();
        scene.viewport = (2, 2, 1.0);
        let (w, h, px) = rasterize(&scene, 1.0);
        assert_eq!((w, h), (2, 2));
        assert!(px.iter().all(|b| *b == 255));
    }
}
