//! Procedural texture painters for the face canvases.
//!
//! Each painter writes into a [`FaceCanvas`] and is meant to be handed
//! to `Sky::paint`, which resolves faces and raises dirty flags.

use rand::Rng;

use crate::canvas::FaceCanvas;

const SUN_COLOR: [u8; 3] = [255, 238, 180];
const MOON_COLOR: [u8; 3] = [226, 229, 255];

/// Paint the sun: a solid core with a soft halo, centered on the face.
pub fn sun(canvas: &mut FaceCanvas) {
    let extent = canvas.width().min(canvas.height()) as f32;
    if extent == 0.0 {
        return;
    }
    let cx = canvas.width() as f32 / 2.0;
    let cy = canvas.height() as f32 / 2.0;
    let core = extent * 0.08;
    let halo = extent * 0.20;

    paint_region(canvas, cx, cy, halo, |dist| {
        let alpha = if dist <= core {
            1.0
        } else {
            let falloff = 1.0 - (dist - core) / (halo - core);
            falloff * falloff
        };
        [SUN_COLOR[0], SUN_COLOR[1], SUN_COLOR[2], (alpha * 255.0) as u8]
    });
}

/// Paint the moon at a phase fraction: 0 is full, 0.5 half, 1 new.
///
/// The shadow is a second disc of the same radius sliding over the lit
/// one as the fraction grows; shadowed pixels stay transparent.
pub fn moon(canvas: &mut FaceCanvas, phase: f32) {
    let extent = canvas.width().min(canvas.height()) as f32;
    if extent == 0.0 {
        return;
    }
    let cx = canvas.width() as f32 / 2.0;
    let cy = canvas.height() as f32 / 2.0;
    let radius = extent * 0.12;
    let shadow_cx = cx + (1.0 - phase.clamp(0.0, 1.0)) * 2.0 * radius;
    let rim = radius * 0.08;

    paint_region(canvas, cx, cy, radius, |dist| {
        let alpha = ((radius - dist) / rim).clamp(0.0, 1.0);
        [MOON_COLOR[0], MOON_COLOR[1], MOON_COLOR[2], (alpha * 255.0) as u8]
    });

    // Carve the shadow disc out of what was just painted.
    let min_x = ((shadow_cx - radius).floor().max(0.0)) as u32;
    let max_x = ((shadow_cx + radius).ceil().min(canvas.width() as f32 - 1.0)) as u32;
    let min_y = ((cy - radius).floor().max(0.0)) as u32;
    let max_y = ((cy + radius).ceil().min(canvas.height() as f32 - 1.0)) as u32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 - shadow_cx;
            let dy = y as f32 - cy;
            if (dx * dx + dy * dy).sqrt() <= radius {
                canvas.image_mut().get_pixel_mut(x, y).0 = [0, 0, 0, 0];
            }
        }
    }
}

/// Scatter `count` stars across the face using the thread RNG.
pub fn stars(canvas: &mut FaceCanvas, count: u32) {
    stars_with(canvas, count, &mut rand::thread_rng());
}

/// Deterministic star scatter for callers that seed their own RNG.
pub fn stars_with<R: Rng>(canvas: &mut FaceCanvas, count: u32, rng: &mut R) {
    let width = canvas.width();
    let height = canvas.height();
    if width == 0 || height == 0 {
        return;
    }
    for _ in 0..count {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        let brightness = rng.gen_range(140..=255u16) as u8;
        let blue = (brightness as u16 + 30).min(255) as u8;
        canvas.blend_pixel(x, y, [brightness, brightness, blue, 255]);
        // roughly one star in ten gets a second pixel
        if rng.gen_bool(0.1) {
            canvas.blend_pixel(x + 1, y, [brightness, brightness, blue, 200]);
        }
    }
}

fn paint_region<F>(canvas: &mut FaceCanvas, cx: f32, cy: f32, radius: f32, shade: F)
where
    F: Fn(f32) -> [u8; 4],
{
    let min_x = ((cx - radius).floor().max(0.0)) as u32;
    let max_x = ((cx + radius).ceil().min(canvas.width() as f32 - 1.0)) as u32;
    let min_y = ((cy - radius).floor().max(0.0)) as u32;
    let max_y = ((cy + radius).ceil().min(canvas.height() as f32 - 1.0)) as u32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= radius {
                let color = shade(dist);
                if color[3] > 0 {
                    canvas.blend_pixel(x, y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn lit_pixels(canvas: &FaceCanvas) -> usize {
        canvas.image().pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn test_sun_fills_center() {
        let mut canvas = FaceCanvas::new(64);
        sun(&mut canvas);
        assert_eq!(canvas.image().get_pixel(32, 32).0[3], 255);
        assert!(lit_pixels(&canvas) > 50);
        // Corners stay untouched.
        assert_eq!(canvas.image().get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_moon_phases_shrink_the_disc() {
        let mut full = FaceCanvas::new(64);
        moon(&mut full, 0.0);
        let mut waning = FaceCanvas::new(64);
        moon(&mut waning, 0.6);
        let mut new_moon = FaceCanvas::new(64);
        moon(&mut new_moon, 1.0);

        assert!(lit_pixels(&full) > lit_pixels(&waning));
        assert!(lit_pixels(&waning) > lit_pixels(&new_moon));
        assert_eq!(lit_pixels(&new_moon), 0);
    }

    #[test]
    fn test_stars_are_scattered() {
        let mut canvas = FaceCanvas::new(128);
        let mut rng = StdRng::seed_from_u64(7);
        stars_with(&mut canvas, 200, &mut rng);
        let lit = lit_pixels(&canvas);
        assert!(lit > 100, "expected a field of stars, got {lit} pixels");
        assert!(lit <= 2 * 200);
    }
}
