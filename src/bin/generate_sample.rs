use std::path::Path;

use image::{GrayImage, Luma, Rgb, RgbImage};

const SIZE: u32 = 256;

/// Small deterministic PRNG (splitmix64), enough for reproducible samples.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

/// One noisy RGB frame with an elliptical blob, plus the blob's binary mask.
fn generate_pair(rng: &mut SimpleRng) -> (RgbImage, GrayImage) {
    let cx = rng.range(0.3, 0.7) * SIZE as f32;
    let cy = rng.range(0.3, 0.7) * SIZE as f32;
    let rx = rng.range(0.1, 0.25) * SIZE as f32;
    let ry = rng.range(0.1, 0.25) * SIZE as f32;
    let tint = [rng.range(0.4, 1.0), rng.range(0.4, 1.0), rng.range(0.4, 1.0)];

    let mut image = RgbImage::new(SIZE, SIZE);
    let mut mask = GrayImage::new(SIZE, SIZE);

    for (x, y, px) in image.enumerate_pixels_mut() {
        let dx = (x as f32 - cx) / rx;
        let dy = (y as f32 - cy) / ry;
        let inside = dx * dx + dy * dy <= 1.0;
        let base = if inside { 200.0 } else { 60.0 };
        let noise = rng.range(-25.0, 25.0);
        let channel = |t: f32| (base * t + noise).clamp(0.0, 255.0) as u8;
        *px = Rgb([channel(tint[0]), channel(tint[1]), channel(tint[2])]);
        if inside {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    (image, mask)
}

fn main() {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_dataset".to_string());
    let count: usize = std::env::args()
        .nth(2)
        .map(|n| n.parse().expect("count must be a number"))
        .unwrap_or(20);

    let root = Path::new(&output);
    let image_dir = root.join("image");
    let mask_dir = root.join("mask");
    std::fs::create_dir_all(&image_dir).expect("Failed to create image folder");
    std::fs::create_dir_all(&mask_dir).expect("Failed to create mask folder");

    let mut rng = SimpleRng::new(42);
    for i in 0..count {
        let (image, mask) = generate_pair(&mut rng);
        let name = format!("{i:04}.png");
        image
            .save(image_dir.join(&name))
            .expect("Failed to write image");
        mask.save(mask_dir.join(&name)).expect("Failed to write mask");
    }

    println!(
        "Wrote {count} image/mask pairs ({SIZE}x{SIZE}) to {}",
        root.display()
    );
}
