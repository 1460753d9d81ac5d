#![cfg(feature = "host")]
//! Host-side PNG previews of rendered frames.
//!
//! Draws the frame the way the physical panel looks: round LED dots on a
//! dark card, each lattice row shifted half a cell to follow the
//! triangular packing of the balls. Handy for eyeballing animations and
//! generating documentation assets without hardware.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder};

use crate::frame::PixelFrame;
use crate::lattice::{self, COLS, ROWS};

/// Render a frame into a PNG file; `cell_size` is the pixel pitch of one
/// ball.
///
/// # Errors
///
/// Propagates filesystem and PNG encoding failures.
pub fn write_frame_png(
    frame: &PixelFrame,
    output_path: impl AsRef<Path>,
    cell_size: u32,
) -> Result<(), Box<dyn Error>> {
    assert!(cell_size >= 4, "cell_size must be at least 4");
    let output_path = output_path.as_ref();

    // Odd rows sit half a cell to the right; reserve that extra margin.
    let width = COLS as u32 * cell_size + cell_size / 2;
    let height = ROWS as u32 * cell_size;
    let mut bytes = vec![0u8; (width * height * 3) as usize];

    let led_radius = (cell_size / 2).saturating_sub(1).max(1) as i32;
    let radius_sq = led_radius * led_radius;

    for row in 0..ROWS {
        for col in 0..COLS {
            let Some(index) = lattice::strip_index(row as i32, col as i32) else {
                continue;
            };
            let pixel = frame[index];
            let origin_x = col as u32 * cell_size + (row as u32 % 2) * (cell_size / 2);
            let origin_y = row as u32 * cell_size;
            let center = (cell_size / 2) as i32;

            for local_y in 0..cell_size {
                let delta_y = local_y as i32 - center;
                for local_x in 0..cell_size {
                    let delta_x = local_x as i32 - center;
                    if delta_x * delta_x + delta_y * delta_y > radius_sq {
                        continue;
                    }
                    let x = origin_x + local_x;
                    let y = origin_y + local_y;
                    if x >= width || y >= height {
                        continue;
                    }
                    let offset = ((y * width + x) * 3) as usize;
                    bytes[offset] = pixel.r;
                    bytes[offset + 1] = pixel.g;
                    bytes[offset + 2] = pixel.b;
                }
            }
        }
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&bytes)?;
    writer.finish()?;
    Ok(())
}
