//! 8-bit RGB framebuffer with PPM and PNG output.
//!
//! Rows are stored bottom-up (row 0 is the bottom scanline, matching the
//! camera's `t` parameter) and written top-down.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when writing images.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}

pub type ImageResult<T> = Result<T, ImageError>;

/// Rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major, bottom row first
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at column `x`, row `y` counted from the bottom.
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Rows from the top of the image down.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[[u8; 3]]> {
        self.pixels.chunks(self.width.max(1) as usize).rev()
    }

    /// Packed RGB bytes, top row first.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.rows_top_down()
            .flat_map(|row| row.iter().flatten().copied())
            .collect()
    }

    /// Write as plain-text PPM (P3).
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for row in self.rows_top_down() {
            for [r, g, b] in row {
                writeln!(writer, "{} {} {}", r, g, b)?;
            }
        }

        writer.flush()
    }

    /// Save to `path`, choosing the format from the extension (`ppm` or `png`).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "ppm" => {
                let file = File::create(path)?;
                self.write_ppm(BufWriter::new(file))?;
            }
            "png" => {
                image::save_buffer(
                    path,
                    &self.to_rgb_bytes(),
                    self.width,
                    self.height,
                    image::ColorType::Rgb8,
                )?;
            }
            _ => return Err(ImageError::UnsupportedFormat(path.display().to_string())),
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
