use crate::math::{Colour, Vec3};

/// Row-major `height × width × 3` buffer of linear colour, row 0 at the top
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Image {
    /// A black image
    pub fn new(width: usize, height: usize) -> Image {
        Image { width, height, data: vec![0.0; width * height * 3] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(row < self.height && col < self.width, "pixel ({}, {}) outside {}x{} image", row, col, self.width, self.height);
        (row * self.width + col) * 3
    }

    pub fn pixel(&self, row: usize, col: usize) -> Colour {
        let i = self.offset(row, col);
        Vec3::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Stores the colour clipped to [0,1]
    pub fn set_pixel(&mut self, row: usize, col: usize, colour: Colour) {
        let i = self.offset(row, col);
        let colour = colour.clip(0.0, 1.0);
        self.data[i] = colour.x;
        self.data[i + 1] = colour.y;
        self.data[i + 2] = colour.z;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// 8-bit channels, truncating rather than rounding
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.data.iter().map(|c| (c * 255.0) as u8).collect()
    }
}
