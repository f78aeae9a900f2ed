use crate::image::Image;

/// Plain-text (P3) PPM encoding of an image
pub struct PpmImage {
    width: usize,
    height: usize,
    body: String,
}

impl PpmImage {
    pub fn create(width: usize, height: usize) -> PpmImage {
        PpmImage { width, height, body: String::from("") }
    }

    pub fn from_image(image: &Image) -> PpmImage {
        let mut ppm = PpmImage::create(image.width(), image.height());
        for row in image.to_rgb8().chunks(image.width().max(1) * 3) {
            for rgb in row.chunks(3) {
                ppm.append_pixel(rgb[0], rgb[1], rgb[2]);
            }
            ppm.body.push('\n');
        }
        ppm
    }

    pub fn append_pixel(&mut self, r: u8, g: u8, b: u8) {
        self.body.push_str(&format!("{:4} {:4} {:4}", r, g, b));
    }

    pub fn get_text(&self) -> String {
        let mut text = String::new();
        // COLS x ROWS; 255 is max colour
        text.push_str(&format!("P3\n{} {}\n255\n", self.width, self.height));
        text.push_str(&self.body);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn header_and_rows() {
        let mut image = Image::new(2, 1);
        image.set_pixel(0, 1, Vec3::new(1.0, 0.0, 0.5));
        let text = PpmImage::from_image(&image).get_text();
        assert_eq!(text, "P3\n2 1\n255\n   0    0    0 255    0  127\n");
    }
}
