/// Braille Unicode canvas for high-resolution terminal graphics.
/// Each character cell represents a 2x4 pixel grid (8 dots).
/// Unicode Braille patterns: U+2800 to U+28FF
pub struct BrailleCanvas {
    width: usize,   // Characters
    height: usize,  // Characters
    cells: Vec<u8>, // Bit pattern per char, row-major
}

impl BrailleCanvas {
    /// Create a new canvas with the given character dimensions.
    /// Effective pixel resolution: width*2 x height*4
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0u8; width * height],
        }
    }

    /// Pixel-space width (2 dots per character column)
    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    /// Pixel-space height (4 dots per character row)
    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }

    /// Braille dot bit for a pixel offset within its character cell:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    #[inline(always)]
    fn dot_bit(x: usize, y: usize) -> u8 {
        match (x % 2, y % 4) {
            (0, 0) => 0x01,
            (1, 0) => 0x08,
            (0, 1) => 0x02,
            (1, 1) => 0x10,
            (0, 2) => 0x04,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            _ => 0x80,
        }
    }

    /// Set a pixel at the given pixel coordinates.
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        let cx = x / 2;
        let cy = y / 4;
        if cx >= self.width || cy >= self.height {
            return;
        }
        self.cells[cy * self.width + cx] |= Self::dot_bit(x, y);
    }

    /// Set a pixel using signed coordinates (ignores negative values)
    pub fn set_pixel_signed(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize);
        }
    }

    /// Fill a horizontal run of pixels on row `y` from `x0` to `x1` inclusive.
    /// Used by the polygon scanline fill; clips to the canvas.
    pub fn fill_span(&mut self, y: i32, x0: i32, x1: i32) {
        if y < 0 || y as usize >= self.pixel_height() {
            return;
        }
        let max_x = self.pixel_width() as i32 - 1;
        let start = x0.max(0);
        let end = x1.min(max_x);
        for x in start..=end {
            self.set_pixel(x as usize, y as usize);
        }
    }

    /// Convert the canvas to a string of Braille characters
    #[cfg(test)]
    pub fn to_string(&self) -> String {
        (0..self.height)
            .map(|row| self.row_to_string(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Get a specific row as a string (for line-by-line rendering)
    pub fn row_to_string(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }
        self.cells[row * self.width..(row + 1) * self.width]
            .iter()
            .map(|&b| char::from_u32(0x2800 + b as u32).unwrap_or(' '))
            .collect()
    }

    /// Get all rows as an iterator of strings
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height).map(|i| self.row_to_string(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0);
        assert_eq!(canvas.to_string(), "⠁"); // U+2801
    }

    #[test]
    fn test_all_dots() {
        let mut canvas = BrailleCanvas::new(1, 1);
        for x in 0..2 {
            for y in 0..4 {
                canvas.set_pixel(x, y);
            }
        }
        assert_eq!(canvas.to_string(), "⣿"); // U+28FF (all dots)
    }

    #[test]
    fn test_fill_span_clips() {
        let mut canvas = BrailleCanvas::new(2, 1);
        // Span extends past both edges; must clip, not panic
        canvas.fill_span(0, -5, 100);
        assert_eq!(canvas.to_string(), "⠉⠉"); // top dot row of both cells
    }

    #[test]
    fn test_fill_span_off_canvas_row() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.fill_span(-1, 0, 3);
        canvas.fill_span(4, 0, 3);
        assert_eq!(canvas.to_string(), "⠀⠀");
    }
}
