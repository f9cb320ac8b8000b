//! A 2D map image represented as a flat row-major array of pixels.

/// A 2D image stored as row-major pixels of type `P`.
#[derive(Clone, Debug, PartialEq)]
pub struct MapImage<P> {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major order. Length = `width * height`.
    pub pixels: Vec<P>,
}

impl<P: Copy + Default> MapImage<P> {
    /// Create an image with every pixel set to `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![P::default(); width as usize * height as usize],
        }
    }
}

impl<P: Copy> MapImage<P> {
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Set a single pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: P) {
        let idx = self.index(x, y);
        self.pixels[idx] = value;
    }

    /// Get a single pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> P {
        self.pixels[self.index(x, y)]
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Convert every pixel with `f`, keeping the layout.
    pub fn map<Q>(&self, f: impl FnMut(P) -> Q) -> MapImage<Q> {
        MapImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(f).collect(),
        }
    }
}

impl MapImage<[u8; 4]> {
    /// Count the number of unique colors (ignoring alpha) in the image.
    pub fn unique_color_count(&self) -> usize {
        let colors: hashbrown::HashSet<[u8; 3]> =
            self.pixels.iter().map(|p| [p[0], p[1], p[2]]).collect();
        colors.len()
    }
}
