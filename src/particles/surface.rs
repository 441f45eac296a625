//! Drawing targets for the particle field.

/// Straight-alpha colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba()` notation
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A 2D canvas-like target. Coordinates passed to [`Surface::fill_circle`]
/// are device-independent; the surface applies its own transform.
pub trait Surface {
    /// Sets the backing store size in device pixels.
    fn resize_backing_store(&mut self, width: u32, height: u32);

    /// Sets the on-screen size in device-independent pixels.
    fn set_display_size(&mut self, width: f64, height: f64);

    /// Replaces the current transform with a uniform scale.
    fn set_transform(&mut self, scale: f64);

    fn clear(&mut self);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);
}

/// Width of one character cell, in device-independent pixels
pub const CELL_WIDTH: f64 = 8.0;
/// Height of one character cell, in device-independent pixels
pub const CELL_HEIGHT: f64 = 16.0;

/// Rasterises circles into a grid of characters, one cell per
/// `CELL_WIDTH` x `CELL_HEIGHT` block of the display area.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    backing: (u32, u32),
    display: (f64, f64),
    scale: f64,
    columns: usize,
    rows: usize,
    cells: Vec<char>,
    circles_drawn: u64,
}

impl TextSurface {
    pub fn new() -> Self {
        Self { scale: 1.0, ..Default::default() }
    }

    pub fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    pub fn display_size(&self) -> (f64, f64) {
        self.display
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Total circles filled since creation
    pub fn circles_drawn(&self) -> u64 {
        self.circles_drawn
    }

    /// Number of cells currently showing a particle
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != ' ').count()
    }

    /// The grid as newline-separated rows
    pub fn render(&self) -> String {
        if self.columns == 0 {
            return String::new();
        }
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn glyph(radius: f64) -> char {
        if radius < 2.0 {
            '.'
        } else if radius < 3.0 {
            '*'
        } else {
            'o'
        }
    }
}

impl Surface for TextSurface {
    fn resize_backing_store(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }

    fn set_display_size(&mut self, width: f64, height: f64) {
        self.display = (width, height);
        self.columns = (width.max(0.0) / CELL_WIDTH).ceil() as usize;
        self.rows = (height.max(0.0) / CELL_HEIGHT).ceil() as usize;
        self.cells = vec![' '; self.columns * self.rows];
    }

    fn set_transform(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, _color: Rgba) {
        self.circles_drawn += 1;
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (col, row) = ((x / CELL_WIDTH) as usize, (y / CELL_HEIGHT) as usize);
        if col < self.columns && row < self.rows {
            let cell = &mut self.cells[row * self.columns + col];
            let glyph = Self::glyph(radius);
            // Larger particles win when two share a cell.
            if *cell == ' ' || glyph_rank(glyph) > glyph_rank(*cell) {
                *cell = glyph;
            }
        }
    }
}

fn glyph_rank(c: char) -> u8 {
    match c {
        '.' => 1,
        '*' => 2,
        'o' => 3,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = Rgba::new(255, 255, 255, 0.9);

    #[test]
    fn test_grid_follows_display_size() {
        let mut surface = TextSurface::new();
        surface.set_display_size(80.0, 40.0);
        assert_eq!(surface.dimensions(), (10, 3));
        assert_eq!(surface.render().lines().count(), 3);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut surface = TextSurface::new();
        surface.set_display_size(32.0, 32.0);
        surface.fill_circle(1.0, 1.0, 1.5, WHITE);
        surface.fill_circle(2.0, 2.0, 3.5, WHITE);
        surface.fill_circle(-5.0, 2.0, 3.5, WHITE);
        surface.fill_circle(500.0, 2.0, 3.5, WHITE);

        assert_eq!(surface.render(), "o   \n    ");
        assert_eq!(surface.circles_drawn(), 4);

        surface.clear();
        assert_eq!(surface.lit_cells(), 0);
    }

    #[test]
    fn test_css_colour() {
        assert_eq!(WHITE.to_css(), "rgba(255, 255, 255, 0.9)");
    }
}
