//! TextCanvas - drawing surface rasterised into a character grid

use contracts::{DrawingSurface, Point, Rect, Rgba, SurfaceSize};

const MARKER: char = '#';
const EMPTY: char = ' ';

/// Character cell grid standing in for a pixel canvas
///
/// Pixel coordinates are scaled onto `cols x rows` cells. Points are drawn
/// with a glyph chosen by their opacity; the vehicle marker is never
/// overdrawn by points.
#[derive(Debug, Clone)]
pub struct TextCanvas {
    container: SurfaceSize,
    size: SurfaceSize,
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl TextCanvas {
    pub fn new(container: SurfaceSize, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            container,
            size: SurfaceSize::default(),
            cols,
            rows,
            cells: vec![EMPTY; cols * rows],
        }
    }

    /// Grid 64 columns wide, rows chosen for roughly square cells on a terminal
    pub fn for_surface(container: SurfaceSize) -> Self {
        let cols = 64;
        let aspect = if container.width > 0.0 {
            container.height / container.width
        } else {
            0.5
        };
        let rows = ((cols as f64 * aspect) / 2.0).round().clamp(4.0, 48.0) as usize;
        Self::new(container, cols, rows)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[cfg(test)]
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// The grid framed by a border, one line per row
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 2));
        let border: String = std::iter::repeat('-').take(self.cols).collect();
        out.push('+');
        out.push_str(&border);
        out.push_str("+\n");
        for row in self.cells.chunks(self.cols) {
            out.push('|');
            out.extend(row.iter());
            out.push_str("|\n");
        }
        out.push('+');
        out.push_str(&border);
        out.push('+');
        out
    }

    fn cell_of(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if self.size.width <= 0.0 || self.size.height <= 0.0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.size.width * self.cols as f64).floor() as usize;
        let row = (y / self.size.height * self.rows as f64).floor() as usize;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    fn clamp_cell(&self, x: f64, y: f64) -> (usize, usize) {
        let col = (x / self.size.width * self.cols as f64).floor();
        let row = (y / self.size.height * self.rows as f64).floor();
        (
            col.clamp(0.0, (self.cols - 1) as f64) as usize,
            row.clamp(0.0, (self.rows - 1) as f64) as usize,
        )
    }
}

fn glyph(alpha: f64) -> Option<char> {
    match alpha {
        a if a >= 0.66 => Some('@'),
        a if a >= 0.33 => Some('o'),
        a if a > 0.05 => Some('.'),
        _ => None,
    }
}

impl DrawingSurface for TextCanvas {
    fn container_size(&self) -> SurfaceSize {
        self.container
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn clear(&mut self, _background: Rgba) {
        self.cells.fill(EMPTY);
    }

    fn fill_rect(&mut self, rect: Rect, _color: Rgba) {
        if self.size.width <= 0.0 || self.size.height <= 0.0 {
            return;
        }
        let (c0, r0) = self.clamp_cell(rect.x, rect.y);
        let (c1, r1) = self.clamp_cell(rect.x + rect.width, rect.y + rect.height);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.cells[row * self.cols + col] = MARKER;
            }
        }
    }

    fn fill_circle(&mut self, center: Point, _radius: f64, color: Rgba) {
        let Some(glyph) = glyph(color.a) else {
            return;
        };
        let Some((col, row)) = self.cell_of(center.x, center.y) else {
            return;
        };
        let cell = &mut self.cells[row * self.cols + col];
        // keep the brightest glyph per cell
        let rank = |c: char| match c {
            MARKER => 4,
            '@' => 3,
            'o' => 2,
            '.' => 1,
            _ => 0,
        };
        if rank(glyph) > rank(*cell) {
            *cell = glyph;
        }
    }
}
