//! Recording surface shared by the unit tests

use contracts::{DrawingSurface, Point, Rect, Rgba, SurfaceSize};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rgba),
    Rect(Rect, Rgba),
    Circle(Point, f64, Rgba),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub container: SurfaceSize,
    pub size: SurfaceSize,
    pub ops: Vec<DrawOp>,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn new(container: SurfaceSize) -> Self {
        Self {
            container,
            ..Default::default()
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn container_size(&self) -> SurfaceSize {
        self.container
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn clear(&mut self, background: Rgba) {
        self.clears += 1;
        self.ops.clear();
        self.ops.push(DrawOp::Clear(background));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ops.push(DrawOp::Rect(rect, color));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::Circle(center, radius, color));
    }
}
