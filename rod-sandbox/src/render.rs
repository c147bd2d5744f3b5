use image::{Rgba, RgbaImage};
use imageproc::{drawing, pixelops, rect::Rect};
use rod_core::nalgebra::{Point2, Point3};
use rod_core::ImageSegment;

pub const WIDTH: u32 = 640;
pub const HEIGHT: u32 = 480;
const MARGIN: u32 = 24;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FRAME: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Colors of the X, Y and Z traces.
const AXES: [Rgba<u8>; 3] = [
    Rgba([31, 119, 180, 255]),
    Rgba([255, 127, 14, 255]),
    Rgba([44, 160, 44, 255]),
];
const OBSERVED: Rgba<u8> = Rgba([31, 119, 180, 255]);
const PROJECTED: Rgba<u8> = Rgba([214, 39, 40, 255]);

/// Maps a rectangle of data coordinates onto the plotting area of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Plot {
    min: Point2<f64>,
    max: Point2<f64>,
}

impl Plot {
    /// Bounds all finite points with some padding. Flat or empty ranges are widened.
    fn fit(points: impl IntoIterator<Item = Point2<f64>>) -> Self {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for point in points.into_iter().filter(|p| p.x.is_finite() && p.y.is_finite()) {
            min = min.inf(&point);
            max = max.sup(&point);
        }
        for axis in 0..2 {
            if min[axis] > max[axis] {
                min[axis] = 0.0;
                max[axis] = 1.0;
            } else if min[axis] == max[axis] {
                min[axis] -= 0.5;
                max[axis] += 0.5;
            } else {
                let pad = 0.05 * (max[axis] - min[axis]);
                min[axis] -= pad;
                max[axis] += pad;
            }
        }
        Self { min, max }
    }

    /// The canvas position of a data point. The vertical axis points up.
    fn pixel(&self, point: Point2<f64>) -> (f32, f32) {
        let inner_width = (WIDTH - 2 * MARGIN) as f64;
        let inner_height = (HEIGHT - 2 * MARGIN) as f64;
        let x = (point.x - self.min.x) / (self.max.x - self.min.x);
        let y = (point.y - self.min.y) / (self.max.y - self.min.y);
        (
            (MARGIN as f64 + x * inner_width) as f32,
            (MARGIN as f64 + (1.0 - y) * inner_height) as f32,
        )
    }
}

fn canvas() -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    drawing::draw_hollow_rect_mut(
        &mut canvas,
        Rect::at(MARGIN as i32, MARGIN as i32)
            .of_size(WIDTH - 2 * MARGIN, HEIGHT - 2 * MARGIN),
        FRAME,
    );
    canvas
}

fn draw_line(
    canvas: &mut RgbaImage,
    plot: &Plot,
    a: Point2<f64>,
    b: Point2<f64>,
    color: Rgba<u8>,
) {
    let (a, b) = (plot.pixel(a), plot.pixel(b));
    drawing::draw_antialiased_line_segment_mut(
        canvas,
        (a.0 as i32, a.1 as i32),
        (b.0 as i32, b.1 as i32),
        color,
        pixelops::interpolate,
    );
}

fn draw_cross(canvas: &mut RgbaImage, plot: &Plot, point: Point2<f64>, color: Rgba<u8>) {
    let (x, y) = plot.pixel(point);
    drawing::draw_cross_mut(canvas, color, x as i32, y as i32);
}

/// Plots the X, Y and Z coordinates of a sequence of endpoints against their index.
///
/// Non-finite coordinates are left out.
pub fn render_traces(points: &[Point3<f64>]) -> RgbaImage {
    let series = |axis: usize| {
        points
            .iter()
            .enumerate()
            .map(move |(index, point)| Point2::new(index as f64, point[axis]))
            .filter(|p| p.y.is_finite())
    };
    let plot = Plot::fit((0..3).flat_map(series));
    let mut canvas = canvas();
    for (axis, &color) in AXES.iter().enumerate() {
        let mut series = series(axis).peekable();
        if points.len() == 1 {
            if let Some(point) = series.next() {
                draw_cross(&mut canvas, &plot, point, color);
            }
            continue;
        }
        while let Some(a) = series.next() {
            if let Some(&b) = series.peek() {
                draw_line(&mut canvas, &plot, a, b, color);
            }
        }
    }
    canvas
}

/// Plots observed image points as crosses and the projection of an estimate as a line.
pub fn render_map(observed: &[Point2<f64>], projection: Option<ImageSegment>) -> RgbaImage {
    let endpoints = projection
        .into_iter()
        .flat_map(|segment| [segment.initial, segment.terminal]);
    let plot = Plot::fit(observed.iter().copied().chain(endpoints));
    let mut canvas = canvas();
    for &point in observed {
        if point.x.is_finite() && point.y.is_finite() {
            draw_cross(&mut canvas, &plot, point, OBSERVED);
        }
    }
    if let Some(segment) = projection {
        let (initial, terminal) = (segment.initial, segment.terminal);
        draw_line(&mut canvas, &plot, initial, terminal, PROJECTED);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_widens() {
        let plot = Plot::fit([Point2::new(0.0, 2.0), Point2::new(10.0, 2.0)]);
        assert_eq!(plot.min.x, -0.5);
        assert_eq!(plot.max.x, 10.5);
        assert_eq!((plot.min.y, plot.max.y), (1.5, 2.5));

        let empty = Plot::fit(core::iter::empty());
        assert_eq!(empty.min, Point2::new(0.0, 0.0));
        assert_eq!(empty.max, Point2::new(1.0, 1.0));
    }

    #[test]
    fn corners_map_into_the_frame() {
        let plot = Plot {
            min: Point2::new(0.0, 0.0),
            max: Point2::new(1.0, 1.0),
        };
        let (left, right) = (MARGIN as f32, (WIDTH - MARGIN) as f32);
        let (top, bottom) = (MARGIN as f32, (HEIGHT - MARGIN) as f32);
        assert_eq!(plot.pixel(Point2::new(0.0, 0.0)), (left, bottom));
        assert_eq!(plot.pixel(Point2::new(1.0, 1.0)), (right, top));
    }

    #[test]
    fn map_draws_the_projection() {
        let segment = ImageSegment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let blank = render_map(&[], None);
        let image = render_map(&[], Some(segment));
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));
        assert!(blank.pixels().all(|&p| p == BACKGROUND || p == FRAME));
        assert!(image.pixels().zip(blank.pixels()).any(|(a, b)| a != b));
    }
}
