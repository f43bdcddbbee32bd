//! # Geometry Engine
//!
//! Pure functions over element geometry: bounds, hit testing, grid snapping,
//! alignment and distribution. Every function returns new values and leaves
//! its inputs untouched, so a host can call them on document snapshots.
//!
//! Rotation is a render-time transform and is ignored here: bounds are always
//! derived from the stored, unrotated geometry.

use serde::{Deserialize, Serialize};

use crate::document::{Element, ElementKind};

/// A point in design space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. Always `left <= right` and `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Inclusive containment.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Leading edge and extent along an axis.
    fn span(&self, direction: Direction) -> (f64, f64) {
        match direction {
            Direction::Horizontal => (self.left, self.width()),
            Direction::Vertical => (self.top, self.height()),
        }
    }
}

/// Alignment target for [`align_elements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignMode {
    Left,
    /// Horizontal centers.
    Center,
    Right,
    Top,
    /// Vertical centers.
    Middle,
    Bottom,
}

/// Axis for [`distribute_elements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Round `value` to the nearest multiple of `grid_size`.
///
/// `grid_size` must be positive; callers validate it (a document's grid
/// size is checked on every write).
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    debug_assert!(grid_size > 0.0, "grid size must be positive");
    (value / grid_size).round() * grid_size
}

/// The axis-aligned rectangle covered by an element.
///
/// A line spans both endpoints whichever one is numerically smaller.
pub fn element_bounds(element: &Element) -> Bounds {
    let frame = &element.frame;
    match &element.kind {
        ElementKind::Line(line) => Bounds {
            left: frame.x.min(line.x2),
            top: frame.y.min(line.y2),
            right: frame.x.max(line.x2),
            bottom: frame.y.max(line.y2),
        },
        ElementKind::Text(_)
        | ElementKind::Barcode(_)
        | ElementKind::QrCode(_)
        | ElementKind::Image(_)
        | ElementKind::Shape(_) => Bounds {
            left: frame.x,
            top: frame.y,
            right: frame.x + frame.width,
            bottom: frame.y + frame.height,
        },
    }
}

/// Whether `point` lies within the element's bounds, edges included.
pub fn is_point_in_element(point: Point, element: &Element) -> bool {
    element_bounds(element).contains(point)
}

/// Union of all element bounds, or `None` for an empty slice.
pub fn selection_bounds(elements: &[Element]) -> Option<Bounds> {
    elements
        .iter()
        .map(element_bounds)
        .reduce(|acc, b| acc.union(&b))
}

/// Snap an element's origin onto the grid. Lines snap both endpoints.
pub fn snap_element(element: &Element, grid_size: f64) -> Element {
    let mut next = element.clone();
    next.frame.x = snap_to_grid(element.frame.x, grid_size);
    next.frame.y = snap_to_grid(element.frame.y, grid_size);
    if let ElementKind::Line(line) = &mut next.kind {
        line.x2 = snap_to_grid(line.x2, grid_size);
        line.y2 = snap_to_grid(line.y2, grid_size);
    }
    next
}

/// Align elements to a common edge or center.
///
/// - `Left`/`Top`: every element's leading edge moves to the smallest one.
/// - `Right`/`Bottom`: every trailing edge moves to the largest one.
/// - `Center`/`Middle`: every center moves to the **average of the element
///   centers** (not the center of the selection's bounding box).
///
/// Fewer than two elements is a no-op. Order is preserved.
pub fn align_elements(elements: &[Element], mode: AlignMode) -> Vec<Element> {
    if elements.len() < 2 {
        return elements.to_vec();
    }

    let bounds: Vec<Bounds> = elements.iter().map(element_bounds).collect();
    let count = bounds.len() as f64;

    let target = match mode {
        AlignMode::Left => fold_min(bounds.iter().map(|b| b.left)),
        AlignMode::Top => fold_min(bounds.iter().map(|b| b.top)),
        AlignMode::Right => fold_max(bounds.iter().map(|b| b.right)),
        AlignMode::Bottom => fold_max(bounds.iter().map(|b| b.bottom)),
        AlignMode::Center => bounds.iter().map(|b| b.center().x).sum::<f64>() / count,
        AlignMode::Middle => bounds.iter().map(|b| b.center().y).sum::<f64>() / count,
    };

    elements
        .iter()
        .zip(&bounds)
        .map(|(element, b)| match mode {
            AlignMode::Left => element.translated(target - b.left, 0.0),
            AlignMode::Right => element.translated(target - b.right, 0.0),
            AlignMode::Center => element.translated(target - b.center().x, 0.0),
            AlignMode::Top => element.translated(0.0, target - b.top),
            AlignMode::Bottom => element.translated(0.0, target - b.bottom),
            AlignMode::Middle => element.translated(0.0, target - b.center().y),
        })
        .collect()
}

/// Space elements evenly along an axis.
///
/// The first and last elements (by leading edge) keep the original extremes;
/// the gaps between consecutive elements become equal whatever their sizes:
///
/// ```text
/// gap = (span - Σ extent) / (n - 1)
/// ```
///
/// Fewer than three elements is a no-op. The result keeps the input order.
pub fn distribute_elements(elements: &[Element], direction: Direction) -> Vec<Element> {
    if elements.len() < 3 {
        return elements.to_vec();
    }

    let spans: Vec<(f64, f64)> = elements
        .iter()
        .map(|e| element_bounds(e).span(direction))
        .collect();

    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by(|&a, &b| spans[a].0.total_cmp(&spans[b].0));

    let start = fold_min(spans.iter().map(|(lead, _)| *lead));
    let end = fold_max(spans.iter().map(|(lead, extent)| lead + extent));
    let total_size: f64 = spans.iter().map(|(_, extent)| extent).sum();
    let gap = (end - start - total_size) / (elements.len() - 1) as f64;

    let mut result = elements.to_vec();
    let mut current = start;
    for index in order {
        let (lead, extent) = spans[index];
        let delta = current - lead;
        result[index] = match direction {
            Direction::Horizontal => elements[index].translated(delta, 0.0),
            Direction::Vertical => elements[index].translated(0.0, delta),
        };
        current += extent + gap;
    }
    result
}

fn fold_min(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::INFINITY, f64::min)
}

fn fold_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ElementDraft, Frame, LineElement, ShapeElement, ShapeType, create_element};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Element {
        create_element(ElementDraft::new(
            Frame::new(x, y, w, h),
            ElementKind::Shape(ShapeElement::new(ShapeType::Rectangle)),
        ))
    }

    fn line(x: f64, y: f64, x2: f64, y2: f64) -> Element {
        create_element(ElementDraft::new(
            Frame::new(x, y, 0.0, 0.0),
            ElementKind::Line(LineElement::to(x2, y2)),
        ))
    }

    #[test]
    fn test_snap_rounds_to_nearest_multiple() {
        assert_eq!(snap_to_grid(12.0, 5.0), 10.0);
        assert_eq!(snap_to_grid(13.0, 5.0), 15.0);
        assert_eq!(snap_to_grid(-7.0, 5.0), -5.0);
        assert_eq!(snap_to_grid(0.26, 0.25), 0.25);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for grid in [0.5, 1.0, 2.5, 5.0, 10.0, 3.3] {
            for i in -200..200 {
                let v = i as f64 * 0.37;
                let once = snap_to_grid(v, grid);
                assert_eq!(snap_to_grid(once, grid), once, "v={} grid={}", v, grid);
            }
        }
    }

    #[test]
    fn test_line_bounds_normalized() {
        let b = element_bounds(&line(50.0, 50.0, 10.0, 10.0));
        assert_eq!(
            b,
            Bounds {
                left: 10.0,
                top: 10.0,
                right: 50.0,
                bottom: 50.0
            }
        );
    }

    #[test]
    fn test_line_bounds_mixed_direction() {
        let b = element_bounds(&line(10.0, 40.0, 30.0, 5.0));
        assert!(b.left <= b.right && b.top <= b.bottom);
        assert_eq!((b.left, b.top, b.right, b.bottom), (10.0, 5.0, 30.0, 40.0));
    }

    #[test]
    fn test_box_bounds() {
        let b = element_bounds(&rect(5.0, 6.0, 10.0, 20.0));
        assert_eq!((b.left, b.top, b.right, b.bottom), (5.0, 6.0, 15.0, 26.0));
    }

    #[test]
    fn test_point_containment_inclusive() {
        let r = rect(10.0, 10.0, 10.0, 10.0);
        assert!(is_point_in_element(Point::new(10.0, 10.0), &r));
        assert!(is_point_in_element(Point::new(20.0, 20.0), &r));
        assert!(is_point_in_element(Point::new(15.0, 12.0), &r));
        assert!(!is_point_in_element(Point::new(20.1, 15.0), &r));
        assert!(!is_point_in_element(Point::new(9.9, 15.0), &r));
    }

    #[test]
    fn test_align_left() {
        let aligned = align_elements(&[rect(30.0, 0.0, 10.0, 5.0), rect(10.0, 20.0, 10.0, 5.0)], AlignMode::Left);
        assert_eq!(aligned[0].frame.x, 10.0);
        assert_eq!(aligned[1].frame.x, 10.0);
        // other axis untouched
        assert_eq!(aligned[1].frame.y, 20.0);
    }

    #[test]
    fn test_align_right_and_bottom() {
        let input = [rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 5.0, 30.0, 20.0)];
        let right = align_elements(&input, AlignMode::Right);
        assert_eq!(right[0].frame.x, 40.0);
        assert_eq!(right[1].frame.x, 20.0);

        let bottom = align_elements(&input, AlignMode::Bottom);
        assert_eq!(bottom[0].frame.y, 15.0);
        assert_eq!(bottom[1].frame.y, 5.0);
    }

    #[test]
    fn test_align_center_uses_average_of_centers() {
        // centers at 5, 15 and 70: average 30 (bounding-box center would be 37.5)
        let input = [
            rect(0.0, 0.0, 10.0, 10.0),
            rect(10.0, 0.0, 10.0, 10.0),
            rect(65.0, 0.0, 10.0, 10.0),
        ];
        let aligned = align_elements(&input, AlignMode::Center);
        for element in &aligned {
            assert_eq!(element_bounds(element).center().x, 30.0);
        }
    }

    #[test]
    fn test_align_middle() {
        let input = [rect(0.0, 0.0, 10.0, 10.0), rect(0.0, 30.0, 10.0, 30.0)];
        let aligned = align_elements(&input, AlignMode::Middle);
        // centers 5 and 45 → 25
        assert_eq!(aligned[0].frame.y, 20.0);
        assert_eq!(aligned[1].frame.y, 10.0);
    }

    #[test]
    fn test_align_single_is_noop() {
        let input = [rect(30.0, 0.0, 10.0, 5.0)];
        assert_eq!(align_elements(&input, AlignMode::Left), input.to_vec());
        assert!(align_elements(&[], AlignMode::Top).is_empty());
    }

    #[test]
    fn test_align_line_uses_bounds() {
        let input = [line(50.0, 0.0, 20.0, 10.0), rect(5.0, 0.0, 10.0, 10.0)];
        let aligned = align_elements(&input, AlignMode::Left);
        let b = element_bounds(&aligned[0]);
        assert_eq!(b.left, 5.0);
        assert_eq!(b.width(), 30.0);
    }

    #[test]
    fn test_align_preserves_order_and_ids() {
        let input = [rect(30.0, 0.0, 10.0, 5.0), rect(10.0, 0.0, 10.0, 5.0)];
        let aligned = align_elements(&input, AlignMode::Top);
        assert_eq!(aligned[0].id, input[0].id);
        assert_eq!(aligned[1].id, input[1].id);
    }

    #[test]
    fn test_distribute_horizontal() {
        let input = [
            rect(0.0, 0.0, 10.0, 10.0),
            rect(40.0, 0.0, 10.0, 10.0),
            rect(100.0, 0.0, 10.0, 10.0),
        ];
        let xs: Vec<f64> = distribute_elements(&input, Direction::Horizontal)
            .iter()
            .map(|e| e.frame.x)
            .collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_distribute_unsorted_input_keeps_order() {
        let input = [
            rect(100.0, 0.0, 10.0, 10.0),
            rect(0.0, 0.0, 10.0, 10.0),
            rect(40.0, 0.0, 10.0, 10.0),
        ];
        let out = distribute_elements(&input, Direction::Horizontal);
        assert_eq!(out[0].id, input[0].id);
        let xs: Vec<f64> = out.iter().map(|e| e.frame.x).collect();
        assert_eq!(xs, vec![100.0, 0.0, 50.0]);
    }

    #[test]
    fn test_distribute_vertical_mixed_sizes_equal_gaps() {
        let input = [
            rect(0.0, 0.0, 10.0, 10.0),
            rect(0.0, 15.0, 10.0, 30.0),
            rect(0.0, 50.0, 10.0, 20.0),
            rect(0.0, 90.0, 10.0, 10.0),
        ];
        let out = distribute_elements(&input, Direction::Vertical);
        let bounds: Vec<Bounds> = out.iter().map(element_bounds).collect();
        // span 100, sizes 70 → gap 10
        let gaps: Vec<f64> = bounds.windows(2).map(|w| w[1].top - w[0].bottom).collect();
        for gap in gaps {
            assert!((gap - 10.0).abs() < 1e-9);
        }
        assert_eq!(bounds[0].top, 0.0);
        assert_eq!(bounds[3].bottom, 100.0);
    }

    #[test]
    fn test_distribute_two_is_noop() {
        let input = [rect(0.0, 0.0, 10.0, 10.0), rect(40.0, 0.0, 10.0, 10.0)];
        assert_eq!(distribute_elements(&input, Direction::Horizontal), input.to_vec());
    }

    #[test]
    fn test_snap_element_line_endpoints() {
        let snapped = snap_element(&line(11.0, 9.0, 48.0, 52.0), 5.0);
        let b = element_bounds(&snapped);
        assert_eq!((b.left, b.top, b.right, b.bottom), (10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_selection_bounds() {
        let b = selection_bounds(&[rect(0.0, 0.0, 10.0, 10.0), line(50.0, 50.0, 20.0, 80.0)]).unwrap();
        assert_eq!((b.left, b.top, b.right, b.bottom), (0.0, 0.0, 50.0, 80.0));
        assert!(selection_bounds(&[]).is_none());
    }
}
