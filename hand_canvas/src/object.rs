//! Manipulable objects and their render snapshots.

use hand_gesture::{Point, Surface};
use serde::{Deserialize, Serialize};

use crate::shape::{Color, Shape};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObjectError {
    #[error("{shape} {id}: size must be finite and in (0, {max}], got {size}")]
    Size { id: u32, shape: Shape, size: f32, max: f32 },

    #[error("{shape} {id}: position ({x}, {y}) is not finite")]
    Position { id: u32, shape: Shape, x: f32, y: f32 },
}

/// A shape on the canvas.  `position` is the shape's centre in surface
/// pixels; `size` is both its drawn extent and its grab radius.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManipulableObject {
    pub id:       u32,
    pub position: Point,
    pub size:     f32,
    pub shape:    Shape,
    pub color:    Color,
}

impl ManipulableObject {
    pub fn new(id: u32, x: f32, y: f32, size: f32, shape: Shape, color: Color) -> Self {
        ManipulableObject { id, position: Point::new(x, y), size, shape, color }
    }

    /// Distance from `p` to the centre, if `p` is within grab range
    /// (inclusive of the boundary).
    pub fn grab_distance(&self, p: Point) -> Option<f32> {
        let d = self.position.distance(p);
        (d <= self.size).then_some(d)
    }

    /// Check that the object can be drawn and grabbed on `surface`: a finite
    /// centre and a size no larger than the surface's longer side.
    pub fn validate(&self, surface: Surface) -> Result<(), ObjectError> {
        let max = surface.width.max(surface.height);
        if !(self.size.is_finite() && self.size > 0.0 && self.size <= max) {
            return Err(ObjectError::Size { id: self.id, shape: self.shape, size: self.size, max });
        }
        let Point { x, y } = self.position;
        if !(x.is_finite() && y.is_finite()) {
            return Err(ObjectError::Position { id: self.id, shape: self.shape, x, y });
        }
        Ok(())
    }
}

/// The starting set of shapes.
pub fn seed_objects() -> Vec<ManipulableObject> {
    vec![
        ManipulableObject::new(1, 200.0, 200.0, 80.0,  Shape::Circle,   Color::rgb(0x34, 0x98, 0xdb)),
        ManipulableObject::new(2, 400.0, 300.0, 100.0, Shape::Square,   Color::rgb(0xe7, 0x4c, 0x3c)),
        ManipulableObject::new(3, 600.0, 200.0, 90.0,  Shape::Triangle, Color::rgb(0x2e, 0xcc, 0x71)),
        ManipulableObject::new(4, 300.0, 400.0, 70.0,  Shape::Circle,   Color::rgb(0xf3, 0x9c, 0x12)),
    ]
}

/// What the presentation layer needs to draw one object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectSnapshot {
    pub id:       u32,
    pub position: Point,
    pub size:     f32,
    pub shape:    Shape,
    pub color:    Color,
    pub dragging: bool,
}

impl ObjectSnapshot {
    pub fn of(obj: &ManipulableObject, dragging: bool) -> Self {
        ObjectSnapshot {
            id:       obj.id,
            position: obj.position,
            size:     obj.size,
            shape:    obj.shape,
            color:    obj.color,
            dragging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique() {
        let objs = seed_objects();
        let ids: HashSet<u32> = objs.iter().map(|o| o.id).collect();
        assert_eq!(ids.len(), objs.len());
    }

    #[test]
    fn grab_distance_is_inclusive() {
        let o = ManipulableObject::new(9, 0.0, 0.0, 10.0, Shape::Square, Color::rgb(0, 0, 0));
        assert_eq!(o.grab_distance(Point::new(10.0, 0.0)), Some(10.0));
        assert_eq!(o.grab_distance(Point::new(10.01, 0.0)), None);
    }

    #[test]
    fn seeds_are_valid_on_default_surface() {
        for o in seed_objects() {
            assert_eq!(o.validate(Surface::default()), Ok(()));
        }
    }

    #[test]
    fn bad_sizes_are_rejected() {
        for size in [f32::NAN, f32::INFINITY, 0.0, -5.0, 1e9] {
            let o = ManipulableObject::new(7, 100.0, 100.0, size, Shape::Circle, Color::rgb(0, 0, 0));
            assert!(
                matches!(o.validate(Surface::default()), Err(ObjectError::Size { id: 7, .. })),
                "size {size} should be rejected",
            );
        }
        let largest = ManipulableObject::new(7, 100.0, 100.0, 800.0, Shape::Circle, Color::rgb(0, 0, 0));
        assert!(largest.validate(Surface::default()).is_ok());
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let o = ManipulableObject::new(5, f32::NAN, 100.0, 50.0, Shape::Triangle, Color::rgb(0, 0, 0));
        let err = o.validate(Surface::default()).unwrap_err();
        assert!(matches!(err, ObjectError::Position { id: 5, .. }));
        assert!(err.to_string().starts_with("triangle 5"), "{err}");
    }

    #[test]
    fn object_roundtrips_through_json() {
        let o = &seed_objects()[2];
        let json = serde_json::to_string(o).unwrap();
        assert!(json.contains("\"triangle\""));
        assert!(json.contains("\"#2ecc71\""));
        let back: ManipulableObject = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, o);
    }
}
