//! Drag lifecycle for the object canvas.
//!
//! `update` is called once per gesture frame with the tracker's output.  A
//! frame with no interaction points is treated as "no news": nothing is
//! acquired, released or moved.

use hand_gesture::{InteractionPoint, Point};

use crate::object::{ManipulableObject, ObjectSnapshot};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// `hand_index` is the hand whose finger carries the object.
    Dragging { object_id: u32, hand_index: usize },
}

impl DragState {
    pub fn object_id(&self) -> Option<u32> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { object_id, .. } => Some(*object_id),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ManipulationController
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct ManipulationController {
    seed:    Vec<ManipulableObject>,
    objects: Vec<ManipulableObject>,
    drag:    DragState,
}

impl ManipulationController {
    pub fn new(objects: Vec<ManipulableObject>) -> Self {
        ManipulationController {
            seed:    objects.clone(),
            objects,
            drag:    DragState::Idle,
        }
    }

    /// Advance one gesture frame and return the resulting snapshots.
    ///
    /// Acquisition is checked on every pinching frame while idle, so a pinch
    /// that starts in empty space picks up the first shape the finger reaches.
    /// Hands are considered in ascending `hand_index`; the first hand with any
    /// shape in range wins.
    pub fn update(&mut self, points: &[InteractionPoint], is_pinching: bool) -> Vec<ObjectSnapshot> {
        if points.is_empty() {
            return self.snapshots();
        }

        match self.drag {
            DragState::Idle if is_pinching => {
                if let Some((object_id, hand_index)) = self.acquire(points) {
                    tracing::info!(object_id, hand_index, "starting drag");
                    self.drag = DragState::Dragging { object_id, hand_index };
                }
            }
            DragState::Dragging { object_id, .. } if !is_pinching => {
                tracing::info!(object_id, "releasing object");
                self.drag = DragState::Idle;
            }
            _ => {}
        }

        if let DragState::Dragging { object_id, hand_index } = self.drag {
            let finger = points
                .iter()
                .find(|p| p.hand_index == hand_index)
                .map(|p| p.index_finger);
            if let (Some(finger), Some(obj)) = (finger, self.object_mut(object_id)) {
                obj.position = finger;
            }
        }

        self.snapshots()
    }

    /// The object whose centre is nearest to `p` among those within grab
    /// range.  Exact ties keep the earlier object.
    pub fn hit_test(&self, p: Point) -> Option<u32> {
        self.objects
            .iter()
            .filter_map(|o| o.grab_distance(p).map(|d| (o.id, d)))
            .fold(None, |best: Option<(u32, f32)>, (id, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((id, d)),
            })
            .map(|(id, _)| id)
    }

    fn acquire(&self, points: &[InteractionPoint]) -> Option<(u32, usize)> {
        let mut ordered: Vec<&InteractionPoint> = points.iter().collect();
        ordered.sort_by_key(|p| p.hand_index);
        ordered
            .into_iter()
            .find_map(|p| self.hit_test(p.index_finger).map(|id| (id, p.hand_index)))
    }

    fn object_mut(&mut self, id: u32) -> Option<&mut ManipulableObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn snapshots(&self) -> Vec<ObjectSnapshot> {
        let held = self.drag.object_id();
        self.objects
            .iter()
            .map(|o| ObjectSnapshot::of(o, held == Some(o.id)))
            .collect()
    }

    pub fn objects(&self) -> &[ManipulableObject] { &self.objects }
    pub fn drag_state(&self) -> DragState { self.drag }

    /// Drop whatever is held; objects stay where they are.
    pub fn reset(&mut self) {
        if let Some(object_id) = self.drag.object_id() {
            tracing::info!(object_id, "drag cancelled");
        }
        self.drag = DragState::Idle;
    }

    /// Drop whatever is held and put every object back at its seed position.
    pub fn restore_seed(&mut self) {
        self.reset();
        self.objects = self.seed.clone();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
