//! Static collider set for headless ground queries.
//!
//! Built from a layout's collidable pieces. Only straight-down rays are
//! supported, which lets every primitive be reduced to the vertical span it
//! occupies above a given XZ point. Rotation is ignored: rotated pieces in the
//! builtin layouts are decorative only.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::{GroundProbe, Primitive, SceneLayout, ShapePlacement};

/// Spatial hash cell size in world units.
const COLLIDER_CELL_SIZE: f32 = 8.0;

fn cell_key(x: f32, z: f32) -> (i32, i32) {
    (
        (x / COLLIDER_CELL_SIZE).floor() as i32,
        (z / COLLIDER_CELL_SIZE).floor() as i32,
    )
}

/// One collidable primitive, stored as centre + half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticCollider {
    pub primitive: Primitive,
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl StaticCollider {
    pub fn from_placement(piece: &ShapePlacement) -> Self {
        Self {
            primitive: piece.primitive,
            center: piece.position,
            half_extents: piece.scale.abs() * 0.5,
        }
    }

    /// Bottom and top of the solid along the vertical line through `(x, z)`.
    pub fn vertical_span(&self, x: f32, z: f32) -> Option<(f32, f32)> {
        let dx = x - self.center.x;
        let dz = z - self.center.z;
        let h = self.half_extents;
        let bottom = self.center.y - h.y;
        let top = self.center.y + h.y;

        // Squared elliptical radius in the XZ cross-section.
        let radial = || {
            if h.x <= 0.0 || h.z <= 0.0 {
                return f32::INFINITY;
            }
            (dx / h.x).powi(2) + (dz / h.z).powi(2)
        };
        let in_rect = dx.abs() <= h.x && dz.abs() <= h.z;

        match self.primitive {
            Primitive::Cube => in_rect.then_some((bottom, top)),
            Primitive::Plane => in_rect.then_some((self.center.y, self.center.y)),
            Primitive::Cylinder => (radial() <= 1.0).then_some((bottom, top)),
            Primitive::Cone => {
                let q = radial();
                (q <= 1.0).then(|| (bottom, bottom + 2.0 * h.y * (1.0 - q.sqrt())))
            }
            Primitive::Sphere => {
                let q = radial();
                (q <= 1.0).then(|| {
                    let half = h.y * (1.0 - q).sqrt();
                    (self.center.y - half, self.center.y + half)
                })
            }
            // Flat in XY: no top surface to stand on.
            Primitive::Quad | Primitive::Circle => None,
        }
    }

    /// XZ cells touched by the bounding box.
    fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (min_x, min_z) = cell_key(
            self.center.x - self.half_extents.x,
            self.center.z - self.half_extents.z,
        );
        let (max_x, max_z) = cell_key(
            self.center.x + self.half_extents.x,
            self.center.z + self.half_extents.z,
        );
        (min_x..=max_x).flat_map(move |cx| (min_z..=max_z).map(move |cz| (cx, cz)))
    }
}

/// Spatial-hashed set of static colliders.
#[derive(Resource, Clone, Debug, Default)]
pub struct StaticColliderSet {
    colliders: Vec<StaticCollider>,
    /// Spatial hash cell -> collider indices
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl StaticColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every collidable piece of a layout.
    pub fn from_layout(layout: &SceneLayout) -> Self {
        let mut set = Self::new();
        for piece in layout.collidable() {
            set.insert(StaticCollider::from_placement(piece));
        }
        set
    }

    pub fn insert(&mut self, collider: StaticCollider) {
        let idx = self.colliders.len();
        for cell in collider.cells() {
            self.cells.entry(cell).or_default().push(idx);
        }
        self.colliders.push(collider);
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl GroundProbe for StaticColliderSet {
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<Vec3> {
        let indices = self.cells.get(&cell_key(origin.x, origin.z))?;
        let floor = origin.y - max_distance;

        let mut best: Option<f32> = None;
        for &idx in indices {
            let Some((bottom, top)) = self.colliders[idx].vertical_span(origin.x, origin.z) else {
                continue;
            };
            // A solid the ray starts in is walked through, not stood on.
            if origin.y >= bottom && origin.y <= top {
                continue;
            }
            if top < origin.y && top >= floor && best.is_none_or(|b| top > b) {
                best = Some(top);
            }
        }

        best.map(|y| Vec3::new(origin.x, y, origin.z))
    }
}
