use bevy::prelude::Vec3;

/// Axis-aligned box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub min: Vec3,
    pub max: Vec3,
}

impl Collider {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Zero-volume, inverted or non-finite boxes never collide.
    pub fn is_degenerate(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite())
            || self.max.x <= self.min.x
            || self.max.y <= self.min.y
            || self.max.z <= self.min.z
    }

    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
            p.z.clamp(self.min.z, self.max.z),
        )
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Local-space bounding box of a loaded model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelBounds {
    pub center: Vec3,
    pub size: Vec3,
}

impl ModelBounds {
    /// Bounds of a model whose origin sits at the middle of its base.
    pub fn floor_anchored(size: Vec3) -> Self {
        Self {
            center: Vec3::new(0.0, size.y * 0.5, 0.0),
            size,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Placement {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            scale: Vec3::ONE,
        }
    }
}

/// Builds the world-space collider for a placed model. Rotation is ignored.
pub fn build(bounds: ModelBounds, placement: Placement) -> Collider {
    let center = placement.translation + bounds.center * placement.scale;
    Collider::from_center_size(center, bounds.size * placement.scale)
}

/// Static world volumes, populated once at scene load.
#[derive(Clone, Debug, Default)]
pub struct ColliderRegistry {
    colliders: Vec<Collider>,
}

impl ColliderRegistry {
    pub fn new(colliders: Vec<Collider>) -> Self {
        Self { colliders }
    }

    pub fn all(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl FromIterator<Collider> for ColliderRegistry {
    fn from_iter<I: IntoIterator<Item = Collider>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
