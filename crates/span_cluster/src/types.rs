//! Core value types shared by the template, splitter and encoder.

use glam::{Affine3A, Vec3};

/// Local-to-world transform of one placed instance (rotation, scale,
/// translation).
pub type LocalToWorld = Affine3A;

/// 8-bit RGBA color, channel order `[r, g, b, a]`.
pub type Rgba8 = [u8; 4];

/// Opaque white: the identity color an unshaded vertex carries.
pub const OPAQUE_WHITE: Rgba8 = [255, 255, 255, 255];

/// Unit-float <-> 8-bit color conversions.
///
/// Maps [0.0, 1.0] to [0, 255]; values outside the range clamp.
pub mod color_conversion {
  use super::Rgba8;
  use glam::Vec4;

  /// Largest 8-bit channel value.
  pub const MAX: f32 = 255.0;

  /// Convert a unit float to an 8-bit channel, rounding to nearest.
  #[inline(always)]
  pub fn to_unorm8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * MAX).round() as u8
  }

  /// Convert an 8-bit channel back to a unit float.
  #[inline(always)]
  pub fn from_unorm8(value: u8) -> f32 {
    value as f32 / MAX
  }

  /// Pack a float RGBA color.
  #[inline]
  pub fn pack(color: Vec4) -> Rgba8 {
    [
      to_unorm8(color.x),
      to_unorm8(color.y),
      to_unorm8(color.z),
      to_unorm8(color.w),
    ]
  }

  /// Unpack to a float RGBA color.
  #[inline]
  pub fn unpack(color: Rgba8) -> Vec4 {
    Vec4::new(
      from_unorm8(color[0]),
      from_unorm8(color[1]),
      from_unorm8(color[2]),
      from_unorm8(color[3]),
    )
  }

  /// Mean of the RGB channels, as a unit float.
  #[inline]
  pub fn intensity(color: Rgba8) -> f32 {
    (color[0] as f32 + color[1] as f32 + color[2] as f32) / (3.0 * MAX)
  }
}

/// Axis-aligned bounding box.
///
/// Starts inverted (`empty`) so points can be folded in with `encapsulate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb3 {
  pub min: Vec3,
  pub max: Vec3,
}

impl Aabb3 {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: Vec3::splat(f32::INFINITY),
      max: Vec3::splat(f32::NEG_INFINITY),
    }
  }

  /// Create AABB from min/max corners.
  pub fn new(min: Vec3, max: Vec3) -> Self {
    debug_assert!(
      min.cmple(max).all(),
      "AABB min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Smallest AABB containing every point.
  pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
    let mut aabb = Self::empty();
    for p in points {
      aabb.encapsulate(p);
    }
    aabb
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: Vec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min.cmple(self.max).all()
  }

  /// Get the size of the AABB (max - min).
  #[inline]
  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }

  /// Get the center of the AABB.
  #[inline]
  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  /// Index (0 = X, 1 = Y, 2 = Z) of the longest side.
  ///
  /// Comparisons run X against Y, then the winner against Z, with strict
  /// `>`; an exact tie therefore resolves to the later axis.
  pub fn longest_axis(&self) -> usize {
    let del = self.size();
    if del.x > del.y {
      if del.x > del.z {
        0
      } else {
        2
      }
    } else if del.y > del.z {
      1
    } else {
      2
    }
  }

  /// Bounds of this box after an affine transform (all 8 corners).
  pub fn transformed(&self, transform: &Affine3A) -> Self {
    if !self.is_valid() {
      return *self;
    }
    Self::from_points((0..8u8).map(|corner| {
      let p = Vec3::new(
        if corner & 1 == 0 { self.min.x } else { self.max.x },
        if corner & 2 == 0 { self.min.y } else { self.max.y },
        if corner & 4 == 0 { self.min.z } else { self.max.z },
      );
      transform.transform_point3(p)
    }))
  }
}

impl Default for Aabb3 {
  fn default() -> Self {
    Self::empty()
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
