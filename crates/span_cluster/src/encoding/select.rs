//! Encoding selection: the cheapest layout that holds a cluster's observed
//! deltas without clipping.
//!
//! Positions climb a precision ladder (008 -> 888 -> 101010 -> 161616),
//! stopping at the first rung whose step is finer than the position
//! quantum. Colors pick intensity and/or alpha channels only when some
//! vertex departs from opaque white.

use glam::Vec3;

use super::{ColorEncoding, PositionEncoding, SpanEncoding};
use crate::deltas::InstanceDeltas;
use crate::types::Rgba8;

/// Half an inch, in feet.
pub const DEFAULT_POSITION_QUANTUM: f32 = 0.5 / 12.0;

/// Observed value ranges over every instance of a cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeltaExtents {
  /// Largest squared delta length.
  pub max_len_sq: f32,
  /// Largest absolute component per axis.
  pub max_abs: Vec3,
  /// Some color's RGB differs from white.
  pub has_color: bool,
  /// Some color's alpha differs from opaque.
  pub has_alpha: bool,
}

/// Scan deltas and colors of every instance.
pub fn scan_deltas(deltas: &[InstanceDeltas]) -> DeltaExtents {
  let mut extents = DeltaExtents::default();

  for inst in deltas {
    if let Some(positions) = &inst.positions {
      for d in positions {
        extents.max_len_sq = extents.max_len_sq.max(d.length_squared());
        extents.max_abs = extents.max_abs.max(d.abs());
      }
    }

    if let Some(colors) = &inst.colors {
      extents.include_colors(colors);
    }
  }

  extents
}

impl DeltaExtents {
  /// Fold colors into the color flags.
  pub fn include_colors(&mut self, colors: &[Rgba8]) {
    for c in colors {
      if c[0] != 255 || c[1] != 255 || c[2] != 255 {
        self.has_color = true;
      }
      if c[3] != 255 {
        self.has_alpha = true;
      }
    }
  }
}

/// Map observed extents onto an encoding.
///
/// `quantum` is the largest position error that may go unencoded; it must
/// be positive.
pub fn choose_encoding(extents: &DeltaExtents, quantum: f32) -> SpanEncoding {
  debug_assert!(quantum > 0.0, "position quantum must be positive");

  let color = match (extents.has_color, extents.has_alpha) {
    (true, true) => ColorEncoding::AI88,
    (true, false) => ColorEncoding::I8,
    (false, true) => ColorEncoding::A8,
    (false, false) => ColorEncoding::None,
  };

  // A zero maximum never passes this check, so pos_scale is never zero.
  if extents.max_len_sq <= 0.0 || extents.max_len_sq <= quantum * quantum {
    return SpanEncoding::new(PositionEncoding::None, color, 1.0);
  }

  let max_len = extents.max_len_sq.sqrt();
  let max = extents.max_abs;

  let position = if max.x < quantum && max.y < quantum {
    PositionEncoding::Pos008
  } else if max_len / PositionEncoding::Pos888.divisor() < quantum {
    PositionEncoding::Pos888
  } else if max_len / PositionEncoding::Pos101010.divisor() < quantum {
    PositionEncoding::Pos101010
  } else {
    PositionEncoding::Pos161616
  };

  SpanEncoding::new(position, color, max_len / position.divisor())
}

/// Scan a cluster's deltas and choose its encoding.
///
/// When some instances are shaded and others are not, the unshaded ones
/// store `rest_colors`, so those are scanned too.
#[tracing::instrument(skip_all, name = "encoding::select", fields(instances = deltas.len()))]
pub fn select_encoding(
  deltas: &[InstanceDeltas],
  rest_colors: &[Rgba8],
  quantum: f32,
) -> SpanEncoding {
  let mut extents = scan_deltas(deltas);
  let shaded = deltas.iter().filter(|d| d.colors.is_some()).count();
  if shaded > 0 && shaded < deltas.len() {
    extents.include_colors(rest_colors);
  }
  let encoding = choose_encoding(&extents, quantum);
  tracing::trace!(?extents, ?encoding, "selected encoding");
  encoding
}

#[cfg(test)]
#[path = "select_test.rs"]
mod select_test;
