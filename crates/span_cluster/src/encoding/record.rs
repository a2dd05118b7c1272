//! Instance records: one placement plus packed per-vertex samples.

use glam::Vec3;

use super::quantize::{
  dequantize_signed, dequantize_unorm, pack_101010, quantize_signed, quantize_unorm,
  unpack_101010,
};
use super::{ColorEncoding, PositionEncoding, SpanEncoding};
use crate::error::{ClusterError, Result};
use crate::types::{color_conversion, LocalToWorld, Rgba8};

/// One encoded instance.
///
/// Position and color samples live in separate byte streams, `stride`
/// bytes per vertex each, little-endian.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceRecord {
  local_to_world: LocalToWorld,
  encoding: SpanEncoding,
  vertex_count: usize,
  positions: Vec<u8>,
  colors: Vec<u8>,
}

impl InstanceRecord {
  /// Quantize one instance's deltas and colors under `encoding`.
  ///
  /// `rest_colors` holds the template's colors, one per vertex. Missing
  /// deltas encode as zero; missing colors encode the rest colors. Slices
  /// that are present must hold exactly `rest_colors.len()` samples.
  pub fn encode(
    encoding: &SpanEncoding,
    local_to_world: LocalToWorld,
    rest_colors: &[Rgba8],
    deltas: Option<&[Vec3]>,
    colors: Option<&[Rgba8]>,
  ) -> Result<Self> {
    let vertex_count = rest_colors.len();
    if let Some(d) = deltas {
      check_count("position deltas", vertex_count, d.len())?;
    }
    if let Some(c) = colors {
      check_count("colors", vertex_count, c.len())?;
    }

    Ok(Self {
      local_to_world,
      encoding: *encoding,
      vertex_count,
      positions: encode_positions(encoding, vertex_count, deltas),
      colors: encode_colors(encoding.color, colors.unwrap_or(rest_colors)),
    })
  }

  pub fn local_to_world(&self) -> &LocalToWorld {
    &self.local_to_world
  }

  pub fn encoding(&self) -> &SpanEncoding {
    &self.encoding
  }

  pub fn vertex_count(&self) -> usize {
    self.vertex_count
  }

  /// Packed position stream.
  pub fn position_bytes(&self) -> &[u8] {
    &self.positions
  }

  /// Packed color stream.
  pub fn color_bytes(&self) -> &[u8] {
    &self.colors
  }

  /// Decoded local-space delta of one vertex.
  pub fn position_delta(&self, vertex: usize) -> Vec3 {
    let enc = &self.encoding;
    let range = enc.pos_range();
    let max_int = enc.position.max_int();
    let stride = enc.position.stride();
    let bytes = &self.positions[vertex * stride..(vertex + 1) * stride];
    let deq = |q: i32| dequantize_signed(q, range, max_int);

    match enc.position {
      PositionEncoding::None => Vec3::ZERO,
      PositionEncoding::Pos008 => Vec3::new(0.0, 0.0, deq(bytes[0] as i8 as i32)),
      PositionEncoding::Pos888 => Vec3::new(
        deq(bytes[0] as i8 as i32),
        deq(bytes[1] as i8 as i32),
        deq(bytes[2] as i8 as i32),
      ),
      PositionEncoding::Pos101010 => {
        let packed = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let [x, y, z] = unpack_101010(packed);
        Vec3::new(deq(x), deq(y), deq(z))
      }
      PositionEncoding::Pos161616 => {
        let axis = |i: usize| i16::from_le_bytes([bytes[i * 2], bytes[i * 2 + 1]]) as i32;
        Vec3::new(deq(axis(0)), deq(axis(1)), deq(axis(2)))
      }
    }
  }

  /// Decoded color of one vertex, None when the cluster carries no colors.
  pub fn color(&self, vertex: usize) -> Option<Rgba8> {
    let stride = self.encoding.color.stride();
    let bytes = &self.colors[vertex * stride..(vertex + 1) * stride];
    let unorm = |q: u8| color_conversion::to_unorm8(dequantize_unorm(q as u32, u8::MAX as u32));

    match self.encoding.color {
      ColorEncoding::None => None,
      ColorEncoding::I8 => {
        let i = unorm(bytes[0]);
        Some([i, i, i, 255])
      }
      ColorEncoding::A8 => Some([255, 255, 255, unorm(bytes[0])]),
      ColorEncoding::AI88 => {
        let i = unorm(bytes[0]);
        Some([i, i, i, unorm(bytes[1])])
      }
    }
  }

  /// Every decoded delta, in vertex order.
  pub fn position_deltas(&self) -> Vec<Vec3> {
    (0..self.vertex_count)
      .map(|v| self.position_delta(v))
      .collect()
  }

  /// Every decoded color, in vertex order.
  pub fn colors(&self) -> Option<Vec<Rgba8>> {
    if !self.encoding.has_color() {
      return None;
    }
    (0..self.vertex_count).map(|v| self.color(v)).collect()
  }
}

fn check_count(what: &'static str, expected: usize, actual: usize) -> Result<()> {
  if expected == actual {
    Ok(())
  } else {
    Err(ClusterError::VertexCountMismatch {
      what,
      expected,
      actual,
    })
  }
}

fn encode_positions(enc: &SpanEncoding, vertex_count: usize, deltas: Option<&[Vec3]>) -> Vec<u8> {
  let stride = enc.position.stride();
  let deltas = match deltas {
    Some(d) if stride > 0 => d,
    // Zero deltas quantize to zero bytes in every layout.
    _ => return vec![0; vertex_count * stride],
  };

  let range = enc.pos_range();
  let max_int = enc.position.max_int();
  let q = |v: f32| quantize_signed(v, range, max_int);

  let mut out = Vec::with_capacity(vertex_count * stride);
  for d in deltas {
    match enc.position {
      PositionEncoding::None => {}
      PositionEncoding::Pos008 => out.push(q(d.z) as i8 as u8),
      PositionEncoding::Pos888 => {
        out.extend([q(d.x) as i8 as u8, q(d.y) as i8 as u8, q(d.z) as i8 as u8]);
      }
      PositionEncoding::Pos101010 => {
        out.extend(pack_101010(q(d.x), q(d.y), q(d.z)).to_le_bytes());
      }
      PositionEncoding::Pos161616 => {
        for v in [d.x, d.y, d.z] {
          out.extend((q(v) as i16).to_le_bytes());
        }
      }
    }
  }
  out
}

fn encode_colors(color: ColorEncoding, colors: &[Rgba8]) -> Vec<u8> {
  let max = u8::MAX as u32;
  let intensity = |c: &Rgba8| quantize_unorm(color_conversion::intensity(*c), max) as u8;
  let alpha = |c: &Rgba8| quantize_unorm(color_conversion::from_unorm8(c[3]), max) as u8;

  let mut out = Vec::with_capacity(colors.len() * color.stride());
  for c in colors {
    match color {
      ColorEncoding::None => {}
      ColorEncoding::I8 => out.push(intensity(c)),
      ColorEncoding::A8 => out.push(alpha(c)),
      ColorEncoding::AI88 => out.extend([intensity(c), alpha(c)]),
    }
  }
  out
}

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;
