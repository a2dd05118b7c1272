//! Scalar quantization helpers.
//!
//! `q = round(value / range * max_int)`, clamped to the representable
//! interval; decoding multiplies back. Error is at most half a step
//! (`range / max_int / 2`) for values inside `[-range, range]`.

/// Quantize a signed value spanning `[-range, range]`.
#[inline]
pub fn quantize_signed(value: f32, range: f32, max_int: i32) -> i32 {
  if range <= 0.0 {
    return 0;
  }
  let max = max_int as f32;
  (value / range * max).round().clamp(-max, max) as i32
}

#[inline]
pub fn dequantize_signed(q: i32, range: f32, max_int: i32) -> f32 {
  if max_int == 0 {
    return 0.0;
  }
  q as f32 * range / max_int as f32
}

/// Quantize a unit value spanning `[0, 1]`.
#[inline]
pub fn quantize_unorm(value: f32, max_int: u32) -> u32 {
  let max = max_int as f32;
  (value * max).round().clamp(0.0, max) as u32
}

#[inline]
pub fn dequantize_unorm(q: u32, max_int: u32) -> f32 {
  q as f32 / max_int as f32
}

const MASK_10: u32 = 0x3ff;

/// Pack three signed 10-bit values (two's complement) into x | y<<10 | z<<20.
#[inline]
pub fn pack_101010(x: i32, y: i32, z: i32) -> u32 {
  (x as u32 & MASK_10) | ((y as u32 & MASK_10) << 10) | ((z as u32 & MASK_10) << 20)
}

#[inline]
pub fn unpack_101010(packed: u32) -> [i32; 3] {
  #[inline(always)]
  fn field(packed: u32, shift: u32) -> i32 {
    // Sign-extend bit 9 of the field.
    ((((packed >> shift) & MASK_10) << 22) as i32) >> 22
  }
  [field(packed, 0), field(packed, 10), field(packed, 20)]
}

#[cfg(test)]
#[path = "quantize_test.rs"]
mod quantize_test;
