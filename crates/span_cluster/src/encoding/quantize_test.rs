use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

#[test]
fn test_signed_round_trip_within_half_step() {
  let mut rng = StdRng::seed_from_u64(7);
  for max_int in [127, 511, 32767] {
    let range = 3.0;
    let half_step = range / max_int as f32 / 2.0;
    for _ in 0..1000 {
      let v = rng.random_range(-range..=range);
      let q = quantize_signed(v, range, max_int);
      let back = dequantize_signed(q, range, max_int);
      assert!(
        (back - v).abs() <= half_step + 1e-6,
        "{} -> {} -> {} (max_int {})",
        v,
        q,
        back,
        max_int
      );
    }
  }
}

#[test]
fn test_signed_clamps_out_of_range() {
  assert_eq!(quantize_signed(10.0, 1.0, 127), 127);
  assert_eq!(quantize_signed(-10.0, 1.0, 127), -127);
}

#[test]
fn test_signed_zero_range() {
  assert_eq!(quantize_signed(5.0, 0.0, 127), 0);
  assert_eq!(dequantize_signed(12, 1.0, 0), 0.0);
}

#[test]
fn test_unorm_endpoints() {
  assert_eq!(quantize_unorm(0.0, 255), 0);
  assert_eq!(quantize_unorm(1.0, 255), 255);
  assert_eq!(quantize_unorm(2.0, 255), 255);
  assert_eq!(quantize_unorm(-1.0, 255), 0);
  assert_eq!(dequantize_unorm(255, 255), 1.0);
}

#[test]
fn test_101010_sign_extension() {
  let packed = pack_101010(-1, 511, -512);
  assert_eq!(unpack_101010(packed), [-1, 511, -512]);
  assert_eq!(packed >> 30, 0, "top two bits stay clear");
}

#[test]
fn test_101010_fields_do_not_bleed() {
  let mut rng = StdRng::seed_from_u64(42);
  for _ in 0..500 {
    let x = rng.random_range(-511..=511);
    let y = rng.random_range(-511..=511);
    let z = rng.random_range(-511..=511);
    assert_eq!(unpack_101010(pack_101010(x, y, z)), [x, y, z]);
  }
}
