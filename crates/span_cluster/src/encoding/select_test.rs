use glam::Vec3;

use super::*;
use crate::types::{Rgba8, OPAQUE_WHITE};

fn deltas_with(positions: Vec<Vec3>) -> InstanceDeltas {
  InstanceDeltas {
    positions: Some(positions),
    colors: None,
  }
}

fn colored(colors: Vec<Rgba8>) -> InstanceDeltas {
  InstanceDeltas {
    positions: None,
    colors: Some(colors),
  }
}

// =========================================================================
// Positions
// =========================================================================

/// Opaque white and zero deltas need no per-vertex data.
#[test]
fn test_identity_cluster_selects_nothing() {
  let deltas = vec![
    InstanceDeltas {
      positions: Some(vec![Vec3::ZERO; 4]),
      colors: Some(vec![OPAQUE_WHITE; 4]),
    },
    InstanceDeltas::identity(),
  ];
  assert_eq!(select_encoding(&deltas, &[], DEFAULT_POSITION_QUANTUM), SpanEncoding::NONE);
}

#[test]
fn test_deltas_under_quantum_are_ignored() {
  let deltas = vec![deltas_with(vec![Vec3::new(0.01, 0.01, 0.01)])];
  let enc = select_encoding(&deltas, &[], DEFAULT_POSITION_QUANTUM);
  assert_eq!(enc.position, PositionEncoding::None);
  assert_eq!(enc.pos_scale, 1.0);
}

/// A 200 unit delta is too coarse for 101010 at half an inch.
#[test]
fn test_large_delta_selects_161616() {
  let deltas = vec![deltas_with(vec![Vec3::ZERO, Vec3::new(200.0, 0.0, 0.0)])];
  let enc = select_encoding(&deltas, &[], DEFAULT_POSITION_QUANTUM);
  assert_eq!(enc.position, PositionEncoding::Pos161616);
  assert!((enc.pos_scale - 200.0 / 65536.0).abs() < 1e-7);
}

/// The same delta fits 101010 once the quantum reaches a quarter unit.
#[test]
fn test_large_delta_with_coarse_quantum_selects_101010() {
  let deltas = vec![deltas_with(vec![Vec3::new(200.0, 0.0, 0.0)])];
  let enc = select_encoding(&deltas, &[], 0.25);
  assert_eq!(enc.position, PositionEncoding::Pos101010);
  assert!((enc.pos_scale - 200.0 / 1024.0).abs() < 1e-6);
}

#[test]
fn test_moderate_delta_selects_888() {
  let deltas = vec![deltas_with(vec![Vec3::new(3.0, 4.0, 0.0)])];
  let enc = select_encoding(&deltas, &[], DEFAULT_POSITION_QUANTUM);
  assert_eq!(enc.position, PositionEncoding::Pos888);
  assert!((enc.pos_range() - 5.0).abs() < 1e-5);
}

/// Vertical-only motion packs into a single byte.
#[test]
fn test_vertical_delta_selects_008() {
  let deltas = vec![deltas_with(vec![Vec3::new(0.01, -0.01, 5.0)])];
  let enc = select_encoding(&deltas, &[], DEFAULT_POSITION_QUANTUM);
  assert_eq!(enc.position, PositionEncoding::Pos008);
}

/// The largest delta over all instances drives the choice.
#[test]
fn test_scan_takes_maximum_over_instances() {
  let deltas = vec![
    deltas_with(vec![Vec3::new(1.0, 0.0, 0.0)]),
    InstanceDeltas::identity(),
    deltas_with(vec![Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, 0.0, 0.5)]),
  ];
  let ext = scan_deltas(&deltas);
  assert_eq!(ext.max_len_sq, 4.0);
  assert_eq!(ext.max_abs, Vec3::new(1.0, 2.0, 0.5));
  assert!(!ext.has_color);
  assert!(!ext.has_alpha);
}

/// Growing the observed delta never lowers precision.
#[test]
fn test_ladder_is_monotonic() {
  let rank = |p: PositionEncoding| match p {
    PositionEncoding::None => 0,
    PositionEncoding::Pos008 => 1,
    PositionEncoding::Pos888 => 2,
    PositionEncoding::Pos101010 => 3,
    PositionEncoding::Pos161616 => 4,
  };

  let mut last = 0;
  let mut len = 0.01_f32;
  while len < 10_000.0 {
    let ext = DeltaExtents {
      max_len_sq: len * len,
      max_abs: Vec3::splat(len / 3f32.sqrt()),
      ..Default::default()
    };
    let r = rank(choose_encoding(&ext, DEFAULT_POSITION_QUANTUM).position);
    assert!(r >= last, "rank dropped at length {}", len);
    last = r;
    len *= 1.5;
  }
  assert_eq!(last, 4);
}

// =========================================================================
// Colors
// =========================================================================

#[test]
fn test_tinted_colors_select_intensity() {
  let deltas = vec![colored(vec![OPAQUE_WHITE, [200, 200, 200, 255]])];
  assert_eq!(
    select_encoding(&deltas, &[], DEFAULT_POSITION_QUANTUM).color,
    ColorEncoding::I8
  );
}

#[test]
fn test_translucent_white_selects_alpha() {
  let deltas = vec![colored(vec![[255, 255, 255, 10]])];
  assert_eq!(
    select_encoding(&deltas, &[], DEFAULT_POSITION_QUANTUM).color,
    ColorEncoding::A8
  );
}

#[test]
fn test_tint_and_alpha_across_instances_select_ai88() {
  let deltas = vec![
    colored(vec![[0, 0, 0, 255]]),
    colored(vec![[255, 255, 255, 0]]),
  ];
  let enc = select_encoding(&deltas, &[], DEFAULT_POSITION_QUANTUM);
  assert_eq!(enc.color, ColorEncoding::AI88);
  assert_eq!(enc.position, PositionEncoding::None);
}

/// Unshaded instances in a shaded cluster store the rest colors, so those
/// count toward the layout.
#[test]
fn test_rest_colors_count_when_some_instances_are_unshaded() {
  let rest = [[255, 255, 255, 64]];
  let mixed = vec![colored(vec![[100, 100, 100, 255]]), InstanceDeltas::identity()];
  assert_eq!(
    select_encoding(&mixed, &rest, DEFAULT_POSITION_QUANTUM).color,
    ColorEncoding::AI88
  );

  let all_shaded = vec![colored(vec![[100, 100, 100, 255]])];
  assert_eq!(
    select_encoding(&all_shaded, &rest, DEFAULT_POSITION_QUANTUM).color,
    ColorEncoding::I8
  );

  let none_shaded = vec![InstanceDeltas::identity(); 2];
  assert_eq!(
    select_encoding(&none_shaded, &rest, DEFAULT_POSITION_QUANTUM).color,
    ColorEncoding::None
  );
}
