//! Cluster encoding descriptors and fixed-width instance records.
//!
//! Every instance in a cluster stores its per-vertex data in the same
//! layout, chosen once per cluster:
//!
//! ```text
//! Position    bytes/vertex   layout                    divisor
//! ---------   ------------   -----------------------   -------
//! None        0              -                         -
//! Pos008      1              i8 z                      255.9
//! Pos888      3              i8 x, y, z                255.9
//! Pos101010   4              u32: x | y<<10 | z<<20    1024
//! Pos161616   6              i16 x, y, z (LE)          65536
//!
//! Color       bytes/vertex   layout
//! ---------   ------------   ----------------------
//! None        0              -
//! I8          1              intensity
//! A8          1              alpha
//! AI88        2              intensity, alpha
//! ```
//!
//! `pos_scale = max_delta_len / divisor`; the signed range every channel
//! covers is `pos_scale * divisor`, i.e. the observed maximum.

pub mod quantize;
pub mod record;
pub mod select;

pub use record::InstanceRecord;
pub use select::{choose_encoding, scan_deltas, select_encoding, DeltaExtents};

/// Legacy OR-of-flags codes understood by downstream serializers.
pub mod bits {
  pub const POS_888: u32 = 0x1;
  pub const POS_161616: u32 = 0x2;
  pub const POS_101010: u32 = 0x4;
  pub const POS_008: u32 = 0x8;
  pub const POS_MASK: u32 = 0xf;

  pub const COL_A8: u32 = 0x10;
  pub const COL_I8: u32 = 0x20;
  pub const COL_AI88: u32 = 0x40;
  pub const COL_MASK: u32 = 0xf0;
}

/// Per-vertex position delta layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PositionEncoding {
  /// Rigid copies of the rest pose.
  #[default]
  None,
  /// Z only, 8 bits. X and Y are not stored: they decode as zero, so their
  /// error is bounded by the position quantum rather than one step.
  Pos008,
  /// 8 bits per axis.
  Pos888,
  /// 10 bits per axis packed in a u32.
  Pos101010,
  /// 16 bits per axis.
  Pos161616,
}

impl PositionEncoding {
  /// Divisor turning the observed maximum into `pos_scale`.
  pub const fn divisor(self) -> f32 {
    match self {
      PositionEncoding::None => 1.0,
      PositionEncoding::Pos008 | PositionEncoding::Pos888 => 255.9,
      PositionEncoding::Pos101010 => 1024.0,
      PositionEncoding::Pos161616 => 65536.0,
    }
  }

  /// Largest magnitude a stored channel can hold.
  pub const fn max_int(self) -> i32 {
    match self {
      PositionEncoding::None => 0,
      PositionEncoding::Pos008 | PositionEncoding::Pos888 => i8::MAX as i32,
      PositionEncoding::Pos101010 => 511,
      PositionEncoding::Pos161616 => i16::MAX as i32,
    }
  }

  /// Bytes per vertex.
  pub const fn stride(self) -> usize {
    match self {
      PositionEncoding::None => 0,
      PositionEncoding::Pos008 => 1,
      PositionEncoding::Pos888 => 3,
      PositionEncoding::Pos101010 => 4,
      PositionEncoding::Pos161616 => 6,
    }
  }

  pub const fn bits(self) -> u32 {
    match self {
      PositionEncoding::None => 0,
      PositionEncoding::Pos008 => bits::POS_008,
      PositionEncoding::Pos888 => bits::POS_888,
      PositionEncoding::Pos101010 => bits::POS_101010,
      PositionEncoding::Pos161616 => bits::POS_161616,
    }
  }
}

/// Per-vertex color layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ColorEncoding {
  /// Template rest colors are used unchanged.
  #[default]
  None,
  /// Intensity only; alpha is opaque.
  I8,
  /// Alpha only; RGB is white.
  A8,
  /// Intensity and alpha.
  AI88,
}

impl ColorEncoding {
  /// Bytes per vertex.
  pub const fn stride(self) -> usize {
    match self {
      ColorEncoding::None => 0,
      ColorEncoding::I8 | ColorEncoding::A8 => 1,
      ColorEncoding::AI88 => 2,
    }
  }

  pub const fn bits(self) -> u32 {
    match self {
      ColorEncoding::None => 0,
      ColorEncoding::I8 => bits::COL_I8,
      ColorEncoding::A8 => bits::COL_A8,
      ColorEncoding::AI88 => bits::COL_AI88,
    }
  }
}

/// Encoding shared by every instance of one cluster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpanEncoding {
  pub position: PositionEncoding,
  pub color: ColorEncoding,
  /// Observed maximum delta length over the position divisor.
  pub pos_scale: f32,
}

impl SpanEncoding {
  /// No per-vertex data at all.
  pub const NONE: Self = Self {
    position: PositionEncoding::None,
    color: ColorEncoding::None,
    pos_scale: 1.0,
  };

  pub fn new(position: PositionEncoding, color: ColorEncoding, pos_scale: f32) -> Self {
    Self {
      position,
      color,
      pos_scale,
    }
  }

  pub fn has_position(&self) -> bool {
    self.position != PositionEncoding::None
  }

  pub fn has_color(&self) -> bool {
    self.color != ColorEncoding::None
  }

  /// Signed range each position channel spans.
  pub fn pos_range(&self) -> f32 {
    self.pos_scale * self.position.divisor()
  }

  /// Smallest representable position change (0 without position data).
  pub fn pos_step(&self) -> f32 {
    match self.position {
      PositionEncoding::None => 0.0,
      p => self.pos_range() / p.max_int() as f32,
    }
  }

  /// Bytes one vertex occupies in a record.
  pub fn vertex_stride(&self) -> usize {
    self.position.stride() + self.color.stride()
  }

  /// Legacy OR-of-flags code.
  pub fn bits(&self) -> u32 {
    self.position.bits() | self.color.bits()
  }

  /// Parse a legacy code. Returns None for unknown or combined flags.
  pub fn from_bits(code: u32, pos_scale: f32) -> Option<Self> {
    let position = match code & bits::POS_MASK {
      0 => PositionEncoding::None,
      bits::POS_008 => PositionEncoding::Pos008,
      bits::POS_888 => PositionEncoding::Pos888,
      bits::POS_101010 => PositionEncoding::Pos101010,
      bits::POS_161616 => PositionEncoding::Pos161616,
      _ => return None,
    };
    let color = match code & bits::COL_MASK {
      0 => ColorEncoding::None,
      bits::COL_I8 => ColorEncoding::I8,
      bits::COL_A8 => ColorEncoding::A8,
      bits::COL_AI88 => ColorEncoding::AI88,
      _ => return None,
    };
    if code & !(bits::POS_MASK | bits::COL_MASK) != 0 {
      return None;
    }
    Some(Self::new(position, color, pos_scale))
  }
}

impl Default for SpanEncoding {
  fn default() -> Self {
    Self::NONE
  }
}
