// Copyright (c) 2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Sample bit depth of one raw stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum BitDepth {
  /// One byte per sample, values 0-255.
  #[default]
  Eight,
  /// Two little-endian bytes per sample, values 0-1023.
  Ten,
}

impl BitDepth {
  /// Number of bytes one sample occupies in the raw stream.
  pub const fn bytes_per_sample(self) -> usize {
    match self {
      BitDepth::Eight => 1,
      BitDepth::Ten => 2,
    }
  }

  /// Largest value a sample of this depth can hold.
  pub const fn max_value(self) -> u16 {
    match self {
      BitDepth::Eight => 255,
      BitDepth::Ten => 1023,
    }
  }

  pub const fn bits(self) -> usize {
    match self {
      BitDepth::Eight => 8,
      BitDepth::Ten => 10,
    }
  }
}

impl TryFrom<usize> for BitDepth {
  type Error = Error;

  fn try_from(bits: usize) -> Result<Self, Self::Error> {
    match bits {
      8 => Ok(BitDepth::Eight),
      10 => Ok(BitDepth::Ten),
      _ => Err(Error::UnsupportedBitDepth(bits)),
    }
  }
}

impl FromStr for BitDepth {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let bits: usize = s.trim().parse().map_err(|e| format!("{e}"))?;
    BitDepth::try_from(bits).map_err(|e| e.to_string())
  }
}

impl fmt::Display for BitDepth {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.bits())
  }
}

/// Common numeric scale two streams are compared on.
///
/// Two 8-bit streams are compared natively with a peak of 255. As soon as
/// one of the streams is 10-bit, 8-bit samples are widened with `<< 2` so
/// that 255 lands on 1020, and the peak becomes 1020. The 10-bit samples
/// are used unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SampleScale {
  #[default]
  Eight,
  Ten,
}

impl SampleScale {
  /// Picks the scale for comparing a stream of depth `a` with one of
  /// depth `b`.
  pub const fn common(a: BitDepth, b: BitDepth) -> Self {
    match (a, b) {
      (BitDepth::Eight, BitDepth::Eight) => SampleScale::Eight,
      _ => SampleScale::Ten,
    }
  }

  /// Left shift applied to samples of depth `depth` to bring them onto
  /// this scale.
  pub const fn shift_for(self, depth: BitDepth) -> u32 {
    match (self, depth) {
      (SampleScale::Ten, BitDepth::Eight) => 2,
      _ => 0,
    }
  }

  /// Peak sample value used in the PSNR formula for this scale.
  pub const fn peak(self) -> f64 {
    match self {
      SampleScale::Eight => 255.0,
      SampleScale::Ten => 1020.0,
    }
  }
}

impl fmt::Display for SampleScale {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      SampleScale::Eight => write!(f, "8-bit (peak 255)"),
      SampleScale::Ten => write!(f, "10-bit (peak 1020)"),
    }
  }
}
