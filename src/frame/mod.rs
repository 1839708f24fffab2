// Copyright (c) 2018-2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::pixel::BitDepth;

mod plane;
pub use plane::*;

/// Luma dimensions of a 4:2:0 frame.
///
/// Chroma planes are half the luma size in both directions, truncated on
/// odd dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameGeometry {
  width: usize,
  height: usize,
}

impl FrameGeometry {
  /// # Errors
  ///
  /// - Returns [`Error::InvalidGeometry`] if either dimension is below 2,
  ///   which would leave the chroma planes empty.
  pub fn new(width: usize, height: usize) -> Result<Self> {
    if width < 2 || height < 2 {
      return Err(Error::InvalidGeometry { width, height });
    }
    if width % 2 != 0 || height % 2 != 0 {
      warn!(
        "{}x{} does not tile evenly into 4:2:0, chroma is truncated to {}x{}",
        width,
        height,
        width / 2,
        height / 2
      );
    }
    Ok(FrameGeometry { width, height })
  }

  #[inline]
  pub const fn width(&self) -> usize {
    self.width
  }

  #[inline]
  pub const fn height(&self) -> usize {
    self.height
  }

  /// Dimensions of the U and V planes.
  #[inline]
  pub const fn chroma_dimensions(&self) -> (usize, usize) {
    (self.width / 2, self.height / 2)
  }

  /// Samples in the Y plane.
  #[inline]
  pub const fn luma_len(&self) -> usize {
    self.width * self.height
  }

  /// Samples in each of the U and V planes.
  #[inline]
  pub const fn chroma_len(&self) -> usize {
    let (w, h) = self.chroma_dimensions();
    w * h
  }

  /// Samples in one whole frame.
  #[inline]
  pub const fn frame_len(&self) -> usize {
    self.luma_len() + 2 * self.chroma_len()
  }

  /// Bytes one frame occupies in a raw stream of the given depth.
  #[inline]
  pub const fn frame_bytes(&self, depth: BitDepth) -> usize {
    self.frame_len() * depth.bytes_per_sample()
  }
}

impl FromStr for FrameGeometry {
  type Err = String;

  /// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    let (w, h) = s
      .split_once(['x', 'X'])
      .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let width =
      w.trim().parse().map_err(|e| format!("bad width `{w}`: {e}"))?;
    let height =
      h.trim().parse().map_err(|e| format!("bad height `{h}`: {e}"))?;
    FrameGeometry::new(width, height).map_err(|e| e.to_string())
  }
}

impl fmt::Display for FrameGeometry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}x{}", self.width, self.height)
  }
}

/// One video frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
  /// Planes constituting the frame, in Y, U, V order.
  pub planes: [Plane; 3],
}

impl Frame {
  /// Allocates a zero filled frame.
  pub fn new(geometry: FrameGeometry) -> Self {
    let (chroma_width, chroma_height) = geometry.chroma_dimensions();
    Frame {
      planes: [
        Plane::new(geometry.width(), geometry.height()),
        Plane::new(chroma_width, chroma_height),
        Plane::new(chroma_width, chroma_height),
      ],
    }
  }

  /// Frame whose planes are filled with one value each.
  pub fn filled(geometry: FrameGeometry, y: u16, u: u16, v: u16) -> Self {
    let mut frame = Frame::new(geometry);
    for (plane, value) in frame.planes.iter_mut().zip([y, u, v]) {
      plane.data_mut().fill(value);
    }
    frame
  }
}
