// Copyright (c) 2017-2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use std::fmt::{Debug, Formatter};
use std::slice::ChunksExact;

/// One sample plane of a frame, stored row-major without padding.
///
/// Samples are held as `u16` so that 8-bit and 10-bit streams can share a
/// common scale after normalization.
#[derive(Clone, PartialEq, Eq)]
pub struct Plane {
  data: Vec<u16>,
  width: usize,
  height: usize,
}

impl Debug for Plane {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "Plane {{ {}x{}, data: {:?} }}",
      self.width,
      self.height,
      &self.data[..self.data.len().min(8)]
    )
  }
}

impl Plane {
  /// Allocates a zero filled plane.
  pub fn new(width: usize, height: usize) -> Self {
    Plane { data: vec![0; width * height], width, height }
  }

  /// Builds a plane from row-major samples.
  ///
  /// # Panics
  ///
  /// - If `data.len()` is not a multiple of `width`.
  pub fn from_slice(data: &[u16], width: usize) -> Self {
    let len = data.len();

    assert!(if width == 0 { len == 0 } else { len % width == 0 });

    Plane {
      data: data.to_vec(),
      width,
      height: if width == 0 { 0 } else { len / width },
    }
  }

  #[inline]
  pub const fn width(&self) -> usize {
    self.width
  }

  #[inline]
  pub const fn height(&self) -> usize {
    self.height
  }

  /// Width and height of the plane.
  #[inline]
  pub const fn dimensions(&self) -> (usize, usize) {
    (self.width, self.height)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Sample at column `x`, row `y`.
  #[inline]
  pub fn p(&self, x: usize, y: usize) -> u16 {
    self.data[y * self.width + x]
  }

  pub fn data(&self) -> &[u16] {
    &self.data
  }

  pub fn data_mut(&mut self) -> &mut [u16] {
    &mut self.data
  }

  /// Iterates over the samples in raster order.
  pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
    self.data.iter().copied()
  }

  /// Iterates over the rows of the plane.
  ///
  /// # Panics
  ///
  /// - If the plane has zero width.
  pub fn rows_iter(&self) -> ChunksExact<'_, u16> {
    self.data.chunks_exact(self.width)
  }

  /// Return a row
  pub fn row(&self, y: usize) -> &[u16] {
    &self.data[y * self.width..(y + 1) * self.width]
  }

  /// Fills the plane from a raw little-endian sample buffer.
  ///
  /// `source_bytewidth` is 1 for 8-bit samples and 2 for samples stored in
  /// two bytes. Every sample is shifted left by `shift` after it is widened.
  ///
  /// # Panics
  ///
  /// - If `source` does not hold exactly one plane worth of samples.
  pub fn copy_from_raw_u8(
    &mut self, source: &[u8], source_bytewidth: usize, shift: u32,
  ) {
    assert_eq!(
      source.len(),
      self.data.len() * source_bytewidth,
      "source length does not match {}x{} plane",
      self.width,
      self.height
    );
    match source_bytewidth {
      1 => {
        for (self_pixel, &source_pixel) in self.data.iter_mut().zip(source) {
          *self_pixel = u16::from(source_pixel) << shift;
        }
      }
      2 => {
        for (self_pixel, bytes) in
          self.data.iter_mut().zip(source.chunks_exact(2))
        {
          *self_pixel = u16::from_le_bytes([bytes[0], bytes[1]]) << shift;
        }
      }
      _ => unreachable!("unsupported sample width {}", source_bytewidth),
    }
  }

  /// Writes the plane into a raw sample buffer, the inverse of
  /// [`Plane::copy_from_raw_u8`] without a shift.
  ///
  /// # Panics
  ///
  /// - If `dest` cannot hold exactly one plane worth of samples.
  pub fn copy_to_raw_u8(&self, dest: &mut [u8], dest_bytewidth: usize) {
    assert_eq!(dest.len(), self.data.len() * dest_bytewidth);
    match dest_bytewidth {
      1 => {
        for (&self_pixel, dest_pixel) in self.data.iter().zip(dest) {
          *dest_pixel = self_pixel as u8;
        }
      }
      2 => {
        for (&self_pixel, bytes) in
          self.data.iter().zip(dest.chunks_exact_mut(2))
        {
          bytes.copy_from_slice(&self_pixel.to_le_bytes());
        }
      }
      _ => unreachable!("unsupported sample width {}", dest_bytewidth),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn copy_from_raw_u8() {
    let mut plane = Plane::new(4, 2);
    let input: Vec<u8> = (0..8).collect();

    plane.copy_from_raw_u8(&input, 1, 0);

    assert_eq!(plane.data(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(plane.row(1), &[4, 5, 6, 7]);
    assert_eq!(plane.p(2, 1), 6);
  }

  #[test]
  fn copy_from_raw_u8_shifted() {
    let mut plane = Plane::new(2, 1);

    plane.copy_from_raw_u8(&[255, 1], 1, 2);

    assert_eq!(plane.data(), &[1020, 4]);
  }

  #[test]
  fn copy_from_raw_u16_little_endian() {
    let mut plane = Plane::new(3, 1);

    #[rustfmt::skip]
    let raw = [
      0xff, 0x03,
      0x00, 0x02,
      0x01, 0x00,
    ];
    plane.copy_from_raw_u8(&raw, 2, 0);

    assert_eq!(plane.data(), &[1023, 512, 1]);
  }

  #[test]
  fn copy_to_raw_u8() {
    let plane = Plane::from_slice(&[1023, 512, 1, 0], 2);
    let mut output = vec![0u8; 8];

    plane.copy_to_raw_u8(&mut output, 2);

    let mut back = Plane::new(2, 2);
    back.copy_from_raw_u8(&output, 2, 0);
    assert_eq!(back, plane);
  }

  #[test]
  fn rows_iter() {
    let plane = Plane::from_slice(&[1, 2, 3, 4, 5, 6], 3);
    let rows: Vec<&[u16]> = plane.rows_iter().collect();

    assert_eq!(plane.dimensions(), (3, 2));
    assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
  }

  #[test]
  #[should_panic]
  fn copy_from_raw_u8_short_source() {
    let mut plane = Plane::new(4, 4);
    plane.copy_from_raw_u8(&[0u8; 15], 1, 0);
  }
}
