// Copyright (c) 2017-2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

//! Reader for headerless planar 4:2:0 streams.
//!
//! A stream is a sequence of frames, each made of a Y plane followed by a U
//! and a V plane. 8-bit streams store one byte per sample, 10-bit streams
//! store two little-endian bytes per sample.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::error::{Error, IoContext, Result};
use crate::frame::{Frame, FrameGeometry};
use crate::pixel::{BitDepth, SampleScale};

/// Sequential reader producing one [`Frame`] per call.
pub struct YuvReader<R: Read> {
  name: String,
  input: Option<R>,
  geometry: FrameGeometry,
  bit_depth: BitDepth,
  shift: u32,
  buf: Vec<u8>,
  frames_read: usize,
}

impl YuvReader<BufReader<File>> {
  /// Opens `path` for reading.
  ///
  /// # Errors
  ///
  /// - Returns [`Error::Io`] if the file cannot be opened.
  pub fn open<P: AsRef<Path>>(
    path: P, geometry: FrameGeometry, bit_depth: BitDepth,
  ) -> Result<Self> {
    let path = path.as_ref();
    let file = File::open(path)
      .context(|| format!("Unable to open {}", path.display()))?;
    debug!("opened {} ({}, {}-bit)", path.display(), geometry, bit_depth);
    Ok(Self::from_reader(
      path.display().to_string(),
      BufReader::new(file),
      geometry,
      bit_depth,
    ))
  }
}

impl<R: Read> YuvReader<R> {
  /// Wraps an already open byte source. `name` is used in error messages.
  pub fn from_reader(
    name: impl Into<String>, input: R, geometry: FrameGeometry,
    bit_depth: BitDepth,
  ) -> Self {
    YuvReader {
      name: name.into(),
      input: Some(input),
      geometry,
      bit_depth,
      shift: 0,
      buf: vec![0; geometry.frame_bytes(bit_depth)],
      frames_read: 0,
    }
  }

  /// Normalizes every sample onto `scale`.
  pub fn normalized_to(mut self, scale: SampleScale) -> Self {
    self.shift = scale.shift_for(self.bit_depth);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub const fn geometry(&self) -> FrameGeometry {
    self.geometry
  }

  pub const fn bit_depth(&self) -> BitDepth {
    self.bit_depth
  }

  /// Number of frames returned so far.
  pub const fn frames_read(&self) -> usize {
    self.frames_read
  }

  pub const fn is_closed(&self) -> bool {
    self.input.is_none()
  }

  /// Reads the next frame.
  ///
  /// # Errors
  ///
  /// - Returns [`Error::EndOfStream`] if less than a whole frame is left.
  ///   A stream ending exactly on a frame boundary reports `read == 0`.
  /// - Returns [`Error::Io`] if the underlying read fails.
  /// - Returns [`Error::Closed`] if the reader was closed.
  pub fn read_frame(&mut self) -> Result<Frame> {
    let input =
      self.input.as_mut().ok_or_else(|| Error::Closed(self.name.clone()))?;

    let needed = self.buf.len();
    let read = fill_buffer(input, &mut self.buf).context(|| {
      format!("Unable to read frame {} of {}", self.frames_read, self.name)
    })?;
    if read < needed {
      return Err(Error::EndOfStream {
        stream: self.name.clone(),
        frame: self.frames_read,
        read,
        needed,
      });
    }

    let bytewidth = self.bit_depth.bytes_per_sample();
    let luma_bytes = self.geometry.luma_len() * bytewidth;
    let chroma_bytes = self.geometry.chroma_len() * bytewidth;
    let (y, uv) = self.buf.split_at(luma_bytes);
    let (u, v) = uv.split_at(chroma_bytes);

    let mut frame = Frame::new(self.geometry);
    for (plane, raw) in frame.planes.iter_mut().zip([y, u, v]) {
      plane.copy_from_raw_u8(raw, bytewidth, self.shift);
    }

    trace!("{}: read frame {}", self.name, self.frames_read);
    self.frames_read += 1;
    Ok(frame)
  }

  /// Releases the byte source. Calling it again does nothing.
  pub fn close(&mut self) {
    if self.input.take().is_some() {
      debug!("closed {} after {} frames", self.name, self.frames_read);
    }
  }
}

/// Reads until `buf` is full or the source is exhausted and returns the
/// number of bytes read.
fn fill_buffer<R: Read>(input: &mut R, buf: &mut [u8]) -> io::Result<usize> {
  let mut read = 0;
  while read < buf.len() {
    match input.read(&mut buf[read..]) {
      Ok(0) => break,
      Ok(n) => read += n,
      Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
      Err(e) => return Err(e),
    }
  }
  Ok(read)
}
