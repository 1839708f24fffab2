// Copyright (c) 2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use std::io;

use thiserror::Error;

/// Errors raised while reading raw video or computing metrics.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  /// The stream could not be opened or a read failed for a reason other
  /// than running out of data.
  #[error("{msg}: {source}")]
  Io {
    /// What was being done when the failure happened.
    msg: String,
    /// The underlying I/O error.
    source: io::Error,
  },
  /// Fewer bytes remain in the stream than one frame requires.
  ///
  /// `read == 0` means the stream ended exactly on a frame boundary.
  #[error(
    "{stream}: not enough data for frame {frame} ({read} of {needed} bytes)"
  )]
  EndOfStream {
    /// Name of the stream, usually its path.
    stream: String,
    /// Zero-based index of the frame that could not be read.
    frame: usize,
    /// Bytes that were available for the frame.
    read: usize,
    /// Bytes one frame occupies.
    needed: usize,
  },
  /// Two planes that should be compared have different dimensions.
  #[error(
    "plane dimensions differ: {}x{} vs {}x{}",
    .left.0, .left.1, .right.0, .right.1
  )]
  ShapeMismatch {
    /// Width and height of the first plane.
    left: (usize, usize),
    /// Width and height of the second plane.
    right: (usize, usize),
  },
  /// Only 8 and 10 bit samples are supported.
  #[error("unsupported bit depth {0} (expected 8 or 10)")]
  UnsupportedBitDepth(usize),
  /// The frame dimensions cannot describe a 4:2:0 frame.
  #[error("invalid frame size {width}x{height}")]
  InvalidGeometry {
    /// Luma width.
    width: usize,
    /// Luma height.
    height: usize,
  },
  /// The peak sample value is unusable for a PSNR computation.
  #[error("invalid peak value {0} (expected a finite value > 0)")]
  InvalidPeak(f64),
  /// No frame pair was compared, so there is nothing to average.
  #[error("no frames were compared")]
  NoFrames,
  /// The stream was already closed.
  #[error("{0}: stream is closed")]
  Closed(String),
}

impl Error {
  /// Returns `true` when the error reports a clean end of stream, i.e. the
  /// data ran out exactly between two frames.
  pub const fn is_clean_eof(&self) -> bool {
    matches!(self, Error::EndOfStream { read: 0, .. })
  }
}

/// Attaches a human readable context to an I/O error.
pub trait IoContext<T> {
  /// Wraps the error into [`Error::Io`].
  ///
  /// # Errors
  ///
  /// Returns [`Error::Io`] carrying `msg` if `self` is an error.
  fn context(self, msg: impl FnOnce() -> String) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
  fn context(self, msg: impl FnOnce() -> String) -> Result<T> {
    self.map_err(|source| Error::Io { msg: msg(), source })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
