// Copyright (c) 2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use std::io::Read;
use std::path::PathBuf;

use crate::decoder::YuvReader;
use crate::error::{Error, Result};
use crate::frame::{Frame, FrameGeometry};
use crate::metrics::{FramePsnr, PsnrAccumulator, PsnrSummary};
use crate::pixel::{BitDepth, SampleScale};

/// Parameters of one file-to-file comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
  /// Reference video.
  pub original: PathBuf,
  /// Video to score against the reference.
  pub encoded: PathBuf,
  /// Luma size shared by both videos.
  pub geometry: FrameGeometry,
  /// Number of frames to compare. `None` compares until one of the videos
  /// ends.
  pub frames: Option<usize>,
  pub original_depth: BitDepth,
  pub encoded_depth: BitDepth,
  /// Overrides the peak sample value derived from the bit depths.
  pub peak: Option<f64>,
}

impl CompareConfig {
  /// Compares every frame of two 8-bit videos.
  pub fn new(
    original: impl Into<PathBuf>, encoded: impl Into<PathBuf>,
    geometry: FrameGeometry,
  ) -> Self {
    CompareConfig {
      original: original.into(),
      encoded: encoded.into(),
      geometry,
      frames: None,
      original_depth: BitDepth::Eight,
      encoded_depth: BitDepth::Eight,
      peak: None,
    }
  }

  /// Scale both videos are normalized onto.
  pub const fn scale(&self) -> SampleScale {
    SampleScale::common(self.original_depth, self.encoded_depth)
  }

  /// Peak sample value used for every PSNR of the run.
  pub fn peak(&self) -> f64 {
    self.peak.unwrap_or_else(|| self.scale().peak())
  }
}

/// Opens both videos, compares them and returns the averaged scores.
///
/// # Errors
///
/// - Returns [`Error::Io`] if a video cannot be opened or read.
/// - Returns [`Error::EndOfStream`] if a video holds fewer frames than
///   requested, or ends in the middle of a frame.
/// - Returns [`Error::InvalidPeak`] for an unusable peak override.
/// - Returns [`Error::NoFrames`] if there was nothing to compare.
pub fn calculate_psnr(cfg: &CompareConfig) -> Result<PsnrSummary> {
  calculate_psnr_with(cfg, |_, _| {})
}

/// Same as [`calculate_psnr`], calling `on_frame` with the metrics of every
/// frame pair as it is compared.
///
/// # Errors
///
/// See [`calculate_psnr`].
pub fn calculate_psnr_with<F>(
  cfg: &CompareConfig, on_frame: F,
) -> Result<PsnrSummary>
where
  F: FnMut(usize, &FramePsnr),
{
  let scale = cfg.scale();
  let mut original =
    YuvReader::open(&cfg.original, cfg.geometry, cfg.original_depth)?
      .normalized_to(scale);
  let mut encoded =
    match YuvReader::open(&cfg.encoded, cfg.geometry, cfg.encoded_depth) {
      Ok(reader) => reader.normalized_to(scale),
      Err(e) => {
        original.close();
        return Err(e);
      }
    };

  compare(&mut original, &mut encoded, cfg.frames, cfg.peak(), on_frame)
}

/// Compares two open videos frame by frame.
///
/// Both readers are closed when this returns, whether it succeeds or not.
/// The readers must already be normalized onto the same scale.
///
/// # Errors
///
/// - Returns [`Error::ShapeMismatch`] if the readers disagree on geometry.
/// - Otherwise as [`calculate_psnr`].
pub fn compare<A, B, F>(
  original: &mut YuvReader<A>, encoded: &mut YuvReader<B>,
  frames: Option<usize>, peak: f64, on_frame: F,
) -> Result<PsnrSummary>
where
  A: Read + Send,
  B: Read + Send,
  F: FnMut(usize, &FramePsnr),
{
  let result = compare_frames(original, encoded, frames, peak, on_frame);
  original.close();
  encoded.close();
  result
}

fn compare_frames<A, B, F>(
  original: &mut YuvReader<A>, encoded: &mut YuvReader<B>,
  frames: Option<usize>, peak: f64, mut on_frame: F,
) -> Result<PsnrSummary>
where
  A: Read + Send,
  B: Read + Send,
  F: FnMut(usize, &FramePsnr),
{
  let (g1, g2) = (original.geometry(), encoded.geometry());
  if g1 != g2 {
    return Err(Error::ShapeMismatch {
      left: (g1.width(), g1.height()),
      right: (g2.width(), g2.height()),
    });
  }

  let mut acc = PsnrAccumulator::new(peak)?;
  debug!(
    "comparing {} ({}-bit) against {} ({}-bit), {}, peak {}",
    original.name(),
    original.bit_depth(),
    encoded.name(),
    encoded.bit_depth(),
    g1,
    peak
  );

  let mut index = 0;
  while frames.map_or(true, |n| index < n) {
    let (original_frame, encoded_frame) = match read_pair(original, encoded) {
      (Ok(a), Ok(b)) => (a, b),
      (a, b) => {
        // Without a frame count, running out of data between two frames
        // ends the comparison.
        let failure = [a.err(), b.err()]
          .into_iter()
          .flatten()
          .find(|e| frames.is_some() || !e.is_clean_eof());
        match failure {
          Some(e) => return Err(e),
          None => break,
        }
      }
    };

    let metrics = acc.add_frame(&original_frame, &encoded_frame)?;
    trace!("frame {}: {}", index, metrics.psnr);
    on_frame(index, &metrics);
    index += 1;
  }

  acc.summary()
}

cfg_if::cfg_if! {
  if #[cfg(feature = "threading")] {
    /// Pulls the next frame from both readers. The two reads touch
    /// disjoint sources and run concurrently.
    fn read_pair<A, B>(
      original: &mut YuvReader<A>, encoded: &mut YuvReader<B>,
    ) -> (Result<Frame>, Result<Frame>)
    where
      A: Read + Send,
      B: Read + Send,
    {
      rayon::join(|| original.read_frame(), || encoded.read_frame())
    }
  } else {
    /// Pulls the next frame from both readers.
    fn read_pair<A, B>(
      original: &mut YuvReader<A>, encoded: &mut YuvReader<B>,
    ) -> (Result<Frame>, Result<Frame>)
    where
      A: Read + Send,
      B: Read + Send,
    {
      (original.read_frame(), encoded.read_frame())
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::decoder::test::raw_frames;
  use crate::metrics::psnr_from_mse;
  use rand::distributions::Alphanumeric;
  use rand::{thread_rng, Rng};
  use std::env::temp_dir;
  use std::fs;
  use std::io::Cursor;

  fn geometry4x4() -> FrameGeometry {
    FrameGeometry::new(4, 4).unwrap()
  }

  fn reader(
    name: &str, frames: &[Frame], depth: BitDepth, scale: SampleScale,
  ) -> YuvReader<Cursor<Vec<u8>>> {
    let data = raw_frames(frames, depth);
    YuvReader::from_reader(name, Cursor::new(data), geometry4x4(), depth)
      .normalized_to(scale)
  }

  fn get_tempfile_path(extension: &str) -> PathBuf {
    let mut path = temp_dir();
    let filename =
      thread_rng().sample_iter(&Alphanumeric).take(12).map(char::from);
    path.push(format!("{}.{}", filename.collect::<String>(), extension));
    path
  }

  #[test]
  fn constant_offset_end_to_end() {
    let g = geometry4x4();
    let original =
      [Frame::filled(g, 16, 128, 128), Frame::filled(g, 80, 90, 100)];
    let encoded =
      [Frame::filled(g, 26, 138, 138), Frame::filled(g, 70, 80, 90)];
    let scale = SampleScale::Eight;

    let mut a = reader("orig", &original, BitDepth::Eight, scale);
    let mut b = reader("enc", &encoded, BitDepth::Eight, scale);
    let mut per_frame = Vec::new();
    let summary = compare(&mut a, &mut b, Some(2), scale.peak(), |i, m| {
      per_frame.push((i, *m))
    })
    .unwrap();

    assert_eq!(per_frame.len(), 2);
    for (i, (index, m)) in per_frame.iter().enumerate() {
      assert_eq!(i, *index);
      assert_eq!((m.mse.y, m.mse.u, m.mse.v), (100.0, 100.0, 100.0));
    }
    assert_eq!(summary.frames, 2);
    for value in [summary.y(), summary.u(), summary.v(), summary.yuv()] {
      assert_eq!(format!("{value:.4}"), "28.1308");
    }
    assert!(a.is_closed() && b.is_closed());
  }

  #[test]
  fn normalized_mixed_depths_match_exactly() {
    let g = geometry4x4();
    let scale = SampleScale::common(BitDepth::Eight, BitDepth::Ten);

    let mut a = reader(
      "orig",
      &[Frame::filled(g, 255, 255, 255)],
      BitDepth::Eight,
      scale,
    );
    let mut b = reader(
      "enc",
      &[Frame::filled(g, 1020, 1020, 1020)],
      BitDepth::Ten,
      scale,
    );
    let mut mse = None;
    let summary =
      compare(&mut a, &mut b, Some(1), scale.peak(), |_, m| mse = Some(m.mse))
        .unwrap();

    let mse = mse.unwrap();
    assert_eq!((mse.y, mse.u, mse.v, mse.weighted_avg), (0.0, 0.0, 0.0, 0.0));
    assert_eq!(summary.y(), f64::INFINITY);
    assert_eq!(summary.yuv(), f64::INFINITY);
  }

  #[test]
  fn mixed_depths_use_1020_peak() {
    let g = geometry4x4();
    let scale = SampleScale::common(BitDepth::Ten, BitDepth::Eight);

    // 100 << 2 = 400, off by 4 from 404.
    let mut a = reader(
      "orig",
      &[Frame::filled(g, 404, 404, 404)],
      BitDepth::Ten,
      scale,
    );
    let mut b = reader(
      "enc",
      &[Frame::filled(g, 100, 100, 100)],
      BitDepth::Eight,
      scale,
    );
    let summary = compare(&mut a, &mut b, Some(1), scale.peak(), |_, _| {})
      .unwrap();

    let expected = 10.0 * (1020.0f64 * 1020.0 / 16.0).log10();
    assert!((summary.yuv() - expected).abs() < 1e-9);
    assert!((summary.y() - expected).abs() < 1e-9);
  }

  #[test]
  fn too_many_frames_is_end_of_stream() {
    let g = geometry4x4();
    let frames = [Frame::filled(g, 1, 2, 3), Frame::filled(g, 4, 5, 6)];
    let scale = SampleScale::Eight;

    let mut a = reader("orig", &frames, BitDepth::Eight, scale);
    let mut b = reader("enc", &frames, BitDepth::Eight, scale);
    let result = compare(&mut a, &mut b, Some(3), scale.peak(), |_, _| {});

    assert!(matches!(result, Err(Error::EndOfStream { frame: 2, .. })));
    assert!(a.is_closed() && b.is_closed());
  }

  #[test]
  fn shorter_encoded_stream_is_fatal_with_frame_count() {
    let g = geometry4x4();
    let frames = [Frame::filled(g, 1, 2, 3), Frame::filled(g, 4, 5, 6)];
    let scale = SampleScale::Eight;

    let mut a = reader("orig", &frames, BitDepth::Eight, scale);
    let mut b = reader("enc", &frames[..1], BitDepth::Eight, scale);
    let result = compare(&mut a, &mut b, Some(2), scale.peak(), |_, _| {});

    match result {
      Err(Error::EndOfStream { stream, frame, .. }) => {
        assert_eq!(stream, "enc");
        assert_eq!(frame, 1);
      }
      other => panic!("unexpected result {other:?}"),
    }
  }

  #[test]
  fn without_frame_count_compares_until_shorter_stream_ends() {
    let g = geometry4x4();
    let frames: Vec<Frame> =
      (0..3).map(|i| Frame::filled(g, i * 10, i, i)).collect();
    let scale = SampleScale::Eight;

    let mut a = reader("orig", &frames, BitDepth::Eight, scale);
    let mut b = reader("enc", &frames[..2], BitDepth::Eight, scale);
    let summary =
      compare(&mut a, &mut b, None, scale.peak(), |_, _| {}).unwrap();

    assert_eq!(summary.frames, 2);
  }

  #[test]
  fn without_frame_count_truncated_frame_is_fatal() {
    let g = geometry4x4();
    let frames = [Frame::filled(g, 1, 2, 3)];
    let mut data = raw_frames(&frames, BitDepth::Eight);
    data.extend_from_slice(&[0; 5]);

    let mut a =
      YuvReader::from_reader("orig", Cursor::new(data), g, BitDepth::Eight);
    let mut b = reader(
      "enc",
      &[frames[0].clone(), frames[0].clone()],
      BitDepth::Eight,
      SampleScale::Eight,
    );
    let result = compare(&mut a, &mut b, None, 255.0, |_, _| {});

    assert!(matches!(
      result,
      Err(Error::EndOfStream { frame: 1, read: 5, .. })
    ));
  }

  #[test]
  fn empty_streams_have_no_frames() {
    let scale = SampleScale::Eight;
    let mut a = reader("orig", &[], BitDepth::Eight, scale);
    let mut b = reader("enc", &[], BitDepth::Eight, scale);

    let result = compare(&mut a, &mut b, None, 255.0, |_, _| {});

    assert!(matches!(result, Err(Error::NoFrames)));
  }

  #[test]
  fn geometry_mismatch_is_rejected() {
    let g = geometry4x4();
    let other = FrameGeometry::new(8, 4).unwrap();
    let mut a =
      reader("orig", &[Frame::new(g)], BitDepth::Eight, SampleScale::Eight);
    let mut b = YuvReader::from_reader(
      "enc",
      Cursor::new(raw_frames(&[Frame::new(other)], BitDepth::Eight)),
      other,
      BitDepth::Eight,
    );

    let result = compare(&mut a, &mut b, Some(1), 255.0, |_, _| {});

    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    assert!(a.is_closed() && b.is_closed());
  }

  #[test]
  fn invalid_peak_still_closes_streams() {
    let scale = SampleScale::Eight;
    let mut a = reader("orig", &[], BitDepth::Eight, scale);
    let mut b = reader("enc", &[], BitDepth::Eight, scale);

    let result = compare(&mut a, &mut b, Some(1), 0.0, |_, _| {});

    assert!(matches!(result, Err(Error::InvalidPeak(_))));
    assert!(a.is_closed() && b.is_closed());
  }

  #[test]
  fn config_peak() {
    let g = geometry4x4();
    let mut cfg = CompareConfig::new("a.yuv", "b.yuv", g);
    assert_eq!(cfg.peak(), 255.0);

    cfg.encoded_depth = BitDepth::Ten;
    assert_eq!(cfg.scale(), SampleScale::Ten);
    assert_eq!(cfg.peak(), 1020.0);

    cfg.peak = Some(1023.0);
    assert_eq!(cfg.peak(), 1023.0);
  }

  #[test]
  fn calculate_psnr_from_files() {
    let g = geometry4x4();
    let original_path = get_tempfile_path("yuv");
    let encoded_path = get_tempfile_path("yuv");
    let original = [Frame::filled(g, 100, 100, 100)];
    let encoded = [Frame::filled(g, 400, 440, 400)];
    fs::write(&original_path, raw_frames(&original, BitDepth::Eight))
      .unwrap();
    fs::write(&encoded_path, raw_frames(&encoded, BitDepth::Ten)).unwrap();

    let mut cfg = CompareConfig::new(&original_path, &encoded_path, g);
    cfg.encoded_depth = BitDepth::Ten;
    cfg.frames = Some(1);
    let summary = calculate_psnr(&cfg).unwrap();

    assert_eq!(summary.y(), f64::INFINITY);
    assert!(summary.u().is_finite());
    assert_eq!(summary.v(), f64::INFINITY);
    let expected = 10.0 * (1020.0f64 * 1020.0 / (1600.0 / 6.0)).log10();
    assert!((summary.yuv() - expected).abs() < 1e-9);

    cfg.frames = Some(2);
    assert!(matches!(
      calculate_psnr(&cfg),
      Err(Error::EndOfStream { frame: 1, read: 0, .. })
    ));

    fs::remove_file(&original_path).unwrap();
    fs::remove_file(&encoded_path).unwrap();
  }

  #[test]
  fn calculate_psnr_with_reports_every_frame() {
    let g = geometry4x4();
    let original_path = get_tempfile_path("yuv");
    let encoded_path = get_tempfile_path("yuv");
    let original = vec![Frame::filled(g, 50, 50, 50); 3];
    let encoded = [
      Frame::filled(g, 51, 50, 50),
      Frame::filled(g, 52, 50, 50),
      Frame::filled(g, 54, 50, 50),
    ];
    fs::write(&original_path, raw_frames(&original, BitDepth::Eight))
      .unwrap();
    fs::write(&encoded_path, raw_frames(&encoded, BitDepth::Eight)).unwrap();

    let cfg = CompareConfig::new(&original_path, &encoded_path, g);
    let mut seen = Vec::new();
    let summary =
      calculate_psnr_with(&cfg, |i, m| seen.push((i, m.mse.y))).unwrap();

    assert_eq!(seen, vec![(0, 1.0), (1, 4.0), (2, 16.0)]);
    assert_eq!(summary.frames, 3);
    let expected_y = [1.0, 4.0, 16.0]
      .iter()
      .map(|&mse| psnr_from_mse(mse, 255.0))
      .sum::<f64>()
      / 3.0;
    assert!((summary.y() - expected_y).abs() < 1e-9);

    fs::remove_file(&original_path).unwrap();
    fs::remove_file(&encoded_path).unwrap();
  }

  #[test]
  fn calculate_psnr_missing_file() {
    let cfg = CompareConfig::new(
      get_tempfile_path("yuv"),
      get_tempfile_path("yuv"),
      geometry4x4(),
    );

    assert!(matches!(calculate_psnr(&cfg), Err(Error::Io { .. })));
  }
}
