// Copyright (c) 2017-2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use criterion::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use std::io::Cursor;
use yuvpsnr::prelude::*;

fn raw_input(
  geometry: FrameGeometry, depth: BitDepth, frames: usize,
) -> Vec<u8> {
  let mut ra = ChaChaRng::from_seed([0; 32]);
  (0..geometry.frame_bytes(depth) * frames).map(|_| ra.gen()).collect()
}

fn bench_read(
  c: &mut Criterion, name: &str, depth: BitDepth, scale: SampleScale,
) {
  let geometry = FrameGeometry::new(1920, 1080).unwrap();
  let data = raw_input(geometry, depth, 1);
  c.bench_function(name, move |b| {
    b.iter(|| {
      let mut reader =
        YuvReader::from_reader("bench", Cursor::new(&data), geometry, depth)
          .normalized_to(scale);
      black_box(reader.read_frame().unwrap());
    })
  });
}

pub fn read_frame_8bit(c: &mut Criterion) {
  bench_read(c, "read_frame_8bit", BitDepth::Eight, SampleScale::Eight);
}

pub fn read_frame_8bit_widened(c: &mut Criterion) {
  bench_read(c, "read_frame_8bit_widened", BitDepth::Eight, SampleScale::Ten);
}

pub fn read_frame_10bit(c: &mut Criterion) {
  bench_read(c, "read_frame_10bit", BitDepth::Ten, SampleScale::Ten);
}

criterion_group!(
  plane,
  read_frame_8bit,
  read_frame_8bit_widened,
  read_frame_10bit
);
