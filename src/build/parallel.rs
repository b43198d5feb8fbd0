// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel work loading and posting list packing.
//!
//! Two parts of a build are embarrassingly parallel: parsing work JSON files
//! and packing the accumulated posting lists. The token pass in between must
//! stay sequential because token indices are assigned in manifest order.
//! Results are always reassembled in input order, so a parallel build is
//! byte-identical to a sequential one.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::CorpusInputWork;
use crate::error::Result;
use crate::packed::PackedIndex;

/// Load works in order. Stops at the first unreadable file.
#[cfg(feature = "parallel")]
pub fn load_works(paths: &[PathBuf]) -> Result<Vec<CorpusInputWork>> {
    paths
        .par_iter()
        .map(|path| CorpusInputWork::from_file(path))
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub fn load_works(paths: &[PathBuf]) -> Result<Vec<CorpusInputWork>> {
    paths
        .iter()
        .map(|path| CorpusInputWork::from_file(path))
        .collect()
}

/// Load works in parallel with progress reporting.
#[cfg(feature = "parallel")]
pub fn load_works_with_progress(
    paths: &[PathBuf],
    progress: &ProgressBar,
) -> Result<Vec<CorpusInputWork>> {
    let counter = AtomicUsize::new(0);
    let total = paths.len();

    paths
        .par_iter()
        .map(|path| {
            let work = CorpusInputWork::from_file(path)?;

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count % 10 == 0 || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }

            Ok(work)
        })
        .collect()
}

/// Pack every posting list of one dimension.
#[cfg(feature = "parallel")]
pub fn pack_postings(
    postings: HashMap<String, Vec<u32>>,
    num_tokens: u32,
    dense_ratio: u32,
) -> BTreeMap<String, PackedIndex> {
    postings
        .into_par_iter()
        .map(|(key, list)| {
            let packed = PackedIndex::from_sorted(&list, num_tokens, dense_ratio);
            (key, packed)
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub fn pack_postings(
    postings: HashMap<String, Vec<u32>>,
    num_tokens: u32,
    dense_ratio: u32,
) -> BTreeMap<String, PackedIndex> {
    postings
        .into_iter()
        .map(|(key, list)| {
            let packed = PackedIndex::from_sorted(&list, num_tokens, dense_ratio);
            (key, packed)
        })
        .collect()
}
