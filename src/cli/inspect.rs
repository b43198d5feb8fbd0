// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `verbum inspect`: sizes, checksums and consistency checks for a corpus
//! directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use verbum::binary::{
    decode_u32_le, INFLECTIONS_RAW_FILE, INFLECTION_OFFSETS_FILE, NO_INFLECTION, RAW_TEXT_FILE,
    STATS_FILE, TOKEN_STARTS_FILE,
};
use verbum::InflectionSlot;

use super::display::{format_size, pad_left, row, section_bot, section_top, status};

const ARTIFACTS: [&str; 5] = [
    RAW_TEXT_FILE,
    TOKEN_STARTS_FILE,
    INFLECTIONS_RAW_FILE,
    INFLECTION_OFFSETS_FILE,
    STATS_FILE,
];

pub struct ArtifactInfo {
    pub name: &'static str,
    pub bytes: usize,
    pub crc32: u32,
}

pub struct InspectReport {
    pub artifacts: Vec<ArtifactInfo>,
    pub num_tokens: usize,
    /// `(check, passed)` in display order.
    pub checks: Vec<(String, bool)>,
    pub stats: Value,
}

impl InspectReport {
    pub fn is_consistent(&self) -> bool {
        self.checks.iter().all(|(_, ok)| *ok)
    }
}

pub fn check_artifacts(dir: &Path) -> Result<InspectReport> {
    let mut contents = Vec::with_capacity(ARTIFACTS.len());
    for name in ARTIFACTS {
        let path = dir.join(name);
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        contents.push((name, bytes));
    }
    let artifacts = contents
        .iter()
        .map(|&(name, ref bytes)| ArtifactInfo {
            name,
            bytes: bytes.len(),
            crc32: crc32fast::hash(bytes),
        })
        .collect();

    let read = |name| artifact_bytes(&contents, name);
    let raw_text = std::str::from_utf8(read(RAW_TEXT_FILE)).context("Raw text is not UTF-8")?;
    let starts = decode_u32_le(read(TOKEN_STARTS_FILE))?;
    let raw = decode_u32_le(read(INFLECTIONS_RAW_FILE))?;
    let offsets = decode_u32_le(read(INFLECTION_OFFSETS_FILE))?;
    let stats: Value = serde_json::from_slice(read(STATS_FILE))?;

    let num_tokens = starts.len() / 2;
    let mut checks = Vec::new();
    checks.push(("token starts come in pairs".to_string(), starts.len() % 2 == 0));
    checks.push((
        "token starts ascend within raw text".to_string(),
        starts.windows(2).all(|w| w[0] <= w[1])
            && starts.last().map_or(true, |&last| last as usize <= raw_text.len()),
    ));
    checks.push((
        "one inflection entry per token".to_string(),
        offsets.len() == num_tokens,
    ));
    checks.push((
        "inflection word 0 is reserved".to_string(),
        raw.first() == Some(&NO_INFLECTION),
    ));
    checks.push((
        "inflection entries stay inside buffer".to_string(),
        offsets.iter().all(|&entry| {
            let slot = InflectionSlot::unpack(entry);
            (slot.offset + slot.len) as usize <= raw.len()
        }),
    ));
    checks.push((
        "stats agree on token count".to_string(),
        stats.get("numTokens").and_then(Value::as_u64) == Some(num_tokens as u64),
    ));

    Ok(InspectReport {
        artifacts,
        num_tokens,
        checks,
        stats,
    })
}

fn artifact_bytes<'a>(contents: &'a [(&str, Vec<u8>)], name: &str) -> &'a [u8] {
    contents
        .iter()
        .find(|(artifact, _)| *artifact == name)
        .map_or(&[][..], |(_, bytes)| bytes.as_slice())
}

pub fn run_inspect(dir: &str) -> Result<()> {
    let report = check_artifacts(Path::new(dir))?;

    section_top("ARTIFACTS");
    for artifact in &report.artifacts {
        row(&format!(
            " {:<32}{}   crc32 {:08x}",
            artifact.name,
            pad_left(&format_size(artifact.bytes), 10),
            artifact.crc32
        ));
    }
    section_bot();

    section_top("CORPUS");
    row(&format!(" tokens        {}", report.num_tokens));
    if let Some(stats) = report.stats.get("stats") {
        for key in ["totalWorks", "uniqueWords", "uniqueLemmata"] {
            let value = stats.get(key).and_then(Value::as_u64).unwrap_or(0);
            row(&format!(" {:<14}{}", key, value));
        }
    }
    section_bot();

    section_top("CHECKS");
    for (check, ok) in &report.checks {
        row(&format!(" {} {}", status(*ok), check));
    }
    section_bot();

    if !report.is_consistent() {
        anyhow::bail!("{} is inconsistent", dir);
    }
    Ok(())
}
