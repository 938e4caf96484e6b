//! Sequence and shot inference
//!
//! Client deliveries rarely follow the pipeline naming, so the values found
//! here are only suggestions that seed the editable records.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separator placed between the sequence and the shot suffix
pub const SHOT_SEPARATOR: &str = "_";

/// Sequence and shot suggested for a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingInfo {
    pub sequence: String,
    pub shot: String,
}

impl NamingInfo {
    fn from_parts(sequence: &str, suffix: &str) -> NamingInfo {
        NamingInfo {
            sequence: sequence.to_string(),
            shot: format!("{sequence}{SHOT_SEPARATOR}{suffix}"),
        }
    }
}

/// Infers the sequence and shot from a filename
///
/// The first run of letters is the sequence. Digits directly after it,
/// optionally behind a single `_`, form the shot suffix, so
/// `shot010_plate.mov` gives `shot` / `shot_010`. Without digits the shot
/// keeps an empty suffix (`reference.jpg` gives `reference_`).
///
/// Only the file stem is read, so extensions never become a sequence. Names
/// without any letters fall back to their first run of word characters, and
/// names without word characters give empty values.
///
/// # Examples
/// ```
/// use client_file_manager::discovery::infer;
///
/// let naming = infer("ABC_0010_v001.exr");
/// assert_eq!(naming.sequence, "ABC");
/// assert_eq!(naming.shot, "ABC_0010");
/// ```
pub fn infer(filename: &str) -> NamingInfo {
    static SEQUENCE_SHOT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(\p{Alphabetic}+)(?:_?(\d+))?")
            .expect("Failed to compile regex pattern for SEQUENCE_SHOT")
    });
    static WORD_RUN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\w+").expect("Failed to compile regex pattern for WORD_RUN"));

    let name = Path::new(filename)
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if let Some(captures) = SEQUENCE_SHOT.captures(name) {
        let sequence = captures.get(1).map_or("", |m| m.as_str());
        let suffix = captures.get(2).map_or("", |m| m.as_str());
        return NamingInfo::from_parts(sequence, suffix);
    }

    match WORD_RUN.find(name) {
        Some(word) => NamingInfo::from_parts(word.as_str(), ""),
        None => NamingInfo::default(),
    }
}
