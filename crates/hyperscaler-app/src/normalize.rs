// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use unicode_normalization::UnicodeNormalization;

const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Lower-cases, decomposes (NFD) and drops combining diacritical marks, so
/// "Café" and "cafe" compare equal.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect()
}

/// Absent input normalizes to the empty string.
pub fn normalize_opt(input: Option<&str>) -> String {
    input.map(normalize).unwrap_or_default()
}
