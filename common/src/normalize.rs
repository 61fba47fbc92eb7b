//! Company name normalization for the name join.

/// Canonical form of a company name.
///
/// Lower-cases and trims, then removes one trailing `" ltd"` or, failing that,
/// `" limited"`, and trims again. Anything that is not text maps to `""`.
pub fn normalize_name(name: Option<&str>) -> String {
    let Some(name) = name else {
        return String::new();
    };

    let lowered = name.to_lowercase();
    let trimmed = lowered.trim();
    let stripped = trimmed
        .strip_suffix(" ltd")
        .or_else(|| trimmed.strip_suffix(" limited"))
        .unwrap_or(trimmed);

    stripped.trim().to_string()
}
