//! Customer name helpers shared by every resolution stage.

/// Character an upstream marketplace substitutes for hidden name characters.
pub const MASK_CHAR: char = '*';

/// Case-folds and trims a name for comparison.
pub fn fold_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Returns true if the name contains at least one mask character.
pub fn is_redacted(name: &str) -> bool {
    name.contains(MASK_CHAR)
}

/// Returns true for empty or whitespace-only names.
pub fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}
