use std::path::Path;

const ELLIPSIS: &str = "...";

/// Build the display title for a track: the file name without its extension,
/// shortened to at most `max_chars` characters (ellipsis included).
pub fn display_title(path: &Path, max_chars: usize) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    if stem.chars().count() <= max_chars {
        return stem;
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut title: String = stem.chars().take(keep).collect();
    title.push_str(ELLIPSIS);
    title
}
