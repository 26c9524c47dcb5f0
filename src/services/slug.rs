use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::upload::Upload;

static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());
static UNWANTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^-\w]+").unwrap());
static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// Normalize arbitrary text into a lowercase, hyphen-delimited, ASCII-safe
/// name. Degenerate inputs (empty, pure punctuation) fall back to `"n-a"`,
/// so every input yields a usable name.
pub fn slugify(text: &str) -> String {
    // Separator runs become hyphens before transliteration, so symbols and
    // emoji never contribute transliterated words to the slug.
    let text = SEPARATOR_RUNS.replace_all(text, "-");
    let text = deunicode(&text);
    let text = UNWANTED.replace_all(&text, "");
    let text = text.trim_matches('-');
    let text = HYPHEN_RUNS.replace_all(text, "-");
    let text = text.to_lowercase();

    if text.is_empty() {
        return "n-a".to_string();
    }

    text
}

/// Slugified base name joined with the extension. The extension is appended
/// verbatim.
pub fn slug_file_name(base: &str, extension: &str) -> String {
    format!("{}.{}", slugify(base), extension)
}

/// Final file name for an upload: the explicit name if given, otherwise the
/// upload's original name with its extension suffix stripped. Slugged unless
/// `should_slug` is false, in which case the name passes through untouched.
pub fn resolve_file_name(
    upload: &dyn Upload,
    explicit_name: Option<&str>,
    should_slug: bool,
) -> String {
    let extension = upload.extension();
    let base = match explicit_name {
        Some(name) => name.to_string(),
        None => {
            let original = upload.original_name();
            original
                .strip_suffix(&format!(".{}", extension))
                .unwrap_or(original)
                .to_string()
        }
    };

    if should_slug {
        return slug_file_name(&base, extension);
    }

    format!("{}.{}", base, extension)
}

pub fn validate_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > 200 {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
