//! Filename sanitization.

/// Longest name, in characters, a sanitized filename may have.
pub const MAX_FILENAME_LEN: usize = 255;

const ILLEGAL: &[char] = &['/', '?', '<', '>', '\\', ':', '*', '|', '"'];

fn is_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{1f}' | '\u{80}'..='\u{9f}')
}

/// `CON`, `PRN`, `AUX`, `NUL`, `COM0`-`COM9`, `LPT0`-`LPT9`, with or
/// without an extension.
fn is_windows_reserved(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or_default().to_ascii_lowercase();
    match stem.as_str() {
        "con" | "prn" | "aux" | "nul" => true,
        _ => {
            stem.len() == 4
                && (stem.starts_with("com") || stem.starts_with("lpt"))
                && stem.ends_with(|c: char| c.is_ascii_digit())
        }
    }
}

/// Collapse runs of `-` into one and strip dashes at both ends.
fn tidy_dashes(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('-').to_owned()
}

/// Replace every run of two or more whitespace characters with one space.
fn collapse_whitespace(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut run = String::new();
    for c in name.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.chars().count() >= 2 {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

/// Turn arbitrary text into a name that is safe on every major platform.
///
/// Steps, in order:
///
/// 1. remove `/ ? < > \ : * | "` and control characters
/// 2. drop names made only of dots and reserved Windows device names
///    (`CON`, `nul.txt`, `LPT1`, ...)
/// 3. trim, collapse dash runs, strip leading and trailing dashes
/// 4. collapse whitespace runs to a single space
/// 5. truncate to [`MAX_FILENAME_LEN`] characters and trim again
///
/// An empty result means nothing usable was left.
///
/// ```
/// use fskit::sanitize_filename;
///
/// assert_eq!(sanitize_filename("re: <draft>?.txt"), "re draft.txt");
/// assert_eq!(sanitize_filename("--my---file--"), "my-file");
/// assert_eq!(sanitize_filename("COM1.log"), "");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !ILLEGAL.contains(c) && !is_control(*c))
        .collect();
    if cleaned.chars().all(|c| c == '.') || is_windows_reserved(&cleaned) {
        return String::new();
    }

    let cleaned = collapse_whitespace(&tidy_dashes(cleaned.trim()));
    let truncated: String = cleaned.chars().take(MAX_FILENAME_LEN).collect();
    truncated.trim().to_owned()
}
