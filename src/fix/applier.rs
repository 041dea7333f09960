use crate::{Error, FixDescription, Result, trace};
use itertools::Itertools;

/// Apply `fixes` to `text` in one pass.
///
/// All ranges refer to `text` as given. Edits are applied rightmost first so
/// that the offsets of edits further left stay valid. Identical edits are
/// applied once and insertions at the same offset keep their list order.
/// Overlapping ranges are rejected with `Error::OverlappingFixes`, ranges
/// outside the text or off a character boundary with `Error::InvalidFix`.
pub fn apply_fixes(text: &str, fixes: &[FixDescription]) -> Result<String> {
    let fixes: Vec<&FixDescription> = fixes.iter().unique().collect();
    for fix in &fixes {
        validate(text, fix)?;
    }
    check_overlaps(&fixes)?;

    let mut out = text.to_string();
    for (_, fix) in fixes
        .iter()
        .enumerate()
        .sorted_by(|(ia, a), (ib, b)| {
            b.start()
                .cmp(&a.start())
                .then(b.end().cmp(&a.end()))
                .then(ib.cmp(ia))
        })
    {
        trace!("Applying fix {}..{} -> {:?}", fix.start(), fix.end(), fix.text);
        out.replace_range(fix.start()..fix.end(), &fix.text);
    }
    Ok(out)
}

fn validate(text: &str, fix: &FixDescription) -> Result {
    let (start, end) = (fix.start(), fix.end());
    let reason = if start > end {
        "start is after end"
    } else if end > text.len() {
        "range is past the end of the text"
    } else if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        "range splits a character"
    } else {
        return Ok(());
    };
    Err(Error::InvalidFix { start, end, reason })
}

/// Two edits overlap when one starts strictly inside the other's range.
/// Insertions at either end of a replacement do not overlap it.
fn check_overlaps(fixes: &[&FixDescription]) -> Result {
    let mut by_start: Vec<&FixDescription> = fixes.to_vec();
    by_start.sort_by_key(|f| (f.start(), f.end()));
    let mut widest: Option<&FixDescription> = None;
    for fix in by_start {
        if let Some(w) = widest {
            if fix.start() < w.end() {
                return Err(Error::OverlappingFixes {
                    first: (w.start(), w.end()),
                    second: (fix.start(), fix.end()),
                });
            }
        }
        if widest.is_none_or(|w| fix.end() > w.end()) {
            widest = Some(fix);
        }
    }
    Ok(())
}
