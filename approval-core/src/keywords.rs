//! Keyword classification of a single comment body.

use crate::error::ClassifyError;
use crate::types::Signal;

/// Comment bodies that count as an approval
pub const APPROVAL_KEYWORDS: &[&str] = &["approved", "approve", "lgtm", "yes"];

/// Comment bodies that count as a denial
pub const DENIAL_KEYWORDS: &[&str] = &["denied", "deny", "no"];

/// Trailing punctuation that may be dropped before matching.
///
/// `?` is never stripped, so "approved?" matches nothing.
const STRIPPABLE_PUNCTUATION: &[char] = &['.', '!'];

/// Lowercase the body and drop at most one trailing `.` or `!`.
fn normalize(text: &str) -> Result<String, ClassifyError> {
    if text.contains('\0') {
        return Err(ClassifyError::NulByte);
    }

    let lowercase = text.to_lowercase();
    let trimmed = match lowercase.strip_suffix(STRIPPABLE_PUNCTUATION) {
        Some(rest) => rest.to_string(),
        None => lowercase,
    };
    Ok(trimmed)
}

fn matches_any(text: &str, keywords: &[&str]) -> Result<bool, ClassifyError> {
    let normalized = normalize(text)?;
    Ok(keywords.contains(&normalized.as_str()))
}

/// Returns true if the whole comment body is an approval keyword.
///
/// Matching is case-insensitive and tolerates a single trailing `.` or `!`.
/// Keywords embedded in a longer sentence do not match.
pub fn is_approved(text: &str) -> Result<bool, ClassifyError> {
    matches_any(text, APPROVAL_KEYWORDS)
}

/// Returns true if the whole comment body is a denial keyword.
///
/// Same matching rules as [`is_approved`].
pub fn is_denied(text: &str) -> Result<bool, ClassifyError> {
    matches_any(text, DENIAL_KEYWORDS)
}

/// Classify a comment body into the signal it carries.
///
/// Bodies matching neither keyword set classify as [`Signal::Pending`].
pub fn classify(text: &str) -> Result<Signal, ClassifyError> {
    if is_approved(text)? {
        Ok(Signal::Approved)
    } else if is_denied(text)? {
        Ok(Signal::Denied)
    } else {
        Ok(Signal::Pending)
    }
}
