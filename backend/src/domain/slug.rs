//! Slug derivation for URL-safe identifiers.
//!
//! Slugs are derived from user-chosen names by an explicit call to
//! [`slugify`] wherever a name is set or changed. Nothing regenerates slugs
//! behind the caller's back; services call this function and store the
//! result alongside the name.

/// Derive a URL-safe slug from a display name.
///
/// Lowercases ASCII alphanumerics and joins every run of other characters
/// with a single hyphen. Leading and trailing separators are dropped, so the
/// result never starts or ends with `-`.
///
/// # Examples
/// ```
/// use backend::domain::slug::slugify;
///
/// assert_eq!(slugify("Go to Borabora for vacay"), "go-to-borabora-for-vacay");
/// assert_eq!(slugify("  spaced  out  "), "spaced-out");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Return `true` when `value` is a well-formed slug: non-empty, trimmed,
/// lowercase ASCII alphanumerics and hyphens only.
#[cfg(test)]
fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Go to Borabora for vacay", "go-to-borabora-for-vacay")]
    #[case("plain", "plain")]
    #[case("Under_scored name", "under-scored-name")]
    #[case("  Trim me  ", "trim-me")]
    #[case("Multiple   spaces", "multiple-spaces")]
    #[case("123 go", "123-go")]
    #[case("", "")]
    fn slugify_cases(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }

    #[rstest]
    #[case("go-to-borabora", true)]
    #[case("a", true)]
    #[case("", false)]
    #[case("-leading", false)]
    #[case("trailing-", false)]
    #[case("Upper", false)]
    #[case("with space", false)]
    fn slug_validity(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(is_valid_slug(value), valid);
    }

    #[rstest]
    fn slugify_output_is_always_valid_or_empty(
        #[values("Weekend Plans", "a_b_c", "!!!", "Go!", "99 balloons")] name: &str,
    ) {
        let slug = slugify(name);
        assert!(slug.is_empty() || is_valid_slug(&slug), "slug: {slug:?}");
    }
}
