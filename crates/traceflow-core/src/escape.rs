//! Markup escaping and identifier sanitization.
//!
//! Every piece of user-supplied text that ends up in rendered markup passes
//! through one of these functions exactly once. Text content and attribute
//! values use different escape sets; identifiers that become part of a
//! generated element `id` are reduced to `[A-Za-z0-9_-]`.

use std::borrow::Cow;

/// Escapes text for use as element content.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with character references.
///
/// # Examples
///
/// ```
/// # use traceflow_core::escape::escape_text;
/// assert_eq!(escape_text("a < b && c"), "a &lt; b &amp;&amp; c");
/// assert_eq!(escape_text("plain"), "plain");
/// ```
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape_with(input, false)
}

/// Escapes text for use inside a double- or single-quoted attribute value.
///
/// Same as [`escape_text`], plus carriage return, line feed and tab are
/// replaced with numeric references so they survive attribute normalization.
pub fn escape_attr(input: &str) -> Cow<'_, str> {
    escape_with(input, true)
}

fn escape_with(input: &str, attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| match c {
        '&' | '<' | '>' | '"' | '\'' => true,
        '\r' | '\n' | '\t' => attribute,
        _ => false,
    };

    let Some(first) = input.find(needs_escape) else {
        return Cow::Borrowed(input);
    };

    let mut escaped = String::with_capacity(input.len() + 16);
    escaped.push_str(&input[..first]);
    for c in input[first..].chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '\r' if attribute => escaped.push_str("&#xD;"),
            '\n' if attribute => escaped.push_str("&#xA;"),
            '\t' if attribute => escaped.push_str("&#x9;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Reduces an identifier to characters that are safe inside an element id.
///
/// Every character outside `[A-Za-z0-9_-]` becomes `_`. Applying it twice
/// gives the same result as applying it once.
///
/// ```
/// # use traceflow_core::escape::sanitize_id;
/// assert_eq!(sanitize_id("node one"), "node_one");
/// assert_eq!(sanitize_id("ok-id_1"), "ok-id_1");
/// ```
pub fn sanitize_id(input: &str) -> Cow<'_, str> {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
    if input.chars().all(is_safe) {
        return Cow::Borrowed(input);
    }
    Cow::Owned(
        input
            .chars()
            .map(|c| if is_safe(c) { c } else { '_' })
            .collect(),
    )
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn escaped_text_has_no_raw_markup(input in any::<String>()) {
            let escaped = escape_text(&input);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
            prop_assert!(!escaped.contains('\''));
        }

        #[test]
        fn escaped_attr_has_no_raw_whitespace_controls(input in any::<String>()) {
            let escaped = escape_attr(&input);
            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains('\r'));
            prop_assert!(!escaped.contains('\t'));
            prop_assert!(!escaped.contains('<'));
        }

        #[test]
        fn sanitized_ids_are_safe(input in any::<String>()) {
            let sanitized = sanitize_id(&input);
            prop_assert!(sanitized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
            prop_assert_eq!(sanitized.chars().count(), input.chars().count());
        }

        #[test]
        fn sanitize_is_idempotent(input in any::<String>()) {
            let once = sanitize_id(&input).into_owned();
            let twice = sanitize_id(&once).into_owned();
            prop_assert_eq!(once, twice);
        }
    }
}
