//! Versioned names and statement augmentation

use crate::shared::constants::naming::VERSION_SEPARATOR;

/// `a` at version 3 → `a_3`
pub fn versioned_name(base: &str, version: u32) -> String {
    format!("{}{}{}", base, VERSION_SEPARATOR, version)
}

/// Rewrite every whole-identifier occurrence of `base` in `text` to
/// `replacement`.
///
/// `a[i] = aa[i]` with base `a` becomes `a_2[i] = aa[i]`: occurrences that
/// are part of a longer identifier are left alone.
pub fn augment_statement(text: &str, base: &str, replacement: &str) -> String {
    if base.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + replacement.len());
    let mut rest = text;
    let mut prev: Option<char> = None;

    while let Some(pos) = rest.find(base) {
        let before = rest[..pos].chars().next_back().or(prev);
        let after = rest[pos + base.len()..].chars().next();
        let bounded = !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char);

        out.push_str(&rest[..pos]);
        if bounded {
            out.push_str(replacement);
        } else {
            out.push_str(base);
        }
        prev = base.chars().next_back();
        rest = &rest[pos + base.len()..];
    }
    out.push_str(rest);
    out
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_name() {
        assert_eq!(versioned_name("a", 0), "a_0");
        assert_eq!(versioned_name("buf", 12), "buf_12");
    }

    #[test]
    fn test_augment_whole_identifier_only() {
        assert_eq!(augment_statement("a[i] = aa[i]", "a", "a_2"), "a_2[i] = aa[i]");
        assert_eq!(augment_statement("x = data[a]", "a", "a_1"), "x = data[a_1]");
        assert_eq!(augment_statement("b = a", "b", "b_1"), "b_1 = a");
    }

    #[test]
    fn test_augment_repeated_occurrences() {
        assert_eq!(augment_statement("a[a[0]] = 1", "a", "a_1"), "a_1[a_1[0]] = 1");
    }

    #[test]
    fn test_augment_without_occurrence() {
        assert_eq!(augment_statement("i = i + 1", "a", "a_1"), "i = i + 1");
    }
}
