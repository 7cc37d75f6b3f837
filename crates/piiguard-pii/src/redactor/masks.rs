//! Character-level masking helpers. Lengths are counted in chars, not bytes.

use super::MASK_CHAR;

fn filler(len: usize) -> String {
    std::iter::repeat_n(MASK_CHAR, len).collect()
}

/// Keep `keep_first` leading and `keep_last` trailing chars and mask the middle.
/// Text no longer than the kept edges is masked entirely.
pub fn mask_keep_edges(text: &str, keep_first: usize, keep_last: usize) -> String {
    let len = text.chars().count();
    if len <= keep_first + keep_last {
        return filler(len);
    }

    let mut masked: String = text.chars().take(keep_first).collect();
    masked.push_str(&filler(len - keep_first - keep_last));
    masked.extend(text.chars().skip(len - keep_last));
    masked
}

/// Mask the local part of an `local@domain` handle: two chars survive, or `XX` for short parts
pub fn mask_handle(local: &str) -> String {
    let len = local.chars().count();
    if len > 2 {
        let mut masked: String = local.chars().take(2).collect();
        masked.push_str(&filler(len - 2));
        masked
    } else {
        filler(2)
    }
}

/// First char followed by filler
pub fn mask_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut masked = String::with_capacity(word.len());
            masked.push(first);
            masked.push_str(&filler(chars.count()));
            masked
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keep_edges() {
        assert_eq!(mask_keep_edges("P1234567", 1, 2), "PXXXXX67");
        assert_eq!(mask_keep_edges("abc", 1, 2), "XXX");
        assert_eq!(mask_keep_edges("ab", 1, 2), "XX");
        assert_eq!(mask_keep_edges("abcd", 1, 2), "aXcd");
        assert_eq!(mask_keep_edges("", 1, 1), "");
    }

    #[test]
    fn test_mask_handle() {
        assert_eq!(mask_handle("vidit"), "viXXX");
        assert_eq!(mask_handle("abc"), "abX");
        assert_eq!(mask_handle("ab"), "XX");
        assert_eq!(mask_handle("a"), "XX");
        assert_eq!(mask_handle(""), "XX");
    }

    #[test]
    fn test_mask_word() {
        assert_eq!(mask_word("Vidit"), "VXXXX");
        assert_eq!(mask_word("V"), "V");
        assert_eq!(mask_word(""), "");
        assert_eq!(mask_word("Émile"), "ÉXXXX");
    }
}
