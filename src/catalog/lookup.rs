//! Case-insensitive lookup from external keys (names, titles, mobiles) to ids.
//!
//! External callers address entities by text. The text is folded once, here,
//! and everything past this boundary works with ids.

use std::collections::HashMap;

/// Normalizes an external key so that lookups ignore letter case.
///
/// Folding is per char, with simple (one char to one char) case mappings:
/// each char is uppercased then lowercased, so `ı`, `I` and `i` all meet,
/// as do `ſ` and `s`. Multi-char expansions such as `ß` to `SS` are not
/// applied and the char is kept as is.
pub fn fold_key(key: &str) -> String {
    key.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    let upper = single_char(c.to_uppercase()).unwrap_or(c);
    // `İ` is the only char with a multi-char lowercase, its simple mapping
    // is the leading `i`.
    upper.to_lowercase().next().unwrap_or(upper)
}

fn single_char(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    let first = mapped.next()?;
    mapped.next().is_none().then_some(first)
}

/// Maps folded keys to the first id registered under them.
#[derive(Debug, Clone)]
pub struct NameIndex<Id> {
    entries: HashMap<String, Id>,
}

impl<Id: Copy> NameIndex<Id> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers `id` under `key`. Returns false if the key was already
    /// taken, in which case the earlier id keeps winning lookups.
    pub fn insert(&mut self, key: &str, id: Id) -> bool {
        let mut inserted = false;
        self.entries.entry(fold_key(key)).or_insert_with(|| {
            inserted = true;
            id
        });
        inserted
    }

    pub fn get(&self, key: &str) -> Option<Id> {
        self.entries.get(&fold_key(key)).copied()
    }

}

impl<Id: Copy> Default for NameIndex<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let mut index = NameIndex::new();
        index.insert("Come Together", 1usize);

        assert_eq!(index.get("come together"), Some(1));
        assert_eq!(index.get("COME TOGETHER"), Some(1));
        assert_eq!(index.get("Come Together "), None);
    }

    #[test]
    fn first_registration_wins() {
        let mut index = NameIndex::new();
        assert!(index.insert("Abbey Road", 1usize));
        assert!(!index.insert("ABBEY ROAD", 2usize));

        assert_eq!(index.get("abbey road"), Some(1));
        assert_eq!(index.get("Abbey Road"), Some(1));
    }

    #[test]
    fn folds_non_ascii_letters() {
        let mut index = NameIndex::new();
        index.insert("Sigur Rós", 4usize);
        assert_eq!(index.get("SIGUR RÓS"), Some(4));
    }

    #[test]
    fn folds_dotted_and_dotless_i() {
        assert_eq!(fold_key("İstanbul"), fold_key("istanbul"));
        assert_eq!(fold_key("ISTANBUL"), fold_key("istanbul"));
        assert_eq!(fold_key("Iris"), fold_key("ırıs"));
        assert_eq!(fold_key("ſong"), fold_key("SONG"));

        let mut index = NameIndex::new();
        index.insert("İstanbul", 1usize);
        index.insert("Iris", 2usize);
        assert_eq!(index.get("istanbul"), Some(1));
        assert_eq!(index.get("ırıs"), Some(2));
        assert_eq!(index.get("IRIS"), Some(2));
    }

    #[test]
    fn keeps_chars_without_simple_mapping() {
        assert_eq!(fold_key("Straße"), "straße");
        assert_ne!(fold_key("STRASSE"), fold_key("Straße"));
    }

    #[test]
    fn empty_index_finds_nothing() {
        let index: NameIndex<usize> = NameIndex::default();
        assert_eq!(index.get("anything"), None);
        assert_eq!(index.get(""), None);
    }
}
