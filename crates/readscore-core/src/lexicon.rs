//! Adjective to antonym lookup table used by antonym substitution.

use std::collections::HashMap;

/// Built-in adjective pairs. Each pair is inserted in both directions, in
/// order, so a word appearing in more than one pair maps to whatever the
/// last pair says (e.g. `light` ends up mapping to `heavy`, not `dark`).
const BUILTIN_PAIRS: &[(&str, &str)] = &[
    ("hot", "cold"),
    ("warm", "cool"),
    ("big", "small"),
    ("large", "tiny"),
    ("tall", "short"),
    ("long", "brief"),
    ("high", "low"),
    ("wide", "narrow"),
    ("thick", "thin"),
    ("deep", "shallow"),
    ("fast", "slow"),
    ("quick", "sluggish"),
    ("early", "late"),
    ("old", "young"),
    ("new", "ancient"),
    ("modern", "outdated"),
    ("good", "bad"),
    ("better", "worse"),
    ("best", "worst"),
    ("happy", "sad"),
    ("rich", "poor"),
    ("cheap", "expensive"),
    ("strong", "weak"),
    ("hard", "soft"),
    ("easy", "difficult"),
    ("simple", "complex"),
    ("true", "false"),
    ("correct", "incorrect"),
    ("possible", "impossible"),
    ("important", "trivial"),
    ("common", "rare"),
    ("public", "private"),
    ("open", "closed"),
    ("full", "empty"),
    ("clean", "dirty"),
    ("wet", "dry"),
    ("safe", "dangerous"),
    ("healthy", "sick"),
    ("alive", "dead"),
    ("loud", "quiet"),
    ("bright", "dim"),
    ("light", "dark"),
    ("heavy", "light"),
    ("beautiful", "ugly"),
    ("friendly", "hostile"),
    ("kind", "cruel"),
    ("polite", "rude"),
    ("brave", "cowardly"),
    ("wise", "foolish"),
    ("successful", "unsuccessful"),
    ("popular", "unpopular"),
    ("natural", "artificial"),
    ("ancient", "recent"),
    ("major", "minor"),
    ("increasing", "decreasing"),
    ("positive", "negative"),
    ("north", "south"),
    ("east", "west"),
    ("first", "last"),
    ("more", "less"),
    ("many", "few"),
    ("always", "never"),
];

/// A lowercase adjective to antonym mapping.
///
/// The table is not required to be symmetric, and inserting an existing key
/// overwrites its previous antonym.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AntonymTable {
    entries: HashMap<String, String>,
}

impl AntonymTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table, with every pair inserted in both directions.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (a, b) in BUILTIN_PAIRS {
            table.insert_pair(a, b);
        }
        table
    }

    /// Build a one-directional table from `(adjective, antonym)` entries.
    pub fn from_entries<I, A, B>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut table = Self::new();
        for (adjective, antonym) in entries {
            table.insert(adjective.as_ref(), antonym.as_ref());
        }
        table
    }

    /// Map `adjective` to `antonym`, replacing any previous entry.
    pub fn insert(&mut self, adjective: &str, antonym: &str) {
        self.entries
            .insert(adjective.trim().to_lowercase(), antonym.trim().to_lowercase());
    }

    /// Insert `a -> b` followed by `b -> a`.
    pub fn insert_pair(&mut self, a: &str, b: &str) {
        self.insert(a, b);
        self.insert(b, a);
    }

    /// Add every entry of `other`, overwriting existing keys.
    pub fn extend(&mut self, other: &AntonymTable) {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }

    /// Look up a word case-insensitively.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
