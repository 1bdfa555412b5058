// Mount Option Tokens
//
// Splits an fstab option string into its comma separated options and joins
// them back. "defaults" is the canonical form of the empty option list.

use std::fmt;

/// String used in fstab for an entry without explicit options
pub const DEFAULTS: &str = "defaults";

/// One option of an option string: a bare flag or a `key=value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountOptionToken {
    pub key: String,
    /// Everything after the first `=`, which may itself contain `=`
    pub value: Option<String>,
}

impl MountOptionToken {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Split a single option on its first `=`
    pub fn parse(option: &str) -> Self {
        match option.split_once('=') {
            Some((key, value)) => Self::new(key, Some(value.to_string())),
            None => Self::new(option, None),
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.key == key
    }

    /// Whether this is the nothing between two adjacent commas
    pub fn is_empty_fragment(&self) -> bool {
        self.key.is_empty() && self.value.is_none()
    }
}

impl fmt::Display for MountOptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => f.write_str(&self.key),
        }
    }
}

/// Ordered options of an fstab entry.
///
/// Order is kept as given, duplicates included: for conflicting options the
/// last one wins, as in mount(8).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MountOptions {
    tokens: Vec<MountOptionToken>,
}

impl MountOptions {
    /// Parse an option string.
    ///
    /// `"defaults"` and `""` give an empty list. Nothing is trimmed or
    /// case-folded.
    pub fn parse(options: &str) -> Self {
        if options.is_empty() || options == DEFAULTS {
            return Self::default();
        }

        let tokens = options.split(',').map(MountOptionToken::parse).collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[MountOptionToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn push(&mut self, token: MountOptionToken) {
        self.tokens.push(token);
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&MountOptionToken) -> bool,
    {
        self.tokens.retain(f);
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut [MountOptionToken] {
        &mut self.tokens
    }

    /// Join the options back into an fstab option string
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MountOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tokens.is_empty() {
            return f.write_str(DEFAULTS);
        }

        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromIterator<MountOptionToken> for MountOptions {
    fn from_iter<I: IntoIterator<Item = MountOptionToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}
