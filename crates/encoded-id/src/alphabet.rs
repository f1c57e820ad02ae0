use crate::ConfigError;
use core::fmt;

/// The coder needs this many unique characters to leave room for its guard
/// and delimiter characters.
pub const MIN_ALPHABET_LEN: usize = 16;

const NO_VALUE: u16 = u16::MAX;

/// A reduced Crockford base32 character set: no `i`, `l` or `o`, lower-case.
pub const MODIFIED_CROCKFORD: &str = "0123456789abcdefghjkmnpqrstuvwxyz";

/// Aliases accepted on decode for [`MODIFIED_CROCKFORD`].
pub const MODIFIED_CROCKFORD_EQUIVALENCES: &[(char, char)] = &[('o', '0'), ('i', '1'), ('l', '1')];

/// The ordered set of characters core tokens are drawn from.
///
/// Besides the characters themselves an alphabet carries *equivalences*:
/// characters outside the alphabet that decode as one inside it. Case is
/// folded for ASCII letters whose other case is not itself part of the
/// alphabet, so `ABCD` decodes like `abcd` against [`MODIFIED_CROCKFORD`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    chars: Vec<char>,
    equivalences: Vec<(char, char)>,
    /// ASCII fast path: byte -> index into `chars`, aliases included.
    lookup: [u16; 128],
}

impl Alphabet {
    /// Creates an alphabet without equivalences.
    ///
    /// # Errors
    ///
    /// Fails when the characters are not unique, contain whitespace, or number
    /// fewer than [`MIN_ALPHABET_LEN`].
    pub fn new(characters: &str) -> Result<Self, ConfigError> {
        Self::with_equivalences(characters, &[])
    }

    /// Creates an alphabet that decodes each `(from, to)` pair's `from`
    /// character as `to`.
    ///
    /// # Errors
    ///
    /// Fails like [`Alphabet::new`], and when an equivalence maps from an
    /// alphabet character or to a character outside the alphabet.
    pub fn with_equivalences(
        characters: &str,
        equivalences: &[(char, char)],
    ) -> Result<Self, ConfigError> {
        let mut chars: Vec<char> = Vec::with_capacity(characters.len());
        for ch in characters.chars() {
            if ch.is_whitespace() {
                return Err(ConfigError::AlphabetWhitespace { ch });
            }
            if chars.contains(&ch) {
                return Err(ConfigError::AlphabetDuplicate { ch });
            }
            chars.push(ch);
        }
        if chars.len() < MIN_ALPHABET_LEN {
            return Err(ConfigError::AlphabetTooSmall {
                len: chars.len(),
                min: MIN_ALPHABET_LEN,
            });
        }
        for &(from, to) in equivalences {
            if chars.contains(&from) || !chars.contains(&to) {
                return Err(ConfigError::InvalidEquivalence { from, to });
            }
        }

        let mut lookup = [NO_VALUE; 128];
        for (i, &ch) in chars.iter().enumerate() {
            if ch.is_ascii() {
                lookup[ch as usize] = i as u16;
            }
        }
        // Case folding, only where it cannot shadow a real character
        for (i, &ch) in chars.iter().enumerate() {
            if ch.is_ascii_alphabetic() {
                let other = if ch.is_ascii_lowercase() {
                    ch.to_ascii_uppercase()
                } else {
                    ch.to_ascii_lowercase()
                };
                if lookup[other as usize] == NO_VALUE {
                    lookup[other as usize] = i as u16;
                }
            }
        }
        for &(from, to) in equivalences {
            let Some(target) = chars.iter().position(|&c| c == to) else {
                continue;
            };
            for alias in [from, from.to_ascii_uppercase(), from.to_ascii_lowercase()] {
                if alias.is_ascii() && lookup[alias as usize] == NO_VALUE {
                    lookup[alias as usize] = target as u16;
                }
            }
        }

        Ok(Self {
            chars,
            equivalences: equivalences.to_vec(),
            lookup,
        })
    }

    /// The default alphabet: [`MODIFIED_CROCKFORD`] with its equivalences.
    #[must_use]
    pub fn modified_crockford() -> Self {
        Self::with_equivalences(MODIFIED_CROCKFORD, MODIFIED_CROCKFORD_EQUIVALENCES)
            .unwrap_or_else(|_| unreachable!("the modified Crockford alphabet is valid"))
    }

    /// The characters, in order.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The configured equivalences.
    #[must_use]
    pub fn equivalences(&self) -> &[(char, char)] {
        &self.equivalences
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`: alphabets hold at least [`MIN_ALPHABET_LEN`]
    /// characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns `true` if `ch` is one of the alphabet's own characters.
    /// Equivalences do not count.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        if ch.is_ascii() {
            let idx = self.lookup[ch as usize];
            idx != NO_VALUE && self.chars[idx as usize] == ch
        } else {
            self.chars.contains(&ch)
        }
    }

    /// Maps `ch`, or its equivalent, to the alphabet character it decodes as.
    #[must_use]
    pub fn canonical(&self, ch: char) -> Option<char> {
        if ch.is_ascii() {
            match self.lookup[ch as usize] {
                NO_VALUE => None,
                idx => Some(self.chars[idx as usize]),
            }
        } else if self.chars.contains(&ch) {
            Some(ch)
        } else {
            self.equivalences
                .iter()
                .find(|(from, _)| *from == ch)
                .map(|&(_, to)| to)
        }
    }

    /// The alphabet characters as a string.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::modified_crockford()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("chars", &self.as_string())
            .field("equivalences", &self.equivalences)
            .finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.chars {
            fmt::Write::write_char(f, *ch)?;
        }
        Ok(())
    }
}
