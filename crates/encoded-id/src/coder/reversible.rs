use super::shuffle::consistent_shuffle;
use crate::{
    Alphabet, Coder, CoderSettings, ConfigError, EncodeError, FormatError, SeparatorKind,
};

/// The default [`Coder`]: a salted, padded, alphabet-restricted encoding of
/// one or more `u64` ids.
///
/// The alphabet is shuffled with the salt. Its first character becomes the
/// *guard* (terminates padding), the second the *delimiter* (separates ids),
/// and the rest are the digits ids are written with. A token is laid out as
///
/// ```text
/// [filler… guard] lottery digits(id₀) [delimiter digits(id₁) …]
/// ```
///
/// where the lottery digit rotates the digit alphabet so that neighbouring
/// ids do not share a visible prefix, and the optional filler pads the token
/// to `id_length`. Decoding is strict: anything that does not re-encode to
/// the same characters is rejected with [`FormatError::NonCanonical`].
///
/// # Example
///
/// ```
/// use encoded_id::{Alphabet, Coder, CoderSettings, ReversibleCoder};
///
/// let coder = ReversibleCoder::from_settings(CoderSettings {
///     salt: "User/abcd1234".to_owned(),
///     id_length: 8,
///     character_group_size: Some(4),
///     group_separator: "-".to_owned(),
///     alphabet: Alphabet::modified_crockford(),
/// })
/// .unwrap();
///
/// let token = coder.encode(&[42]).unwrap();
/// assert_eq!(token.len(), 9); // xxxx-xxxx
/// assert_eq!(coder.decode(&token).unwrap(), vec![42]);
/// assert!(coder.decode("not-a-token!").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReversibleCoder {
    alphabet: Alphabet,
    guard: char,
    delimiter: char,
    digits: Vec<char>,
    id_length: usize,
    character_group_size: Option<usize>,
    group_separator: String,
}

impl ReversibleCoder {
    fn base(&self) -> u64 {
        self.digits.len() as u64
    }

    /// Digits rotated left by `lottery`.
    fn rotated(&self, lottery: usize) -> Vec<char> {
        let mut rotated = self.digits.clone();
        rotated.rotate_left(lottery);
        rotated
    }

    fn lottery(&self, ids: &[u64]) -> usize {
        let seed = ids
            .iter()
            .enumerate()
            .fold(ids.len() as u64, |acc, (i, &id)| {
                acc.wrapping_add(id % (i as u64 + 100))
            });
        (seed % self.base()) as usize
    }

    fn push_digits(&self, out: &mut String, mut id: u64, digits: &[char]) {
        let base = self.base();
        let start = out.len();
        loop {
            out.push(digits[(id % base) as usize]);
            id /= base;
            if id == 0 {
                break;
            }
        }
        // Digits were written least significant first
        let written: String = out[start..].chars().rev().collect();
        out.truncate(start);
        out.push_str(&written);
    }

    /// The ungrouped token.
    fn encode_raw(&self, ids: &[u64]) -> String {
        let lottery = self.lottery(ids);
        let rotated = self.rotated(lottery);

        let mut body = String::new();
        body.push(self.digits[lottery]);
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                body.push(self.delimiter);
            }
            self.push_digits(&mut body, id, &rotated);
        }

        let len = body.chars().count();
        if len >= self.id_length {
            return body;
        }
        let pad = self.id_length - len;
        let mut token = String::with_capacity(body.len() + pad * 4);
        for k in 0..pad - 1 {
            token.push(self.digits[(lottery + 1 + k * 3) % self.digits.len()]);
        }
        token.push(self.guard);
        token.push_str(&body);
        token
    }

    fn group(&self, raw: String) -> String {
        let Some(size) = self.character_group_size else {
            return raw;
        };
        let mut grouped = String::with_capacity(raw.len() + raw.len() / size);
        for (i, ch) in raw.chars().enumerate() {
            if i > 0 && i % size == 0 {
                grouped.push_str(&self.group_separator);
            }
            grouped.push(ch);
        }
        grouped
    }

    /// Strips group separators and maps equivalent characters onto the
    /// alphabet.
    fn normalize(&self, token: &str) -> Result<String, FormatError> {
        let stripped = if self.group_separator.is_empty() {
            token.to_owned()
        } else {
            token.replace(self.group_separator.as_str(), "")
        };
        if stripped.trim().is_empty() {
            return Err(FormatError::Empty);
        }
        stripped
            .chars()
            .enumerate()
            .map(|(index, ch)| {
                self.alphabet
                    .canonical(ch)
                    .ok_or(FormatError::InvalidCharacter { ch, index })
            })
            .collect()
    }

    fn decode_segment(&self, segment: &str, digits: &[char]) -> Result<u64, FormatError> {
        if segment.is_empty() {
            return Err(FormatError::EmptySegment);
        }
        let base = self.base();
        segment.chars().try_fold(0_u64, |acc, ch| {
            let digit = digits
                .iter()
                .position(|&d| d == ch)
                .ok_or(FormatError::NonCanonical)?;
            acc.checked_mul(base)
                .and_then(|acc| acc.checked_add(digit as u64))
                .ok_or(FormatError::Overflow)
        })
    }
}

impl Coder for ReversibleCoder {
    fn from_settings(settings: CoderSettings) -> Result<Self, ConfigError> {
        if settings.id_length == 0 {
            return Err(ConfigError::InvalidIdLength);
        }
        if settings.character_group_size == Some(0) {
            return Err(ConfigError::InvalidGroupSize);
        }
        let separator = &settings.group_separator;
        if settings.character_group_size.is_some() && separator.trim().is_empty() {
            return Err(ConfigError::BlankSeparator {
                kind: SeparatorKind::Group,
            });
        }
        if let Some(ch) = separator
            .chars()
            .find(|&ch| settings.alphabet.canonical(ch).is_some())
        {
            return Err(ConfigError::SeparatorInAlphabet {
                kind: SeparatorKind::Group,
                separator: separator.clone(),
                ch,
            });
        }

        let mut shuffled = settings.alphabet.chars().to_vec();
        consistent_shuffle(&mut shuffled, settings.salt.as_bytes());
        let guard = shuffled[0];
        let delimiter = shuffled[1];
        let digits = shuffled.split_off(2);

        Ok(Self {
            alphabet: settings.alphabet,
            guard,
            delimiter,
            digits,
            id_length: settings.id_length,
            character_group_size: settings.character_group_size,
            group_separator: settings.group_separator,
        })
    }

    fn encode(&self, ids: &[u64]) -> Result<String, EncodeError> {
        if ids.is_empty() {
            return Err(EncodeError::NoIds);
        }
        Ok(self.group(self.encode_raw(ids)))
    }

    fn decode(&self, token: &str) -> Result<Vec<u64>, FormatError> {
        let normalized = self.normalize(token)?;

        let body = match normalized.rfind(self.guard) {
            Some(pos) => &normalized[pos + self.guard.len_utf8()..],
            None => normalized.as_str(),
        };
        let mut chars = body.chars();
        let lottery_char = chars.next().ok_or(FormatError::Empty)?;
        let lottery = self
            .digits
            .iter()
            .position(|&d| d == lottery_char)
            .ok_or(FormatError::NonCanonical)?;
        let rotated = self.rotated(lottery);

        let ids = chars
            .as_str()
            .split(self.delimiter)
            .map(|segment| self.decode_segment(segment, &rotated))
            .collect::<Result<Vec<_>, _>>()?;

        if self.encode_raw(&ids) != normalized {
            return Err(FormatError::NonCanonical);
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CoderSettings {
        CoderSettings {
            salt: "User/abcd1234".to_owned(),
            id_length: 8,
            character_group_size: Some(4),
            group_separator: "-".to_owned(),
            alphabet: Alphabet::modified_crockford(),
        }
    }

    fn coder() -> ReversibleCoder {
        ReversibleCoder::from_settings(settings()).unwrap()
    }

    #[test]
    fn encodes_to_grouped_tokens_of_minimum_length() {
        let token = coder().encode(&[42]).unwrap();
        assert_eq!(token.chars().count(), 9);
        assert_eq!(token.chars().nth(4), Some('-'));
        assert!(
            token
                .chars()
                .filter(|&c| c != '-')
                .all(|c| Alphabet::modified_crockford().contains(c))
        );
    }

    #[test]
    fn decodes_what_it_encodes() {
        let coder = coder();
        for ids in [
            vec![0],
            vec![1],
            vec![42],
            vec![u64::MAX],
            vec![1, 2, 3],
            vec![10_000_000, 0, 7],
        ] {
            let token = coder.encode(&ids).unwrap();
            assert_eq!(coder.decode(&token).unwrap(), ids, "token {token}");
        }
    }

    #[test]
    fn is_deterministic_and_salted() {
        let a = coder().encode(&[42]).unwrap();
        assert_eq!(a, coder().encode(&[42]).unwrap());

        let other = ReversibleCoder::from_settings(settings().with_salt("Post/abcd1234")).unwrap();
        assert_ne!(a, other.encode(&[42]).unwrap());
    }

    #[test]
    fn long_ids_are_not_truncated() {
        let coder = ReversibleCoder::from_settings(settings().with_id_length(2)).unwrap();
        let token = coder.encode(&[u64::MAX]).unwrap();
        assert!(token.replace('-', "").chars().count() > 2);
        assert_eq!(coder.decode(&token).unwrap(), vec![u64::MAX]);
    }

    #[test]
    fn ungrouped_tokens_have_no_separator() {
        let coder = ReversibleCoder::from_settings(settings().ungrouped()).unwrap();
        let token = coder.encode(&[42]).unwrap();
        assert_eq!(token.chars().count(), 8);
        assert!(!token.contains('-'));
    }

    #[test]
    fn grouping_does_not_affect_decoding() {
        let grouped = coder();
        let ungrouped = ReversibleCoder::from_settings(settings().ungrouped()).unwrap();
        let token = grouped.encode(&[42]).unwrap();
        assert_eq!(token.replace('-', ""), ungrouped.encode(&[42]).unwrap());
        assert_eq!(ungrouped.decode(&token).unwrap(), vec![42]);
    }

    #[test]
    fn decoding_is_case_insensitive() {
        let coder = coder();
        let token = coder.encode(&[42]).unwrap();
        assert_eq!(coder.decode(&token.to_uppercase()).unwrap(), vec![42]);
    }

    #[test]
    fn rejects_characters_outside_the_alphabet() {
        assert!(matches!(
            coder().decode("aa%%aaaa"),
            Err(FormatError::InvalidCharacter { ch: '%', index: 2 })
        ));
    }

    #[test]
    fn rejects_empty_tokens() {
        assert_eq!(coder().decode(""), Err(FormatError::Empty));
        assert_eq!(coder().decode("----"), Err(FormatError::Empty));
    }

    #[test]
    fn rejects_tampered_tokens() {
        let coder = coder();
        let token = coder.encode(&[42]).unwrap();
        let mut chars: Vec<char> = token.chars().collect();
        // Swap the first filler character for another digit
        chars[0] = if chars[0] == coder.digits[0] {
            coder.digits[1]
        } else {
            coder.digits[0]
        };
        let tampered: String = chars.into_iter().collect();
        assert!(coder.decode(&tampered).is_err());
    }

    #[test]
    fn rejects_empty_id_lists() {
        assert_eq!(coder().encode(&[]), Err(EncodeError::NoIds));
    }

    #[test]
    fn rejects_group_separators_from_the_alphabet() {
        let settings = CoderSettings {
            group_separator: "a".to_owned(),
            ..settings()
        };
        assert!(matches!(
            ReversibleCoder::from_settings(settings),
            Err(ConfigError::SeparatorInAlphabet { .. })
        ));
    }

    #[test]
    fn rejects_group_separators_that_decode_as_alphabet_characters() {
        for separator in ["o", "I", "L", "A"] {
            let settings = CoderSettings {
                group_separator: separator.to_owned(),
                ..settings()
            };
            assert!(matches!(
                ReversibleCoder::from_settings(settings),
                Err(ConfigError::SeparatorInAlphabet { .. })
            ));
        }
    }
}
