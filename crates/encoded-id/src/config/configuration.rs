use crate::{
    Alphabet, CoderSettings, ConfigError, SeparatorKind, validate_not_within, validate_separator,
};

/// Default minimum length of a core token.
pub const DEFAULT_ID_LENGTH: usize = 8;
/// Default number of characters per group.
pub const DEFAULT_CHARACTER_GROUP_SIZE: usize = 4;
/// Default separator between character groups.
pub const DEFAULT_GROUP_SEPARATOR: &str = "-";
/// Default separator between a slug and an identifier.
pub const DEFAULT_SLUGGED_ID_SEPARATOR: &str = "--";
/// Default separator between an annotation and a core token.
pub const DEFAULT_ANNOTATED_ID_SEPARATOR: &str = "_";

/// What a record renders as its path parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PathParam {
    /// The numeric primary key.
    #[default]
    Primary,
    /// The (annotated) encoded id.
    Encoded,
    /// The slugged encoded id.
    Slugged,
}

/// Process-wide settings shared by every encoder.
///
/// Every setter validates the resulting configuration as a whole and leaves
/// `self` untouched on failure, so a misconfiguration is reported when it is
/// written rather than when an identifier already in circulation fails to
/// parse.
///
/// Build one at startup and share it behind an [`std::sync::Arc`]; the
/// encoders only ever read it.
///
/// # Example
///
/// ```
/// use encoded_id::{Configuration, ConfigError};
///
/// let mut config = Configuration::default().with_salt("my-secret-salt");
/// config.set_group_separator("+").unwrap();
/// assert!(matches!(
///     config.set_slugged_id_separator("+"),
///     Err(ConfigError::SeparatorClash { .. })
/// ));
/// assert_eq!(config.slugged_id_separator(), "--");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    alphabet: Alphabet,
    id_length: usize,
    character_group_size: Option<usize>,
    group_separator: String,
    slugged_id_separator: String,
    annotated_id_separator: String,
    salt: Option<String>,
    path_param: PathParam,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::modified_crockford(),
            id_length: DEFAULT_ID_LENGTH,
            character_group_size: Some(DEFAULT_CHARACTER_GROUP_SIZE),
            group_separator: DEFAULT_GROUP_SEPARATOR.to_owned(),
            slugged_id_separator: DEFAULT_SLUGGED_ID_SEPARATOR.to_owned(),
            annotated_id_separator: DEFAULT_ANNOTATED_ID_SEPARATOR.to_owned(),
            salt: None,
            path_param: PathParam::default(),
        }
    }
}

impl Configuration {
    /// Default configuration with the given base salt.
    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn id_length(&self) -> usize {
        self.id_length
    }

    pub fn character_group_size(&self) -> Option<usize> {
        self.character_group_size
    }

    pub fn group_separator(&self) -> &str {
        &self.group_separator
    }

    pub fn slugged_id_separator(&self) -> &str {
        &self.slugged_id_separator
    }

    pub fn annotated_id_separator(&self) -> &str {
        &self.annotated_id_separator
    }

    /// The base salt, if one was configured. Validated when a per-type salt is
    /// derived, see [`crate::derive_salt`].
    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    pub fn path_param(&self) -> PathParam {
        self.path_param
    }

    /// Replaces the alphabet, revalidating every separator against it.
    ///
    /// # Errors
    ///
    /// Fails if a current separator shares a character with `alphabet`.
    pub fn set_alphabet(&mut self, alphabet: Alphabet) -> Result<(), ConfigError> {
        validate_separators(
            &alphabet,
            &self.group_separator,
            &self.slugged_id_separator,
            &self.annotated_id_separator,
            SeparatorKind::Group,
        )
        .inspect_err(log_rejection)?;
        self.alphabet = alphabet;
        Ok(())
    }

    /// Sets the minimum core token length.
    ///
    /// # Errors
    ///
    /// Fails for `0`.
    pub fn set_id_length(&mut self, id_length: usize) -> Result<(), ConfigError> {
        if id_length == 0 {
            let err = ConfigError::InvalidIdLength;
            log_rejection(&err);
            return Err(err);
        }
        self.id_length = id_length;
        Ok(())
    }

    /// Sets the group size; `None` disables grouping.
    ///
    /// # Errors
    ///
    /// Fails for `Some(0)`.
    pub fn set_character_group_size(&mut self, size: Option<usize>) -> Result<(), ConfigError> {
        if size == Some(0) {
            let err = ConfigError::InvalidGroupSize;
            log_rejection(&err);
            return Err(err);
        }
        self.character_group_size = size;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`validate_separator`] and [`validate_not_within`].
    pub fn set_group_separator(&mut self, separator: impl Into<String>) -> Result<(), ConfigError> {
        let separator = separator.into();
        validate_separators(
            &self.alphabet,
            &separator,
            &self.slugged_id_separator,
            &self.annotated_id_separator,
            SeparatorKind::Group,
        )
        .inspect_err(log_rejection)?;
        self.group_separator = separator;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`validate_separator`] and [`validate_not_within`].
    pub fn set_slugged_id_separator(
        &mut self,
        separator: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let separator = separator.into();
        validate_separators(
            &self.alphabet,
            &self.group_separator,
            &separator,
            &self.annotated_id_separator,
            SeparatorKind::Slugged,
        )
        .inspect_err(log_rejection)?;
        self.slugged_id_separator = separator;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`validate_separator`] and [`validate_not_within`].
    pub fn set_annotated_id_separator(
        &mut self,
        separator: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let separator = separator.into();
        validate_separators(
            &self.alphabet,
            &self.group_separator,
            &self.slugged_id_separator,
            &separator,
            SeparatorKind::Annotated,
        )
        .inspect_err(log_rejection)?;
        self.annotated_id_separator = separator;
        Ok(())
    }

    /// Replaces all three separators at once, validating them together.
    ///
    /// # Errors
    ///
    /// See [`validate_separator`] and [`validate_not_within`].
    pub fn set_separators(
        &mut self,
        group: impl Into<String>,
        slugged: impl Into<String>,
        annotated: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let (group, slugged, annotated) = (group.into(), slugged.into(), annotated.into());
        validate_separators(
            &self.alphabet,
            &group,
            &slugged,
            &annotated,
            SeparatorKind::Group,
        )
        .inspect_err(log_rejection)?;
        self.group_separator = group;
        self.slugged_id_separator = slugged;
        self.annotated_id_separator = annotated;
        Ok(())
    }

    pub fn set_salt(&mut self, salt: Option<String>) {
        self.salt = salt;
    }

    pub fn set_path_param(&mut self, path_param: PathParam) {
        self.path_param = path_param;
    }

    /// Coder settings keyed with `salt`, using this configuration's alphabet,
    /// length and grouping.
    #[must_use]
    pub fn coder_settings(&self, salt: String) -> CoderSettings {
        CoderSettings {
            salt,
            id_length: self.id_length,
            character_group_size: self.character_group_size,
            group_separator: self.group_separator.clone(),
            alphabet: self.alphabet.clone(),
        }
    }
}

/// Validates the three separators together. Errors concerning `changed` are
/// reported first.
fn validate_separators(
    alphabet: &Alphabet,
    group: &str,
    slugged: &str,
    annotated: &str,
    changed: SeparatorKind,
) -> Result<(), ConfigError> {
    let all = [
        (SeparatorKind::Group, group),
        (SeparatorKind::Slugged, slugged),
        (SeparatorKind::Annotated, annotated),
    ];
    let ordered = all
        .iter()
        .filter(|(kind, _)| *kind == changed)
        .chain(all.iter().filter(|(kind, _)| *kind != changed));

    for &(kind, separator) in ordered {
        for &(other_kind, other) in all.iter().filter(|(k, _)| *k != kind) {
            validate_separator(kind, separator, alphabet, other_kind, other)?;
        }
    }

    // Identifiers are split on the slug separator first, then the annotation
    // separator; group separators stay inside the core token. Matches are
    // checked against escaped forms too.
    validate_not_within(
        SeparatorKind::Slugged,
        slugged,
        SeparatorKind::Annotated,
        annotated,
    )?;
    validate_not_within(SeparatorKind::Slugged, slugged, SeparatorKind::Group, group)?;
    validate_not_within(
        SeparatorKind::Annotated,
        annotated,
        SeparatorKind::Group,
        group,
    )?;
    Ok(())
}

fn log_rejection(_err: &ConfigError) {
    #[cfg(feature = "tracing")]
    tracing::warn!(error = %_err, "rejected encoded id configuration change");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert_eq!(config.character_group_size(), Some(4));
        assert_eq!(config.group_separator(), "-");
        assert_eq!(config.id_length(), 8);
        assert_eq!(config.slugged_id_separator(), "--");
        assert_eq!(config.annotated_id_separator(), "_");
        assert_eq!(config.salt(), None);
        assert_eq!(config.path_param(), PathParam::Primary);
        assert_eq!(config.alphabet(), &Alphabet::modified_crockford());
    }

    #[test]
    fn separators_must_not_use_alphabet_characters() {
        let mut config = Configuration::default();
        assert!(matches!(
            config.set_group_separator("a"),
            Err(ConfigError::SeparatorInAlphabet { kind: SeparatorKind::Group, .. })
        ));
        assert!(matches!(
            config.set_slugged_id_separator("a"),
            Err(ConfigError::SeparatorInAlphabet { kind: SeparatorKind::Slugged, .. })
        ));
        let err = config.set_annotated_id_separator("0").unwrap_err();
        assert!(err.to_string().contains("must not be part of the alphabet"));
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn blank_separators_are_rejected() {
        let mut config = Configuration::default();
        let err = config.set_slugged_id_separator("").unwrap_err();
        assert_eq!(
            err,
            ConfigError::BlankSeparator {
                kind: SeparatorKind::Slugged
            }
        );
        assert!(err.to_string().contains("must not be blank or part of the alphabet"));
        assert!(config.set_annotated_id_separator(" ").is_err());
    }

    #[test]
    fn decoration_separators_must_differ_from_group_separator() {
        let mut config = Configuration::default();
        config.set_group_separator("+").unwrap();

        let err = config.set_slugged_id_separator("+").unwrap_err();
        assert!(err.to_string().contains("same as the group separator"));
        let err = config.set_annotated_id_separator("+").unwrap_err();
        assert!(err.to_string().contains("same as the group separator"));
    }

    #[test]
    fn decoration_separators_must_differ_from_each_other() {
        let mut config = Configuration::default();
        assert!(matches!(
            config.set_annotated_id_separator("--"),
            Err(ConfigError::SeparatorClash {
                kind: SeparatorKind::Annotated,
                other: SeparatorKind::Slugged,
                ..
            })
        ));
    }

    #[test]
    fn slug_separator_must_not_hide_inside_the_group_separator() {
        let mut config = Configuration::default();
        config.set_slugged_id_separator("~~").unwrap();
        config.set_group_separator("**").unwrap();
        assert!(matches!(
            config.set_slugged_id_separator("*"),
            Err(ConfigError::SeparatorOverlap { .. })
        ));
    }

    #[test]
    fn slug_separator_must_not_hide_inside_an_escaped_separator() {
        let mut config = Configuration::default();
        config.set_annotated_id_separator("^").unwrap();
        // `^` is spliced into identifiers as `%5E`.
        assert!(matches!(
            config.set_slugged_id_separator("%"),
            Err(ConfigError::SeparatorOverlap {
                kind: SeparatorKind::Slugged,
                other: SeparatorKind::Annotated,
                ..
            })
        ));
        assert_eq!(config.slugged_id_separator(), "--");

        config.set_annotated_id_separator("~").unwrap();
        config.set_slugged_id_separator("%").unwrap();
        assert!(config.set_annotated_id_separator("^").is_err());
    }

    #[test]
    fn separators_must_not_fold_into_the_alphabet() {
        let mut config = Configuration::default();
        for separator in ["o", "O", "I", "L", "X"] {
            assert!(matches!(
                config.set_group_separator(separator),
                Err(ConfigError::SeparatorInAlphabet { kind: SeparatorKind::Group, .. })
            ));
            assert!(config.set_slugged_id_separator(separator).is_err());
        }
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn separators_can_be_replaced_together() {
        let mut config = Configuration::default();
        assert!(config.set_separators("_", "-", "--").is_err());
        config.set_separators("_", "~", "-").unwrap();
        assert_eq!(config.group_separator(), "_");
        assert_eq!(config.slugged_id_separator(), "~");
        assert_eq!(config.annotated_id_separator(), "-");

        assert!(config.set_separators("+", "+", "-").is_err());
        assert_eq!(config.group_separator(), "_");
    }

    #[test]
    fn valid_separators_are_accepted() {
        let mut config = Configuration::default();
        config.set_group_separator("#").unwrap();
        config.set_slugged_id_separator("***").unwrap();
        config.set_annotated_id_separator("^").unwrap();

        assert_eq!(config.group_separator(), "#");
        assert_eq!(config.slugged_id_separator(), "***");
        assert_eq!(config.annotated_id_separator(), "^");
    }

    #[test]
    fn changing_the_alphabet_revalidates_separators() {
        let mut config = Configuration::default();
        let with_dash = Alphabet::new("0123456789abcdef-").unwrap();
        assert!(config.set_alphabet(with_dash).is_err());
        assert_eq!(config.alphabet(), &Alphabet::modified_crockford());

        let hex = Alphabet::new("0123456789abcdef").unwrap();
        config.set_alphabet(hex.clone()).unwrap();
        assert_eq!(config.alphabet(), &hex);
    }

    #[test]
    fn lengths_and_group_sizes_must_be_positive() {
        let mut config = Configuration::default();
        assert_eq!(config.set_id_length(0), Err(ConfigError::InvalidIdLength));
        assert_eq!(
            config.set_character_group_size(Some(0)),
            Err(ConfigError::InvalidGroupSize)
        );
        config.set_character_group_size(None).unwrap();
        assert_eq!(config.character_group_size(), None);
    }
}
