use crate::{
    Alphabet, ConfigError, Configuration, DEFAULT_ANNOTATED_ID_SEPARATOR,
    DEFAULT_CHARACTER_GROUP_SIZE, DEFAULT_GROUP_SEPARATOR, DEFAULT_ID_LENGTH,
    DEFAULT_SLUGGED_ID_SEPARATOR, MODIFIED_CROCKFORD, MODIFIED_CROCKFORD_EQUIVALENCES, PathParam,
};

/// Unvalidated configuration values, as read from a settings file or the
/// environment.
///
/// Convert with [`Configuration::try_from`], which applies the same
/// validation as the setters. Missing fields take their defaults when
/// deserialized.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Settings {
    pub alphabet: String,
    pub equivalences: Vec<(char, char)>,
    pub id_length: usize,
    pub character_group_size: Option<usize>,
    pub group_separator: String,
    pub slugged_id_separator: String,
    pub annotated_id_separator: String,
    pub salt: Option<String>,
    pub path_param: PathParam,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alphabet: MODIFIED_CROCKFORD.to_owned(),
            equivalences: MODIFIED_CROCKFORD_EQUIVALENCES.to_vec(),
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

impl TryFrom<Settings> for Configuration {
    type Error = ConfigError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        let alphabet = Alphabet::with_equivalences(&settings.alphabet, &settings.equivalences)?;

        // Neutral placeholders let the alphabet change without clashing with
        // the default separators; the real ones are then replaced together so
        // that swapping, say, the group and slug separators is not rejected
        // halfway through.
        let mut config = Self::default();
        config.set_separators("\u{1}", "\u{2}", "\u{3}")?;
        config.set_alphabet(alphabet)?;
        config.set_separators(
            settings.group_separator,
            settings.slugged_id_separator,
            settings.annotated_id_separator,
        )?;
        config.set_id_length(settings.id_length)?;
        config.set_character_group_size(settings.character_group_size)?;
        config.set_salt(settings.salt);
        config.set_path_param(settings.path_param);
        Ok(config)
    }
}

impl From<&Configuration> for Settings {
    fn from(config: &Configuration) -> Self {
        Self {
            alphabet: config.alphabet().as_string(),
            equivalences: config.alphabet().equivalences().to_vec(),
            id_length: config.id_length(),
            character_group_size: config.character_group_size(),
            group_separator: config.group_separator().to_owned(),
            slugged_id_separator: config.slugged_id_separator().to_owned(),
            annotated_id_separator: config.annotated_id_separator().to_owned(),
            salt: config.salt().map(str::to_owned),
            path_param: config.path_param(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_build_the_default_configuration() {
        let config = Configuration::try_from(Settings::default()).unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn separators_can_be_swapped() {
        let settings = Settings {
            group_separator: "--".to_owned(),
            slugged_id_separator: "~".to_owned(),
            ..Settings::default()
        };
        let config = Configuration::try_from(settings).unwrap();
        assert_eq!(config.group_separator(), "--");
        assert_eq!(config.slugged_id_separator(), "~");
    }

    #[test]
    fn separators_are_checked_in_their_escaped_form() {
        let settings = Settings {
            slugged_id_separator: "%".to_owned(),
            annotated_id_separator: "~".to_owned(),
            ..Settings::default()
        };
        assert!(Configuration::try_from(settings.clone()).is_ok());

        let settings = Settings {
            annotated_id_separator: "^".to_owned(),
            ..settings
        };
        assert!(matches!(
            Configuration::try_from(settings),
            Err(ConfigError::SeparatorOverlap { .. })
        ));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = Settings {
            annotated_id_separator: "a".to_owned(),
            ..Settings::default()
        };
        assert!(matches!(
            Configuration::try_from(settings),
            Err(ConfigError::SeparatorInAlphabet { .. })
        ));
    }

    #[test]
    fn configuration_round_trips_through_settings() {
        let config = Configuration::default().with_salt("abcd1234");
        let settings = Settings::from(&config);
        assert_eq!(Configuration::try_from(settings).unwrap(), config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_json() {
        let settings: Settings = serde_json::from_str(
            r#"{ "salt": "the-test-salt", "character_group_size": null, "path_param": "slugged" }"#,
        )
        .unwrap();
        let config = Configuration::try_from(settings).unwrap();
        assert_eq!(config.salt(), Some("the-test-salt"));
        assert_eq!(config.character_group_size(), None);
        assert_eq!(config.path_param(), PathParam::Slugged);
        assert_eq!(config.id_length(), 8);
    }
}
