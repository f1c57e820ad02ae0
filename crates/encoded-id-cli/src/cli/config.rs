use crate::cli::command::Command;
use anyhow::{Context, bail};
use clap::{Args, Parser};
use encoded_id::{Configuration, MIN_SALT_LEN, Settings};
use std::path::{Path, PathBuf};

/// Command line of the `encoded-id` binary.
///
/// Every configuration value can also come from the environment (or a
/// `.env` file) and from a JSON settings file given with `--config`. Flags
/// and environment variables override the file.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "encoded-id",
    version,
    about = "Encode, decode and inspect encoded IDs"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the result as a JSON object.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Configuration overrides, applied on top of the settings file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON settings file; missing fields take their defaults.
    ///
    /// Environment variable: `ENCODED_ID_CONFIG`
    #[arg(long = "config", env = "ENCODED_ID_CONFIG", global = true)]
    pub config_file: Option<PathBuf>,

    /// Base salt, combined with the record type name before encoding.
    ///
    /// Environment variable: `ENCODED_ID_SALT`
    #[arg(long, env = "ENCODED_ID_SALT", global = true, hide_env_values = true)]
    pub salt: Option<String>,

    /// Characters tokens are drawn from. A custom alphabet drops the
    /// default look-alike equivalences.
    ///
    /// Environment variable: `ENCODED_ID_ALPHABET`
    #[arg(long, env = "ENCODED_ID_ALPHABET", global = true)]
    pub alphabet: Option<String>,

    /// Minimum token length before grouping.
    ///
    /// Environment variable: `ENCODED_ID_LENGTH`
    #[arg(long, env = "ENCODED_ID_LENGTH", global = true)]
    pub id_length: Option<usize>,

    /// Characters per group; 0 disables grouping.
    ///
    /// Environment variable: `ENCODED_ID_GROUP_SIZE`
    #[arg(long, env = "ENCODED_ID_GROUP_SIZE", global = true)]
    pub group_size: Option<usize>,

    /// Separator between character groups.
    ///
    /// Environment variable: `ENCODED_ID_GROUP_SEPARATOR`
    #[arg(
        long,
        env = "ENCODED_ID_GROUP_SEPARATOR",
        global = true,
        allow_hyphen_values = true
    )]
    pub group_separator: Option<String>,

    /// Separator between a slug and an identifier.
    ///
    /// Environment variable: `ENCODED_ID_SLUGGED_ID_SEPARATOR`
    #[arg(
        long,
        env = "ENCODED_ID_SLUGGED_ID_SEPARATOR",
        global = true,
        allow_hyphen_values = true
    )]
    pub slugged_id_separator: Option<String>,

    /// Separator between an annotation and a core token.
    ///
    /// Environment variable: `ENCODED_ID_ANNOTATED_ID_SEPARATOR`
    #[arg(
        long,
        env = "ENCODED_ID_ANNOTATED_ID_SEPARATOR",
        global = true,
        allow_hyphen_values = true
    )]
    pub annotated_id_separator: Option<String>,
}

impl TryFrom<ConfigArgs> for Configuration {
    type Error = anyhow::Error;

    fn try_from(args: ConfigArgs) -> Result<Self, Self::Error> {
        let mut settings = match &args.config_file {
            Some(path) => read_settings(path)?,
            None => Settings::default(),
        };

        if let Some(alphabet) = args.alphabet {
            if alphabet != settings.alphabet {
                settings.equivalences.clear();
            }
            settings.alphabet = alphabet;
        }
        if let Some(id_length) = args.id_length {
            settings.id_length = id_length;
        }
        if let Some(size) = args.group_size {
            settings.character_group_size = (size > 0).then_some(size);
        }
        if let Some(separator) = args.group_separator {
            settings.group_separator = separator;
        }
        if let Some(separator) = args.slugged_id_separator {
            settings.slugged_id_separator = separator;
        }
        if let Some(separator) = args.annotated_id_separator {
            settings.annotated_id_separator = separator;
        }
        if args.salt.is_some() {
            settings.salt = args.salt;
        }

        if let Some(salt) = &settings.salt {
            if salt.trim().is_empty() || salt.chars().count() < MIN_SALT_LEN {
                bail!("the salt must be at least {MIN_SALT_LEN} non-blank characters");
            }
        }

        Configuration::try_from(settings).context("invalid encoded id configuration")
    }
}

fn read_settings(path: &Path) -> anyhow::Result<Settings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid settings file {}", path.display()))
}
