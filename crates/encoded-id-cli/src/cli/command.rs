use anyhow::{Context, bail};
use clap::Subcommand;
use core::fmt;
use encoded_id::{
    Coder, Configuration, MIN_SALT_LEN, ReversibleCoder, annotated_id, derive_salt, parse,
    slugged_id, snake_case,
};
use rand::RngCore;
use serde_json::json;

/// Upper bound for `salt --bytes`.
pub const MAX_SALT_BYTES: usize = 1024;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Encode one or more ids for a record type.
    Encode {
        /// Record type name the salt is keyed with, e.g. `User`.
        #[arg(long = "type", value_name = "TYPE")]
        type_name: String,

        /// Ids to pack into a single token.
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,

        /// Prefix the token with the snake-cased type name.
        #[arg(long, default_value_t = false)]
        annotate: bool,

        /// Prefix the result with a slug built from this text.
        #[arg(long)]
        slug: Option<String>,
    },

    /// Decode a bare, annotated or slugged encoded id.
    Decode {
        /// Record type name the salt is keyed with.
        #[arg(long = "type", value_name = "TYPE")]
        type_name: String,

        input: String,
    },

    /// Split an identifier into slug, annotation and core token.
    Parse { input: String },

    /// Print a random hex salt.
    Salt {
        /// Number of random bytes, at most 1024.
        #[arg(long, default_value_t = 32)]
        bytes: usize,
    },
}

/// What a command prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Encoded(String),
    Decoded(Vec<u64>),
    Parsed {
        slug: Option<String>,
        annotation: Option<String>,
        core: String,
    },
    Salt(String),
}

impl Report {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Encoded(id) => json!({ "encoded_id": id }),
            Self::Decoded(ids) => json!({ "ids": ids }),
            Self::Parsed {
                slug,
                annotation,
                core,
            } => json!({ "slug": slug, "annotation": annotation, "core": core }),
            Self::Salt(salt) => json!({ "salt": salt }),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoded(id) | Self::Salt(id) => f.write_str(id),
            Self::Decoded(ids) => {
                let ids: Vec<String> = ids.iter().map(u64::to_string).collect();
                f.write_str(&ids.join(" "))
            }
            Self::Parsed {
                slug,
                annotation,
                core,
            } => {
                writeln!(f, "slug:       {}", slug.as_deref().unwrap_or("-"))?;
                writeln!(f, "annotation: {}", annotation.as_deref().unwrap_or("-"))?;
                write!(f, "core:       {core}")
            }
        }
    }
}

pub fn run(command: &Command, config: &Configuration) -> anyhow::Result<Report> {
    match command {
        Command::Encode {
            type_name,
            ids,
            annotate,
            slug,
        } => encode(config, type_name, ids, *annotate, slug.as_deref()).map(Report::Encoded),
        Command::Decode { type_name, input } => {
            decode(config, type_name, input).map(Report::Decoded)
        }
        Command::Parse { input } => {
            let (slug, annotation, core) = split(config, input);
            Ok(Report::Parsed {
                slug,
                annotation,
                core,
            })
        }
        Command::Salt { bytes } => random_salt(*bytes).map(Report::Salt),
    }
}

fn coder(config: &Configuration, type_name: &str) -> anyhow::Result<ReversibleCoder> {
    let salt = derive_salt(type_name, config.salt())?;
    Ok(ReversibleCoder::from_settings(config.coder_settings(salt))?)
}

fn encode(
    config: &Configuration,
    type_name: &str,
    ids: &[u64],
    annotate: bool,
    slug: Option<&str>,
) -> anyhow::Result<String> {
    let mut encoded = coder(config, type_name)?.encode(ids)?;
    if annotate {
        encoded = annotated_id(
            &snake_case(type_name),
            &encoded,
            config.annotated_id_separator(),
        )?;
    }
    if let Some(slug) = slug {
        encoded = slugged_id(slug, &encoded, config.slugged_id_separator())?;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(type_name, ?ids, %encoded, "encoded");
    Ok(encoded)
}

fn decode(config: &Configuration, type_name: &str, input: &str) -> anyhow::Result<Vec<u64>> {
    let (_, _, core) = split(config, input);
    let ids = coder(config, type_name)?
        .decode(&core)
        .with_context(|| format!("{input:?} is not a valid encoded id for {type_name}"))?;
    if ids.is_empty() {
        bail!("{input:?} decodes to no ids");
    }
    Ok(ids)
}

/// Strips the slug, then the annotation: `(slug, annotation, core)`.
fn split(config: &Configuration, input: &str) -> (Option<String>, Option<String>, String) {
    let slugged = parse(input, config.slugged_id_separator());
    let annotated = parse(&slugged.core, config.annotated_id_separator());
    (slugged.decoration, annotated.decoration, annotated.core)
}

fn random_salt(bytes: usize) -> anyhow::Result<String> {
    if bytes.saturating_mul(2) < MIN_SALT_LEN {
        bail!("a salt needs at least {} bytes", MIN_SALT_LEN.div_ceil(2));
    }
    if bytes > MAX_SALT_BYTES {
        bail!("a salt can have at most {MAX_SALT_BYTES} bytes");
    }
    let mut buf = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buf);
    Ok(buf.iter().map(|b| format!("{b:02x}")).collect())
}
