use std::{env, time::Duration};

use log::{debug, error, info};
use strum::{Display, EnumString};

use crate::{
    error::{GatewayError, Result},
    keys::{DEFAULT_METADATA_PREFIX, DEFAULT_POSTER_PREFIX, KeyLayout},
};

const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PRESIGNED_TTL_SECS: u64 = 3600;

/// How cached posters are referenced in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UrlModeKind {
    Public,
    Presigned,
}

/// Where the release year comes from on a cache hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MetadataMode {
    /// Ask OMDb again for every hit.
    Live,
    /// Read the metadata object written on the miss path.
    Stored,
}

/// Outcome when OMDb has no match for an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MissPolicy {
    /// Succeed with `{ posterUrl: null, year: "" }`.
    Empty,
    /// Fail with a 404.
    NotFound,
}

impl MissPolicy {
    #[must_use]
    pub fn default_for(metadata_mode: MetadataMode) -> Self {
        match metadata_mode {
            MetadataMode::Live => MissPolicy::Empty,
            MetadataMode::Stored => MissPolicy::NotFound,
        }
    }
}

/// Poster reference construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterUrlMode {
    /// `<base_url>/<key>`, assumes a public bucket.
    Public { base_url: String },
    /// Time-limited signed GET URL.
    Presigned { expires_in: Duration },
}

#[derive(Debug, Clone)]
pub struct StorjConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
}

#[derive(Debug, Clone)]
pub struct OmdbConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub omdb: OmdbConfig,
    pub storj: StorjConfig,
    pub url_mode: PosterUrlMode,
    pub metadata_mode: MetadataMode,
    pub miss_policy: MissPolicy,
    pub keys: KeyLayout,
    pub gist_url: Option<String>,
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is invalid.
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok()).inspect_err(|e| {
            error!("Failed to load configuration: {e}");
        })
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let omdb = OmdbConfig {
            api_key: vars.required("OMDB_API_KEY")?,
            base_url: vars.or("OMDB_BASE_URL", DEFAULT_OMDB_BASE_URL),
        };
        url::Url::parse(&omdb.base_url)
            .map_err(|e| GatewayError::Config(format!("OMDB_BASE_URL is not a URL: {e}")))?;

        let storj = StorjConfig {
            endpoint: vars.required("STORJ_ENDPOINT")?,
            region: vars.or("STORJ_REGION", DEFAULT_REGION),
            access_key: vars.required("STORJ_ACCESS_KEY")?,
            secret_key: vars.required("STORJ_SECRET_KEY")?,
            bucket: vars.required("STORJ_BUCKET")?,
        };

        let url_mode = match vars.parsed("POSTER_URL_MODE", UrlModeKind::Public)? {
            UrlModeKind::Public => PosterUrlMode::Public {
                base_url: vars.required("STORJ_PUBLIC_BASE")?,
            },
            UrlModeKind::Presigned => PosterUrlMode::Presigned {
                expires_in: Duration::from_secs(
                    vars.parsed("PRESIGNED_URL_TTL_SECS", DEFAULT_PRESIGNED_TTL_SECS)?,
                ),
            },
        };

        let metadata_mode = vars.parsed("METADATA_MODE", MetadataMode::Live)?;
        let miss_policy =
            vars.parsed("OMDB_MISS_POLICY", MissPolicy::default_for(metadata_mode))?;

        let keys = KeyLayout {
            poster_prefix: vars.raw_or("POSTER_KEY_PREFIX", DEFAULT_POSTER_PREFIX),
            metadata_prefix: vars.raw_or("METADATA_KEY_PREFIX", DEFAULT_METADATA_PREFIX),
        };

        let gist_url = vars.optional("GIST_URL");
        let port = vars.parsed("PORT", DEFAULT_PORT)?;

        info!("Configuration loaded successfully");
        debug!("OMDb API key length: {} characters", omdb.api_key.len());
        debug!("Object store: {} (bucket {})", storj.endpoint, storj.bucket);
        debug!("Poster URL mode: {url_mode:?}");
        debug!("Metadata mode: {metadata_mode}, miss policy: {miss_policy}");

        Ok(Self {
            omdb,
            storj,
            url_mode,
            metadata_mode,
            miss_policy,
            keys,
            gist_url,
            port,
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &str) -> Result<String> {
        self.optional(name)
            .ok_or_else(|| GatewayError::Config(format!("{name} is not set")))
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    // Prefixes may legitimately be empty, so only an unset variable falls back.
    fn raw_or(&self, name: &str, default: &str) -> String {
        (self.0)(name).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(name) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| GatewayError::Config(format!("invalid {name} '{raw}': {e}"))),
            None => Ok(default),
        }
    }
}
