//! Storage configuration types.

use serde::Deserialize;

/// Region used when `REGION` is unset or empty.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Bucket used when `BUCKET_NAME` is unset or empty.
pub const DEFAULT_BUCKET: &str = "user-profile-images";

/// Environment variables read by [`StorageSettings::load`], paired with their config keys.
const ENV_KEYS: [(&str, &str); 4] = [
    ("access_key_id", "ACCESS_KEY_ID"),
    ("secret_access_key", "SECRET_ACCESS_KEY"),
    ("region", "REGION"),
    ("bucket_name", "BUCKET_NAME"),
];

/// Object store credentials and location.
///
/// Read once at startup and never mutated afterwards.
#[derive(Clone, Deserialize)]
pub struct StorageSettings {
    /// Access key ID. Empty means "not configured".
    #[serde(default)]
    pub access_key_id: String,
    /// Secret access key. Empty means "not configured".
    #[serde(default)]
    pub secret_access_key: String,
    /// Region of the bucket.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket that receives uploads.
    #[serde(default = "default_bucket")]
    pub bucket_name: String,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl std::fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageSettings")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("region", &self.region)
            .field("bucket_name", &self.bucket_name)
            .finish()
    }
}

impl StorageSettings {
    /// Create settings with the given credentials and the default region and bucket.
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: default_region(),
            bucket_name: default_bucket(),
        }
    }

    /// Set the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the bucket name.
    #[must_use]
    pub fn with_bucket(mut self, bucket_name: impl Into<String>) -> Self {
        self.bucket_name = bucket_name.into();
        self
    }

    /// Whether both halves of the credential pair are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }

    /// Loads settings from `config/storage` (optional) and the process environment.
    ///
    /// `ACCESS_KEY_ID`, `SECRET_ACCESS_KEY`, `REGION` and `BUCKET_NAME` override
    /// the file. Empty variables count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("region", DEFAULT_REGION)?
            .set_default("bucket_name", DEFAULT_BUCKET)?
            .add_source(config::File::with_name("config/storage").required(false));

        for (key, var) in ENV_KEYS {
            let value = std::env::var(var).ok().filter(|v| !v.is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 4] = ["ACCESS_KEY_ID", "SECRET_ACCESS_KEY", "REGION", "BUCKET_NAME"];

    #[test]
    fn test_settings_defaults() {
        let settings = StorageSettings::default();
        assert_eq!(settings.region, DEFAULT_REGION);
        assert_eq!(settings.bucket_name, DEFAULT_BUCKET);
        assert!(!settings.has_credentials());
    }

    #[test]
    fn test_builders_override_location() {
        let settings = StorageSettings::new("AKIA", "secret")
            .with_region("eu-central-1")
            .with_bucket("avatars");
        assert_eq!(settings.region, "eu-central-1");
        assert_eq!(settings.bucket_name, "avatars");
    }

    #[test]
    fn test_has_credentials_requires_both_keys() {
        assert!(StorageSettings::new("AKIA", "secret").has_credentials());
        assert!(!StorageSettings::new("AKIA", "").has_credentials());
        assert!(!StorageSettings::new("", "secret").has_credentials());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", StorageSettings::new("AKIA", "hunter2"));
        assert!(rendered.contains("AKIA"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("ACCESS_KEY_ID", Some("AKIA")),
                ("SECRET_ACCESS_KEY", Some("secret")),
                ("REGION", Some("eu-west-1")),
                ("BUCKET_NAME", Some("avatars")),
            ],
            || {
                let settings = StorageSettings::load().expect("settings should load");
                assert_eq!(settings.access_key_id, "AKIA");
                assert_eq!(settings.secret_access_key, "secret");
                assert_eq!(settings.region, "eu-west-1");
                assert_eq!(settings.bucket_name, "avatars");
                assert!(settings.has_credentials());
            },
        );
    }

    #[test]
    fn test_load_applies_defaults_when_unset() {
        temp_env::with_vars_unset(ALL_VARS, || {
            let settings = StorageSettings::load().expect("settings should load");
            assert!(settings.access_key_id.is_empty());
            assert_eq!(settings.region, DEFAULT_REGION);
            assert_eq!(settings.bucket_name, DEFAULT_BUCKET);
        });
    }

    #[test]
    fn test_load_treats_empty_values_as_unset() {
        temp_env::with_vars(
            [
                ("ACCESS_KEY_ID", Some("")),
                ("SECRET_ACCESS_KEY", Some("secret")),
                ("REGION", Some("")),
                ("BUCKET_NAME", None),
            ],
            || {
                let settings = StorageSettings::load().expect("settings should load");
                assert!(!settings.has_credentials());
                assert_eq!(settings.region, DEFAULT_REGION);
            },
        );
    }
}
