use std::collections::HashMap;
use std::fs::{read_to_string, write};
use std::path::Path;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::{from_str, to_string_pretty};

use crate::flickr::error::{FlickrError, FlickrResult};

/// Name of the configuration file.
pub(crate) const CONFIG_NAME: &str = "config.json";

/// Name of the credentials file.
pub(crate) const CREDENTIALS_NAME: &str = "credentials.json";

/// Smallest number of images a run may request.
pub(crate) const NUM_IMAGES_MIN: u32 = 1;

/// Largest number of images a run may request.
pub(crate) const NUM_IMAGES_MAX: u32 = 20000;

/// Parameters of one execution, supplied through the host-managed
/// configuration file and validated before any network access.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Config {
    /// Search term for the images to download.
    #[serde(rename = "searchTerm", default)]
    search_term: String,
    /// Number of images to retrieve, between 1 and 20000.
    #[serde(rename = "numImages", default = "default_num_images")]
    num_images: u32,
    /// Name of the credential entry carrying the Flickr API key.
    #[serde(rename = "credentialName", default)]
    credential_name: String,
}

fn default_num_images() -> u32 {
    10
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Gets the global instance of the [Config], loading it on first use.
    pub(crate) fn get() -> FlickrResult<&'static Self> {
        CONFIG.get_or_try_init(Self::load)
    }

    /// Search term for the images to download.
    pub(crate) fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Number of images to retrieve.
    pub(crate) fn num_images(&self) -> u32 {
        self.num_images
    }

    /// Name of the credential entry carrying the API key.
    pub(crate) fn credential_name(&self) -> &str {
        &self.credential_name
    }

    /// Checks config and ensures it isn't missing.
    pub(crate) fn config_exists() -> bool {
        if !Path::new(CONFIG_NAME).exists() {
            trace!("{CONFIG_NAME}: does not exist!");
            return false;
        }

        true
    }

    /// Creates a config file with default values.
    pub(crate) fn create_config() -> FlickrResult<()> {
        let json = to_string_pretty(&Config::default())?;
        write(Path::new(CONFIG_NAME), json)?;

        Ok(())
    }

    /// Loads the config file.
    fn load() -> FlickrResult<Self> {
        let config: Config = from_str(&read_to_string(CONFIG_NAME)?)?;
        Ok(config)
    }

    /// Fails fast with a configuration error when the requested image count
    /// is outside `[1, 20000]` or no credential entry is selected.
    pub(crate) fn validate(&self) -> FlickrResult<()> {
        if self.num_images < NUM_IMAGES_MIN || self.num_images > NUM_IMAGES_MAX {
            return Err(FlickrError::Configuration(format!(
                "numImages must be between {NUM_IMAGES_MIN} and {NUM_IMAGES_MAX}, got {}",
                self.num_images
            )));
        }

        if self.credential_name.is_empty() {
            return Err(FlickrError::Configuration(
                "Credentials not selected.".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_term: String::new(),
            num_images: default_num_images(),
            credential_name: String::new(),
        }
    }
}

/// Capability interface supplied by the host: resolves a credential name to
/// its secret.
pub(crate) trait CredentialProvider {
    fn get_credentials(&self, name: &str) -> FlickrResult<String>;
}

/// One named credential entry. The API key rides in the `password` field;
/// the `username` is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub(crate) struct CredentialEntry {
    #[serde(rename = "Username", default)]
    username: String,
    #[serde(rename = "Password", default)]
    password: String,
}

/// File-backed credential store mapping entry names to credentials.
#[derive(Serialize, Deserialize, Debug, Default)]
pub(crate) struct CredentialStore {
    #[serde(flatten)]
    entries: HashMap<String, CredentialEntry>,
}

impl CredentialStore {
    /// Loads the credentials file, creating an empty one when missing so the
    /// user has something to fill in.
    pub(crate) fn load() -> FlickrResult<Self> {
        let path = Path::new(CREDENTIALS_NAME);
        if !path.exists() {
            let store = CredentialStore::default();
            write(path, to_string_pretty(&store)?)?;
            info!("The credentials file was created.");
            info!(
                "Add an entry whose Password field holds your Flickr API key, and reference it from {CONFIG_NAME}."
            );
            return Ok(store);
        }

        Ok(from_str(&read_to_string(path)?)?)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CredentialProvider for CredentialStore {
    fn get_credentials(&self, name: &str) -> FlickrResult<String> {
        if self.entries.is_empty() {
            return Err(FlickrError::Configuration(
                "No credentials provided.".to_string(),
            ));
        }

        let entry = self.entries.get(name).ok_or_else(|| {
            FlickrError::Configuration(format!("No credential entry named \"{name}\"."))
        })?;

        if entry.password.is_empty() {
            return Err(FlickrError::Configuration(format!(
                "Credential entry \"{name}\" has an empty Password field."
            )));
        }

        Ok(entry.password.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> Config {
        from_str(json).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = config("{}");
        assert_eq!(config.search_term(), "");
        assert_eq!(config.num_images(), 10);
        assert_eq!(config.credential_name(), "");
    }

    #[test]
    fn test_validate_rejects_out_of_range_counts() {
        let config = config(r#"{"numImages": 0, "credentialName": "flickr"}"#);
        assert!(matches!(
            config.validate(),
            Err(FlickrError::Configuration(_))
        ));

        let config = self::config(r#"{"numImages": 20001, "credentialName": "flickr"}"#);
        assert!(config.validate().is_err());

        let config = self::config(r#"{"numImages": 20000, "credentialName": "flickr"}"#);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_selected_credential() {
        let config = config(r#"{"numImages": 10}"#);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Credentials not selected."));
    }

    #[test]
    fn test_empty_store_reports_no_credentials() {
        let store: CredentialStore = from_str("{}").unwrap();
        assert!(store.is_empty());
        let err = store.get_credentials("flickr").unwrap_err();
        assert!(err.to_string().contains("No credentials provided."));
    }

    #[test]
    fn test_store_resolves_password_as_secret() {
        let store: CredentialStore =
            from_str(r#"{"flickr": {"Username": "ignored", "Password": "api-key"}}"#).unwrap();
        assert_eq!(store.get_credentials("flickr").unwrap(), "api-key");

        let err = store.get_credentials("other").unwrap_err();
        assert!(matches!(err, FlickrError::Configuration(_)));
    }

    #[test]
    fn test_store_rejects_empty_password() {
        let store: CredentialStore =
            from_str(r#"{"flickr": {"Username": "u", "Password": ""}}"#).unwrap();
        assert!(store.get_credentials("flickr").is_err());
    }
}
