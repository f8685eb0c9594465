use anyhow::Error;
use console::Term;

use crate::flickr::FlickrWebConnector;
use crate::flickr::error::FlickrError;
use crate::flickr::io::{Config, CredentialProvider, CredentialStore};
use crate::flickr::sender::RequestSender;

/// The name of the cargo package.
const NAME: &str = env!("CARGO_PKG_NAME");

/// The version of the cargo package.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A program class that handles the flow of the downloader and the steps of
/// execution.
pub(crate) struct Program;

impl Program {
    /// Creates a new instance of the program.
    pub(crate) fn new() -> Self {
        Self
    }

    /// Runs the downloader program.
    pub(crate) fn run(&self) -> Result<(), Error> {
        Term::stdout().set_title("flickr downloader");
        trace!("Starting flickr downloader...");
        trace!("Program Name: {}", NAME);
        trace!("Program Version: {}", VERSION);

        // Check the config file and ensure that it is created.
        trace!("Checking if config file exists...");
        if !Config::config_exists() {
            info!("Creating config file...");
            Config::create_config()?;
            info!(
                "The config file has been created. Fill in the search term, the number of images, and the credential entry name before running again."
            );
            return Ok(());
        }

        let config = Config::get()?;
        trace!("Configuration loaded...");
        trace!("Search Term:    \"{}\"", config.search_term());
        trace!("Num Images:     \"{}\"", config.num_images());

        // Fail-fast validation of the configuration and credentials happens
        // before any network access.
        config.validate()?;

        let store = CredentialStore::load()?;
        if store.is_empty() {
            return Err(FlickrError::Configuration("No credentials provided.".to_string()).into());
        }
        let api_key = store.get_credentials(config.credential_name())?;
        trace!("API Key: {}", "*".repeat(api_key.len()));

        let request_sender = RequestSender::new(&api_key);
        let mut connector = FlickrWebConnector::new(&request_sender);
        let table = connector.execute(config)?;

        if table.is_empty() {
            info!("No images matched the search term.");
        }
        let payload: usize = table.rows().iter().map(|row| row.png_bytes().len()).sum();
        trace!("Total decoded payload: {payload} bytes");
        info!(
            "Emitted table with {} rows in column {}.",
            table.len(),
            console::style(format!("\"{}\"", table.column_name()))
                .color256(39)
                .italic()
        );

        Ok(())
    }
}
