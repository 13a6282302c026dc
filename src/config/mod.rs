//! The persisted configuration which decides whether console output is
//! numbered.
//!
//! Configuration is stored as a small YAML document:
//!
//! ```yaml
//! enableLinenumber: true
//! ```
//!
//! It is loaded once when the process starts and passed by reference to
//! whatever creates annotators; there is no global configuration object.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::result::ConfigResult;

mod error;

pub use error::ConfigError;

/// The label shown next to the setting wherever it is presented to a user.
pub const DISPLAY_NAME: &str = "Enable Line number in Console log";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "enableLinenumber", default)]
    enable_linenumber: bool,
}

impl Settings {
    pub fn new(enable_linenumber: bool) -> Settings {
        Settings { enable_linenumber }
    }

    pub fn enable_linenumber(&self) -> bool {
        self.enable_linenumber
    }

    pub fn set_enable_linenumber(&mut self, enable: bool) {
        self.enable_linenumber = enable
    }

    /// Loads settings from the given reader.  An empty document is treated
    /// as the default settings.
    pub fn read<R: Read>(mut reader: R) -> ConfigResult<Settings> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        if text.trim().is_empty() {
            return Ok(Settings::default());
        }

        let settings: Settings = serde_yaml::from_str(&text)?;
        Ok(settings)
    }

    /// Writes the settings to the given writer
    pub fn write<W: Write>(&self, writer: W) -> ConfigResult<()> {
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

/// Owns the [`Settings`] along with the file they are persisted to.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Loads the settings persisted at `path`.  If nothing has been saved
    /// there yet, the default settings are used.
    pub fn load(path: &Path) -> ConfigResult<SettingsStore> {
        let settings = match File::open(path) {
            Ok(file) => Settings::read(file)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No configuration at {}, using defaults", path.display());
                Settings::default()
            }
            Err(e) => return Err(e.into()),
        };

        debug!("Loaded configuration from {}: {:?}", path.display(), settings);
        Ok(SettingsStore {
            path: path.to_path_buf(),
            settings,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change the settings for this process only; nothing is persisted until
    /// [`SettingsStore::save`] is called.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Persist the current settings.
    pub fn save(&self) -> ConfigResult<()> {
        let file = File::create(&self.path)?;
        self.settings.write(file)?;
        info!("Saved configuration to {}", self.path.display());
        Ok(())
    }

    /// Update whether line numbering is enabled and persist the change.
    /// Annotators which already exist are not affected.
    pub fn configure(&mut self, enable: bool) -> ConfigResult<()> {
        self.settings.set_enable_linenumber(enable);
        self.save()
    }
}
