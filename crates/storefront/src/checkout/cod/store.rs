use super::settings::CodSettings;

/// Storage abstraction for the COD settings document so the service can be
/// exercised with in-memory adapters.
pub trait SettingsStore: Send + Sync {
    /// Fetch one consistent snapshot of the document.
    fn fetch(&self) -> Result<CodSettings, SettingsError>;
    /// Replace the document, returning the stored copy.
    fn persist(&self, settings: CodSettings) -> Result<CodSettings, SettingsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}
