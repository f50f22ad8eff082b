use thiserror::Error;

use crate::weather::ProviderFailure;

/// Argument problems caught before a command runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Legacy weather syntax was not `hava durumu <place>`
    WeatherUsage,
    /// A required argument is absent
    MissingParameter,
}

/// Every way a command invocation can fail
///
/// All of these are turned into a reply at the dispatcher; none reach the process level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("weather API key is not configured")]
    ConfigMissing,
    #[error("validation failed: {0:?}")]
    ValidationFailed(Validation),
    #[error("place not found: {0}")]
    NotFound(String),
    #[error("weather provider error: {0:?}")]
    ProviderError(ProviderFailure),
    #[error("could not reach the weather provider")]
    NetworkError,
    #[error("command requires a guild context")]
    GuildRequired,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl CommandError {
    /// The fixed text shown to the user for this error
    ///
    /// # Arguments
    /// * `prefix` - The legacy command prefix, used in usage hints
    pub fn user_message(&self, prefix: &str) -> String {
        match self {
            CommandError::ConfigMissing => {
                "Hava durumu servisi şu anda kullanılamıyor. API anahtarı bulunamadı.".to_string()
            }
            CommandError::ValidationFailed(Validation::WeatherUsage) => format!(
                "Kullanım: `{p}hava durumu şehir_adı`\nÖrnek: `{p}hava durumu İstanbul`",
                p = prefix
            ),
            CommandError::ValidationFailed(Validation::MissingParameter) => {
                "❌ Eksik parametre. Komut kullanımını kontrol edin.".to_string()
            }
            CommandError::NotFound(place) => {
                format!("❌ \"{}\" şehri bulunamadı. Şehir adını kontrol edin.", place)
            }
            CommandError::ProviderError(_) => {
                "❌ Hava durumu bilgisi alınamadı. Lütfen daha sonra tekrar deneyin.".to_string()
            }
            CommandError::NetworkError => {
                "❌ Hava durumu servisine bağlanılamadı. İnternet bağlantınızı kontrol edin."
                    .to_string()
            }
            CommandError::GuildRequired => {
                "Bu komut sadece sunucularda kullanılabilir.".to_string()
            }
            CommandError::UnknownCommand(_) => format!(
                "❌ Geçersiz komut. `{p}ping`, `{p}sunucu` veya `{p}hava durumu şehir` komutlarını kullanabilirsiniz.",
                p = prefix
            ),
            CommandError::Unexpected(_) => "❌ Beklenmeyen bir hata oluştu.".to_string(),
        }
    }
}
