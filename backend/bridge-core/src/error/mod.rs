pub mod protocol;
pub mod settings;

pub use protocol::ProtocolError;
pub use settings::SettingsError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Protocol(#[from] protocol::ProtocolError),

    #[error(transparent)]
    Settings(#[from] settings::SettingsError),
}
