use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error")]
    Config(#[from] ConfigError),

    #[error("database unavailable")]
    Database(#[from] sea_orm::DbErr),
}
