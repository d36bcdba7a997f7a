use thiserror::Error;
use tvcm_core::CoreError;
use tvcm_mobility::MobilityError;
use tvcm_social::SocialError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("social overlay error: {0}")]
    Social(#[from] SocialError),
}

pub type SimResult<T> = Result<T, SimError>;
