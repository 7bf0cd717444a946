use poh_store::StoreError;
use poh_types::{BlockHash, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsensusError {
    #[error("validator {0} not found")]
    ValidatorNotFound(UserId),

    #[error("block {0} not found")]
    BlockNotFound(BlockHash),

    #[error("block {0} is already finalized")]
    BlockAlreadyFinalized(BlockHash),

    #[error("insufficient validator level: have {have}, required {required}")]
    InsufficientValidatorLevel { have: u8, required: u8 },

    #[error("validator {validator} already validated block {block}")]
    AlreadyValidated { block: BlockHash, validator: UserId },

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
