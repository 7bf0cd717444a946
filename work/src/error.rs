use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkError {
    #[error("insufficient work: have {have}, required {required}")]
    InsufficientWork { have: u64, required: u64 },

    #[error("mining exhausted after {attempts} attempts at difficulty {difficulty}")]
    MiningExhausted { attempts: u64, difficulty: u32 },
}
