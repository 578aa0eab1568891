use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 9;

/// Source of opaque transaction identifiers. Every call yields a fresh id.
pub trait TransactionIdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// `txn_<unix millis>_<9 random base36 chars>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTransactionIds;

impl TransactionIdGenerator for RandomTransactionIds {
    fn next_id(&self) -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..RANDOM_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        format!("txn_{}_{}", Utc::now().timestamp_millis(), suffix)
    }
}
