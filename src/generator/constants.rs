// Configuration constants for the generator module

/// Largest slot count a run may request; records for more values no longer fit a word
pub const MAX_GENERATED_VALUES: usize = 11;
/// Left-hand expressions expanded per parallel batch
pub const CANDIDATE_BATCH_SIZE: usize = 256;
/// Admitted expressions between progress log lines
pub const PROGRESS_LOG_INTERVAL: usize = 100_000;
/// Most expressions a store reserves room for up front
pub const CAPACITY_HINT_LIMIT: usize = 1 << 22;
