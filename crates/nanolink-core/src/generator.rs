use crate::alias::Alias;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of auto-generated aliases.
pub const ALIAS_LENGTH: usize = 6;

/// Trait for generating short aliases.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness against the store is the caller's concern: the store's create
/// operation detects collisions with live records and retries.
pub trait Generator: Send + Sync + 'static {
    /// Generates a new candidate alias.
    fn generate(&self) -> Alias;
}

/// Generates fixed-length aliases drawn uniformly from the 62-symbol
/// alphanumeric alphabet (lowercase, uppercase, digits).
#[derive(Debug, Clone, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> Alias {
        let alias: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ALIAS_LENGTH)
            .map(char::from)
            .collect();
        Alias::new_unchecked(alias)
    }
}

/// A sequential alias generator: "seq000000", "seq000001", and so on.
///
/// Never collides within a single instance, which makes it useful in tests
/// where generated aliases must be predictable.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: std::sync::atomic::AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(0),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> Alias {
        let count = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Alias::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
