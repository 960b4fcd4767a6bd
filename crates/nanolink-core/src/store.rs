use crate::alias::Alias;
use crate::error::{Result, StoreError};
use crate::generator::Generator;
use crate::record::UrlRecord;
use jiff::{SignedDuration, Timestamp};
use parking_lot::RwLock;
use std::collections::HashMap;

/// TTL applied when a create request does not specify one.
pub const DEFAULT_TTL: SignedDuration = SignedDuration::from_secs(120);

/// Parameters for creating a new alias mapping.
#[derive(Debug, Clone)]
pub struct CreateParams {
    /// The redirect target. Must be non-empty.
    pub long_url: String,
    /// Optional caller-supplied alias. Overwrites any existing record at
    /// that alias (last write wins).
    pub custom_alias: Option<Alias>,
    /// Optional TTL; the store default applies when absent.
    pub ttl: Option<SignedDuration>,
}

/// Parameters for updating an existing alias mapping.
#[derive(Debug, Clone, Default)]
pub struct UpdateParams {
    /// Moves the record to this alias, removing the old key. The move is
    /// atomic: no observer sees both keys or neither.
    pub new_alias: Option<Alias>,
    /// Replaces the TTL. Still measured from the original creation time.
    pub ttl: Option<SignedDuration>,
}

/// Read-only analytics view of one alias.
#[derive(Debug, Clone)]
pub struct AliasAnalytics {
    pub alias: String,
    pub long_url: String,
    pub access_count: u64,
    /// Access timestamps, most recent first, at most
    /// [`MAX_ACCESS_HISTORY`](crate::record::MAX_ACCESS_HISTORY) entries.
    pub access_times: Vec<Timestamp>,
}

/// Concurrency-safe keyed collection of URL records.
///
/// All mutation of record state goes through this type; callers (request
/// handlers and the expiration reaper alike) never touch the map directly.
/// A single `RwLock` guards the whole collection, which keeps every
/// operation atomic to every observer; in particular a rename is never
/// visible as "both keys present" or "neither key present".
///
/// Expiry is enforced twice: lazily here on every read path, and actively
/// by the [`Reaper`](crate::reaper::Reaper) which calls [`sweep_expired`]
/// periodically. The lazy check makes expiry monotonic regardless of the
/// sweep interval; the sweep keeps memory bounded for aliases that are
/// never looked up again.
///
/// [`sweep_expired`]: AliasStore::sweep_expired
pub struct AliasStore {
    entries: RwLock<HashMap<String, UrlRecord>>,
    generator: Box<dyn Generator>,
    default_ttl: SignedDuration,
}

impl AliasStore {
    /// Creates a store with the default TTL of [`DEFAULT_TTL`].
    pub fn new(generator: impl Generator) -> Self {
        Self::with_default_ttl(generator, DEFAULT_TTL)
    }

    pub fn with_default_ttl(generator: impl Generator, default_ttl: SignedDuration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            generator: Box::new(generator),
            default_ttl,
        }
    }

    /// Creates a new alias mapping and returns the final alias, which is
    /// the caller's own when one was supplied or a generated one otherwise.
    ///
    /// Generated aliases are retried until one does not collide with a live
    /// record; an alias occupying an expired slot is considered free. A
    /// custom alias performs no collision check: last write wins.
    pub fn create(&self, params: CreateParams) -> Result<Alias> {
        if params.long_url.is_empty() {
            return Err(StoreError::InvalidInput(
                "long_url must not be empty".to_string(),
            ));
        }

        let ttl = params.ttl.unwrap_or(self.default_ttl);
        if ttl <= SignedDuration::ZERO {
            return Err(StoreError::InvalidInput(
                "ttl must be positive".to_string(),
            ));
        }

        let now = Timestamp::now();
        let mut entries = self.entries.write();

        let alias = match params.custom_alias {
            Some(alias) => alias,
            None => self.next_free_alias(&entries, now),
        };

        entries.insert(
            alias.as_str().to_owned(),
            UrlRecord::new(params.long_url, now, ttl),
        );

        Ok(alias)
    }

    /// Resolves an alias to its long URL, recording the access.
    ///
    /// Fails with `NotFound` if the alias is absent or its record has
    /// expired, whether or not the reaper has swept it yet.
    pub fn resolve(&self, alias: &str) -> Result<String> {
        let now = Timestamp::now();
        let mut entries = self.entries.write();

        let record = entries
            .get_mut(alias)
            .filter(|record| !record.is_expired(now))
            .ok_or_else(|| StoreError::NotFound(alias.to_owned()))?;

        record.record_access(now);
        Ok(record.long_url.clone())
    }

    /// Returns the analytics view for an alias without mutating it.
    ///
    /// Same `NotFound` condition as [`resolve`](AliasStore::resolve).
    pub fn analytics(&self, alias: &str) -> Result<AliasAnalytics> {
        let now = Timestamp::now();
        let entries = self.entries.read();

        let record = entries
            .get(alias)
            .filter(|record| !record.is_expired(now))
            .ok_or_else(|| StoreError::NotFound(alias.to_owned()))?;

        Ok(AliasAnalytics {
            alias: alias.to_owned(),
            long_url: record.long_url.clone(),
            access_count: record.access_count,
            access_times: record.recent_accesses(),
        })
    }

    /// Applies a TTL change, an alias rename, or both.
    ///
    /// Fails with `NotFound` if the alias is absent or expired. A rename
    /// carries the full record state (count and history) to the new key and
    /// overwrites any live record already there, consistent with the
    /// custom-alias policy on create.
    pub fn update(&self, alias: &str, params: UpdateParams) -> Result<()> {
        let now = Timestamp::now();
        let mut entries = self.entries.write();

        let mut record = match entries.get(alias) {
            Some(record) if !record.is_expired(now) => record.clone(),
            _ => return Err(StoreError::NotFound(alias.to_owned())),
        };

        if let Some(ttl) = params.ttl {
            if ttl <= SignedDuration::ZERO {
                return Err(StoreError::InvalidInput(
                    "ttl must be positive".to_string(),
                ));
            }
            // Measured from the original creation time, not from now.
            record.ttl = ttl;
        }

        match params.new_alias {
            Some(new_alias) if new_alias.as_str() != alias => {
                entries.remove(alias);
                entries.insert(new_alias.into_string(), record);
            }
            _ => {
                entries.insert(alias.to_owned(), record);
            }
        }

        Ok(())
    }

    /// Removes an alias unconditionally.
    ///
    /// Expiry is not re-checked: deleting an expired-but-not-yet-reaped
    /// record succeeds. Fails with `NotFound` only if the alias is absent.
    pub fn delete(&self, alias: &str) -> Result<()> {
        self.entries
            .write()
            .remove(alias)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(alias.to_owned()))
    }

    /// Evicts every expired record, returning the number removed.
    ///
    /// The reaper calls this on its interval; tests call it directly to
    /// trigger a sweep deterministically.
    pub fn sweep_expired(&self) -> usize {
        let now = Timestamp::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, record| !record.is_expired(now));
        before - entries.len()
    }

    /// Number of records currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn next_free_alias(&self, entries: &HashMap<String, UrlRecord>, now: Timestamp) -> Alias {
        loop {
            let candidate = self.generator.generate();
            match entries.get(candidate.as_str()) {
                Some(record) if !record.is_expired(now) => continue,
                _ => return candidate,
            }
        }
    }
}

#[cfg(test)]
impl AliasStore {
    /// Backdates a record's creation time so expiry can be tested without
    /// sleeping.
    pub(crate) fn rewind_creation(&self, alias: &str, by: SignedDuration) {
        let mut entries = self.entries.write();
        if let Some(record) = entries.get_mut(alias) {
            record.created_at = record.created_at - by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SeqGenerator;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// Replays a fixed script of aliases, for collision tests.
    struct ScriptedGenerator {
        aliases: Mutex<VecDeque<&'static str>>,
    }

    impl ScriptedGenerator {
        fn new(aliases: impl IntoIterator<Item = &'static str>) -> Self {
            Self {
                aliases: Mutex::new(aliases.into_iter().collect()),
            }
        }
    }

    impl Generator for ScriptedGenerator {
        fn generate(&self) -> Alias {
            let alias = self
                .aliases
                .lock()
                .pop_front()
                .expect("scripted generator ran out of aliases");
            Alias::new_unchecked(alias)
        }
    }

    fn store() -> AliasStore {
        AliasStore::new(SeqGenerator::with_prefix("t"))
    }

    fn create(store: &AliasStore, long_url: &str, alias: Option<&str>) -> Alias {
        store
            .create(CreateParams {
                long_url: long_url.to_string(),
                custom_alias: alias.map(|alias| Alias::new_unchecked(alias)),
                ttl: None,
            })
            .unwrap()
    }

    #[test]
    fn create_with_generated_alias() {
        let store = store();

        let alias = create(&store, "https://example.com", None);
        assert_eq!(alias.as_str(), "t000000");
        assert_eq!(store.resolve(alias.as_str()).unwrap(), "https://example.com");
    }

    #[test]
    fn create_with_custom_alias() {
        let store = store();

        let alias = create(&store, "https://x.com", Some("home"));
        assert_eq!(alias.as_str(), "home");

        let analytics = store.analytics("home").unwrap();
        assert_eq!(analytics.long_url, "https://x.com");
        assert_eq!(analytics.access_count, 0);
        assert!(analytics.access_times.is_empty());
    }

    #[test]
    fn create_with_empty_url_fails() {
        let store = store();

        let err = store
            .create(CreateParams {
                long_url: String::new(),
                custom_alias: None,
                ttl: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn create_with_non_positive_ttl_fails() {
        let store = store();

        let err = store
            .create(CreateParams {
                long_url: "https://example.com".to_string(),
                custom_alias: None,
                ttl: Some(SignedDuration::from_secs(-1)),
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn custom_alias_overwrites_existing_record() {
        let store = store();

        create(&store, "https://first.example", Some("dup"));
        store.resolve("dup").unwrap();
        create(&store, "https://second.example", Some("dup"));

        // Last write wins, and the record state starts fresh.
        assert_eq!(store.resolve("dup").unwrap(), "https://second.example");
        assert_eq!(store.analytics("dup").unwrap().access_count, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn generated_alias_retries_on_live_collision() {
        let store = AliasStore::new(ScriptedGenerator::new(["dup", "dup", "fresh"]));

        let first = create(&store, "https://first.example", None);
        assert_eq!(first.as_str(), "dup");

        let second = create(&store, "https://second.example", None);
        assert_eq!(second.as_str(), "fresh");
        assert_eq!(store.resolve("dup").unwrap(), "https://first.example");
    }

    #[test]
    fn generated_alias_reuses_expired_slot() {
        let store = AliasStore::new(ScriptedGenerator::new(["dup", "dup"]));

        create(&store, "https://first.example", None);
        store.rewind_creation("dup", SignedDuration::from_secs(3600));

        let alias = create(&store, "https://second.example", None);
        assert_eq!(alias.as_str(), "dup");
        assert_eq!(store.resolve("dup").unwrap(), "https://second.example");
    }

    #[test]
    fn resolve_counts_accesses() {
        let store = store();
        create(&store, "https://example.com", Some("a"));

        for _ in 0..3 {
            store.resolve("a").unwrap();
        }

        let analytics = store.analytics("a").unwrap();
        assert_eq!(analytics.access_count, 3);
        assert_eq!(analytics.access_times.len(), 3);
    }

    #[test]
    fn analytics_bounds_history_to_ten_most_recent() {
        let store = store();
        create(&store, "https://example.com", Some("a"));

        for _ in 0..15 {
            store.resolve("a").unwrap();
        }

        let analytics = store.analytics("a").unwrap();
        assert_eq!(analytics.access_count, 15);
        assert_eq!(analytics.access_times.len(), 10);
        // Most recent first.
        for pair in analytics.access_times.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn analytics_does_not_mutate() {
        let store = store();
        create(&store, "https://example.com", Some("a"));
        store.resolve("a").unwrap();

        store.analytics("a").unwrap();
        store.analytics("a").unwrap();

        assert_eq!(store.analytics("a").unwrap().access_count, 1);
        assert_eq!(store.analytics("a").unwrap().access_times.len(), 1);
    }

    #[test]
    fn resolve_unknown_alias() {
        let store = store();
        let err = store.resolve("nope").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn expired_record_is_not_resolvable() {
        let store = store();
        create(&store, "https://example.com", Some("a"));
        store.rewind_creation("a", SignedDuration::from_secs(121));

        assert!(matches!(
            store.resolve("a").unwrap_err(),
            StoreError::NotFound(_)
        ));
        assert!(matches!(
            store.analytics("a").unwrap_err(),
            StoreError::NotFound(_)
        ));
        // Lazy rejection does not remove the record; that is the sweep's job.
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_extends_ttl_from_creation_time() {
        let store = store();
        create(&store, "https://example.com", Some("a"));
        store.rewind_creation("a", SignedDuration::from_secs(100));

        store
            .update(
                "a",
                UpdateParams {
                    new_alias: None,
                    ttl: Some(SignedDuration::from_secs(3600)),
                },
            )
            .unwrap();
        assert!(store.resolve("a").is_ok());

        // A new TTL shorter than the record's age expires it immediately.
        store
            .update(
                "a",
                UpdateParams {
                    new_alias: None,
                    ttl: Some(SignedDuration::from_secs(90)),
                },
            )
            .unwrap();
        assert!(matches!(
            store.resolve("a").unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn update_expired_record_fails() {
        let store = store();
        create(&store, "https://example.com", Some("a"));
        store.rewind_creation("a", SignedDuration::from_secs(121));

        let err = store.update("a", UpdateParams::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn rename_moves_record_state() {
        let store = store();
        create(&store, "https://example.com", Some("a"));
        store.resolve("a").unwrap();
        store.resolve("a").unwrap();

        store
            .update(
                "a",
                UpdateParams {
                    new_alias: Some(Alias::new_unchecked("b")),
                    ttl: None,
                },
            )
            .unwrap();

        assert!(matches!(
            store.resolve("a").unwrap_err(),
            StoreError::NotFound(_)
        ));
        let analytics = store.analytics("b").unwrap();
        assert_eq!(analytics.long_url, "https://example.com");
        assert_eq!(analytics.access_count, 2);
        assert_eq!(analytics.access_times.len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rename_to_same_alias_is_a_no_op_move() {
        let store = store();
        create(&store, "https://example.com", Some("a"));

        store
            .update(
                "a",
                UpdateParams {
                    new_alias: Some(Alias::new_unchecked("a")),
                    ttl: None,
                },
            )
            .unwrap();

        assert!(store.resolve("a").is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rename_overwrites_live_record_at_target() {
        let store = store();
        create(&store, "https://keep.example", Some("a"));
        create(&store, "https://lose.example", Some("b"));

        store
            .update(
                "a",
                UpdateParams {
                    new_alias: Some(Alias::new_unchecked("b")),
                    ttl: None,
                },
            )
            .unwrap();

        assert_eq!(store.resolve("b").unwrap(), "https://keep.example");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_present_then_absent() {
        let store = store();
        create(&store, "https://example.com", Some("a"));

        store.delete("a").unwrap();
        assert!(matches!(
            store.resolve("a").unwrap_err(),
            StoreError::NotFound(_)
        ));
        assert!(matches!(
            store.delete("a").unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn delete_expired_record_still_succeeds() {
        let store = store();
        create(&store, "https://example.com", Some("a"));
        store.rewind_creation("a", SignedDuration::from_secs(3600));

        store.delete("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn sweep_removes_only_expired_records() {
        let store = store();
        create(&store, "https://a.example", Some("a"));
        create(&store, "https://b.example", Some("b"));
        create(&store, "https://c.example", Some("c"));
        store.rewind_creation("a", SignedDuration::from_secs(3600));
        store.rewind_creation("b", SignedDuration::from_secs(3600));

        assert_eq!(store.sweep_expired(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.resolve("c").is_ok());
    }

    #[test]
    fn sweep_on_fresh_store_is_a_no_op() {
        let store = store();
        assert_eq!(store.sweep_expired(), 0);
    }

    #[test]
    fn concurrent_creates_and_resolves() {
        let store = Arc::new(store());
        let mut handles = vec![];

        for i in 0..10u64 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store
                    .create(CreateParams {
                        long_url: format!("https://example{}.com", i),
                        custom_alias: Some(Alias::new_unchecked(format!("alias-{:03}", i))),
                        ttl: None,
                    })
                    .unwrap();
            }));
        }

        for i in 0..10u64 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                let _ = store.resolve(&format!("alias-{:03}", i));
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 10);
        for i in 0..10u64 {
            let alias = format!("alias-{:03}", i);
            assert_eq!(
                store.resolve(&alias).unwrap(),
                format!("https://example{}.com", i)
            );
        }
    }
}
