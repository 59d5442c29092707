use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;

use super::clock::Clock;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

/// Expire-after-write key/value store.
///
/// Reads never extend an entry's lifetime. Concurrent fills of the same key
/// race and the last write wins; no lock is held once a call returns.
pub struct ExpiringCache<K, V> {
    entries: Arc<DashMap<K, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
}

impl<K, V> Clone for ExpiringCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            clock: Arc::clone(&self.clock),
            default_ttl: self.default_ttl,
        }
    }
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(clock: Arc<dyn Clock>, default_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock,
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns a clone of the live value, dropping the entry if it has expired.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();

        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries
                .remove_if(key, |_, entry| entry.expires_at <= now);
        }

        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let now = self.clock.now();
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.entries.insert(key, CacheEntry { value, expires_at });
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        self.entries
            .remove(key)
            .and_then(|(_, entry)| (entry.expires_at > now).then_some(entry.value))
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::clock::ManualClock;
    use chrono::TimeZone;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn test_get_returns_value_before_expiry() {
        let clock = clock();
        let cache: ExpiringCache<String, String> =
            ExpiringCache::new(clock.clone(), Duration::from_secs(60));

        cache.insert("folder".to_string(), "info".to_string());
        clock.advance(TimeDelta::seconds(59));

        assert_eq!(cache.get("folder"), Some("info".to_string()));
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let clock = clock();
        let cache: ExpiringCache<String, String> =
            ExpiringCache::new(clock.clone(), Duration::from_secs(60));

        cache.insert("folder".to_string(), "info".to_string());
        clock.advance(TimeDelta::seconds(60));

        assert_eq!(cache.get("folder"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reads_do_not_extend_lifetime() {
        let clock = clock();
        let cache: ExpiringCache<String, u32> =
            ExpiringCache::new(clock.clone(), Duration::from_secs(10));

        cache.insert("k".to_string(), 1);
        clock.advance(TimeDelta::seconds(6));
        assert_eq!(cache.get("k"), Some(1));
        clock.advance(TimeDelta::seconds(6));

        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_last_writer_wins() {
        let cache: ExpiringCache<String, u32> =
            ExpiringCache::new(clock(), Duration::from_secs(10));

        cache.insert("k".to_string(), 1);
        cache.insert("k".to_string(), 2);

        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_custom_ttl_overrides_default() {
        let clock = clock();
        let cache: ExpiringCache<String, u32> =
            ExpiringCache::new(clock.clone(), Duration::from_secs(10));

        cache.insert_with_ttl("long".to_string(), 7, Duration::from_secs(3540));
        clock.advance(TimeDelta::seconds(3000));

        assert_eq!(cache.get("long"), Some(7));
    }

    #[test]
    fn test_purge_expired_counts_removed_entries() {
        let clock = clock();
        let cache: ExpiringCache<String, u32> =
            ExpiringCache::new(clock.clone(), Duration::from_secs(10));

        cache.insert("a".to_string(), 1);
        cache.insert_with_ttl("b".to_string(), 2, Duration::from_secs(100));
        clock.advance(TimeDelta::seconds(20));

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_remove_returns_live_value_only() {
        let clock = clock();
        let cache: ExpiringCache<String, u32> =
            ExpiringCache::new(clock.clone(), Duration::from_secs(10));

        cache.insert("live".to_string(), 1);
        cache.insert("stale".to_string(), 2);
        assert_eq!(cache.remove("live"), Some(1));

        clock.advance(TimeDelta::seconds(11));
        assert_eq!(cache.remove("stale"), None);
        assert!(cache.is_empty());
    }
}
