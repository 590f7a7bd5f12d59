//! Redis-backed mapping repository.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, Script, aio::ConnectionManager};
use tokio_retry::{
    Retry,
    strategy::{ExponentialBackoff, jitter},
};
use tracing::{debug, info, warn};

use crate::domain::entities::Mapping;
use crate::domain::repositories::{InsertOutcome, MappingRepository};
use crate::error::{AppError, map_redis_error};

const URL_PREFIX: &str = "url:";
const ALIAS_PREFIX: &str = "alias:";

/// Keys fetched per `SCAN` round trip.
const SCAN_BATCH: usize = 100;

/// Removes `KEYS[1]` and `KEYS[2]` only while `KEYS[1]` still holds `ARGV[1]`.
const DELETE_IF_MATCHES: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1], KEYS[2])
end
return 0
"#;

/// Redis implementation of [`MappingRepository`].
///
/// Layout:
///
/// - `url:{original_url}` → `alias`
/// - `alias:{alias}` → `original_url`
///
/// Both keys are created with a single `MSETNX` and removed by one Lua script
/// that first checks the primary record still holds the expected alias.
/// `ConnectionManager` multiplexes one connection and reconnects on its own;
/// cloning it is cheap.
#[derive(Clone)]
pub struct RedisMappingRepository {
    conn: ConnectionManager,
    delete_script: Script,
}

impl RedisMappingRepository {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// The initial connection is retried with exponential backoff up to
    /// `retries` extra attempts. Requests themselves are never retried.
    ///
    /// # Errors
    ///
    /// Returns the last Redis error if the URL is invalid or every attempt fails.
    pub async fn connect(redis_url: &str, retries: usize) -> RedisResult<Self> {
        let client = Client::open(redis_url)?;

        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(retries);

        let mut conn = Retry::spawn(strategy, || {
            let client = client.clone();
            async move {
                ConnectionManager::new(client).await.inspect_err(|e| {
                    warn!("Redis connection attempt failed: {}", e);
                })
            }
        })
        .await?;

        conn.ping::<String>().await?;

        info!("Connected to Redis");

        Ok(Self {
            conn,
            delete_script: Script::new(DELETE_IF_MATCHES),
        })
    }

    fn url_key(original_url: &str) -> String {
        format!("{URL_PREFIX}{original_url}")
    }

    fn alias_key(alias: &str) -> String {
        format!("{ALIAS_PREFIX}{alias}")
    }
}

/// Pairs one `SCAN` batch of primary keys with the `MGET` answers for them.
///
/// A key deleted between the two commands comes back as `None` and is skipped.
fn mappings_from_batch(keys: &[String], aliases: Vec<Option<String>>) -> Vec<Mapping> {
    keys.iter()
        .zip(aliases)
        .filter_map(|(key, alias)| {
            let url = key.strip_prefix(URL_PREFIX)?;
            alias.map(|alias| Mapping::new(url, alias))
        })
        .collect()
}

#[async_trait]
impl MappingRepository for RedisMappingRepository {
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Mapping>, AppError> {
        let mut conn = self.conn.clone();

        let alias: Option<String> = conn
            .get(Self::url_key(original_url))
            .await
            .map_err(map_redis_error)?;

        Ok(alias.map(|alias| Mapping::new(original_url, alias)))
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Mapping>, AppError> {
        let mut conn = self.conn.clone();

        let original_url: Option<String> = conn
            .get(Self::alias_key(alias))
            .await
            .map_err(map_redis_error)?;

        Ok(original_url.map(|url| Mapping::new(url, alias)))
    }

    async fn insert_if_absent(&self, mapping: &Mapping) -> Result<InsertOutcome, AppError> {
        let url_key = Self::url_key(&mapping.original_url);
        let mut conn = self.conn.clone();

        let written: bool = redis::cmd("MSETNX")
            .arg(&url_key)
            .arg(&mapping.alias)
            .arg(Self::alias_key(&mapping.alias))
            .arg(&mapping.original_url)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        if written {
            debug!("SET {} -> {}", mapping.original_url, mapping.alias);
            return Ok(InsertOutcome::Inserted);
        }

        let url_taken: bool = conn.exists(&url_key).await.map_err(map_redis_error)?;

        if url_taken {
            Ok(InsertOutcome::UrlTaken)
        } else {
            Ok(InsertOutcome::AliasTaken)
        }
    }

    async fn delete(&self, mapping: &Mapping) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();

        let removed: i64 = self
            .delete_script
            .key(Self::url_key(&mapping.original_url))
            .key(Self::alias_key(&mapping.alias))
            .arg(&mapping.alias)
            .invoke_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        debug!("DEL {} ({} removed)", mapping.original_url, removed);

        Ok(removed > 0)
    }

    async fn list(&self) -> Result<Vec<Mapping>, AppError> {
        let mut conn = self.conn.clone();
        let mut mappings = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(format!("{URL_PREFIX}*"))
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(map_redis_error)?;

            if !keys.is_empty() {
                let aliases: Vec<Option<String>> =
                    conn.mget(&keys).await.map_err(map_redis_error)?;

                mappings.extend(mappings_from_batch(&keys, aliases));
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(mappings)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<String>().await.is_ok()
    }
}
