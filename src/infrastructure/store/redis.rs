//! Redis backend

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::future::Future;
use std::time::Duration;

use crate::application::errors::StorageError;
use crate::domain::traits::KvBackend;

/// Networked key-value backend over a shared Redis connection manager.
///
/// Every operation runs under a bounded timeout so an unhealthy server
/// degrades the conversation quickly instead of stalling it. The manager
/// reconnects on its own; callers clone it per operation.
pub struct RedisBackend {
    manager: ConnectionManager,
    op_timeout: Duration,
}

impl RedisBackend {
    pub async fn connect(url: &str, op_timeout: Duration) -> Result<Self, StorageError> {
        let client =
            redis::Client::open(url).map_err(|e| StorageError::Connection(e.to_string()))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        tracing::info!("connected to redis profile store");
        Ok(Self {
            manager,
            op_timeout,
        })
    }

    async fn bounded<T, F>(&self, op: &str, fut: F) -> Result<T, StorageError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(StorageError::Backend(format!("{}: {}", op, e))),
            Err(_) => Err(StorageError::Timeout(op.to_string())),
        }
    }
}

#[async_trait]
impl KvBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = self
            .bounded("GET", redis::cmd("GET").arg(key).query_async(&mut conn))
            .await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        let mut conn = self.manager.clone();
        let ttl_secs = ttl.as_secs().max(1);
        let _: () = self
            .bounded(
                "SETEX",
                redis::cmd("SETEX")
                    .arg(key)
                    .arg(ttl_secs)
                    .arg(value)
                    .query_async(&mut conn),
            )
            .await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let mut conn = self.manager.clone();
        let found: i64 = self
            .bounded(
                "EXISTS",
                redis::cmd("EXISTS").arg(key).query_async(&mut conn),
            )
            .await?;
        Ok(found > 0)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let mut conn = self.manager.clone();
        let _: String = self
            .bounded("PING", redis::cmd("PING").query_async(&mut conn))
            .await?;
        Ok(())
    }
}
