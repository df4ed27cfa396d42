use std::ops::Deref;
use std::sync::{Arc, Mutex};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::{AppError, Result};

/// Fixed set of client handles shared by concurrent tasks.
///
/// `acquire` waits while every handle is in use. A handle goes back to the
/// pool when its [`PooledClient`] is dropped, on success, on error, and on
/// panic alike.
pub struct ClientPool<C> {
    idle: Mutex<Vec<C>>,
    permits: Arc<Semaphore>,
    size: usize,
}

impl<C: Send + 'static> ClientPool<C> {
    pub fn new(clients: Vec<C>) -> Arc<Self> {
        let size = clients.len();
        Arc::new(Self {
            idle: Mutex::new(clients),
            permits: Arc::new(Semaphore::new(size)),
            size,
        })
    }

    /// Handles not currently lent out.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub async fn acquire(self: &Arc<Self>) -> Result<PooledClient<C>> {
        if self.size == 0 {
            return Err(AppError::Config("client pool is empty".to_string()));
        }
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| AppError::Internal(format!("client pool closed: {}", e)))?;

        let client = self
            .idle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop()
            .ok_or_else(|| AppError::Internal("client pool out of handles".to_string()))?;

        Ok(PooledClient {
            client: Some(client),
            pool: Arc::clone(self),
            _permit: permit,
        })
    }

    fn release(&self, client: C) {
        self.idle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(client);
    }
}

/// A handle borrowed from a [`ClientPool`].
pub struct PooledClient<C: Send + 'static> {
    client: Option<C>,
    pool: Arc<ClientPool<C>>,
    // Dropped after the handle is pushed back.
    _permit: OwnedSemaphorePermit,
}

impl<C: Send + 'static> Deref for PooledClient<C> {
    type Target = C;

    fn deref(&self) -> &C {
        // Only taken in drop.
        match &self.client {
            Some(c) => c,
            None => unreachable!("pooled client used after release"),
        }
    }
}

impl<C: Send + 'static> Drop for PooledClient<C> {
    fn drop(&mut self) {
        if let Some(client) = self.client.take() {
            self.pool.release(client);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_acquire_and_release() {
        let pool = ClientPool::new(vec![1u32, 2]);
        assert_eq!(pool.available(), 2);

        let a = pool.acquire().await.unwrap();
        let b = pool.acquire().await.unwrap();
        assert_eq!(pool.available(), 0);
        assert_ne!(*a, *b);

        drop(a);
        assert_eq!(pool.available(), 1);
        drop(b);
        assert_eq!(pool.available(), 2);
    }

    #[tokio::test]
    async fn test_acquire_waits_for_release() {
        let pool = ClientPool::new(vec!["only"]);
        let held = pool.acquire().await.unwrap();

        let waiter = {
            let pool = pool.clone();
            tokio::spawn(async move { *pool.acquire().await.unwrap() })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(held);
        let got = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got, "only");
    }

    #[tokio::test]
    async fn test_handle_returned_after_panic() {
        let pool = ClientPool::new(vec![0u8]);
        let task = {
            let pool = pool.clone();
            tokio::spawn(async move {
                let _client = pool.acquire().await.unwrap();
                panic!("boom");
            })
        };
        assert!(task.await.is_err());
        assert_eq!(pool.available(), 1);
        assert!(pool.acquire().await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_pool_errors() {
        let pool: Arc<ClientPool<u8>> = ClientPool::new(vec![]);
        assert!(matches!(pool.acquire().await, Err(AppError::Config(_))));
    }
}
