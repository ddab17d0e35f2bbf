use std::sync::{Arc, Mutex};

use actix_web::{error::BlockingError, web};
use anyhow::anyhow;
use chrono::Duration;

use crate::{
    config::Config,
    dashboard::Dashboard,
    storage::{BookingStorage, KvStorage, MemoryStore},
};

/// Shared by every worker; storage calls run on the blocking pool.
#[derive(Clone)]
pub struct AppState {
    storage: Arc<dyn BookingStorage>,
    dashboard: Arc<Mutex<Dashboard>>,
    booking: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(storage: Arc<dyn BookingStorage>, config: &Config) -> Self {
        Self {
            storage,
            dashboard: Arc::new(Mutex::new(Dashboard::new(Duration::seconds(
                config.refresh_secs,
            )))),
            booking: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory(config: &Config) -> Self {
        let storage = KvStorage::with_daily_limit(MemoryStore::new(), config.daily_limit);
        Self::new(Arc::new(storage), config)
    }

    pub async fn run<F, T>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&dyn BookingStorage) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        unblock(web::block(move || f(storage.as_ref())).await)
    }

    /// Like [`run`](Self::run), one booking at a time, so that checking a slot
    /// and storing the reservation cannot interleave with another booking.
    pub async fn run_booking<F, T>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&dyn BookingStorage) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        let booking = Arc::clone(&self.booking);
        unblock(web::block(move || exclusive(&booking, || f(storage.as_ref()))).await)
    }

    /// Like [`run`](Self::run), holding the admin dashboard for the duration.
    pub async fn with_dashboard<F, T>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&dyn BookingStorage, &mut Dashboard) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        let dashboard = Arc::clone(&self.dashboard);
        unblock(
            web::block(move || {
                let mut dashboard = dashboard
                    .lock()
                    .map_err(|_| anyhow!("Dashboard is unavailable"))?;
                f(storage.as_ref(), &mut dashboard)
            })
            .await,
        )
    }
}

fn exclusive<T>(
    lock: &Mutex<()>,
    f: impl FnOnce() -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let _guard = lock.lock().map_err(|_| anyhow!("Booking is unavailable"))?;
    f()
}

fn unblock<T>(result: Result<T, BlockingError<anyhow::Error>>) -> anyhow::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(BlockingError::Error(err)) => Err(err),
        Err(BlockingError::Canceled) => Err(anyhow!("Storage worker stopped")),
    }
}
