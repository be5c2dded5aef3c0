use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use crate::dashboard::view::DashboardView;
use crate::services::SummarySource;

/// A mounted dashboard view. `active` only changes while `view` is locked.
pub struct ViewHandle {
    id: Uuid,
    view: Mutex<DashboardView>,
    active: AtomicBool,
    last_seen: std::sync::Mutex<Instant>,
}

impl ViewHandle {
    fn new(today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            view: Mutex::new(DashboardView::new(today)),
            active: AtomicBool::new(true),
            last_seen: std::sync::Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub async fn lock(&self) -> MutexGuard<'_, DashboardView> {
        self.touch();
        self.view.lock().await
    }

    /// Locks the view unless it has been torn down.
    pub async fn lock_active(&self) -> Option<MutexGuard<'_, DashboardView>> {
        let view = self.lock().await;
        self.is_active().then_some(view)
    }

    pub fn idle_for(&self) -> Duration {
        let last_seen = *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        last_seen.elapsed()
    }

    fn touch(&self) {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    async fn deactivate(&self) {
        let _view = self.view.lock().await;
        self.active.store(false, Ordering::SeqCst);
    }
}

/// Runs the one summary load of a view and applies its outcome.
///
/// A failed load keeps whatever record the view already had. Either way the
/// loading flag is cleared, unless the view was torn down in the meantime,
/// in which case the outcome is dropped untouched.
pub async fn load_summary(source: &dyn SummarySource, handle: &ViewHandle) {
    let outcome = source.fetch_summary().await;

    let mut view = handle.lock().await;
    if !handle.is_active() {
        tracing::debug!("Discarding summary for torn-down view {}", handle.id());
        return;
    }

    match outcome {
        Ok(record) => view.apply_record(record),
        Err(e) => tracing::error!("Error loading dashboard summary for view {}: {}", handle.id(), e),
    }
    view.finish_loading();
}

#[derive(Clone)]
pub struct ViewRegistry {
    views: Arc<RwLock<HashMap<Uuid, Arc<ViewHandle>>>>,
    source: Arc<dyn SummarySource>,
}

impl ViewRegistry {
    pub fn new(source: Arc<dyn SummarySource>) -> Self {
        Self {
            views: Arc::new(RwLock::new(HashMap::new())),
            source,
        }
    }

    /// Creates a view and starts its single summary load in the background.
    pub async fn mount(&self, today: NaiveDate) -> (Arc<ViewHandle>, JoinHandle<()>) {
        let handle = Arc::new(ViewHandle::new(today));
        self.views.write().await.insert(handle.id(), handle.clone());
        tracing::info!("Mounted dashboard view {}", handle.id());

        let source = self.source.clone();
        let task_handle = handle.clone();
        let load = tokio::spawn(async move {
            load_summary(source.as_ref(), &task_handle).await;
        });

        (handle, load)
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<ViewHandle>> {
        self.views.read().await.get(&id).cloned()
    }

    /// Removes a view. Returns false when no such view is mounted.
    pub async fn teardown(&self, id: Uuid) -> bool {
        let removed = self.views.write().await.remove(&id);
        match removed {
            Some(handle) => {
                handle.deactivate().await;
                tracing::info!("Tore down dashboard view {}", id);
                true
            }
            None => false,
        }
    }

    /// Tears down every view untouched for at least `max_idle`. Pending loads
    /// of evicted views are discarded like on any other teardown.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let idle: Vec<Uuid> = self
            .views
            .read()
            .await
            .values()
            .filter(|handle| handle.idle_for() >= max_idle)
            .map(|handle| handle.id())
            .collect();

        let mut evicted = 0;
        for id in idle {
            if self.teardown(id).await {
                evicted += 1;
            }
        }
        evicted
    }

    /// Periodically evicts idle views until the returned task is aborted.
    pub fn spawn_sweeper(&self, max_idle: Duration, every: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = registry.evict_idle(max_idle).await;
                if evicted > 0 {
                    tracing::info!("Evicted {} idle dashboard views", evicted);
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.views.read().await.is_empty()
    }
}
