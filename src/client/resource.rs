use crate::client::error::ClientError;
use std::{
    future::Future,
    pin::Pin,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::debug;

type Producer<D, T> =
    Arc<dyn Fn(D) -> Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send>> + Send + Sync>;

/// Snapshot of an asynchronous load.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    fn pending() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

/// Fetches started for the current dependency generation and not yet
/// finished.
#[derive(Default)]
struct InFlight {
    generation: u64,
    pending: usize,
}

struct Shared<D, T> {
    producer: Producer<D, T>,
    deps: Mutex<D>,
    in_flight: Mutex<InFlight>,
    mounted: AtomicBool,
    state: watch::Sender<FetchState<T>>,
}

/// Loads a value from a producer, reloading whenever the dependencies
/// change.
///
/// Dropping the resource unmounts it: fetches still in flight complete but
/// their results are discarded.
pub struct Resource<D, T> {
    shared: Arc<Shared<D, T>>,
}

impl<D, T> Resource<D, T>
where
    D: Clone + PartialEq + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates the resource and starts the first fetch. Must be called
    /// inside a tokio runtime.
    pub fn new<F, Fut>(deps: D, producer: F) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let producer: Producer<D, T> = Arc::new(move |deps| Box::pin(producer(deps)));
        let (state, _) = watch::channel(FetchState::pending());
        let resource = Self {
            shared: Arc::new(Shared {
                producer,
                deps: Mutex::new(deps),
                in_flight: Mutex::new(InFlight::default()),
                mounted: AtomicBool::new(true),
                state,
            }),
        };
        resource.refetch();
        resource
    }

    pub fn state(&self) -> FetchState<T> {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }

    /// Replaces the dependencies. Returns the spawned fetch when they
    /// differ from the current ones, `None` when nothing changed.
    pub fn set_deps(&self, deps: D) -> Option<JoinHandle<()>> {
        {
            let mut current = self
                .shared
                .deps
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if *current == deps {
                return None;
            }
            *current = deps;
        }
        {
            let mut in_flight = self.shared.lock_in_flight();
            in_flight.generation += 1;
            in_flight.pending = 0;
        }
        Some(self.refetch())
    }

    /// Runs the producer again with the current dependencies. Calls are
    /// not de-duplicated; `loading` stays set until every fetch of the
    /// current generation has finished.
    pub fn refetch(&self) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let deps = shared
            .deps
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        let generation = {
            let mut in_flight = shared.lock_in_flight();
            in_flight.pending += 1;
            in_flight.generation
        };
        shared.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        let fetch = (shared.producer)(deps);

        tokio::spawn(async move {
            let result = fetch.await;
            if !shared.mounted.load(Ordering::SeqCst) {
                debug!("resource unmounted; discarding fetch result");
                return;
            }
            let mut in_flight = shared.lock_in_flight();
            if in_flight.generation != generation {
                debug!("dependencies changed; discarding stale fetch result");
                return;
            }
            in_flight.pending = in_flight.pending.saturating_sub(1);
            let still_loading = in_flight.pending > 0;
            shared.state.send_modify(|state| {
                state.loading = still_loading;
                match result {
                    Ok(data) => {
                        state.data = Some(data);
                        state.error = None;
                    }
                    Err(err) => state.error = Some(err.to_string()),
                }
            });
        })
    }
}

impl<D, T> Shared<D, T> {
    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, InFlight> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<D, T> Drop for Resource<D, T> {
    fn drop(&mut self) {
        self.shared.mounted.store(false, Ordering::SeqCst);
    }
}
