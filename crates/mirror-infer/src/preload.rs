use {
    crate::InferError,
    std::sync::Arc,
    tokio::sync::{Mutex, watch},
};

/// Where the background model load stands.
pub enum PreloadState<T> {
    Idle,
    Loading,
    Ready(Arc<Mutex<T>>),
    Failed(String),
}

impl<T> Clone for PreloadState<T> {
    fn clone(&self) -> Self {
        match self {
            PreloadState::Idle => PreloadState::Idle,
            PreloadState::Loading => PreloadState::Loading,
            PreloadState::Ready(model) => PreloadState::Ready(Arc::clone(model)),
            PreloadState::Failed(msg) => PreloadState::Failed(msg.clone()),
        }
    }
}

impl<T> std::fmt::Debug for PreloadState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreloadState::Idle => write!(f, "Idle"),
            PreloadState::Loading => write!(f, "Loading"),
            PreloadState::Ready(_) => write!(f, "Ready"),
            PreloadState::Failed(msg) => write!(f, "Failed({msg})"),
        }
    }
}

/// Loads one model in the background so the camera doesn't wait on it.
///
/// There is a single shared slot. The first `preload` claims it; later calls
/// while it is loading or loaded do nothing. Consumers get the model through
/// `acquire`, which waits out a running load and falls back to loading a
/// private copy when the preload failed. The preloaded model is shared and
/// stays alive for as long as the `Preloader` does.
pub struct Preloader<T> {
    state: Arc<watch::Sender<PreloadState<T>>>,
}

impl<T> Clone for Preloader<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for Preloader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Preloader<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(PreloadState::Idle);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state.borrow(), PreloadState::Loading)
    }

    /// The preloaded model, if loading has finished successfully.
    pub fn get(&self) -> Option<Arc<Mutex<T>>> {
        match &*self.state.borrow() {
            PreloadState::Ready(model) => Some(Arc::clone(model)),
            _ => None,
        }
    }

    /// Watch state changes, e.g. to drive a status display.
    pub fn subscribe(&self) -> watch::Receiver<PreloadState<T>> {
        self.state.subscribe()
    }
}

impl<T: Send + 'static> Preloader<T> {
    /// Start loading on the blocking pool. Returns `false` without doing
    /// anything when a load is running or a model is already loaded.
    ///
    /// Must be called inside a tokio runtime.
    pub fn preload<F>(&self, loader: F) -> bool
    where
        F: FnOnce() -> Result<T, InferError> + Send + 'static,
    {
        let claimed = self.state.send_if_modified(|state| match state {
            PreloadState::Idle | PreloadState::Failed(_) => {
                *state = PreloadState::Loading;
                true
            }
            PreloadState::Loading | PreloadState::Ready(_) => false,
        });
        if !claimed {
            return false;
        }

        log::info!("Preloading model");
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let next = match run_blocking(loader).await {
                Ok(model) => {
                    log::info!("Model preload finished");
                    PreloadState::Ready(Arc::new(Mutex::new(model)))
                }
                Err(e) => {
                    log::error!("Model preload failed: {e}");
                    PreloadState::Failed(e.to_string())
                }
            };
            state.send_replace(next);
        });
        true
    }

    /// Get a model to run: the preloaded one when available (waiting for a
    /// running preload first), else one loaded by `fallback`, which is
    /// handed to the caller and not stored.
    ///
    /// # Errors
    ///
    /// The fallback's error when it runs and fails.
    pub async fn acquire<F>(&self, fallback: F) -> Result<Arc<Mutex<T>>, InferError>
    where
        F: FnOnce() -> Result<T, InferError> + Send + 'static,
    {
        let mut receiver = self.state.subscribe();
        let settled = receiver
            .wait_for(|state| !matches!(state, PreloadState::Loading))
            .await
            .map(|state| state.clone())
            .map_err(|e| InferError::ModelLoad(format!("preload state closed: {e}")))?;

        match settled {
            PreloadState::Ready(model) => Ok(model),
            PreloadState::Failed(reason) => {
                log::warn!("Preload failed ({reason}), loading fallback model");
                Ok(Arc::new(Mutex::new(run_blocking(fallback).await?)))
            }
            PreloadState::Idle | PreloadState::Loading => {
                log::info!("No preloaded model, loading fallback model");
                Ok(Arc::new(Mutex::new(run_blocking(fallback).await?)))
            }
        }
    }
}

async fn run_blocking<T, F>(loader: F) -> Result<T, InferError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, InferError> + Send + 'static,
{
    tokio::task::spawn_blocking(loader)
        .await
        .map_err(|e| InferError::ModelLoad(format!("loader task failed: {e}")))?
}
