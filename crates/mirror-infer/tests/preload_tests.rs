use mirror_infer::{InferError, PreloadState, Preloader};
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

#[derive(Debug, PartialEq)]
struct Model(&'static str);

#[tokio::test]
async fn test_acquire_returns_preloaded_model() {
    let preloader = Preloader::new();
    assert!(preloader.preload(|| {
        std::thread::sleep(Duration::from_millis(50));
        Ok(Model("lite"))
    }));
    assert!(preloader.is_loading());
    assert!(preloader.get().is_none());

    let model = preloader
        .acquire(|| panic!("fallback must not run"))
        .await
        .unwrap();
    assert_eq!(*model.lock().await, Model("lite"));

    // everyone shares the same instance
    let again = preloader.get().unwrap();
    assert!(Arc::ptr_eq(&model, &again));
    assert!(!preloader.is_loading());
}

#[tokio::test]
async fn test_preload_is_idempotent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let preloader = Preloader::new();

    for _ in 0..3 {
        let calls = calls.clone();
        preloader.preload(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            Ok(Model("lite"))
        });
    }
    preloader.acquire(|| Ok(Model("full"))).await.unwrap();
    assert!(!preloader.preload(|| Ok(Model("again"))));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_preload_uses_fallback() {
    let preloader = Preloader::new();
    preloader.preload(|| Err(InferError::ModelLoad("no such file".to_string())));

    let model = preloader.acquire(|| Ok(Model("full"))).await.unwrap();
    assert_eq!(*model.lock().await, Model("full"));

    // the fallback stays private to its caller
    assert!(preloader.get().is_none());
    assert!(matches!(
        &*preloader.subscribe().borrow(),
        PreloadState::Failed(msg) if msg.contains("no such file")
    ));
}

#[tokio::test]
async fn test_acquire_without_preload() {
    let preloader: Preloader<Model> = Preloader::new();
    let model = preloader.acquire(|| Ok(Model("full"))).await.unwrap();
    assert_eq!(*model.lock().await, Model("full"));
}

#[tokio::test]
async fn test_acquire_reports_fallback_error() {
    let preloader: Preloader<Model> = Preloader::new();
    preloader.preload(|| Err(InferError::ModelLoad("lite missing".to_string())));
    let result = preloader
        .acquire(|| Err(InferError::ModelLoad("full missing".to_string())))
        .await;
    assert!(matches!(result, Err(InferError::ModelLoad(ref msg)) if msg == "full missing"));
}

#[tokio::test]
async fn test_preload_can_retry_after_failure() {
    let preloader = Preloader::new();
    preloader.preload(|| Err(InferError::ModelLoad("flaky".to_string())));
    preloader.acquire(|| Ok(Model("full"))).await.unwrap();

    assert!(preloader.preload(|| Ok(Model("lite"))));
    let model = preloader.acquire(|| Ok(Model("full"))).await.unwrap();
    assert_eq!(*model.lock().await, Model("lite"));
}

#[tokio::test]
async fn test_subscribe_sees_ready() {
    let preloader = Preloader::new();
    let mut states = preloader.subscribe();
    preloader.preload(|| Ok(Model("lite")));
    states
        .wait_for(|state| matches!(state, PreloadState::Ready(_)))
        .await
        .unwrap();
}
