//! Single-flight behaviour with fallible outputs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use localstore_common::sync::SingleFlight;

#[tokio::test]
async fn failure_is_shared_then_next_call_retries() {
    let flight = Arc::new(SingleFlight::<Result<String, String>>::new());
    let attempts = Arc::new(AtomicUsize::new(0));

    let run = |flight: Arc<SingleFlight<Result<String, String>>>, attempts: Arc<AtomicUsize>| async move {
        flight
            .run(|| async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                if n == 0 {
                    Err("refresh rejected".to_string())
                } else {
                    Ok(format!("token-{n}"))
                }
            })
            .await
    };

    let (a, b) = tokio::join!(
        run(Arc::clone(&flight), Arc::clone(&attempts)),
        run(Arc::clone(&flight), Arc::clone(&attempts))
    );
    assert_eq!(a, Err("refresh rejected".to_string()));
    assert_eq!(b, a);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);

    let c = run(Arc::clone(&flight), Arc::clone(&attempts)).await;
    assert_eq!(c, Ok("token-1".to_string()));
}
