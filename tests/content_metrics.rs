use std::collections::HashSet;
use std::sync::Arc;

use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use recompile::application::fallback::{FallbackContent, FallbackSource};
use recompile::application::gateway::{
    ContentGateway, METRIC_CONTENT_FETCH_MS, METRIC_CONTENT_REQUESTS,
};

#[test]
fn accessors_record_outcome_and_latency() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");

    metrics::with_local_recorder(&recorder, || {
        runtime.block_on(async {
            let gateway = ContentGateway::new(
                Arc::new(FallbackSource),
                Arc::new(FallbackContent::default()),
            );
            gateway.hero().await;
            gateway.posts().await;
            gateway.posts().await;
        });
    });

    let snapshot = snapshotter.snapshot().into_vec();
    let names: HashSet<String> = snapshot
        .iter()
        .map(|(composite_key, _, _, _)| composite_key.key().name().to_string())
        .collect();
    assert!(names.contains(METRIC_CONTENT_REQUESTS));
    assert!(names.contains(METRIC_CONTENT_FETCH_MS));

    let posts_empty = snapshot.iter().find_map(|(composite_key, _, _, value)| {
        let key = composite_key.key();
        let labels: Vec<(&str, &str)> = key
            .labels()
            .map(|label| (label.key(), label.value()))
            .collect();
        (key.name() == METRIC_CONTENT_REQUESTS
            && labels.contains(&("accessor", "posts"))
            && labels.contains(&("outcome", "empty")))
        .then_some(value)
    });
    assert!(matches!(posts_empty, Some(DebugValue::Counter(2))));
}
