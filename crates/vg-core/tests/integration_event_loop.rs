//! Integration test: drives the collector event loop end to end with badge
//! forwarding and an on-disk history database.

use std::sync::{Arc, Mutex};

use tempfile::tempdir;

use vg_core::clock::ManualClock;
use vg_core::collector::Collector;
use vg_core::history::{spawn_history_writer, HistoryDb};
use vg_core::indicator::{Badge, Indicator, DEFAULT_BADGE_COLOR};
use vg_core::model::Source;
use vg_core::protocol::{decode_event, Outbound};
use vg_core::runtime::spawn_collector;
use vg_core::store::SessionStore;

/// Keeps every badge update in order.
#[derive(Clone, Default)]
struct BadgeLog(Arc<Mutex<Vec<(i64, String)>>>);

impl BadgeLog {
    fn texts(&self) -> Vec<(i64, String)> {
        self.0.lock().unwrap().clone()
    }
}

impl Indicator for BadgeLog {
    fn show(&self, session: i64, badge: Badge) {
        self.0.lock().unwrap().push((session, badge.text));
    }
}

#[tokio::test]
async fn tab_lifecycle_through_event_loop() {
    let state_dir = tempdir().unwrap();
    let db = HistoryDb::open_at(state_dir.path().join("history.db"))
        .await
        .unwrap();
    let (history, writer) = spawn_history_writer(db.clone(), 8);

    let clock = ManualClock::new(1_000);
    let badges = BadgeLog::default();
    let store = SessionStore::new(
        Box::new(clock.clone()),
        Box::new(badges.clone()),
        DEFAULT_BADGE_COLOR,
    );
    let (handle, task) = spawn_collector(Collector::new(store, Some(history)), 16);

    let script = [
        r#"{"kind":"responseHeaders","sessionId":10,"url":"https://cdn.x.com/hls/master.m3u8","responseHeaders":[{"name":"Content-Type","value":"application/vnd.apple.mpegurl"}],"type":"xmlhttprequest"}"#,
        r#"{"kind":"responseHeaders","sessionId":10,"url":"https://x.com/logo.png","responseHeaders":[{"name":"Content-Type","value":"image/png"}],"type":"image"}"#,
        r#"{"kind":"videoElements","sessionId":10,"items":[{"url":"https://x.com/media/intro.mp4","contentType":"video/mp4"}]}"#,
        r#"{"kind":"responseHeaders","sessionId":11,"url":"https://y.com/clip.webm","responseHeaders":[],"type":"media"}"#,
        r#"{"kind":"responseHeaders","sessionId":-1,"url":"https://z.com/bg.mp4","responseHeaders":[],"type":"other"}"#,
    ];
    for line in script {
        // Wait for each event to land so the clock step separates them.
        handle.request(decode_event(line).unwrap()).await.unwrap();
        clock.advance(100);
    }

    let items = match handle
        .request(decode_event(r#"{"kind":"getVideos","sessionId":10}"#).unwrap())
        .await
        .unwrap()
    {
        Some(Outbound::Videos { items }) => items,
        other => panic!("expected videos, got {other:?}"),
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].filename, "master.m3u8");
    assert_eq!(items[0].first_seen, 1_000);
    assert_eq!(items[0].source, Source::Network);
    assert_eq!(items[1].filename, "intro.mp4");
    assert_eq!(items[1].source, Source::Dom);

    let reply = handle
        .request(
            decode_event(
                r#"{"kind":"recordDownload","record":{"url":"https://x.com/media/intro.mp4","filename":"intro.mp4"}}"#,
            )
            .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(reply, Some(Outbound::Ack { ok: true }));

    // Navigation in tab 10 resets it; tab 11 closes silently.
    handle
        .submit(decode_event(r#"{"kind":"tabUpdated","sessionId":10,"status":"loading"}"#).unwrap())
        .await
        .unwrap();
    handle
        .submit(decode_event(r#"{"kind":"tabRemoved","sessionId":11}"#).unwrap())
        .await
        .unwrap();

    drop(handle);
    let collector = task.await.unwrap();
    assert!(collector.store().session_ids().is_empty());

    assert_eq!(
        badges.texts(),
        vec![
            (10, "1".to_string()),
            (10, "2".to_string()),
            (11, "1".to_string()),
            (10, String::new()),
        ]
    );

    // Dropping the collector drops the last history sender; the writer drains.
    drop(collector);
    writer.await.unwrap();
    let history = db.list(None).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].filename, "intro.mp4");
}

#[tokio::test]
async fn readd_after_navigation_gets_new_first_seen() {
    let clock = ManualClock::new(50);
    let store = SessionStore::new(
        Box::new(clock.clone()),
        Box::new(vg_core::indicator::NoopIndicator),
        DEFAULT_BADGE_COLOR,
    );
    let (handle, task) = spawn_collector(Collector::new(store, None), 4);
    let observe = r#"{"kind":"videoElements","sessionId":1,"items":[{"url":"https://x.com/a.mp4"}]}"#;

    handle.request(decode_event(observe).unwrap()).await.unwrap();
    handle
        .submit(decode_event(r#"{"kind":"tabUpdated","sessionId":1,"status":"loading"}"#).unwrap())
        .await
        .unwrap();
    clock.set(5_000);
    handle.request(decode_event(observe).unwrap()).await.unwrap();

    drop(handle);
    let collector = task.await.unwrap();
    let items = collector.store().list_resources(1);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].first_seen, 5_000);
}
