use callroom_client::{ChannelConfig, SignalingChannel};
use tokio::time::timeout;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{MockBackend, TIMEOUT, entered};

#[tokio::test]
async fn test_signaling_channel_forwards_frames() {
    init_tracing();

    let backend = MockBackend::default();
    backend
        .frames
        .lock()
        .await
        .push(entered("carol", &["alice", "carol"]));
    let addr = backend.start().await;

    let room = create_test_room("alice");

    let channel = SignalingChannel::new(ChannelConfig {
        url: format!("ws://{addr}/ws"),
        ..Default::default()
    });
    let session_id = channel.session_id();
    let mut connected = channel.connectivity();
    let task = channel.spawn(room.handle.clone());

    timeout(TIMEOUT, connected.wait_for(|up| *up))
        .await
        .expect("Channel never connected")
        .unwrap();

    let snapshot = room
        .handle
        .wait_for(TIMEOUT, |s| s.participant_count == 1)
        .await
        .expect("entered frame was not delivered");
    assert_eq!(snapshot.participants, vec!["alice", "carol"]);

    let ids = backend.session_ids.lock().await.clone();
    assert_eq!(ids, vec![session_id.to_string()]);

    task.abort();
}
