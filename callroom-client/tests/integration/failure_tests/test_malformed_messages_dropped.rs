use callroom_core::RoomStatus;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{TIMEOUT, TransportCall, calling_from, calls_until, entered};

#[tokio::test]
async fn test_malformed_messages_dropped() {
    init_tracing();

    let mut room = create_test_room("bob");
    calls_until(&mut room.calls, |c| *c == TransportCall::StartLocalMedia)
        .await
        .unwrap();
    let mut statuses = room.handle.subscribe();

    for frame in [
        "not json at all".to_owned(),
        r#"{"room":"lobby","username":"alice"}"#.to_owned(),
        r#"{"roomEvent":"calling","username":"alice"}"#.to_owned(),
        r#"{"roomEvent":"teleport","username":"alice"}"#.to_owned(),
        // Our own call, echoed back by the relay
        calling_from("bob", "v=0 bob"),
    ] {
        room.handle.deliver(frame).await.unwrap();
    }

    room.handle
        .deliver(entered("carol", &["bob", "carol"]))
        .await
        .unwrap();
    let snapshot = room
        .handle
        .wait_for(TIMEOUT, |s| s.participant_count == 1)
        .await
        .expect("Room stopped processing after bad frames");

    assert_eq!(snapshot.status, RoomStatus::Standby);
    assert_eq!(snapshot.participants, vec!["bob", "carol"]);
    assert!(statuses.try_recv().is_err());
}
