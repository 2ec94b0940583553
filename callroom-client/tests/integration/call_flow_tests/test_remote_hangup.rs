use callroom_client::ApiEndpoint;
use callroom_core::{ConnectivityKind, RoomEvent, RoomStatus};

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{
    TransportCall, calling_from, calls_until, frame, next_request, statuses_until, text,
    wait_for_status,
};

#[tokio::test]
async fn test_remote_hangup() {
    init_tracing();

    let mut room = create_test_room("bob");

    room.handle
        .deliver(calling_from("alice", "v=0 alice"))
        .await
        .unwrap();
    wait_for_status(&room.handle, RoomStatus::IncomingCall)
        .await
        .unwrap();
    room.handle.accept_call().await.unwrap();
    next_request(&mut room.requests, ApiEndpoint::AnswerCall)
        .await
        .unwrap();
    wait_for_status(&room.handle, RoomStatus::Initializing)
        .await
        .unwrap();
    room.transport
        .emit_connectivity(ConnectivityKind::Connected)
        .await;
    wait_for_status(&room.handle, RoomStatus::OngoingConnected)
        .await
        .unwrap();

    let mut statuses = room.handle.subscribe();
    room.handle
        .deliver(text(frame(RoomEvent::Hangup, "alice")))
        .await
        .unwrap();

    let seen = statuses_until(&mut statuses, RoomStatus::Standby)
        .await
        .unwrap();
    assert_eq!(
        seen,
        vec![RoomStatus::Ended, RoomStatus::SdpReset, RoomStatus::Standby]
    );

    calls_until(&mut room.calls, |c| *c == TransportCall::Close)
        .await
        .expect("Transport was not closed");

    // Alice already knows; no end signal goes back
    assert!(room.api.sent_to(ApiEndpoint::EndCall).await.is_empty());
}
