use callroom_client::ApiEndpoint;
use callroom_core::{CallError, ConnectivityKind, RoomStatus};

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{accepted_from, next_request, statuses_until, wait_for_status};

#[tokio::test]
async fn test_transport_failure_mid_call() {
    init_tracing();

    let mut room = create_test_room("alice");

    room.handle.start_call().await.unwrap();
    next_request(&mut room.requests, ApiEndpoint::CallRoom)
        .await
        .unwrap();
    room.handle
        .deliver(accepted_from("bob", "v=0 bob"))
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
    room.transport
        .emit_connectivity(ConnectivityKind::Failed)
        .await;

    let seen = statuses_until(&mut statuses, RoomStatus::Standby)
        .await
        .unwrap();
    assert_eq!(
        seen,
        vec![RoomStatus::InitializationFailed, RoomStatus::Standby]
    );

    let snapshot = room.handle.snapshot();
    assert_eq!(
        snapshot.last_failure,
        Some(CallError::Connectivity(ConnectivityKind::Failed))
    );
    assert!(room.api.sent_to(ApiEndpoint::EndCall).await.is_empty());
}
