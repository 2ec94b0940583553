use callroom_client::ApiEndpoint;
use callroom_core::{CallError, Generation, RoomStatus, SignalKind};

use crate::integration::{create_test_room_with, init_tracing, test_config};
use crate::utils::{MockSignalingApi, TransportCall, calls_until, statuses_until};

#[tokio::test]
async fn test_offer_delivery_failure() {
    init_tracing();

    let (api, requests) = MockSignalingApi::new();
    api.fail(ApiEndpoint::CallRoom).await;
    let mut room = create_test_room_with(test_config("alice"), api, requests);
    calls_until(&mut room.calls, |c| *c == TransportCall::StartLocalMedia)
        .await
        .unwrap();

    let mut statuses = room.handle.subscribe();
    room.handle.start_call().await.unwrap();

    let seen = statuses_until(&mut statuses, RoomStatus::Standby)
        .await
        .unwrap();
    assert_eq!(
        seen,
        vec![
            RoomStatus::UserCalling,
            RoomStatus::InitializationFailed,
            RoomStatus::Standby,
        ]
    );

    let snapshot = room.handle.snapshot();
    assert!(matches!(
        snapshot.last_failure,
        Some(CallError::SignalingDelivery {
            kind: SignalKind::Offer,
            ..
        })
    ));

    // The failed call's connection is closed and a fresh one prepared
    let calls = calls_until(&mut room.calls, |c| {
        *c == TransportCall::Reset(Generation(3))
    })
    .await
    .unwrap();
    assert!(calls.contains(&TransportCall::Close));
}
