use callroom_client::{ApiEndpoint, SignalingRouter};
use callroom_core::{CallEvent, CallIntent, Generation, SignalKind, Tagged};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::integration::init_tracing;
use crate::utils::{MockSignalingApi, ROOM, TIMEOUT, candidate, next_request};

async fn wait_delivered(feedback_rx: &mut mpsc::Receiver<Tagged>, kind: SignalKind) {
    timeout(TIMEOUT, async {
        while let Some(tagged) = feedback_rx.recv().await {
            if tagged.event == CallEvent::SignalingDelivered(kind) {
                return;
            }
        }
    })
    .await
    .expect("delivery feedback never arrived");
}

#[tokio::test]
async fn test_duplicate_request_suppressed() {
    init_tracing();

    let (api, mut requests) = MockSignalingApi::held();
    let (transport_tx, _transport_rx) = mpsc::channel(8);
    let (feedback_tx, mut feedback_rx) = mpsc::channel(8);
    let router = SignalingRouter::new(
        ROOM,
        "alice",
        Arc::new(api.clone()),
        transport_tx,
        feedback_tx,
    );
    let generation = Generation(0);

    router
        .execute(generation, vec![CallIntent::SendOffer("sdp1".into())])
        .await;
    router
        .execute(generation, vec![CallIntent::SendOffer("sdp1".into())])
        .await;

    let offer = next_request(&mut requests, ApiEndpoint::CallRoom)
        .await
        .unwrap();
    assert_eq!(offer.sdp_offer.as_deref(), Some("sdp1"));
    assert!(router.in_flight().is_in_flight(SignalKind::Offer));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(requests.try_recv().is_err(), "duplicate offer was sent");

    // Trickle ICE is not limited
    router
        .execute(
            generation,
            vec![
                CallIntent::SendIceCandidate(candidate("a")),
                CallIntent::SendIceCandidate(candidate("b")),
            ],
        )
        .await;
    next_request(&mut requests, ApiEndpoint::IceCandidateUpdate)
        .await
        .unwrap();
    next_request(&mut requests, ApiEndpoint::IceCandidateUpdate)
        .await
        .unwrap();

    api.release(3);
    wait_delivered(&mut feedback_rx, SignalKind::Offer).await;
    assert!(!router.in_flight().is_in_flight(SignalKind::Offer));

    // Slot is free again
    api.release(1);
    router
        .execute(generation, vec![CallIntent::SendOffer("sdp2".into())])
        .await;
    let offer = next_request(&mut requests, ApiEndpoint::CallRoom)
        .await
        .unwrap();
    assert_eq!(offer.sdp_offer.as_deref(), Some("sdp2"));
}

#[tokio::test]
async fn test_clear_pending_frees_stale_slots() {
    init_tracing();

    let (api, mut requests) = MockSignalingApi::held();
    let (transport_tx, _transport_rx) = mpsc::channel(8);
    let (feedback_tx, _feedback_rx) = mpsc::channel(8);
    let router = SignalingRouter::new(
        ROOM,
        "alice",
        Arc::new(api.clone()),
        transport_tx,
        feedback_tx,
    );

    router
        .execute(Generation(0), vec![CallIntent::SendOffer("old".into())])
        .await;
    next_request(&mut requests, ApiEndpoint::CallRoom)
        .await
        .unwrap();

    // The call was torn down while the offer hung
    router
        .execute(Generation(2), vec![CallIntent::ClearPending])
        .await;
    assert!(router.in_flight().is_empty());

    router
        .execute(Generation(2), vec![CallIntent::SendOffer("new".into())])
        .await;
    let offer = next_request(&mut requests, ApiEndpoint::CallRoom)
        .await
        .unwrap();
    assert_eq!(offer.sdp_offer.as_deref(), Some("new"));
}

#[tokio::test]
async fn test_transport_intents_are_forwarded_in_order() {
    let (api, _requests) = MockSignalingApi::new();
    let (transport_tx, mut transport_rx) = mpsc::channel(8);
    let (feedback_tx, _feedback_rx) = mpsc::channel(8);
    let router = SignalingRouter::new(ROOM, "alice", Arc::new(api), transport_tx, feedback_tx);

    router
        .execute(
            Generation(4),
            vec![CallIntent::ResetTransport, CallIntent::StartLocalMedia],
        )
        .await;

    let first = transport_rx.recv().await.unwrap();
    let second = transport_rx.recv().await.unwrap();
    assert_eq!(first.intent, CallIntent::ResetTransport);
    assert_eq!(second.intent, CallIntent::StartLocalMedia);
    assert_eq!(second.generation, Generation(4));
}
