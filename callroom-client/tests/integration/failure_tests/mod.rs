mod test_malformed_messages_dropped;
mod test_offer_delivery_failure;
mod test_transport_failure_mid_call;
