mod test_duplicate_request_suppressed;
mod test_signaling_channel;
