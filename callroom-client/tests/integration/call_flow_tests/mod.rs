mod test_remote_hangup;
