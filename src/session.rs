pub(crate) mod background_session;
