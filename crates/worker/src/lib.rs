pub mod consumer;
pub mod dispatcher;
