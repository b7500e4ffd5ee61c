pub mod answer_key;
pub mod connection;
