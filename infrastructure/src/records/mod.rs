//! Record store adapters for the provider ports

pub mod json_store;

pub use json_store::JsonRecordStore;
