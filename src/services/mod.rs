pub mod request_builder;
pub mod result_adapter;
pub mod search_client;
pub mod search_service;

pub use request_builder::*;
pub use result_adapter::*;
pub use search_client::*;
pub use search_service::*;
