//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod api_base_url;
mod http_user_directory_api;
mod tracing_operation_notifier;

pub use api_base_url::ApiBaseUrl;
pub use http_user_directory_api::HttpUserDirectoryApi;
pub use tracing_operation_notifier::TracingOperationNotifier;
