//! HTTP protocol layer module
//!
//! Response builders, MIME detection and cache validation shared by the
//! chat endpoint and the static site.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use response::{
    build_304_response, build_404_response, build_405_response,
    build_health_response, build_html_response, build_json_error, build_json_response,
    build_options_response, build_static_response, set_server_name, HttpResponse,
};
