//! API middleware.

mod error_page;
mod session;

pub use error_page::{error_page_middleware, is_api_request};
pub use session::{removal_cookie, session_cookie, session_middleware, CurrentUser};
