//! HTTP request handlers.

pub mod board_handler;
pub mod error_handler;
pub mod follow_handler;
pub mod profile_handler;
pub mod search_handler;
pub mod user_handler;

pub use board_handler::board_routes;
pub use error_handler::{error_page, fallback};
pub use follow_handler::follow_routes;
pub use profile_handler::profile_routes;
pub use search_handler::search_routes;
pub use user_handler::user_routes;

use uuid::Uuid;
use validator::ValidationError;

use crate::errors::{AppError, AppResult};

const DISPLAY_NAME_MESSAGE: &str = "Display name must be 1 to 50 characters";

/// Path ids that do not parse are treated like ids that do not exist
pub(crate) fn parse_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(entity))
}

/// Display names made only of whitespace count as missing
pub(crate) fn display_name_not_blank(display_name: &str) -> Result<(), ValidationError> {
    if display_name.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(DISPLAY_NAME_MESSAGE.into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_display_name_is_blank() {
        let err = display_name_not_blank(" \t ").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(DISPLAY_NAME_MESSAGE));
        assert!(display_name_not_blank(" Alice ").is_ok());
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert!(matches!(parse_id("abc", "Post"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn well_formed_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Post").unwrap(), id);
    }
}
