use serde::Deserialize;
use tower_api_client::{Error as ApiError, StatusCode};

/// Failure of a store call.
///
/// `Display` is the human-readable message shown to users, e.g. `Erreur 404`.
#[derive(Debug)]
pub enum BilledApiError {
    Status(StatusCode, Option<String>),
    Internal(ApiError),
    Message(String),
}

impl BilledApiError {
    pub fn message(message: impl Into<String>) -> Self {
        BilledApiError::Message(message.into())
    }
}

impl From<ApiError> for BilledApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                let message = serde_json::from_str::<ErrorResponse>(&detail)
                    .ok()
                    .map(|response| response.message)
                    .filter(|message| !message.is_empty());
                BilledApiError::Status(status, message)
            }
            e => BilledApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for BilledApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BilledApiError::Status(status, None) => write!(f, "Erreur {}", status.as_u16()),
            BilledApiError::Status(status, Some(detail)) => {
                write!(f, "Erreur {} : {}", status.as_u16(), detail)
            }
            BilledApiError::Internal(e) => write!(f, "Internal error: {}", e),
            BilledApiError::Message(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for BilledApiError {}

#[derive(Debug, Clone, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_message_is_displayed_verbatim() {
        let err = BilledApiError::message("Erreur 500");
        assert_eq!(err.to_string(), "Erreur 500");
    }

    #[test]
    fn status_without_body_shows_code() {
        let err = BilledApiError::Status(StatusCode::NOT_FOUND, None);
        assert_eq!(err.to_string(), "Erreur 404");
    }

    #[test]
    fn status_with_body_message_appends_detail() {
        let err = BilledApiError::from(ApiError::ServerError(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"database offline"}"#.to_string(),
        ));
        assert_eq!(err.to_string(), "Erreur 500 : database offline");
    }

    #[test]
    fn unparseable_body_is_ignored() {
        let err = BilledApiError::from(ApiError::ClientError(
            StatusCode::NOT_FOUND,
            "<html>not found</html>".to_string(),
        ));
        assert_eq!(err.to_string(), "Erreur 404");
    }
}
