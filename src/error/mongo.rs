use serde::{Deserialize, Serialize};

use super::kinds::StoreError;

/// Structured error information extracted from MongoDB errors.
///
/// Serialized to JSON for the log file so that failed inserts leave a
/// machine-readable trace next to the human-readable console message.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
}

impl ErrorInfo {
    /// Convert error info to compact JSON string (single line).
    pub fn to_json_compact(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Extract structured information from a MongoDB error using the driver API.
pub fn extract_error_info(error: &mongodb::error::Error) -> ErrorInfo {
    use mongodb::error::ErrorKind;

    let mut info = ErrorInfo::default();

    match error.kind.as_ref() {
        ErrorKind::InsertMany(insert_error) => {
            info.error_type = Some("mongo.insert_many_error".to_string());

            if let Some(first_error) = insert_error
                .write_errors
                .as_ref()
                .and_then(|errors| errors.first())
            {
                info.code = Some(first_error.code);
                info.message = Some(first_error.message.clone());
                info.name = get_error_name(first_error.code);
            } else if let Some(wc_error) = &insert_error.write_concern_error {
                info.code = Some(wc_error.code);
                info.message = Some(wc_error.message.clone());
                info.name = get_error_name(wc_error.code);
            }
        }
        ErrorKind::Command(command_error) => {
            info.error_type = Some("mongo.command_error".to_string());
            info.code = Some(command_error.code);
            info.message = Some(command_error.message.clone());
            info.name = get_error_name(command_error.code);
        }
        ErrorKind::Authentication { message, .. } => {
            info.error_type = Some("mongo.authentication_error".to_string());
            info.message = Some(message.clone());
        }
        ErrorKind::InvalidArgument { message, .. } => {
            info.error_type = Some("mongo.invalid_argument".to_string());
            info.message = Some(message.clone());
        }
        ErrorKind::ServerSelection { message, .. } => {
            info.error_type = Some("mongo.server_selection_error".to_string());
            info.message = Some(message.clone());
        }
        _ => {
            info.message = Some(error.to_string());
        }
    }

    if let Some(code) = info.code {
        if code == 11000 || code == 11001 {
            info.message = Some("Duplicate key error".to_string());
        }
    }

    info
}

/// Classify a driver error raised while opening the client.
pub fn classify_connect_error(error: &mongodb::error::Error) -> StoreError {
    use mongodb::error::ErrorKind;

    match error.kind.as_ref() {
        ErrorKind::InvalidArgument { message, .. } => StoreError::InvalidUri(message.clone()),
        _ => StoreError::ConnectionFailed(error.to_string()),
    }
}

/// Classify a driver error raised by the bulk insert.
///
/// Server selection happens lazily on the first operation, so an unreachable
/// host surfaces here rather than at client construction.
pub fn classify_insert_error(error: &mongodb::error::Error) -> StoreError {
    use mongodb::error::ErrorKind;

    match error.kind.as_ref() {
        ErrorKind::ServerSelection { message, .. } => {
            StoreError::ConnectionFailed(message.clone())
        }
        ErrorKind::Authentication { message, .. } => {
            StoreError::ConnectionFailed(format!("authentication failed: {message}"))
        }
        _ => StoreError::InsertFailed(error.to_string()),
    }
}

/// Get a human-readable error name from a MongoDB error code.
fn get_error_name(code: i32) -> Option<String> {
    let name = match code {
        11000 | 11001 => "DuplicateKey",
        13 => "Unauthorized",
        18 => "AuthenticationFailed",
        26 => "NamespaceNotFound",
        50 => "MaxTimeMSExpired",
        121 => "DocumentValidationFailure",
        _ => return None,
    };

    Some(name.to_string())
}
