use std::io;

use uuid::Uuid;

use crate::status::DeviceStatus;

/// All error types that can occur when interacting with Luxor controllers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An HTTP request to the controller failed at the transport level.
    #[error("http post to {path} failed: {err}")]
    Http { path: String, err: reqwest::Error },

    /// Failed to deserialize a controller response body.
    #[error("failed to load json from {path}: {err:?}")]
    JsonLoad { path: String, err: serde_json::Error },

    /// The controller answered with a non-Ok status code.
    #[error("controller returned \"{}\" ({code}) for {path}", DeviceStatus::describe(*.code))]
    Status { path: String, code: u16 },

    /// The configured group number does not exist on the controller.
    #[error("group {group} not found on controller at {controller}")]
    GroupNotFound { group: u8, controller: String },

    /// Another accessory already controls this group on the same platform.
    #[error("group {group} is already registered")]
    DuplicateGroup { group: u8 },

    /// The specified accessory does not exist on the platform.
    #[error("accessory not found {0}")]
    AccessoryNotFound(Uuid),
}

impl Error {
    /// Create a new HTTP transport error
    pub fn http(path: &str, err: reqwest::Error) -> Self {
        Error::Http {
            path: path.to_string(),
            err,
        }
    }

    /// Create a new JSON load error
    pub fn json_load(path: &str, err: serde_json::Error) -> Self {
        Error::JsonLoad {
            path: path.to_string(),
            err,
        }
    }

    /// Create a new non-Ok status error
    pub fn status(path: &str, code: u16) -> Self {
        Error::Status {
            path: path.to_string(),
            code,
        }
    }

    /// The device status behind a [`Error::Status`], if the code is known.
    pub fn device_status(&self) -> Option<DeviceStatus> {
        match self {
            Error::Status { code, .. } => DeviceStatus::create(*code),
            _ => None,
        }
    }

    /// Whether this is a transport error caused by the controller resetting
    /// the connection. Luxor firmware drops connections routinely under
    /// polling load, so callers usually treat this case as benign.
    pub fn is_connection_reset(&self) -> bool {
        match self {
            Error::Http { err, .. } => {
                io_error_kind(err) == Some(io::ErrorKind::ConnectionReset)
            }
            _ => false,
        }
    }
}

/// Walk an error's source chain looking for an underlying I/O error kind.
pub(crate) fn io_error_kind(err: &(dyn std::error::Error + 'static)) -> Option<io::ErrorKind> {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(err) = source {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        source = err.source();
    }
    None
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("wrapper")]
    struct Wrapper(#[source] io::Error);

    #[test]
    fn test_io_error_kind_walks_sources() {
        let inner = io::Error::new(io::ErrorKind::ConnectionReset, "peer reset");
        let wrapped = Wrapper(inner);
        assert_eq!(
            io_error_kind(&wrapped),
            Some(io::ErrorKind::ConnectionReset)
        );
    }

    #[test]
    fn test_io_error_kind_none_without_io_source() {
        let err = serde_json::from_str::<u8>("oops").unwrap_err();
        assert_eq!(io_error_kind(&err), None);
    }

    #[test]
    fn test_status_error_display_uses_description() {
        let err = Error::status("/ColorListSet.json", 151);
        assert_eq!(
            err.to_string(),
            "controller returned \"Color Value Out of Range\" (151) for /ColorListSet.json"
        );
        assert_eq!(err.device_status(), Some(DeviceStatus::ColorValueOutOfRange));
    }

    #[test]
    fn test_unknown_status_error_display() {
        let err = Error::status("/IlluminateAll.json", 999);
        assert!(err.to_string().contains("Unknown status"));
        assert!(err.device_status().is_none());
    }
}
