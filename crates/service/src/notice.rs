//! Classification of failures into what the user is shown.
//!
//! Nothing here is fatal: a notice carries a message and, when repeating
//! the action could help, the action to repeat. Retrying is always left to
//! the caller.

use seamart_api::ApiError;
use seamart_storage::StorageError;
use serde::Serialize;

use crate::error::ServiceError;

/// The user action a notice offers to repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RetryAction {
    Refresh,
    LoadMore,
    Search { query: String },
    PersistBasket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNotice {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryAction>,
}

impl ErrorNotice {
    #[must_use]
    pub fn new(message: impl Into<String>, retry: Option<RetryAction>) -> Self {
        Self { message: message.into(), retry }
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.retry.is_some()
    }

    #[must_use]
    pub fn from_api(err: &ApiError, action: RetryAction) -> Self {
        match err {
            ApiError::HttpRequest(e) if e.is_timeout() => {
                Self::new("The server took too long to respond. Try again.", Some(action))
            },
            ApiError::HttpRequest(_) => {
                Self::new("Network problem. Check your connection and try again.", Some(action))
            },
            ApiError::HttpStatus { code: 401 | 403, .. } => {
                Self::new("Your session has expired. Please sign in again.", None)
            },
            ApiError::HttpStatus { code: 404, .. } => {
                Self::new("This content is no longer available.", None)
            },
            ApiError::HttpStatus { code: 429, .. } => {
                Self::new("Too many requests. Wait a moment and try again.", Some(action))
            },
            ApiError::HttpStatus { code, .. } if *code >= 500 => {
                Self::new("The server is having trouble. Try again.", Some(action))
            },
            ApiError::HttpStatus { code, .. } => Self::new(
                format!("The request could not be completed (status {code})."),
                Some(action),
            ),
            ApiError::JsonParse { .. } => {
                Self::new("Received an unexpected response from the server.", Some(action))
            },
            ApiError::InvalidRequest(msg) => Self::new(msg.clone(), None),
            ApiError::ClientInit(msg) => Self::new(format!("Client is misconfigured: {msg}"), None),
        }
    }

    #[must_use]
    pub fn from_storage(_err: &StorageError, action: RetryAction) -> Self {
        Self::new("Could not save your basket on this device. Try again.", Some(action))
    }

    #[must_use]
    pub fn classify(err: &ServiceError, action: RetryAction) -> Self {
        match err {
            ServiceError::Api(e) => Self::from_api(e, action),
            ServiceError::Storage(e) => Self::from_storage(e, action),
            ServiceError::Domain(e) => Self::new(e.to_string(), None),
            ServiceError::NotConfigured(what) => Self::new(format!("{what} is not available."), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::HttpStatus { code, body: String::new() }
    }

    #[test]
    fn server_errors_offer_retry() {
        let notice = ErrorNotice::from_api(&status(502), RetryAction::Refresh);
        assert_eq!(notice.retry, Some(RetryAction::Refresh));
        let notice = ErrorNotice::from_api(&status(429), RetryAction::LoadMore);
        assert_eq!(notice.retry, Some(RetryAction::LoadMore));
    }

    #[test]
    fn auth_and_missing_content_do_not_offer_retry() {
        assert!(!ErrorNotice::from_api(&status(401), RetryAction::Refresh).is_retryable());
        assert!(!ErrorNotice::from_api(&status(403), RetryAction::Refresh).is_retryable());
        assert!(!ErrorNotice::from_api(&status(404), RetryAction::Refresh).is_retryable());
    }

    #[test]
    fn other_client_errors_mention_status() {
        let notice = ErrorNotice::from_api(&status(422), RetryAction::Refresh);
        assert!(notice.message.contains("422"));
        assert!(notice.is_retryable());
    }

    #[test]
    fn parse_errors_are_retryable() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = ApiError::JsonParse { context: "feed".to_owned(), source };
        let notice =
            ErrorNotice::from_api(&err, RetryAction::Search { query: "crab".to_owned() });
        assert_eq!(notice.retry, Some(RetryAction::Search { query: "crab".to_owned() }));
    }

    #[test]
    fn domain_errors_are_not_retryable() {
        let err = ServiceError::Domain(seamart_core::CoreError::InvalidQuantity(0));
        let notice = ErrorNotice::classify(&err, RetryAction::PersistBasket);
        assert!(!notice.is_retryable());
        assert!(notice.message.contains("quantity"));
    }

    #[test]
    fn retry_action_serializes_tagged() {
        let json = serde_json::to_value(RetryAction::Search { query: "eel".to_owned() }).unwrap();
        assert_eq!(json, serde_json::json!({"action": "search", "query": "eel"}));
    }
}
