use tracing::{error, info, warn};

use super::model::ErrorResponse;
use super::service::TopUpService;
use crate::{
    constants::{INTERNAL_ERROR, OK_RESPONSE},
    error::CustomError,
    req::Request,
    utils::ser_to_str,
};

pub struct TopUpController {
    service: TopUpService,
}

impl TopUpController {
    pub fn new(service: TopUpService) -> Self {
        TopUpController { service }
    }

    /// Runs a top-up and renders the outcome as `(status_line, json_body)`.
    pub async fn top_up(&self, user_id: &str, request: &Request) -> (String, String) {
        let response = match self.service.top_up(user_id, request).await {
            Ok(response) => response,
            Err(err) => return Self::reject(user_id, err),
        };

        match ser_to_str(&response) {
            Ok(json) => (OK_RESPONSE.to_string(), json),
            Err(err) => Self::reject(user_id, CustomError::Internal(err.into())),
        }
    }

    fn reject(user_id: &str, err: CustomError) -> (String, String) {
        let body = match &err {
            CustomError::Internal(cause) => {
                error!("Failed to topup user {}: {:#}", user_id, cause);
                ErrorResponse::with_error(err.to_string(), format!("{:#}", cause))
            }
            CustomError::Unauthorized => {
                warn!("Unauthorized topup attempt for user {}", user_id);
                ErrorResponse::new(err.to_string())
            }
            _ => {
                info!("Topup for user {} rejected: {:?}", user_id, err);
                ErrorResponse::new(err.to_string())
            }
        };

        match ser_to_str(&body) {
            Ok(json) => (err.status_line().to_string(), json),
            Err(_) => (
                INTERNAL_ERROR.to_string(),
                r#"{"message":"Internal Server Error"}"#.to_string(),
            ),
        }
    }
}
