use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;

/// Client-writable fields of a rating.
///
/// Loading a payload through this type keeps only `comment` and `rating`;
/// every other key, `user_id` included, is discarded before anything is sent
/// to the ratings service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
}

impl RatingInput {
    pub fn load(payload: Value) -> Result<Self, AppError> {
        if !payload.is_object() {
            return Err(AppError::Validation(
                "rating payload must be a JSON object".into(),
            ));
        }

        serde_json::from_value(payload).map_err(|e| AppError::Validation(e.to_string()))
    }

    pub fn with_owner(self, user_id: Uuid) -> NewRating {
        NewRating {
            comment: self.comment,
            rating: self.rating,
            user_id,
        }
    }
}

/// Body POSTed to the ratings service on create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRating {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    pub user_id: Uuid,
}

/// The slice of a stored rating needed for the ownership check.
#[derive(Debug, Deserialize)]
pub struct RatingOwner {
    pub user_id: Uuid,
}

impl RatingOwner {
    pub fn from_body(body: Option<&Value>) -> Result<Self, AppError> {
        let body = body.ok_or_else(|| {
            AppError::BadGateway("ratings service returned a rating without a JSON body".into())
        })?;

        Self::deserialize(body).map_err(|e| {
            AppError::BadGateway(format!("ratings service returned a malformed rating: {}", e))
        })
    }

    pub fn is(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
