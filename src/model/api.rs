use serde::{Deserialize, Serialize};

/// Single field-level validation failure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldErrorDto {
    pub field: String,
    pub message: String,
}

/// Error envelope returned by every failing request.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorDto {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldErrorDto>>,
}

impl ErrorDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(message: impl Into<String>, errors: Vec<FieldErrorDto>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Some(errors),
        }
    }
}

/// Success envelope wrapping a response payload.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Page of results. `page` is zero-based.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PaginatedDto<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// `?page=&per_page=` query parameters.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: default_per_page(),
        }
    }
}

fn default_per_page() -> u64 {
    10
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthDto {
    pub success: bool,
    pub status: String,
}
