use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str = "Welcome to GMU-BookSwap API";
pub const DELETED_MESSAGE: &str = "Book deleted successfully";

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new_from_msg(msg: &str) -> Self {
        MessageResponse {
            message: msg.to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}

impl DeleteResponse {
    pub fn deleted(id: String) -> Self {
        DeleteResponse {
            message: DELETED_MESSAGE.to_owned(),
            id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: &str) -> Self {
        ErrorDetail {
            detail: detail.to_owned(),
        }
    }
}
