use serde::{Deserialize, Serialize};

use super::Entity;

/// A message left through the contact form. Stored, never read back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Entity for ContactMessage {
    const COLLECTION: &'static str = "contactmessage";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactResponse {
    pub id: String,
    pub status: String,
}
