//! Wire payload accepted by the form-relay service

use atile_core::LeadSubmission;
use serde::{Deserialize, Serialize};

/// JSON body of one lead submission.
///
/// `_gotcha` is the honeypot. Real visitors never see the field, so it is
/// always sent empty; the relay may discard requests where it is filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "_subject")]
    pub subject: String,
    #[serde(rename = "_gotcha", default)]
    pub honeypot: String,
}

impl RelayPayload {
    /// Whether the honeypot carries a value (a spam signal for the relay)
    pub fn honeypot_filled(&self) -> bool {
        !self.honeypot.is_empty()
    }
}

impl From<LeadSubmission> for RelayPayload {
    fn from(submission: LeadSubmission) -> Self {
        Self {
            name: submission.name,
            email: submission.email,
            message: submission.message,
            phone: submission.phone,
            subject: submission.subject,
            honeypot: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(phone: Option<&str>) -> LeadSubmission {
        LeadSubmission {
            name: "John Doe".into(),
            email: "john@example.com".into(),
            message: "This is a test message for the form".into(),
            phone: phone.map(str::to_string),
            subject: "Kitchen Inquiry".into(),
        }
    }

    #[test]
    fn test_payload_field_names() {
        let payload = RelayPayload::from(submission(Some("(502) 650-7014")));
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["_subject"], "Kitchen Inquiry");
        assert_eq!(json["_gotcha"], "");
        assert_eq!(json["phone"], "(502) 650-7014");
        assert!(json.get("subject").is_none());
        assert!(json.get("honeypot").is_none());
    }

    #[test]
    fn test_payload_omits_absent_phone() {
        let payload = RelayPayload::from(submission(None));
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("phone").is_none());
        assert!(!payload.honeypot_filled());
    }

    #[test]
    fn test_filled_honeypot_is_detected() {
        let json = r#"{
            "name": "Bot",
            "email": "bot@spam.example",
            "message": "Buy cheap things today",
            "_subject": "x",
            "_gotcha": "http://spam.example"
        }"#;
        let payload: RelayPayload = serde_json::from_str(json).unwrap();
        assert!(payload.honeypot_filled());
        assert_eq!(payload.phone, None);
    }
}
