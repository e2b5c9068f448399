//! Inbound webhook payload.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Timestamp format used by the gateway, e.g. `2024-01-15 10:30:00`.
pub const TRANSACTION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Direction of a bank transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TransferType {
    /// Money received.
    In,
    /// Money sent.
    Out,
}

impl TransferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferType::In => "in",
            TransferType::Out => "out",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in" => Ok(TransferType::In),
            "out" => Ok(TransferType::Out),
            _ => Err(ValidationError::invalid_format(
                "transferType",
                format!("expected 'in' or 'out', got '{}'", s),
            )),
        }
    }
}

impl TryFrom<String> for TransferType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Transaction notification posted by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// Gateway transaction id, positive.
    pub id: i64,
    /// Bank or gateway name.
    pub gateway: String,
    #[serde(with = "transaction_date")]
    pub transaction_date: NaiveDateTime,
    pub account_number: String,
    #[serde(default)]
    pub sub_account: Option<String>,
    /// Payment code recognised by the gateway, if any.
    #[serde(default)]
    pub code: Option<String>,
    /// Free-text transfer content entered by the payer.
    pub content: String,
    pub transfer_type: TransferType,
    #[serde(default)]
    pub description: Option<String>,
    /// Amount in VND, positive.
    pub transfer_amount: i64,
    #[serde(default)]
    pub reference_code: Option<String>,
    /// Account balance after the transfer.
    #[serde(default)]
    pub accumulated: Option<i64>,
}

impl WebhookPayload {
    /// Parses a JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id <= 0 {
            return Err(ValidationError::invalid_format("id", "must be positive"));
        }
        if self.gateway.trim().is_empty() {
            return Err(ValidationError::empty_field("gateway"));
        }
        if self.account_number.trim().is_empty() {
            return Err(ValidationError::empty_field("accountNumber"));
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        if self.transfer_amount <= 0 {
            return Err(ValidationError::invalid_format(
                "transferAmount",
                "must be positive",
            ));
        }
        Ok(())
    }

    pub fn is_incoming(&self) -> bool {
        self.transfer_type == TransferType::In
    }
}

mod transaction_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TRANSACTION_DATE_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TRANSACTION_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TRANSACTION_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = r#"{
        "id": 92704,
        "gateway": "Vietcombank",
        "transactionDate": "2024-01-15 10:30:00",
        "accountNumber": "0123499999",
        "subAccount": null,
        "code": null,
        "content": "chuyen tien DH102969",
        "transferType": "in",
        "description": "BankAPINotify chuyen tien DH102969",
        "transferAmount": 2277000,
        "referenceCode": "MBVCB.3278907687",
        "accumulated": 19077000
    }"#;

    fn sample() -> WebhookPayload {
        WebhookPayload::from_json(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn parses_gateway_payload() {
        let payload = sample();

        assert_eq!(payload.id, 92704);
        assert_eq!(payload.gateway, "Vietcombank");
        assert_eq!(
            payload.transaction_date,
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        );
        assert_eq!(payload.transfer_type, TransferType::In);
        assert_eq!(payload.transfer_amount, 2_277_000);
        assert_eq!(payload.sub_account, None);
        assert_eq!(payload.accumulated, Some(19_077_000));
        assert!(payload.validate().is_ok());
        assert!(payload.is_incoming());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let json = r#"{"id":1,"gateway":"MB","transactionDate":"2024-02-01 00:00:01",
            "accountNumber":"1","content":"x","transferType":"out","transferAmount":5}"#;
        let payload = WebhookPayload::from_json(json.as_bytes()).unwrap();
        assert_eq!(payload.transfer_type, TransferType::Out);
        assert_eq!(payload.reference_code, None);
    }

    #[test]
    fn transfer_type_is_case_insensitive() {
        let json = SAMPLE.replace("\"in\"", "\"IN\"");
        assert_eq!(
            WebhookPayload::from_json(json.as_bytes()).unwrap().transfer_type,
            TransferType::In
        );
    }

    #[test]
    fn unknown_transfer_type_is_rejected() {
        let json = SAMPLE.replace("\"in\"", "\"sideways\"");
        assert!(WebhookPayload::from_json(json.as_bytes()).is_err());
    }

    #[test]
    fn iso_timestamp_is_rejected() {
        let json = SAMPLE.replace("2024-01-15 10:30:00", "2024-01-15T10:30:00");
        assert!(WebhookPayload::from_json(json.as_bytes()).is_err());
    }

    #[test]
    fn serializes_with_gateway_date_format() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["transactionDate"], "2024-01-15 10:30:00");
        assert_eq!(json["transferType"], "in");
    }

    #[test]
    fn validate_rejects_non_positive_amount() {
        let mut payload = sample();
        payload.transfer_amount = 0;
        assert_eq!(
            payload.validate().unwrap_err().field(),
            Some("transferAmount")
        );
    }

    #[test]
    fn validate_rejects_blank_content() {
        let mut payload = sample();
        payload.content = "  ".to_string();
        assert_eq!(
            payload.validate(),
            Err(ValidationError::empty_field("content"))
        );
    }

    #[test]
    fn validate_rejects_non_positive_id() {
        let mut payload = sample();
        payload.id = 0;
        assert!(payload.validate().is_err());
    }
}
