use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::status::OrderStatus;

/// An order as returned by the order API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(rename = "order_invoice_number", default)]
    pub invoice_number: Option<String>,
    pub status: OrderStatus,
    /// Amount in VND.
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default, with = "gateway_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "gateway_datetime")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub reference_code: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub transaction_status: Option<String>,
}

/// Accepts both `2024-01-15 10:30:00` and ISO `2024-01-15T10:30:00[.fff]`.
mod gateway_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const SPACE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.format(SPACE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        NaiveDateTime::parse_from_str(&raw, SPACE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, ISO_FORMAT))
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
