//! Acknowledgement returned by the entry handler.

use common::OrderId;
use serde::{Deserialize, Serialize, Serializer};

/// Acknowledgement returned to whatever delivered the trigger.
///
/// Says nothing about the asynchronous workflow's eventual outcome. The body
/// is serialized as a JSON string, as API Gateway proxy integrations expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAccepted {
    pub status_code: u16,
    #[serde(serialize_with = "json_string")]
    pub body: AcceptedBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedBody {
    pub message: String,
    pub order_id: OrderId,
}

impl OrderAccepted {
    pub fn ok(message: impl Into<String>, order_id: OrderId) -> Self {
        Self {
            status_code: 200,
            body: AcceptedBody {
                message: message.into(),
                order_id,
            },
        }
    }
}

fn json_string<S: Serializer>(body: &AcceptedBody, serializer: S) -> Result<S::Ok, S::Error> {
    let text = serde_json::to_string(body).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_body_is_string_encoded() {
        let accepted = OrderAccepted::ok("Order workflow initiated successfully.", "order-1".into());
        let value = serde_json::to_value(&accepted).unwrap();

        assert_eq!(value["statusCode"], 200);
        let body: Value = serde_json::from_str(value["body"].as_str().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "message": "Order workflow initiated successfully.",
                "orderId": "order-1",
            })
        );
    }
}
