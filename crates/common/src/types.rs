use serde::{Deserialize, Serialize};

/// One dish line item on an order.
///
/// Missing fields default to zero/empty rather than failing the parse —
/// the queue payload is whatever the front door accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dish {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pax: u32,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub cost: f64,
}

/// One customer catering order, immutable once received.
///
/// `dishes` is the customer-facing receipt order: the sequence is preserved
/// end to end and determines invoice row order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque identifier; embedded in file names and message subjects.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub date: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub event_time: Option<String>,
    pub meal_type: Option<String>,
    pub total_pax: Option<u32>,
    /// Authoritative displayed total when present; the computed dish sum
    /// is used only as the fallback.
    pub final_amount: Option<f64>,
    pub firm_id: Option<String>,
    #[serde(default)]
    pub dishes: Vec<Dish>,
}

impl Order {
    /// Running sum of the dish costs. Always computed, even when
    /// `final_amount` overrides it for display. Folded from positive zero
    /// so an empty dish list totals `0.0`, not the empty-sum `-0.0`.
    pub fn computed_total(&self) -> f64 {
        self.dishes.iter().fold(0.0, |acc, d| acc + d.cost)
    }

    /// The amount shown on the totals band: `final_amount` if supplied,
    /// else the computed sum.
    pub fn display_total(&self) -> f64 {
        self.final_amount.unwrap_or_else(|| self.computed_total())
    }

    /// Recipient email, if present and non-blank.
    pub fn recipient_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

/// The queued message wrapping an order plus delivery contact info.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEnvelope {
    pub mobile: Option<String>,
    #[serde(default)]
    pub order_data: Order,
}
