//! Routing labels.
//!
//! A [`Label`] names the support domain that handles a message. The set is
//! closed: every label has exactly one expert (see
//! [`ExpertPanel`](super::expert::ExpertPanel)) and the classifier is the only
//! place free text is turned into a label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Support domain a message is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Order status, cancellations, returns.
    Order,
    /// Shipping, tracking, delivery times.
    Delivery,
    /// Payment methods, billing, refunds.
    Payment,
    /// Login, password, profile settings.
    Account,
}

impl Label {
    /// Every label, in dispatch-table order.
    pub const ALL: [Self; 4] = [Self::Order, Self::Delivery, Self::Payment, Self::Account];

    /// Lowercase token the classifier is asked to answer with.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Delivery => "delivery",
            Self::Payment => "payment",
            Self::Account => "account",
        }
    }

    /// Name of the expert agent for logging.
    pub const fn agent_name(self) -> &'static str {
        match self {
            Self::Order => "order_expert",
            Self::Delivery => "delivery_expert",
            Self::Payment => "payment_expert",
            Self::Account => "account_expert",
        }
    }

    /// Title of the expert role used in its prompt.
    pub const fn domain(self) -> &'static str {
        match self {
            Self::Order => "Order Support",
            Self::Delivery => "Delivery & Shipping Support",
            Self::Payment => "Payment Support",
            Self::Account => "Account Support",
        }
    }

    /// Topics the expert covers.
    pub const fn topics(self) -> &'static [&'static str] {
        match self {
            Self::Order => &[
                "Order status and tracking",
                "Order cancellations and modifications",
                "Return and refund processes",
                "Order history inquiries",
                "Product availability",
                "Bulk orders and special requests",
            ],
            Self::Delivery => &[
                "Shipping methods and delivery times",
                "Package tracking and location",
                "Delivery delays and issues",
                "International shipping",
                "Shipping costs and free shipping thresholds",
                "Lost or damaged packages",
                "Address changes before delivery",
            ],
            Self::Payment => &[
                "Accepted payment methods (credit/debit cards, PayPal, etc.)",
                "Payment processing issues and failures",
                "Billing inquiries and invoices",
                "Refund processing and timelines",
                "Payment security and fraud prevention",
                "Currency and international payments",
                "Promotional codes and discounts",
            ],
            Self::Account => &[
                "Account creation and login issues",
                "Password reset and security",
                "Profile and account settings",
                "Email verification",
                "Two-factor authentication",
                "Account deletion requests",
            ],
        }
    }

    /// What the expert asks the customer for when it needs more to go on.
    pub const fn details_hint(self) -> &'static str {
        match self {
            Self::Order => "an order number or specific details",
            Self::Delivery => "a tracking number or order details",
            Self::Payment => "transaction details or order numbers",
            Self::Account => "specific account details",
        }
    }

    /// Parses classifier output: trimmed, lowercased, exact token match.
    ///
    /// Returns `None` for anything outside the closed set, including
    /// near misses such as `"orders"` or `"delivery."`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == normalized)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AgentError::Config {
            message: format!(
                "unknown label '{s}' (expected one of: order, delivery, payment, account)"
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("order", Label::Order)]
    #[test_case("delivery", Label::Delivery)]
    #[test_case("payment", Label::Payment)]
    #[test_case("account", Label::Account)]
    #[test_case("  Delivery\n", Label::Delivery ; "whitespace and case")]
    #[test_case("PAYMENT", Label::Payment ; "uppercase")]
    fn test_parse_valid(raw: &str, expected: Label) {
        assert_eq!(Label::parse(raw), Some(expected));
    }

    #[test_case("" ; "empty")]
    #[test_case("ORDERS!!" ; "decorated")]
    #[test_case("delivery." ; "trailing period")]
    #[test_case("I think this is order-related" ; "sentence")]
    #[test_case("shipping" ; "synonym")]
    fn test_parse_invalid(raw: &str) {
        assert_eq!(Label::parse(raw), None);
    }

    #[test]
    fn test_round_trip_through_display() {
        for label in Label::ALL {
            assert_eq!(Label::parse(&label.to_string()), Some(label));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("billing".parse::<Label>().is_err());
        assert_eq!("account".parse::<Label>().ok(), Some(Label::Account));
    }

    #[test]
    fn test_serialization_is_lowercase() {
        let json = serde_json::to_string(&Label::Delivery).unwrap_or_default();
        assert_eq!(json, "\"delivery\"");
    }

    #[test]
    fn test_every_label_has_topics() {
        for label in Label::ALL {
            assert!(!label.topics().is_empty(), "{label} has no topics");
        }
    }
}
