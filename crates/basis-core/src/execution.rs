//! Outbound execution requests.
//!
//! Every request is fire-and-forget from the strategy's point of view:
//! the outcome is only learned through later venue events.

use serde::{Deserialize, Serialize};

use crate::decimal::{Price, Volume};
use crate::order::{Lifespan, OrderId, Side};

/// Request the strategy wants sent to the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VenueAction {
    /// Limit order on the traded instrument.
    InsertOrder {
        id: OrderId,
        side: Side,
        price: Price,
        volume: Volume,
        lifespan: Lifespan,
    },
    /// Cancel a resting order.
    CancelOrder { id: OrderId },
    /// Offsetting order on the reference instrument.
    HedgeOrder {
        id: OrderId,
        side: Side,
        price: Price,
        volume: Volume,
    },
}

impl VenueAction {
    /// Order id the action refers to.
    pub fn order_id(&self) -> OrderId {
        match self {
            Self::InsertOrder { id, .. } | Self::CancelOrder { id } | Self::HedgeOrder { id, .. } => {
                *id
            }
        }
    }

    /// Short label, used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsertOrder { .. } => "insert",
            Self::CancelOrder { .. } => "cancel",
            Self::HedgeOrder { .. } => "hedge",
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::InsertOrder { .. })
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::CancelOrder { .. })
    }

    pub fn is_hedge(&self) -> bool {
        matches!(self, Self::HedgeOrder { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_accessors() {
        let insert = VenueAction::InsertOrder {
            id: OrderId::new(3),
            side: Side::Buy,
            price: Price::new(10_100),
            volume: Volume::new(20),
            lifespan: Lifespan::GoodForDay,
        };
        assert_eq!(insert.order_id(), OrderId::new(3));
        assert_eq!(insert.kind(), "insert");
        assert!(insert.is_insert());

        let cancel = VenueAction::CancelOrder { id: OrderId::new(4) };
        assert!(cancel.is_cancel());
        assert!(!cancel.is_hedge());
    }

    #[test]
    fn test_action_json_tagged() {
        let hedge = VenueAction::HedgeOrder {
            id: OrderId::new(9),
            side: Side::Sell,
            price: Price::new(100),
            volume: Volume::new(10),
        };
        let json = serde_json::to_value(&hedge).unwrap();
        assert_eq!(json["type"], "hedge_order");
        assert_eq!(json["side"], "sell");
        assert_eq!(json["id"], 9);
    }
}
