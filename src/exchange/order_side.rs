use std::fmt;

/// Direction of a single-unit trade against the portfolio's cash.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OrderSide {
    /// Sell one unit
    ASK,
    /// Buy one unit
    BID,
}

impl OrderSide {
    pub fn from_buy(buy: bool) -> Self {
        if buy {
            OrderSide::BID
        } else {
            OrderSide::ASK
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::ASK => f.write_str("sell"),
            OrderSide::BID => f.write_str("buy"),
        }
    }
}
