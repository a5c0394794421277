use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;

use crate::utils::format_currency;

/// Token attached to a biggest profit/loss trade, for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRef {
    #[serde(default, alias = "logo", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// A single extreme trade (largest win or largest loss) reported for a wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeExtreme {
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "lenient::string")]
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenRef>,
    #[serde(default, alias = "pnlPercentDisplay", skip_serializing_if = "Option::is_none")]
    pub pnl_percent: Option<String>,
}

impl TradeExtreme {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            ..Default::default()
        }
    }

    /// The provider's display string, or the formatted amount when it sent none.
    pub fn display_text(&self) -> String {
        if self.display.trim().is_empty() {
            format_currency(self.amount)
        } else {
            self.display.clone()
        }
    }
}

/// Pre-aggregated trading summary for one wallet address, as returned by the
/// metrics provider.
///
/// Decoding never fails on bad numbers: missing, null or malformed numeric
/// fields become zero. `biggest_loss.amount` is always stored signed and
/// non-positive, `biggest_profit.amount` non-negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireWalletMetrics")]
pub struct WalletMetrics {
    pub volume: Decimal,
    pub num_trades: u64,
    pub win_rate_percent: f64,
    pub overall_pnl: Decimal,
    pub tokens_interacted: u64,
    pub biggest_profit: TradeExtreme,
    pub biggest_loss: TradeExtreme,
}

impl WalletMetrics {
    /// Winning trades implied by the win rate, rounded to the nearest trade.
    pub fn win_trades(&self) -> u64 {
        let implied = (self.win_rate_percent / 100.0 * self.num_trades as f64).round();
        if implied <= 0.0 {
            0
        } else {
            (implied as u64).min(self.num_trades)
        }
    }

    pub fn loss_trades(&self) -> u64 {
        self.num_trades - self.win_trades()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireWalletMetrics {
    #[serde(default, deserialize_with = "lenient::decimal")]
    volume: Decimal,
    #[serde(default, deserialize_with = "lenient::count")]
    num_trades: u64,
    #[serde(default, deserialize_with = "lenient::percent")]
    win_rate_percent: f64,
    #[serde(default, alias = "overallPnL", deserialize_with = "lenient::decimal")]
    overall_pnl: Decimal,
    #[serde(default, deserialize_with = "lenient::count")]
    tokens_interacted: u64,
    #[serde(default, deserialize_with = "lenient::extreme")]
    biggest_profit: TradeExtreme,
    #[serde(default, deserialize_with = "lenient::extreme")]
    biggest_loss: TradeExtreme,
}

impl From<WireWalletMetrics> for WalletMetrics {
    fn from(wire: WireWalletMetrics) -> Self {
        let mut biggest_profit = wire.biggest_profit;
        biggest_profit.amount = biggest_profit.amount.abs();

        let mut biggest_loss = wire.biggest_loss;
        biggest_loss.amount = -biggest_loss.amount.abs();

        Self {
            volume: wire.volume,
            num_trades: wire.num_trades,
            win_rate_percent: wire.win_rate_percent,
            overall_pnl: wire.overall_pnl,
            tokens_interacted: wire.tokens_interacted,
            biggest_profit,
            biggest_loss,
        }
    }
}

/// Field decoders that turn anything unusable into zero instead of an error.
mod lenient {
    use std::str::FromStr;

    use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::{Map, Value};

    use super::{TokenRef, TradeExtreme};

    fn to_decimal(value: &Value) -> Decimal {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Decimal::from(i)
                } else if let Some(u) = n.as_u64() {
                    Decimal::from(u)
                } else {
                    n.as_f64().map(from_f64_saturating).unwrap_or(Decimal::ZERO)
                }
            }
            Value::String(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(from_f64_saturating))
                    .unwrap_or(Decimal::ZERO)
            }
            _ => Decimal::ZERO,
        }
    }

    /// Out-of-range values clamp to the Decimal bounds, NaN becomes zero.
    fn from_f64_saturating(f: f64) -> Decimal {
        match Decimal::from_f64(f) {
            Some(d) => d,
            None if f.is_nan() || f.abs() < 1.0 => Decimal::ZERO,
            None if f > 0.0 => Decimal::MAX,
            None => Decimal::MIN,
        }
    }

    fn to_opt_string(value: Option<&Value>) -> Option<String> {
        match value {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn to_token(value: Option<&Value>) -> Option<TokenRef> {
        let map = value?.as_object()?;
        Some(TokenRef {
            logo_url: to_opt_string(map.get("logoUrl").or_else(|| map.get("logo"))),
            symbol: to_opt_string(map.get("symbol")),
        })
    }

    /// Each field of a profit/loss record is decoded on its own, so one bad
    /// field never wipes out the amount.
    fn to_extreme(map: &Map<String, Value>) -> TradeExtreme {
        TradeExtreme {
            amount: map.get("amount").map(to_decimal).unwrap_or(Decimal::ZERO),
            display: to_opt_string(map.get("display")).unwrap_or_default(),
            token: to_token(map.get("token")),
            pnl_percent: to_opt_string(
                map.get("pnlPercent").or_else(|| map.get("pnlPercentDisplay")),
            ),
        }
    }

    pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(to_decimal(&value))
    }

    pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let n = to_decimal(&value).trunc();
        Ok(if n.is_sign_negative() { 0 } else { n.to_u64().unwrap_or(u64::MAX) })
    }

    pub fn percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let pct = to_decimal(&value).to_f64().unwrap_or(0.0);
        Ok(pct.clamp(0.0, 100.0))
    }

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub fn extreme<'de, D>(deserializer: D) -> Result<TradeExtreme, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Object(map) => to_extreme(&map),
            // Some providers send the bare amount instead of a record
            Value::Number(_) | Value::String(_) => TradeExtreme::new(to_decimal(&value)),
            _ => TradeExtreme::default(),
        })
    }
}
