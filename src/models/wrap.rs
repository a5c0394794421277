use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;
use chrono::{DateTime, Utc};

use super::{AggregatedMetrics, Archetype, TokenRef, TradeExtreme};
use crate::utils::{format_currency, format_win_rate};

/// A biggest profit/loss as shown on the card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtremeDisplay {
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl_percent: Option<String>,
}

impl ExtremeDisplay {
    fn from_extreme(extreme: Option<&TradeExtreme>) -> Self {
        match extreme {
            Some(e) => Self {
                display: e.display_text(),
                token: e.token.clone(),
                pnl_percent: e.pnl_percent.clone(),
            },
            None => Self {
                display: format_currency(Decimal::ZERO),
                token: None,
                pnl_percent: None,
            },
        }
    }
}

/// Everything the share card needs: the label plus display-ready numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapSummary {
    pub archetype: Archetype,
    pub tagline: String,
    pub card_background: String,
    pub card_template: String,
    pub total_volume: String,
    #[serde(rename = "overallPnL")]
    pub overall_pnl: String,
    pub win_rate: String,
    pub biggest_profit: ExtremeDisplay,
    pub biggest_loss: ExtremeDisplay,
    pub pnl_positive: bool,
    pub addresses: Vec<String>,
    /// First address plus how many more were queried, e.g. `0x74...e842 + 1 more`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_label: Option<String>,
    pub wallets_counted: usize,
    pub generated_at: DateTime<Utc>,
}

impl WrapSummary {
    pub fn new(archetype: Archetype, metrics: &AggregatedMetrics, addresses: Vec<String>) -> Self {
        Self {
            archetype,
            tagline: archetype.tagline().to_string(),
            card_background: archetype.card_background().to_string(),
            card_template: archetype.card_template().to_string(),
            total_volume: format_currency(metrics.volume),
            overall_pnl: format_currency(metrics.overall_pnl),
            win_rate: format_win_rate(metrics.win_trades, metrics.num_trades),
            biggest_profit: ExtremeDisplay::from_extreme(metrics.biggest_profit.as_ref()),
            biggest_loss: ExtremeDisplay::from_extreme(metrics.biggest_loss.as_ref()),
            pnl_positive: metrics.overall_pnl >= Decimal::ZERO,
            address_label: address_label(&addresses),
            addresses,
            wallets_counted: metrics.wallets_counted,
            generated_at: Utc::now(),
        }
    }
}

fn address_label(addresses: &[String]) -> Option<String> {
    let first = addresses.first()?;
    Some(match addresses.len() {
        1 => first.clone(),
        n => format!("{} + {} more", first, n - 1),
    })
}
