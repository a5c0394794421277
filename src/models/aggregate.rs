use serde::Serialize;
use rust_decimal::Decimal;

use super::{TradeExtreme, WalletMetrics};
use crate::utils::rounded_win_rate;

/// Portfolio-level metrics summed over every wallet that returned data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetrics {
    pub volume: Decimal,
    pub overall_pnl: Decimal,
    pub tokens_interacted: u64,
    pub num_trades: u64,
    pub win_trades: u64,
    pub biggest_profit: Option<TradeExtreme>,
    pub biggest_loss: Option<TradeExtreme>,
    pub wallets_counted: usize,
}

impl AggregatedMetrics {
    pub fn from_wallet(metrics: &WalletMetrics) -> Self {
        let mut aggregated = Self::default();
        aggregated.merge(metrics);
        aggregated
    }

    /// Fold one wallet's summary into the running totals.
    ///
    /// Counts and amounts are plain sums, so the same wallet merged twice is
    /// counted twice. Sums saturate at the numeric bounds instead of
    /// overflowing. The extremes keep whichever record is strictly larger
    /// (profit) or strictly more negative (loss); on a tie the earlier one stays.
    pub fn merge(&mut self, other: &WalletMetrics) {
        self.volume = self.volume.saturating_add(other.volume);
        self.overall_pnl = self.overall_pnl.saturating_add(other.overall_pnl);
        self.tokens_interacted = self.tokens_interacted.saturating_add(other.tokens_interacted);
        self.num_trades = self.num_trades.saturating_add(other.num_trades);
        self.win_trades = self.win_trades.saturating_add(other.win_trades());

        let replace_profit = match &self.biggest_profit {
            Some(current) => other.biggest_profit.amount > current.amount,
            None => true,
        };
        if replace_profit {
            self.biggest_profit = Some(other.biggest_profit.clone());
        }

        let replace_loss = match &self.biggest_loss {
            Some(current) => other.biggest_loss.amount < current.amount,
            None => true,
        };
        if replace_loss {
            self.biggest_loss = Some(other.biggest_loss.clone());
        }

        self.wallets_counted += 1;
    }

    pub fn loss_trades(&self) -> u64 {
        self.num_trades.saturating_sub(self.win_trades)
    }

    /// Whole-number win rate recomputed from the summed trade counts, the
    /// same figure the card shows. 0 with no trades.
    pub fn win_rate_percent(&self) -> u64 {
        rounded_win_rate(self.win_trades, self.num_trades)
    }

    pub fn biggest_profit_amount(&self) -> Decimal {
        self.biggest_profit.as_ref().map(|p| p.amount).unwrap_or(Decimal::ZERO)
    }

    pub fn biggest_loss_amount(&self) -> Decimal {
        self.biggest_loss.as_ref().map(|l| l.amount).unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.wallets_counted == 0
    }
}
