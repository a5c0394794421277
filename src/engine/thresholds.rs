use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;

/// Cut-offs for the archetype rule cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeThresholds {
    /// Whale: volume at or above this.
    pub whale_min_volume: Decimal,
    /// Trencher: distinct tokens at or above this.
    pub trencher_min_tokens: u64,
    pub only_ws_min_win_rate: f64,
    pub only_ws_min_win_trades: u64,
    /// Rug Maxi: losing trades at least this many times the winning ones.
    pub rug_maxi_loss_ratio: u64,
    pub few_trade_max_trades: u64,
    /// Few-Trade Wonder: biggest profit at least this many times the biggest loss.
    pub few_trade_profit_ratio: Decimal,
    /// Freshly Spawned: strictly fewer trades than this.
    pub fresh_trade_limit: u64,
    pub farmer_min_tokens: u64,
    pub farmer_max_tokens: u64,
    pub casual_min_volume: Decimal,
}

impl Default for ArchetypeThresholds {
    fn default() -> Self {
        Self {
            whale_min_volume: Decimal::from(2_000_000),
            trencher_min_tokens: 100,
            only_ws_min_win_rate: 50.0,
            only_ws_min_win_trades: 7,
            rug_maxi_loss_ratio: 2,
            few_trade_max_trades: 5,
            few_trade_profit_ratio: Decimal::from(2),
            fresh_trade_limit: 5,
            farmer_min_tokens: 30,
            farmer_max_tokens: 99,
            casual_min_volume: Decimal::from(50_000),
        }
    }
}

impl ArchetypeThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.whale_min_volume <= Decimal::ZERO || self.casual_min_volume < Decimal::ZERO {
            return Err("Volume thresholds must be positive".to_string());
        }

        if self.casual_min_volume >= self.whale_min_volume {
            return Err(format!(
                "Casual Degen volume floor {} must be below the Whale floor {}",
                self.casual_min_volume, self.whale_min_volume
            ));
        }

        if self.farmer_min_tokens > self.farmer_max_tokens {
            return Err(format!(
                "Active Farmer token range {}..={} is empty",
                self.farmer_min_tokens, self.farmer_max_tokens
            ));
        }

        if self.farmer_max_tokens >= self.trencher_min_tokens {
            return Err(format!(
                "Active Farmer upper bound {} must be below the Trencher floor {}",
                self.farmer_max_tokens, self.trencher_min_tokens
            ));
        }

        if !(0.0..=100.0).contains(&self.only_ws_min_win_rate) {
            return Err("Only W's win rate threshold must be between 0 and 100".to_string());
        }

        if self.few_trade_profit_ratio < Decimal::ZERO {
            return Err("Few-Trade Wonder profit ratio must be non-negative".to_string());
        }

        Ok(())
    }
}
