use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{AggregatedMetrics, Archetype};
use super::ArchetypeThresholds;

/// Maps portfolio metrics to exactly one archetype.
///
/// Rules run in a fixed priority order and the first match wins:
///
/// 1. Whale: volume at or above the whale floor
/// 2. Trencher: distinct tokens at or above the trencher floor
/// 3. Swing Trader: never matched (needs hold-time data)
/// 4. Only W's: win rate >= 50%, at least 7 winning trades, net profit
/// 5. Rug Maxi: net loss and losing trades >= 2x winning trades
/// 6. Few-Trade Wonder: at most 5 trades, net profit, biggest win >= 2x biggest loss
/// 7. Freshly Spawned: fewer than 5 trades
/// 8. Active Farmer: 30..=99 distinct tokens
/// 9. Casual Degen: volume from 50k up to the whale floor
/// 10. Average Crypto Bro: everything else
#[derive(Debug, Clone, Default)]
pub struct ArchetypeClassifier {
    thresholds: ArchetypeThresholds,
}

impl ArchetypeClassifier {
    pub fn new(thresholds: ArchetypeThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ArchetypeThresholds {
        &self.thresholds
    }

    pub fn classify(&self, metrics: &AggregatedMetrics) -> Archetype {
        let archetype = self.first_match(metrics);
        debug!(
            archetype = archetype.as_str(),
            volume = %metrics.volume,
            trades = metrics.num_trades,
            tokens = metrics.tokens_interacted,
            "Classified wallet metrics"
        );
        archetype
    }

    fn first_match(&self, m: &AggregatedMetrics) -> Archetype {
        let t = &self.thresholds;

        if m.volume >= t.whale_min_volume {
            return Archetype::Whale;
        }

        if m.tokens_interacted >= t.trencher_min_tokens {
            return Archetype::Trencher;
        }

        // Swing Trader sits here in priority but has no usable signal yet.

        if self.is_only_ws(m) {
            return Archetype::OnlyWs;
        }

        if self.is_rug_maxi(m) {
            return Archetype::RugMaxi;
        }

        if self.is_few_trade_wonder(m) {
            return Archetype::FewTradeWonder;
        }

        if m.num_trades < t.fresh_trade_limit {
            return Archetype::FreshlySpawned;
        }

        if (t.farmer_min_tokens..=t.farmer_max_tokens).contains(&m.tokens_interacted) {
            return Archetype::ActiveFarmer;
        }

        if m.volume >= t.casual_min_volume && m.volume < t.whale_min_volume {
            return Archetype::CasualDegen;
        }

        Archetype::AverageCryptoBro
    }

    fn is_only_ws(&self, m: &AggregatedMetrics) -> bool {
        m.win_rate_percent() as f64 >= self.thresholds.only_ws_min_win_rate
            && m.win_trades >= self.thresholds.only_ws_min_win_trades
            && m.overall_pnl > Decimal::ZERO
    }

    fn is_rug_maxi(&self, m: &AggregatedMetrics) -> bool {
        m.overall_pnl < Decimal::ZERO
            && m.loss_trades() >= m.win_trades.saturating_mul(self.thresholds.rug_maxi_loss_ratio)
    }

    fn is_few_trade_wonder(&self, m: &AggregatedMetrics) -> bool {
        let loss_magnitude = m.biggest_loss_amount().abs();
        let required = self.thresholds.few_trade_profit_ratio.saturating_mul(loss_magnitude);
        m.num_trades <= self.thresholds.few_trade_max_trades
            && m.biggest_profit_amount() >= required
            && m.overall_pnl > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TradeExtreme, WalletMetrics};

    fn classify(wallet: WalletMetrics) -> Archetype {
        ArchetypeClassifier::default().classify(&AggregatedMetrics::from_wallet(&wallet))
    }

    fn active(trades: u64, win_rate: f64, pnl: i64) -> WalletMetrics {
        WalletMetrics {
            num_trades: trades,
            win_rate_percent: win_rate,
            overall_pnl: Decimal::from(pnl),
            ..Default::default()
        }
    }

    #[test]
    fn test_whale() {
        let wallet = WalletMetrics {
            volume: Decimal::from(2_500_000),
            ..Default::default()
        };
        assert_eq!(classify(wallet), Archetype::Whale);

        let wallet = WalletMetrics {
            volume: Decimal::from(2_000_000),
            ..active(50, 10.0, -10)
        };
        assert_eq!(classify(wallet), Archetype::Whale);
    }

    #[test]
    fn test_whale_beats_trencher() {
        let wallet = WalletMetrics {
            volume: Decimal::from(3_000_000),
            tokens_interacted: 150,
            ..Default::default()
        };
        assert_eq!(classify(wallet), Archetype::Whale);
    }

    #[test]
    fn test_trencher() {
        let wallet = WalletMetrics {
            volume: Decimal::from(1_999_999),
            tokens_interacted: 100,
            ..active(300, 70.0, 5_000)
        };
        assert_eq!(classify(wallet), Archetype::Trencher);
    }

    #[test]
    fn test_only_ws() {
        // 14 trades at 50% -> 7 wins
        assert_eq!(classify(active(14, 50.0, 1)), Archetype::OnlyWs);
        // 6 wins is not enough
        assert_eq!(classify(active(12, 50.0, 1)), Archetype::AverageCryptoBro);
        // breaking even is not a W
        assert_eq!(classify(active(20, 80.0, 0)), Archetype::AverageCryptoBro);
    }

    #[test]
    fn test_only_ws_uses_displayed_win_rate() {
        // 99 of 200 shows as 50% on the card
        let mut metrics = AggregatedMetrics::from_wallet(&active(200, 0.0, 10));
        metrics.win_trades = 99;
        let classifier = ArchetypeClassifier::default();
        assert_eq!(classifier.classify(&metrics), Archetype::OnlyWs);

        metrics.win_trades = 98;
        assert_ne!(classifier.classify(&metrics), Archetype::OnlyWs);
    }

    #[test]
    fn test_rug_maxi() {
        // 30 trades, 10 wins, 20 losses: exactly 2x
        assert_eq!(classify(active(30, 33.4, -1)), Archetype::RugMaxi);
        // 12 wins, 18 losses: below 2x
        assert_eq!(classify(active(30, 40.0, -1)), Archetype::AverageCryptoBro);
    }

    #[test]
    fn test_rug_maxi_needs_a_net_loss() {
        assert_eq!(classify(active(30, 10.0, 0)), Archetype::AverageCryptoBro);
    }

    #[test]
    fn test_few_trade_wonder() {
        let wallet = WalletMetrics {
            biggest_profit: TradeExtreme::new(Decimal::from(1_000)),
            biggest_loss: TradeExtreme::new(Decimal::from(-500)),
            ..active(5, 40.0, 700)
        };
        assert_eq!(classify(wallet), Archetype::FewTradeWonder);
    }

    #[test]
    fn test_few_trade_wonder_precedes_freshly_spawned() {
        let wallet = WalletMetrics {
            biggest_profit: TradeExtreme::new(Decimal::from(900)),
            biggest_loss: TradeExtreme::new(Decimal::from(-100)),
            ..active(3, 66.7, 800)
        };
        assert_eq!(classify(wallet), Archetype::FewTradeWonder);
    }

    #[test]
    fn test_huge_loss_does_not_overflow_ratio() {
        let metrics: WalletMetrics = serde_json::from_value(serde_json::json!({
            "numTrades": 3,
            "overallPnl": 1,
            "biggestLoss": { "amount": 5e28 }
        }))
        .unwrap();
        assert_eq!(classify(metrics), Archetype::FreshlySpawned);

        let wallet = WalletMetrics {
            biggest_profit: TradeExtreme::new(Decimal::MAX),
            biggest_loss: TradeExtreme::new(Decimal::MIN),
            ..active(2, 50.0, 1)
        };
        assert_eq!(classify(wallet), Archetype::FewTradeWonder);
    }

    #[test]
    fn test_few_trade_wonder_ratio_not_met() {
        let wallet = WalletMetrics {
            biggest_profit: TradeExtreme::new(Decimal::from(999)),
            biggest_loss: TradeExtreme::new(Decimal::from(-500)),
            ..active(5, 40.0, 100)
        };
        assert_eq!(classify(wallet), Archetype::AverageCryptoBro);
    }

    #[test]
    fn test_freshly_spawned() {
        assert_eq!(classify(WalletMetrics::default()), Archetype::FreshlySpawned);
        assert_eq!(classify(active(4, 50.0, -10)), Archetype::FreshlySpawned);
    }

    #[test]
    fn test_active_farmer() {
        let wallet = WalletMetrics {
            volume: Decimal::from(10_000),
            tokens_interacted: 40,
            ..active(20, 30.0, 0)
        };
        assert_eq!(classify(wallet), Archetype::ActiveFarmer);

        let wallet = WalletMetrics {
            volume: Decimal::from(500_000),
            tokens_interacted: 99,
            ..active(20, 30.0, 0)
        };
        assert_eq!(classify(wallet), Archetype::ActiveFarmer);
    }

    #[test]
    fn test_casual_degen() {
        let wallet = WalletMetrics {
            volume: Decimal::from(50_000),
            tokens_interacted: 29,
            ..active(20, 30.0, 0)
        };
        assert_eq!(classify(wallet), Archetype::CasualDegen);
    }

    #[test]
    fn test_average_crypto_bro() {
        let wallet = WalletMetrics {
            volume: Decimal::from(49_999),
            tokens_interacted: 10,
            ..active(20, 30.0, 0)
        };
        assert_eq!(classify(wallet), Archetype::AverageCryptoBro);
    }

    #[test]
    fn test_deterministic() {
        let metrics = AggregatedMetrics::from_wallet(&WalletMetrics {
            volume: Decimal::from(75_000),
            tokens_interacted: 12,
            ..active(9, 55.0, 300)
        });
        let classifier = ArchetypeClassifier::default();
        let first = classifier.classify(&metrics);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&metrics), first);
        }
    }

    #[test]
    fn test_never_swing_trader() {
        let classifier = ArchetypeClassifier::default();
        for volume in [0i64, 10_000, 50_000, 1_000_000, 2_000_000] {
            for tokens in [0u64, 30, 99, 100] {
                for trades in [0u64, 4, 5, 6, 40] {
                    for win_rate in [0.0, 35.0, 50.0, 100.0] {
                        for pnl in [-1_000i64, 0, 1_000] {
                            let metrics = AggregatedMetrics::from_wallet(&WalletMetrics {
                                volume: Decimal::from(volume),
                                tokens_interacted: tokens,
                                ..active(trades, win_rate, pnl)
                            });
                            assert_ne!(classifier.classify(&metrics), Archetype::SwingTrader);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = ArchetypeClassifier::new(ArchetypeThresholds {
            whale_min_volume: Decimal::from(100_000),
            ..Default::default()
        });
        let metrics = AggregatedMetrics::from_wallet(&WalletMetrics {
            volume: Decimal::from(150_000),
            ..Default::default()
        });
        assert_eq!(classifier.classify(&metrics), Archetype::Whale);
    }
}
