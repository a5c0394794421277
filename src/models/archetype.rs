use serde::{Deserialize, Serialize};
use std::fmt;

/// Card template used for every archetype until per-archetype art ships.
pub const DEFAULT_CARD_BACKGROUND: &str = "whale-card-bg.png";

/// Behavioral label assigned to a wallet (or a portfolio of wallets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    #[serde(rename = "Whale")]
    Whale,
    #[serde(rename = "Trencher")]
    Trencher,
    /// Needs per-trade hold times, which the metric summary does not carry.
    /// Never produced by the classifier.
    #[serde(rename = "Swing Trader")]
    SwingTrader,
    #[serde(rename = "Only W's")]
    OnlyWs,
    #[serde(rename = "Rug Maxi")]
    RugMaxi,
    #[serde(rename = "Few-Trade Wonder")]
    FewTradeWonder,
    #[serde(rename = "Freshly Spawned")]
    FreshlySpawned,
    #[serde(rename = "Active Farmer")]
    ActiveFarmer,
    #[serde(rename = "Casual Degen")]
    CasualDegen,
    #[serde(rename = "Average Crypto Bro")]
    AverageCryptoBro,
}

impl Archetype {
    pub const ALL: [Archetype; 10] = [
        Archetype::Whale,
        Archetype::Trencher,
        Archetype::SwingTrader,
        Archetype::OnlyWs,
        Archetype::RugMaxi,
        Archetype::FewTradeWonder,
        Archetype::FreshlySpawned,
        Archetype::ActiveFarmer,
        Archetype::CasualDegen,
        Archetype::AverageCryptoBro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Whale => "Whale",
            Archetype::Trencher => "Trencher",
            Archetype::SwingTrader => "Swing Trader",
            Archetype::OnlyWs => "Only W's",
            Archetype::RugMaxi => "Rug Maxi",
            Archetype::FewTradeWonder => "Few-Trade Wonder",
            Archetype::FreshlySpawned => "Freshly Spawned",
            Archetype::ActiveFarmer => "Active Farmer",
            Archetype::CasualDegen => "Casual Degen",
            Archetype::AverageCryptoBro => "Average Crypto Bro",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Archetype::Whale => "Your size is size.",
            Archetype::Trencher => "No token left unturned.",
            Archetype::SwingTrader => "TA over everything.",
            Archetype::OnlyWs => "Clean entries, cleaner exits.",
            Archetype::RugMaxi => "You buy tops with confidence.",
            Archetype::FewTradeWonder => "Sniper with a day job.",
            Archetype::FreshlySpawned => "Welcome onchain, traveler.",
            Archetype::ActiveFarmer => "You touch more tokens than influencers shill.",
            Archetype::CasualDegen => "You trade enough to matter, not enough to stress.",
            Archetype::AverageCryptoBro => "You talk crypto more than you trade.",
        }
    }

    /// Background image asset for the share card.
    pub fn card_background(&self) -> &'static str {
        DEFAULT_CARD_BACKGROUND
    }

    /// Full card template image drawn behind the stats.
    pub fn card_template(&self) -> &'static str {
        match self {
            Archetype::Whale => "whale.png",
            Archetype::Trencher => "trencher.png",
            Archetype::SwingTrader => "swing-trader.png",
            Archetype::OnlyWs => "only-ws.png",
            Archetype::RugMaxi => "rug-maxi.png",
            Archetype::FewTradeWonder => "few-trade-wonder.png",
            Archetype::FreshlySpawned => "freshly-spawned.png",
            Archetype::ActiveFarmer => "active-farmer.png",
            Archetype::CasualDegen => "casual-degen.png",
            Archetype::AverageCryptoBro => "average-crypto-bro.png",
        }
    }

    /// Case-insensitive label lookup. "Only W" is accepted for Only W's.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("Only W") {
            return Some(Archetype::OnlyWs);
        }
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
