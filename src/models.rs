use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// Provider-side structures

/// Bare token reference returned by the market-data provider before enrichment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub total_supply: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub unique_holders: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Per-address details used to turn a candidate into a full record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinDetails {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    #[serde(default)]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub holders: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
}

// Scoring input / output

pub const DEFAULT_DECIMALS: u8 = 18;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: String,
    pub price: f64,
    pub price_change_24h: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub holders: u64,
    pub description: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TokenRecord {
    /// Merge a candidate with its fetched details. Details win; the candidate's
    /// own market figures fill any gaps, then zero.
    pub fn enrich(candidate: Candidate, details: CoinDetails) -> Self {
        TokenRecord {
            address: candidate.address,
            name: candidate.name.unwrap_or_else(|| "Unknown".to_string()),
            symbol: candidate.symbol.unwrap_or_else(|| "UNKNOWN".to_string()),
            decimals: DEFAULT_DECIMALS,
            total_supply: candidate.total_supply.unwrap_or_else(|| "0".to_string()),
            price: details.price.unwrap_or(0.0).max(0.0),
            price_change_24h: details.price_change_24h.unwrap_or(0.0),
            volume_24h: details
                .volume_24h
                .or(candidate.volume_24h)
                .unwrap_or(0.0)
                .max(0.0),
            market_cap: details
                .market_cap
                .or(candidate.market_cap)
                .unwrap_or(0.0)
                .max(0.0),
            holders: details.holders.or(candidate.unique_holders).unwrap_or(0),
            description: details.description,
            website: details.website,
            twitter: details.twitter,
            telegram: details.telegram,
            created_at: candidate.created_at,
        }
    }

    pub fn has_social_presence(&self) -> bool {
        let present = |link: &Option<String>| link.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.twitter) || present(&self.telegram)
    }
}

struct AdviceMeta {
    label: &'static str,
    emoji: &'static str,
    rank: u32,
}

/// Five-level recommendation, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Advice {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Advice {
    // Single source for label, emoji and ranking.
    const fn meta(self) -> AdviceMeta {
        match self {
            Advice::StrongBuy => AdviceMeta {
                label: "STRONG_BUY",
                emoji: "🚀",
                rank: 5,
            },
            Advice::Buy => AdviceMeta {
                label: "BUY",
                emoji: "📈",
                rank: 4,
            },
            Advice::Hold => AdviceMeta {
                label: "HOLD",
                emoji: "⏸️",
                rank: 3,
            },
            Advice::Sell => AdviceMeta {
                label: "SELL",
                emoji: "📉",
                rank: 2,
            },
            Advice::StrongSell => AdviceMeta {
                label: "STRONG_SELL",
                emoji: "💥",
                rank: 1,
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.meta().label
    }

    pub fn emoji(self) -> &'static str {
        self.meta().emoji
    }

    pub fn rank(self) -> u32 {
        self.meta().rank
    }

    pub fn is_buy(self) -> bool {
        matches!(self, Advice::StrongBuy | Advice::Buy)
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        })
    }
}

/// Rule that contributed a line of reasoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    PriceMomentum,
    Volume,
    MarketCap,
    Holders,
    Social,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason {
    pub rule: RuleKind,
    pub emoji: &'static str,
    pub message: &'static str,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinAnalysis {
    pub coin: TokenRecord,
    pub advice: Advice,
    pub confidence: u8,
    pub risk_level: RiskLevel,
    pub potential_return: u32,
    pub reasoning: Vec<Reason>,
}

impl CoinAnalysis {
    /// Ranking key for buy recommendations.
    pub fn opportunity_score(&self) -> u32 {
        u32::from(self.confidence) + self.potential_return
    }

    /// Ranking key for the full list: advice strength weighted by confidence.
    pub fn strength_score(&self) -> u32 {
        self.advice.rank() * u32::from(self.confidence)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub all_analyses: Vec<CoinAnalysis>,
    pub buy_recommendations: Vec<CoinAnalysis>,
    pub summary: String,
}
