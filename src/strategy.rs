//! Rule-based scoring of a single token record.

use crate::models::{Advice, CoinAnalysis, Reason, RiskLevel, RuleKind, TokenRecord};

const BASE_CONFIDENCE: i32 = 50;

/// Rules in evaluation order. Reasoning follows this order.
pub const RULES: [RuleKind; 5] = [
    RuleKind::PriceMomentum,
    RuleKind::Volume,
    RuleKind::MarketCap,
    RuleKind::Holders,
    RuleKind::Social,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnAdjust {
    Keep,
    Set(u32),
    Add(u32),
}

/// Effect of the single branch of a rule that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub reason: Reason,
    pub advice: Option<Advice>,
    pub confidence_delta: i32,
    pub risk: Option<RiskLevel>,
    pub potential_return: ReturnAdjust,
}

impl RuleOutcome {
    fn new(
        rule: RuleKind,
        emoji: &'static str,
        message: &'static str,
        confidence_delta: i32,
    ) -> Self {
        RuleOutcome {
            reason: Reason {
                rule,
                emoji,
                message,
            },
            advice: None,
            confidence_delta,
            risk: None,
            potential_return: ReturnAdjust::Keep,
        }
    }

    fn advice(mut self, advice: Advice) -> Self {
        self.advice = Some(advice);
        self
    }

    fn risk(mut self, risk: RiskLevel) -> Self {
        self.risk = Some(risk);
        self
    }

    fn potential_return(mut self, adjust: ReturnAdjust) -> Self {
        self.potential_return = adjust;
        self
    }
}

impl RuleKind {
    /// Evaluate the rule's branches in order and return the first that matches.
    pub fn evaluate(self, record: &TokenRecord) -> Option<RuleOutcome> {
        match self {
            RuleKind::PriceMomentum => {
                let change = record.price_change_24h;
                if change > 50.0 {
                    Some(
                        RuleOutcome::new(self, "🚀", "Strong 24h price increase", 20)
                            .advice(Advice::StrongBuy)
                            .potential_return(ReturnAdjust::Set(100)),
                    )
                } else if change > 20.0 {
                    Some(
                        RuleOutcome::new(self, "📈", "Good 24h price increase", 15)
                            .advice(Advice::Buy)
                            .potential_return(ReturnAdjust::Set(50)),
                    )
                } else if change < -30.0 {
                    Some(
                        RuleOutcome::new(self, "📉", "Significant price decline", 10)
                            .advice(Advice::Sell),
                    )
                } else {
                    None
                }
            }
            RuleKind::Volume => {
                if record.volume_24h > 500_000.0 {
                    Some(RuleOutcome::new(self, "💪", "High trading volume", 10))
                } else if record.volume_24h < 10_000.0 {
                    Some(
                        RuleOutcome::new(self, "⚠️", "Low trading volume", -10)
                            .risk(RiskLevel::High),
                    )
                } else {
                    None
                }
            }
            RuleKind::MarketCap => {
                if record.market_cap < 1_000_000.0 {
                    Some(
                        RuleOutcome::new(self, "💰", "Low market cap - high potential", 15)
                            .potential_return(ReturnAdjust::Add(200)),
                    )
                } else if record.market_cap > 10_000_000.0 {
                    Some(RuleOutcome::new(
                        self,
                        "🏢",
                        "High market cap - lower potential",
                        -10,
                    ))
                } else {
                    None
                }
            }
            RuleKind::Holders => {
                if record.holders > 1000 {
                    Some(RuleOutcome::new(self, "👥", "Good holder distribution", 5))
                } else if record.holders < 100 {
                    Some(
                        RuleOutcome::new(self, "⚠️", "Low holder count - risky", -15)
                            .risk(RiskLevel::High),
                    )
                } else {
                    None
                }
            }
            RuleKind::Social => record
                .has_social_presence()
                .then(|| RuleOutcome::new(self, "📱", "Active social presence", 5)),
        }
    }
}

/// Score a token record. Pure: identical input always yields identical output.
pub fn analyze(record: TokenRecord) -> CoinAnalysis {
    let mut advice = Advice::Hold;
    let mut confidence = BASE_CONFIDENCE;
    let mut risk_level = RiskLevel::Medium;
    let mut potential_return: u32 = 0;
    let mut reasoning = Vec::new();

    for outcome in RULES.iter().filter_map(|rule| rule.evaluate(&record)) {
        if let Some(a) = outcome.advice {
            advice = a;
        }
        if let Some(r) = outcome.risk {
            risk_level = r;
        }
        confidence += outcome.confidence_delta;
        potential_return = match outcome.potential_return {
            ReturnAdjust::Keep => potential_return,
            ReturnAdjust::Set(v) => v,
            ReturnAdjust::Add(v) => potential_return + v,
        };
        reasoning.push(outcome.reason);
    }

    CoinAnalysis {
        coin: record,
        advice,
        confidence: confidence.clamp(0, 100) as u8,
        risk_level,
        potential_return,
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(change: f64, volume: f64, market_cap: f64, holders: u64) -> TokenRecord {
        TokenRecord {
            address: "0x0000000000000000000000000000000000000001".to_string(),
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            decimals: 18,
            total_supply: "1000000000".to_string(),
            price: 0.001,
            price_change_24h: change,
            volume_24h: volume,
            market_cap,
            holders,
            description: None,
            website: None,
            twitter: None,
            telegram: None,
            created_at: None,
        }
    }

    #[test]
    fn test_strong_buy_clamps_to_100() {
        let mut r = record(60.0, 600_000.0, 500_000.0, 2000);
        r.twitter = Some("x".to_string());

        let analysis = analyze(r);
        assert_eq!(analysis.advice, Advice::StrongBuy);
        assert_eq!(analysis.confidence, 100);
        assert_eq!(analysis.potential_return, 300);
        assert_eq!(analysis.risk_level, RiskLevel::Medium);
        let rules: Vec<RuleKind> = analysis.reasoning.iter().map(|r| r.rule).collect();
        assert_eq!(rules, RULES.to_vec());
    }

    #[test]
    fn test_declining_thin_token_is_high_risk_sell() {
        let analysis = analyze(record(-40.0, 5_000.0, 20_000_000.0, 50));
        assert_eq!(analysis.advice, Advice::Sell);
        assert_eq!(analysis.confidence, 25);
        assert_eq!(analysis.risk_level, RiskLevel::High);
        assert_eq!(analysis.potential_return, 0);
        assert_eq!(analysis.reasoning.len(), 4);
    }

    #[test]
    fn test_neutral_record_keeps_defaults() {
        let analysis = analyze(record(5.0, 50_000.0, 5_000_000.0, 500));
        assert_eq!(analysis.advice, Advice::Hold);
        assert_eq!(analysis.confidence, 50);
        assert_eq!(analysis.risk_level, RiskLevel::Medium);
        assert_eq!(analysis.potential_return, 0);
        assert!(analysis.reasoning.is_empty());
    }

    #[test]
    fn test_whitespace_social_link_counts_as_presence() {
        let mut r = record(5.0, 50_000.0, 5_000_000.0, 500);
        r.twitter = Some(" ".to_string());
        let analysis = analyze(r);
        assert_eq!(analysis.advice, Advice::Hold);
        assert_eq!(analysis.confidence, 55);
        assert_eq!(analysis.reasoning.len(), 1);
        assert_eq!(analysis.reasoning[0].rule, RuleKind::Social);

        let mut r = record(5.0, 50_000.0, 5_000_000.0, 500);
        r.twitter = Some(String::new());
        assert_eq!(analyze(r).confidence, 50);
    }

    #[test]
    fn test_buy_sets_return_before_market_cap_bonus() {
        let analysis = analyze(record(25.0, 50_000.0, 10_000.0, 500));
        assert_eq!(analysis.advice, Advice::Buy);
        assert_eq!(analysis.potential_return, 250);
        assert_eq!(analysis.confidence, 80);
    }

    #[test]
    fn test_penalties_accumulate() {
        // volume and holders penalties only
        let analysis = analyze(record(0.0, 0.0, 5_000_000.0, 0));
        assert_eq!(analysis.confidence, 25);

        let analysis = analyze(record(0.0, 0.0, 50_000_000.0, 0));
        assert_eq!(analysis.confidence, 15);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let analysis = analyze(record(50.0, 500_000.0, 1_000_000.0, 1000));
        assert_eq!(analysis.advice, Advice::Buy);
        assert_eq!(analysis.confidence, 65);

        let analysis = analyze(record(-30.0, 10_000.0, 10_000_000.0, 100));
        assert_eq!(analysis.advice, Advice::Hold);
        assert!(analysis.reasoning.is_empty());
    }

    #[test]
    fn test_scoring_is_deterministic_and_bounded() {
        let changes = [-95.0, -31.0, -30.0, 0.0, 20.0, 20.5, 50.0, 51.0, 400.0];
        let volumes = [0.0, 9_999.0, 10_000.0, 500_000.0, 500_001.0];
        let caps = [0.0, 999_999.0, 1_000_000.0, 10_000_000.0, 10_000_001.0];
        let holders = [0, 99, 100, 1000, 1001];

        for &c in &changes {
            for &v in &volumes {
                for &m in &caps {
                    for &h in &holders {
                        let r = record(c, v, m, h);
                        let momentum_hits =
                            RuleKind::PriceMomentum.evaluate(&r).into_iter().count();
                        assert!(momentum_hits <= 1);

                        let first = analyze(r.clone());
                        let second = analyze(r);
                        assert!(first.confidence <= 100);
                        assert_eq!(first, second);
                    }
                }
            }
        }
    }
}
