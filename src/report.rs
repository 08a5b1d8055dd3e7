//! Report text for the chat front end (Markdown flavoured).

use crate::models::CoinAnalysis;
use chrono::Local;

pub const NO_TRENDING_COINS: &str = "No trending coins found at the moment.";

pub const SCAN_IN_PROGRESS: &str = "🔍 *Scanning Zora Trending Coins...*\n\n\
     Please wait while I analyze the latest trending coins and generate buy recommendations.";

pub const QUICK_SCAN_IN_PROGRESS: &str =
    "🔍 *Quick Scan in Progress...*\n\nGetting the latest trending coins overview.";

pub const SCAN_FAILED: &str = "❌ *Scan Failed*\n\n\
     There was an error scanning trending coins. Please try again later or check the logs.";

pub const QUICK_SCAN_FAILED: &str =
    "❌ *Quick Scan Failed*\n\nThere was an error getting trending coins. Please try again later.";

const SUMMARY_TOP_BUYS: usize = 3;
const REPORT_TOP_BUYS: usize = 5;
const REPORT_ALL_COINS: usize = 10;
const KEY_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockStyle {
    Summary,
    Detailed,
}

/// Local time as `M/D/YYYY, h:MM:SS AM`.
pub fn timestamp_now() -> String {
    Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Rounded mean confidence; 0 for an empty list.
pub fn average_confidence(analyses: &[CoinAnalysis]) -> u32 {
    if analyses.is_empty() {
        return 0;
    }
    let total: u32 = analyses.iter().map(|a| u32::from(a.confidence)).sum();
    (f64::from(total) / analyses.len() as f64).round() as u32
}

/// Buy recommendations by `confidence + potential_return`, highest first.
/// Equal scores keep their input order.
pub fn rank_buys(buys: &[CoinAnalysis]) -> Vec<&CoinAnalysis> {
    let mut ranked: Vec<&CoinAnalysis> = buys.iter().collect();
    ranked.sort_by(|a, b| b.opportunity_score().cmp(&a.opportunity_score()));
    ranked
}

/// All analyses by advice rank times confidence, highest first. Stable.
pub fn rank_by_strength(analyses: &[CoinAnalysis]) -> Vec<&CoinAnalysis> {
    let mut ranked: Vec<&CoinAnalysis> = analyses.iter().collect();
    ranked.sort_by(|a, b| b.strength_score().cmp(&a.strength_score()));
    ranked
}

pub fn format_price(price: f64) -> String {
    format!("${:.6}", price)
}

/// Percentage with an explicit `+` for gains.
pub fn format_change(change: f64, decimals: usize) -> String {
    let sign = if change > 0.0 { "+" } else { "" };
    format!("{}{:.*}%", sign, decimals, change)
}

pub fn format_market_cap(market_cap: f64) -> String {
    format!("${:.2}M", market_cap / 1_000_000.0)
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn push_header(out: &mut String, all: &[CoinAnalysis], buys: &[CoinAnalysis], timestamp: &str) {
    out.push_str("📊 *Zora Trending Coins Report*\n");
    out.push_str(&format!("🕐 *{}*\n\n", timestamp));
    out.push_str("📈 *Summary*\n");
    out.push_str(&format!("• Total coins analyzed: {}\n", all.len()));
    out.push_str(&format!("• Buy recommendations: {}\n", buys.len()));
    out.push_str(&format!("• Average confidence: {}%\n\n", average_confidence(all)));
}

fn push_buy_block(out: &mut String, position: usize, analysis: &CoinAnalysis, style: BlockStyle) {
    let coin = &analysis.coin;
    out.push_str(&format!("*{}. {} ({})*\n", position, coin.name, coin.symbol));
    out.push_str(&format!("💰 Price: {}\n", format_price(coin.price)));
    out.push_str(&format!("📈 24h Change: {}\n", format_change(coin.price_change_24h, 2)));
    out.push_str(&format!("💎 Market Cap: {}\n", format_market_cap(coin.market_cap)));
    if style == BlockStyle::Detailed {
        out.push_str(&format!("👥 Holders: {}\n", group_thousands(coin.holders)));
    }
    out.push_str(&format!(
        "🎯 Advice: {} {}\n",
        analysis.advice.emoji(),
        analysis.advice
    ));
    out.push_str(&format!("📊 Confidence: {}%\n", analysis.confidence));

    match style {
        BlockStyle::Summary => {
            out.push_str(&format!("📍 Address: `{}`\n\n", coin.address));
        }
        BlockStyle::Detailed => {
            out.push_str(&format!("⚠️ Risk: {}\n", analysis.risk_level));
            out.push_str(&format!("🚀 Potential Return: {}%\n", analysis.potential_return));
            out.push_str(&format!("📍 Address: `{}`\n", coin.address));
            if !analysis.reasoning.is_empty() {
                out.push_str("💡 Key Points:\n");
                for reason in analysis.reasoning.iter().take(KEY_POINTS) {
                    out.push_str(&format!("  • {}\n", reason));
                }
            }
            out.push('\n');
        }
    }
}

fn push_top_buys(out: &mut String, buys: &[CoinAnalysis], limit: usize, style: BlockStyle) {
    if buys.is_empty() {
        return;
    }
    out.push_str("🔥 *TOP BUY RECOMMENDATIONS*\n\n");
    for (i, analysis) in rank_buys(buys).into_iter().take(limit).enumerate() {
        push_buy_block(out, i + 1, analysis, style);
    }
}

pub fn summarize(all: &[CoinAnalysis], buys: &[CoinAnalysis]) -> String {
    summarize_at(all, buys, &timestamp_now())
}

/// Short report: totals plus the top three buy recommendations.
pub fn summarize_at(all: &[CoinAnalysis], buys: &[CoinAnalysis], timestamp: &str) -> String {
    let mut out = String::new();
    push_header(&mut out, all, buys, timestamp);
    push_top_buys(&mut out, buys, SUMMARY_TOP_BUYS, BlockStyle::Summary);
    out
}

pub fn detailed_report(all: &[CoinAnalysis], buys: &[CoinAnalysis]) -> String {
    detailed_report_at(all, buys, &timestamp_now())
}

/// Full report: totals, top five buys with key points, the ten strongest
/// coins overall and a static list of follow-up commands.
pub fn detailed_report_at(all: &[CoinAnalysis], buys: &[CoinAnalysis], timestamp: &str) -> String {
    let mut out = String::new();
    push_header(&mut out, all, buys, timestamp);
    push_top_buys(&mut out, buys, REPORT_TOP_BUYS, BlockStyle::Detailed);

    out.push_str("📋 *All Analyzed Coins*\n");
    out.push_str("(Sorted by recommendation strength)\n\n");
    for analysis in rank_by_strength(all).into_iter().take(REPORT_ALL_COINS) {
        let coin = &analysis.coin;
        out.push_str(&format!(
            "{} *{}* - {} ({}%)\n",
            analysis.advice.emoji(),
            coin.symbol,
            analysis.advice,
            analysis.confidence
        ));
        out.push_str(&format!(
            "   💰 {} | 📈 {}\n\n",
            format_price(coin.price),
            format_change(coin.price_change_24h, 1)
        ));
    }

    out.push_str("\n🔗 *Quick Actions*\n");
    out.push_str("• Use /buy to purchase recommended tokens\n");
    out.push_str("• Check /balance for your current holdings\n");
    out.push_str("• View /history for past transactions\n");
    out
}
