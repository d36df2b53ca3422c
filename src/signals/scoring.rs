//! Weighted rule-table scoring

use crate::models::indicators::IndicatorSet;
use crate::models::signal::{IndicatorSnapshot, Signal, SignalContext, SignalTier};
use crate::models::strategy::{RuleCategory, ScoreCategory, ScoringProfile, TierThresholds};

/// Points one category contributed after its cap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: ScoreCategory,
    pub points: u32,
    pub capped: bool,
}

/// Result of running the rule table over one indicator set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCard {
    pub points: u32,
    pub conditions: Vec<String>,
    pub categories: Vec<CategoryScore>,
}

/// Sums the points of every satisfied rule, category by category.
///
/// Inside a group only the first satisfied tier counts. Gated groups are
/// skipped unless the group before them matched. Each category subtotal is
/// clamped to its cap.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    categories: Vec<RuleCategory>,
    tiers: TierThresholds,
}

impl ScoringEngine {
    pub fn new(profile: &ScoringProfile) -> Self {
        Self {
            categories: profile.categories.clone(),
            tiers: profile.tiers,
        }
    }

    pub fn tiers(&self) -> &TierThresholds {
        &self.tiers
    }

    pub fn score(&self, indicators: &IndicatorSet) -> ScoreCard {
        let mut conditions = Vec::new();
        let mut categories = Vec::with_capacity(self.categories.len());

        for category in &self.categories {
            let mut subtotal = 0u32;
            let mut previous_matched = false;

            for group in &category.groups {
                if group.requires_previous && !previous_matched {
                    continue;
                }

                match group.tiers.iter().find(|t| t.condition.holds(indicators)) {
                    Some(tier) => {
                        subtotal += tier.points;
                        conditions.push(tier.label.clone());
                        previous_matched = true;
                    }
                    None => previous_matched = false,
                }
            }

            categories.push(CategoryScore {
                category: category.category,
                points: subtotal.min(category.cap),
                capped: subtotal > category.cap,
            });
        }

        ScoreCard {
            points: categories.iter().map(|c| c.points).sum(),
            conditions,
            categories,
        }
    }

    pub fn classify(&self, points: u32) -> Option<SignalTier> {
        self.tiers.classify(points)
    }

    /// Score `indicators` and build a signal when the total clears the
    /// minimum tier.
    pub fn evaluate(
        &self,
        symbol: &str,
        indicators: &IndicatorSet,
        price: f64,
        ctx: SignalContext,
    ) -> Option<Signal> {
        let card = self.score(indicators);
        let tier = self.classify(card.points)?;

        Some(Signal {
            symbol: symbol.to_string(),
            tier,
            confidence: card.points,
            price,
            snapshot: IndicatorSnapshot::from_indicators(indicators),
            conditions: card.conditions,
            timestamp: ctx.timestamp,
            cycle_id: ctx.cycle_id,
        })
    }
}
