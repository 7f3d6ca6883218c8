mod rules;

pub use rules::RuleKind;

use super::domain::{NormalizedProduct, ProductInput, Rating, ValidationError};
use rules::{clamp_score, fired_rules, BASELINE_SCORE};
use serde::{Deserialize, Serialize};

/// Validate a product description and run it through the fixed rule table.
///
/// Pure and deterministic: the same input always produces the same score,
/// rating, and suggestion order.
pub fn score(product: &ProductInput) -> Result<Assessment, ValidationError> {
    let normalized = NormalizedProduct::try_from(product)?;
    Ok(score_normalized(&normalized))
}

pub(crate) fn score_normalized(product: &NormalizedProduct) -> Assessment {
    let hits = fired_rules(product);

    let raw_score = BASELINE_SCORE + hits.iter().map(|hit| hit.delta).sum::<i32>();
    let sustainability_score = clamp_score(raw_score);

    let suggestions = hits
        .iter()
        .filter_map(|hit| hit.suggestion.map(str::to_string))
        .collect();

    let components = hits
        .into_iter()
        .map(|hit| ScoreComponent {
            rule: hit.kind,
            delta: hit.delta,
            notes: hit.kind.label().to_string(),
        })
        .collect();

    Assessment {
        product_name: product.product_name.clone(),
        sustainability_score,
        rating: Rating::from_score(sustainability_score),
        suggestions,
        components,
    }
}

/// Single fired rule, kept so a score can be explained after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: RuleKind,
    pub delta: i32,
    pub notes: String,
}

/// Scorer output for one product, before the repository assigns identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub product_name: String,
    pub sustainability_score: u8,
    pub rating: Rating,
    pub suggestions: Vec<String>,
    pub components: Vec<ScoreComponent>,
}

impl Assessment {
    /// Score before clamping, useful when reviewing saturated results.
    pub fn raw_score(&self) -> i32 {
        BASELINE_SCORE
            + self
                .components
                .iter()
                .map(|component| component.delta)
                .sum::<i32>()
    }
}
