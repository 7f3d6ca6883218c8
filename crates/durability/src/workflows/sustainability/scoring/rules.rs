use super::super::domain::{NormalizedProduct, Packaging, Transport};
use serde::{Deserialize, Serialize};

pub(crate) const BASELINE_SCORE: i32 = 100;
pub(crate) const MIN_SCORE: i32 = 0;
pub(crate) const MAX_SCORE: i32 = 100;
pub(crate) const HEAVY_PRODUCT_GRAMS: f64 = 500.0;

/// Identifies each entry of the rule table so audit trails stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    PlasticMaterial,
    RecycledMaterial,
    AluminumMaterial,
    VirginAluminum,
    AirTransport,
    LowCarbonTransport,
    SustainablePackaging,
    NonRecyclablePackaging,
    HeavyProduct,
}

impl RuleKind {
    pub const fn label(self) -> &'static str {
        match self {
            RuleKind::PlasticMaterial => "plastic material",
            RuleKind::RecycledMaterial => "recycled material",
            RuleKind::AluminumMaterial => "aluminum material",
            RuleKind::VirginAluminum => "aluminum without recycled content",
            RuleKind::AirTransport => "air transport",
            RuleKind::LowCarbonTransport => "rail or sea transport",
            RuleKind::SustainablePackaging => "recyclable or biodegradable packaging",
            RuleKind::NonRecyclablePackaging => "non-recyclable packaging",
            RuleKind::HeavyProduct => "weight above 500 g",
        }
    }
}

pub(crate) struct ScoringRule {
    pub kind: RuleKind,
    pub delta: i32,
    pub suggestion: Option<&'static str>,
    pub applies: fn(&NormalizedProduct) -> bool,
}

/// Evaluated top to bottom; this order is the order suggestions are reported in.
pub(crate) const RULES: [ScoringRule; 9] = [
    ScoringRule {
        kind: RuleKind::PlasticMaterial,
        delta: -10,
        suggestion: Some("Avoid using plastic"),
        applies: |product| product.has_material("plastic"),
    },
    ScoringRule {
        kind: RuleKind::RecycledMaterial,
        delta: 10,
        suggestion: None,
        applies: |product| product.has_material("recycled"),
    },
    ScoringRule {
        kind: RuleKind::AluminumMaterial,
        delta: 5,
        suggestion: None,
        applies: |product| product.has_material("aluminum"),
    },
    ScoringRule {
        kind: RuleKind::VirginAluminum,
        delta: 0,
        suggestion: Some("Consider using recycled aluminum"),
        applies: |product| product.has_material("aluminum") && !product.has_material("recycled"),
    },
    ScoringRule {
        kind: RuleKind::AirTransport,
        delta: -15,
        suggestion: Some("Avoid air transport"),
        applies: |product| product.transport == Transport::Air,
    },
    ScoringRule {
        kind: RuleKind::LowCarbonTransport,
        delta: 5,
        suggestion: None,
        applies: |product| matches!(product.transport, Transport::Rail | Transport::Sea),
    },
    ScoringRule {
        kind: RuleKind::SustainablePackaging,
        delta: 10,
        suggestion: None,
        applies: |product| {
            matches!(
                product.packaging,
                Packaging::Recyclable | Packaging::Biodegradable
            )
        },
    },
    // Guidance only: non-recyclable packaging is not penalized.
    ScoringRule {
        kind: RuleKind::NonRecyclablePackaging,
        delta: 0,
        suggestion: Some("Use recyclable or biodegradable packaging"),
        applies: |product| product.packaging == Packaging::NonRecyclable,
    },
    ScoringRule {
        kind: RuleKind::HeavyProduct,
        delta: -5,
        suggestion: Some("Reduce product weight"),
        applies: |product| product.weight_grams > HEAVY_PRODUCT_GRAMS,
    },
];

pub(crate) struct RuleHit {
    pub kind: RuleKind,
    pub delta: i32,
    pub suggestion: Option<&'static str>,
}

pub(crate) fn fired_rules(product: &NormalizedProduct) -> Vec<RuleHit> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(product))
        .map(|rule| RuleHit {
            kind: rule.kind,
            delta: rule.delta,
            suggestion: rule.suggestion,
        })
        .collect()
}

pub(crate) fn clamp_score(raw: i32) -> u8 {
    raw.clamp(MIN_SCORE, MAX_SCORE) as u8
}
