use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller supplied product description, kept in its raw textual form until scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub product_name: String,
    pub materials: Vec<String>,
    pub weight_grams: f64,
    pub transport: String,
    pub packaging: String,
}

impl ProductInput {
    /// Build an input from an untyped JSON payload, naming the first field that is
    /// missing or carries the wrong JSON type.
    pub fn from_json(payload: &Value) -> Result<Self, ValidationError> {
        let object = payload.as_object().ok_or(ValidationError {
            field: ProductField::Body,
            reason: ValidationReason::WrongType { expected: "object" },
        })?;

        let field = |name: ProductField| {
            object
                .get(name.as_str())
                .filter(|value| !value.is_null())
                .ok_or(ValidationError {
                    field: name,
                    reason: ValidationReason::Missing,
                })
        };
        let wrong_type = |name: ProductField, expected: &'static str| ValidationError {
            field: name,
            reason: ValidationReason::WrongType { expected },
        };

        let product_name = field(ProductField::ProductName)?
            .as_str()
            .ok_or_else(|| wrong_type(ProductField::ProductName, "string"))?
            .to_string();

        let materials = field(ProductField::Materials)?
            .as_array()
            .ok_or_else(|| wrong_type(ProductField::Materials, "list"))?
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| wrong_type(ProductField::Materials, "list of strings"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let weight_grams = field(ProductField::WeightGrams)?
            .as_f64()
            .ok_or_else(|| wrong_type(ProductField::WeightGrams, "number"))?;

        let transport = field(ProductField::Transport)?
            .as_str()
            .ok_or_else(|| wrong_type(ProductField::Transport, "string"))?
            .to_string();

        let packaging = field(ProductField::Packaging)?
            .as_str()
            .ok_or_else(|| wrong_type(ProductField::Packaging, "string"))?
            .to_string();

        Ok(Self {
            product_name,
            materials,
            weight_grams,
            transport,
            packaging,
        })
    }
}

/// Shipping mode of a product, parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    Air,
    Rail,
    Sea,
    Road,
}

impl Transport {
    pub const ALLOWED: [&'static str; 4] = ["air", "rail", "sea", "road"];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "air" => Some(Self::Air),
            "rail" => Some(Self::Rail),
            "sea" => Some(Self::Sea),
            "road" => Some(Self::Road),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Transport::Air => "air",
            Transport::Rail => "rail",
            Transport::Sea => "sea",
            Transport::Road => "road",
        }
    }
}

/// Packaging category of a product, parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Packaging {
    Recyclable,
    Biodegradable,
    NonRecyclable,
}

impl Packaging {
    pub const ALLOWED: [&'static str; 3] = ["recyclable", "biodegradable", "non-recyclable"];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "recyclable" => Some(Self::Recyclable),
            "biodegradable" => Some(Self::Biodegradable),
            "non-recyclable" => Some(Self::NonRecyclable),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Packaging::Recyclable => "recyclable",
            Packaging::Biodegradable => "biodegradable",
            Packaging::NonRecyclable => "non-recyclable",
        }
    }
}

/// Letter grade derived from a clamped score. `A` is the best band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    A,
    B,
    C,
    D,
}

impl Rating {
    pub const fn ordered() -> [Rating; 4] {
        [Rating::A, Rating::B, Rating::C, Rating::D]
    }

    /// Bands are inclusive on their lower bound: 90+, 75-89, 60-74, below 60.
    pub const fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Rating::A,
            75..=89 => Rating::B,
            60..=74 => Rating::C,
            _ => Rating::D,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Rating::A => "A",
            Rating::B => "B",
            Rating::C => "C",
            Rating::D => "D",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|rating| rating.label() == label)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated snapshot the scoring rules are evaluated against.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProduct {
    pub product_name: String,
    pub materials: BTreeSet<String>,
    pub weight_grams: f64,
    pub transport: Transport,
    pub packaging: Packaging,
}

impl NormalizedProduct {
    pub fn has_material(&self, material: &str) -> bool {
        self.materials.contains(material)
    }
}

impl TryFrom<&ProductInput> for NormalizedProduct {
    type Error = ValidationError;

    fn try_from(input: &ProductInput) -> Result<Self, Self::Error> {
        let product_name = input.product_name.trim();
        if product_name.is_empty() {
            return Err(ValidationError {
                field: ProductField::ProductName,
                reason: ValidationReason::Empty,
            });
        }

        let materials = input
            .materials
            .iter()
            .map(|material| material.trim().to_lowercase())
            .filter(|material| !material.is_empty())
            .collect();

        if !input.weight_grams.is_finite() || input.weight_grams < 0.0 {
            return Err(ValidationError {
                field: ProductField::WeightGrams,
                reason: ValidationReason::Negative,
            });
        }

        let transport = Transport::parse(&input.transport).ok_or(ValidationError {
            field: ProductField::Transport,
            reason: ValidationReason::NotAllowed {
                allowed: &Transport::ALLOWED,
            },
        })?;

        let packaging = Packaging::parse(&input.packaging).ok_or(ValidationError {
            field: ProductField::Packaging,
            reason: ValidationReason::NotAllowed {
                allowed: &Packaging::ALLOWED,
            },
        })?;

        Ok(Self {
            product_name: product_name.to_string(),
            materials,
            weight_grams: input.weight_grams,
            transport,
            packaging,
        })
    }
}

/// Fields of a product submission that validation can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Body,
    ProductName,
    Materials,
    WeightGrams,
    Transport,
    Packaging,
}

impl ProductField {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProductField::Body => "body",
            ProductField::ProductName => "product_name",
            ProductField::Materials => "materials",
            ProductField::WeightGrams => "weight_grams",
            ProductField::Transport => "transport",
            ProductField::Packaging => "packaging",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    Missing,
    WrongType { expected: &'static str },
    Empty,
    Negative,
    NotAllowed { allowed: &'static [&'static str] },
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::Missing => write!(f, "is required"),
            ValidationReason::WrongType { expected } => write!(f, "must be of type {expected}"),
            ValidationReason::Empty => write!(f, "must not be empty"),
            ValidationReason::Negative => write!(f, "must be a non-negative number"),
            ValidationReason::NotAllowed { allowed } => {
                write!(f, "must be one of [{}]", allowed.join(", "))
            }
        }
    }
}

/// Rejected product input. Scoring never proceeds past one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{field}' {reason}")]
pub struct ValidationError {
    pub field: ProductField,
    pub reason: ValidationReason,
}
