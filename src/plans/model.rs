/**
 * Plan Model
 *
 * Plans are global pricing tiers, visible to every authenticated
 * identity. The numeric price is the canonical tier identifier, not a
 * label: Free=0, Standard=10, Pro=25.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pricing tier, identified by its numeric price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum PlanTier {
    Free,
    Standard,
    Pro,
}

impl PlanTier {
    /// The canonical numeric identifier of this tier
    pub fn price(&self) -> i32 {
        match self {
            Self::Free => 0,
            Self::Standard => 10,
            Self::Pro => 25,
        }
    }

    /// Look a tier up by its canonical price
    pub fn from_price(price: i32) -> Option<Self> {
        match price {
            0 => Some(Self::Free),
            10 => Some(Self::Standard),
            25 => Some(Self::Pro),
            _ => None,
        }
    }
}

impl From<PlanTier> for i32 {
    fn from(tier: PlanTier) -> Self {
        tier.price()
    }
}

impl TryFrom<i32> for PlanTier {
    type Error = String;

    fn try_from(price: i32) -> Result<Self, Self::Error> {
        Self::from_price(price).ok_or_else(|| format!("unknown plan tier: {price}"))
    }
}

/// Plan record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Serialized as the canonical numeric price
    pub price: PlanTier,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / full-update payload
///
/// The price arrives as a raw integer so a bad tier surfaces as a
/// field-level validation error rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanPayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: i32,
}

/// Partial-update payload (PATCH)
///
/// `description` is nullable, so its absence and an explicit `null` must
/// stay distinguishable: absent keeps the current value, `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub description: Option<Option<String>>,
    pub price: Option<i32>,
}

impl PlanPatch {
    /// Merge this patch onto the current record, yielding a full payload
    pub fn apply_to(&self, current: &Plan) -> PlanPayload {
        PlanPayload {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            price: self.price.unwrap_or_else(|| current.price.price()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_prices_are_canonical() {
        assert_eq!(PlanTier::Free.price(), 0);
        assert_eq!(PlanTier::Standard.price(), 10);
        assert_eq!(PlanTier::Pro.price(), 25);
    }

    #[test]
    fn test_tier_lookup_rejects_unknown_prices() {
        assert_eq!(PlanTier::from_price(10), Some(PlanTier::Standard));
        assert_eq!(PlanTier::from_price(5), None);
        assert_eq!(PlanTier::from_price(-1), None);
    }

    #[test]
    fn test_plan_serializes_price_as_number() {
        let plan = Plan {
            id: Uuid::new_v4(),
            name: "Pro".to_string(),
            description: None,
            price: PlanTier::Pro,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let body = serde_json::to_value(&plan).unwrap();
        assert_eq!(body["price"], serde_json::json!(25));
    }

    #[test]
    fn test_patch_explicit_null_clears_description_over_the_wire() {
        let plan = Plan {
            id: Uuid::new_v4(),
            name: "Free".to_string(),
            description: Some("starter".to_string()),
            price: PlanTier::Free,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let patch: PlanPatch = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.apply_to(&plan).description, None);
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let plan = Plan {
            id: Uuid::new_v4(),
            name: "Free".to_string(),
            description: Some("starter".to_string()),
            price: PlanTier::Free,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let patch = PlanPatch {
            price: Some(10),
            ..Default::default()
        };
        let merged = patch.apply_to(&plan);
        assert_eq!(merged.name, "Free");
        assert_eq!(merged.description.as_deref(), Some("starter"));
        assert_eq!(merged.price, 10);
    }
}
