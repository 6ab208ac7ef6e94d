use super::product::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a token.
///
/// The only legal transition is `Available -> Consumed`, performed at most once.
/// Encoded as `"AVAILABLE"` / `"CONSUMED"` everywhere the status is persisted or printed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatus {
    Available,
    Consumed,
}

impl TokenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStatus::Available => "AVAILABLE",
            TokenStatus::Consumed => "CONSUMED",
        }
    }
}

/// A single-use redemption credential for one unit of a purchased product.
///
/// The product fields are a snapshot taken at issuance time. They are never
/// refreshed from the catalog, so a token stays a faithful receipt even after
/// the product is edited or removed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Token {
    /// Primary key and the redeemable code carried by the QR artifact.
    pub id: Uuid,
    pub status: TokenStatus,
    pub product_name: String,
    pub product_image: String,
    pub created_at: DateTime<Utc>,
}

impl Token {
    /// Mints a new available token for `product` with a fresh random id.
    pub fn issue(product: &Product, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: TokenStatus::Available,
            product_name: product.name.clone(),
            product_image: product.image.clone(),
            created_at,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == TokenStatus::Available
    }

    /// The payload to encode in the customer's QR code.
    pub fn redeem_code(&self) -> String {
        self.id.hyphenated().to_string()
    }
}

/// Result of presenting a code at the bar.
///
/// Each variant calls for a different operator action, so they are kept
/// distinct all the way to the presentation layer.
#[derive(Debug, PartialEq, Clone)]
pub enum RedemptionOutcome {
    /// The token was available and is now consumed. Dispense.
    Redeemed(Token),
    /// The token exists but was already used. Carries it so the operator can
    /// see which product it was for.
    AlreadyConsumed(Token),
    /// No token was ever issued under this code.
    NotFound,
}

impl RedemptionOutcome {
    pub fn token(&self) -> Option<&Token> {
        match self {
            RedemptionOutcome::Redeemed(token) | RedemptionOutcome::AlreadyConsumed(token) => {
                Some(token)
            }
            RedemptionOutcome::NotFound => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RedemptionOutcome::Redeemed(_) => "REDEEMED",
            RedemptionOutcome::AlreadyConsumed(_) => "ALREADY_CONSUMED",
            RedemptionOutcome::NotFound => "NOT_FOUND",
        }
    }
}
