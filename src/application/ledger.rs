use crate::domain::ports::TokenStoreBox;
use crate::domain::product::Product;
use crate::domain::token::{RedemptionOutcome, Token, TokenStatus};
use crate::error::{FichaError, Result};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Owns the token lifecycle: issuance on purchase and single-use redemption.
///
/// All state lives in the injected `TokenStore`. The ledger holds no locks of its
/// own, so any number of ledgers (one per bar terminal) can share a store and the
/// at-most-once guarantee still holds, provided the store's `update_status_if` is
/// atomic.
pub struct TokenLedger {
    store: TokenStoreBox,
}

impl TokenLedger {
    pub fn new(store: TokenStoreBox) -> Self {
        Self { store }
    }

    /// Mints `quantity` available tokens for `product`.
    ///
    /// The batch is written atomically: on failure no token from this call is stored.
    pub async fn issue(&self, product: &Product, quantity: u32) -> Result<Vec<Token>> {
        if quantity == 0 {
            return Err(FichaError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let created_at = Utc::now();
        let tokens = (0..quantity)
            .map(|_| Token::issue(product, created_at))
            .collect();

        let issued = self.store.insert_all(tokens).await.inspect_err(|e| {
            warn!(product = %product.id, quantity, error = %e, "token issuance failed");
        })?;
        info!(product = %product.id, quantity, "issued tokens");
        Ok(issued)
    }

    /// Available tokens, most recently issued first.
    pub async fn list_available(&self) -> Result<Vec<Token>> {
        Ok(self.store.list_by_status(TokenStatus::Available).await?)
    }

    /// Point lookup with no side effects.
    pub async fn find_by_id(&self, code: &str) -> Result<Option<Token>> {
        let Some(token_id) = parse_code(code)? else {
            return Ok(None);
        };
        debug!(%token_id, "looking up token");
        Ok(self.store.get(token_id).await?)
    }

    /// Burns the token identified by `code`.
    ///
    /// The `Available -> Consumed` flip is a single conditional update at the store,
    /// so concurrent redemptions of the same code yield exactly one `Redeemed`.
    pub async fn redeem(&self, code: &str) -> Result<RedemptionOutcome> {
        let Some(token_id) = parse_code(code)? else {
            warn!(code = code.trim(), "redemption refused: malformed code");
            return Ok(RedemptionOutcome::NotFound);
        };

        let applied = self
            .store
            .update_status_if(token_id, TokenStatus::Available, TokenStatus::Consumed)
            .await
            .inspect_err(|e| warn!(%token_id, error = %e, "redemption write failed"))?;
        if let Some(token) = applied {
            info!(%token_id, product = %token.product_name, "token redeemed");
            return Ok(RedemptionOutcome::Redeemed(token));
        }

        match self.store.get(token_id).await? {
            None => {
                warn!(%token_id, "redemption refused: unknown token");
                Ok(RedemptionOutcome::NotFound)
            }
            Some(token) if token.status == TokenStatus::Consumed => {
                warn!(%token_id, product = %token.product_name, "redemption refused: already consumed");
                Ok(RedemptionOutcome::AlreadyConsumed(token))
            }
            Some(_) => Err(FichaError::TransientError(format!(
                "token {token_id} is still available but the update was not applied"
            ))),
        }
    }
}

/// Trims scanner/paste whitespace and parses the code as a token id.
///
/// Blank input is a validation error; anything that is not a UUID cannot name an
/// issued token and yields `None`.
fn parse_code(code: &str) -> Result<Option<Uuid>> {
    let code = code.trim();
    if code.is_empty() {
        return Err(FichaError::ValidationError(
            "Token code must not be empty".to_string(),
        ));
    }
    Ok(Uuid::parse_str(code).ok())
}
