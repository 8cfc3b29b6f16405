// Widget configuration: reel count, bet bounds, symbols, theme

use serde::{Deserialize, Serialize};

use crate::catalog::SymbolCatalog;
use crate::theme::{self, Theme};
use crate::types::{Result, SlotError};

/// Immutable configuration for one widget instance
///
/// Defaults mirror the classic five-reel layout: bets from 1 to 100 stepped
/// by 1, the bundled emoji catalog and the cartoon theme preset. Unknown
/// option fields from JavaScript are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlotConfig {
    pub reel_count: usize,
    pub min_bet: u64,
    pub max_bet: u64,
    pub bet_increment: u64,
    pub symbols: SymbolCatalog,
    pub theme: Theme,
    pub logo_url: Option<String>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        SlotConfig {
            reel_count: 5,
            min_bet: 1,
            max_bet: 100,
            bet_increment: 1,
            symbols: SymbolCatalog::default_symbols(),
            theme: theme::cartoon(),
            logo_url: None,
        }
    }
}

impl SlotConfig {
    /// Check the construction-time invariants.
    ///
    /// An empty catalog or a non-positive reel count would leave the widget
    /// unable to build reels, so these are fatal at creation (never at spin
    /// time).
    pub fn validate(&self) -> Result<()> {
        if self.reel_count < 1 {
            return Err(SlotError::InvalidConfig(
                "reelCount must be at least 1".to_string(),
            ));
        }
        if self.symbols.is_empty() {
            return Err(SlotError::InvalidConfig(
                "symbol catalog is empty".to_string(),
            ));
        }
        if self.min_bet == 0 || self.max_bet == 0 || self.bet_increment == 0 {
            return Err(SlotError::InvalidConfig(
                "bet bounds and increment must be positive".to_string(),
            ));
        }
        if self.min_bet > self.max_bet {
            return Err(SlotError::InvalidConfig(format!(
                "minBet {} exceeds maxBet {}",
                self.min_bet, self.max_bet
            )));
        }
        Ok(())
    }

    /// Parse a configuration from a JSON options object and validate it
    pub fn from_json(options_json: &str) -> Result<SlotConfig> {
        let config: SlotConfig = serde_json::from_str(options_json)
            .map_err(|e| SlotError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
