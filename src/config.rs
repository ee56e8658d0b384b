//! Engine configuration.

/// Settings for one engine instance (one instrument).
///
/// ```
/// use double_auction::EngineConfig;
///
/// let config = EngineConfig::new("ETH/USD").with_order_capacity(10_000);
/// assert_eq!(config.symbol, "ETH/USD");
/// assert_eq!(config.starting_sequence, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Instrument label carried in snapshots and logs
    pub symbol: String,

    /// Resting order slots pre-allocated per side
    pub order_capacity: usize,

    /// First value issued by the global sequence counter. Must be below
    /// `u64::MAX`; the engine panics rather than wrap the counter.
    pub starting_sequence: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC/USD".to_string(),
            order_capacity: 1024,
            starting_sequence: 1,
        }
    }
}

impl EngineConfig {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn with_order_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }

    pub fn with_starting_sequence(mut self, starting_sequence: u64) -> Self {
        self.starting_sequence = starting_sequence;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.symbol, "BTC/USD");
        assert_eq!(config.order_capacity, 1024);
        assert_eq!(config.starting_sequence, 1);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new("XYZ")
            .with_order_capacity(8)
            .with_starting_sequence(500);

        assert_eq!(config.symbol, "XYZ");
        assert_eq!(config.order_capacity, 8);
        assert_eq!(config.starting_sequence, 500);
    }
}
