//! Calculate Position Use Case

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::application::ports::{SettingKey, SettingsStorePort, StoreError};
use crate::domain::position_sizing::{
    PositionSizer, PreviewProportions, SizingError, TradeInput, TradeResult,
};

/// Settings remembered between calculations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoredSettings {
    /// Last-used reward:risk ratio.
    pub reward_to_risk_ratio: Option<Decimal>,
    /// Last-used risk percentage.
    pub risk_percentage: Option<Decimal>,
    /// Last-used account balance.
    pub account_balance: Option<Decimal>,
}

impl StoredSettings {
    /// True when every setting has a value.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.reward_to_risk_ratio.is_some()
            && self.risk_percentage.is_some()
            && self.account_balance.is_some()
    }

    /// Value for a key.
    #[must_use]
    pub const fn get(&self, key: SettingKey) -> Option<Decimal> {
        match key {
            SettingKey::RiskRatio => self.reward_to_risk_ratio,
            SettingKey::RiskPercentage => self.risk_percentage,
            SettingKey::Balance => self.account_balance,
        }
    }
}

impl From<&TradeInput> for StoredSettings {
    fn from(input: &TradeInput) -> Self {
        Self {
            reward_to_risk_ratio: Some(input.reward_to_risk_ratio),
            risk_percentage: Some(input.risk_percentage),
            account_balance: Some(input.account_balance),
        }
    }
}

/// Values submitted for one calculation.
///
/// Unset optional fields fall back to the stored settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionForm {
    /// Entry price.
    pub entry_price: Decimal,
    /// Stop-loss price.
    pub stop_loss: Decimal,
    /// Account balance override.
    pub account_balance: Option<Decimal>,
    /// Risk percentage override.
    pub risk_percentage: Option<Decimal>,
    /// Reward:risk ratio override.
    pub reward_to_risk_ratio: Option<Decimal>,
}

impl PositionForm {
    /// Form with only the two prices; settings come from the store.
    #[must_use]
    pub const fn new(entry_price: Decimal, stop_loss: Decimal) -> Self {
        Self {
            entry_price,
            stop_loss,
            account_balance: None,
            risk_percentage: None,
            reward_to_risk_ratio: None,
        }
    }

    /// Resolve every field against the stored settings.
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` for the first setting absent from both sources.
    pub fn resolve(&self, stored: &StoredSettings) -> Result<TradeInput, CalculateError> {
        let pick = |value: Option<Decimal>, key: SettingKey| {
            value
                .or_else(|| stored.get(key))
                .ok_or(CalculateError::MissingInput { field: key })
        };

        Ok(TradeInput {
            entry_price: self.entry_price,
            stop_loss: self.stop_loss,
            reward_to_risk_ratio: pick(self.reward_to_risk_ratio, SettingKey::RiskRatio)?,
            risk_percentage: pick(self.risk_percentage, SettingKey::RiskPercentage)?,
            account_balance: pick(self.account_balance, SettingKey::Balance)?,
        })
    }
}

/// Everything the result panel shows for one successful calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionReport {
    /// Resolved inputs.
    pub input: TradeInput,
    /// Sizing outcome.
    pub result: TradeResult,
    /// Split of the preview bar.
    pub preview: Option<PreviewProportions>,
}

/// Errors from the calculate-position use case.
#[derive(Debug, Error)]
pub enum CalculateError {
    /// The calculation itself was rejected.
    #[error(transparent)]
    Sizing(#[from] SizingError),

    /// A setting was neither submitted nor stored.
    #[error("Missing value for '{field}': enter it in the settings")]
    MissingInput {
        /// The setting that has no value.
        field: SettingKey,
    },
}

/// Use case for sizing a position and remembering the settings used.
pub struct CalculatePositionUseCase<S>
where
    S: SettingsStorePort,
{
    store: Arc<S>,
    sizer: PositionSizer,
}

impl<S> CalculatePositionUseCase<S>
where
    S: SettingsStorePort,
{
    /// Create a new use case with the default sizer.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_sizer(store, PositionSizer::default())
    }

    /// Create a new use case with a configured sizer.
    pub fn with_sizer(store: Arc<S>, sizer: PositionSizer) -> Self {
        Self { store, sizer }
    }

    /// Read the stored settings.
    ///
    /// Unreadable or unparseable values are logged and treated as missing.
    pub fn load_settings(&self) -> StoredSettings {
        StoredSettings {
            reward_to_risk_ratio: self.read_setting(SettingKey::RiskRatio),
            risk_percentage: self.read_setting(SettingKey::RiskPercentage),
            account_balance: self.read_setting(SettingKey::Balance),
        }
    }

    /// Execute the use case.
    ///
    /// Settings are written only when sizing succeeds. A failed write is
    /// logged and does not fail the calculation.
    pub fn execute(
        &self,
        form: &PositionForm,
        stored: &StoredSettings,
    ) -> Result<PositionReport, CalculateError> {
        let input = form.resolve(stored)?;
        let result = self.sizer.compute_position(&input)?;

        self.persist(&input);

        Ok(PositionReport {
            input,
            result,
            preview: PreviewProportions::from_ratio(input.reward_to_risk_ratio),
        })
    }

    /// Remove every stored setting.
    pub fn reset_settings(&self) -> Result<(), StoreError> {
        self.store.clear()?;
        tracing::info!("Stored settings cleared");
        Ok(())
    }

    fn read_setting(&self, key: SettingKey) -> Option<Decimal> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read stored setting");
                return None;
            }
        };

        match Decimal::from_str(raw.trim()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, value = %raw, error = %e, "Ignoring unparseable stored setting");
                None
            }
        }
    }

    fn persist(&self, input: &TradeInput) {
        let settings = StoredSettings::from(input);

        for key in SettingKey::ALL {
            let Some(value) = settings.get(key) else {
                continue;
            };
            if let Err(e) = self.store.set(key, &value.normalize().to_string()) {
                tracing::warn!(key = %key, error = %e, "Failed to persist setting");
            }
        }

        tracing::debug!(
            ratio = %input.reward_to_risk_ratio,
            risk_percentage = %input.risk_percentage,
            balance = %input.account_balance,
            "Settings persisted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::InMemorySettingsStore;
    use crate::domain::position_sizing::TradeDirection;
    use rust_decimal_macros::dec;

    struct FailingStore;

    impl SettingsStorePort for FailingStore {
        fn get(&self, _key: SettingKey) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io {
                path: "unavailable".to_string(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn set(&self, _key: SettingKey, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "unavailable".to_string(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn clear(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn full_form() -> PositionForm {
        PositionForm {
            entry_price: dec!(100),
            stop_loss: dec!(95),
            account_balance: Some(dec!(10000)),
            risk_percentage: Some(dec!(1)),
            reward_to_risk_ratio: Some(dec!(2)),
        }
    }

    #[test]
    fn execute_persists_settings_on_success() {
        let store = Arc::new(InMemorySettingsStore::new());
        let use_case = CalculatePositionUseCase::new(Arc::clone(&store));

        let report = use_case
            .execute(&full_form(), &StoredSettings::default())
            .unwrap();

        assert_eq!(report.result.quantity, 20);
        assert_eq!(report.result.direction, TradeDirection::Long);
        assert_eq!(
            store.get(SettingKey::RiskRatio).unwrap().as_deref(),
            Some("2")
        );
        assert_eq!(
            store.get(SettingKey::RiskPercentage).unwrap().as_deref(),
            Some("1")
        );
        assert_eq!(
            store.get(SettingKey::Balance).unwrap().as_deref(),
            Some("10000")
        );
    }

    #[test]
    fn execute_writes_nothing_on_failure() {
        let store = Arc::new(InMemorySettingsStore::new());
        let use_case = CalculatePositionUseCase::new(Arc::clone(&store));

        let mut form = full_form();
        form.stop_loss = form.entry_price;

        let result = use_case.execute(&form, &StoredSettings::default());
        assert!(matches!(
            result,
            Err(CalculateError::Sizing(SizingError::EqualPrices { .. }))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn form_falls_back_to_stored_settings() {
        let store = Arc::new(InMemorySettingsStore::with_values(&[
            (SettingKey::RiskRatio, "3"),
            (SettingKey::RiskPercentage, "2"),
            (SettingKey::Balance, "10000"),
        ]));
        let use_case = CalculatePositionUseCase::new(store);
        let stored = use_case.load_settings();
        assert!(stored.is_complete());

        let report = use_case
            .execute(&PositionForm::new(dec!(50), dec!(55)), &stored)
            .unwrap();

        assert_eq!(report.result.direction, TradeDirection::Short);
        assert_eq!(report.result.quantity, 40);
        assert_eq!(report.result.take_profit_price, dec!(35));
    }

    #[test]
    fn form_values_override_stored_settings() {
        let stored = StoredSettings {
            reward_to_risk_ratio: Some(dec!(5)),
            risk_percentage: Some(dec!(5)),
            account_balance: Some(dec!(1)),
        };

        let input = full_form().resolve(&stored).unwrap();
        assert_eq!(input.reward_to_risk_ratio, dec!(2));
        assert_eq!(input.risk_percentage, dec!(1));
        assert_eq!(input.account_balance, dec!(10000));
    }

    #[test]
    fn missing_setting_reported() {
        let stored = StoredSettings {
            reward_to_risk_ratio: Some(dec!(2)),
            risk_percentage: None,
            account_balance: Some(dec!(10000)),
        };

        let result = PositionForm::new(dec!(100), dec!(95)).resolve(&stored);
        assert!(matches!(
            result,
            Err(CalculateError::MissingInput {
                field: SettingKey::RiskPercentage
            })
        ));
    }

    #[test]
    fn explicit_zero_is_not_replaced_by_stored_value() {
        let store = Arc::new(InMemorySettingsStore::new());
        let use_case = CalculatePositionUseCase::new(store);
        let stored = StoredSettings {
            reward_to_risk_ratio: Some(dec!(2)),
            risk_percentage: Some(dec!(1)),
            account_balance: Some(dec!(10000)),
        };

        let mut form = PositionForm::new(dec!(100), dec!(95));
        form.account_balance = Some(Decimal::ZERO);

        let result = use_case.execute(&form, &stored);
        assert!(matches!(
            result,
            Err(CalculateError::Sizing(SizingError::InvalidInput {
                field: "account_balance",
                ..
            }))
        ));
    }

    #[test]
    fn unparseable_stored_value_treated_as_missing() {
        let store = Arc::new(InMemorySettingsStore::with_values(&[
            (SettingKey::RiskRatio, "two"),
            (SettingKey::RiskPercentage, " 1.5 "),
        ]));
        let use_case = CalculatePositionUseCase::new(store);

        let stored = use_case.load_settings();
        assert_eq!(stored.reward_to_risk_ratio, None);
        assert_eq!(stored.risk_percentage, Some(dec!(1.5)));
        assert_eq!(stored.account_balance, None);
        assert!(!stored.is_complete());
    }

    #[test]
    fn store_failures_do_not_block_calculation() {
        let use_case = CalculatePositionUseCase::new(Arc::new(FailingStore));

        let stored = use_case.load_settings();
        assert_eq!(stored, StoredSettings::default());

        let report = use_case.execute(&full_form(), &stored).unwrap();
        assert_eq!(report.result.expected_profit, dec!(200));
    }

    #[test]
    fn report_carries_preview_split() {
        let use_case = CalculatePositionUseCase::new(Arc::new(InMemorySettingsStore::new()));
        let mut form = full_form();
        form.reward_to_risk_ratio = Some(dec!(1));

        let report = use_case.execute(&form, &StoredSettings::default()).unwrap();
        let preview = report.preview.unwrap();
        assert_eq!(preview.take_profit_pct, dec!(50));
        assert_eq!(preview.stop_loss_pct, dec!(50));
    }

    #[test]
    fn reset_clears_store() {
        let store = Arc::new(InMemorySettingsStore::with_values(&[(
            SettingKey::Balance,
            "10000",
        )]));
        let use_case = CalculatePositionUseCase::new(Arc::clone(&store));

        use_case.reset_settings().unwrap();
        assert!(store.is_empty());
        assert_eq!(use_case.load_settings(), StoredSettings::default());
    }
}
