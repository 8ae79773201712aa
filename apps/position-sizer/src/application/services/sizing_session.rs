//! Sizing Session
//!
//! State of the sizing screen across submissions: the remembered settings,
//! whether the settings panel is open, and the last successful report.

use crate::application::ports::{SettingsStorePort, StoreError};
use crate::application::use_cases::{
    CalculateError, CalculatePositionUseCase, PositionForm, PositionReport, StoredSettings,
};

/// One user session of the calculator.
pub struct SizingSession<S>
where
    S: SettingsStorePort,
{
    use_case: CalculatePositionUseCase<S>,
    settings: StoredSettings,
    settings_open: bool,
    last_report: Option<PositionReport>,
}

impl<S> SizingSession<S>
where
    S: SettingsStorePort,
{
    /// Start a session, loading the stored settings.
    ///
    /// The settings panel starts open when any setting is missing.
    pub fn start(use_case: CalculatePositionUseCase<S>) -> Self {
        let settings = use_case.load_settings();
        let settings_open = !settings.is_complete();

        tracing::info!(
            complete = settings.is_complete(),
            "Session started with stored settings"
        );

        Self {
            use_case,
            settings,
            settings_open,
            last_report: None,
        }
    }

    /// Settings that prefill the next submission.
    pub const fn settings(&self) -> &StoredSettings {
        &self.settings
    }

    /// Whether the settings panel should be shown expanded.
    pub const fn is_settings_open(&self) -> bool {
        self.settings_open
    }

    /// Most recent successful report.
    pub const fn last_report(&self) -> Option<&PositionReport> {
        self.last_report.as_ref()
    }

    /// Submit the form.
    ///
    /// On failure the previous report and settings stay as they were; a
    /// missing setting opens the settings panel.
    pub fn submit(&mut self, form: &PositionForm) -> Result<&PositionReport, CalculateError> {
        match self.use_case.execute(form, &self.settings) {
            Ok(report) => {
                self.settings = StoredSettings::from(&report.input);
                self.settings_open = false;
                Ok(&*self.last_report.insert(report))
            }
            Err(e) => {
                if matches!(e, CalculateError::MissingInput { .. }) {
                    self.settings_open = true;
                }
                tracing::debug!(error = %e, "Submission rejected");
                Err(e)
            }
        }
    }

    /// Forget the stored settings and open the settings panel.
    pub fn reset_settings(&mut self) -> Result<(), StoreError> {
        self.use_case.reset_settings()?;
        self.settings = StoredSettings::default();
        self.settings_open = true;
        Ok(())
    }
}
