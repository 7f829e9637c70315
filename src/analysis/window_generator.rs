//! Walk-forward feature/label generation.
//!
//! Every window is a run of daily `open` prices read at fixed index strides of
//! one calendar day (`period` samples). Each referenced sample is checked
//! against the timestamp it is supposed to carry, so a missing hour anywhere
//! in the series shows up as a gap instead of silently shifting the window.

use {
    super::{WindowError, normalize},
    crate::{
        config::{DF, TRAINING_ANCHOR_OFFSET_DAYS, WEEK_STRIDE_DAYS, WINDOW_DAYS},
        domain::PriceField,
        models::{PriceHistory, Window},
        utils::{TimeUtils, epoch_sec_to_date_string},
    },
    chrono::{DateTime, Utc},
};

pub struct WindowGenerator<'a> {
    series: &'a PriceHistory,
    period: usize,
}

impl<'a> WindowGenerator<'a> {
    pub fn new(series: &'a PriceHistory) -> Self {
        Self {
            series,
            period: series.samples_per_day(),
        }
    }

    /// Samples per calendar day.
    pub fn period(&self) -> usize {
        self.period
    }

    /// The seven daily changes leading up to (and including) `anchor`.
    ///
    /// Inputs cover `anchor - 7 days ..= anchor`; an error means "cannot
    /// predict today".
    pub fn evaluation_window(&self, anchor: DateTime<Utc>) -> Result<Window, WindowError> {
        let week_start = anchor.timestamp() - (WINDOW_DAYS as i64 - 1) * TimeUtils::S_IN_D;
        let week_start_idx = self
            .series
            .lookup_index(week_start)
            .ok_or(WindowError::Gap(week_start))?;

        let inputs = self.daily_changes(week_start_idx, week_start)?;
        Ok(Window::evaluation(inputs))
    }

    /// Every complete training week strictly before `anchor`, newest first.
    ///
    /// Errors only when `anchor` itself is missing from the series. Weeks with a
    /// missing start or any gap inside their 8-day span are skipped whole; the
    /// walk keeps stepping from the nominal date so the day-of-week alignment
    /// of older weeks is unaffected.
    pub fn training_windows(&self, anchor: DateTime<Utc>) -> Result<Vec<Window>, WindowError> {
        let anchor_epoch = anchor.timestamp();
        if self.series.lookup_index(anchor_epoch).is_none() {
            return Err(WindowError::Gap(anchor_epoch));
        }
        let Some(earliest) = self.series.first_time() else {
            return Err(WindowError::Gap(anchor_epoch));
        };

        let stride = WEEK_STRIDE_DAYS * TimeUtils::S_IN_D;
        let mut weekly_anchor = anchor_epoch - TRAINING_ANCHOR_OFFSET_DAYS * TimeUtils::S_IN_D;
        let mut windows = Vec::new();
        let mut skipped = 0usize;

        while weekly_anchor > earliest {
            let week = self
                .series
                .lookup_index(weekly_anchor)
                .ok_or(WindowError::Gap(weekly_anchor))
                .and_then(|idx| self.training_week(idx, weekly_anchor));

            match week {
                Ok(window) => windows.push(window),
                Err(e) => {
                    skipped += 1;
                    if DF.log_window_skips {
                        log::warn!(
                            "Skipping training week starting {}: {}",
                            epoch_sec_to_date_string(weekly_anchor),
                            e
                        );
                    }
                }
            }

            weekly_anchor -= stride;
        }

        log::debug!(
            "Training set for {}: {} weeks ({} skipped)",
            epoch_sec_to_date_string(anchor_epoch),
            windows.len(),
            skipped
        );

        Ok(windows)
    }

    fn training_week(&self, start_idx: usize, start_epoch: i64) -> Result<Window, WindowError> {
        let inputs = self.daily_changes(start_idx, start_epoch)?;
        let output = self.change_on_day(start_idx, start_epoch, WINDOW_DAYS as i64)?;
        Ok(Window::training(inputs, output))
    }

    fn daily_changes(
        &self,
        start_idx: usize,
        start_epoch: i64,
    ) -> Result<[f64; WINDOW_DAYS], WindowError> {
        let mut changes = [0.0; WINDOW_DAYS];
        for (day, slot) in changes.iter_mut().enumerate() {
            *slot = self.change_on_day(start_idx, start_epoch, day as i64)?;
        }
        Ok(changes)
    }

    /// Normalized change from `day - 1` to `day`, counted from the start sample.
    fn change_on_day(&self, start_idx: usize, start_epoch: i64, day: i64) -> Result<f64, WindowError> {
        let current = self.open_on_day(start_idx, start_epoch, day)?;
        let previous = self.open_on_day(start_idx, start_epoch, day - 1)?;
        normalize(current, previous)
    }

    fn open_on_day(&self, start_idx: usize, start_epoch: i64, day: i64) -> Result<f64, WindowError> {
        let index = start_idx as i64 + day * self.period as i64;
        let len = self.series.len();
        if index < 0 || index >= len as i64 {
            return Err(WindowError::OutOfRange { index, len });
        }

        let idx = index as usize;
        let expected = start_epoch + day * TimeUtils::S_IN_D;
        if self.series.time_at(idx) != Some(expected) {
            return Err(WindowError::Gap(expected));
        }

        self.series
            .field_at_index(idx, PriceField::Open)
            .ok_or(WindowError::OutOfRange { index, len })
    }
}
