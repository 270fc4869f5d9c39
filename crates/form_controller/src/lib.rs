//! Behaviour behind the webpuff run form: filling volcano details from the
//! lookup table, checking the eruption date, keeping dependent run options
//! consistent, and steering the parameter and display frames.

use chrono::Utc;
use serde::Serialize;
use shared::{
    domain::{FieldName, Volcano, VolcanoTable},
    error::{FormError, BAD_ERUPTION_DATE_MESSAGE},
    protocol::{Endpoint, WindowRequest},
};
use tracing::{debug, info, warn};

pub mod config;
pub mod eruption_date;
pub mod events;
pub mod host;
pub mod memory;
pub mod volcano_list;

use crate::config::{EruptionDateCheck, Settings};
use crate::host::{required_value, FormHost, Frame, Window};

/// What [`FormController::reconcile_run_options`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunOptionsAdjustments {
    pub erupt_hours_clamped: bool,
    pub save_hours_clamped: bool,
    pub log_params_cleared: bool,
    pub phi_dist_cleared: bool,
}

impl RunOptionsAdjustments {
    pub fn any(&self) -> bool {
        self.erupt_hours_clamped
            || self.save_hours_clamped
            || self.log_params_cleared
            || self.phi_dist_cleared
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormController {
    settings: Settings,
}

impl FormController {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Copies the selected volcano's position, plume bottom and source area
    /// into the form.
    pub fn populate_from_selection<'t, F>(
        &self,
        form: &mut F,
        table: &'t VolcanoTable,
    ) -> Result<&'t Volcano, FormError>
    where
        F: FormHost + ?Sized,
    {
        let index = form.selected_index().ok_or(FormError::NoSelection)?;
        let volcano = table.get(index).inspect_err(|error| {
            warn!(%error, "volcano selection outside lookup table");
        })?;

        for field in [
            FieldName::Lat,
            FieldName::Lon,
            FieldName::PlumeMin,
            FieldName::Area,
        ] {
            required_value(form, field)?;
        }
        form.set_value(FieldName::Lat, &volcano.lat.to_string())?;
        form.set_value(FieldName::Lon, &volcano.lon.to_string())?;
        form.set_value(FieldName::PlumeMin, &volcano.plume_min.to_string())?;
        form.set_value(FieldName::Area, &volcano.area.to_string())?;

        debug!(index, volcano = %volcano.name, "populated volcano fields");
        Ok(volcano)
    }

    /// Points the selector at the trailing "unknown" option; `last` is the
    /// option count.
    pub fn select_unknown_volcano<F>(&self, form: &mut F, last: usize) -> Result<(), FormError>
    where
        F: FormHost + ?Sized,
    {
        let index = last.checked_sub(1).ok_or(FormError::NoUnknownEntry)?;
        form.set_selected_index(index);
        Ok(())
    }

    /// On rejection the user is alerted and the field is emptied.
    pub fn validate_eruption_date<F, W>(
        &self,
        form: &mut F,
        window: &mut W,
    ) -> Result<(), FormError>
    where
        F: FormHost + ?Sized,
        W: Window + ?Sized,
    {
        let mut value = required_value(form, FieldName::EruptDate)?;

        if self.settings.normalize_eruption_dates {
            let normalized = eruption_date::normalize_eruption_date(&value, Utc::now());
            if normalized != value {
                form.set_value(FieldName::EruptDate, &normalized)?;
                value = normalized;
            }
        }

        let accepted = match self.settings.eruption_date_check {
            EruptionDateCheck::Length => eruption_date::has_canonical_length(&value),
            EruptionDateCheck::Strict => eruption_date::parse_canonical(&value).is_some(),
        };
        if accepted {
            return Ok(());
        }

        info!(value = %value, "rejected eruption date");
        window.alert(BAD_ERUPTION_DATE_MESSAGE);
        form.set_value(FieldName::EruptDate, "")?;
        Err(FormError::BadEruptionDate { value })
    }

    /// Clamps `eruptHours` and `saveHours` to `runHours`, then keeps
    /// `phiDist` and the `ashLogMean`/`ashLogSdev` pair mutually exclusive.
    ///
    /// A non-empty `phiDist` wins when both are given. Every control is read
    /// and every number checked before anything is written.
    pub fn reconcile_run_options<F>(&self, form: &mut F) -> Result<RunOptionsAdjustments, FormError>
    where
        F: FormHost + ?Sized,
    {
        let run_raw = required_value(form, FieldName::RunHours)?;
        let erupt_raw = required_value(form, FieldName::EruptHours)?;
        let save_raw = required_value(form, FieldName::SaveHours)?;
        let phi_dist = required_value(form, FieldName::PhiDist)?;
        let ash_log_mean = required_value(form, FieldName::AshLogMean)?;
        required_value(form, FieldName::AshLogSdev)?;

        let run = parse_hours(FieldName::RunHours, &run_raw)?;
        let erupt = parse_hours(FieldName::EruptHours, &erupt_raw)?;
        let save = parse_hours(FieldName::SaveHours, &save_raw)?;

        let mut adjustments = RunOptionsAdjustments::default();

        if let (Some(run), Some(erupt)) = (run, erupt) {
            if run < erupt {
                form.set_value(FieldName::EruptHours, &run_raw)?;
                adjustments.erupt_hours_clamped = true;
            }
        }
        if let (Some(run), Some(save)) = (run, save) {
            if run < save {
                form.set_value(FieldName::SaveHours, &run_raw)?;
                adjustments.save_hours_clamped = true;
            }
        }

        if !phi_dist.is_empty() {
            form.set_value(FieldName::AshLogMean, "")?;
            form.set_value(FieldName::AshLogSdev, "")?;
            adjustments.log_params_cleared = true;
        }
        // The phiDist branch above empties ashLogMean, so only a form without
        // phiDist can still have one.
        if !adjustments.log_params_cleared && !ash_log_mean.is_empty() {
            form.set_value(FieldName::PhiDist, "")?;
            adjustments.phi_dist_cleared = true;
        }

        if adjustments.any() {
            debug!(?adjustments, "reconciled run options");
        }
        Ok(adjustments)
    }

    /// Reopens a previous session: the parameter frame gets the run form and
    /// the display frame the ashxp options for the directory named on the
    /// parameter frame's current form.
    pub fn navigate_to_run_params<P, D>(
        &self,
        params_frame: &mut P,
        display_frame: &mut D,
        session_id: &str,
    ) -> Result<(), FormError>
    where
        P: Frame + ?Sized,
        D: Frame + ?Sized,
    {
        let previous = params_frame
            .form_value(&self.settings.run_params_form, FieldName::Previous)
            .ok_or(FormError::MissingField {
                field: FieldName::Previous,
            })?;

        let run_params = Endpoint::RunParams {
            previous: &previous,
            session_id,
        }
        .target(&self.settings.endpoints);
        let ashxp = Endpoint::AshxpOptions {
            previous: &previous,
            session_id,
        }
        .target(&self.settings.endpoints);

        params_frame.navigate(&run_params);
        display_frame.navigate(&ashxp);
        info!(%previous, session_id, "navigated to previous run");
        Ok(())
    }

    pub fn load_image<F, D>(
        &self,
        form: &F,
        display_frame: &mut D,
        working_dir: &str,
    ) -> Result<(), FormError>
    where
        F: FormHost + ?Sized,
        D: Frame + ?Sized,
    {
        let image = required_value(form, FieldName::Image)?;
        display_frame.navigate(&format!("{working_dir}{image}"));
        Ok(())
    }

    pub fn load_movie<D>(&self, display_frame: &mut D, movie_url: &str)
    where
        D: Frame + ?Sized,
    {
        display_frame.navigate(movie_url);
    }

    pub fn open_help_window<W>(&self, window: &mut W, help_url: &str)
    where
        W: Window + ?Sized,
    {
        let request = WindowRequest::new(help_url)
            .named(self.settings.help_window_name.clone())
            .with_features(self.settings.help_window);
        window.open(&request);
    }

    pub fn reset_display<D>(&self, display_frame: &mut D)
    where
        D: Frame + ?Sized,
    {
        display_frame.navigate(&Endpoint::Placeholder.target(&self.settings.endpoints));
    }

    pub fn open_map_options_window<W>(&self, window: &mut W)
    where
        W: Window + ?Sized,
    {
        let url = Endpoint::MapOptions.target(&self.settings.endpoints);
        window.open(&WindowRequest::new(url));
    }

    pub fn navigate_to_default_options<D>(
        &self,
        display_frame: &mut D,
        session_id: &str,
        previous: &str,
    ) where
        D: Frame + ?Sized,
    {
        let target = Endpoint::AshxpOptions {
            previous,
            session_id,
        }
        .target(&self.settings.endpoints);
        display_frame.navigate(&target);
    }
}

/// Empty means unset. Anything else must be a finite number.
fn parse_hours(field: FieldName, raw: &str) -> Result<Option<f64>, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
        .ok_or_else(|| FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
