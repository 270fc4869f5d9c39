//! Browser events wired up by the webpuff pages, and their routing onto
//! [`FormController`] operations.

use serde::Serialize;
use shared::{
    domain::{Volcano, VolcanoTable},
    error::{ErrorCode, ErrorReport, FormError},
};
use tracing::{debug, warn};

use crate::{
    host::{FormHost, Frame, Window},
    FormController, RunOptionsAdjustments,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// `onChange` of the volcano selector.
    VolcanoSelected,
    /// Lat/lon typed by hand; the selector falls back to "unknown".
    UnknownVolcanoRequested { option_count: usize },
    EruptDateChanged,
    RunOptionsSubmitted,
    PreviousRunRequested { session_id: String },
    ImageRequested { working_dir: String },
    MovieRequested { movie_url: String },
    HelpRequested { help_url: String },
    DisplayReset,
    MapOptionsRequested,
    DefaultOptionsRequested { session_id: String, previous: String },
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::VolcanoSelected => "volcano_selected",
            UiEvent::UnknownVolcanoRequested { .. } => "unknown_volcano_requested",
            UiEvent::EruptDateChanged => "erupt_date_changed",
            UiEvent::RunOptionsSubmitted => "run_options_submitted",
            UiEvent::PreviousRunRequested { .. } => "previous_run_requested",
            UiEvent::ImageRequested { .. } => "image_requested",
            UiEvent::MovieRequested { .. } => "movie_requested",
            UiEvent::HelpRequested { .. } => "help_requested",
            UiEvent::DisplayReset => "display_reset",
            UiEvent::MapOptionsRequested => "map_options_requested",
            UiEvent::DefaultOptionsRequested { .. } => "default_options_requested",
        }
    }
}

/// Everything on screen an event handler may touch.
pub struct Page<'a> {
    pub run_form: &'a mut dyn FormHost,
    pub ashxp_form: &'a mut dyn FormHost,
    pub params_frame: &'a mut dyn Frame,
    pub display_frame: &'a mut dyn Frame,
    pub window: &'a mut dyn Window,
    pub volcanoes: &'a VolcanoTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UiOutcome {
    Done,
    VolcanoPopulated { volcano: Volcano },
    RunOptionsReconciled { adjustments: RunOptionsAdjustments },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiErrorCategory {
    Validation,
    Selection,
    /// A control the handler reads or writes is absent from the page.
    Form,
    Navigation,
    Configuration,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: &'static str,
    source: FormError,
}

impl UiError {
    /// Files `source` under the kind of failure it means for `event`.
    pub fn from_event(event: &UiEvent, source: FormError) -> Self {
        let category = match &source {
            FormError::BadEruptionDate { .. } | FormError::InvalidNumber { .. } => {
                UiErrorCategory::Validation
            }
            FormError::NoSelection
            | FormError::SelectionOutOfRange { .. }
            | FormError::NoUnknownEntry => UiErrorCategory::Selection,
            // Only the previous-run handler reads a form inside another frame;
            // its absence means that frame is not showing the run parameters.
            FormError::MissingField { .. } => match event {
                UiEvent::PreviousRunRequested { .. } => UiErrorCategory::Navigation,
                _ => UiErrorCategory::Form,
            },
            FormError::RaggedVolcanoTable { .. }
            | FormError::VolcanoNameCount { .. }
            | FormError::VolcanoList { .. } => UiErrorCategory::Configuration,
        };
        Self {
            category,
            context: event.name(),
            source,
        }
    }

    /// Whether the user has already been told through an alert.
    pub fn user_notified(&self) -> bool {
        matches!(self.source, FormError::BadEruptionDate { .. })
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> &'static str {
        self.context
    }

    pub fn error(&self) -> &FormError {
        &self.source
    }

    pub fn code(&self) -> ErrorCode {
        self.source.code()
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from(self.source.clone())
    }
}

pub fn dispatch(
    controller: &FormController,
    event: UiEvent,
    page: &mut Page<'_>,
) -> Result<UiOutcome, UiError> {
    let name = event.name();
    debug!(event = name, "dispatching form event");

    let result = match &event {
        UiEvent::VolcanoSelected => controller
            .populate_from_selection(page.run_form, page.volcanoes)
            .map(|volcano| UiOutcome::VolcanoPopulated {
                volcano: volcano.clone(),
            }),
        UiEvent::UnknownVolcanoRequested { option_count } => controller
            .select_unknown_volcano(page.run_form, *option_count)
            .map(|()| UiOutcome::Done),
        UiEvent::EruptDateChanged => controller
            .validate_eruption_date(page.run_form, page.window)
            .map(|()| UiOutcome::Done),
        UiEvent::RunOptionsSubmitted => controller
            .reconcile_run_options(page.run_form)
            .map(|adjustments| UiOutcome::RunOptionsReconciled { adjustments }),
        UiEvent::PreviousRunRequested { session_id } => controller
            .navigate_to_run_params(page.params_frame, page.display_frame, session_id)
            .map(|()| UiOutcome::Done),
        UiEvent::ImageRequested { working_dir } => controller
            .load_image(&*page.ashxp_form, page.display_frame, working_dir)
            .map(|()| UiOutcome::Done),
        UiEvent::MovieRequested { movie_url } => {
            controller.load_movie(page.display_frame, movie_url);
            Ok(UiOutcome::Done)
        }
        UiEvent::HelpRequested { help_url } => {
            controller.open_help_window(page.window, help_url);
            Ok(UiOutcome::Done)
        }
        UiEvent::DisplayReset => {
            controller.reset_display(page.display_frame);
            Ok(UiOutcome::Done)
        }
        UiEvent::MapOptionsRequested => {
            controller.open_map_options_window(page.window);
            Ok(UiOutcome::Done)
        }
        UiEvent::DefaultOptionsRequested {
            session_id,
            previous,
        } => {
            controller.navigate_to_default_options(page.display_frame, session_id, previous);
            Ok(UiOutcome::Done)
        }
    };

    result.map_err(|error| {
        warn!(event = name, %error, "form event failed");
        UiError::from_event(&event, error)
    })
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
