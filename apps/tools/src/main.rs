use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use form_controller::{
    config::{load_settings, load_settings_from, Settings},
    events::{dispatch, Page, UiEvent, UiOutcome},
    memory::{InMemoryForm, RecordingFrame, RecordingWindow},
    volcano_list::load_volcano_table,
    FormController,
};
use serde::Serialize;
use shared::{
    domain::{FieldName, VolcanoTable},
    error::ErrorReport,
    protocol::WindowRequest,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "webpuff-tools", about = "Drive the webpuff run form without a browser")]
struct Cli {
    /// Settings file; webpuff.toml in the working directory when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Volcano table; overrides settings and PUFF_VOLCANO_LIST.
    #[arg(long)]
    volcano_list: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the volcano lookup table.
    Volcanoes,
    /// Fill the run form from a volcano, by selector index or name.
    Populate {
        #[arg(long, conflicts_with = "name")]
        index: Option<usize>,
        #[arg(long)]
        name: Option<String>,
    },
    CheckDate {
        date: String,
    },
    Reconcile {
        #[arg(long, default_value = "")]
        run_hours: String,
        #[arg(long, default_value = "")]
        erupt_hours: String,
        #[arg(long, default_value = "")]
        save_hours: String,
        #[arg(long, default_value = "")]
        phi_dist: String,
        #[arg(long, default_value = "")]
        ash_log_mean: String,
        #[arg(long, default_value = "")]
        ash_log_sdev: String,
    },
    /// Reopen a previous run in the parameter and display frames.
    RunParams {
        #[arg(long)]
        previous: String,
        #[arg(long)]
        session_id: String,
    },
    DefaultOptions {
        #[arg(long)]
        previous: String,
        #[arg(long)]
        session_id: String,
    },
    MapOptions,
    HelpWindow {
        url: String,
    },
}

#[derive(Serialize)]
struct Transcript<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<UiOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
    run_form: &'a InMemoryForm,
    params_frame: &'a RecordingFrame,
    display_frame: &'a RecordingFrame,
    opened_windows: &'a [WindowRequest],
    alerts: Vec<String>,
}

struct Screen {
    run_form: InMemoryForm,
    ashxp_form: InMemoryForm,
    params_frame: RecordingFrame,
    display_frame: RecordingFrame,
    window: RecordingWindow,
}

impl Screen {
    fn new(run_form: InMemoryForm, params_frame: RecordingFrame) -> Self {
        Self {
            run_form,
            ashxp_form: InMemoryForm::with_fields([FieldName::Image]),
            params_frame,
            display_frame: RecordingFrame::new("ashxp"),
            window: RecordingWindow::new(),
        }
    }

    /// Fires one event and prints what the page looks like afterwards.
    fn run(
        mut self,
        controller: &FormController,
        volcanoes: &VolcanoTable,
        event: UiEvent,
    ) -> Result<()> {
        let mut page = Page {
            run_form: &mut self.run_form,
            ashxp_form: &mut self.ashxp_form,
            params_frame: &mut self.params_frame,
            display_frame: &mut self.display_frame,
            window: &mut self.window,
            volcanoes,
        };
        let result = dispatch(controller, event, &mut page);

        let (outcome, error) = match &result {
            Ok(outcome) => (Some(outcome.clone()), None),
            Err(ui_error) => (None, Some(ui_error.report())),
        };
        let alerts = self.window.take_alert_messages();
        let transcript = Transcript {
            outcome,
            error,
            run_form: &self.run_form,
            params_frame: &self.params_frame,
            display_frame: &self.display_frame,
            opened_windows: self.window.opened(),
            alerts,
        };
        println!("{}", serde_json::to_string_pretty(&transcript)?);

        if let Err(ui_error) = result {
            bail!("{} failed: {}", ui_error.context(), ui_error.error());
        }
        Ok(())
    }
}

fn volcanoes_for(settings: &Settings, override_path: Option<&Path>) -> Result<VolcanoTable> {
    let Some(path) = override_path.or(settings.volcano_list.as_deref()) else {
        bail!("no volcano list configured; pass --volcano-list or set PUFF_VOLCANO_LIST");
    };
    let table = load_volcano_table(path, settings.default_area)?;
    if table.is_empty() {
        warn!(path = %path.display(), "volcano list has no records");
    }
    Ok(table)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => load_settings_from(path, None)
            .with_context(|| format!("failed to load settings '{}'", path.display()))?,
        None => load_settings().context("failed to load settings")?,
    };
    info!(settings = ?cli.settings, "loaded settings");

    let empty = VolcanoTable::default();
    let run_form = InMemoryForm::run_params();
    let params_frame = RecordingFrame::new("runParams");

    match cli.command {
        Command::Volcanoes => {
            let volcanoes = volcanoes_for(&settings, cli.volcano_list.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&volcanoes)?);
        }
        Command::Populate { index, name } => {
            let volcanoes = volcanoes_for(&settings, cli.volcano_list.as_deref())?;
            let index = match (index, name) {
                (Some(index), _) => index,
                (None, Some(name)) => volcanoes
                    .position(&name)
                    .with_context(|| format!("no volcano named '{name}'"))?,
                (None, None) => bail!("pass --index or --name"),
            };
            let controller = FormController::new(settings);
            Screen::new(run_form.with_selection(index), params_frame).run(
                &controller,
                &volcanoes,
                UiEvent::VolcanoSelected,
            )?;
        }
        Command::CheckDate { date } => {
            let controller = FormController::new(settings);
            Screen::new(run_form.with_value(FieldName::EruptDate, date), params_frame).run(
                &controller,
                &empty,
                UiEvent::EruptDateChanged,
            )?;
        }
        Command::Reconcile {
            run_hours,
            erupt_hours,
            save_hours,
            phi_dist,
            ash_log_mean,
            ash_log_sdev,
        } => {
            let run_form = run_form
                .with_value(FieldName::RunHours, run_hours)
                .with_value(FieldName::EruptHours, erupt_hours)
                .with_value(FieldName::SaveHours, save_hours)
                .with_value(FieldName::PhiDist, phi_dist)
                .with_value(FieldName::AshLogMean, ash_log_mean)
                .with_value(FieldName::AshLogSdev, ash_log_sdev);
            let controller = FormController::new(settings);
            Screen::new(run_form, params_frame).run(
                &controller,
                &empty,
                UiEvent::RunOptionsSubmitted,
            )?;
        }
        Command::RunParams {
            previous,
            session_id,
        } => {
            let params_frame = params_frame.with_form_value(
                settings.run_params_form.clone(),
                FieldName::Previous,
                previous,
            );
            let controller = FormController::new(settings);
            Screen::new(run_form, params_frame).run(
                &controller,
                &empty,
                UiEvent::PreviousRunRequested { session_id },
            )?;
        }
        Command::DefaultOptions {
            previous,
            session_id,
        } => {
            let controller = FormController::new(settings);
            Screen::new(run_form, params_frame).run(
                &controller,
                &empty,
                UiEvent::DefaultOptionsRequested {
                    session_id,
                    previous,
                },
            )?;
        }
        Command::MapOptions => {
            let controller = FormController::new(settings);
            Screen::new(run_form, params_frame).run(
                &controller,
                &empty,
                UiEvent::MapOptionsRequested,
            )?;
        }
        Command::HelpWindow { url } => {
            let controller = FormController::new(settings);
            Screen::new(run_form, params_frame).run(
                &controller,
                &empty,
                UiEvent::HelpRequested { help_url: url },
            )?;
        }
    }

    Ok(())
}
