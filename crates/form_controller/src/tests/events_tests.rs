use super::*;
use crate::memory::{InMemoryForm, RecordingFrame, RecordingWindow};
use shared::domain::FieldName;

struct Screen {
    run_form: InMemoryForm,
    ashxp_form: InMemoryForm,
    params_frame: RecordingFrame,
    display_frame: RecordingFrame,
    window: RecordingWindow,
    volcanoes: VolcanoTable,
}

impl Screen {
    fn new() -> Self {
        let volcanoes = VolcanoTable::from_flat_values(
            ["Redoubt", "Unknown"],
            &[60.48, 0.0, -152.74, 0.0, 3108.0, 0.0, 15.0, 0.0],
        )
        .expect("table");
        Self {
            run_form: InMemoryForm::run_params(),
            ashxp_form: InMemoryForm::with_fields([FieldName::Image]),
            params_frame: RecordingFrame::new("runParams"),
            display_frame: RecordingFrame::new("ashxp"),
            window: RecordingWindow::new(),
            volcanoes,
        }
    }

    fn fire(&mut self, event: UiEvent) -> Result<UiOutcome, UiError> {
        let controller = FormController::default();
        let mut page = Page {
            run_form: &mut self.run_form,
            ashxp_form: &mut self.ashxp_form,
            params_frame: &mut self.params_frame,
            display_frame: &mut self.display_frame,
            window: &mut self.window,
            volcanoes: &self.volcanoes,
        };
        dispatch(&controller, event, &mut page)
    }
}

#[test]
fn volcano_selection_reports_the_populated_volcano() {
    let mut screen = Screen::new();
    screen.run_form.set_selected_index(0);

    match screen.fire(UiEvent::VolcanoSelected).expect("selected") {
        UiOutcome::VolcanoPopulated { volcano } => assert_eq!(volcano.name, "Redoubt"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(screen.run_form.get(FieldName::PlumeMin), Some("3108"));
}

#[test]
fn unknown_then_selection_uses_last_entry() {
    let mut screen = Screen::new();
    screen
        .fire(UiEvent::UnknownVolcanoRequested { option_count: 2 })
        .expect("unknown");
    assert_eq!(screen.run_form.selected_index(), Some(1));

    screen.fire(UiEvent::VolcanoSelected).expect("selected");
    assert_eq!(screen.run_form.get(FieldName::Lat), Some("0"));
}

#[test]
fn bad_date_is_a_notified_validation_error() {
    let mut screen = Screen::new();
    screen
        .run_form
        .set_value(FieldName::EruptDate, "tomorrow")
        .expect("date");

    let err = screen.fire(UiEvent::EruptDateChanged).unwrap_err();
    assert_eq!(err.category(), UiErrorCategory::Validation);
    assert_eq!(err.context(), "erupt_date_changed");
    assert!(err.user_notified());
    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(screen.window.take_alert_messages().len(), 1);
}

#[test]
fn run_options_outcome_lists_adjustments() {
    let mut screen = Screen::new();
    screen.run_form.set_value(FieldName::RunHours, "4").expect("run");
    screen.run_form.set_value(FieldName::SaveHours, "6").expect("save");

    let outcome = screen.fire(UiEvent::RunOptionsSubmitted).expect("reconcile");
    assert_eq!(
        outcome,
        UiOutcome::RunOptionsReconciled {
            adjustments: RunOptionsAdjustments {
                save_hours_clamped: true,
                ..RunOptionsAdjustments::default()
            }
        }
    );
}

#[test]
fn previous_run_without_form_is_a_navigation_error() {
    let mut screen = Screen::new();
    let err = screen
        .fire(UiEvent::PreviousRunRequested {
            session_id: "1".into(),
        })
        .unwrap_err();
    assert_eq!(err.category(), UiErrorCategory::Navigation);
    assert!(!err.user_notified());
    assert_eq!(err.report().message, "form field previous is missing");
}

#[test]
fn missing_controls_outside_navigation_are_form_errors() {
    let mut screen = Screen::new();
    screen.run_form = InMemoryForm::with_fields([FieldName::RunHours]);
    let err = screen.fire(UiEvent::RunOptionsSubmitted).unwrap_err();
    assert_eq!(err.category(), UiErrorCategory::Form);
    assert_eq!(err.context(), "run_options_submitted");

    screen.ashxp_form = InMemoryForm::new();
    let err = screen
        .fire(UiEvent::ImageRequested {
            working_dir: "tmp/".into(),
        })
        .unwrap_err();
    assert_eq!(err.category(), UiErrorCategory::Form);
    assert!(screen.display_frame.navigations().is_empty());
}

#[test]
fn display_events_navigate_the_display_frame() {
    let mut screen = Screen::new();
    screen
        .ashxp_form
        .set_value(FieldName::Image, "ash_0012.jpg")
        .expect("image");

    screen
        .fire(UiEvent::ImageRequested {
            working_dir: "/tmp/puff_9/".into(),
        })
        .expect("image");
    screen
        .fire(UiEvent::MovieRequested {
            movie_url: "/tmp/puff_9/ash.gif".into(),
        })
        .expect("movie");
    screen.fire(UiEvent::DisplayReset).expect("reset");
    screen
        .fire(UiEvent::DefaultOptionsRequested {
            session_id: "9".into(),
            previous: "puff_9".into(),
        })
        .expect("defaults");

    let targets: Vec<String> = screen
        .display_frame
        .take_navigations()
        .into_iter()
        .map(|nav| nav.target)
        .collect();
    assert_eq!(
        targets,
        vec![
            "/tmp/puff_9/ash_0012.jpg",
            "/tmp/puff_9/ash.gif",
            "pix/puff_bg.gif",
            "ashxpOptions.pl?previous=puff_9&sessionID=9",
        ]
    );
}

#[test]
fn window_events_open_popups() {
    let mut screen = Screen::new();
    screen
        .fire(UiEvent::HelpRequested {
            help_url: "help/phiDist.html".into(),
        })
        .expect("help");
    screen.fire(UiEvent::MapOptionsRequested).expect("map");

    let urls: Vec<String> = screen
        .window
        .take_opened_windows()
        .into_iter()
        .map(|request| request.url)
        .collect();
    assert_eq!(urls, vec!["help/phiDist.html", "mapOptions.pl"]);
}
