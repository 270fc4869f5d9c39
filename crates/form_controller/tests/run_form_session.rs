use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use form_controller::{
    config::load_settings_from,
    events::{dispatch, Page, UiEvent, UiOutcome},
    memory::{InMemoryForm, RecordingFrame, RecordingWindow},
    volcano_list::load_volcano_table,
    FormController,
};
use shared::domain::FieldName;

#[test]
fn run_form_session_from_listing_file_to_previous_run() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("webpuff_session_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");

    let listing = temp_root.join("volcanos.txt");
    fs::write(
        &listing,
        "Puff Volcano Listing File\n\
         Cleveland:Aleutians:52.82:N:169.95:W:1730\n\
         Shishaldin:Aleutians:54.76:N:163.97:W:2857\n",
    )
    .expect("write listing");

    let mut env_vars = config::Map::new();
    env_vars.insert(
        "PUFF_VOLCANO_LIST".to_string(),
        listing.to_string_lossy().into_owned(),
    );
    env_vars.insert("WEBPUFF__DEFAULT_AREA".to_string(), "5".to_string());
    let settings =
        load_settings_from(&temp_root.join("webpuff.toml"), Some(env_vars)).expect("settings");

    let volcano_list = settings.volcano_list.clone().expect("volcano list path");
    let volcanoes = load_volcano_table(&volcano_list, settings.default_area).expect("volcanoes");
    let controller = FormController::new(settings);

    let mut run_form = InMemoryForm::run_params()
        .with_selection(1)
        .with_value(FieldName::EruptDate, "2008 07 12 19:30")
        .with_value(FieldName::RunHours, "24")
        .with_value(FieldName::EruptHours, "30")
        .with_value(FieldName::SaveHours, "1")
        .with_value(FieldName::PhiDist, "2.5")
        .with_value(FieldName::AshLogMean, "-1");
    let mut ashxp_form = InMemoryForm::with_fields([FieldName::Image]);
    let mut params_frame = RecordingFrame::new("runParams").with_form_value(
        "runParamsForm",
        FieldName::Previous,
        "puff_31",
    );
    let mut display_frame = RecordingFrame::new("ashxp");
    let mut window = RecordingWindow::new();

    let mut page = Page {
        run_form: &mut run_form,
        ashxp_form: &mut ashxp_form,
        params_frame: &mut params_frame,
        display_frame: &mut display_frame,
        window: &mut window,
        volcanoes: &volcanoes,
    };

    let selected = dispatch(&controller, UiEvent::VolcanoSelected, &mut page).expect("select");
    assert!(matches!(
        selected,
        UiOutcome::VolcanoPopulated { ref volcano } if volcano.name == "Shishaldin"
    ));
    dispatch(&controller, UiEvent::EruptDateChanged, &mut page).expect("date");
    dispatch(&controller, UiEvent::RunOptionsSubmitted, &mut page).expect("options");
    dispatch(
        &controller,
        UiEvent::PreviousRunRequested {
            session_id: "abc".into(),
        },
        &mut page,
    )
    .expect("previous");

    assert_eq!(run_form.get(FieldName::Lat), Some("54.76"));
    assert_eq!(run_form.get(FieldName::Lon), Some("-163.97"));
    assert_eq!(run_form.get(FieldName::PlumeMin), Some("2857"));
    assert_eq!(run_form.get(FieldName::Area), Some("5"));
    assert_eq!(run_form.get(FieldName::EruptHours), Some("24"));
    assert_eq!(run_form.get(FieldName::PhiDist), Some("2.5"));
    assert_eq!(run_form.get(FieldName::AshLogMean), Some(""));
    assert_eq!(
        params_frame.location(),
        Some("runParams.pl?previous=puff_31&sessionID=abc")
    );
    assert_eq!(
        display_frame.location(),
        Some("ashxpOptions.pl?previous=puff_31&sessionID=abc")
    );
    assert!(window.take_alert_messages().is_empty());

    fs::remove_dir_all(temp_root).expect("cleanup");
}
