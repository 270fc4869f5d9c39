use super::*;

#[test]
fn writing_an_absent_control_is_an_error() {
    let mut form = InMemoryForm::with_fields([FieldName::Lat]);
    form.set_value(FieldName::Lat, "61.3").expect("lat");
    assert_eq!(form.get(FieldName::Lat), Some("61.3"));

    let err = form.set_value(FieldName::Lon, "1").unwrap_err();
    assert_eq!(
        err,
        FormError::MissingField {
            field: FieldName::Lon
        }
    );
}

#[test]
fn frame_resolves_targets_against_document_url() {
    let mut frame = RecordingFrame::new("ashxp")
        .with_document_url("http://puff.example/cgi-bin/webpuff/index.pl")
        .expect("url");

    frame.navigate("pix/puff_bg.gif");
    frame.navigate("../movies/run.gif");

    let navs = frame.take_navigations();
    assert_eq!(navs.len(), 2);
    assert_eq!(navs[0].target, "pix/puff_bg.gif");
    assert_eq!(
        navs[0].resolved.as_deref(),
        Some("http://puff.example/cgi-bin/webpuff/pix/puff_bg.gif")
    );
    assert_eq!(
        navs[1].resolved.as_deref(),
        Some("http://puff.example/cgi-bin/webpuff/movies/run.gif")
    );
    assert!(frame.navigations().is_empty());
}

#[test]
fn navigation_drops_the_old_document_forms() {
    let mut frame = RecordingFrame::new("runParams").with_form_value(
        "runParamsForm",
        FieldName::Previous,
        "run_1",
    );
    assert_eq!(
        frame.form_value("runParamsForm", FieldName::Previous).as_deref(),
        Some("run_1")
    );

    frame.navigate("runParams.pl");
    assert_eq!(frame.form_value("runParamsForm", FieldName::Previous), None);
    assert_eq!(frame.location(), Some("runParams.pl"));
}

#[test]
fn window_records_alerts_and_popups() {
    let mut window = RecordingWindow::new();
    window.alert("first");
    window.open(&WindowRequest::new("mapOptions.pl"));

    assert_eq!(window.take_alert_messages(), vec!["first".to_string()]);
    assert!(window.take_alert_messages().is_empty());
    assert_eq!(window.opened()[0].url, "mapOptions.pl");
}
