use super::*;

use std::{cell::RefCell, rc::Rc};

use shared::domain::CellColor;

use crate::layout::Region;

#[derive(Clone, Default)]
struct RecordingNotifier {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.notices
            .borrow_mut()
            .push(Notice::new(severity, message));
    }
}

impl RecordingNotifier {
    fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    fn count(&self) -> usize {
        self.notices.borrow().len()
    }
}

fn small_settings(mode: Mode) -> Settings {
    Settings {
        chart_width: 2,
        chart_height: 2,
        shaft_count: 2,
        treadle_count: 2,
        mode,
        ..Settings::default()
    }
}

fn session(mode: Mode) -> (Session, RecordingNotifier) {
    let notifier = RecordingNotifier::default();
    (Session::new(small_settings(mode), notifier.clone()), notifier)
}

// Cell centres for the 2x2 layout: shaft (0,30) tieup (60,30) chart (0,90)
// treadle (60,90).
fn click(session: &mut Session, x: f32, y: f32) {
    session.click(Point::new(x, y)).expect("supported layout");
}

#[test]
fn initialize_reallocates_for_staged_dimensions() {
    let (mut session, notifier) = session(Mode::ToDraft);

    assert_eq!(session.set_dimension(Dimension::ChartWidth, 250), 100);
    assert_eq!(session.set_dimension(Dimension::ShaftCount, 0), 1);
    assert!(session.has_pending_dimensions());
    assert_eq!(session.settings().chart_width, 2);
    assert!(session.state().fits(session.settings()));

    session.initialize();

    assert!(!session.has_pending_dimensions());
    assert_eq!(session.settings().chart_width, 100);
    assert_eq!(session.settings().shaft_count, 1);
    assert!(session.state().fits(session.settings()));
    assert_eq!(notifier.last().map(|n| n.severity), Some(Severity::Success));
}

#[test]
fn initialize_discards_pattern_data() {
    let (mut session, _) = session(Mode::ToDraft);
    click(&mut session, 10.0, 40.0);
    assert!(!session.state().shaft.is_all_false());

    session.initialize();
    assert_eq!(session.state(), &WeaveState::new(session.settings()));
}

#[test]
fn clicks_toggle_cells_and_misses_are_ignored() {
    let (mut session, _) = session(Mode::ToDraft);

    let hit = session.click(Point::new(5.0, 5.0)).expect("layout");
    assert_eq!(hit.map(|h| h.region), Some(Region::Warp));
    assert_eq!(
        session.state().warp_colors.get(0),
        CellColor::Set(session.settings().selected_color)
    );

    let before = session.state().clone();
    assert_eq!(session.click(Point::new(700.0, 5.0)).expect("layout"), None);
    assert_eq!(session.state(), &before);
}

#[test]
fn draws_diagonal_twill_from_clicked_draft() {
    let (mut session, notifier) = session(Mode::ToDraft);
    click(&mut session, 10.0, 40.0); // shaft 0, col 0
    click(&mut session, 30.0, 60.0); // shaft 1, col 1
    click(&mut session, 70.0, 40.0); // tieup shaft 0 - treadle 0
    click(&mut session, 90.0, 60.0); // tieup shaft 1 - treadle 1
    click(&mut session, 70.0, 100.0); // row 0 presses treadle 0
    click(&mut session, 90.0, 120.0); // row 1 presses treadle 1

    session.generate_drawdown().expect("to-draft mode");

    assert_eq!(
        session.state().chart.drawdown().to_rows(),
        vec![vec![true, false], vec![false, true]]
    );
    assert_eq!(
        notifier.last(),
        Some(Notice::new(Severity::Success, "Drawdown generated"))
    );
}

#[test]
fn color_chart_keeps_underlying_drawdown() {
    let (mut session, _) = session(Mode::ToDraft);
    click(&mut session, 10.0, 100.0); // chart (0,0)
    let red = Color::rgb(0xff, 0, 0);
    session.set_selected_color(red);
    click(&mut session, 120.0, 120.0); // weft row 1

    session.generate_color_chart().expect("to-draft mode");

    let chart = &session.state().chart;
    assert!(chart.is_colored());
    assert_eq!(chart.drawdown().cells(), &[true, false, false, false]);
    let colors = chart.colors().expect("colored");
    assert_eq!(colors[0], CellColor::Set(red));
    assert_eq!(colors[1], CellColor::Set(Color::WHITE));
    assert_eq!(colors[2], CellColor::Set(red));
}

#[test]
fn generation_outside_its_mode_is_refused() {
    let (mut session, notifier) = session(Mode::FromDraft);
    let before = session.state().clone();

    let err = session.generate_drawdown().expect_err("wrong mode");
    assert!(matches!(err, DraftError::ModeMismatch { .. }));
    assert!(session.generate_color_chart().is_err());
    assert_eq!(session.state(), &before);
    assert_eq!(notifier.last().map(|n| n.severity), Some(Severity::Error));

    session.set_mode(Mode::ToDraft);
    assert!(session.generate_from_draft().is_err());
    assert!(session.generate_drawdown().is_ok());
}

#[test]
fn reverse_inference_reports_collapsed_patterns() {
    let notifier = RecordingNotifier::default();
    let settings = Settings {
        shaft_count: 1,
        ..small_settings(Mode::FromDraft)
    };
    let mut session = Session::new(settings, notifier.clone());
    click(&mut session, 10.0, 100.0); // chart (0,0): columns now differ

    session.generate_from_draft().expect("from-draft mode");

    let notices = notifier.notices.borrow();
    assert!(notices.iter().any(|n| n.severity == Severity::Info));
    assert_eq!(
        notices.last().map(|n| n.message.as_str()),
        Some("Threading and treadling generated")
    );
    assert!(session.state().shaft.get(0, 0));
    assert!(session.state().shaft.get(0, 1));
}

#[test]
fn failed_import_leaves_session_untouched() {
    let (mut session, notifier) = session(Mode::ToDraft);
    click(&mut session, 10.0, 40.0);
    let settings_before = session.settings().clone();
    let state_before = session.state().clone();

    let err = session.import_document(b"{\"version\": \"2.0\"}").expect_err("invalid");
    assert!(matches!(err, DraftError::InvalidFormat(_)));
    let err = session.import_document(b"garbage").expect_err("unreadable");
    assert!(matches!(err, DraftError::ReadError(_)));

    assert_eq!(session.settings(), &settings_before);
    assert_eq!(session.state(), &state_before);
    let last = notifier.last().expect("notice");
    assert_eq!(last.severity, Severity::Error);
    assert!(last.message.starts_with("Error reading file:"));
}

#[test]
fn export_then_import_restores_another_session() {
    let (mut source, _) = session(Mode::ToDraft);
    click(&mut source, 10.0, 40.0);
    source.set_thread_action(ThreadAction::Down);
    let bytes = source.export_document(Utc::now()).expect("export");

    let (mut target, notifier) = session(Mode::FromDraft);
    target.set_dimension(Dimension::ChartHeight, 9);
    target.import_document(&bytes).expect("import");

    assert_eq!(target.settings(), source.settings());
    assert_eq!(target.state(), source.state());
    assert!(!target.has_pending_dimensions());
    assert_eq!(
        notifier.last(),
        Some(Notice::new(Severity::Success, "Import completed"))
    );
}

#[test]
fn unsupported_tieup_location_is_reported() {
    let (mut session, notifier) = session(Mode::ToDraft);
    let count = notifier.count();

    session.set_tieup_location(TieupLocation::LeftUp);

    assert_eq!(notifier.count(), count + 1);
    assert_eq!(notifier.last().map(|n| n.severity), Some(Severity::Error));
    assert!(matches!(
        session.click(Point::new(5.0, 5.0)),
        Err(DraftError::UnsupportedTieupLocation(TieupLocation::LeftUp))
    ));
    assert!(session.layout().is_err());
}
