//! Session lifecycle tests
//!
//! Covers the Idle -> Filled -> Baking -> Done -> Idle cycle, per-tick
//! almost-ready notifications and the error taxonomy.

use oven_core::{
    BakeStatus, CookieVariant, FillSummary, Session, SessionError, SessionState, Sheet,
    SheetError, TickResult,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn full_size_session(variant: CookieVariant) -> Session {
    Session::new(26.0, 18.0, variant).expect("valid sheet")
}

fn bake(session: &mut Session, minutes: i64) -> Vec<TickResult> {
    session
        .run(minutes)
        .expect("bake should start")
        .collect::<Result<Vec<_>, _>>()
        .expect("ticks should succeed")
}

// ============================================================================
// Fill
// ============================================================================

#[test]
fn test_fill_reports_size_and_capacity() {
    let mut session = full_size_session(CookieVariant::peanut());

    assert_eq!(
        session.fill(),
        Ok(FillSummary {
            batch_size: 117,
            capacity: 117
        })
    );
    assert_eq!(session.state(), SessionState::Filled);
}

#[test]
fn test_fill_chocolate_chip() {
    let mut session = full_size_session(CookieVariant::chocolate_chip());
    let summary = session.fill().unwrap();
    assert_eq!(summary.batch_size, 48);
    assert_eq!(summary.capacity, 48);
}

// ============================================================================
// Bake
// ============================================================================

#[test]
fn test_peanut_ten_minutes_signals_at_nine_and_ten() {
    let mut session = full_size_session(CookieVariant::peanut());
    session.fill().unwrap();

    let ticks = bake(&mut session, 10);

    let mut expected = vec![BakeStatus::Doughy; 8];
    expected.extend([BakeStatus::AlmostReady; 2]);
    assert_eq!(
        ticks.iter().map(|t| t.status).collect::<Vec<_>>(),
        expected
    );
    assert_eq!(
        ticks.iter().map(|t| t.tick).collect::<Vec<_>>(),
        (1..=10).collect::<Vec<_>>()
    );
    assert_eq!(
        ticks
            .iter()
            .filter(|t| t.is_almost_ready)
            .map(|t| t.tick)
            .collect::<Vec<_>>(),
        vec![9, 10]
    );

    let almost = session.event_log().events_of_type("AlmostReady");
    assert_eq!(almost.len(), 2);
    assert_eq!(almost[0].tick(), 9);
    assert_eq!(almost[1].tick(), 10);
}

#[test]
fn test_peanut_sixteen_minutes_burns() {
    let mut session = full_size_session(CookieVariant::peanut());
    session.fill().unwrap();
    bake(&mut session, 16);

    let report = session.finish().unwrap();
    assert_eq!(report.final_status, BakeStatus::Burned);
    assert_eq!(report.final_size, 117);
    assert_eq!(report.variant_type_name, "peanut");
    assert_eq!(report.minutes_baked, 16);
}

#[test]
fn test_zero_minutes_goes_straight_to_done() {
    for variant in CookieVariant::catalog() {
        let mut session = full_size_session(variant);
        session.fill().unwrap();

        let ticks = bake(&mut session, 0);
        assert!(ticks.is_empty());
        assert_eq!(session.state(), SessionState::Done);

        let report = session.finish().unwrap();
        assert_eq!(report.final_status, BakeStatus::Doughy);
        assert_eq!(report.minutes_baked, 0);
    }
}

#[test]
fn test_run_is_lazy() {
    let mut session = full_size_session(CookieVariant::peanut());
    session.fill().unwrap();

    let mut run = session.run(3).unwrap();
    assert_eq!(run.remaining(), 3);
    let first = run.next().unwrap().unwrap();
    assert_eq!(first.tick, 1);
    assert_eq!(run.remaining(), 2);
    drop(run);

    assert_eq!(session.batch().unwrap().elapsed_minutes(), Ok(1));
    assert_eq!(session.state(), SessionState::Baking);
}

#[test]
fn test_run_iterator_ends_after_total() {
    let mut session = full_size_session(CookieVariant::chocolate_chip());
    session.fill().unwrap();

    let mut run = session.run(2).unwrap();
    assert!(run.next().is_some());
    assert!(run.next().is_some());
    assert!(run.next().is_none());
    assert!(run.next().is_none());
}

// ============================================================================
// Finish
// ============================================================================

#[test]
fn test_finish_returns_session_to_idle() {
    let mut session = full_size_session(CookieVariant::chocolate_chip());
    session.fill().unwrap();
    bake(&mut session, 22);

    let report = session.finish().unwrap();
    assert_eq!(report.final_status, BakeStatus::Ready);
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.batch().is_none());

    // The same session can bake again.
    assert_eq!(session.fill().unwrap().batch_size, 48);
}

#[test]
fn test_finish_before_bake_is_rejected() {
    let mut session = full_size_session(CookieVariant::peanut());
    session.fill().unwrap();

    assert_eq!(
        session.finish(),
        Err(SessionError::InvalidState {
            operation: "finish",
            state: SessionState::Filled
        })
    );
}

#[test]
fn test_event_log_records_lifecycle() {
    let mut session = full_size_session(CookieVariant::peanut());
    session.fill().unwrap();
    bake(&mut session, 4);
    session.finish().unwrap();

    let types: Vec<&str> = session
        .event_log()
        .events()
        .iter()
        .map(|e| e.event_type())
        .collect();
    assert_eq!(
        types,
        vec![
            "BatchFilled",
            "MinuteBaked",
            "MinuteBaked",
            "MinuteBaked",
            "MinuteBaked",
            "BatchFinished"
        ]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_batch_status_fails() {
    let mut session = Session::new(1.0, 1.0, CookieVariant::peanut()).unwrap();
    let summary = session.fill().unwrap();
    assert_eq!(summary.batch_size, 0);
    assert_eq!(summary.capacity, 0);

    let err = session.batch_status().unwrap_err();
    assert!(err.is_empty_batch());

    let err = session.run(5).unwrap_err();
    assert!(err.is_empty_batch());
    assert_eq!(session.state(), SessionState::Filled);

    assert_eq!(session.discard(), Ok(0));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_negative_duration_rejected_before_any_tick() {
    let mut session = full_size_session(CookieVariant::peanut());
    session.fill().unwrap();

    assert_eq!(
        session.run(-3).unwrap_err(),
        SessionError::InvalidDuration { minutes: -3 }
    );
    assert_eq!(session.state(), SessionState::Filled);
    assert_eq!(session.batch().unwrap().elapsed_minutes(), Ok(0));
    assert!(session.event_log().events_of_type("MinuteBaked").is_empty());
}

#[test]
fn test_invalid_sheet_rejected() {
    assert!(matches!(
        Session::new(0.0, 18.0, CookieVariant::peanut()),
        Err(SessionError::Sheet(_))
    ));
}

#[test]
fn test_huge_sheet_rejected_instead_of_filled() {
    let result = Session::new(1e19, 4.0, CookieVariant::peanut());
    assert!(matches!(
        result,
        Err(SessionError::Sheet(SheetError::TooLarge { .. }))
    ));
}

#[test]
fn test_largest_sheet_fills() {
    let mut session = Session::new(Sheet::MAX_SIDE, Sheet::MAX_SIDE, CookieVariant::peanut())
        .expect("max-size sheet is valid");
    assert_eq!(session.fill().unwrap().batch_size, 250_000);
}

#[test]
fn test_event_log_covers_only_current_batch() {
    let mut session = full_size_session(CookieVariant::peanut());
    session.fill().unwrap();
    bake(&mut session, 10);
    session.finish().unwrap();

    session.fill().unwrap();
    let events = session.event_log().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type(), "BatchFilled");
}
