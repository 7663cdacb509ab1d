use super::*;
use crate::foundation::core::Rgba8Premul;

fn shared() -> SharedState {
    Arc::new(Mutex::new(SessionState::new()))
}

#[test]
fn restart_bumps_token_and_blanks() {
    let state = shared();
    let mut st = lock_state(&state);
    st.surface.clear(Rgba8Premul::from_straight_rgba(1, 2, 3, 255));
    st.phase = GenerationPhase::Ready;
    let t0 = st.token;
    let t1 = st.restart();
    assert!(t1 > t0);
    assert_eq!(st.phase, GenerationPhase::Idle);
    assert!(st.surface.is_blank());
}

#[test]
fn current_handle_writes_and_moves_phase() {
    let state = shared();
    let token = lock_state(&state).restart();
    let mut handle = GenerationHandle::new(Arc::clone(&state), token);

    assert!(handle.enter(GenerationPhase::LoadingWallpaper));
    let wrote = handle
        .commit(|s| {
            s.clear(Rgba8Premul::from_straight_rgba(9, 9, 9, 255));
            Ok(())
        })
        .unwrap();
    assert!(wrote);

    let st = lock_state(&state);
    assert_eq!(st.phase, GenerationPhase::LoadingWallpaper);
    assert!(!st.surface.is_blank());
}

#[test]
fn stale_handle_is_a_no_op() {
    let state = shared();
    let old = lock_state(&state).restart();
    let mut stale = GenerationHandle::new(Arc::clone(&state), old);
    let newer = lock_state(&state).restart();
    assert_ne!(old, newer);

    assert!(!stale.enter(GenerationPhase::LoadingFrame));
    let wrote = stale
        .commit(|s| {
            s.clear(Rgba8Premul::from_straight_rgba(9, 9, 9, 255));
            Ok(())
        })
        .unwrap();
    assert!(!wrote);
    assert!(!stale.fail(&MockupError::asset_load("late")));

    let st = lock_state(&state);
    assert_eq!(st.phase, GenerationPhase::Idle);
    assert!(st.surface.is_blank());
}

#[test]
fn fail_blanks_and_marks_failed() {
    let state = shared();
    let token = lock_state(&state).restart();
    let mut handle = GenerationHandle::new(Arc::clone(&state), token);
    handle
        .commit(|s| {
            s.clear(Rgba8Premul::from_straight_rgba(9, 9, 9, 255));
            Ok(())
        })
        .unwrap();
    assert!(handle.fail(&MockupError::asset_load("frame missing")));

    let st = lock_state(&state);
    assert_eq!(st.phase, GenerationPhase::Failed);
    assert!(st.surface.is_blank());
}

fn report() -> CompositeReport {
    CompositeReport {
        crop: crate::geometry::crop::resolve_crop(100.0, 200.0, 100.0, 200.0).unwrap(),
        icons_drawn: vec!["mail".to_string()],
        icons_failed: Vec::new(),
        clock_drawn: true,
    }
}

#[test]
fn finish_publishes_report_with_ready() {
    let state = shared();
    let token = lock_state(&state).restart();
    let mut handle = GenerationHandle::new(Arc::clone(&state), token);
    assert!(handle.enter(GenerationPhase::DrawingClock));
    assert!(handle.finish(&report()));

    let st = lock_state(&state);
    assert_eq!(st.phase, GenerationPhase::Ready);
    assert_eq!(st.report.as_ref(), Some(&report()));
}

#[test]
fn stale_finish_leaves_newer_generation_alone() {
    let state = shared();
    let old = lock_state(&state).restart();
    let mut stale = GenerationHandle::new(Arc::clone(&state), old);
    let newer = lock_state(&state).restart();
    let mut current = GenerationHandle::new(Arc::clone(&state), newer);
    assert!(current.enter(GenerationPhase::LoadingFrame));

    assert!(!stale.finish(&report()));

    let st = lock_state(&state);
    assert_eq!(st.phase, GenerationPhase::LoadingFrame);
    assert!(st.report.is_none());
}

#[test]
fn busy_phases() {
    assert!(GenerationPhase::LoadingIcons.is_busy());
    assert!(!GenerationPhase::Ready.is_busy());
    assert!(!GenerationPhase::Failed.is_busy());
    assert!(!GenerationPhase::Idle.is_busy());
}
