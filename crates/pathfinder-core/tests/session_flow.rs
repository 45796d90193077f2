use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pathfinder_core::form::Field;
use pathfinder_core::notifier::SessionEvent;
use pathfinder_core::router::{Navigation, Route, Router};
use pathfinder_core::session::PROFILE_KEY;
use pathfinder_core::{watcher, FileStorage, KeyValueStorage, ProfileForm, Session, SubmitError};
use tempfile::TempDir;

#[test]
fn test_signup_unlocks_protected_views_and_logout_locks_them() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));
    let session = Session::new(storage.clone());
    let mut router = Router::new(session.clone());

    let events = Arc::new(AtomicUsize::new(0));
    let seen = events.clone();
    let _subscription = session.notifier().on_change(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    // Blocked before a profile exists
    let nav = router.navigate("/roadmap");
    assert!(matches!(nav, Navigation::Redirected { .. }));
    assert_eq!(router.route(), Route::Login);

    // An incomplete form changes nothing on disk
    let mut form = ProfileForm::new();
    form.set_text(Field::Name, "Sam");
    assert!(matches!(form.submit(&session), Err(SubmitError::Invalid(_))));
    assert!(storage.get_item(PROFILE_KEY).unwrap().is_none());
    assert_eq!(events.load(Ordering::SeqCst), 0);

    form.select_programming_language("Python");
    form.toggle_skill("SQL");
    form.submit(&session).unwrap();
    assert!(session.is_authenticated());
    assert_eq!(events.load(Ordering::SeqCst), 1);

    // Resume where the user was headed
    assert_eq!(router.resume_after_login().location().route, Route::Roadmap);

    session.sign_out().unwrap();
    assert_eq!(events.load(Ordering::SeqCst), 2);
    let nav = router.reevaluate().unwrap();
    assert_eq!(nav.location().route, Route::Login);
    assert_eq!(router.pending_destination(), Some("/roadmap"));
}

#[test]
fn test_profile_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let session = Session::new(Arc::new(FileStorage::new(dir.path())));
        let mut form = ProfileForm::new();
        form.set_text(Field::Name, "Sam");
        form.select_programming_language("Rust");
        form.add_custom_skill("Embedded").unwrap();
        form.submit(&session).unwrap();
    }

    let session = Session::new(Arc::new(FileStorage::new(dir.path())));
    let profile = session.profile().unwrap();
    assert_eq!(profile.name, "Sam");
    assert!(profile.skills.contains("Embedded"));
}

#[tokio::test]
async fn test_other_process_logout_reaches_watcher_subscribers() {
    let dir = TempDir::new().unwrap();
    let ours = Session::new(Arc::new(FileStorage::new(dir.path())));
    let theirs = Session::new(Arc::new(FileStorage::new(dir.path())));

    let mut form = ProfileForm::new();
    form.select_programming_language("Go");
    form.toggle_skill("Git");
    form.submit(&ours).unwrap();

    let mut events = ours.notifier().subscribe();
    let _handle = watcher::spawn(ours.clone(), Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(50)).await;

    theirs.sign_out().unwrap();

    let event = tokio::time::timeout(Duration::from_secs(2), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, SessionEvent::ExternalChange);
    assert!(!ours.is_authenticated());
}
