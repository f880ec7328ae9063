use super::*;

fn logged_in() -> Session {
    let mut session = Session::new();
    session.log_in("Amna", "a@b.com", "pw").expect("login");
    session
}

#[test]
fn guest_reachable_set() {
    assert_eq!(
        reachable_pages(false),
        &[PageId::Welcome, PageId::Login, PageId::Tips, PageId::Settings]
    );
    assert_eq!(default_page(false), PageId::Welcome);
}

#[test]
fn member_reachable_set() {
    assert_eq!(
        reachable_pages(true),
        &[
            PageId::Dashboard,
            PageId::Predict,
            PageId::Reports,
            PageId::Tips,
            PageId::Settings
        ]
    );
    assert_eq!(default_page(true), PageId::Dashboard);
}

#[test]
fn guest_cannot_reach_member_pages() {
    let mut session = Session::new();
    session.go_to(PageId::Tips);
    for page in [PageId::Dashboard, PageId::Predict, PageId::Reports] {
        assert_eq!(session.go_to(page), NavigationOutcome::Ignored);
        assert_eq!(session.current_page(), PageId::Tips);
    }
}

#[test]
fn member_cannot_return_to_welcome_or_login() {
    let mut session = logged_in();
    assert_eq!(session.go_to(PageId::Login), NavigationOutcome::Ignored);
    assert_eq!(session.go_to(PageId::Welcome), NavigationOutcome::Ignored);
    assert_eq!(session.current_page(), PageId::Dashboard);
    assert_eq!(session.go_to(PageId::Predict), NavigationOutcome::Moved);
    assert_eq!(session.current_page(), PageId::Predict);
}

#[test]
fn every_transition_keeps_page_reachable() {
    let mut session = Session::new();
    for step in 0..4 {
        for page in PageId::ALL {
            session.go_to(page);
            assert!(session.is_consistent(), "after go_to({page:?})");
        }
        if step % 2 == 0 {
            session.log_in("Amna", "a@b.com", "pw").expect("login");
        } else {
            session.log_out();
        }
        assert!(session.is_consistent());
    }
}

#[test]
fn login_requires_all_fields() {
    let mut session = Session::new();
    session.go_to(PageId::Login);
    for (name, email, password, field) in [
        ("", "a@b.com", "pw", "name"),
        ("Amna", "", "pw", "email"),
        ("Amna", "a@b.com", "  ", "password"),
    ] {
        let err = session.log_in(name, email, password).expect_err("missing field");
        assert!(matches!(err, SessionError::Validation { field: ref f, .. } if f == field));
        assert!(!session.authenticated());
        assert_eq!(session.current_page(), PageId::Login);
        assert_eq!(session.identity(), "");
    }
}

#[test]
fn login_lands_on_dashboard() {
    let session = logged_in();
    assert!(session.authenticated());
    assert_eq!(session.identity(), "Amna");
    assert_eq!(session.current_page(), PageId::Dashboard);
}

#[test]
fn logout_returns_to_welcome_and_clears_identity() {
    let mut session = logged_in();
    session.go_to(PageId::Settings);
    session.log_out();
    assert!(!session.authenticated());
    assert_eq!(session.identity(), "");
    assert_eq!(session.current_page(), PageId::Welcome);
}
