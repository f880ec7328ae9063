use super::*;
use oracle::Prediction;
use shared::{domain::FeatureVector, protocol::Choice};
use std::sync::atomic::{AtomicUsize, Ordering};

struct FixedOracle {
    prediction: Prediction,
    calls: AtomicUsize,
}

impl FixedOracle {
    fn new(class: u8, confidence: f64) -> Arc<Self> {
        Arc::new(Self {
            prediction: Prediction { class, confidence },
            calls: AtomicUsize::new(0),
        })
    }
}

impl PredictionOracle for FixedOracle {
    fn predict_with_confidence(&self, _features: &FeatureVector) -> Result<Prediction, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.prediction)
    }
}

struct FailingOracle;

impl PredictionOracle for FailingOracle {
    fn predict_with_confidence(&self, _features: &FeatureVector) -> Result<Prediction, OracleError> {
        Err(OracleError::Inference("boom".into()))
    }
}

fn form() -> PredictionForm {
    PredictionForm {
        age: 55,
        sex: Choice::Code(1),
        cp: Choice::Code(2),
        trestbps: 130,
        chol: 250,
        fbs: Choice::Code(0),
        restecg: Choice::Code(1),
        thalach: 150,
        exang: Choice::Code(0),
        oldpeak: 1.0,
        slope: Choice::Code(1),
        ca: Choice::Code(0),
        thal: Choice::Code(2),
    }
}

fn logged_in() -> Session {
    let mut session = Session::new();
    session.log_in("Amna", "a@b.com", "pw").expect("login");
    session
}

#[test]
fn submit_appends_one_record_and_sets_last_result() {
    let workflow = PredictionWorkflow::new(FixedOracle::new(1, 0.82));
    let mut session = logged_in();

    let record = workflow.submit(&mut session, &form()).expect("submit");
    assert!(record.is_high_risk);
    assert_eq!(record.confidence, 0.82);
    assert_eq!(record.identity, "Amna");
    assert_eq!(record.features.cp, 2);
    assert_eq!(session.history(), &[record.clone()]);
    assert_eq!(session.last_result(), Some(&record));

    let second = workflow.submit(&mut session, &form()).expect("submit");
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history()[1].id, second.id);
    assert_eq!(session.last_result().map(|r| r.id), Some(second.id));
    assert_ne!(record.id, second.id);
}

#[test]
fn class_zero_is_low_risk_with_reported_confidence() {
    let workflow = PredictionWorkflow::new(FixedOracle::new(0, 0.91));
    let mut session = logged_in();
    let record = workflow.submit(&mut session, &form()).expect("submit");
    assert!(!record.is_high_risk);
    assert_eq!(record.confidence, 0.91);
}

#[test]
fn unavailable_oracle_leaves_session_untouched() {
    let workflow = PredictionWorkflow::unavailable("model artifact not found");
    let mut session = logged_in();
    let before = session.clone();

    let err = workflow.submit(&mut session, &form()).expect_err("unavailable");
    assert!(matches!(err, SessionError::OracleUnavailable));
    assert_eq!(session, before);
    assert_eq!(
        workflow.status().message.as_deref(),
        Some("model artifact not found")
    );
    assert!(!workflow.status().available);
}

#[test]
fn failing_oracle_leaves_history_untouched() {
    let ok = PredictionWorkflow::new(FixedOracle::new(1, 0.6));
    let failing = PredictionWorkflow::new(Arc::new(FailingOracle));
    let mut session = logged_in();
    ok.submit(&mut session, &form()).expect("first");
    let before = session.clone();

    let err = failing.submit(&mut session, &form()).expect_err("fails");
    assert!(matches!(err, SessionError::Oracle(_)));
    assert_eq!(session, before);
}

#[test]
fn malformed_oracle_output_is_rejected() {
    let mut session = logged_in();
    for (class, confidence) in [(2, 0.5), (1, 1.5), (0, f64::NAN)] {
        let workflow = PredictionWorkflow::new(FixedOracle::new(class, confidence));
        assert!(workflow.submit(&mut session, &form()).is_err());
    }
    assert!(session.history().is_empty());
    assert!(session.last_result().is_none());
}

#[test]
fn invalid_form_never_reaches_oracle() {
    let oracle = FixedOracle::new(1, 0.9);
    let workflow = PredictionWorkflow::new(oracle.clone());
    let mut session = logged_in();
    let mut bad = form();
    bad.age = 0;

    let err = workflow.submit(&mut session, &bad).expect_err("invalid");
    assert!(matches!(err, SessionError::Validation { .. }));
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    assert!(session.history().is_empty());
}

#[test]
fn submit_at_stamps_given_time() {
    let workflow = PredictionWorkflow::new(FixedOracle::new(0, 0.7));
    let mut session = logged_in();
    let now = DateTime::parse_from_rfc3339("2026-10-16T09:30:00Z")
        .expect("time")
        .with_timezone(&Utc);
    let record = workflow.submit_at(&mut session, &form(), now).expect("submit");
    assert_eq!(record.timestamp, now);
}

#[test]
fn load_failure_produces_unavailable_workflow() {
    let workflow = PredictionWorkflow::from_load_result(Err(OracleError::InvalidArtifact(
        "bad".into(),
    )));
    assert!(!workflow.is_available());
    assert!(workflow
        .status()
        .message
        .expect("message")
        .contains("invalid model artifact"));
}

#[test]
fn guest_submission_is_rejected_before_the_oracle() {
    let oracle = FixedOracle::new(1, 0.82);
    let workflow = PredictionWorkflow::new(oracle.clone());
    let mut session = Session::new();
    let before = session.clone();

    let err = workflow.submit(&mut session, &form()).expect_err("guest");
    assert!(matches!(err, SessionError::NotAuthenticated));
    assert_eq!(err.code(), shared::error::ErrorCode::Unauthorized);
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    assert_eq!(session, before);

    session.log_in("Amna", "a@b.com", "pw").expect("login");
    assert!(session.history().is_empty());
}
