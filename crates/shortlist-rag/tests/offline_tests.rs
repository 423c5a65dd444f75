use shortlist_core::config::Settings;
use shortlist_rag::{PipelineState, Session};

#[test]
fn offline_session_runs_end_to_end() {
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");
    std::env::set_var("APP_USE_FAKE_LLM", "1");

    let mut session = Session::from_settings(Settings::default()).expect("session");
    let data = "name,skills,experience,location,email\n\
                Alice,Python,3y,NY,a@example.com\n\
                Bob,Rust,5y,Berlin,b@example.com\n";
    let report = session.build_from_reader(data.as_bytes()).expect("build");
    assert_eq!(report.rows, 2);
    assert_eq!(report.dim, 1024);

    let outcome = session.run("Who knows Python?").expect("run");
    assert_eq!(outcome.state(), PipelineState::EmailDrafted);
    assert_eq!(outcome.result.retrieved[0].chunk.source(), "portfolio_0");
    let email = outcome.email.expect("email");
    assert_eq!(email.email_body, format!("Details: {}", outcome.result.answer));
}
