//! Parsing tests against backend-shaped JSON payloads.

use pretty_assertions::assert_eq;
use iv_core::entities::*;
use iv_core::enums::{InterviewStatus, TokenStatus, UserRole};

const INTERVIEWS: &str = r#"[
    {
        "id": 1,
        "title": "Backend Engineer",
        "description": "Screening for the platform team",
        "status": "active",
        "duration": 25,
        "questionCount": 4,
        "tokenCount": 10,
        "responseCount": 3,
        "createdAt": "2026-01-10T08:30:00Z"
    },
    {
        "id": "int-2",
        "title": "Support Lead"
    }
]"#;

const SESSION: &str = r#"{
    "sessionId": 77,
    "interview": {"id": 1, "title": "Backend Engineer", "status": "active"},
    "questions": [
        {"id": 12, "text": "Describe a hard bug.", "preparationTime": 30, "recordingTime": 120, "order": 2, "interviewId": 1},
        {"id": 11, "text": "Why this role?", "preparationTime": 20, "recordingTime": 60, "order": 1, "interviewId": 1}
    ]
}"#;

#[test]
fn interview_list_tolerates_sparse_entries() {
    let interviews: Vec<Interview> = serde_json::from_str(INTERVIEWS).unwrap();
    assert_eq!(interviews.len(), 2);
    assert_eq!(interviews[0].id, "1");
    assert_eq!(interviews[0].status, InterviewStatus::Active);
    assert_eq!(interviews[0].response_count, 3);

    let sparse = &interviews[1];
    assert_eq!(sparse.id, "int-2");
    assert_eq!(sparse.status, InterviewStatus::Draft);
    assert_eq!(sparse.question_count, 0);
    assert!(sparse.created_at.is_none());
}

#[test]
fn candidate_session_keeps_array_order() {
    let session: CandidateSession = serde_json::from_str(SESSION).unwrap();
    assert_eq!(session.session_id, "77");
    let ids: Vec<&str> = session.questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["12", "11"]);
    assert_eq!(session.questions[0].order, 2);
    assert!(session.questions.iter().all(|q| !q.is_practice));
}

#[test]
fn login_response_accepts_access_token_alias() {
    let login: LoginResponse =
        serde_json::from_str(r#"{"accessToken": "jwt", "role": "admin"}"#).unwrap();
    assert_eq!(login.token, "jwt");
    assert_eq!(login.role, Some(UserRole::Admin));
}

#[test]
fn token_table_statuses() {
    let tokens: Vec<AccessToken> = serde_json::from_str(
        r#"[
            {"id": 1, "value": "a", "expiresAt": "2000-01-01T00:00:00Z"},
            {"id": 2, "value": "b", "used": true},
            {"id": 3, "value": "c", "expiresAt": "2999-01-01T00:00:00Z"}
        ]"#,
    )
    .unwrap();
    let statuses: Vec<TokenStatus> = tokens.iter().map(AccessToken::status).collect();
    assert_eq!(
        statuses,
        vec![TokenStatus::Expired, TokenStatus::Used, TokenStatus::Active]
    );
}

#[test]
fn interview_draft_requires_title() {
    let draft = InterviewDraft {
        description: Some("no title".into()),
        ..Default::default()
    };
    assert!(draft.validate_for_create().is_err());
    assert!(!draft.is_empty());
    assert!(InterviewDraft::default().is_empty());
}
