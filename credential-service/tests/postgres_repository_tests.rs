mod common;

use std::sync::Arc;

use chrono::SubsecRound;
use chrono::Utc;
use common::postgres_auth_service;
use common::TestDb;
use credential_service::domain::principal::errors::AuthError;
use credential_service::domain::principal::models::EmailAddress;
use credential_service::domain::principal::models::Password;
use credential_service::domain::principal::models::PersonName;
use credential_service::domain::principal::models::Principal;
use credential_service::domain::principal::models::PrincipalId;
use credential_service::domain::principal::models::RegisterCommand;
use credential_service::domain::principal::models::Role;
use credential_service::domain::principal::ports::AuthServicePort;
use credential_service::domain::principal::ports::PrincipalRepository;
use credential_service::outbound::repositories::PostgresPrincipalRepository;

fn principal(email: &str, role: Role) -> Principal {
    Principal {
        id: PrincipalId::new(),
        first_name: PersonName::new("Ana".to_string()).unwrap(),
        last_name: PersonName::new("Pop".to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
        role,
        // TIMESTAMPTZ keeps microseconds
        created_at: Utc::now().trunc_subsecs(6),
    }
}

#[tokio::test]
async fn test_insert_then_find_by_email_and_id() {
    let db = TestDb::new().await;
    let repository = PostgresPrincipalRepository::new(db.pool.clone());

    for (email, role) in [
        ("voter@mail.com", Role::Voter),
        ("candidate@mail.com", Role::Candidate),
        ("admin@mail.com", Role::Administrator),
    ] {
        let stored = repository
            .insert(principal(email, role))
            .await
            .expect("Insert failed");

        let by_email = repository
            .find_by_email(&EmailAddress::new(email.to_uppercase()).unwrap())
            .await
            .unwrap()
            .expect("Principal missing by email");
        let by_id = repository
            .find_by_id(&stored.id)
            .await
            .unwrap()
            .expect("Principal missing by id");

        assert_eq!(by_email, stored);
        assert_eq!(by_id, stored);
    }

    assert_eq!(db.principal_count().await, 3);
}

#[tokio::test]
async fn test_find_unknown_returns_none() {
    let db = TestDb::new().await;
    let repository = PostgresPrincipalRepository::new(db.pool.clone());

    let email = EmailAddress::new("nobody@mail.com".to_string()).unwrap();
    assert!(repository.find_by_email(&email).await.unwrap().is_none());
    assert!(repository
        .find_by_id(&PrincipalId::new())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_insert_is_duplicate_email() {
    let db = TestDb::new().await;
    let repository = PostgresPrincipalRepository::new(db.pool.clone());

    repository
        .insert(principal("ana.pop@mail.com", Role::Voter))
        .await
        .expect("First insert failed");

    let result = repository
        .insert(principal("ANA.POP@mail.com", Role::Candidate))
        .await;

    assert!(matches!(
        result,
        Err(AuthError::DuplicateEmail(email)) if email == "ana.pop@mail.com"
    ));
    assert_eq!(db.principal_count().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_inserts_single_winner() {
    let db = TestDb::new().await;
    let repository = Arc::new(PostgresPrincipalRepository::new(db.pool.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let repository = Arc::clone(&repository);
            tokio::spawn(async move {
                repository
                    .insert(principal("race@mail.com", Role::Voter))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AuthError::DuplicateEmail(_)) => duplicates += 1,
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(duplicates, 3);
    assert_eq!(db.principal_count().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_registration_single_winner() {
    let db = TestDb::new().await;
    let service = postgres_auth_service(&db);

    let register = |email: &'static str, role: Role| {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .register(RegisterCommand::new(
                    PersonName::new("Ana".to_string()).unwrap(),
                    PersonName::new("Pop".to_string()).unwrap(),
                    EmailAddress::new(email.to_string()).unwrap(),
                    Password::new("secret123".to_string()).unwrap(),
                    role,
                ))
                .await
        })
    };

    let first = register("race@mail.com", Role::Voter);
    let second = register("  RACE@mail.com", Role::Candidate);
    let (first, second) = tokio::join!(first, second);
    let outcomes = [first.unwrap(), second.unwrap()];

    let winner = outcomes
        .iter()
        .find_map(|outcome| outcome.as_ref().ok())
        .expect("No registration succeeded");
    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Err(AuthError::DuplicateEmail(_))))
            .count(),
        1
    );
    assert_eq!(db.principal_count().await, 1);

    let stored = service.current_principal(&winner.id).await.unwrap();
    assert_eq!(stored.email.as_str(), "race@mail.com");
    assert!(stored.password_hash.starts_with("$argon2id$"));
}
