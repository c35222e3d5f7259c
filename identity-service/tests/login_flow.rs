mod support;

use chrono::{Duration, Utc};
use uuid::Uuid;

use common_auth::{AuthError, ClaimSet, PrincipalKind, UserRole};
use identity_service::NewPublisher;
use support::{new_user, stack};

#[tokio::test]
async fn register_then_login_returns_matching_claims() {
    let stack = stack();

    let registered = stack
        .users
        .register(new_user("reader1", "pw123456", UserRole::Reader))
        .await
        .unwrap();
    let logged_in = stack.users.login("reader1", "pw123456").await.unwrap();

    assert_eq!(registered, logged_in);
    assert_eq!(logged_in.kind(), PrincipalKind::Reader);
    let ClaimSet::User(claims) = logged_in else {
        panic!("expected user claims");
    };
    assert_eq!(claims.role, UserRole::Reader);
}

#[tokio::test]
async fn role_specific_login_rejects_the_other_role() {
    let stack = stack();
    stack
        .users
        .register(new_user("reader1", "pw123456", UserRole::Reader))
        .await
        .unwrap();

    let err = stack
        .users
        .login_as("reader1", "pw123456", UserRole::Writer)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::RoleMismatch));

    assert!(stack
        .users
        .login_as("reader1", "pw123456", UserRole::Reader)
        .await
        .is_ok());
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let stack = stack();
    stack
        .users
        .register(new_user("reader1", "pw123456", UserRole::Reader))
        .await
        .unwrap();

    let err = stack
        .users
        .register(new_user("reader1", "other-password", UserRole::Writer))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateIdentity));
}

#[tokio::test]
async fn unknown_identity_and_bad_password_are_indistinguishable() {
    let stack = stack();
    stack
        .users
        .register(new_user("reader1", "pw123456", UserRole::Reader))
        .await
        .unwrap();

    let unknown = stack.users.login("ghost", "pw123456").await.unwrap_err();
    let bad_password = stack.users.login("reader1", "wrong").await.unwrap_err();

    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert!(matches!(bad_password, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn reader_can_be_promoted_to_writer_once() {
    let stack = stack();
    let claims = stack
        .users
        .register(new_user("author", "pw123456", UserRole::Reader))
        .await
        .unwrap();
    let ClaimSet::User(claims) = claims else {
        panic!("expected user claims");
    };

    let promoted = stack.users.promote_to_writer(claims.user_id).await.unwrap();
    assert_eq!(promoted.kind(), PrincipalKind::Writer);

    // The stored role changed, so the promotion cannot repeat.
    let err = stack
        .users
        .promote_to_writer(claims.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::RoleMismatch));

    let relogin = stack.users.login("author", "pw123456").await.unwrap();
    assert_eq!(relogin.kind(), PrincipalKind::Writer);
}

#[tokio::test]
async fn promoting_an_unknown_user_fails() {
    let stack = stack();
    let err = stack
        .users
        .promote_to_writer(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn otp_gates_email_verified_registration() {
    let stack = stack();
    stack.users.send_otp("reader@example.com").await.unwrap();
    let code = stack.store.stored_otp("reader@example.com").unwrap().code;

    let mut input = new_user("verified", "pw123456", UserRole::Reader);
    input.email = Some("reader@example.com".to_string());
    input.otp = Some(code);

    let claims = stack.users.register(input).await.unwrap();
    assert_eq!(claims.kind(), PrincipalKind::Reader);
}

#[tokio::test]
async fn email_registration_without_a_code_is_rejected() {
    let stack = stack();

    let mut input = new_user("verified", "pw123456", UserRole::Reader);
    input.email = Some("reader@example.com".to_string());

    let err = stack.users.register(input).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidOtp));
}

#[tokio::test]
async fn otp_is_single_use() {
    let stack = stack();
    stack.users.send_otp("reader@example.com").await.unwrap();
    let code = stack.store.stored_otp("reader@example.com").unwrap().code;

    stack
        .users
        .verify_otp("reader@example.com", &code)
        .await
        .unwrap();

    let err = stack
        .users
        .verify_otp("reader@example.com", &code)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOtp));
}

#[tokio::test]
async fn wrong_otp_leaves_the_stored_code_usable() {
    let stack = stack();
    stack.users.send_otp("reader@example.com").await.unwrap();
    let code = stack.store.stored_otp("reader@example.com").unwrap().code;
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let err = stack
        .users
        .verify_otp("reader@example.com", wrong)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOtp));

    stack
        .users
        .verify_otp("reader@example.com", &code)
        .await
        .unwrap();
}

#[tokio::test]
async fn expired_otp_is_rejected_and_consumed() {
    let stack = stack();
    stack.users.send_otp("reader@example.com").await.unwrap();
    let code = stack.store.stored_otp("reader@example.com").unwrap().code;

    stack
        .store
        .set_otp_expiry("reader@example.com", Utc::now() - Duration::seconds(1));

    let err = stack
        .users
        .verify_otp("reader@example.com", &code)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOtp));
    assert!(stack.store.stored_otp("reader@example.com").is_none());
}

#[tokio::test]
async fn publisher_registers_and_logs_in_by_email() {
    let stack = stack();

    let registered = stack
        .publishers
        .register(NewPublisher {
            name: "Inkhouse Press".to_string(),
            email: "a@b.com".to_string(),
            password: "pw123456".to_string(),
        })
        .await
        .unwrap();

    let logged_in = stack.publishers.login("a@b.com", "pw123456").await.unwrap();
    assert_eq!(registered, logged_in);
    assert_eq!(logged_in.kind(), PrincipalKind::Publisher);

    let ClaimSet::Publisher(claims) = logged_in else {
        panic!("expected publisher claims");
    };
    assert_eq!(claims.name, "Inkhouse Press");
    assert_eq!(claims.email, "a@b.com");
}

#[tokio::test]
async fn publisher_email_is_unique() {
    let stack = stack();
    stack
        .publishers
        .register(NewPublisher {
            name: "Inkhouse Press".to_string(),
            email: "a@b.com".to_string(),
            password: "pw123456".to_string(),
        })
        .await
        .unwrap();

    let err = stack
        .publishers
        .register(NewPublisher {
            name: "Another House".to_string(),
            email: "a@b.com".to_string(),
            password: "pw654321".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateIdentity));
}
