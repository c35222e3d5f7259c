#![allow(dead_code)]

use std::sync::Arc;

use chrono::Duration;

use common_auth::{TokenCodec, TokenConfig, UserRole};
use identity_service::{
    AdminResolver, MemoryStore, NewUser, PublisherResolver, UnifiedDispatcher, UserResolver,
};

pub const ADMIN_CODE: &str = "ADMIN2024";

pub struct TestStack {
    pub store: Arc<MemoryStore>,
    pub codec: TokenCodec,
    pub users: Arc<UserResolver>,
    pub publishers: Arc<PublisherResolver>,
    pub admins: AdminResolver,
    pub unified: UnifiedDispatcher,
}

pub fn stack() -> TestStack {
    let store = Arc::new(MemoryStore::new());
    let codec = TokenCodec::new(&TokenConfig::new("integration-test-secret"));

    let users = Arc::new(UserResolver::new(
        store.clone(),
        store.clone(),
        Duration::minutes(5),
    ));
    let publishers = Arc::new(PublisherResolver::new(store.clone()));
    let admins = AdminResolver::new(store.clone(), ADMIN_CODE);
    let unified = UnifiedDispatcher::new(users.clone(), publishers.clone(), codec.clone());

    TestStack {
        store,
        codec,
        users,
        publishers,
        admins,
        unified,
    }
}

pub fn new_user(username: &str, password: &str, role: UserRole) -> NewUser {
    NewUser {
        username: username.to_string(),
        full_name: format!("{username} Example"),
        password: password.to_string(),
        role,
        email: None,
        otp: None,
    }
}
