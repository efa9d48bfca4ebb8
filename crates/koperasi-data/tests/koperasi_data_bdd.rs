//! Behavioural tests for the koperasi-data crate.
//!
//! These tests validate the seed dataset and the stored list format against
//! Gherkin scenarios.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use koperasi_data::{
    CodecError, Rupiah, User, UserDirectory, decode_users, encode_users, seed_users,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

// ============================================================================
// Test fixtures and constants
// ============================================================================

const BALANCELESS_USERS_JSON: &str = r#"[
    {"id": 1, "username": "admin", "password": "admin123", "role": "admin",
     "name": "Administrator", "email": "admin@koperasi.com"},
    {"id": 5, "username": "dewi", "password": "member123", "role": "member",
     "name": "Dewi", "email": "dewi@email.com"}
]"#;

/// Test world holding the collection under test and decode results.
#[derive(Default, ScenarioState)]
struct World {
    users: Slot<Vec<User>>,
    stored_json: Slot<String>,
    decode_result: Slot<Result<Vec<User>, CodecError>>,
}

impl World {
    fn users(&self) -> Vec<User> {
        self.users.get().expect("users should be set")
    }

    fn decoded(&self) -> Result<Vec<User>, CodecError> {
        self.decode_result
            .get()
            .expect("decode result should be set")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("the seed user collection")]
fn the_seed_user_collection(world: &World) {
    world.users.set(seed_users());
}

#[given("a stored user payload without balances")]
fn a_stored_user_payload_without_balances(world: &World) {
    world.stored_json.set(BALANCELESS_USERS_JSON.to_owned());
}

#[given("a corrupt stored user payload")]
fn a_corrupt_stored_user_payload(world: &World) {
    world.stored_json.set("[{\"id\": \"one\"".to_owned());
}

// ============================================================================
// When steps
// ============================================================================

#[when("the users are encoded and decoded")]
fn the_users_are_encoded_and_decoded(world: &World) {
    let json = encode_users(&world.users()).expect("encode");
    world.decode_result.set(decode_users(&json));
}

#[when("the stored users are decoded")]
fn the_stored_users_are_decoded(world: &World) {
    let json = world.stored_json.get().expect("stored JSON should be set");
    world.decode_result.set(decode_users(&json));
}

#[when("user {id:u64} receives savings of {amount:u64}")]
fn user_receives_savings(world: &World, id: u64, amount: u64) {
    let mut directory = UserDirectory::from_records(world.users());
    let mut user = directory.get(id).cloned().expect("user exists");
    user.savings = Rupiah::new(amount);
    assert!(directory.replace(user), "user {id} should be replaced");
    world.users.set(directory.into_records());
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the decoded users match the seed collection")]
fn the_decoded_users_match_the_seed_collection(world: &World) {
    let decoded = world.decoded().expect("decoding succeeds");
    assert_eq!(decoded, seed_users());
}

#[then("every decoded balance is zero")]
fn every_decoded_balance_is_zero(world: &World) {
    let decoded = world.decoded().expect("decoding succeeds");
    assert!(!decoded.is_empty());
    for user in decoded {
        assert_eq!(user.savings, Rupiah::ZERO, "savings of {}", user.username);
        assert_eq!(user.loans, Rupiah::ZERO, "loans of {}", user.username);
    }
}

#[then("decoding fails with a malformed payload error")]
fn decoding_fails_with_a_malformed_payload_error(world: &World) {
    match world.decoded() {
        Err(CodecError::Malformed { .. }) => {}
        other => panic!("Expected Malformed, got: {other:?}"),
    }
}

#[then("the users are listed in order 1, 2, 3, 4")]
fn the_users_are_listed_in_order(world: &World) {
    let ids: Vec<u64> = world.users().iter().map(|user| user.id).collect();
    assert_eq!(ids, [1, 2, 3, 4]);
}

#[then("user {id:u64} has savings of {amount:u64}")]
fn user_has_savings(world: &World, id: u64, amount: u64) {
    let users = world.users();
    let user = users
        .iter()
        .find(|user| user.id == id)
        .expect("user exists");
    assert_eq!(user.savings, Rupiah::new(amount));
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/koperasi_data.feature",
    name = "Seed users survive the stored format"
)]
fn seed_users_survive_the_stored_format(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/koperasi_data.feature",
    name = "Stored users without balances read as zero"
)]
fn stored_users_without_balances_read_as_zero(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/koperasi_data.feature",
    name = "Corrupt stored users are rejected"
)]
fn corrupt_stored_users_are_rejected(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/koperasi_data.feature",
    name = "Replacing a user keeps the list order"
)]
fn replacing_a_user_keeps_the_list_order(world: World) {
    let _ = world;
}
