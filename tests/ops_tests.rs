use kindred::db::*;
use kindred::error::KindredError;
use kindred::model::*;
use kindred::ops::*;
use kindred::queries::*;

fn setup() -> (rusqlite::Connection, Identity, Identity) {
    let conn = schema::test_connection();
    let alice = identity_ops::register(&conn, "Alice", "alice@example.com").unwrap();
    let bob = identity_ops::register(&conn, "Bob", "bob@example.com").unwrap();
    (conn, alice, bob)
}

fn labels_of(conn: &rusqlite::Connection, id: Id<Identity>) -> Vec<String> {
    identity_queries::get_identity(conn, id)
        .unwrap()
        .unwrap()
        .relationship_labels
}

// ==========================================================================
// IDENTITY OPS TESTS
// ==========================================================================

#[test]
fn register_trims_fields() {
    let conn = schema::test_connection();
    let carol = identity_ops::register(&conn, "  Carol ", " carol@example.com ").unwrap();
    assert_eq!(carol.name, "Carol");
    assert_eq!(carol.email, "carol@example.com");
}

#[test]
fn register_rejects_blank_name() {
    let conn = schema::test_connection();
    let result = identity_ops::register(&conn, "   ", "x@example.com");
    assert!(matches!(result, Err(KindredError::BlankField { .. })));
}

#[test]
fn register_rejects_bad_email() {
    let conn = schema::test_connection();
    let result = identity_ops::register(&conn, "Carol", "carol.example.com");
    assert!(matches!(result, Err(KindredError::InvalidField { .. })));
}

#[test]
fn register_rejects_duplicate_email() {
    let (conn, _, _) = setup();
    let result = identity_ops::register(&conn, "Other Alice", "ALICE@example.com");
    assert!(matches!(result, Err(KindredError::AlreadyExists { .. })));
}

#[test]
fn update_profile_patches_and_clears() {
    let (conn, alice, _) = setup();
    let updated = identity_ops::update_profile(
        &conn,
        alice.id,
        None,
        Some(Some("  Loves hiking ")),
        Some(Some("Lisbon")),
        Some(Some("alice.dev")),
        None,
    )
    .unwrap();
    assert_eq!(updated.bio.as_deref(), Some("Loves hiking"));
    assert_eq!(updated.website.as_deref(), Some("https://alice.dev"));

    let cleared =
        identity_ops::update_profile(&conn, alice.id, None, None, Some(None), None, None).unwrap();
    assert_eq!(cleared.location, None);
    assert_eq!(cleared.bio.as_deref(), Some("Loves hiking"));
}

#[test]
fn change_email_rejects_address_in_use() {
    let (conn, alice, _) = setup();
    let result = identity_ops::change_email(&conn, alice.id, "bob@example.com");
    assert!(matches!(result, Err(KindredError::AlreadyExists { .. })));

    let changed = identity_ops::change_email(&conn, alice.id, "alice@new.example").unwrap();
    assert_eq!(changed.email, "alice@new.example");
}

// ==========================================================================
// PRIVACY OPS TESTS
// ==========================================================================

#[test]
fn policy_created_lazily_with_baseline() {
    let (conn, alice, _) = setup();
    assert!(privacy_repo::find_by_owner(&conn, alice.id).unwrap().is_none());

    let policy = privacy_ops::policy_for(&conn, alice.id).unwrap();
    assert_eq!(policy, PrivacyPolicy::baseline(alice.id));
    assert!(privacy_repo::find_by_owner(&conn, alice.id).unwrap().is_some());
}

#[test]
fn policy_for_unknown_identity_fails() {
    let conn = schema::test_connection();
    let result = privacy_ops::policy_for(&conn, Id::generate());
    assert!(matches!(result, Err(KindredError::NotFound { .. })));
}

#[test]
fn set_level_persists() {
    let (conn, alice, _) = setup();
    privacy_ops::set_level(&conn, alice.id, PrivacyCategory::Posts, PrivacyLevel::Public).unwrap();
    privacy_ops::set_allow_messages_from_strangers(&conn, alice.id, Some(false)).unwrap();

    let policy = privacy_ops::policy_for(&conn, alice.id).unwrap();
    assert_eq!(policy.posts, PrivacyLevel::Public);
    assert_eq!(policy.allow_messages_from_strangers, Some(false));
    assert_eq!(policy.bio, PrivacyLevel::Public);
}

// ==========================================================================
// RELATIONSHIP OPS TESTS
// ==========================================================================

#[test]
fn request_and_accept_connects_both() {
    let (conn, alice, bob) = setup();
    let rel = relationship_ops::request(&conn, alice.id, bob.id, "Brother").unwrap();
    assert_eq!(rel.status, RelationshipStatus::Pending);
    assert!(relationship_repo::find_accepted_between(&conn, alice.id, bob.id).unwrap().is_none());

    let accepted = relationship_ops::accept(&conn, bob.id, rel.id).unwrap();
    assert_eq!(accepted.status, RelationshipStatus::Accepted);
    assert!(relationship_repo::find_accepted_between(&conn, bob.id, alice.id).unwrap().is_some());

    assert_eq!(labels_of(&conn, alice.id), vec!["Brother"]);
    assert_eq!(labels_of(&conn, bob.id), vec!["Brother"]);
}

#[test]
fn cannot_connect_to_self() {
    let (conn, alice, _) = setup();
    let result = relationship_ops::request(&conn, alice.id, alice.id, "Me");
    assert!(matches!(result, Err(KindredError::CannotConnectSelf)));
}

#[test]
fn request_rejects_blank_label() {
    let (conn, alice, bob) = setup();
    let result = relationship_ops::request(&conn, alice.id, bob.id, "  ");
    assert!(matches!(result, Err(KindredError::BlankField { .. })));
}

#[test]
fn duplicate_open_request_rejected_either_direction() {
    let (conn, alice, bob) = setup();
    relationship_ops::request(&conn, alice.id, bob.id, "Friend").unwrap();

    let again = relationship_ops::request(&conn, bob.id, alice.id, "Friend");
    assert!(matches!(again, Err(KindredError::AlreadyExists { .. })));
}

#[test]
fn only_recipient_answers_pending_request() {
    let (conn, alice, bob) = setup();
    let rel = relationship_ops::request(&conn, alice.id, bob.id, "Friend").unwrap();

    let result = relationship_ops::accept(&conn, alice.id, rel.id);
    assert!(matches!(result, Err(KindredError::NotPermitted { .. })));
}

#[test]
fn stranger_cannot_touch_relationship() {
    let (conn, alice, bob) = setup();
    let carol = identity_ops::register(&conn, "Carol", "carol@example.com").unwrap();
    let rel = relationship_ops::request(&conn, alice.id, bob.id, "Friend").unwrap();
    relationship_ops::accept(&conn, bob.id, rel.id).unwrap();

    let result = relationship_ops::block(&conn, carol.id, rel.id);
    assert!(matches!(result, Err(KindredError::NotPermitted { .. })));
}

#[test]
fn rejected_request_can_be_retried() {
    let (conn, alice, bob) = setup();
    let rel = relationship_ops::request(&conn, alice.id, bob.id, "Friend").unwrap();
    relationship_ops::reject(&conn, bob.id, rel.id).unwrap();

    let retry = relationship_ops::request(&conn, alice.id, bob.id, "Friend");
    assert!(retry.is_ok());
}

#[test]
fn rejected_request_cannot_be_accepted() {
    let (conn, alice, bob) = setup();
    let rel = relationship_ops::request(&conn, alice.id, bob.id, "Friend").unwrap();
    relationship_ops::reject(&conn, bob.id, rel.id).unwrap();

    let result = relationship_ops::accept(&conn, bob.id, rel.id);
    assert!(matches!(result, Err(KindredError::InvalidTransition { .. })));
}

#[test]
fn blocking_accepted_relationship_disconnects_and_clears_labels() {
    let (conn, alice, bob) = setup();
    let rel = relationship_ops::request(&conn, alice.id, bob.id, "Friend").unwrap();
    relationship_ops::accept(&conn, bob.id, rel.id).unwrap();

    // Either party may block once accepted.
    relationship_ops::block(&conn, alice.id, rel.id).unwrap();
    assert!(relationship_repo::find_accepted_between(&conn, alice.id, bob.id).unwrap().is_none());
    assert!(labels_of(&conn, alice.id).is_empty());
    assert!(labels_of(&conn, bob.id).is_empty());

    let retry = relationship_ops::request(&conn, bob.id, alice.id, "Friend");
    assert!(matches!(retry, Err(KindredError::RelationshipBlocked)));
}

#[test]
fn labels_deduplicate_ignoring_case() {
    let (conn, alice, bob) = setup();
    let carol = identity_ops::register(&conn, "Carol", "carol@example.com").unwrap();

    let r1 = relationship_ops::request(&conn, bob.id, alice.id, "Sibling").unwrap();
    relationship_ops::accept(&conn, alice.id, r1.id).unwrap();
    let r2 = relationship_ops::request(&conn, carol.id, alice.id, "sibling").unwrap();
    relationship_ops::accept(&conn, alice.id, r2.id).unwrap();

    assert_eq!(labels_of(&conn, alice.id).len(), 1);
}

#[test]
fn unknown_relationship_is_not_found() {
    let (conn, alice, _) = setup();
    let result = relationship_ops::accept(&conn, alice.id, Id::generate());
    assert!(matches!(result, Err(KindredError::NotFound { .. })));
}

// ==========================================================================
// FAMILY OPS TESTS
// ==========================================================================

#[test]
fn create_family_makes_creator_member() {
    let (conn, alice, _) = setup();
    let family = family_ops::create_family(&conn, alice.id, " The Rivers ").unwrap();
    assert_eq!(family.name, "The Rivers");

    let members = family_queries::members(&conn, family.id).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, alice.id);
}

#[test]
fn cannot_create_second_family() {
    let (conn, alice, _) = setup();
    family_ops::create_family(&conn, alice.id, "The Rivers").unwrap();
    let result = family_ops::create_family(&conn, alice.id, "The Lakes");
    assert!(matches!(result, Err(KindredError::AlreadyExists { .. })));
}

#[test]
fn join_and_leave_family() {
    let (conn, alice, bob) = setup();
    let family = family_ops::create_family(&conn, alice.id, "The Rivers").unwrap();

    let joined = family_ops::join_family(&conn, bob.id, family.id).unwrap();
    assert_eq!(joined.family_id, Some(family.id));
    // Joining again changes nothing.
    assert!(family_ops::join_family(&conn, bob.id, family.id).is_ok());

    let left = family_ops::leave_family(&conn, bob.id).unwrap();
    assert_eq!(left.family_id, None);
    assert!(family_queries::family_of(&conn, bob.id).unwrap().is_none());
}

#[test]
fn member_of_other_family_must_leave_first() {
    let (conn, alice, bob) = setup();
    let rivers = family_ops::create_family(&conn, alice.id, "The Rivers").unwrap();
    family_ops::create_family(&conn, bob.id, "The Lakes").unwrap();

    let result = family_ops::join_family(&conn, bob.id, rivers.id);
    assert!(matches!(result, Err(KindredError::AlreadyExists { .. })));
}

#[test]
fn join_unknown_family_fails() {
    let (conn, alice, _) = setup();
    let result = family_ops::join_family(&conn, alice.id, Id::generate());
    assert!(matches!(result, Err(KindredError::NotFound { .. })));
}

// ==========================================================================
// POST OPS TESTS
// ==========================================================================

#[test]
fn create_post_rejects_blank_content() {
    let (conn, alice, _) = setup();
    let result = post_ops::create_post(&conn, alice.id, "   ");
    assert!(matches!(result, Err(KindredError::BlankField { .. })));
}

#[test]
fn create_post_for_unknown_author_fails() {
    let conn = schema::test_connection();
    let result = post_ops::create_post(&conn, Id::generate(), "hello");
    assert!(result.is_err());
}
