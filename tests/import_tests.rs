use kindred::access::{self, SqliteLookups};
use kindred::db::*;
use kindred::migrate;
use kindred::model::*;
use kindred::queries::*;

const ALICE: &str = "00000000-0000-4000-8000-000000000001";
const BOB: &str = "00000000-0000-4000-8000-000000000002";
const CAROL: &str = "00000000-0000-4000-8000-000000000003";
const FAMILY: &str = "00000000-0000-4000-8000-0000000000f1";

fn dump() -> String {
    format!(
        r#"{{
  "users": {{
    "{ALICE}": {{
      "displayName": "Alice",
      "email": "alice@example.com",
      "bio": "  Gardener ",
      "birthday": "1990-05-15T00:00:00.000Z",
      "familyId": "{FAMILY}",
      "createdAt": "2024-01-01T10:00:00Z",
      "privacySettings": {{ "posts": "public", "allowMessagesFromStrangers": false }}
    }},
    "{BOB}": {{
      "name": "Bob",
      "email": "bob@example.com",
      "familyId": "{FAMILY}"
    }},
    "{CAROL}": {{
      "email": "carol@example.com",
      "familyId": "00000000-0000-4000-8000-0000000000ff"
    }}
  }},
  "families": {{
    "{FAMILY}": {{ "name": "The Rivers", "createdBy": "{ALICE}" }}
  }},
  "relationships": {{
    "00000000-0000-4000-8000-0000000000a1": {{
      "fromUserId": "{ALICE}",
      "toUserId": "{CAROL}",
      "relationshipType": "Mentor",
      "status": "accepted",
      "createdAt": "2024-02-01T10:00:00Z"
    }}
  }},
  "posts": {{
    "00000000-0000-4000-8000-0000000000b1": {{
      "userId": "{ALICE}",
      "content": "Hello",
      "createdAt": "2024-03-01T10:00:00Z"
    }}
  }}
}}"#
    )
}

#[test]
fn import_documents_loads_every_collection() {
    let conn = schema::test_connection();
    let stats = migrate::import_documents(&conn, &dump()).unwrap();

    assert_eq!(stats.identities, 3);
    assert_eq!(stats.policies, 1);
    assert_eq!(stats.families, 1);
    assert_eq!(stats.relationships, 1);
    assert_eq!(stats.posts, 1);
}

#[test]
fn import_defaults_and_trims_user_fields() {
    let conn = schema::test_connection();
    migrate::import_documents(&conn, &dump()).unwrap();

    let alice = identity_queries::get_identity(&conn, Id::parse(ALICE).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(alice.bio.as_deref(), Some("Gardener"));
    assert_eq!(alice.birthday.map(|d| d.to_string()).as_deref(), Some("1990-05-15"));
    assert_eq!(alice.relationship_labels, vec!["Mentor"]);

    // Missing display name falls back to the email's local part.
    let carol = identity_queries::find_by_email(&conn, "carol@example.com").unwrap().unwrap();
    assert_eq!(carol.name, "carol");
    // Unknown family is dropped rather than failing the import.
    assert_eq!(carol.family_id, None);
}

#[test]
fn imported_policy_fills_missing_levels_from_baseline() {
    let conn = schema::test_connection();
    migrate::import_documents(&conn, &dump()).unwrap();

    let alice_id = Id::parse(ALICE).unwrap();
    let policy = privacy_repo::find_by_owner(&conn, alice_id).unwrap().unwrap();
    assert_eq!(policy.posts, PrivacyLevel::Public);
    assert_eq!(policy.family, PrivacyLevel::Family);
    assert_eq!(policy.allow_messages_from_strangers, Some(false));
}

#[test]
fn imported_data_drives_access_decisions() {
    let conn = schema::test_connection();
    migrate::import_documents(&conn, &dump()).unwrap();
    let lookups = SqliteLookups::new(&conn);
    let alice = Id::parse(ALICE).unwrap();
    let bob = Id::parse(BOB).unwrap();
    let carol = Id::parse(CAROL).unwrap();

    let bob_view = access::evaluate(&lookups, Some(bob), alice).unwrap();
    assert!(bob_view.family_linked);
    assert!(bob_view.can_view_posts);
    assert!(!bob_view.can_message);

    let carol_view = access::evaluate(&lookups, Some(carol), alice).unwrap();
    assert!(carol_view.relationship.is_some());
    assert!(carol_view.can_message);
}

#[test]
fn bad_id_rolls_back_whole_import() {
    let conn = schema::test_connection();
    let json = r#"{
      "users": { "not-a-uuid": { "displayName": "X", "email": "x@example.com" } }
    }"#;

    assert!(migrate::import_documents(&conn, json).is_err());
    assert!(identity_queries::all_identities(&conn).unwrap().is_empty());
}

#[test]
fn import_json_writes_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("dump.json");
    let db_path = dir.path().join("kindred.db");
    std::fs::write(&json_path, dump()).unwrap();

    let stats = migrate::import_json(&json_path, &db_path).unwrap();
    assert_eq!(stats.identities, 3);

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let family = family_repo::find_by_id(&conn, Id::parse(FAMILY).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(family.name, "The Rivers");
    assert_eq!(family_queries::members(&conn, family.id).unwrap().len(), 2);
}

fn dump_with_settings(settings: &str) -> String {
    dump().replacen('{', &format!("{{\n  \"privacySettings\": {},", settings), 1)
}

#[test]
fn top_level_privacy_settings_are_imported() {
    let conn = schema::test_connection();
    let json = dump_with_settings(&format!(
        r#"{{ "{BOB}": {{ "bio": "private", "profile": "private" }} }}"#
    ));
    let stats = migrate::import_documents(&conn, &json).unwrap();
    assert_eq!(stats.policies, 2);

    let bob = Id::parse(BOB).unwrap();
    let alice = Id::parse(ALICE).unwrap();
    let policy = privacy_repo::find_by_owner(&conn, bob).unwrap().unwrap();
    assert_eq!(policy.bio, PrivacyLevel::Private);
    assert_eq!(policy.posts, PrivacyLevel::Relationships);

    let ctx = access::evaluate(&SqliteLookups::new(&conn), Some(alice), bob).unwrap();
    assert!(!ctx.can_view_bio);
    assert!(!ctx.can_view_profile);
}

#[test]
fn top_level_settings_win_over_nested_ones() {
    let conn = schema::test_connection();
    let json = dump_with_settings(&format!(
        r#"{{ "{ALICE}": {{ "posts": "family", "bio": "relationships" }} }}"#
    ));
    let stats = migrate::import_documents(&conn, &json).unwrap();
    assert_eq!(stats.policies, 1);

    let policy = privacy_repo::find_by_owner(&conn, Id::parse(ALICE).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(policy.posts, PrivacyLevel::Family);
    assert_eq!(policy.bio, PrivacyLevel::Relationships);
    // Only set in the nested copy.
    assert_eq!(policy.allow_messages_from_strangers, Some(false));
}

#[test]
fn settings_for_unknown_user_are_skipped() {
    let conn = schema::test_connection();
    let json = dump_with_settings(
        r#"{ "00000000-0000-4000-8000-0000000000ee": { "bio": "private" } }"#,
    );
    let stats = migrate::import_documents(&conn, &json).unwrap();
    assert_eq!(stats.policies, 1);
}
