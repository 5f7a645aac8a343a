//! Tests for the SQLite message log.

use super::*;
use parley_common::StorageError;

fn store() -> MessageStore {
    MessageStore::in_memory().unwrap()
}

fn contents(window: &[StoredMessage]) -> Vec<&str> {
    window.iter().map(|m| m.content.as_str()).collect()
}

#[test]
fn window_is_last_k_in_ascending_order() {
    for total in 0..12usize {
        let store = store();
        for i in 0..total {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            store.append(role, &format!("m{i}")).unwrap();
        }

        for k in 0..15usize {
            let window = store.recent_window(k).unwrap();
            let expected_len = k.min(total);
            assert_eq!(window.len(), expected_len, "total={total} k={k}");

            let expected: Vec<String> = (total - expected_len..total).map(|i| format!("m{i}")).collect();
            assert_eq!(contents(&window), expected, "total={total} k={k}");
            assert!(
                window.windows(2).all(|pair| pair[0].id < pair[1].id),
                "ids must be strictly ascending"
            );
        }
    }
}

#[test]
fn scenario_recent_window_of_weather_exchange() {
    let store = store();
    store.append(Role::User, "Qual o clima em SP?").unwrap();
    store.append(Role::Assistant, "Chuva 20°C").unwrap();

    let last = store.recent_window(1).unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].role, Role::Assistant);
    assert_eq!(last[0].content, "Chuva 20°C");

    let both = store.recent_window(5).unwrap();
    assert_eq!(both.len(), 2);
    assert_eq!(both[0].role, Role::User);
    assert_eq!(both[0].content, "Qual o clima em SP?");
    assert_eq!(both[1].role, Role::Assistant);
}

#[test]
fn unicode_round_trips() {
    let store = store();
    let text = "Ação, café, São Paulo — 20°C ☔ 你好 🧠 €";
    store.append(Role::User, text).unwrap();
    let window = store.recent_window(1).unwrap();
    assert_eq!(window[0].content, text);
}

#[test]
fn ids_increase_and_timestamps_are_assigned() {
    let store = store();
    let first = store.append(Role::User, "a").unwrap();
    let second = store.append(Role::Assistant, "b").unwrap();
    assert!(second > first);

    let window = store.recent_window(2).unwrap();
    assert_eq!(window[0].id, first);
    assert!(window[1].timestamp >= window[0].timestamp);
    let age = chrono::Utc::now() - window[0].timestamp;
    assert!(age.num_minutes().abs() < 5, "timestamp should be close to now");
}

#[test]
fn clear_empties_and_is_idempotent() {
    let store = store();
    store.clear().unwrap();
    store.append(Role::User, "hello").unwrap();
    store.append(Role::Assistant, "hi").unwrap();

    store.clear().unwrap();
    assert!(store.recent_window(10).unwrap().is_empty());
    assert_eq!(store.count().unwrap(), 0);
    assert!(store.last().unwrap().is_none());

    store.clear().unwrap();
    assert!(store.recent_window(3).unwrap().is_empty());
}

#[test]
fn ids_keep_increasing_after_clear() {
    let store = store();
    let before = store.append(Role::User, "old").unwrap();
    store.clear().unwrap();
    let after = store.append(Role::User, "new").unwrap();
    assert!(after > before);
}

#[test]
fn last_returns_newest() {
    let store = store();
    store.append(Role::User, "q").unwrap();
    store.append(Role::Assistant, "a").unwrap();
    let last = store.last().unwrap().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, "a");
}

#[test]
fn survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("chat_history.db");

    {
        let store = MessageStore::open(&path).unwrap();
        store.append(Role::User, "antes do restart").unwrap();
        store.append(Role::Assistant, "ok").unwrap();
    }

    let reopened = MessageStore::open(&path).unwrap();
    let window = reopened.recent_window(10).unwrap();
    assert_eq!(contents(&window), vec!["antes do restart", "ok"]);
    assert_eq!(reopened.location(), path.display().to_string());
}

#[test]
fn failed_append_writes_nothing() {
    let store = store();
    store.append(Role::User, "kept").unwrap();
    store.with_raw_connection(|conn| conn.execute_batch("PRAGMA query_only = ON").unwrap());

    let err = store.append(Role::Assistant, "lost").unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)), "got {err:?}");

    store.with_raw_connection(|conn| conn.execute_batch("PRAGMA query_only = OFF").unwrap());
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn unknown_role_is_reported_as_corrupt() {
    let store = store();
    store.with_raw_connection(|conn| {
        conn.execute(
            "INSERT INTO messages (role, content) VALUES ('system', 'x')",
            [],
        )
        .unwrap()
    });

    let err = store.recent_window(1).unwrap_err();
    assert!(matches!(err, StorageError::Corrupt(ref msg) if msg.contains("system")));
}

#[test]
fn garbage_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_a_db.db");
    std::fs::write(&path, "this is not a sqlite database\n".repeat(64)).unwrap();

    let err = MessageStore::open(&path).err().unwrap();
    assert!(matches!(err, StorageError::Corrupt(_)), "got {err:?}");
}

#[test]
fn unreachable_location_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();

    let err = MessageStore::open(blocker.join("sub").join("chat.db"))
        .err()
        .unwrap();
    assert!(matches!(err, StorageError::Unavailable(_)), "got {err:?}");
}
