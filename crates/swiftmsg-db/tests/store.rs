use std::path::Path;

use swiftmsg_db::Database;

#[test]
fn messages_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.db");

    {
        let db = Database::open(&path).unwrap();
        db.add("welcome", "en", "Welcome").unwrap();
        db.add("welcome", "it", "Benvenuto").unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.get("italiano", "welcome").unwrap(), "Benvenuto");
    assert_eq!(db.get("pt", "welcome").unwrap(), "Welcome");
    assert_eq!(db.list_all().unwrap().len(), 2);
}

#[test]
fn open_fails_for_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("messages.db");

    assert!(Database::open(&path).is_err());
}

#[test]
fn empty_path_is_in_memory() {
    let db = Database::open(Path::new("")).unwrap();
    db.add("k", "en", "v").unwrap();
    assert_eq!(db.get("en", "k").unwrap(), "v");
}

#[test]
fn separate_handles_see_each_others_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");

    let writer = Database::open(&path).unwrap();
    let reader = Database::open(&path).unwrap();

    writer.add("note", "ko", "메모").unwrap();
    assert_eq!(reader.get("korean", "note").unwrap(), "메모");

    assert_eq!(reader.delete_by_id("note").unwrap(), 1);
    assert!(writer.get("ko", "note").unwrap_err().is_not_found());
}
