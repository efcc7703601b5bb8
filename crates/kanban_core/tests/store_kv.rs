use kanban_core::store::migrations::latest_version;
use kanban_core::store::{open_store, open_store_in_memory};
use kanban_core::{Status, StoreTaskRepository, TaskDraft, TaskRepository};

#[test]
fn migrations_report_a_positive_latest_version() {
    assert!(latest_version() >= 1);
}

#[test]
fn absent_key_reads_as_none() {
    let store = open_store_in_memory().unwrap();
    assert_eq!(store.get_item("nope").unwrap(), None);
}

#[test]
fn set_get_remove_roundtrip() {
    let store = open_store_in_memory().unwrap();

    store.set_item("greeting", "hello").unwrap();
    assert_eq!(store.get_item("greeting").unwrap().as_deref(), Some("hello"));

    store.set_item("greeting", "goodbye").unwrap();
    assert_eq!(
        store.get_item("greeting").unwrap().as_deref(),
        Some("goodbye")
    );

    store.remove_item("greeting").unwrap();
    assert_eq!(store.get_item("greeting").unwrap(), None);

    // Removing an absent key stays a no-op.
    store.remove_item("greeting").unwrap();
}

#[test]
fn values_survive_reopening_a_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kanban.db");

    {
        let store = open_store(&path).unwrap();
        let repo = StoreTaskRepository::new(&store);
        repo.create_task(&TaskDraft {
            title: "persisted".to_string(),
            description: String::new(),
            status: Status::Todo,
            board: "Roadmap".to_string(),
        })
        .unwrap();
    }

    let reopened = open_store(&path).unwrap();
    let tasks = StoreTaskRepository::new(&reopened).list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "persisted");
}

#[test]
fn read_after_write_sees_the_latest_state() {
    let store = open_store_in_memory().unwrap();
    let repo = StoreTaskRepository::new(&store);

    let task = repo
        .create_task(&TaskDraft {
            title: "fresh".to_string(),
            description: String::new(),
            status: Status::Todo,
            board: "Roadmap".to_string(),
        })
        .unwrap();

    // The presentation contract: a list immediately after a write returns
    // the persisted state including that write.
    assert!(repo
        .list_tasks()
        .unwrap()
        .iter()
        .any(|stored| stored.id == task.id));
}
