use kanban_core::repo::task_repo::TASKS_KEY;
use kanban_core::store::open_store_in_memory;
use kanban_core::{
    RepoError, Status, StoreTaskRepository, TaskDraft, TaskId, TaskPatch, TaskRepository,
    TaskValidationError,
};
use std::collections::HashSet;

fn draft(title: &str, status: Status, board: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: String::new(),
        status,
        board: board.to_string(),
    }
}

#[test]
fn create_and_list_roundtrip() {
    let store = open_store_in_memory().unwrap();
    let repo = StoreTaskRepository::new(&store);

    let before = repo.list_tasks().unwrap();
    let created = repo
        .create_task(&TaskDraft {
            title: "Ship it".to_string(),
            description: "final pass".to_string(),
            status: Status::Doing,
            board: "Launch Plan".to_string(),
        })
        .unwrap();

    let after = repo.list_tasks().unwrap();
    assert_eq!(after.len(), before.len() + 1);

    let stored = after.last().unwrap();
    assert_eq!(stored, &created);
    assert_eq!(stored.title, "Ship it");
    assert_eq!(stored.description, "final pass");
    assert_eq!(stored.status, Status::Doing);
    assert_eq!(stored.board, "Launch Plan");
}

#[test]
fn create_never_reuses_an_id() {
    let store = open_store_in_memory().unwrap();
    let repo = StoreTaskRepository::new(&store);

    let mut seen: HashSet<TaskId> = HashSet::new();
    for n in 0..20 {
        let task = repo
            .create_task(&draft(&format!("task {n}"), Status::Todo, "Roadmap"))
            .unwrap();
        assert!(seen.insert(task.id), "id {} was reused", task.id);
    }

    // Deleting must not make any id available again.
    let victim = *seen.iter().next().unwrap();
    repo.remove_task(victim).unwrap();
    let fresh = repo
        .create_task(&draft("after delete", Status::Todo, "Roadmap"))
        .unwrap();
    assert!(!seen.contains(&fresh.id));
}

#[test]
fn create_rejects_blank_title_without_writing() {
    let store = open_store_in_memory().unwrap();
    let repo = StoreTaskRepository::new(&store);
    repo.create_task(&draft("keep me", Status::Todo, "Roadmap"))
        .unwrap();
    let snapshot = store.get_item(TASKS_KEY).unwrap();

    let err = repo
        .create_task(&draft("   ", Status::Todo, "Roadmap"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::EmptyTitle)
    ));
    assert_eq!(store.get_item(TASKS_KEY).unwrap(), snapshot);
}

#[test]
fn update_changes_only_supplied_fields() {
    let store = open_store_in_memory().unwrap();
    let repo = StoreTaskRepository::new(&store);

    let task = repo
        .create_task(&TaskDraft {
            title: "Write docs".to_string(),
            description: "user guide".to_string(),
            status: Status::Todo,
            board: "Launch Plan".to_string(),
        })
        .unwrap();

    let updated = repo
        .update_task(task.id, &TaskPatch::status(Status::Doing))
        .unwrap();

    assert_eq!(updated.id, task.id);
    assert_eq!(updated.status, Status::Doing);
    assert_eq!(updated.title, "Write docs");
    assert_eq!(updated.description, "user guide");
    assert_eq!(updated.board, "Launch Plan");

    let listed = repo.list_tasks().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], updated);
}

#[test]
fn update_missing_id_signals_not_found_and_leaves_storage_unchanged() {
    let store = open_store_in_memory().unwrap();
    let repo = StoreTaskRepository::new(&store);
    repo.create_task(&draft("only task", Status::Todo, "Roadmap"))
        .unwrap();
    let snapshot = store.get_item(TASKS_KEY).unwrap();

    let missing = TaskId::new_v4();
    let err = repo
        .update_task(missing, &TaskPatch::status(Status::Done))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
    assert_eq!(store.get_item(TASKS_KEY).unwrap(), snapshot);
}

#[test]
fn update_merge_rejects_blanked_title() {
    let store = open_store_in_memory().unwrap();
    let repo = StoreTaskRepository::new(&store);
    let task = repo
        .create_task(&draft("valid", Status::Todo, "Roadmap"))
        .unwrap();

    let patch = TaskPatch {
        title: Some("  ".to_string()),
        ..TaskPatch::default()
    };
    let err = repo.update_task(task.id, &patch).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::EmptyTitle)
    ));

    // Failed update must not touch the stored record.
    assert_eq!(repo.list_tasks().unwrap()[0].title, "valid");
}

#[test]
fn remove_is_idempotent() {
    let store = open_store_in_memory().unwrap();
    let repo = StoreTaskRepository::new(&store);

    let keep = repo
        .create_task(&draft("keep", Status::Todo, "Roadmap"))
        .unwrap();
    let victim = repo
        .create_task(&draft("remove", Status::Done, "Roadmap"))
        .unwrap();

    repo.remove_task(victim.id).unwrap();
    let snapshot = store.get_item(TASKS_KEY).unwrap();

    repo.remove_task(victim.id).unwrap();
    assert_eq!(store.get_item(TASKS_KEY).unwrap(), snapshot);

    let listed = repo.list_tasks().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);
}

#[test]
fn mutations_preserve_insertion_order() {
    let store = open_store_in_memory().unwrap();
    let repo = StoreTaskRepository::new(&store);

    let a = repo.create_task(&draft("a", Status::Todo, "B")).unwrap();
    let b = repo.create_task(&draft("b", Status::Todo, "B")).unwrap();
    let c = repo.create_task(&draft("c", Status::Todo, "B")).unwrap();

    repo.update_task(a.id, &TaskPatch::status(Status::Done))
        .unwrap();
    repo.remove_task(b.id).unwrap();

    let listed = repo.list_tasks().unwrap();
    let titles: Vec<&str> = listed.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "c"]);
    assert_eq!(listed[0].id, a.id);
    assert_eq!(listed[1].id, c.id);
}

#[test]
fn malformed_tasks_value_recovers_to_empty_collection() {
    let store = open_store_in_memory().unwrap();
    store.set_item(TASKS_KEY, "{not json]").unwrap();

    let repo = StoreTaskRepository::new(&store);
    assert!(repo.list_tasks().unwrap().is_empty());

    // The layer stays usable after recovery.
    let task = repo
        .create_task(&draft("fresh start", Status::Todo, "Roadmap"))
        .unwrap();
    assert_eq!(repo.list_tasks().unwrap(), vec![task]);
}
