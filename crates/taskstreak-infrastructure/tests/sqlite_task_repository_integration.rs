use taskstreak_domain::shared::{DomainError, TaskId};
use taskstreak_domain::task::{Task, TaskRepository};

mod test_helpers;
use test_helpers::{at, date};

#[tokio::test]
async fn task_repo_insert_and_find_integration() {
    let repo = test_helpers::setup_in_memory_repo().await;

    let task = Task::new("Read a chapter", date(2024, 3, 1), at(2024, 3, 1, 7, 15))
        .expect("Create task");
    repo.insert(&task).await.expect("Insert task");

    let found = repo
        .find_by_id(task.id())
        .await
        .expect("Find task")
        .expect("Task should be found");

    assert_eq!(found, task);
    assert!(!found.is_completed());
    assert_eq!(found.created_date(), date(2024, 3, 1));
}

#[tokio::test]
async fn task_repo_find_missing_returns_none() {
    let repo = test_helpers::setup_in_memory_repo().await;

    let found = repo
        .find_by_id(&TaskId::from_string("nope"))
        .await
        .expect("Find task");
    assert!(found.is_none());
}

#[tokio::test]
async fn task_repo_completion_round_trip() {
    let repo = test_helpers::setup_in_memory_repo().await;

    let mut task = Task::new("Gym", date(2024, 3, 1), at(2024, 3, 1, 7, 0)).unwrap();
    repo.insert(&task).await.unwrap();

    task.complete(date(2024, 3, 2));
    repo.update_completion(&task).await.expect("Complete task");

    let found = repo.find_by_id(task.id()).await.unwrap().unwrap();
    assert!(found.is_completed());
    assert_eq!(found.completed_date(), Some(date(2024, 3, 2)));

    task.uncomplete();
    repo.update_completion(&task).await.expect("Uncomplete task");

    let found = repo.find_by_id(task.id()).await.unwrap().unwrap();
    assert!(!found.is_completed());
    assert_eq!(found.completed_date(), None);
}

#[tokio::test]
async fn task_repo_update_missing_is_not_found() {
    let repo = test_helpers::setup_in_memory_repo().await;

    let mut task = Task::new("Never stored", date(2024, 3, 1), at(2024, 3, 1, 7, 0)).unwrap();
    task.complete(date(2024, 3, 1));

    let result = repo.update_completion(&task).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn task_repo_delete_twice() {
    let repo = test_helpers::setup_in_memory_repo().await;

    let task = Task::new("Temp", date(2024, 3, 1), at(2024, 3, 1, 7, 0)).unwrap();
    repo.insert(&task).await.unwrap();

    repo.delete(task.id()).await.expect("First delete");
    assert!(repo.find_by_id(task.id()).await.unwrap().is_none());

    let second = repo.delete(task.id()).await;
    assert!(matches!(second, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn task_repo_find_all_newest_first() {
    let repo = test_helpers::setup_in_memory_repo().await;

    let older = Task::new("Older", date(2024, 3, 1), at(2024, 3, 1, 9, 0)).unwrap();
    let morning = Task::new("Morning", date(2024, 3, 2), at(2024, 3, 2, 8, 0)).unwrap();
    let evening = Task::new("Evening", date(2024, 3, 2), at(2024, 3, 2, 20, 0)).unwrap();
    let logged = Task::logged("Logged", date(2024, 2, 28), date(2024, 3, 2), at(2024, 3, 2, 21, 0))
        .unwrap();

    for task in [&older, &morning, &evening, &logged] {
        repo.insert(task).await.unwrap();
    }

    let titles: Vec<String> = repo
        .find_all()
        .await
        .expect("Find all")
        .iter()
        .map(|t| t.title().to_string())
        .collect();

    assert_eq!(titles, vec!["Evening", "Morning", "Older", "Logged"]);
}

#[tokio::test]
async fn task_repo_duplicate_id_is_store_error() {
    let repo = test_helpers::setup_in_memory_repo().await;

    let task = Task::new("Once", date(2024, 3, 1), at(2024, 3, 1, 7, 0)).unwrap();
    repo.insert(&task).await.unwrap();

    let result = repo.insert(&task).await;
    assert!(matches!(result, Err(DomainError::StoreUnavailable(_))));
}
