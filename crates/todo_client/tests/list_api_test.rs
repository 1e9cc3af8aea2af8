//! Integration tests for todo list CRUD endpoints


use serde_json::json;
use todo_client::{ApiError, TodoApi};
use todo_core::TodoList;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use test_utils::{client_for, list_json, task_json};

#[tokio::test]
async fn get_all_lists_decodes_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todolists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            list_json("l1", "Groceries", json!([])),
            list_json("l2", "Chores", json!([task_json("t1", "Laundry", true, "low")])),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let lists = client_for(&server.uri()).get_all_lists().await.unwrap();

    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].name, "Groceries");
    assert_eq!(lists[1].tasks.len(), 1);
    assert!(lists[1].tasks[0].done);
}

#[tokio::test]
async fn get_list_maps_not_found_to_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todolists/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server.uri()).get_list("missing").await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status, .. } if status.as_u16() == 404));
}

#[tokio::test]
async fn create_list_posts_name_and_empty_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todolists"))
        .and(body_json(json!({ "name": "Groceries", "tasks": [] })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(list_json("l1", "Groceries", json!([]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server.uri()).create_list("Groceries").await.unwrap();

    assert_eq!(created.id.as_deref(), Some("l1"));
    assert_eq!(created.name, "Groceries");
}

#[tokio::test]
async fn update_list_puts_full_list() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/todolists/l1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(list_json("l1", "Errands", json!([]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut list: TodoList =
        serde_json::from_value(list_json("l1", "Groceries", json!([]))).unwrap();
    list.name = "Errands".to_string();

    let updated = client_for(&server.uri()).update_list(&list).await.unwrap();

    assert_eq!(updated.name, "Errands");
}

#[tokio::test]
async fn update_list_without_id_is_rejected_locally() {
    let server = MockServer::start().await;

    let list = TodoList::new("Unsaved");
    let err = client_for(&server.uri()).update_list(&list).await.unwrap_err();

    assert!(matches!(err, ApiError::MissingId { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_list_hits_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/todolists/l1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server.uri()).delete_list("l1").await.unwrap();
}
