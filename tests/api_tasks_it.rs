#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use taskwheel_client::{
	_preludet::*,
	api::{
		spin::SpinRequest,
		task::{TaskCategory, TaskDraft, TaskStatus, TaskStatusPatch},
	},
};

const TASK: &str = r#"{
	"_id": "665f1c2e9b1d8c0012a4f101",
	"title": "Morning run",
	"description": "5km around the lake",
	"category": "sport",
	"status": "pending",
	"userId": "665f1c2e9b1d8c0012a4f001",
	"points": 10,
	"createdAt": "2025-05-01T10:00:00Z",
	"updatedAt": "2025-05-01T10:00:00Z"
}"#;

#[tokio::test]
async fn create_task_posts_the_draft() {
	let server = MockServer::start_async().await;
	let (gateway, session, _) = build_reqwest_test_gateway(&server.url("/api"));

	seed_session(&session, "T1");

	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/tasks")
				.header("authorization", "Bearer T1")
				.json_body(serde_json::json!({
					"title": "Morning run",
					"description": "5km around the lake",
					"category": "sport",
				}));
			then.status(201).header("content-type", "application/json").body(format!(
				r#"{{"success":true,"message":"Task created","data":{TASK}}}"#
			));
		})
		.await;
	let draft = TaskDraft::new("Morning run", "5km around the lake", TaskCategory::Sport);
	let task = gateway.create_task(&draft).await.expect("Create should succeed.");

	create.assert_async().await;

	assert_eq!(task.id, "665f1c2e9b1d8c0012a4f101");
	assert_eq!(task.status, TaskStatus::Pending);
}

#[tokio::test]
async fn task_by_id_hits_the_detail_path() {
	let server = MockServer::start_async().await;
	let (gateway, session, _) = build_reqwest_test_gateway(&server.url("/api"));

	seed_session(&session, "T1");

	let detail = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/tasks/665f1c2e9b1d8c0012a4f101");
			then.status(200).header("content-type", "application/json").body(format!(
				r#"{{"success":true,"message":"ok","data":{TASK}}}"#
			));
		})
		.await;
	let task = gateway.task("665f1c2e9b1d8c0012a4f101").await.expect("Detail should succeed.");

	detail.assert_async().await;

	assert_eq!(task.category, TaskCategory::Sport);
}

#[tokio::test]
async fn status_transition_patches_the_status_path() {
	let server = MockServer::start_async().await;
	let (gateway, session, _) = build_reqwest_test_gateway(&server.url("/api"));

	seed_session(&session, "T1");

	let status = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/api/tasks/665f1c2e9b1d8c0012a4f101/status")
				.json_body(serde_json::json!({ "status": "done", "points": 10 }));
			then.status(200).header("content-type", "application/json").body(format!(
				r#"{{"success":true,"message":"Status updated","data":{TASK}}}"#
			));
		})
		.await;
	let patch = TaskStatusPatch { status: TaskStatus::Done, points: Some(10) };
	let task = gateway
		.update_task_status("665f1c2e9b1d8c0012a4f101", &patch)
		.await
		.expect("Status update should succeed.");

	status.assert_async().await;

	assert_eq!(task.title, "Morning run");
}

#[tokio::test]
async fn delete_task_returns_the_status_message() {
	let server = MockServer::start_async().await;
	let (gateway, session, _) = build_reqwest_test_gateway(&server.url("/api"));

	seed_session(&session, "T1");

	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/tasks/665f1c2e9b1d8c0012a4f101");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"success":true,"message":"Task deleted"}"#);
		})
		.await;
	let message =
		gateway.delete_task("665f1c2e9b1d8c0012a4f101").await.expect("Delete should succeed.");

	delete.assert_async().await;

	assert_eq!(message, "Task deleted");
}

#[tokio::test]
async fn spin_wheel_returns_the_picked_task() {
	let server = MockServer::start_async().await;
	let (gateway, session, _) = build_reqwest_test_gateway(&server.url("/api"));

	seed_session(&session, "T1");

	let spin = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/spin")
				.json_body(serde_json::json!({ "category": "sport" }));
			then.status(200).header("content-type", "application/json").body(format!(
				r#"{{"success":true,"message":"Spin result","data":{TASK}}}"#
			));
		})
		.await;
	let task = gateway
		.spin_wheel(&SpinRequest::in_category(TaskCategory::Sport))
		.await
		.expect("Spin should succeed.");

	spin.assert_async().await;

	assert_eq!(task.category, TaskCategory::Sport);
}
