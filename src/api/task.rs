//! Task model and CRUD operations.

// self
use crate::{
	_prelude::*,
	api::Envelope,
	gateway::{Gateway, RequestDescriptor},
	http::ApiHttpClient,
};

/// Category a task belongs to; the spin wheel picks within one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCategory {
	/// Arts and crafts.
	ArtsCrafts,
	/// Time outdoors.
	Nature,
	/// Family activities.
	Family,
	/// Sport and exercise.
	Sport,
	/// Social activities.
	Friends,
	/// Meditation and mindfulness.
	Meditation,
}

/// Lifecycle status of a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
	/// Not started.
	#[serde(rename = "pending")]
	Pending,
	/// Being worked on.
	#[serde(rename = "inprogress")]
	InProgress,
	/// Completed.
	#[serde(rename = "done")]
	Done,
	/// Shared with other users.
	#[serde(rename = "collaborativeTask")]
	Collaborative,
}

/// Task record as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
	/// Server-assigned identifier.
	#[serde(rename = "_id")]
	pub id: String,
	/// Short title.
	pub title: String,
	/// Longer description.
	pub description: String,
	/// Category the task belongs to.
	pub category: TaskCategory,
	/// Current lifecycle status.
	pub status: TaskStatus,
	/// Identifier of the owning user.
	pub user_id: String,
	/// Optional due instant.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub due_date: Option<OffsetDateTime>,
	/// Points awarded on completion.
	pub points: i64,
	/// Creation instant recorded by the API.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Last-update instant recorded by the API.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// Payload for creating a task via `POST /tasks`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
	/// Short title.
	pub title: String,
	/// Longer description.
	pub description: String,
	/// Category the task belongs to.
	pub category: TaskCategory,
	/// Optional due instant.
	#[serde(skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
	pub due_date: Option<OffsetDateTime>,
	/// Points awarded on completion; the API applies a default when absent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub points: Option<i64>,
}
impl TaskDraft {
	/// Creates a draft with the required fields.
	pub fn new(
		title: impl Into<String>,
		description: impl Into<String>,
		category: TaskCategory,
	) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
			category,
			due_date: None,
			points: None,
		}
	}
}

/// Partial update for `PATCH /tasks/{id}`; absent fields stay untouched.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
	/// Replacement title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Replacement description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Replacement category.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<TaskCategory>,
	/// Replacement due instant.
	#[serde(skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
	pub due_date: Option<OffsetDateTime>,
	/// Replacement points value.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub points: Option<i64>,
}

/// Status transition for `PATCH /tasks/{id}/status`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TaskStatusPatch {
	/// Target status.
	pub status: TaskStatus,
	/// Points awarded alongside the transition, when the server expects them.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub points: Option<i64>,
}

impl<C> Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists the signed-in user's tasks.
	pub async fn tasks(&self) -> Result<Vec<Task>> {
		let envelope: Envelope<Vec<Task>> = self.send(RequestDescriptor::get("/tasks")).await?;

		envelope.into_data("tasks").map_err(Error::from)
	}

	/// Creates a task from the provided draft.
	pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
		let envelope: Envelope<Task> =
			self.send(RequestDescriptor::post("/tasks").json(draft)?).await?;

		envelope.into_data("create_task").map_err(Error::from)
	}

	/// Fetches a single task by identifier.
	pub async fn task(&self, id: &str) -> Result<Task> {
		let envelope: Envelope<Task> =
			self.send(RequestDescriptor::get(format!("/tasks/{id}"))).await?;

		envelope.into_data("task").map_err(Error::from)
	}

	/// Applies a partial update to a task.
	pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
		let envelope: Envelope<Task> =
			self.send(RequestDescriptor::patch(format!("/tasks/{id}")).json(patch)?).await?;

		envelope.into_data("update_task").map_err(Error::from)
	}

	/// Transitions a task's status, optionally awarding points.
	pub async fn update_task_status(&self, id: &str, patch: &TaskStatusPatch) -> Result<Task> {
		let envelope: Envelope<Task> =
			self.send(RequestDescriptor::patch(format!("/tasks/{id}/status")).json(patch)?).await?;

		envelope.into_data("update_task_status").map_err(Error::from)
	}

	/// Deletes a task, returning the API's status message.
	pub async fn delete_task(&self, id: &str) -> Result<String> {
		let envelope: Envelope<serde_json::Value> =
			self.send(RequestDescriptor::delete(format!("/tasks/{id}"))).await?;

		Ok(envelope.message)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn categories_use_kebab_case_on_the_wire() {
		assert_eq!(
			serde_json::to_string(&TaskCategory::ArtsCrafts).expect("Category should serialize."),
			"\"arts-crafts\"",
		);
		assert_eq!(
			serde_json::from_str::<TaskCategory>("\"meditation\"")
				.expect("Category should deserialize."),
			TaskCategory::Meditation,
		);
	}

	#[test]
	fn statuses_match_the_mixed_wire_names() {
		assert_eq!(
			serde_json::to_string(&TaskStatus::InProgress).expect("Status should serialize."),
			"\"inprogress\"",
		);
		assert_eq!(
			serde_json::to_string(&TaskStatus::Collaborative).expect("Status should serialize."),
			"\"collaborativeTask\"",
		);
	}

	#[test]
	fn draft_omits_absent_optionals() {
		let draft = TaskDraft::new("Paint", "Watercolor practice", TaskCategory::ArtsCrafts);
		let value = serde_json::to_value(&draft).expect("Draft should serialize.");

		assert_eq!(value["category"], "arts-crafts");
		assert!(value.get("dueDate").is_none());
		assert!(value.get("points").is_none());
	}

	#[test]
	fn task_deserializes_from_the_wire_shape() {
		let payload = r#"{
			"_id": "665f1c2e9b1d8c0012a4f101",
			"title": "Morning run",
			"description": "5km around the lake",
			"category": "sport",
			"status": "pending",
			"userId": "665f1c2e9b1d8c0012a4f001",
			"dueDate": "2025-06-01T08:00:00Z",
			"points": 10,
			"createdAt": "2025-05-01T10:00:00Z",
			"updatedAt": "2025-05-01T10:00:00Z"
		}"#;
		let task: Task = serde_json::from_str(payload).expect("Task payload should deserialize.");

		assert_eq!(task.category, TaskCategory::Sport);
		assert_eq!(task.status, TaskStatus::Pending);
		assert!(task.due_date.is_some());
	}
}
