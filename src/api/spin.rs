//! Spin-wheel endpoint: the server picks a random task within a category.

// self
use crate::{
	_prelude::*,
	api::{Envelope, task::{Task, TaskCategory}},
	gateway::{Gateway, RequestDescriptor},
	http::ApiHttpClient,
};

/// Payload submitted to `POST /spin`.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct SpinRequest {
	/// Restricts the draw to one category; `None` spins across all tasks.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<TaskCategory>,
}
impl SpinRequest {
	/// Spins within a single category.
	pub fn in_category(category: TaskCategory) -> Self {
		Self { category: Some(category) }
	}
}

impl<C> Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Spins the wheel, returning the task the server picked.
	pub async fn spin_wheel(&self, request: &SpinRequest) -> Result<Task> {
		let envelope: Envelope<Task> =
			self.send(RequestDescriptor::post("/spin").json(request)?).await?;

		envelope.into_data("spin_wheel").map_err(Error::from)
	}
}
