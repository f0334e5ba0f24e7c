//! Board layouts shipped with the dashboard.

mod approvals;
mod missions;
mod tasks;

pub use approvals::{ApprovalBoard, ApprovalColumn};
pub use missions::{MissionBoard, MissionColumn};
pub use tasks::{TaskBoard, TaskColumn};
