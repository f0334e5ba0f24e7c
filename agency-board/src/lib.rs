//! # Agency Board
//!
//! Kanban boards over entity stores. A board is a static, hand-authored mapping
//! between an entity's status and a display column ([`BoardLayout`]); the
//! [`BoardReconciler`] turns a drag-and-drop gesture into at most one persisted
//! status change through the entity store.
//!
//! ## Modules
//!
//! - [`layout`]: the `BoardLayout` trait
//! - [`layouts`]: the approvals, task and mission boards
//! - [`target`]: drop-target resolution
//! - [`reconciler`]: drag-and-drop to status-change reconciliation
//! - [`view`]: grouping records into columns for rendering

pub mod errors;
pub mod layout;
pub mod layouts;
pub mod reconciler;
pub mod target;
pub mod view;

pub use errors::BoardError;
pub use layout::BoardLayout;
pub use layouts::{ApprovalBoard, ApprovalColumn, MissionBoard, MissionColumn, TaskBoard, TaskColumn};
pub use reconciler::{BoardOutcome, BoardReconciler, DropOutcome, Notification, NotificationLevel};
pub use target::{resolve_target_column, DropTarget};
pub use view::{board_view, ColumnView};
