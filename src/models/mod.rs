//! Data models for Kadro

pub mod department;
pub mod document;
pub mod envelope;
pub mod item;
pub mod leave;
pub mod notification;
pub mod request;
pub mod user;

// Re-export commonly used types
pub use department::Department;
pub use document::Document;
pub use envelope::ApiResponse;
pub use item::{EquipmentCategory, Item, ItemPublic};
pub use leave::LeaveRequest;
pub use notification::Notification;
pub use request::{Request, RequestKind, RequestStatus};
pub use user::{Role, User, UserShort};
