pub mod bulk;
pub mod users_patch;

pub use bulk::{BatchAssembler, BulkAction, BulkBatch};
pub use users_patch::{user_patch, write_user_patch};
