pub mod repositories;

mod repository_base;
mod result_ext;
mod session_storage;

pub use repository_base::StorageRepositoryBase;
pub use result_ext::ResultExt;
pub use session_storage::{SessionStorage, LOOPS_KEY, TOKEN_KEY, USERS_KEY, USER_KEY};
