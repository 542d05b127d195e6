//! 返回给调用方的固定消息，调用方依赖这些字符串，不能随意修改

pub const CONNECTED: &str = "Successfully connected to the database.";
pub const CONNECT_FAILED: &str = "Failed to connect to the database.";

pub const TARGET_USER_LIST_FAILED: &str = "Failed to retrieve target user list.";
pub const DATABASE_LIST_FAILED: &str = "Failed to retrieve database list.";
pub const TABLE_LIST_FAILED: &str = "Failed to retrieve table list.";
pub const NO_TABLE: &str = "No table";

pub const AUTHORIZED: &str = "OK";
pub const NOT_SUPERUSER: &str = "User is not superuser";
pub const NOT_AUTHORIZED: &str = "User is not authorized";
pub const USER_NOT_FOUND: &str = "User not found";
pub const USER_INFO_FAILED: &str = "User information cannot be retrieved.";

pub const AUTHORITY_LIST_FAILED: &str = "Failed to retrieve authorization list";

pub const COMMITTED: &str = "Successful query and commit.";
pub const EXECUTE_FAILED: &str = "Failed to execute the query.";
