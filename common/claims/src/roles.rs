pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_USER: &str = "User";
