
use entity::sea_orm_active_enums::Role;
use orrery_test_utils::prelude::*;

use super::*;

fn identity(user_id: i32, role: Role) -> Identity {
    Identity {
        user_id,
        role,
        token: String::new(),
        expires_at: 0,
    }
}

fn registration(login: &str, password: &str, role: Option<&str>) -> RegisterUserDto {
    RegisterUserDto {
        login: login.to_string(),
        password: password.to_string(),
        role: role.map(str::to_string),
    }
}
