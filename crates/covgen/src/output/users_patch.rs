use std::io::{BufWriter, Write};
use std::path::Path;

use orion_error::compat_prelude::*;
use orion_error::prelude::*;
use serde::Serialize;

use crate::datagen::User;
use crate::error::GenResult;

/// One JSON-patch `add` operation creating a user.
#[derive(Serialize)]
struct AddUser<'a> {
    op: &'static str,
    path: String,
    value: &'a User,
}

fn operations(users: &[User]) -> Vec<AddUser<'_>> {
    users
        .iter()
        .map(|u| AddUser {
            op: "add",
            path: format!("/{}", u.username),
            value: u,
        })
        .collect()
}

/// The user-admin patch document for `users`.
pub fn user_patch(users: &[User]) -> GenResult<String> {
    serde_json::to_string(&operations(users)).owe_data()
}

/// Write the patch document for `users` to `path`, creating parent
/// directories as needed.
pub fn write_user_patch(users: &[User], path: &Path) -> GenResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .owe_sys()
            .position(parent.display().to_string())?;
    }
    let file = std::fs::File::create(path)
        .owe_sys()
        .position(path.display().to_string())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &operations(users)).owe_data()?;
    writer.write_all(b"\n").owe_sys()?;
    writer.flush().owe_sys()?;
    Ok(())
}
