//! Startup seed: initial accounts and leave categories from a JSON file.
//! Passwords in the seed are hashed on load; the file never contains hashes.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::model::{category::Category, role::Role, user::UserRecord};
use crate::store::{MemoryCatalog, MemoryDirectory, UserDirectory};

#[derive(Deserialize)]
struct SeedUser {
    username: String,
    display_name: String,
    password: String,
    role: Role,
}

#[derive(Deserialize)]
struct SeedCategory {
    label: String,
}

#[derive(Deserialize)]
struct SeedFile {
    #[serde(default)]
    users: Vec<SeedUser>,
    #[serde(default)]
    categories: Vec<SeedCategory>,
}

/// Loads `path` into the directory and catalog. Duplicate usernames are
/// skipped with a warning rather than failing the whole seed.
pub async fn load_seed(
    path: &str,
    directory: &MemoryDirectory,
    catalog: &MemoryCatalog,
) -> Result<(usize, usize)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {path}"))?;
    let seed: SeedFile =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse seed file {path}"))?;

    let mut users = 0usize;
    for user in seed.users {
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: user.username.clone(),
            display_name: user.display_name,
            password_hash: hash_password(&user.password)?,
            role: user.role,
        };
        match directory.insert(record).await {
            Ok(()) => users += 1,
            Err(_) => warn!(username = %user.username, "seed user skipped: username taken"),
        }
    }

    let mut categories = 0usize;
    for category in seed.categories {
        catalog.add(Category {
            id: Uuid::new_v4(),
            label: category.label,
        });
        categories += 1;
    }

    info!(users, categories, "seed data loaded");
    Ok((users, categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::store::CategoryCatalog;
    use std::io::Write;

    #[actix_web::test]
    async fn loads_users_and_categories() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "users": [
                    {{"username": "anna", "display_name": "Anna Rossi",
                      "password": "pass1", "role": "Employee"}},
                    {{"username": "marta", "display_name": "Marta Verdi",
                      "password": "pass2", "role": "Manager"}},
                    {{"username": "ANNA", "display_name": "Duplicate",
                      "password": "x", "role": "Employee"}}
                ],
                "categories": [
                    {{"label": "Annual leave"}},
                    {{"label": "Sick leave"}}
                ]
            }}"#
        )
        .unwrap();

        let directory = MemoryDirectory::new();
        let catalog = MemoryCatalog::new();
        let (users, categories) = load_seed(file.path().to_str().unwrap(), &directory, &catalog)
            .await
            .unwrap();

        assert_eq!(users, 2); // duplicate skipped
        assert_eq!(categories, 2);

        let anna = directory.find_by_username("anna").await.unwrap();
        assert_eq!(anna.role, Role::Employee);
        assert!(verify_password("pass1", &anna.password_hash));
        assert_eq!(catalog.list().await.len(), 2);
    }

    #[actix_web::test]
    async fn missing_file_is_an_error() {
        let directory = MemoryDirectory::new();
        let catalog = MemoryCatalog::new();
        assert!(
            load_seed("/nonexistent/seed.json", &directory, &catalog)
                .await
                .is_err()
        );
    }
}
