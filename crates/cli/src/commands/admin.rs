//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin user in a file-mode store
//! driftline admin create -d ./data -e admin@shop.test -p s3cret-pass -n "Admin Name"
//! ```

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use driftline_core::{Email, EmailError, Role};
use driftline_server::db::UserRepository;
use driftline_server::models::UserDraft;
use driftline_server::store::{Store, StoreConfig, StoreError};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too short.
    #[error("Password must be at least 6 characters")]
    WeakPassword,

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("Failed to hash password")]
    PasswordHash,

    /// Store could not be opened.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Create a new admin user in the store at `data_dir`.
///
/// # Errors
///
/// Returns an error when the email is malformed or taken, the password
/// is too short, or the store cannot be opened.
pub async fn create_user(
    data_dir: &str,
    email: &str,
    password: &str,
    name: &str,
) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;
    if password.len() < 6 {
        return Err(AdminError::WeakPassword);
    }

    let store = Store::open(&StoreConfig::file(data_dir))?;
    let users = UserRepository::new(&store);

    if users.get_by_email(&email).is_some() {
        return Err(AdminError::UserExists(email.into_inner()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AdminError::PasswordHash)?
        .to_string();

    let user = users.create(UserDraft {
        email,
        name: name.to_owned(),
        role: Role::Admin,
        active: true,
        password_hash,
    });

    store.shutdown().await;
    tracing::info!(id = %user.id, email = %user.email, "admin user created");
    Ok(())
}
