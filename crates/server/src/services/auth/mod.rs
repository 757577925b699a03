//! Authentication service.
//!
//! Registration, login and bearer-token identity resolution. Password
//! hashing uses argon2; tokens are HS256 JWTs from [`jwt::JwtKeys`].

mod error;
pub mod jwt;

pub use error::AuthError;
pub use jwt::{Claims, JwtKeys};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use driftline_core::{Email, Role, UserId};

use crate::db::UserRepository;
use crate::models::{User, UserDraft, user::DEMO_PASSWORD_SENTINEL};
use crate::store::Store;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Password the seeded demo admin (sentinel hash) logs in with.
const DEMO_PASSWORD: &str = "admin";

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    keys: &'a JwtKeys,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store, keys: &'a JwtKeys) -> Self {
        Self {
            users: UserRepository::new(store),
            keys,
        }
    }

    /// Register a new user and issue a token for it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] for a malformed address,
    /// [`AuthError::WeakPassword`] when the password is too short, and
    /// [`AuthError::EmailExists`] when the address is already taken.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        // Uniqueness is checked here, not in the store.
        if self.users.get_by_email(&email).is_some() {
            return Err(AuthError::EmailExists);
        }

        let password_hash = hash_password(password)?;
        let user = self.users.create(UserDraft {
            email,
            name: name.to_owned(),
            role: Role::User,
            active: true,
            password_hash,
        });

        let token = self.keys.sign(&user)?;
        Ok((user, token))
    }

    /// Login with email and password, issuing a token on success.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the user is
    /// missing or inactive, or the password does not match.
    pub fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;

        let user = self
            .users
            .get_by_email(&email)
            .filter(|u| u.active)
            .ok_or(AuthError::InvalidCredentials)?;

        if user.password_hash == DEMO_PASSWORD_SENTINEL {
            // Seeded demo account: fixed password instead of a real hash.
            if password != DEMO_PASSWORD {
                return Err(AuthError::InvalidCredentials);
            }
        } else {
            verify_password(password, &user.password_hash)?;
        }

        let token = self.keys.sign(&user)?;
        Ok((user, token))
    }

    /// Resolve a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] when the token is malformed
    /// or expired, or the referenced user is missing or inactive.
    pub fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.keys.verify(token)?;
        self.users
            .get(&UserId::from(claims.sub))
            .filter(|u| u.active)
            .ok_or(AuthError::InvalidToken)
    }
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with argon2 and a fresh salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}
