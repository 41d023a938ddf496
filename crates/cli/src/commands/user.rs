//! Account management commands.
//!
//! ```bash
//! LISTMATE_USER_PASSWORD=... listmate user create -e staff@example.com --staff
//! ```

use listmate_server::services::AuthService;

use super::{CommandError, connect};

/// Create an account. This is the only way to create staff.
pub async fn create(email: &str, password: &str, is_staff: bool) -> Result<(), CommandError> {
    let pool = connect().await?;

    let user = AuthService::new(&pool)
        .register(email, password, is_staff)
        .await?;

    tracing::info!(
        "User created! ID: {}, Email: {}, Staff: {}",
        user.id,
        user.email,
        user.is_staff
    );
    Ok(())
}
