//! Session lifecycle: login, logout, session checks and identity.

use crate::domain::auth::Credentials;
use crate::domain::user::User;
use crate::repository::AuthApi;
use crate::services::{ServiceError, ServiceResult};

/// Opens a session for the given credentials.
pub async fn login<R>(repo: &R, email: &str, password: &str) -> ServiceResult<()>
where
    R: AuthApi + ?Sized,
{
    let credentials = Credentials::new(email, password);
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(ServiceError::Form(
            "email and password are required".to_string(),
        ));
    }

    repo.login(&credentials).await.map_err(|err| {
        log::error!("Login failed for {}: {err}", credentials.email);
        ServiceError::from(err)
    })?;

    Ok(())
}

pub fn logout<R>(repo: &R) -> ServiceResult<()>
where
    R: AuthApi + ?Sized,
{
    repo.logout().map_err(|err| {
        log::error!("Failed to clear session: {err}");
        ServiceError::from(err)
    })
}

/// Fails with [`ServiceError::Unauthorized`] when no session is open.
pub fn check<R>(repo: &R) -> ServiceResult<()>
where
    R: AuthApi + ?Sized,
{
    if repo.is_authenticated() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Clears the session when `err` means the backend no longer accepts it, then
/// hands the error back.
pub fn handle_error<R>(repo: &R, err: ServiceError) -> ServiceError
where
    R: AuthApi + ?Sized,
{
    if err.is_auth_failure() {
        log::info!("Session rejected by the backend, logging out");
        if let Err(logout_err) = repo.logout() {
            log::warn!("Failed to clear session: {logout_err}");
        }
    }
    err
}

/// Loads the account behind the current session.
pub async fn identity<R>(repo: &R) -> ServiceResult<User>
where
    R: AuthApi + ?Sized,
{
    check(repo)?;

    repo.identity()
        .await
        .map_err(|err| handle_error(repo, ServiceError::from(err)))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::AccessToken;
    use crate::domain::user::ThemePreference;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn sample_user() -> User {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        User {
            id: "0b7e4f0e-2d7c-4a59-8d6e-3c1f2a9b8e11".parse().unwrap(),
            email: "admin@example.com".to_string(),
            nombres: "Admin".to_string(),
            apellidos: "Root".to_string(),
            nombre_completo: "Admin Root".to_string(),
            is_active: true,
            is_superuser: true,
            theme_preference: ThemePreference::Light,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    #[tokio::test]
    async fn login_sends_trimmed_credentials() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .withf(|credentials| {
                credentials.email == "admin@example.com" && credentials.password == "admin123"
            })
            .times(1)
            .returning(|_| Ok(AccessToken::new("tok").unwrap()));

        login(&repo, "  admin@example.com ", "admin123")
            .await
            .expect("should log in");
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let mut repo = MockRepository::new();
        repo.expect_login().times(0);

        let result = login(&repo, "admin@example.com", "").await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn rejected_login_is_unauthorized() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .times(1)
            .returning(|_| Err(RepositoryError::Unauthorized));

        let result = login(&repo, "admin@example.com", "wrong").await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn check_requires_a_session() {
        let mut repo = MockRepository::new();
        repo.expect_is_authenticated().times(1).return_const(false);

        assert!(matches!(check(&repo), Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn auth_failures_clear_the_session() {
        let mut repo = MockRepository::new();
        repo.expect_logout().times(2).returning(|| Ok(()));

        let err = handle_error(&repo, ServiceError::Unauthorized);
        assert!(matches!(err, ServiceError::Unauthorized));
        let err = handle_error(&repo, ServiceError::Forbidden);
        assert!(matches!(err, ServiceError::Forbidden));
    }

    #[test]
    fn other_failures_keep_the_session() {
        let mut repo = MockRepository::new();
        repo.expect_logout().times(0);

        let err = handle_error(&repo, ServiceError::NotFound);

        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn identity_returns_current_user() {
        let mut repo = MockRepository::new();
        repo.expect_is_authenticated().return_const(true);
        repo.expect_identity()
            .times(1)
            .returning(|| Ok(sample_user()));

        let user = identity(&repo).await.expect("should load identity");

        assert_eq!(user.email, "admin@example.com");
    }

    #[tokio::test]
    async fn rejected_identity_logs_out() {
        let mut repo = MockRepository::new();
        repo.expect_is_authenticated().return_const(true);
        repo.expect_identity()
            .times(1)
            .returning(|| Err(RepositoryError::Unauthorized));
        repo.expect_logout().times(1).returning(|| Ok(()));

        let result = identity(&repo).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
