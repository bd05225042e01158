//! Services for the signed-in user's own account settings.

use crate::domain::auth::{PasswordChange, UserSettings};
use crate::domain::user::ThemePreference;
use crate::repository::AuthApi;
use crate::services::auth::{handle_error, identity};
use crate::services::users::validate_password;
use crate::services::{ServiceError, ServiceResult};

/// Changes the password after checking the confirmation matches.
pub async fn change_password<R>(
    repo: &R,
    current_password: &str,
    new_password: &str,
    confirmation: &str,
) -> ServiceResult<()>
where
    R: AuthApi + ?Sized,
{
    if current_password.is_empty() {
        return Err(ServiceError::Form("current password is required".to_string()));
    }
    validate_password(new_password)?;
    if new_password != confirmation {
        return Err(ServiceError::Form("passwords do not match".to_string()));
    }

    let change = PasswordChange {
        current_password: current_password.to_string(),
        new_password: new_password.to_string(),
    };

    repo.change_password(&change).await.map_err(|err| {
        log::error!("Failed to change password: {err}");
        handle_error(repo, ServiceError::from(err))
    })
}

/// Stores the preferred theme.
pub async fn set_theme<R>(repo: &R, theme: ThemePreference) -> ServiceResult<()>
where
    R: AuthApi + ?Sized,
{
    let settings = UserSettings {
        theme_preference: theme,
    };

    repo.update_settings(&settings).await.map_err(|err| {
        log::error!("Failed to update theme: {err}");
        handle_error(repo, ServiceError::from(err))
    })
}

/// Switches the signed-in user to the other theme and returns it.
pub async fn toggle_theme<R>(repo: &R) -> ServiceResult<ThemePreference>
where
    R: AuthApi + ?Sized,
{
    let theme = identity(repo).await?.theme_preference.toggled();
    set_theme(repo, theme).await?;
    Ok(theme)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::user::User;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn mismatched_confirmation_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_change_password().times(0);

        let result = change_password(&repo, "old-pass", "new-pass", "other-pass").await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_change_password().times(0);

        let result = change_password(&repo, "old-pass", "abc", "abc").await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn password_change_is_forwarded() {
        let mut repo = MockRepository::new();
        repo.expect_change_password()
            .withf(|change| {
                change.current_password == "old-pass" && change.new_password == "new-pass"
            })
            .times(1)
            .returning(|_| Ok(()));

        change_password(&repo, "old-pass", "new-pass", "new-pass")
            .await
            .expect("should change password");
    }

    #[tokio::test]
    async fn wrong_current_password_keeps_session() {
        let mut repo = MockRepository::new();
        repo.expect_change_password().times(1).returning(|_| {
            Err(RepositoryError::Status {
                status: StatusCode::BAD_REQUEST,
                body: r#"{"detail":"Incorrect password"}"#.to_string(),
            })
        });
        repo.expect_logout().times(0);

        let result = change_password(&repo, "bad-pass", "new-pass", "new-pass").await;

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[tokio::test]
    async fn theme_is_saved() {
        let mut repo = MockRepository::new();
        repo.expect_update_settings()
            .withf(|settings| settings.theme_preference == ThemePreference::Dark)
            .times(1)
            .returning(|_| Ok(()));

        set_theme(&repo, ThemePreference::Dark)
            .await
            .expect("should save theme");
    }

    #[tokio::test]
    async fn toggle_switches_from_stored_theme() {
        let mut repo = MockRepository::new();
        repo.expect_is_authenticated().return_const(true);
        repo.expect_identity().times(1).returning(|| {
            let timestamp = NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap();
            Ok(User {
                id: "0b7e4f0e-2d7c-4a59-8d6e-3c1f2a9b8e11".parse().unwrap(),
                email: "admin@example.com".to_string(),
                nombres: "Admin".to_string(),
                apellidos: "Root".to_string(),
                nombre_completo: "Admin Root".to_string(),
                is_active: true,
                is_superuser: true,
                theme_preference: ThemePreference::Dark,
                created_at: timestamp,
                updated_at: timestamp,
            })
        });
        repo.expect_update_settings()
            .withf(|settings| settings.theme_preference == ThemePreference::Light)
            .times(1)
            .returning(|_| Ok(()));

        let theme = toggle_theme(&repo).await.expect("should toggle theme");

        assert_eq!(theme, ThemePreference::Light);
    }

    #[tokio::test]
    async fn toggle_without_session_sends_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_is_authenticated().return_const(false);
        repo.expect_identity().times(0);
        repo.expect_update_settings().times(0);

        let result = toggle_theme(&repo).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn expired_session_is_cleared_on_theme_change() {
        let mut repo = MockRepository::new();
        repo.expect_update_settings()
            .times(1)
            .returning(|_| Err(RepositoryError::Unauthorized));
        repo.expect_logout().times(1).returning(|| Ok(()));

        let result = set_theme(&repo, ThemePreference::Light).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
