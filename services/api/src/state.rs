use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use wayfinder_auth_types::token::JwtSecret;

use crate::infra::csv::CsvLocationParser;
use crate::infra::db::{
    DbConfirmationTokenRepository, DbFavouriteRepository, DbLocationRepository, DbUserRepository,
};
use crate::infra::mailer::AppMailer;
use crate::infra::password::Argon2PasswordEncoder;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub access_token_ttl_secs: u64,
    pub public_url: String,
    pub mailer: AppMailer,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn location_repo(&self) -> DbLocationRepository {
        DbLocationRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn favourite_repo(&self) -> DbFavouriteRepository {
        DbFavouriteRepository {
            db: self.db.clone(),
        }
    }

    pub fn confirmation_token_repo(&self) -> DbConfirmationTokenRepository {
        DbConfirmationTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_encoder(&self) -> Argon2PasswordEncoder {
        Argon2PasswordEncoder
    }

    pub fn location_parser(&self) -> CsvLocationParser {
        CsvLocationParser
    }
}
