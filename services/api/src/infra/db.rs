use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr, TransactionError, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr, OnConflict},
};
use uuid::Uuid;

use wayfinder_api_schema::{confirmation_tokens, favourite_locations, locations, users};
use wayfinder_domain::location::LocationType;
use wayfinder_domain::user::UserRole;

use crate::domain::repository::{
    ConfirmationTokenRepository, FavouriteRepository, LocationRepository, UserRepository,
};
use crate::domain::types::{ConfirmationToken, Location, LocationFilter, NewLocation, User};
use crate::error::ApiError;

// ── Location repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLocationRepository {
    pub db: DatabaseConnection,
}

impl LocationRepository for DbLocationRepository {
    async fn list_all(&self) -> Result<Vec<Location>, ApiError> {
        let models = locations::Entity::find()
            .order_by_asc(locations::Column::Id)
            .all(&self.db)
            .await
            .context("list locations")?;
        models.into_iter().map(location_from_model).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Location>, ApiError> {
        let model = locations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find location by id")?;
        model.map(location_from_model).transpose()
    }

    async fn search(&self, filter: &LocationFilter) -> Result<Vec<Location>, ApiError> {
        let mut query = locations::Entity::find();
        if let Some(text) = &filter.name_contains {
            let pattern = format!("%{}%", escape_like(&text.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(locations::Column::Name)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }
        if !filter.types.is_empty() {
            query = query.filter(
                locations::Column::LocationType.is_in(filter.types.iter().map(|t| t.as_str())),
            );
        }
        let models = query
            .order_by_asc(locations::Column::Id)
            .all(&self.db)
            .await
            .context("search locations")?;
        models.into_iter().map(location_from_model).collect()
    }

    async fn create(&self, location: &NewLocation) -> Result<Location, ApiError> {
        let model = new_location_model(location)
            .insert(&self.db)
            .await
            .context("create location")?;
        location_from_model(model)
    }

    async fn update(
        &self,
        id: i32,
        location: &NewLocation,
    ) -> Result<Option<Location>, ApiError> {
        let exists = locations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find location for update")?
            .is_some();
        if !exists {
            return Ok(None);
        }
        let mut am = new_location_model(location);
        am.id = Set(id);
        let model = am.update(&self.db).await.context("update location")?;
        location_from_model(model).map(Some)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = locations::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete location")?;
        Ok(result.rows_affected > 0)
    }

    async fn create_many(&self, new: &[NewLocation]) -> Result<Vec<Location>, ApiError> {
        let rows: Vec<locations::ActiveModel> = new.iter().map(new_location_model).collect();
        let models = self
            .db
            .transaction::<_, Vec<locations::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    let mut inserted = Vec::with_capacity(rows.len());
                    for row in rows {
                        inserted.push(row.insert(txn).await?);
                    }
                    Ok(inserted)
                })
            })
            .await
            .context("bulk insert locations")?;
        models.into_iter().map(location_from_model).collect()
    }
}

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn new_location_model(location: &NewLocation) -> locations::ActiveModel {
    locations::ActiveModel {
        id: NotSet,
        name: Set(location.name.clone()),
        description: Set(location.description.clone()),
        location_type: Set(location.location_type.as_str().to_owned()),
        lat: Set(location.lat),
        lon: Set(location.lon),
    }
}

fn location_from_model(model: locations::Model) -> Result<Location, ApiError> {
    let location_type = model
        .location_type
        .parse::<LocationType>()
        .with_context(|| format!("location {} has an unreadable type", model.id))?;
    Ok(Location {
        id: model.id,
        name: model.name,
        description: model.description,
        location_type,
        lat: model.lat,
        lon: model.lon,
    })
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create_with_token(
        &self,
        user: &User,
        token: &ConfirmationToken,
    ) -> Result<(), ApiError> {
        let user_am = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(i16::from(user.role.as_u8())),
            enabled: Set(user.enabled),
            locked: Set(user.locked),
            created_at: Set(user.created_at),
        };
        let token_am = confirmation_tokens::ActiveModel {
            id: Set(token.id),
            token: Set(token.token.clone()),
            user_id: Set(token.user_id),
            created_at: Set(token.created_at),
            expires_at: Set(token.expires_at),
            confirmed_at: Set(token.confirmed_at),
        };
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    user_am.insert(txn).await?;
                    token_am.insert(txn).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
            })
            .map_err(user_insert_error)
    }
}

/// A concurrent registration for the same email loses on the unique index.
fn user_insert_error(e: DbErr) -> ApiError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return ApiError::UserAlreadyExists;
    }
    anyhow::Error::new(e)
        .context("create user with confirmation token")
        .into()
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .with_context(|| format!("user {} has unknown role {}", model.id, model.role))?;
    Ok(User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        role,
        enabled: model.enabled,
        locked: model.locked,
        created_at: model.created_at,
    })
}

// ── Favourite repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavouriteRepository {
    pub db: DatabaseConnection,
}

impl FavouriteRepository for DbFavouriteRepository {
    async fn list_location_ids(&self, user_id: Uuid) -> Result<Vec<i32>, ApiError> {
        let models = favourite_locations::Entity::find()
            .filter(favourite_locations::Column::UserId.eq(user_id))
            .order_by_asc(favourite_locations::Column::LocationId)
            .all(&self.db)
            .await
            .context("list favourite locations")?;
        Ok(models.into_iter().map(|m| m.location_id).collect())
    }

    async fn contains(&self, user_id: Uuid, location_id: i32) -> Result<bool, ApiError> {
        let model = favourite_locations::Entity::find_by_id((user_id, location_id))
            .one(&self.db)
            .await
            .context("find favourite location")?;
        Ok(model.is_some())
    }

    async fn add(&self, user_id: Uuid, location_id: i32) -> Result<(), ApiError> {
        let am = favourite_locations::ActiveModel {
            user_id: Set(user_id),
            location_id: Set(location_id),
            created_at: Set(Utc::now()),
        };
        favourite_locations::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([
                    favourite_locations::Column::UserId,
                    favourite_locations::Column::LocationId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("add favourite location")?;
        Ok(())
    }

    async fn remove(&self, user_id: Uuid, location_id: i32) -> Result<bool, ApiError> {
        let result = favourite_locations::Entity::delete_by_id((user_id, location_id))
            .exec(&self.db)
            .await
            .context("remove favourite location")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Confirmation token repository ────────────────────────────────────────────

#[derive(Clone)]
pub struct DbConfirmationTokenRepository {
    pub db: DatabaseConnection,
}

impl ConfirmationTokenRepository for DbConfirmationTokenRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<ConfirmationToken>, ApiError> {
        let model = confirmation_tokens::Entity::find()
            .filter(confirmation_tokens::Column::Token.eq(token))
            .one(&self.db)
            .await
            .context("find confirmation token")?;
        Ok(model.map(|m| ConfirmationToken {
            id: m.id,
            token: m.token,
            user_id: m.user_id,
            created_at: m.created_at,
            expires_at: m.expires_at,
            confirmed_at: m.confirmed_at,
        }))
    }

    async fn confirm(
        &self,
        token: &ConfirmationToken,
        at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let token_am = confirmation_tokens::ActiveModel {
            id: Set(token.id),
            confirmed_at: Set(Some(at)),
            ..Default::default()
        };
        let user_am = users::ActiveModel {
            id: Set(token.user_id),
            enabled: Set(true),
            ..Default::default()
        };
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    token_am.update(txn).await?;
                    user_am.update(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("confirm token and enable user")?;
        Ok(())
    }
}
