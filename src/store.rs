use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::{
    entities::{movie, rating},
    error::{AppError, AppResult},
    models::{MovieFields, MovieInput, RatingInput},
};

#[derive(Debug)]
pub enum UpsertOutcome {
    Inserted(movie::Model),
    Updated(movie::Model),
}

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert or update the row owning `external_id`. The lookup and the
    /// write share one transaction; an error drops it, rolling back.
    pub async fn upsert(&self, external_id: &str, fields: MovieFields) -> AppResult<UpsertOutcome> {
        let now = now_sec();
        let txn = self.db.begin().await?;

        let existing = movie::Entity::find()
            .filter(movie::Column::ExternalId.eq(external_id))
            .one(&txn)
            .await?;

        let outcome = match existing {
            Some(model) => {
                let mut active: movie::ActiveModel = model.into();
                apply_fields(&mut active, fields);
                active.updated_at = Set(now);
                UpsertOutcome::Updated(active.update(&txn).await?)
            },
            None => {
                let mut active = movie::ActiveModel {
                    external_id: Set(Some(external_id.to_string())),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                apply_fields(&mut active, fields);
                UpsertOutcome::Inserted(active.insert(&txn).await?)
            },
        };

        txn.commit().await?;
        Ok(outcome)
    }

    pub async fn create(
        &self,
        external_id: Option<String>,
        fields: MovieFields,
    ) -> AppResult<movie::Model> {
        let now = now_sec();
        let mut active = movie::ActiveModel {
            external_id: Set(external_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_fields(&mut active, fields);
        Ok(active.insert(&self.db).await?)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<movie::Model>> {
        find_movie(&self.db, id).await
    }

    pub async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find()
            .filter(movie::Column::ExternalId.eq(external_id))
            .one(&self.db)
            .await?)
    }

    pub async fn list(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?)
    }

    /// Overwrites every user-editable column; catalog columns are untouched.
    pub async fn update(&self, id: i32, input: &MovieInput) -> AppResult<movie::Model> {
        let Some(model) = find_movie(&self.db, id).await? else {
            return Err(AppError::not_found("movie not found"));
        };

        let mut active: movie::ActiveModel = model.into();
        active.title = Set(input.title.clone());
        active.year = Set(input.year);
        active.genre = Set(input.genre.clone());
        active.director = Set(input.director.clone());
        active.updated_at = Set(now_sec());

        Ok(active.update(&self.db).await?)
    }

    /// Ratings of the movie are removed by the `ON DELETE CASCADE` key.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("movie not found"));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct RatingStore {
    db: DatabaseConnection,
}

impl RatingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: &RatingInput) -> AppResult<rating::Model> {
        let txn = self.db.begin().await?;

        if find_movie(&txn, input.movie_id).await?.is_none() {
            return Err(AppError::not_found("movie not found"));
        }

        let model = rating::ActiveModel {
            movie_id: Set(input.movie_id),
            name: Set(input.name.clone()),
            rate: Set(input.rate),
            description: Set(input.description.clone()),
            created_at: Set(now_sec()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(model)
    }

    /// Errors with `NotFound` only when the movie itself is missing; a movie
    /// without ratings yields an empty list.
    pub async fn list_for_movie(&self, movie_id: i32) -> AppResult<Vec<rating::Model>> {
        if find_movie(&self.db, movie_id).await?.is_none() {
            return Err(AppError::not_found("movie not found"));
        }

        Ok(rating::Entity::find()
            .filter(rating::Column::MovieId.eq(movie_id))
            .order_by_asc(rating::Column::Id)
            .all(&self.db)
            .await?)
    }
}

fn apply_fields(active: &mut movie::ActiveModel, fields: MovieFields) {
    let MovieFields { title, year, genre, director, plot, poster_url } = fields;
    active.title = Set(title);
    active.year = Set(year);
    active.genre = Set(genre);
    active.director = Set(director);
    active.plot = Set(plot);
    active.poster_url = Set(poster_url);
}

async fn find_movie<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<Option<movie::Model>> {
    Ok(movie::Entity::find_by_id(id).one(conn).await?)
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
