//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, SqlErr, TransactionTrait, sea_query::OnConflict,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{
    chain_active_model, model_to_user, store_active_model, venue_active_model,
};
use crate::errors::{Result, VenueError};
use crate::storage::models::{InsertOutcome, NewUser, User, VenueSeed};

use migration::entities::{chain, store, user, venue};

/// 按主键插入，已存在则什么都不做
async fn insert_chain_if_absent<C: ConnectionTrait>(
    db: &C,
    chain_id: &str,
    chain_name: &str,
) -> std::result::Result<u64, DbErr> {
    chain::Entity::insert(chain_active_model(chain_id, chain_name))
        .on_conflict(
            OnConflict::column(chain::Column::ChainId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
}

async fn insert_store_if_absent<C: ConnectionTrait>(
    db: &C,
    chain_id: &str,
    seed: &crate::storage::models::StoreSeed,
) -> std::result::Result<u64, DbErr> {
    store::Entity::insert(store_active_model(chain_id, seed))
        .on_conflict(
            OnConflict::columns([store::Column::ChainId, store::Column::StoreId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
}

impl SeaOrmStorage {
    /// 导入一行：chain -> store -> entity，均按自然键去重
    ///
    /// 三次写入在同一个事务内；entity 已存在时返回 `AlreadyExists`。
    pub async fn import_venue(&self, seed: &VenueSeed) -> Result<InsertOutcome> {
        let txn = self.db.begin().await?;

        insert_chain_if_absent(&txn, &seed.chain_id, &seed.chain_name).await?;

        let store_id = match &seed.store {
            Some(store_seed) => {
                insert_store_if_absent(&txn, &seed.chain_id, store_seed).await?;
                Some(store_seed.store_id.as_str())
            }
            None => None,
        };

        let inserted = venue::Entity::insert(venue_active_model(
            &seed.chain_id,
            store_id,
            &seed.entity,
        ))
        .on_conflict(
            OnConflict::column(venue::Column::EntityId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;

        if inserted == 0 {
            debug!("Entity {} already exists, skipped", seed.entity.entity_id);
            Ok(InsertOutcome::AlreadyExists)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    /// 新建用户，email 重复返回 Conflict
    pub async fn create_user(&self, new_user: NewUser) -> Result<User> {
        use sea_orm::ActiveValue::*;

        let email = new_user.email.clone();
        let model = user::ActiveModel {
            id: NotSet,
            name: Set(new_user.name),
            last_name: Set(new_user.last_name),
            email: Set(new_user.email),
            created_at: Set(Utc::now()),
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    VenueError::conflict(format!("User with email {} already exists", email))
                }
                _ => VenueError::from(e),
            })?;

        info!("User created: id={}, email={}", inserted.id, inserted.email);
        Ok(model_to_user(inserted))
    }

    /// 按 email upsert（更新姓名，保留创建时间）
    pub async fn upsert_user_by_email(&self, new_user: NewUser) -> Result<()> {
        use sea_orm::ActiveValue::*;

        let model = user::ActiveModel {
            id: NotSet,
            name: Set(new_user.name),
            last_name: Set(new_user.last_name),
            email: Set(new_user.email),
            created_at: Set(Utc::now()),
        };

        user::Entity::insert(model)
            .on_conflict(
                OnConflict::column(user::Column::Email)
                    .update_columns([user::Column::Name, user::Column::LastName])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }
}
