use async_trait::async_trait;
use common::{Amount, TransactionId, UserId};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::{MembershipError, Result};
use crate::store::MembershipStore;
use crate::user::{Credentials, ProfileUpdate, User};
use crate::wallet::{Transaction, TransactionKind, WalletAccount};

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// SQLSTATE raised when `balance + amount` leaves the BIGINT range.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

const USER_COLUMNS: &str =
    "id, full_name, email, phone, location, tier, points, balance, status, created_at";

/// PostgreSQL-backed membership store.
///
/// Wallet mutations run in a single database transaction: a conditional
/// balance update (debits only match rows whose balance covers the amount)
/// followed by the ledger insert. The row lock taken by the update serializes
/// concurrent debits of the same wallet.
#[derive(Clone)]
pub struct PostgresMembershipStore {
    pool: PgPool,
}

impl PostgresMembershipStore {
    /// Creates a new store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_user(row: &PgRow) -> Result<User> {
        Ok(User {
            id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            location: row.try_get("location")?,
            tier: row.try_get("tier")?,
            points: row.try_get("points")?,
            balance: Amount::new(row.try_get("balance")?),
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_transaction(row: &PgRow) -> Result<Transaction> {
        let kind: String = row.try_get("kind")?;
        let kind = kind
            .parse::<TransactionKind>()
            .map_err(|e| MembershipError::Database(sqlx::Error::Decode(e.into())))?;

        Ok(Transaction {
            id: TransactionId::from_uuid(row.try_get::<Uuid, _>("id")?),
            owner: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
            kind,
            amount: Amount::new(row.try_get("amount")?),
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn map_email_conflict(err: sqlx::Error, email: &str) -> MembershipError {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
        {
            return MembershipError::EmailTaken(email.to_string());
        }
        MembershipError::Database(err)
    }

    fn map_balance_overflow(err: sqlx::Error) -> MembershipError {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE)
        {
            return MembershipError::AmountOverflow;
        }
        MembershipError::Database(err)
    }
}

#[async_trait]
impl MembershipStore for PostgresMembershipStore {
    async fn insert_user(&self, user: User, password_hash: String) -> Result<User> {
        sqlx::query(
            r#"
            INSERT INTO users (id, full_name, email, password_hash, phone, location, tier, points, balance, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&password_hash)
        .bind(&user.phone)
        .bind(&user.location)
        .bind(&user.tier)
        .bind(user.points)
        .bind(user.balance.value())
        .bind(&user.status)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_email_conflict(e, &user.email))?;

        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Credentials {
                user: Self::row_to_user(&row)?,
                password_hash: row.try_get("password_hash")?,
            })),
            None => Ok(None),
        }
    }

    async fn update_profile(&self, id: UserId, update: ProfileUpdate) -> Result<User> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                full_name = COALESCE($3, full_name),
                phone = COALESCE($4, phone),
                location = COALESCE($5, location)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(update.email.as_deref())
        .bind(update.full_name.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.location.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_email_conflict(e, update.email.as_deref().unwrap_or_default()))?;

        match row {
            Some(row) => Self::row_to_user(&row),
            None => Err(MembershipError::UserNotFound(id)),
        }
    }

    async fn apply_transaction(&self, transaction: Transaction) -> Result<WalletAccount> {
        let owner = transaction.owner;
        let amount = transaction.amount;

        let mut tx = self.pool.begin().await?;

        let update_sql = match transaction.kind {
            TransactionKind::TopUp => {
                "UPDATE users SET balance = balance + $1 WHERE id = $2 RETURNING balance"
            }
            TransactionKind::Payment => {
                "UPDATE users SET balance = balance - $1 WHERE id = $2 AND balance >= $1 RETURNING balance"
            }
        };

        let new_balance: Option<i64> = sqlx::query_scalar(update_sql)
            .bind(amount.value())
            .bind(owner.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(Self::map_balance_overflow)?;

        let Some(new_balance) = new_balance else {
            // Nothing matched: either no such member or not enough balance.
            let current: Option<i64> =
                sqlx::query_scalar("SELECT balance FROM users WHERE id = $1")
                    .bind(owner.as_uuid())
                    .fetch_optional(&mut *tx)
                    .await?;

            return Err(match current {
                None => MembershipError::UserNotFound(owner),
                Some(balance) => MembershipError::InsufficientFunds {
                    balance: Amount::new(balance),
                    requested: amount,
                },
            });
        };

        sqlx::query(
            r#"
            INSERT INTO wallet_transactions (id, user_id, kind, amount, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(transaction.id.as_uuid())
        .bind(owner.as_uuid())
        .bind(transaction.kind.as_str())
        .bind(amount.value())
        .bind(&transaction.description)
        .bind(transaction.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(WalletAccount {
            owner,
            balance: Amount::new(new_balance),
        })
    }

    async fn transactions_for(&self, owner: UserId) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, kind, amount, description, created_at
            FROM wallet_transactions
            WHERE user_id = $1
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_transaction).collect()
    }
}
