//! MySQL-backed credential lookup.
//!
//! The hospital schema stores both the login identifier and the password with
//! `AES_ENCRYPT`, each under its own key. The row is located by encrypting
//! the submitted identifier, and the password is returned decrypted so the
//! domain can compare it in constant time.

use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialRepository, CredentialRepositoryError};
use crate::domain::{DoctorCode, DoctorIdentity, StoredCredential};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::CredentialRow;
use super::pool::DbPool;

/// AES keys protecting the credential columns.
#[derive(Clone)]
pub struct CredentialKeys {
    id_key: Zeroizing<String>,
    password_key: Zeroizing<String>,
}

impl CredentialKeys {
    /// Keys for the login identifier and password columns respectively.
    pub fn new(id_key: impl Into<String>, password_key: impl Into<String>) -> Self {
        Self {
            id_key: Zeroizing::new(id_key.into()),
            password_key: Zeroizing::new(password_key.into()),
        }
    }
}

/// Diesel-backed implementation of [`CredentialRepository`].
#[derive(Clone)]
pub struct DieselCredentialRepository {
    pool: DbPool,
    keys: CredentialKeys,
}

impl DieselCredentialRepository {
    /// Create a repository that decrypts the credential columns in SQL with
    /// `keys`.
    pub fn new(pool: DbPool, keys: CredentialKeys) -> Self {
        Self { pool, keys }
    }
}

// Binds: id key, password key, id key, submitted identifier, id key.
const FIND_CREDENTIAL_SQL: &str = r"
SELECT
    CAST(AES_DECRYPT(u.id_user, ?) AS CHAR) AS id_user,
    CAST(AES_DECRYPT(u.password, ?) AS CHAR) AS password,
    d.kd_dokter,
    d.nm_dokter
FROM `user` u
JOIN dokter d ON d.kd_dokter = CAST(AES_DECRYPT(u.id_user, ?) AS CHAR)
WHERE u.id_user = AES_ENCRYPT(?, ?)
LIMIT 1
";

fn map_row(row: CredentialRow) -> Result<Option<StoredCredential>, CredentialRepositoryError> {
    let (Some(user_id), Some(password)) = (row.id_user, row.password) else {
        return Ok(None);
    };
    let code = DoctorCode::new(&row.kd_dokter)
        .map_err(|err| CredentialRepositoryError::query(format!("doctor row: {err}")))?;
    Ok(Some(StoredCredential {
        user_id,
        password: Zeroizing::new(password),
        doctor: DoctorIdentity {
            code,
            name: row.nm_dokter,
        },
    }))
}

#[async_trait::async_trait]
impl CredentialRepository for DieselCredentialRepository {
    async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<StoredCredential>, CredentialRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CredentialRepositoryError::connection))?;

        let rows: Vec<CredentialRow> = sql_query(FIND_CREDENTIAL_SQL)
            .bind::<Text, _>(self.keys.id_key.as_str())
            .bind::<Text, _>(self.keys.password_key.as_str())
            .bind::<Text, _>(self.keys.id_key.as_str())
            .bind::<Text, _>(user_id)
            .bind::<Text, _>(self.keys.id_key.as_str())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    CredentialRepositoryError::query,
                    CredentialRepositoryError::connection,
                )
            })?;

        match rows.into_iter().next() {
            Some(row) => map_row(row),
            None => Ok(None),
        }
    }
}
