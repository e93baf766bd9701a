//! Translation of SeaORM/driver errors into [`RepoError`].

use sea_orm::{DbErr, RuntimeErr};

use newsroom_core::error::RepoError;

/// `modifying_sql_data_not_permitted`
const SQLSTATE_MODIFICATION_NOT_PERMITTED: &str = "2F002";
/// Class 23: integrity constraint violation.
const SQLSTATE_CONSTRAINT_CLASS: &str = "23";

pub(crate) fn classify(err: DbErr) -> RepoError {
    match &err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => RepoError::Connection(err.to_string()),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        _ => match sqlstate(&err) {
            Some(code) => from_sqlstate(&code, err.to_string()),
            None => RepoError::Query(err.to_string()),
        },
    }
}

pub(crate) fn from_sqlstate(code: &str, message: String) -> RepoError {
    if code == SQLSTATE_MODIFICATION_NOT_PERMITTED {
        RepoError::ModificationNotPermitted(message)
    } else if code.starts_with(SQLSTATE_CONSTRAINT_CLASS) {
        RepoError::Constraint(message)
    } else {
        RepoError::Query(message)
    }
}

fn sqlstate(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code.into_owned()),
        _ => None,
    }
}
