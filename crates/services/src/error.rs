use campus_core::error::CoreError;
use campus_db::StoreError;

/// Errors returned by the domain services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Map a store-level `NotFound` for `id` to the domain error for `entity`,
/// passing every other store error through.
pub(crate) fn or_not_found<'a>(
    entity: &'static str,
    id: &'a str,
) -> impl FnOnce(StoreError) -> ServiceError + 'a {
    move |err| match err {
        StoreError::NotFound { .. } => CoreError::not_found(entity, id).into(),
        other => other.into(),
    }
}
