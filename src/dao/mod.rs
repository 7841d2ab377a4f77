/// Persisted key shapes shared by every backend.
pub mod keys;
/// Quiz flag and ranked player storage backends.
pub mod quiz_store;
/// Backend-independent storage errors.
pub mod storage;
