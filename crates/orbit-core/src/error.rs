use crate::scene::ObjectId;

/// Construction-time failures. Nothing in the per-frame path returns these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("invalid config: `{field}` must be {requirement} (got {value})")]
    InvalidConfig {
        field: &'static str,
        requirement: &'static str,
        value: f32,
    },
    #[error("unknown scene object {0}")]
    UnknownObject(ObjectId),
}
