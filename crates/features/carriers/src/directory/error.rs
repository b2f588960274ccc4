use std::borrow::Cow;

/// Failures of the dynamic carrier directory and its backing store.
#[phub_derive::phub_error]
pub enum DirectoryError {
    /// No record matches the targeted id.
    #[error("Dynamic carrier not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The backing store failed to answer.
    #[error("Dynamic carrier store error{}: {message}", format_context(.context))]
    Store { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// A feed snapshot could not be decoded.
    #[error("Dynamic carrier feed error{}: {source}", format_context(.context))]
    Serialize { source: serde_json::Error, context: Option<Cow<'static, str>> },
    #[error("Internal directory error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
