use phub_derive::phub_error;
use std::borrow::Cow;

#[phub_error]
pub enum FeedError {
    #[error("Feed parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Record not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal feed error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse_id(raw: &str) -> Result<i64, FeedError> {
    raw.parse::<i64>().context("Parsing carrier id")
}

fn main() {
    let err = parse_id("abc").unwrap_err();
    assert_eq!(err.kind(), "Parse");
    assert!(err.to_string().contains("(Parsing carrier id)"));

    let missing: Result<(), FeedError> =
        Err(FeedError::NotFound { message: "id 7".into(), context: None });
    let err = missing.context("Renaming").unwrap_err();
    assert_eq!(err.to_string(), "Record not found (Renaming): id 7");

    let internal: FeedError = "broken invariant".into();
    assert_eq!(internal.kind(), "Internal");

    let converted: FeedError = "12x".parse::<i64>().unwrap_err().into();
    assert!(matches!(converted, FeedError::Parse { context: None, .. }));
}
