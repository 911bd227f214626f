//! Lenient integer query parameters.

use salvo::oapi::extract::QueryParam;

pub(crate) trait IntQueryExt {
    /// Parse the parameter as an integer, treating absent or malformed values as zero.
    fn into_i64_or_zero(self) -> i64;
}

impl IntQueryExt for QueryParam<String, false> {
    fn into_i64_or_zero(self) -> i64 {
        parse_or_zero(self.into_inner().as_deref())
    }
}

fn parse_or_zero(value: Option<&str>) -> i64 {
    value
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or_default()
}
