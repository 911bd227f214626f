//! HTTP span helpers.

use uuid::Uuid;

const UUID_PLACEHOLDER: &str = "{uuid}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestSpanName {
    /// Route with identifier segments replaced, safe to use as a metric label.
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = normalise_route(path);
    let span_name = format!("{method} {route}");

    RequestSpanName { route, span_name }
}

fn normalise_route(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                UUID_PLACEHOLDER
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
