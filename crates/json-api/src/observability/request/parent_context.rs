//! Parent trace context extraction from HTTP headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let extractor = HeaderExtractor(headers);

    global::get_text_map_propagator(|propagator| {
        // A fresh base context keeps requests without trace headers detached
        // from whatever span is active in-process.
        let context = propagator.extract_with_context(&Context::new(), &extractor);
        let is_valid = context.span().span_context().is_valid();

        is_valid.then_some(context)
    })
}

#[derive(Debug)]
struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
