//! App Router

use salvo::Router;

use crate::{carts, healthcheck, observability};

/// Routes served by the API, without middleware or documentation routes.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("carts").get(carts::index::handler))
        .push(
            Router::with_path("cart")
                .post(carts::create::handler)
                .push(
                    Router::with_path("{cart}")
                        .get(carts::get::handler)
                        .post(carts::items::create::handler)
                        .delete(carts::delete::handler)
                        .push(
                            Router::with_path("item/{item}")
                                .delete(carts::items::delete::handler),
                        ),
                ),
        )
}
