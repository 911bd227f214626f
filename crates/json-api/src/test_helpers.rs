//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use carts_app::{
    context::AppContext,
    domain::carts::{
        MockCartsService,
        models::{Cart, CartUuid},
    },
};

use crate::state::State;

pub(crate) fn make_cart() -> Cart {
    Cart {
        uuid: CartUuid::new(),
        total: 0,
        items: Vec::new(),
    }
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    State::from_app_context(AppContext::new(Arc::new(carts)))
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_carts(carts)))
            .push(route),
    )
}
