//! Root component: loads config, owns the widget state and arms auto-open.

use std::sync::Arc;

use leptos::prelude::*;

use crate::components::chat_widget::ChatWidget;
use crate::config::WidgetConfig;
use crate::controller::ChatController;
use crate::net::api::HttpChatClient;
use crate::state::widget::WidgetState;

/// Controller wired to the HTTP client and the reactive widget state.
pub type WidgetController = ChatController<HttpChatClient, RwSignal<WidgetState>>;

/// Root application component.
///
/// Provides the widget state as context and schedules the one-shot
/// auto-open timer.
#[component]
pub fn App() -> impl IntoView {
    let config = Arc::new(WidgetConfig::load());
    let state = RwSignal::new(WidgetState::default());
    provide_context(state);

    let controller: WidgetController = ChatController::new(HttpChatClient::from_config(&config), state, config);

    #[cfg(feature = "csr")]
    {
        let controller = controller.clone();
        let delay_ms = controller.config().auto_open_delay_ms;
        leptos::task::spawn_local(async move {
            controller.run_auto_open(gloo_timers::future::TimeoutFuture::new(delay_ms)).await;
        });
    }

    view! { <ChatWidget controller=controller/> }
}
