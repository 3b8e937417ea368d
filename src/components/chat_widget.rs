//! Collapsible chat panel: toggle button, transcript and message form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders straight from the `RwSignal<WidgetState>` owned by the controller
//! and routes every user action back through the controller. Scroll pinning,
//! input focus and the message list hang off memos of `transcript.revision()`
//! and `focus_seq`, so typing in the input never re-renders the transcript.

use leptos::prelude::*;

use crate::app::WidgetController;
use crate::state::transcript::{ConversationEntry, DisplayContent, EntryHandle, ProductLink};

#[component]
pub fn ChatWidget(controller: WidgetController) -> impl IntoView {
    let state = *controller.state();
    let copy = controller.config().copy.clone();

    let messages_ref = NodeRef::<leptos::html::Div>::new();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let revision = Memo::new(move |_| state.with(|w| w.transcript.revision()));
    let focus_seq = Memo::new(move |_| state.with(|w| w.focus_seq));
    let entries = Memo::new(move |_| {
        revision.track();
        state.with_untracked(|w| {
            w.transcript.iter().map(|(handle, entry)| (handle, entry.clone())).collect::<Vec<_>>()
        })
    });

    Effect::new(move || {
        revision.track();

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    Effect::new(move || {
        // Zero means nothing has asked for focus yet.
        if focus_seq.get() == 0 {
            return;
        }

        #[cfg(feature = "csr")]
        {
            if let Some(input_el) = input_ref.get() {
                let _ = input_el.focus();
            }
        }
    });

    let on_toggle = {
        let controller = controller.clone();
        move |_: leptos::ev::MouseEvent| {
            controller.toggle();
        }
    };

    let on_input = {
        let controller = controller.clone();
        move |ev: leptos::ev::Event| controller.set_input(event_target_value(&ev))
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let controller = controller.clone();
        leptos::task::spawn_local(async move {
            controller.submit_input().await;
        });
    };

    let visible = move || state.with(|w| w.panel.visible);
    let can_send = move || state.with(|w| !w.is_pending() && !w.input.trim().is_empty());

    view! {
        <div class="bv-chat">
            <button
                id="bv-chat-toggle"
                class="bv-chat__toggle"
                type="button"
                aria-controls="bv-chat-box"
                aria-expanded=move || visible().to_string()
                on:click=on_toggle
            >
                {copy.toggle_label}
            </button>

            <div id="bv-chat-box" class="bv-chat__box" hidden=move || !visible()>
                <div id="bv-chat-messages" class="bv-chat__messages" node_ref=messages_ref>
                    <For
                        each=move || entries.get()
                        key=|(handle, _): &(EntryHandle, ConversationEntry)| handle.key()
                        children=|(_, entry): (EntryHandle, ConversationEntry)| render_entry(entry)
                    />
                </div>

                <form id="bv-chat-form" class="bv-chat__form" on:submit=on_submit>
                    <input
                        id="bv-chat-input"
                        class="bv-chat__input"
                        type="text"
                        autocomplete="off"
                        placeholder=copy.input_placeholder
                        node_ref=input_ref
                        prop:value=move || state.with(|w| w.input.clone())
                        on:input=on_input
                    />
                    <button class="btn btn--primary bv-chat__send" type="submit" disabled=move || !can_send()>
                        {copy.send_label}
                    </button>
                </form>
            </div>
        </div>
    }
}

fn render_entry(entry: ConversationEntry) -> AnyView {
    let class = format!("bv-msg bv-msg-{}", entry.speaker.css_modifier());
    let thinking = entry.placeholder;
    match entry.content {
        DisplayContent::Text(text) => view! {
            <div class=class class:bv-msg--thinking=thinking>
                {text}
            </div>
        }
        .into_any(),
        DisplayContent::Products(list) => view! {
            <div class=class>
                <ul class="list-unstyled bv-chat__products">
                    {list.links().iter().cloned().map(render_link).collect::<Vec<_>>()}
                </ul>
            </div>
        }
        .into_any(),
    }
}

fn render_link(link: ProductLink) -> impl IntoView {
    view! {
        <li>
            <a href=link.href title=link.title>
                {link.image.map(|src| view! { <img class="bv-chat__thumb" src=src alt="" loading="lazy"/> })}
                <span>{link.label}</span>
            </a>
        </li>
    }
}
