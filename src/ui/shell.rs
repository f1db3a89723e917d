use dioxus::prelude::*;

use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    rsx! {
        header {
            class: "shell-header",
            h1 { class: "shell-title", "{APP_NAME}" }
            span { class: "shell-version", "{version_label()}" }
        }
        main { class: "shell-main", {children} }
    }
}
