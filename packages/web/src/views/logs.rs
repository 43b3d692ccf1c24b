use dioxus::prelude::*;
use ui::views::LogsView;

#[component]
pub fn Logs() -> Element {
    rsx! {
        LogsView {}
    }
}
