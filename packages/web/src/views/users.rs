use dioxus::prelude::*;
use ui::views::UsersView;

#[component]
pub fn Users() -> Element {
    rsx! {
        UsersView {}
    }
}
