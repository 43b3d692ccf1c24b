use dioxus::prelude::*;
use ui::views::DashboardView;
use ui::NavSection;

use super::protected_layout::route_of;

#[component]
pub fn Dashboard() -> Element {
    let nav = use_navigator();

    rsx! {
        DashboardView {
            on_navigate: move |section: NavSection| {
                nav.push(route_of(section));
            },
        }
    }
}
