use std::rc::Rc;

use console::{sanitize_return_to, GuardDecision, RouteGuard};
use dioxus::prelude::*;
use ui::{use_auth, use_session_manager, ErrorBanner, Header, NavSection, SideNav, VerifyingScreen};

use crate::Route;

fn section_of(route: &Route) -> Option<NavSection> {
    match route {
        Route::Dashboard {} => Some(NavSection::Dashboard),
        Route::Users {} => Some(NavSection::Users),
        Route::Logs {} => Some(NavSection::Logs),
        _ => None,
    }
}

pub(crate) fn route_of(section: NavSection) -> Route {
    match section {
        NavSection::Dashboard => Route::Dashboard {},
        NavSection::Users => Route::Users {},
        NavSection::Logs => Route::Logs {},
    }
}

/// Shell around every signed-in page. Unauthenticated visitors are sent to
/// the login page with the route they asked for.
#[component]
pub fn ProtectedLayout() -> Element {
    let auth = use_auth();
    let manager = use_session_manager();
    let nav = use_navigator();
    let route = use_route::<Route>();
    let guard = use_hook(|| Rc::new(RouteGuard::new()));

    // Quietly re-check the cookie whenever the shell mounts
    let requested = route.to_string();
    use_hook(move || {
        spawn(async move {
            if !manager.check_auth(true).await {
                nav.replace(Route::Login {
                    from: sanitize_return_to(&requested),
                });
            }
        })
    });

    let session = auth();
    let decision = guard.evaluate(&session, &route.to_string());
    let shell_error = session.signed_in_error().map(str::to_string);
    let redirect = decision.clone();
    use_effect(use_reactive!(|redirect| {
        if let GuardDecision::Redirect { from } = redirect {
            nav.replace(Route::Login { from });
        }
    }));

    match decision {
        GuardDecision::ShowVerifying => rsx! {
            VerifyingScreen {}
        },
        GuardDecision::Redirect { .. } | GuardDecision::Hold => rsx! {},
        GuardDecision::Render => rsx! {
            div {
                class: "console-shell",
                Header {
                    on_logged_out: move |_| {
                        nav.replace(Route::Login { from: String::new() });
                    },
                }
                div {
                    class: "console-body",
                    SideNav {
                        active: section_of(&route),
                        on_navigate: move |section: NavSection| {
                            nav.push(route_of(section));
                        },
                    }
                    main {
                        class: "console-main",
                        if let Some(message) = shell_error {
                            ErrorBanner { message: message }
                        }
                        Outlet::<Route> {}
                    }
                }
            }
        },
    }
}
