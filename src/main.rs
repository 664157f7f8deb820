use log::{info, Level};
use stylist::yew::Global;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod session;
mod tracking;

mod behavior {
    pub mod anchors;
    pub mod boot;
    pub mod engagement;
    pub mod forms;
    pub mod header;
    pub mod interactions;
    pub mod lazy;
    pub mod reveal;
    pub mod support;
}

mod pages {
    pub mod landing;
    pub mod method;
}

use config::BehaviorConfig;
use pages::{landing::Landing, method::Method};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/method")]
    Method,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Landing page");
            html! { <Landing /> }
        }
        Route::Method => {
            info!("Rendering Method page");
            html! { <Method /> }
        }
    }
}

/// The style block the behavior layer depends on: pending/revealed reveal
/// states, the scrolled header treatment and the animation keyframes. The
/// transition duration comes from the same config the controllers read.
fn behavior_styles(config: &BehaviorConfig) -> String {
    format!(
        r#"
        .fade-in {{
            opacity: 0;
            transform: translateY(24px);
            transition: opacity {duration}ms ease-out, transform {duration}ms ease-out;
        }}
        .fade-in.visible {{
            opacity: 1;
            transform: none;
        }}
        .site-header {{
            position: fixed;
            top: 0;
            width: 100%;
            background: transparent;
            transition: background 200ms ease, box-shadow 200ms ease;
            z-index: 10;
        }}
        .site-header.scrolled {{
            background: #ffffff;
            box-shadow: 0 2px 12px rgba(0, 0, 0, 0.12);
        }}
        .hero-symbol {{
            display: inline-block;
            animation: symbol-drift 6s ease-in-out infinite alternate;
        }}
        .stat-number {{
            display: inline-block;
            font-size: 2.4rem;
            font-weight: 700;
        }}
        .path-opening {{
            opacity: 0;
        }}
        input.error, textarea.error {{
            border-color: #c0392b;
        }}
        @keyframes symbol-drift {{
            from {{ transform: translateY(0); }}
            to {{ transform: translateY(-14px); }}
        }}
        @keyframes path-opening {{
            from {{ opacity: 0; clip-path: inset(0 50% 0 50%); }}
            to {{ opacity: 1; clip-path: inset(0 0 0 0); }}
        }}
        @keyframes rainbow {{
            0% {{ filter: hue-rotate(0deg); }}
            100% {{ filter: hue-rotate(360deg); }}
        }}
        @media (prefers-reduced-motion: reduce) {{
            .fade-in {{ transition: none; }}
            .hero-symbol {{ animation: none; }}
        }}
        "#,
        duration = config.animation_ms
    )
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Global css={behavior_styles(&BehaviorConfig::default())} />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
