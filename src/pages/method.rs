use yew::prelude::*;
use yew_router::prelude::*;

use crate::behavior::boot::{self, PageProfile};
use crate::Route;

/// The second page variant: same behavior layer, different targets, adding
/// the nested stagger inside each process step and the one-shot counter
/// pulse on the stats section.
#[function_component(Method)]
pub fn method() -> Html {
    use_effect_with_deps(|_| boot::attach(PageProfile::method()), ());

    html! {
        <div class="method-page">
            <header id="header" class="site-header">
                <nav class="site-nav">
                    <Link<Route> to={Route::Home} classes="nav-logo">
                        {"Openpath"}
                    </Link<Route>>
                    <div class="nav-links">
                        <a href="#steps" class="nav-link">{"The steps"}</a>
                        <a href="#results" class="nav-link">{"Results"}</a>
                        <a href="#contact" class="nav-cta">{"Book a call"}</a>
                    </div>
                </nav>
            </header>

            <section class="hero hero-compact">
                <span class="hero-symbol symbol-compass">{"✦"}</span>
                <span class="hero-symbol symbol-spark">{"✳"}</span>
                <div class="hero-content">
                    <h1>{"The method, step by step"}</h1>
                    <p class="hero-subtitle">
                        {"No framework worship. A short, explicit loop we repeat \
                          until the goal is behind you."}
                    </p>
                </div>
            </section>

            <section id="steps" class="process-section">
                <h2>{"The loop"}</h2>
                <div class="process-step">
                    <h3>{"Name the real blocker"}</h3>
                    <p class="stagger-item">{"Not the symptom you arrived with."}</p>
                    <p class="stagger-item">{"Written down, in one sentence, agreed by both of us."}</p>
                    <p class="stagger-item">{"Revisited every session until it stops being true."}</p>
                </div>
                <div class="process-step">
                    <h3>{"Pick the smallest next move"}</h3>
                    <p class="stagger-item">{"Something finishable before the next session."}</p>
                    <p class="stagger-item">{"Scoped so that failing it still teaches us something."}</p>
                </div>
                <div class="process-step">
                    <h3>{"Review and repeat"}</h3>
                    <p class="stagger-item">{"What moved, what did not, what that changes."}</p>
                    <p class="stagger-item">{"The loop ends when the goal does, not at an hour count."}</p>
                </div>
            </section>

            <section id="results" class="stats-section">
                <h2>{"Where that lands"}</h2>
                <div class="card-grid">
                    <div class="stat-item">
                        <span class="stat-number">{"9"}</span>
                        <span class="stat-label">{"weeks, median engagement"}</span>
                    </div>
                    <div class="stat-item">
                        <span class="stat-number">{"140"}</span>
                        <span class="stat-label">{"engagements completed"}</span>
                    </div>
                    <div class="stat-item">
                        <span class="stat-number">{"92%"}</span>
                        <span class="stat-label">{"reached the goal we wrote down"}</span>
                    </div>
                </div>
            </section>

            <section class="faq-section">
                <h2>{"Common doubts"}</h2>
                <div class="faq-item">
                    <h3 class="faq-question">{"What if the blocker changes mid-way?"}</h3>
                    <p class="faq-answer">{"Then we rename it. The loop does not care; it \
                        only needs one true sentence to aim at."}</p>
                </div>
                <div class="faq-item">
                    <h3 class="faq-question">{"Is this therapy?"}</h3>
                    <p class="faq-answer">{"No. When a blocker belongs in a clinician's \
                        room we say so and refer you."}</p>
                </div>
            </section>

            <section id="contact" class="contact-section">
                <h2>{"See it applied to your case"}</h2>
                <div class="contact-actions">
                    <a href="tel:+33612345678" class="contact-button phone">
                        {"Call +33 6 12 34 56 78"}
                    </a>
                    <a href="https://wa.me/33612345678" class="contact-button whatsapp">
                        {"Message on WhatsApp"}
                    </a>
                </div>
            </section>

            <footer class="site-footer">
                <p>{"© 2026 Openpath Coaching"}</p>
            </footer>
        </div>
    }
}
