use yew::prelude::*;
use yew_router::prelude::*;

use crate::behavior::boot::{self, PageProfile};
use crate::Route;

#[function_component(Landing)]
pub fn landing() -> Html {
    // Attach the behavior layer once the page markup is in the DOM.
    use_effect_with_deps(|_| boot::attach(PageProfile::home()), ());

    html! {
        <div class="landing-page">
            <header id="header" class="site-header">
                <nav class="site-nav">
                    <Link<Route> to={Route::Home} classes="nav-logo">
                        {"Openpath"}
                    </Link<Route>>
                    <div class="nav-links">
                        <a href="#services" class="nav-link">{"Services"}</a>
                        <a href="#process" class="nav-link">{"How it works"}</a>
                        <Link<Route> to={Route::Method} classes="nav-link">
                            {"Our method"}
                        </Link<Route>>
                        <a href="#contact" class="nav-cta">{"Book a call"}</a>
                    </div>
                </nav>
            </header>

            <section class="hero">
                <span class="hero-symbol symbol-compass">{"✦"}</span>
                <span class="hero-symbol symbol-spark">{"✳"}</span>
                <span class="hero-symbol symbol-arrow">{"➤"}</span>
                <div class="hero-content">
                    <h1>{"When every option feels blocked, we open a path."}</h1>
                    <p class="hero-subtitle">
                        {"Career and transition coaching for people who know where \
                          they want to be but not how to get there."}
                    </p>
                    <a href="#contact" class="hero-cta">{"Start the conversation"}</a>
                </div>
                <div class="blocked-path">
                    <div class="path-wall"></div>
                    <div class="path-opening"></div>
                </div>
            </section>

            <section id="services" class="services-section">
                <h2>{"What we do"}</h2>
                <div class="card-grid">
                    <div class="service-card">
                        <h3>{"Individual coaching"}</h3>
                        <p>{"Twelve weeks, one goal, weekly sessions. You leave with a \
                             plan you have already started executing."}</p>
                    </div>
                    <div class="service-card">
                        <h3>{"Career transitions"}</h3>
                        <p>{"From first doubt to signed offer. Positioning, narrative \
                             and negotiation, handled together."}</p>
                    </div>
                    <div class="service-card">
                        <h3>{"Team workshops"}</h3>
                        <p>{"Half-day formats that surface what your team avoids \
                             saying in the weekly meeting."}</p>
                    </div>
                </div>
            </section>

            <section id="process" class="process-section">
                <h2>{"How it works"}</h2>
                <div class="process-step">
                    <span class="step-index">{"1"}</span>
                    <p>{"A free intake call. We decide together whether this is a fit."}</p>
                </div>
                <div class="process-step">
                    <span class="step-index">{"2"}</span>
                    <p>{"A written roadmap within a week, with the first concrete step."}</p>
                </div>
                <div class="process-step">
                    <span class="step-index">{"3"}</span>
                    <p>{"Weekly sessions until the goal is done, not until the hours run out."}</p>
                </div>
            </section>

            <section class="testimonials-section">
                <h2>{"What clients say"}</h2>
                <div class="card-grid">
                    <div class="testimonial-card">
                        <p>{"\"Six months of circling, resolved in three sessions. I \
                             wish I had called earlier.\""}</p>
                        <span class="testimonial-author">{"— M., product lead"}</span>
                    </div>
                    <div class="testimonial-card">
                        <p>{"\"The roadmap alone was worth it. The accountability is \
                             what actually got me across.\""}</p>
                        <span class="testimonial-author">{"— S., founder"}</span>
                    </div>
                </div>
            </section>

            <section class="faq-section">
                <h2>{"Questions we hear a lot"}</h2>
                <div class="faq-item">
                    <h3 class="faq-question">{"How long does an engagement last?"}</h3>
                    <p class="faq-answer">{"Most run eight to twelve weeks. We stop when \
                        the goal is reached, not on a fixed date."}</p>
                </div>
                <div class="faq-item">
                    <h3 class="faq-question">{"Do you work remotely?"}</h3>
                    <p class="faq-answer">{"Yes. Sessions are by video or phone; workshops \
                        are on site."}</p>
                </div>
                <div class="faq-item">
                    <h3 class="faq-question">{"What does it cost?"}</h3>
                    <p class="faq-answer">{"Fixed per engagement, quoted after the intake \
                        call. No surprises afterwards."}</p>
                </div>
            </section>

            <section id="contact" class="contact-section">
                <h2>{"Talk to us"}</h2>
                <p>{"The intake call is free and takes twenty minutes."}</p>
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
