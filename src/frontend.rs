use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{
    window, Element, FocusEvent, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent,
    MouseEvent,
};
use yew::prelude::*;

use crate::{
    config::Config,
    contact::{ContactForm, HandoffGuard, HANDOFF_MESSAGE, RECIPIENT},
    content::{
        AiCard, Certification, Project, Skill, Stat, ABOUT_STATS, AI_CARDS, AI_SPECIALIZATIONS, AI_STATS,
        CERTIFICATIONS, INITIAL_SECTION, NAV_ENTRIES, PROJECTS, SECTION_ORDER, SKILLS, TYPING_PHRASES,
    },
    counter::{unit_suffix, CounterRamp},
    dom,
    effects::{
        card_animation_delay, card_transform, parallax_offset, skill_width, skip_link_style, stagger_delay,
        tech_item_transform, translate_y, ShapeTiming, AI_STAT_START_DELAY_MS, GLOW_HOLD_MS, GLOW_SHADOW,
        GLOW_STAGGER_MS, PRELOADER_FADE_MS, PRESS_SETTLE_MS, PRESS_TRANSFORM, SETTLED_TRANSFORM, SKILL_BAR_STAGGER_MS,
    },
    logging::{log_event, LogLevel},
    notify::Severity,
    scroll::{
        fragment_target, locate_section, navbar_scrolled, neighbor_section, scroll_top_visible, Direction,
        SectionCursor,
    },
    theme::Theme,
    typing::{Typewriter, TypingTimings},
};

const RESIZE_DEBOUNCE_MS: u32 = 250;
const SECTION_REVEAL_THRESHOLD: f64 = 0.5;
const AI_STAT_THRESHOLD: f64 = 0.5;
const AI_GLOW_THRESHOLD: f64 = 0.3;
const LAZY_IMAGE_THRESHOLD: f64 = 0.0;
const SHAPE_COUNT: usize = 4;

/// Shared, read-only page settings.
#[derive(Clone, PartialEq)]
struct PageContext {
    config: Rc<Config>,
    /// Built-in reveal classes are used when no scroll library took over.
    reveal_fallback: bool,
}

#[hook]
fn use_page() -> PageContext {
    use_context::<PageContext>().unwrap_or_else(|| PageContext {
        config: Rc::new(Config::default()),
        reveal_fallback: true,
    })
}

/// Vertical scroll offset, sampled at most once per `throttle_ms`.
#[hook]
fn use_scroll_y(throttle_ms: u32) -> f64 {
    let scroll_y = use_state_eq(dom::scroll_y);

    {
        let scroll_y = scroll_y.clone();
        use_effect_with(throttle_ms, move |throttle_ms| {
            let listener =
                dom::throttled_window_listener("scroll", *throttle_ms, move || scroll_y.set(dom::scroll_y()));
            move || drop(listener)
        });
    }

    *scroll_y
}

/// Flips to `true` the first time `node` reaches `threshold` visibility and
/// stays there.
#[hook]
fn use_reveal_once(node: NodeRef, threshold: f64) -> bool {
    let revealed = use_state_eq(|| false);

    {
        let revealed = revealed.clone();
        use_effect_with(node, move |node| {
            let watch = node
                .cast::<Element>()
                .and_then(|element| dom::watch_visibility(&element, threshold, move || revealed.set(true)));
            move || drop(watch)
        });
    }

    *revealed
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: Rc<Config>,
    reveal_fallback: bool,
}

#[derive(Properties, PartialEq)]
struct AnchorLinkProps {
    href: AttrValue,
    #[prop_or_default]
    class: Classes,
    on_navigate: Callback<AttrValue>,
    #[prop_or_default]
    children: Children,
}

/// In-page link that scrolls smoothly instead of jumping.
#[function_component(AnchorLink)]
fn anchor_link(props: &AnchorLinkProps) -> Html {
    let onclick = {
        let href = props.href.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |event: MouseEvent| {
            if let Some(id) = fragment_target(&href) {
                event.prevent_default();
                on_navigate.emit(AttrValue::from(id.to_string()));
            }
        })
    };

    html! {
        <a class={props.class.clone()} href={props.href.clone()} {onclick}>
            { for props.children.iter() }
        </a>
    }
}

#[function_component(SkipLink)]
fn skip_link() -> Html {
    let focused = use_state_eq(|| false);

    let onfocus = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| focused.set(true))
    };
    let onblur = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| focused.set(false))
    };

    let style = skip_link_style(*focused);

    html! {
        <a class="skip-link" href="#main-content" {style} {onfocus} {onblur}>
            {"Saltar al contenido principal"}
        </a>
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PreloaderPhase {
    Showing,
    Hiding,
    Gone,
}

#[function_component(Preloader)]
fn preloader() -> Html {
    let page = use_page();
    let phase = use_state_eq(|| PreloaderPhase::Showing);

    {
        let phase = phase.clone();
        let delay = page.config.preloader_delay;
        use_effect_with((), move |_| {
            let mut current = PreloaderPhase::Showing;
            let chain = dom::TimerChain::start(delay, move || match current {
                PreloaderPhase::Showing => {
                    current = PreloaderPhase::Hiding;
                    phase.set(current);
                    dom::restore_body_scroll();
                    Some(PRELOADER_FADE_MS)
                }
                PreloaderPhase::Hiding | PreloaderPhase::Gone => {
                    current = PreloaderPhase::Gone;
                    phase.set(current);
                    None
                }
            });
            move || drop(chain)
        });
    }

    if *phase == PreloaderPhase::Gone {
        return html! {};
    }

    html! {
        <div
            id="preloader"
            class={classes!("preloader", (*phase == PreloaderPhase::Hiding).then_some("hidden"))}
            aria-hidden="true"
        >
            <div class="loader"></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NavBarProps {
    active: Option<AttrValue>,
    menu_open: bool,
    theme: Theme,
    on_navigate: Callback<AttrValue>,
    on_toggle_menu: Callback<()>,
    on_toggle_theme: Callback<()>,
}

#[function_component(NavBar)]
fn nav_bar(props: &NavBarProps) -> Html {
    let page = use_page();
    let scroll_y = use_scroll_y(page.config.scroll_throttle);

    let on_hamburger = {
        let on_toggle_menu = props.on_toggle_menu.clone();
        Callback::from(move |_: MouseEvent| on_toggle_menu.emit(()))
    };
    let on_theme = {
        let on_toggle_theme = props.on_toggle_theme.clone();
        Callback::from(move |_: MouseEvent| on_toggle_theme.emit(()))
    };

    let entries = NAV_ENTRIES.iter().map(|entry| {
        let is_active = props.active.as_deref() == Some(entry.id);
        html! {
            <li class="nav-item">
                <AnchorLink
                    href={format!("#{}", entry.id)}
                    class={classes!("nav-link", is_active.then_some("active"))}
                    on_navigate={props.on_navigate.clone()}
                >
                    {entry.label}
                </AnchorLink>
            </li>
        }
    });

    html! {
        <nav id="navbar" class={classes!("navbar", navbar_scrolled(scroll_y).then_some("scrolled"))}>
            <div class="nav-container">
                <AnchorLink href="#home" class={classes!("nav-logo")} on_navigate={props.on_navigate.clone()}>
                    {"JC"}
                </AnchorLink>
                <ul id="nav-menu" class={classes!("nav-menu", "nav-links", props.menu_open.then_some("active"))}>
                    { for entries }
                </ul>
                <button
                    class="theme-toggle"
                    type="button"
                    aria-label={props.theme.toggle_label()}
                    aria-pressed={props.theme.is_dark().to_string()}
                    onclick={on_theme}
                >
                    <span aria-hidden="true">{props.theme.icon()}</span>
                </button>
                <button
                    id="hamburger"
                    class={classes!("hamburger", props.menu_open.then_some("active"))}
                    type="button"
                    aria-label="Menú"
                    aria-expanded={props.menu_open.to_string()}
                    onclick={on_hamburger}
                >
                    <span class="bar"></span>
                    <span class="bar"></span>
                    <span class="bar"></span>
                </button>
            </div>
        </nav>
    }
}

#[function_component(TypingText)]
fn typing_text() -> Html {
    let page = use_page();
    let text = use_state(String::new);

    {
        let text = text.clone();
        let timings = TypingTimings::from_config(&page.config);
        use_effect_with((), move |_| {
            let chain = Typewriter::new(TYPING_PHRASES.iter().copied(), timings).map(|mut typewriter| {
                let first = typewriter.next_frame();
                text.set(first.text);
                dom::TimerChain::start(first.delay_ms, move || {
                    let frame = typewriter.next_frame();
                    text.set(frame.text);
                    Some(frame.delay_ms)
                })
            });
            move || drop(chain)
        });
    }

    html! {
        <span id="typing-text" class="typing-text">{(*text).clone()}</span>
    }
}

#[derive(Properties, PartialEq)]
struct SectionNavProps {
    on_navigate: Callback<AttrValue>,
}

#[function_component(Hero)]
fn hero(props: &SectionNavProps) -> Html {
    let page = use_page();
    let scroll_y = use_scroll_y(page.config.scroll_throttle);
    let shapes = use_memo((), |_| {
        (0..SHAPE_COUNT)
            .map(|_| ShapeTiming::from_samples(dom::random_unit(), dom::random_unit()))
            .collect::<Vec<_>>()
    });

    let parallax = format!("transform: {};", translate_y(parallax_offset(scroll_y)));

    html! {
        <section id="home" class="hero">
            <div class="hero-background" style={parallax.clone()}></div>
            <div class="floating-shapes" style={parallax}>
                { for shapes.iter().enumerate().map(|(index, timing)| html! {
                    <div class={classes!("shape", format!("shape-{}", index + 1))} style={timing.style()}></div>
                }) }
            </div>
            <div class="hero-content">
                <h1 class="hero-title">
                    {"Hola, soy "}<span class="highlight">{"José Cervera"}</span>
                </h1>
                <p class="hero-subtitle">
                    <TypingText />
                    <span class="cursor" aria-hidden="true">{"|"}</span>
                </p>
                <div class="hero-buttons">
                    <AnchorLink href="#projects" class={classes!("btn", "btn-primary")} on_navigate={props.on_navigate.clone()}>
                        {"Ver proyectos"}
                    </AnchorLink>
                    <AnchorLink href="#contact" class={classes!("btn", "btn-secondary")} on_navigate={props.on_navigate.clone()}>
                        {"Contactar"}
                    </AnchorLink>
                </div>
            </div>
        </section>
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
enum RevealKind {
    #[default]
    FadeIn,
    SlideLeft,
    SlideRight,
}

impl RevealKind {
    fn class(self) -> &'static str {
        match self {
            Self::FadeIn => "fade-in",
            Self::SlideLeft => "slide-in-left",
            Self::SlideRight => "slide-in-right",
        }
    }

    fn scroll_library_effect(self) -> &'static str {
        match self {
            Self::FadeIn => "fade-up",
            Self::SlideLeft => "fade-right",
            Self::SlideRight => "fade-left",
        }
    }
}

#[derive(Properties, PartialEq)]
struct RevealProps {
    #[prop_or_default]
    kind: RevealKind,
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    children: Children,
}

/// Wrapper that fades or slides its content in once it scrolls into view.
#[function_component(Reveal)]
fn reveal(props: &RevealProps) -> Html {
    let page = use_page();
    let node = use_node_ref();
    let visible = use_state_eq(|| false);

    {
        let visible = visible.clone();
        let enabled = page.reveal_fallback;
        let throttle_ms = page.config.scroll_throttle;
        use_effect_with(node.clone(), move |node| {
            let listener = node
                .cast::<Element>()
                .filter(|_| enabled)
                .and_then(|element| dom::reveal_when_in_view(element, throttle_ms, move || visible.set(true)));
            move || drop(listener)
        });
    }

    let fallback_classes = page
        .reveal_fallback
        .then(|| classes!(props.kind.class(), (*visible).then_some("visible")));

    html! {
        <div
            ref={node}
            class={classes!(fallback_classes, props.class.clone())}
            data-aos={props.kind.scroll_library_effect()}
        >
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CounterProps {
    target: u32,
    class: &'static str,
    start: bool,
    #[prop_or_default]
    start_delay_ms: u32,
    #[prop_or_default]
    suffix: Option<&'static str>,
}

/// Number that ramps from zero to its target once `start` turns on.
#[function_component(AnimatedCounter)]
fn animated_counter(props: &CounterProps) -> Html {
    let page = use_page();
    let display = use_state(|| String::from("0"));

    {
        let display = display.clone();
        let ramp = CounterRamp::from_config(props.target, &page.config).with_suffix(props.suffix);
        let step_ms = page.config.counter_step;
        let delay_ms = props.start_delay_ms;
        use_effect_with(props.start, move |start| {
            let chain = (*start).then(|| {
                let mut ramp = ramp;
                dom::TimerChain::start(delay_ms, move || {
                    let frame = ramp.tick();
                    display.set(frame.display);
                    (!frame.done).then_some(step_ms)
                })
            });
            move || drop(chain)
        });
    }

    html! {
        <span class={props.class}>{(*display).clone()}</span>
    }
}

#[function_component(AboutSection)]
fn about_section() -> Html {
    let node = use_node_ref();
    let revealed = use_reveal_once(node.clone(), SECTION_REVEAL_THRESHOLD);

    html! {
        <section id="about" class="about" ref={node}>
            <div class="container">
                <h2 class="section-title">{"Sobre mí"}</h2>
                <div class="about-content">
                    <Reveal kind={RevealKind::SlideLeft} class={classes!("about-text")}>
                        <p>
                            {"Desarrollador web y docente de informática. Llevo más de quince años construyendo \
                              aplicaciones con HTML5, CSS3, JavaScript, PHP y MySQL, y enseñando a otros a hacerlo."}
                        </p>
                        <p>
                            {"Hoy combino la formación con la automatización de procesos e integraciones de IA \
                              para aulas y pequeñas empresas."}
                        </p>
                    </Reveal>
                    <Reveal kind={RevealKind::SlideRight} class={classes!("about-stats")}>
                        { for ABOUT_STATS.iter().map(|stat| html! { <AboutStat {stat} start={revealed} /> }) }
                    </Reveal>
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct AboutStatProps {
    stat: &'static Stat,
    start: bool,
}

#[function_component(AboutStat)]
fn about_stat(props: &AboutStatProps) -> Html {
    html! {
        <div class="stat">
            <AnimatedCounter target={props.stat.target} class="stat-number" start={props.start} />
            <span class="stat-label">{props.stat.label}</span>
        </div>
    }
}

#[function_component(SkillsSection)]
fn skills_section() -> Html {
    let node = use_node_ref();
    let revealed = use_reveal_once(node.clone(), SECTION_REVEAL_THRESHOLD);

    html! {
        <section id="skills" class="skills" ref={node}>
            <div class="container">
                <h2 class="section-title">{"Habilidades"}</h2>
                <Reveal class={classes!("skills-grid")}>
                    { for SKILLS.iter().enumerate().map(|(index, skill)| html! {
                        <SkillBar {skill} {index} {revealed} />
                    }) }
                </Reveal>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SkillBarProps {
    skill: &'static Skill,
    index: usize,
    revealed: bool,
}

#[function_component(SkillBar)]
fn skill_bar(props: &SkillBarProps) -> Html {
    let filled = use_state_eq(|| false);

    {
        let filled = filled.clone();
        let delay_ms = stagger_delay(props.index, SKILL_BAR_STAGGER_MS);
        use_effect_with(props.revealed, move |revealed| {
            let timeout = (*revealed).then(|| Timeout::new(delay_ms, move || filled.set(true)));
            move || drop(timeout)
        });
    }

    let percent = props.skill.percent;

    html! {
        <div class="skill-item">
            <div class="skill-info">
                <span class="skill-name">{props.skill.name}</span>
                <span class="skill-percentage">{format!("{percent}%")}</span>
            </div>
            <div class="skill-bar">
                <div class="skill-progress" data-width={percent.to_string()} style={skill_width(percent, *filled)}></div>
            </div>
        </div>
    }
}

#[function_component(AiExpertiseSection)]
fn ai_expertise_section() -> Html {
    let node = use_node_ref();
    let glow = use_reveal_once(node.clone(), AI_GLOW_THRESHOLD);

    html! {
        <section id="ai-expertise" class="ai-expertise" ref={node}>
            <div class="container">
                <h2 class="section-title">{"IA & Automatización"}</h2>
                <div class="ai-stats">
                    { for AI_STATS.iter().map(|stat| html! { <AiStat {stat} /> }) }
                </div>
                <div class="ai-cards">
                    { for AI_CARDS.iter().enumerate().map(|(index, card)| html! {
                        <AiCardView {card} {index} {glow} />
                    }) }
                </div>
                <div class="ai-specializations">
                    { for AI_SPECIALIZATIONS.iter().map(|label| html! { <AiSpecialization label={*label} /> }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct AiStatProps {
    stat: &'static Stat,
}

#[function_component(AiStat)]
fn ai_stat(props: &AiStatProps) -> Html {
    let node = use_node_ref();
    let revealed = use_reveal_once(node.clone(), AI_STAT_THRESHOLD);

    html! {
        <div class="ai-stat-item" ref={node}>
            <AnimatedCounter
                target={props.stat.target}
                class="ai-stat-number"
                start={revealed}
                start_delay_ms={AI_STAT_START_DELAY_MS}
                suffix={unit_suffix(props.stat.target)}
            />
            <span class="ai-stat-label">{props.stat.label}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AiCardProps {
    card: &'static AiCard,
    index: usize,
    glow: bool,
}

#[function_component(AiCardView)]
fn ai_card_view(props: &AiCardProps) -> Html {
    let glowing = use_state_eq(|| false);

    {
        let glowing = glowing.clone();
        let delay_ms = stagger_delay(props.index, GLOW_STAGGER_MS);
        use_effect_with(props.glow, move |glow| {
            let chain = (*glow).then(|| {
                let mut lit = false;
                dom::TimerChain::start(delay_ms, move || {
                    lit = !lit;
                    glowing.set(lit);
                    lit.then_some(GLOW_HOLD_MS)
                })
            });
            move || drop(chain)
        });
    }

    let icon_style = (*glowing).then(|| format!("box-shadow: {GLOW_SHADOW};"));

    html! {
        <div class="ai-card" style={format!("animation-delay: {};", card_animation_delay(props.index))}>
            <div class="ai-card-icon" style={icon_style}>{props.card.icon}</div>
            <h3 class="ai-card-title">{props.card.title}</h3>
            <ul class="ai-tech-list">
                { for props.card.technologies.iter().map(|label| html! { <TechItem label={*label} /> }) }
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct LabelProps {
    label: &'static str,
}

#[function_component(TechItem)]
fn tech_item(props: &LabelProps) -> Html {
    let hovered = use_state_eq(|| false);

    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };

    let style = format!(
        "transform: {}; transition: transform 0.3s ease;",
        tech_item_transform(*hovered)
    );

    html! {
        <li {style} {onmouseenter} {onmouseleave}>{props.label}</li>
    }
}

#[function_component(AiSpecialization)]
fn ai_specialization(props: &LabelProps) -> Html {
    let transform = use_state_eq(|| None::<&'static str>);
    let settle = use_mut_ref(|| None::<Timeout>);

    let onclick = {
        let transform = transform.clone();
        Callback::from(move |_: MouseEvent| {
            transform.set(Some(PRESS_TRANSFORM));
            let transform = transform.clone();
            settle
                .borrow_mut()
                .replace(Timeout::new(PRESS_SETTLE_MS, move || transform.set(Some(SETTLED_TRANSFORM))));
        })
    };

    let style = transform.map(|value| format!("transform: {value};"));

    html! {
        <div class="ai-spec-item" {style} {onclick}>{props.label}</div>
    }
}

#[function_component(ProjectsSection)]
fn projects_section() -> Html {
    html! {
        <section id="projects" class="projects">
            <div class="container">
                <h2 class="section-title">{"Proyectos"}</h2>
                <div class="projects-grid">
                    { for PROJECTS.iter().map(|project| html! { <ProjectCard {project} /> }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: &'static Project,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let hovered = use_state_eq(|| false);

    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };

    let project = props.project;

    html! {
        <Reveal class={classes!("project-card-wrapper")}>
            <article
                class="project-card"
                style={format!("transform: {};", card_transform(*hovered))}
                {onmouseenter}
                {onmouseleave}
            >
                <div class="project-image">
                    <LazyImage src={project.image} alt={project.title} />
                </div>
                <div class="project-content">
                    <h3 class="project-title">{project.title}</h3>
                    <p class="project-description">{project.description}</p>
                    <div class="project-tags">
                        { for project.tags.iter().map(|tag| html! { <span class="tag">{*tag}</span> }) }
                    </div>
                </div>
            </article>
        </Reveal>
    }
}

#[derive(Properties, PartialEq)]
struct LazyImageProps {
    src: &'static str,
    alt: &'static str,
}

/// Image whose source is only assigned once it nears the viewport.
#[function_component(LazyImage)]
fn lazy_image(props: &LazyImageProps) -> Html {
    let node = use_node_ref();
    let loaded = use_reveal_once(node.clone(), LAZY_IMAGE_THRESHOLD);

    html! {
        <img
            ref={node}
            class={classes!((!loaded).then_some("lazy"))}
            data-src={props.src}
            src={loaded.then_some(props.src)}
            alt={props.alt}
        />
    }
}

#[function_component(CertificationsSection)]
fn certifications_section() -> Html {
    html! {
        <section id="certifications" class="certifications">
            <div class="container">
                <h2 class="section-title">{"Certificaciones"}</h2>
                <div class="certifications-grid">
                    { for CERTIFICATIONS.iter().map(|certification| html! {
                        <CertificationCard {certification} />
                    }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct CertificationCardProps {
    certification: &'static Certification,
}

#[function_component(CertificationCard)]
fn certification_card(props: &CertificationCardProps) -> Html {
    let certification = props.certification;

    html! {
        <Reveal class={classes!("certification-card")}>
            <h3 class="certification-title">{certification.title}</h3>
            <p class="certification-issuer">{certification.issuer}</p>
            <span class="certification-year">{certification.year.to_string()}</span>
        </Reveal>
    }
}

#[derive(Clone, Default, PartialEq)]
struct ContactRefs {
    form: NodeRef,
    name: NodeRef,
    email: NodeRef,
    subject: NodeRef,
    message: NodeRef,
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

impl ContactRefs {
    fn read(&self) -> ContactForm {
        ContactForm {
            name: input_value(&self.name),
            email: input_value(&self.email),
            subject: input_value(&self.subject),
            message: self
                .message
                .cast::<HtmlTextAreaElement>()
                .map(|area| area.value())
                .unwrap_or_default(),
        }
    }

    fn reset(&self) {
        if let Some(form) = self.form.cast::<HtmlFormElement>() {
            form.reset();
        }
    }
}

/// Returns `true` when the visitor was handed off to their mail client.
fn submit_contact(refs: &ContactRefs, config: &Config) -> bool {
    let form = refs.read();

    match form.mailto_link() {
        Ok(link) => {
            dom::navigate(&link);
            dom::show_notification(HANDOFF_MESSAGE, Severity::Success);
            log_event(
                config,
                LogLevel::Info,
                "contact_handoff",
                json!({ "messageChars": form.message.chars().count() }),
            );
            refs.reset();
            true
        }
        Err(error) => {
            log_event(
                config,
                LogLevel::Info,
                "contact_rejected",
                json!({ "reason": error.class(), "detail": error.to_string() }),
            );
            dom::show_notification(error.user_message(), Severity::Error);
            false
        }
    }
}

#[function_component(ContactSection)]
fn contact_section() -> Html {
    let page = use_page();
    let refs = use_memo((), |_| ContactRefs::default());

    let guard = use_mut_ref(HandoffGuard::default);

    let onsubmit = {
        let refs = Rc::clone(&refs);
        let config = Rc::clone(&page.config);
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let now = dom::now_ms();
            if !guard.borrow().admits(now) {
                return;
            }
            if submit_contact(&refs, &config) {
                guard.borrow_mut().record_handoff(now);
            }
        })
    };

    html! {
        <section id="contact" class="contact">
            <div class="container">
                <h2 class="section-title">{"Contacto"}</h2>
                <div class="contact-content">
                    <Reveal kind={RevealKind::SlideLeft} class={classes!("contact-info")}>
                        <p>{"¿Tienes un proyecto o una formación en mente? Escríbeme."}</p>
                        <div class="contact-item">
                            <span class="contact-icon" aria-hidden="true">{"✉"}</span>
                            <a href={format!("mailto:{RECIPIENT}")}>{RECIPIENT}</a>
                        </div>
                    </Reveal>
                    <Reveal kind={RevealKind::SlideRight} class={classes!("contact-form-wrapper")}>
                        <form id="contactForm" class="contact-form" ref={refs.form.clone()} novalidate="novalidate" {onsubmit}>
                            <div class="form-group">
                                <input ref={refs.name.clone()} type="text" id="name" name="name" placeholder="Tu nombre" />
                            </div>
                            <div class="form-group">
                                <input ref={refs.email.clone()} type="email" id="email" name="email" placeholder="Tu email" />
                            </div>
                            <div class="form-group">
                                <input ref={refs.subject.clone()} type="text" id="subject" name="subject" placeholder="Asunto" />
                            </div>
                            <div class="form-group">
                                <textarea ref={refs.message.clone()} id="message" name="message" rows="5" placeholder="Tu mensaje"></textarea>
                            </div>
                            <button type="submit" class="btn btn-primary">{"Enviar mensaje"}</button>
                        </form>
                    </Reveal>
                </div>
            </div>
        </section>
    }
}

#[function_component(ScrollTopButton)]
fn scroll_top_button() -> Html {
    let page = use_page();
    let scroll_y = use_scroll_y(page.config.scroll_throttle);
    let onclick = Callback::from(|_: MouseEvent| dom::scroll_to_top());

    html! {
        <button
            id="scrollToTop"
            class={classes!("scroll-to-top", scroll_top_visible(scroll_y).then_some("visible"))}
            type="button"
            aria-label="Volver arriba"
            {onclick}
        >
            {"↑"}
        </button>
    }
}

#[function_component(Footer)]
fn footer(props: &SectionNavProps) -> Html {
    html! {
        <footer class="footer">
            <div class="container">
                <p>{"© José Cervera · Desarrollo web y formación"}</p>
                <AnchorLink href="#home" class={classes!("footer-top")} on_navigate={props.on_navigate.clone()}>
                    {"Inicio"}
                </AnchorLink>
            </div>
        </footer>
    }
}

fn typing_into_field(event: &KeyboardEvent) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let theme = use_state(dom::read_stored_theme);
    let menu_open = use_state_eq(|| false);
    let active = use_state_eq(|| Some(AttrValue::from(INITIAL_SECTION)));
    let cursor = use_mut_ref(|| SectionCursor::new(Some(INITIAL_SECTION)));

    {
        let current = *theme;
        use_effect_with((), move |_| {
            dom::apply_theme(current);
            || ()
        });
    }

    {
        let active = active.clone();
        let cursor = cursor.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let throttle_ms = config.scroll_throttle;
            let spy: Rc<dyn Fn()> = Rc::new(move || {
                let spans = dom::section_spans();
                let found = locate_section(&spans, dom::scroll_y(), config.scroll_offset);
                if cursor.borrow_mut().advance(found) {
                    active.set(found.map(|id| AttrValue::from(id.to_string())));
                }
            });

            spy();
            let on_scroll = {
                let spy = Rc::clone(&spy);
                dom::throttled_window_listener("scroll", throttle_ms, move || spy())
            };
            let on_resize = {
                let mut rerun = dom::debounced(RESIZE_DEBOUNCE_MS, false, move || spy());
                dom::window_listener("resize", move || rerun())
            };

            move || {
                drop(on_scroll);
                drop(on_resize);
            }
        });
    }

    {
        let active = active.clone();
        let cursor = cursor.clone();
        let menu_open = menu_open.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let listener = dom::document().map(|document| {
                EventListener::new_with_options(
                    &document,
                    "keydown",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };

                        let direction = match event.key().as_str() {
                            "Escape" => {
                                menu_open.set(false);
                                return;
                            }
                            "ArrowDown" => Direction::Next,
                            "ArrowUp" => Direction::Previous,
                            _ => return,
                        };

                        if typing_into_field(event) {
                            return;
                        }

                        let current = cursor.borrow().current().map(ToString::to_string);
                        let Some(target) = neighbor_section(SECTION_ORDER, current.as_deref(), direction) else {
                            return;
                        };

                        event.prevent_default();
                        if dom::scroll_to_section(target, &config) {
                            cursor.borrow_mut().advance(Some(target));
                            active.set(Some(AttrValue::from(target)));
                        }
                    },
                )
            });
            move || drop(listener)
        });
    }

    let on_navigate = {
        let menu_open = menu_open.clone();
        let config = props.config.clone();
        Callback::from(move |id: AttrValue| {
            if dom::scroll_to_section(&id, &config) {
                menu_open.set(false);
            }
        })
    };

    let on_toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: ()| menu_open.set(!*menu_open))
    };

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: ()| {
            let next = (*theme).toggled();
            dom::persist_theme(next);
            dom::apply_theme(next);
            theme.set(next);
        })
    };

    let context = PageContext {
        config: props.config.clone(),
        reveal_fallback: props.reveal_fallback,
    };

    html! {
        <ContextProvider<PageContext> {context}>
            <SkipLink />
            <Preloader />
            <NavBar
                active={(*active).clone()}
                menu_open={*menu_open}
                theme={*theme}
                on_navigate={on_navigate.clone()}
                {on_toggle_menu}
                {on_toggle_theme}
            />
            <main id="main-content">
                <Hero on_navigate={on_navigate.clone()} />
                <AboutSection />
                <SkillsSection />
                <AiExpertiseSection />
                <ProjectsSection />
                <CertificationsSection />
                <ContactSection />
            </main>
            <Footer {on_navigate} />
            <ScrollTopButton />
        </ContextProvider<PageContext>>
    }
}

fn load_config(root: &Element) -> Config {
    let raw = root.get_attribute("data-config").unwrap_or_default();

    match Config::with_overrides(&raw) {
        Ok(resolved) => {
            if !resolved.rejected.is_empty() {
                log_event(
                    &resolved.config,
                    LogLevel::Info,
                    "config_override_rejected",
                    json!({ "fields": resolved.rejected }),
                );
            }
            resolved.config
        }
        Err(error) => {
            let config = Config::default();
            log_event(
                &config,
                LogLevel::Error,
                "config_override_rejected",
                json!({ "error": error.to_string() }),
            );
            config
        }
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
        .expect("missing #app mount point");

    let config = load_config(&root);
    dom::install_error_capture(&config);
    dom::install_global_surface(&config);
    dom::install_focus_outline();
    dom::release_will_change_after_load();
    let reveal_fallback = !dom::init_scroll_library(&config);

    log_event(
        &config,
        LogLevel::Info,
        "portfolio_initialized",
        json!({
            "sections": SECTION_ORDER.len(),
            "revealFallback": reveal_fallback,
        }),
    );

    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            config: Rc::new(config),
            reveal_fallback,
        },
    )
    .render();
}
