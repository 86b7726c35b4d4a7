use std::rc::Rc;

use folio_scroll_core::easing::{CHAR_REVEAL_MS, CHAR_STAGGER_MS, NAV_STAGGER_MS};
use folio_scroll_core::{
    element_progress, resolve_with_offset, stagger_delay_ms, FrameSample, GestureState,
    GestureTimings, NavItem, ScrollConfig, ScrollSample, TransformMap, EASE_OUT_CUBIC, NAV_ITEMS,
};
use web_sys::Element;
use yew::prelude::*;

use crate::app_config;
use crate::gesture_runtime;
use crate::sampler;

const EXPLOSION_LAYERS: [(&str, u32); 3] = [
    ("bg-primary/10", 0),
    ("bg-primary/20", 100),
    ("bg-accent/10", 200),
];

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ScrollContext {
    pub(crate) frame: Rc<FrameSample>,
    pub(crate) gesture: GestureState,
    pub(crate) config: Rc<ScrollConfig>,
}

impl ScrollContext {
    pub(crate) fn scroll(&self) -> ScrollSample {
        self.frame.scroll
    }

    pub(crate) fn active_section(&self) -> Option<&str> {
        resolve_with_offset(
            &self.frame.scroll,
            &self.frame.sections,
            self.config.anchor_offset,
        )
    }

    pub(crate) fn header_scrolled(&self) -> bool {
        self.frame
            .scroll
            .header_scrolled(self.config.scrolled_threshold)
    }

    pub(crate) fn is_shaking(&self) -> bool {
        self.gesture == GestureState::Shaking
    }

    pub(crate) fn is_exploding(&self) -> bool {
        self.gesture == GestureState::Exploding
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ScrollProviderProps {
    #[prop_or_default]
    pub(crate) children: Children,
}

#[function_component(ScrollProvider)]
pub(crate) fn scroll_provider(props: &ScrollProviderProps) -> Html {
    let config = use_state(app_config::scroll_config);
    let frame = use_state_eq(|| Rc::new(FrameSample::default()));
    let gesture = use_state_eq(GestureState::default);

    {
        let frame = frame.clone();
        use_effect_with((), move |_| {
            let handle = sampler::install_sampler(Rc::new(move |sample: FrameSample| {
                frame.set(Rc::new(sample));
            }));
            move || drop(handle)
        });
    }

    {
        let gesture = gesture.clone();
        let timings = GestureTimings::from(&**config);
        use_effect_with((), move |_| {
            let handle = gesture_runtime::install_gesture(
                timings,
                Rc::new(move |state: GestureState| gesture.set(state)),
            );
            move || drop(handle)
        });
    }

    let context = ScrollContext {
        frame: (*frame).clone(),
        gesture: *gesture,
        config: (*config).clone(),
    };
    let shaking = context.is_shaking();
    let exploding = context.is_exploding();

    html! {
        <ContextProvider<ScrollContext> context={context}>
            <div class={classes!(shaking.then_some("animate-shake"))}>
                { props.children.clone() }
            </div>
            if exploding {
                <ExplosionOverlay />
            }
        </ContextProvider<ScrollContext>>
    }
}

#[function_component(ExplosionOverlay)]
fn explosion_overlay() -> Html {
    html! {
        <div class="explosion-overlay fixed inset-0 pointer-events-none z-50" aria-hidden="true">
            { for EXPLOSION_LAYERS.iter().map(|(tone, delay_ms)| html! {
                <div
                    class={classes!("absolute", "inset-0", "animate-explosion", *tone)}
                    style={format!("animation-delay: {delay_ms}ms")}
                />
            }) }
        </div>
    }
}

fn nav_link_class(item: &NavItem, active: Option<&str>) -> Classes {
    if item.is_active(active) {
        classes!("nav-link", "text-primary")
    } else {
        classes!("nav-link", "text-foreground/70")
    }
}

fn entrance_style(index: usize, step_ms: f64) -> String {
    format!("animation-delay: {}ms", stagger_delay_ms(index, step_ms))
}

#[function_component(Header)]
pub(crate) fn header() -> Html {
    let Some(scroll) = use_context::<ScrollContext>() else {
        return html! {};
    };
    let active = scroll.active_section();
    let header_class = if scroll.header_scrolled() {
        classes!("site-header", "site-header--scrolled")
    } else {
        classes!("site-header")
    };

    html! {
        <header class={header_class}>
            <div class="site-header__inner">
                <a href="/#" class="site-header__logo nav-enter">
                    <span class="font-mono text-primary">{ "VS" }</span>
                </a>
                <nav class="site-nav">
                    { for NAV_ITEMS.iter().enumerate().map(|(index, item)| html! {
                        <a key={item.href} href={item.href} class={nav_link_class(item, active)}>
                            <span class="nav-enter" style={entrance_style(index, NAV_STAGGER_MS)}>
                                { item.label }
                            </span>
                            if item.is_active(active) {
                                <span class="nav-link__highlight" />
                            }
                        </a>
                    }) }
                </nav>
                <MobileMenu active={active.map(|id| AttrValue::from(id.to_string()))} />
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct MobileMenuProps {
    #[prop_or_default]
    active: Option<AttrValue>,
}

#[function_component(MobileMenu)]
fn mobile_menu(props: &MobileMenuProps) -> Html {
    let open = use_state(|| false);
    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };
    let close = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(false))
    };
    let active = props.active.as_deref();

    html! {
        <div class="mobile-menu">
            <button
                class={classes!("mobile-menu__toggle", (*open).then_some("mobile-menu__toggle--open"))}
                aria-label="Toggle menu"
                onclick={toggle}
            >
                <span class="mobile-menu__bar" />
                <span class="mobile-menu__bar" />
                <span class="mobile-menu__bar" />
            </button>
            if *open {
                <div class="mobile-menu__panel">
                    <nav class="mobile-menu__nav">
                        { for NAV_ITEMS.iter().enumerate().map(|(index, item)| html! {
                            <a
                                key={item.href}
                                href={item.href}
                                class={nav_link_class(item, active)}
                                onclick={close.clone()}
                            >
                                <span class="nav-enter" style={entrance_style(index, NAV_STAGGER_MS)}>
                                    { item.label }
                                </span>
                                if item.is_active(active) {
                                    <span class="mobile-menu__underline" />
                                }
                            </a>
                        }) }
                    </nav>
                </div>
            }
        </div>
    }
}

/// Document-space top and height of `node`, re-measured when the viewport or
/// any section's top or height changes rather than on every scroll frame.
#[hook]
fn use_document_box(node: NodeRef, viewport_height: f64, layout: Vec<u64>) -> Option<(f64, f64)> {
    let measured = use_state_eq(|| None::<(f64, f64)>);
    {
        let measured = measured.clone();
        use_effect_with((viewport_height.to_bits(), layout), move |_| {
            if let Some(element) = node.cast::<Element>() {
                let rect = element.get_bounding_client_rect();
                let scroll_y = sampler::measure_scroll()
                    .map(|sample| sample.scroll_y)
                    .unwrap_or(0.0);
                measured.set(Some((rect.top() + scroll_y, rect.height())));
            }
            || ()
        });
    }
    *measured
}

#[derive(Properties, PartialEq)]
pub(crate) struct ParallaxProps {
    #[prop_or_default]
    pub(crate) children: Children,
    #[prop_or_default]
    pub(crate) offset: Option<f64>,
    #[prop_or_default]
    pub(crate) class: Classes,
}

#[function_component(ParallaxEffect)]
pub(crate) fn parallax_effect(props: &ParallaxProps) -> Html {
    let node = use_node_ref();
    let scroll = use_context::<ScrollContext>();
    let sample = scroll.as_ref().map(ScrollContext::scroll).unwrap_or_default();
    let layout = scroll
        .as_ref()
        .map(|ctx| ctx.frame.layout_signature())
        .unwrap_or_default();
    let document_box = use_document_box(node.clone(), sample.viewport_height, layout);

    let offset = props
        .offset
        .or_else(|| scroll.as_ref().map(|ctx| ctx.config.parallax_offset))
        .unwrap_or(folio_scroll_core::transform::PARALLAX_OFFSET_DEFAULT);
    let shift = document_box
        .and_then(|(top, _)| TransformMap::parallax(top, sample.viewport_height, offset).ok())
        .map(|map| map.map(sample.scroll_y))
        .unwrap_or(0.0);

    // The wrapper is measured; only the inner layer moves.
    html! {
        <div ref={node} class={props.class.clone()}>
            <div style={format!("transform: translateY({shift:.2}px)")}>
                { props.children.clone() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct GradientTextProps {
    pub(crate) text: AttrValue,
    #[prop_or_default]
    pub(crate) class: Classes,
    #[prop_or_default]
    pub(crate) gradient_class: Option<Classes>,
    #[prop_or(true)]
    pub(crate) animate_on_scroll: bool,
}

#[function_component(GradientText)]
pub(crate) fn gradient_text(props: &GradientTextProps) -> Html {
    let node = use_node_ref();
    let fade = use_memo((), |_| TransformMap::fade());
    let scroll = use_context::<ScrollContext>();
    let sample = scroll.as_ref().map(ScrollContext::scroll).unwrap_or_default();
    let layout = scroll
        .as_ref()
        .map(|ctx| ctx.frame.layout_signature())
        .unwrap_or_default();
    let document_box = use_document_box(node.clone(), sample.viewport_height, layout);

    let opacity = match (props.animate_on_scroll, document_box) {
        (true, Some((top, height))) => fade.map(element_progress(&sample, top, height)),
        _ => 1.0,
    };
    let gradient_class = props
        .gradient_class
        .clone()
        .unwrap_or_else(|| classes!("gradient-text", "animate-gradient"));
    let reveal = if props.animate_on_scroll {
        "char-reveal"
    } else {
        "char-static"
    };
    let easing = EASE_OUT_CUBIC.css();

    html! {
        <div
            ref={node}
            class={classes!("relative", "inline-block", props.class.clone())}
            style={format!("opacity: {opacity:.3}")}
        >
            <span class={gradient_class}>
                { for props.text.chars().enumerate().map(|(index, ch)| {
                    let glyph = if ch == ' ' { '\u{00A0}' } else { ch };
                    let style = format!(
                        "animation: {reveal} {CHAR_REVEAL_MS}ms {easing} {}ms both",
                        stagger_delay_ms(index, CHAR_STAGGER_MS)
                    );
                    html! {
                        <span class="inline-block" style={style}>{ glyph.to_string() }</span>
                    }
                }) }
            </span>
        </div>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <a href="/#" class="site-footer__top">{ "Back to top" }</a>
        </footer>
    }
}

#[function_component(App)]
pub(crate) fn app() -> Html {
    html! {
        <ScrollProvider>
            <Header />
            <main>
                <section id="hero" class="section section--hero">
                    <ParallaxEffect>
                        <h1>
                            <GradientText text="Hi, I build for the web" animate_on_scroll={false} />
                        </h1>
                    </ParallaxEffect>
                </section>
                { for NAV_ITEMS.iter().map(|item| html! {
                    <section key={item.target_id()} id={item.target_id()} class="section">
                        <h2><GradientText text={item.label} /></h2>
                        <ParallaxEffect class="section__body">
                            <div class="section__placeholder" />
                        </ParallaxEffect>
                    </section>
                }) }
            </main>
            <Footer />
        </ScrollProvider>
    }
}
