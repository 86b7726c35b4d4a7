mod app_config;
mod gesture_runtime;
mod sampler;
mod style_host;
mod yew_app;

fn main() {
    yew::Renderer::<yew_app::App>::new().render();
}
