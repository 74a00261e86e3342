mod avatar;
mod circular_nav;
mod clock;
mod config;
mod drag;
mod emulator;
mod gate;
mod hooks;
mod mermaid;
mod mini_player;
mod music;
mod nav;
mod routes;
mod shell;
mod sidebar;
mod theme;
mod ui;
mod views;
mod voice;
mod welcome;
mod wheel;
mod whiteboard;

fn main() {
    dioxus::launch(routes::App);
}
