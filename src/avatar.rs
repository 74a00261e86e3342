use dioxus::prelude::*;

const IDLE: Asset = asset!("/assets/leandros-idle.svg");
const SPEAKING: Asset = asset!("/assets/leandros-speaking.svg");
const ANGRY: Asset = asset!("/assets/leandros-angry.svg");

#[component]
pub fn LeandrosAvatar(speaking: bool, angry: bool) -> Element {
    if angry {
        return rsx! {
            div { class: "avatar avatar-angry",
                img { class: "avatar-layer", src: ANGRY, alt: "Leandros Angry" }
            }
        };
    }

    rsx! {
        div { class: "avatar",
            img { class: "avatar-layer avatar-idle", src: IDLE, alt: "Leandros Idle" }
            img {
                class: if speaking { "avatar-layer mouth-anim" } else { "avatar-layer is-hidden" },
                src: SPEAKING,
                alt: "Leandros Speaking",
            }
        }
    }
}
