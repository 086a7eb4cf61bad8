//! Carousel Component
//!
//! Rotating feature slides under the landing hero. Advances on a timer;
//! the arrows and dots jump directly.

use gloo_timers::callback::Interval;
use leptos::*;

use quickcard::Message;

use crate::state::use_app;

const SLIDES: [(&str, Message); 3] = [
    ("✏️", Message::FeatureCreate),
    ("🎨", Message::FeatureStyle),
    ("🔗", Message::FeatureShare),
];

const ADVANCE_MS: u32 = 4000;

#[component]
pub fn Carousel() -> impl IntoView {
    let locale = use_app().locale;
    let current = create_rw_signal(0usize);

    let timer = Interval::new(ADVANCE_MS, move || {
        current.update(|i| *i = step(*i, 1, SLIDES.len()));
    });
    on_cleanup(move || drop(timer));

    let shift = move |delta: isize| current.update(|i| *i = step(*i, delta, SLIDES.len()));

    view! {
        <div class="w-full max-w-xl mx-auto mt-12 overflow-hidden">
            <div
                class="flex transition-transform duration-500"
                style=move || format!("transform: translateX(-{}%);", current.get() * 100)
            >
                {SLIDES
                    .iter()
                    .map(|&(icon, message)| view! {
                        <div class="w-full shrink-0 px-10 py-6 text-center">
                            <div class="text-4xl mb-3">{icon}</div>
                            <p class="text-lg text-gray-300">{move || locale.get().text(message)}</p>
                        </div>
                    })
                    .collect_view()}
            </div>

            <div class="flex items-center justify-center space-x-4 mt-2">
                <button on:click=move |_| shift(-1) class="px-2 text-gray-400 hover:text-white">"‹"</button>
                {(0..SLIDES.len())
                    .map(|i| view! {
                        <button
                            on:click=move |_| current.set(i)
                            class=move || if current.get() == i {
                                "w-2.5 h-2.5 rounded-full bg-primary-500"
                            } else {
                                "w-2.5 h-2.5 rounded-full bg-gray-600"
                            }
                        ></button>
                    })
                    .collect_view()}
                <button on:click=move |_| shift(1) class="px-2 text-gray-400 hover:text-white">"›"</button>
            </div>
        </div>
    }
}

/// Move `delta` slides from `index`, wrapping at both ends
fn step(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wraps() {
        assert_eq!(step(0, 1, 3), 1);
        assert_eq!(step(2, 1, 3), 0);
        assert_eq!(step(0, -1, 3), 2);
        assert_eq!(step(1, -4, 3), 0);
        assert_eq!(step(0, 1, 0), 0);
    }

    #[test]
    fn test_slides_are_distinct() {
        for (i, (_, a)) in SLIDES.iter().enumerate() {
            assert!(SLIDES[i + 1..].iter().all(|(_, b)| a != b));
        }
    }
}
