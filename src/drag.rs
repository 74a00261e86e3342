use dioxus::prelude::*;

use crate::hooks::use_window_pointer;
use crate::wheel::{Point, PointerSample};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOrigin {
    pointer: Point,
    start: Point,
}

impl DragOrigin {
    pub fn new(sample: PointerSample, start: Point) -> Self {
        Self {
            pointer: Point {
                x: sample.x,
                y: sample.y,
            },
            start,
        }
    }

    pub fn position(&self, sample: PointerSample) -> Point {
        Point {
            x: self.start.x + sample.x - self.pointer.x,
            y: self.start.y + sample.y - self.pointer.y,
        }
    }
}

pub fn clamp_position(position: Point, viewport: Option<(f64, f64)>, size: (f64, f64)) -> Point {
    let Some((width, height)) = viewport else {
        return position;
    };
    Point {
        x: position.x.min(width - size.0).max(0.0),
        y: position.y.min(height - size.1).max(0.0),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn viewport_size() -> Option<(f64, f64)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn viewport_size() -> Option<(f64, f64)> {
    None
}

#[derive(Clone, Copy, PartialEq)]
pub struct Draggable {
    pub position: Signal<Point>,
    origin: Signal<Option<DragOrigin>>,
}

impl Draggable {
    pub fn is_dragging(&self) -> bool {
        self.origin.read().is_some()
    }

    pub fn begin(&mut self, sample: PointerSample) {
        let start = *self.position.peek();
        self.origin.set(Some(DragOrigin::new(sample, start)));
    }

    pub fn style(&self) -> String {
        let position = self.position.read();
        format!("left: {}px; top: {}px;", position.x, position.y)
    }
}

pub fn use_draggable(initial: Point, clamp: Option<(f64, f64)>) -> Draggable {
    let mut position = use_signal(|| initial);
    let mut origin = use_signal(|| None::<DragOrigin>);

    let on_move = use_callback(move |sample: PointerSample| {
        let Some(started) = *origin.peek() else {
            return;
        };
        let next = started.position(sample);
        position.set(match clamp {
            Some(size) => clamp_position(next, viewport_size(), size),
            None => next,
        });
    });
    let on_release = use_callback(move |_sample: PointerSample| {
        if origin.peek().is_some() {
            origin.set(None);
        }
    });
    use_window_pointer(on_move, on_release);

    Draggable { position, origin }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(x: f64, y: f64) -> PointerSample {
        PointerSample { x, y, time_ms: 0.0 }
    }

    #[test]
    fn origin_moves_window_by_pointer_delta() {
        let origin = DragOrigin::new(sample(100.0, 100.0), Point { x: 20.0, y: 260.0 });
        assert_eq!(
            origin.position(sample(130.0, 90.0)),
            Point { x: 50.0, y: 250.0 }
        );
    }

    #[test]
    fn begin_marks_the_window_as_dragging() {
        fn app() -> Element {
            let mut window = use_draggable(Point { x: 20.0, y: 260.0 }, None);
            if !window.is_dragging() {
                assert_eq!(window.style(), "left: 20px; top: 260px;");
                window.begin(sample(5.0, 5.0));
                assert!(window.is_dragging());
            }
            rsx! {}
        }
        VirtualDom::new(app).rebuild_in_place();
    }

    #[test]
    fn clamp_keeps_window_inside_viewport() {
        let size = (320.0, 200.0);
        let viewport = Some((1024.0, 768.0));
        assert_eq!(
            clamp_position(Point { x: 900.0, y: -40.0 }, viewport, size),
            Point { x: 704.0, y: 0.0 }
        );
        assert_eq!(
            clamp_position(Point { x: 10.0, y: 700.0 }, viewport, size),
            Point { x: 10.0, y: 568.0 }
        );
        assert_eq!(
            clamp_position(Point { x: 50.0, y: 50.0 }, Some((200.0, 100.0)), size),
            Point { x: 0.0, y: 0.0 }
        );
        assert_eq!(
            clamp_position(Point { x: -5.0, y: 5.0 }, None, size),
            Point { x: -5.0, y: 5.0 }
        );
    }
}
