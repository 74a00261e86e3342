pub const SELECTION_ANGLE: f64 = 135.0;
pub const FRICTION: f64 = 0.95;
pub const MAX_FRAME_VELOCITY: f64 = 40.0;
pub const FRAME_MS: f64 = 16.0;
pub const SETTLE_EPSILON: f64 = 0.1;
pub const EASE_FACTOR: f64 = 0.1;
pub const TAP_MAX_DISTANCE: f64 = 5.0;
pub const TAP_MAX_DURATION_MS: f64 = 200.0;
pub const INERTIA_MAX_IDLE_MS: f64 = 100.0;
pub const INERTIA_MIN_VELOCITY: f64 = 0.05;
const OPACITY_FALLOFF: f64 = 120.0;
const MIN_OPACITY: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub time_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

pub fn circular_distance(a: f64, b: f64) -> f64 {
    let diff = (normalize_angle(a) - normalize_angle(b)).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

pub fn pointer_angle(center: Point, x: f64, y: f64) -> f64 {
    (y - center.y).atan2(x - center.x).to_degrees()
}

fn angle_step(item_count: usize) -> f64 {
    360.0 / item_count as f64
}

pub fn item_angle(index: usize, item_count: usize) -> f64 {
    index as f64 * angle_step(item_count)
}

fn nearest_to(target: f64, rotation: f64, item_count: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for index in 0..item_count {
        let global = normalize_angle(item_angle(index, item_count) + rotation);
        let diff = circular_distance(global, target);
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((index, diff)),
        }
    }
    best.map(|(index, _)| index)
}

pub fn closest_index(rotation: f64, item_count: usize) -> Option<usize> {
    nearest_to(SELECTION_ANGLE, rotation, item_count)
}

pub fn tap_index(tap_angle: f64, rotation: f64, item_count: usize) -> Option<usize> {
    nearest_to(normalize_angle(tap_angle), rotation, item_count)
}

/// Rotation that parks `index` at the selection angle, shifted by whole turns
/// so it lies nearest to `current`.
pub fn rotation_for_index(index: usize, item_count: usize, current: f64) -> f64 {
    nearest_turn(SELECTION_ANGLE - item_angle(index, item_count), current)
}

fn nearest_turn(target: f64, current: f64) -> f64 {
    let turns = ((target - current) / 360.0).round();
    target - turns * 360.0
}

pub fn item_opacity(index: usize, item_count: usize, rotation: f64) -> f64 {
    let global = normalize_angle(item_angle(index, item_count) + rotation);
    let diff = circular_distance(global, SELECTION_ANGLE);
    (1.0 - diff / OPACITY_FALLOFF).max(MIN_OPACITY)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Gesture {
    center: Point,
    start: PointerSample,
    last_angle: f64,
    last_ms: f64,
    velocity: f64,
}

// Both bounds are exclusive.
fn is_tap(moved_px: f64, held_ms: f64) -> bool {
    moved_px < TAP_MAX_DISTANCE && held_ms < TAP_MAX_DURATION_MS
}

fn keeps_spinning(idle_ms: f64, velocity: f64) -> bool {
    idle_ms < INERTIA_MAX_IDLE_MS && velocity.abs() > INERTIA_MIN_VELOCITY
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Idle,
    Inertia { velocity: f64 },
    Easing { target: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    Tap(usize),
    Inertia,
    Snap(usize),
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragUpdate {
    pub rotation: f64,
    pub closest: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub rotation: f64,
    pub selection: Option<usize>,
    pub finished: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Wheel {
    rotation: f64,
    item_count: usize,
    gesture: Option<Gesture>,
    motion: Motion,
}

impl Wheel {
    pub fn new(item_count: usize) -> Self {
        Self {
            rotation: 0.0,
            item_count,
            gesture: None,
            motion: Motion::Idle,
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.motion != Motion::Idle
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }

    pub fn closest(&self) -> Option<usize> {
        closest_index(self.rotation, self.item_count)
    }

    pub fn begin_drag(&mut self, center: Point, sample: PointerSample) {
        self.motion = Motion::Idle;
        self.gesture = Some(Gesture {
            center,
            start: sample,
            last_angle: pointer_angle(center, sample.x, sample.y),
            last_ms: sample.time_ms,
            velocity: 0.0,
        });
    }

    pub fn drag_to(&mut self, sample: PointerSample) -> Option<DragUpdate> {
        let gesture = self.gesture.as_mut()?;
        let angle = pointer_angle(gesture.center, sample.x, sample.y);
        let mut delta = angle - gesture.last_angle;
        if delta > 180.0 {
            delta -= 360.0;
        }
        if delta < -180.0 {
            delta += 360.0;
        }
        let dt = sample.time_ms - gesture.last_ms;
        if dt > 0.0 {
            gesture.velocity = delta / dt;
        }
        gesture.last_ms = sample.time_ms;
        gesture.last_angle = angle;
        self.rotation += delta;
        Some(DragUpdate {
            rotation: self.rotation,
            closest: self.closest(),
        })
    }

    pub fn release(&mut self, sample: PointerSample) -> Release {
        let Some(gesture) = self.gesture.take() else {
            return Release::Ignored;
        };
        let moved = (sample.x - gesture.start.x).hypot(sample.y - gesture.start.y);
        let held = sample.time_ms - gesture.start.time_ms;
        if is_tap(moved, held) {
            let tap_angle = pointer_angle(gesture.center, sample.x, sample.y);
            return match tap_index(tap_angle, self.rotation, self.item_count) {
                Some(index) => {
                    self.rotate_to_index(index);
                    Release::Tap(index)
                }
                None => Release::Ignored,
            };
        }

        let idle = sample.time_ms - gesture.last_ms;
        if keeps_spinning(idle, gesture.velocity) {
            let velocity = (gesture.velocity * FRAME_MS)
                .clamp(-MAX_FRAME_VELOCITY, MAX_FRAME_VELOCITY);
            self.motion = Motion::Inertia { velocity };
            return Release::Inertia;
        }

        match self.snap_to_nearest() {
            Some(index) => Release::Snap(index),
            None => Release::Ignored,
        }
    }

    pub fn rotate_to_index(&mut self, index: usize) {
        if self.item_count == 0 {
            return;
        }
        let target = rotation_for_index(index, self.item_count, self.rotation);
        self.motion = Motion::Easing { target };
    }

    /// Follows a selection made elsewhere. Returns whether an animation began.
    /// Ignored while a drag or animation is in flight.
    pub fn sync_to(&mut self, index: usize) -> bool {
        if self.is_dragging() || self.is_animating() || index >= self.item_count {
            return false;
        }
        let target = rotation_for_index(index, self.item_count, self.rotation);
        if (target - self.rotation).abs() > SETTLE_EPSILON {
            self.motion = Motion::Easing { target };
            true
        } else {
            false
        }
    }

    fn snap_to_nearest(&mut self) -> Option<usize> {
        let index = self.closest()?;
        self.rotate_to_index(index);
        Some(index)
    }

    pub fn step(&mut self) -> Step {
        match self.motion {
            Motion::Idle => Step {
                rotation: self.rotation,
                selection: None,
                finished: true,
            },
            Motion::Inertia { velocity } => {
                let velocity = velocity * FRICTION;
                if velocity.abs() < SETTLE_EPSILON {
                    let selection = self.snap_to_nearest();
                    return Step {
                        rotation: self.rotation,
                        selection,
                        finished: self.motion == Motion::Idle,
                    };
                }
                self.rotation += velocity;
                self.motion = Motion::Inertia { velocity };
                Step {
                    rotation: self.rotation,
                    selection: self.closest(),
                    finished: false,
                }
            }
            Motion::Easing { target } => {
                let distance = target - self.rotation;
                if distance.abs() < SETTLE_EPSILON {
                    self.rotation = target;
                    self.motion = Motion::Idle;
                    return Step {
                        rotation: self.rotation,
                        selection: None,
                        finished: true,
                    };
                }
                self.rotation += distance * EASE_FACTOR;
                Step {
                    rotation: self.rotation,
                    selection: None,
                    finished: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CENTER: Point = Point { x: 0.0, y: 0.0 };

    fn sample(x: f64, y: f64, time_ms: f64) -> PointerSample {
        PointerSample { x, y, time_ms }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn settle(wheel: &mut Wheel) -> f64 {
        for _ in 0..2000 {
            if wheel.step().finished {
                break;
            }
        }
        wheel.rotation()
    }

    #[test]
    fn normalizes_into_single_turn() {
        assert_eq!(normalize_angle(370.0), 10.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(circular_distance(350.0, 10.0), 20.0);
    }

    #[test]
    fn closest_item_at_rest_and_after_turn() {
        // Item 0 at 0 degrees; rotation 135 parks it at the selection angle.
        assert_eq!(closest_index(135.0, 6), Some(0));
        // Item 1 sits at 60 degrees, needs rotation 75.
        assert_eq!(closest_index(75.0, 6), Some(1));
        assert_eq!(closest_index(0.0, 0), None);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        // Rotation 105 puts item 0 at 105 and item 1 at 165: both 30 away.
        assert_eq!(closest_index(105.0, 6), Some(0));
    }

    #[test]
    fn target_rotation_picks_nearest_turn() {
        assert_eq!(rotation_for_index(0, 6, 0.0), 135.0);
        assert_eq!(rotation_for_index(0, 6, 700.0), 855.0);
        assert_eq!(rotation_for_index(3, 6, 0.0), -45.0);
    }

    #[test]
    fn opacity_fades_with_distance() {
        assert_eq!(item_opacity(0, 6, 135.0), 1.0);
        assert!((item_opacity(1, 6, 135.0) - 0.5).abs() < 1e-9);
        assert_eq!(item_opacity(3, 6, 135.0), 0.2);
    }

    #[test]
    fn drag_wraps_delta_across_seam() {
        let mut wheel = Wheel::new(6);
        // Start just above the negative x axis (angle ~ 179).
        wheel.begin_drag(CENTER, sample(-100.0, 1.0, 0.0));
        // Cross to just below it (angle ~ -179); delta should be ~ +2, not -358.
        let update = wheel.drag_to(sample(-100.0, -1.0, 10.0)).unwrap();
        assert!(update.rotation > 0.0 && update.rotation < 3.0);
    }

    #[test]
    fn drag_reports_selection_changes() {
        let mut wheel = Wheel::new(4);
        wheel.begin_drag(CENTER, sample(100.0, 0.0, 0.0));
        let update = wheel.drag_to(sample(0.0, 100.0, 50.0)).unwrap();
        assert_close(update.rotation, 90.0);
        // Items at 0/90/180/270; rotated by 90 item 0 sits at 90, item 1 at 180.
        assert_eq!(update.closest, Some(0));
        assert!(wheel.is_dragging());
        assert_close(wheel.drag_to(sample(0.0, 100.0, 60.0)).unwrap().rotation, 90.0);
    }

    #[test]
    fn short_still_press_is_a_tap() {
        let mut wheel = Wheel::new(4);
        // Tap at 270 degrees (straight up in screen space, y negative).
        wheel.begin_drag(CENTER, sample(0.0, -100.0, 0.0));
        let release = wheel.release(sample(1.0, -100.0, 120.0));
        assert_eq!(release, Release::Tap(3));
        assert_eq!(wheel.motion(), Motion::Easing { target: -135.0 });
        assert_eq!(settle(&mut wheel), -135.0);
        assert_eq!(wheel.closest(), Some(3));
    }

    #[test]
    fn long_press_without_motion_snaps() {
        let mut wheel = Wheel::new(4);
        wheel.begin_drag(CENTER, sample(100.0, 0.0, 0.0));
        let release = wheel.release(sample(100.0, 0.0, 500.0));
        // Rotation 0 puts item 1 at 90 and item 2 at 180: 45 each, lowest wins.
        assert_eq!(release, Release::Snap(1));
        assert_eq!(settle(&mut wheel), 45.0);
    }

    #[test]
    fn fast_flick_starts_capped_inertia() {
        let mut wheel = Wheel::new(6);
        wheel.begin_drag(CENTER, sample(100.0, 0.0, 0.0));
        wheel.drag_to(sample(0.0, 100.0, 10.0));
        // 90 degrees in 10ms = 9 deg/ms -> 144 per frame, capped at 40.
        assert_eq!(wheel.release(sample(0.0, 100.0, 20.0)), Release::Inertia);
        assert_eq!(wheel.motion(), Motion::Inertia { velocity: 40.0 });
        let step = wheel.step();
        assert_close(step.rotation, 90.0 + 38.0);
        assert!(step.selection.is_some());
    }

    #[test]
    fn tap_bounds_are_exclusive() {
        assert!(is_tap(4.99, 199.9));
        assert!(!is_tap(5.0, 10.0));
        assert!(!is_tap(0.0, 200.0));
    }

    #[test]
    fn press_moved_exactly_five_pixels_is_not_a_tap() {
        let mut wheel = Wheel::new(4);
        wheel.begin_drag(CENTER, sample(0.0, -100.0, 0.0));
        assert!(matches!(
            wheel.release(sample(5.0, -100.0, 100.0)),
            Release::Snap(_)
        ));

        let mut wheel = Wheel::new(4);
        wheel.begin_drag(CENTER, sample(0.0, -100.0, 0.0));
        assert_eq!(wheel.release(sample(4.0, -100.0, 100.0)), Release::Tap(3));
    }

    #[test]
    fn press_held_exactly_two_hundred_ms_is_not_a_tap() {
        let mut wheel = Wheel::new(4);
        wheel.begin_drag(CENTER, sample(0.0, -100.0, 0.0));
        assert!(matches!(
            wheel.release(sample(1.0, -100.0, 200.0)),
            Release::Snap(_)
        ));

        let mut wheel = Wheel::new(4);
        wheel.begin_drag(CENTER, sample(0.0, -100.0, 0.0));
        assert_eq!(wheel.release(sample(1.0, -100.0, 199.0)), Release::Tap(3));
    }

    #[test]
    fn inertia_bounds_are_exclusive() {
        assert!(keeps_spinning(99.9, 0.06));
        assert!(keeps_spinning(0.0, -0.06));
        assert!(!keeps_spinning(100.0, 9.0));
        assert!(!keeps_spinning(10.0, 0.05));
        assert!(!keeps_spinning(10.0, -0.05));
    }

    #[test]
    fn release_exactly_one_hundred_ms_after_last_move_snaps() {
        let mut wheel = Wheel::new(6);
        wheel.begin_drag(CENTER, sample(100.0, 0.0, 0.0));
        wheel.drag_to(sample(0.0, 100.0, 10.0));
        assert!(matches!(
            wheel.release(sample(0.0, 100.0, 110.0)),
            Release::Snap(_)
        ));

        let mut wheel = Wheel::new(6);
        wheel.begin_drag(CENTER, sample(100.0, 0.0, 0.0));
        wheel.drag_to(sample(0.0, 100.0, 10.0));
        assert_eq!(wheel.release(sample(0.0, 100.0, 109.0)), Release::Inertia);
    }

    #[test]
    fn stale_flick_snaps_instead_of_spinning() {
        let mut wheel = Wheel::new(6);
        wheel.begin_drag(CENTER, sample(100.0, 0.0, 0.0));
        wheel.drag_to(sample(0.0, 100.0, 10.0));
        assert!(matches!(
            wheel.release(sample(0.0, 100.0, 200.0)),
            Release::Snap(_)
        ));
    }

    #[test]
    fn inertia_decays_then_lands_on_an_item() {
        let mut wheel = Wheel::new(6);
        wheel.begin_drag(CENTER, sample(100.0, 0.0, 0.0));
        wheel.drag_to(sample(100.0, 10.0, 16.0));
        assert_eq!(wheel.release(sample(100.0, 10.0, 30.0)), Release::Inertia);
        let rotation = settle(&mut wheel);
        assert!(!wheel.is_animating());
        let index = wheel.closest().unwrap();
        assert!((rotation - rotation_for_index(index, 6, rotation)).abs() < 1e-9);
    }

    #[test]
    fn sync_ignored_while_busy() {
        let mut wheel = Wheel::new(6);
        wheel.begin_drag(CENTER, sample(100.0, 0.0, 0.0));
        assert!(!wheel.sync_to(2));
        wheel.release(sample(100.0, 0.0, 500.0));
        assert!(wheel.is_animating());
        assert!(!wheel.sync_to(2));
        assert_eq!(settle(&mut wheel), 15.0);
        assert!(!wheel.sync_to(2));
        assert!(wheel.sync_to(4));
        assert_eq!(settle(&mut wheel), -105.0);
        assert!(!wheel.sync_to(4));
    }

    #[test]
    fn easing_moves_a_tenth_per_frame() {
        let mut wheel = Wheel::new(6);
        wheel.rotate_to_index(0);
        let step = wheel.step();
        assert_close(step.rotation, 13.5);
        assert!(!step.finished);
    }
}
