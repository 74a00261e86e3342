#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
pub fn local_time_label() -> String {
    let date = js_sys::Date::new_0();
    format_time(date.get_hours(), date.get_minutes(), date.get_seconds())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn local_time_label() -> String {
    let seconds = (now_ms() / 1000.0) as u64;
    let day_seconds = seconds % 86_400;
    format_time(
        (day_seconds / 3600) as u32,
        ((day_seconds % 3600) / 60) as u32,
        (day_seconds % 60) as u32,
    )
}

fn format_time(hours: u32, minutes: u32, seconds: u32) -> String {
    let meridiem = if hours >= 12 { "PM" } else { "AM" };
    let hour = match hours % 12 {
        0 => 12,
        other => other,
    };
    format!("{hour}:{minutes:02}:{seconds:02} {meridiem}")
}

pub async fn next_frame() {
    sleep_ms(16).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(_ms: u32) {}

#[cfg(target_arch = "wasm32")]
pub fn random_unit() -> f64 {
    js_sys::Math::random()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn random_unit() -> f64 {
    rand::random::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_twelve_hour_clock() {
        assert_eq!(format_time(0, 5, 9), "12:05:09 AM");
        assert_eq!(format_time(13, 45, 0), "1:45:00 PM");
        assert_eq!(format_time(12, 0, 0), "12:00:00 PM");
    }

    #[test]
    fn random_unit_stays_in_range() {
        for _ in 0..10 {
            let value = random_unit();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
