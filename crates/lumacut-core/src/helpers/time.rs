// crates/lumacut-core/src/helpers/time.rs
//
// Time labels for the audio/video players and trim bar.

/// Frame rate assumed by trim-marker timecodes.
pub const TIMECODE_FPS: u32 = 30;

fn non_negative(secs: f64) -> f64 {
    if secs.is_finite() { secs.max(0.0) } else { 0.0 }
}

/// Player clock: `m:ss`, or `h:mm:ss` from one hour up.
///
/// ```
/// use lumacut_core::helpers::time::clock;
/// assert_eq!(clock(4.9),    "0:04");
/// assert_eq!(clock(187.0),  "3:07");
/// assert_eq!(clock(3875.0), "1:04:35");
/// ```
pub fn clock(secs: f64) -> String {
    let total = non_negative(secs) as u64;
    let (h, m, s) = (total / 3600, total / 60 % 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Frame-accurate `MM:SS:FF` at `fps`.
///
/// ```
/// use lumacut_core::helpers::time::timecode;
/// assert_eq!(timecode(0.0, 30),  "00:00:00");
/// assert_eq!(timecode(61.5, 30), "01:01:15");
/// assert_eq!(timecode(2.5, 24),  "00:02:12");
/// ```
pub fn timecode(secs: f64, fps: u32) -> String {
    let fps    = u64::from(fps.max(1));
    let frames = (non_negative(secs) * fps as f64).floor() as u64;
    let whole  = frames / fps;
    format!("{:02}:{:02}:{:02}", whole / 60, whole % 60, frames % fps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_input_reads_as_zero() {
        assert_eq!(timecode(-3.0, TIMECODE_FPS), "00:00:00");
        assert_eq!(clock(f64::NAN), "0:00");
        assert_eq!(timecode(1.0, 0), "00:01:00");
    }
}
