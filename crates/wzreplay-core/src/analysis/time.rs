/// Render game time (milliseconds) as whole seconds in `h/m/s` form.
///
/// Sub-second remainders are dropped; zero renders as `0s`, and larger units
/// appear only when non-zero, with every smaller unit written out after them
/// (`1h0m5s`).
///
/// # Examples
/// ```text
/// assert_eq!(format_game_time(65_999), "1m5s");
/// assert_eq!(format_game_time(999), "0s");
/// ```
pub(crate) fn format_game_time(game_time: u32) -> String {
    let total = game_time / 1000;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
