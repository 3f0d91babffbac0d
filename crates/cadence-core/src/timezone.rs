/// Syntactic check for an IANA-shaped zone name.
///
/// Accepts the literal `UTC` or `Area/Location[/Sublocation...]`, where the
/// area is letters and underscores and every later segment may also carry
/// digits, `+` and `-`. No zone database is consulted, so a well-formed but
/// nonexistent name such as `Mars/Olympus_Mons` passes.
pub fn is_timezone_iana(timezone: &str) -> bool {
    if timezone == "UTC" {
        return true;
    }

    let mut segments = timezone.split('/');
    let area_ok = segments
        .next()
        .is_some_and(|area| !area.is_empty() && area.chars().all(|c| c.is_ascii_alphabetic() || c == '_'));
    if !area_ok {
        return false;
    }

    let mut locations = 0usize;
    for segment in segments {
        let segment_ok = !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'));
        if !segment_ok {
            return false;
        }
        locations += 1;
    }
    locations > 0
}
