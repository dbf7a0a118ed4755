/// Splits `payload` into pieces of `chunk_size` bytes without breaking UTF-8
/// code points. A piece grows past `chunk_size` only to reach the next char
/// boundary. An empty payload yields no pieces.
pub(crate) fn chunks(payload: &str, chunk_size: usize) -> impl Iterator<Item = &str> {
    let chunk_size = chunk_size.max(1);
    let len = payload.len();
    let mut start = 0;
    core::iter::from_fn(move || {
        if start >= len {
            return None;
        }
        let mut end = core::cmp::min(start + chunk_size, len);
        while end < len && !payload.is_char_boundary(end) {
            end += 1;
        }
        let chunk = &payload[start..end];
        start = end;
        Some(chunk)
    })
}
