/// Escapes text for Telegram's HTML parse mode.
///
/// Only `<`, `>` and `&` are significant to the Bot API renderer; quotes are
/// left alone since values never end up inside attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
