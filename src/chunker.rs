//! Line-preserving splitter for length-limited chat messages.

/// Maximum characters per chunk, below the chat transport's hard limit.
pub const MAX_MESSAGE_LEN: usize = 4000;

/// Split `text` into chunks of at most [`MAX_MESSAGE_LEN`] characters.
pub fn split(text: &str) -> Vec<String> {
    split_with_limit(text, MAX_MESSAGE_LEN)
}

/// Split `text` on newlines and pack whole lines into chunks of at most
/// `max_len` characters. Each chunk has trailing whitespace trimmed and empty
/// chunks are dropped.
///
/// A single line longer than `max_len` is never broken up and ends up in a
/// chunk of its own that exceeds the limit.
pub fn split_with_limit(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        if current_len + line_len + 1 > max_len {
            flush(&mut chunks, &mut current);
            current_len = 0;
        }
        current.push_str(line);
        current.push('\n');
        current_len += line_len + 1;
    }
    flush(&mut chunks, &mut current);

    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim_end();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    current.clear();
}

/// How the transport should deliver a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Replace the "scan in progress" placeholder message.
    EditPlaceholder,
    SendNew,
}

/// Pair each chunk with its delivery: the first edits the placeholder, the
/// rest are sent as new messages.
pub fn plan_delivery(chunks: &[String]) -> Vec<(Delivery, &str)> {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let delivery = if i == 0 {
                Delivery::EditPlaceholder
            } else {
                Delivery::SendNew
            };
            (delivery, chunk.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split("").is_empty());
        assert!(split("\n\n   \n").is_empty());
    }

    #[test]
    fn short_text_is_a_single_trimmed_chunk() {
        let text = "  header\nline one\n\nline two \n\n";
        let chunks = split(text);
        assert_eq!(chunks, vec![text.trim_end().to_string()]);
        assert_eq!(split(&chunks[0]), chunks);
    }

    #[test]
    fn ten_long_lines_make_two_chunks() {
        let lines: Vec<String> = (0..10)
            .map(|i| char::from(b'a' + i as u8).to_string().repeat(500))
            .collect();
        let text = lines.join("\n");

        let chunks = split(&text);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].chars().count() <= MAX_MESSAGE_LEN);
        assert_eq!(chunks[0].lines().count(), 7);
        for chunk in &chunks {
            for line in chunk.lines() {
                assert!(lines.iter().any(|l| l == line), "line was broken across chunks");
            }
        }
        assert_eq!(chunks.join("\n"), text);
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        // 10 four-byte emoji per line, 11 chars including the newline
        let line = "🚀".repeat(10);
        let text = vec![line.clone(); 4].join("\n");
        let chunks = split_with_limit(&text, 22);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{}\n{}", line, line));
    }

    #[test]
    fn oversized_line_overflows_its_own_chunk() {
        let long = "x".repeat(50);
        let text = format!("short\n{}\ntail", long);
        let chunks = split_with_limit(&text, 20);
        assert_eq!(chunks, vec!["short".to_string(), long, "tail".to_string()]);
    }

    #[test]
    fn rejoined_chunks_preserve_content() {
        let text: String = (0..300)
            .map(|i| format!("row {}:{}\n", i, "-".repeat(i % 40)))
            .collect();
        let chunks = split_with_limit(&text, 500);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 500));
        assert_eq!(chunks.join("\n"), text.trim_end());
    }

    #[test]
    fn first_chunk_edits_placeholder() {
        let chunks = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        let plan = plan_delivery(&chunks);
        assert_eq!(plan[0], (Delivery::EditPlaceholder, "one"));
        assert!(plan[1..].iter().all(|(d, _)| *d == Delivery::SendNew));
        assert!(plan_delivery(&[]).is_empty());
    }
}
