//! Stdin escape-sequence buffering.
//!
//! Raw reads may deliver several keys at once ("re" typed quickly) or split one escape sequence
//! across two reads. [`StdinBuffer`] turns byte chunks into complete key sequences and keeps an
//! incomplete escape tail until more bytes arrive or the caller flushes it after a timeout.

const ESC: u8 = 0x1b;

#[derive(Debug, PartialEq, Eq)]
enum SequenceStatus {
    Complete,
    Incomplete,
}

/// Buffers stdin input and emits complete sequences.
#[derive(Debug, Default)]
pub struct StdinBuffer {
    buffer: String,
}

impl StdinBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes and return every sequence completed by them.
    pub fn process(&mut self, data: &[u8]) -> Vec<String> {
        // Meta-prefixed single bytes arrive as 0x80 | byte on some terminals.
        if data.len() == 1 && data[0] > 127 {
            self.buffer.push('\x1b');
            self.buffer.push(char::from(data[0] - 128));
        } else {
            self.buffer.push_str(&String::from_utf8_lossy(data));
        }

        let (sequences, remainder) = extract_complete_sequences(&self.buffer);
        self.buffer = remainder;
        sequences
    }

    /// Emit whatever is buffered verbatim; a lone `ESC` becomes the escape key.
    pub fn flush(&mut self) -> Vec<String> {
        if self.buffer.is_empty() {
            return Vec::new();
        }
        vec![std::mem::take(&mut self.buffer)]
    }

    /// Whether an incomplete escape tail is waiting for more bytes.
    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }
}

fn extract_complete_sequences(buffer: &str) -> (Vec<String>, String) {
    let mut sequences = Vec::new();
    let bytes = buffer.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != ESC {
            let Some(ch) = buffer[pos..].chars().next() else {
                break;
            };
            sequences.push(ch.to_string());
            pos += ch.len_utf8();
            continue;
        }

        let mut seq_end = pos + 1;
        loop {
            if seq_end > bytes.len() {
                return (sequences, buffer[pos..].to_string());
            }
            if !buffer.is_char_boundary(seq_end) {
                seq_end += 1;
                continue;
            }
            let candidate = &buffer[pos..seq_end];
            match sequence_status(candidate) {
                SequenceStatus::Complete => {
                    sequences.push(candidate.to_string());
                    pos = seq_end;
                    break;
                }
                SequenceStatus::Incomplete => seq_end += 1,
            }
        }
    }

    (sequences, String::new())
}

fn sequence_status(data: &str) -> SequenceStatus {
    let after = &data[1..];
    if after.is_empty() {
        return SequenceStatus::Incomplete;
    }

    if let Some(payload) = after.strip_prefix('[') {
        // `ESC [ [ A` is the linux console spelling of F1..F5.
        if let Some(linux) = payload.strip_prefix('[') {
            return if linux.is_empty() {
                SequenceStatus::Incomplete
            } else {
                csi_status(linux)
            };
        }
        return csi_status(payload);
    }

    if after.starts_with('O') {
        return if after.len() >= 2 {
            SequenceStatus::Complete
        } else {
            SequenceStatus::Incomplete
        };
    }

    // Alt+<char>, or ESC followed by an ordinary byte.
    SequenceStatus::Complete
}

fn csi_status(payload: &str) -> SequenceStatus {
    match payload.as_bytes().last() {
        Some(last) if (0x40..=0x7e).contains(last) => SequenceStatus::Complete,
        _ => SequenceStatus::Incomplete,
    }
}
