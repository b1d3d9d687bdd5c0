//! codecs/lz4_block.rs
//! LZ4 block format with the classic numeric-return interface.
//!
//! - `compress_default` returns the compressed length, or 0 when the output
//!   does not fit (or the scratch table is too small).
//! - `decompress_safe` returns the decoded length, or a negative value for
//!   malformed input.
//!
//! The encoder keeps its match finder in a caller-owned table so a call never
//! allocates. Output is a plain LZ4 block (no frame, no size prefix).
use crate::compression::constants::lz4::*;

/// Bounded writer over the caller's output slice.
struct Sink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Sink<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn push(&mut self, byte: u8) -> Option<()> {
        *self.buf.get_mut(self.pos)? = byte;
        self.pos += 1;
        Some(())
    }

    fn extend(&mut self, bytes: &[u8]) -> Option<()> {
        let end = self.pos.checked_add(bytes.len())?;
        self.buf.get_mut(self.pos..end)?.copy_from_slice(bytes);
        self.pos = end;
        Some(())
    }

    /// Length continuation bytes: runs of 255 then the remainder.
    fn push_length(&mut self, mut rest: usize) -> Option<()> {
        while rest >= 255 {
            self.push(255)?;
            rest -= 255;
        }
        self.push(rest as u8)
    }

    fn literals_token(len: usize) -> u8 {
        (len.min(RUN_MASK) as u8) << 4
    }

    /// One full sequence: token, literals, offset, match length.
    fn sequence(&mut self, literals: &[u8], offset: u16, match_len: usize) -> Option<()> {
        let ml = match_len - MIN_MATCH;
        self.push(Self::literals_token(literals.len()) | ml.min(ML_MASK) as u8)?;
        if literals.len() >= RUN_MASK {
            self.push_length(literals.len() - RUN_MASK)?;
        }
        self.extend(literals)?;
        self.extend(&offset.to_le_bytes())?;
        if ml >= ML_MASK {
            self.push_length(ml - ML_MASK)?;
        }
        Some(())
    }

    /// Closing literal run. Every block ends with one, possibly empty.
    fn last_literals(&mut self, literals: &[u8]) -> Option<()> {
        self.push(Self::literals_token(literals.len()))?;
        if literals.len() >= RUN_MASK {
            self.push_length(literals.len() - RUN_MASK)?;
        }
        self.extend(literals)
    }
}

#[inline]
fn read_u32(src: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&src[at..at + 4]);
    u32::from_le_bytes(word)
}

#[inline]
fn hash(sequence: u32) -> usize {
    (sequence.wrapping_mul(2_654_435_761) >> (32 - HASH_LOG)) as usize
}

/// Compress `src` into `dst`, using `table` as match-finder state.
///
/// `dst.len()` is the advertised capacity. The table is reset on entry, so
/// leftovers from earlier calls never leak into the output.
pub fn compress_default(src: &[u8], dst: &mut [u8], table: &mut [u32]) -> usize {
    if table.len() < HASH_TABLE_ENTRIES || src.len() > u32::MAX as usize {
        return 0;
    }
    let table = &mut table[..HASH_TABLE_ENTRIES];
    table.fill(0);

    let mut sink = Sink::new(dst);
    match encode(src, &mut sink, table) {
        Some(()) => sink.pos,
        None => 0,
    }
}

fn encode(src: &[u8], sink: &mut Sink<'_>, table: &mut [u32]) -> Option<()> {
    let len = src.len();
    let mut anchor = 0usize;

    if len >= MIN_INPUT_FOR_MATCH {
        // Matches end before the trailing literals.
        let match_end_limit = len - LAST_LITERALS;
        let mut ip = 1usize;
        let mut misses = 0u32;
        table[hash(read_u32(src, 0))] = 0;

        while ip + MF_LIMIT <= len {
            let sequence = read_u32(src, ip);
            let slot = hash(sequence);
            let candidate = table[slot] as usize;
            table[slot] = ip as u32;

            let found = candidate < ip
                && ip - candidate <= MAX_DISTANCE
                && read_u32(src, candidate) == sequence;
            if !found {
                ip += 1 + (misses >> SKIP_TRIGGER) as usize;
                misses += 1;
                continue;
            }
            misses = 0;

            // Catch up on bytes that also match before `ip`.
            let mut start = ip;
            let mut reference = candidate;
            while start > anchor && reference > 0 && src[start - 1] == src[reference - 1] {
                start -= 1;
                reference -= 1;
            }

            let mut end = ip + MIN_MATCH;
            let mut probe = candidate + MIN_MATCH;
            while end < match_end_limit && src[end] == src[probe] {
                end += 1;
                probe += 1;
            }

            sink.sequence(&src[anchor..start], (start - reference) as u16, end - start)?;
            anchor = end;
            ip = end;

            // Prime the table with a position inside the match just emitted.
            let primed = ip - 2;
            table[hash(read_u32(src, primed))] = primed as u32;
        }
    }

    sink.last_literals(&src[anchor..])
}

/// Decode one LZ4 block into `dst`, never writing past `dst.len()`.
pub fn decompress_safe(src: &[u8], dst: &mut [u8]) -> isize {
    // A block always holds at least its closing token.
    if src.is_empty() {
        return -1;
    }
    match lz4_flex::block::decompress_into(src, dst) {
        Ok(written) => written as isize,
        Err(e) => {
            log::trace!("lz4: block decode rejected input: {e}");
            -1
        }
    }
}
