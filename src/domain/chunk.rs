/// Detects where one logical unit of change content starts. Git patches open
/// each per-file segment with a `diff --git` header; a backend with a
/// different patch syntax can supply its own rule and reuse the packing and
/// slicing below unchanged.
pub trait UnitBoundary: Send + Sync {
    fn starts_unit(&self, line: &str) -> bool;
}

/// Boundary rule for unified git patches.
pub struct GitPatchBoundary;

impl UnitBoundary for GitPatchBoundary {
    fn starts_unit(&self, line: &str) -> bool {
        line.starts_with("diff --git ")
    }
}

/// Split raw change content into per-file segments, in original order.
/// Anything ahead of the first boundary forms a leading unit; units that are
/// blank after trimming are dropped.
pub fn split_units(content: &str, boundary: &dyn UnitBoundary) -> Vec<String> {
    let mut units = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if boundary.starts_unit(line) && !current.is_empty() {
            push_unit(&mut units, &current);
            current.clear();
        }
        current.push(line);
    }
    push_unit(&mut units, &current);

    units
}

fn push_unit(units: &mut Vec<String>, lines: &[&str]) {
    let unit = lines.join("\n");
    if !unit.trim().is_empty() {
        units.push(unit);
    }
}

/// Pack units into chunks of at most `limit` characters. Units are joined
/// with a newline and never split, except that a unit larger than `limit` by
/// itself is sliced into exact `limit`-sized pieces (any pending buffer is
/// flushed first so ordering survives). A unit exactly at `limit` stays
/// whole.
pub fn pack_chunks(units: Vec<String>, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffered = 0usize;

    for unit in units {
        let unit_chars = unit.chars().count();

        if unit_chars > limit {
            flush(&mut chunks, &mut buffer, &mut buffered);
            chunks.extend(slice_unit(&unit, limit));
            continue;
        }

        // One extra character for the joining newline.
        if !buffer.is_empty() && buffered + 1 + unit_chars > limit {
            flush(&mut chunks, &mut buffer, &mut buffered);
        }
        if !buffer.is_empty() {
            buffer.push('\n');
            buffered += 1;
        }
        buffer.push_str(&unit);
        buffered += unit_chars;
    }
    flush(&mut chunks, &mut buffer, &mut buffered);

    chunks
}

fn flush(chunks: &mut Vec<String>, buffer: &mut String, buffered: &mut usize) {
    if !buffer.is_empty() {
        chunks.push(std::mem::take(buffer));
        *buffered = 0;
    }
}

fn slice_unit(unit: &str, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut count = 0usize;

    for ch in unit.chars() {
        piece.push(ch);
        count += 1;
        if count == limit {
            pieces.push(std::mem::take(&mut piece));
            count = 0;
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }

    pieces
}

/// Split and pack in one step. Empty content yields no chunks; the caller
/// treats that as "nothing to summarize", not as a failure.
pub fn chunk_changes(content: &str, limit: usize, boundary: &dyn UnitBoundary) -> Vec<String> {
    pack_chunks(split_units(content, boundary), limit)
}
