// src/core/html.rs
//
// Case-insensitive tag-block scanning over raw HTML. No DOM; offsets in the
// lowered copy line up with the input because only ASCII is lowered.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Next `o ... c` block at or after `from`, with `lc` the lowered copy of `s`.
/// The open pattern must end on a tag-name boundary, so `<th` skips `<thead>`.
pub fn next_tag_block_ci(s: &str, lc: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let ol = to_lower(o);
    let cl = to_lower(c);
    let mut search = from;
    loop {
        let start = lc.get(search..)?.find(&ol)? + search;
        let after = start + ol.len();
        if lc.as_bytes().get(after).is_some_and(|b| b.is_ascii_alphanumeric()) {
            search = after;
            continue;
        }
        let open_end = s[start..].find('>')? + start + 1;
        let end_rel = lc[open_end..].find(&cl)?;
        return Some((start, open_end + end_rel + c.len()));
    }
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a cell block (`<td ...>...</td>`).
fn cell_text(block: &str) -> String {
    let inner = inner_after_open_tag(block);
    normalize_ws(&normalize_entities(&strip_tags(inner)))
}

/// A `<table>` as its first row (headers) plus the remaining rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl HtmlTable {
    /// Index of the header equal to `name` (surrounding whitespace ignored).
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn header_contains(&self, needle: &str) -> bool {
        self.headers.iter().any(|h| h.contains(needle))
    }
}

/// Read every `<tr>` of a table block into cell rows. `<th>` and `<td>` both count.
fn read_rows(table: &str) -> Vec<Vec<String>> {
    let lc = to_lower(table);
    let mut rows = Vec::new();
    let mut pos = 0usize;

    while let Some((tr_s, tr_e)) = next_tag_block_ci(table, &lc, "<tr", "</tr>", pos) {
        pos = tr_e;
        let tr = &table[tr_s..tr_e];
        let tr_lc = &lc[tr_s..tr_e];

        let mut cells = Vec::new();
        let mut cell_pos = 0usize;
        loop {
            let td = next_tag_block_ci(tr, tr_lc, "<td", "</td>", cell_pos);
            let th = next_tag_block_ci(tr, tr_lc, "<th", "</th>", cell_pos);
            let (c_s, c_e) = match (td, th) {
                (Some(a), Some(b)) => if a.0 < b.0 { a } else { b },
                (Some(a), None) | (None, Some(a)) => a,
                (None, None) => break,
            };
            cells.push(cell_text(&tr[c_s..c_e]));
            cell_pos = c_e;
        }
        if !cells.is_empty() {
            rows.push(cells);
        }
    }
    rows
}

/// Every table in the document, in order of appearance.
pub fn tables(doc: &str) -> Vec<HtmlTable> {
    let lc = to_lower(doc);
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some((t_s, t_e)) = next_tag_block_ci(doc, &lc, "<table", "</table>", pos) {
        pos = t_e;
        let mut rows = read_rows(&doc[t_s..t_e]);
        if rows.is_empty() {
            continue;
        }
        let headers = rows.remove(0);
        out.push(HtmlTable { headers, rows });
    }
    out
}

/// First table whose header row mentions `needle`.
pub fn find_table(doc: &str, needle: &str) -> Option<HtmlTable> {
    tables(doc).into_iter().find(|t| t.header_contains(needle))
}
