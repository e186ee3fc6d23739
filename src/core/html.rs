// src/core/html.rs
//
// Case-insensitive tag scanning over raw markup. No DOM; every helper
// works on byte offsets into the original string.

use super::sanitize::{normalize_entities, normalize_ws};

const VOID_TAGS: &[&str] = &["br", "img", "hr", "input", "meta", "link", "wbr"];

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

/// Position of the next `<tag` opener at or after `from`.
/// `lc` must already be lower-cased; `tag` too.
fn find_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = join!("<", tag);
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(&pat) {
        let at = pos + rel;
        match lc.as_bytes().get(at + pat.len()) {
            Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r') => return Some(at),
            _ => pos = at + pat.len(),
        }
    }
    None
}

/// Next `<tag …>…</tag>` block starting at or after `from`, honouring nesting
/// of the same tag. Returns byte range `(start, end)` with `end` past the
/// closing `>`.
pub fn next_balanced_block_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    balanced_lc(&to_lower(s), &to_lower(tag), from)
}

/// `next_balanced_block_ci` over an already lower-cased haystack and tag.
/// ASCII lower-casing keeps byte offsets, so results index the original too.
fn balanced_lc(lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_open(lc, tag, from)?;
    let close = join!("</", tag);

    let mut depth = 0usize;
    let mut pos = start;
    loop {
        let next_close = lc.get(pos..)?.find(&close)? + pos;
        match find_open(lc, tag, pos) {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + 1 + tag.len();
            }
            _ => {
                depth = depth.saturating_sub(1);
                let end = lc[next_close..].find('>')? + next_close + 1;
                if depth == 0 {
                    return Some((start, end));
                }
                pos = end;
            }
        }
    }
}

/// The opening tag of a block, up to and including its `>`.
pub fn opener(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
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

/// Attribute value from an opening tag. Tolerates double, single or no quotes.
pub fn attr_value(open: &str, name: &str) -> Option<String> {
    let lc = to_lower(open);
    let pat = join!(&to_lower(name), "=");
    let mut from = 0usize;
    let hp = loop {
        let at = lc.get(from..)?.find(&pat)? + from;
        let before = lc[..at].chars().next_back();
        if matches!(before, Some(c) if c.is_ascii_whitespace()) {
            break at;
        }
        from = at + pat.len();
    };

    let val = &open[hp + pat.len()..];
    let (quote, start_off) = match val.as_bytes().first() {
        Some(b'"') => (Some('"'), 1),
        Some(b'\'') => (Some('\''), 1),
        _ => (None, 0),
    };
    let end = match quote {
        Some(q) => val[start_off..].find(q).map(|e| start_off + e).unwrap_or(val.len()),
        None => val
            .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
            .unwrap_or(val.len()),
    };
    Some(val[start_off..end].to_string())
}

pub fn has_class(block: &str, class: &str) -> bool {
    attr_value(opener(block), "class")
        .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

pub fn classes_of(block: &str) -> Vec<String> {
    attr_value(opener(block), "class")
        .map(|v| v.split_whitespace().map(|c| s!(c)).collect())
        .unwrap_or_default()
}

/// First `<tag>` block (searching nested ones too) satisfying `pred`.
pub fn find_block<'a>(s: &'a str, tag: &str, pred: impl Fn(&str) -> bool) -> Option<&'a str> {
    let (lc, tag) = (to_lower(s), to_lower(tag));
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = balanced_lc(&lc, &tag, pos) {
        let block = &s[b_s..b_e];
        if pred(block) {
            return Some(block);
        }
        pos = b_s + 1;
    }
    None
}

pub fn find_with_class<'a>(s: &'a str, tag: &str, class: &str) -> Option<&'a str> {
    find_block(s, tag, |b| has_class(b, class))
}

/// Every non-overlapping `<tag>` block carrying `class`, outermost first.
pub fn find_all_with_class<'a>(s: &'a str, tag: &str, class: &str) -> Vec<&'a str> {
    let (lc, tag) = (to_lower(s), to_lower(tag));
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = balanced_lc(&lc, &tag, pos) {
        let block = &s[b_s..b_e];
        if has_class(block, class) {
            out.push(block);
            pos = b_e;
        } else {
            pos = b_s + 1;
        }
    }
    out
}

/// Top-level `<tag>` blocks inside `block` (not descending into matches).
pub fn child_blocks<'a>(block: &'a str, tag: &str) -> Vec<&'a str> {
    let Some(oe) = block.find('>') else { return Vec::new() };
    let Some(cs) = block.rfind('<') else { return Vec::new() };
    if cs <= oe {
        return Vec::new();
    }
    let inner = &block[oe + 1..cs];
    let (lc, tag) = (to_lower(inner), to_lower(tag));

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((c_s, c_e)) = balanced_lc(&lc, &tag, pos) {
        out.push(&inner[c_s..c_e]);
        pos = c_e;
    }
    out
}

/// A piece of markup at the top level of some container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment<'a> {
    Element(&'a str),
    Text(String),
}

/// Split markup into its top-level element blocks and non-blank text runs.
/// Comments are dropped; unterminated markup ends the scan.
pub fn top_level_fragments(s: &str) -> Vec<Fragment<'_>> {
    let lc = to_lower(s);
    let mut out = Vec::new();
    let mut pos = 0usize;

    while pos < s.len() {
        let rest = &s[pos..];
        let Some(lt) = rest.find('<') else {
            push_text(&mut out, rest);
            break;
        };
        push_text(&mut out, &rest[..lt]);
        pos += lt;

        let rest = &s[pos..];
        if rest.starts_with("<!--") {
            match rest.find("-->") {
                Some(e) => { pos += e + 3; continue; }
                None => break,
            }
        }

        let name: String = rest[1..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        if name.is_empty() {
            // stray '<' or a closing tag at top level
            match rest.find('>') {
                Some(e) => { pos += e + 1; continue; }
                None => break,
            }
        }

        let lname = to_lower(&name);
        if VOID_TAGS.contains(&lname.as_str()) {
            match rest.find('>') {
                Some(e) => { out.push(Fragment::Element(&s[pos..pos + e + 1])); pos += e + 1; }
                None => break,
            }
            continue;
        }

        match balanced_lc(&lc, &lname, pos) {
            Some((b_s, b_e)) if b_s == pos => {
                out.push(Fragment::Element(&s[b_s..b_e]));
                pos = b_e;
            }
            _ => break,
        }
    }
    out
}

fn push_text(out: &mut Vec<Fragment<'_>>, raw: &str) {
    let t = normalize_ws(&normalize_entities(raw));
    if !t.is_empty() {
        out.push(Fragment::Text(t));
    }
}

/// Visible text of a block: tags dropped, then entities decoded, whitespace
/// collapsed. Decoding last keeps an escaped `&lt;` from opening a tag.
pub fn text_of(block: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(inner_after_open_tag(block))))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_angle_brackets_stay_text() {
        assert_eq!(text_of("<a>a&lt;3 b</a>"), "a<3 b");
        assert_eq!(text_of("<a>x&lt;1&gt;&nbsp;<b>y</b></a>"), "x<1> y");
    }

    #[test]
    fn balanced_block_skips_nested_same_tag() {
        let s = r#"<p><span class="a">x<span>y</span>z</span><span>w</span></p>"#;
        let (b_s, b_e) = next_balanced_block_ci(s, "span", 0).unwrap();
        assert_eq!(&s[b_s..b_e], r#"<span class="a">x<span>y</span>z</span>"#);
    }

    #[test]
    fn tag_prefix_is_not_a_match() {
        let s = "<spanner>no</spanner><SPAN>yes</SPAN>";
        let (b_s, b_e) = next_balanced_block_ci(s, "span", 0).unwrap();
        assert_eq!(&s[b_s..b_e], "<SPAN>yes</SPAN>");
    }

    #[test]
    fn attr_values_with_any_quoting() {
        assert_eq!(attr_value(r#"<span data-field="price">"#, "data-field").as_deref(), Some("price"));
        assert_eq!(attr_value("<span class='a b'>", "class").as_deref(), Some("a b"));
        assert_eq!(attr_value("<a href=game.php?i=3>", "href").as_deref(), Some("game.php?i=3"));
        // `data-class=` must not satisfy a lookup for `class=`
        assert_eq!(attr_value(r#"<div data-class="x">"#, "class"), None);
    }

    #[test]
    fn children_are_top_level_only() {
        let block = r#"<span data-field="price"><span>Price:</span><span>7</span><span>×</span><span class="currency-text"><img alt="c"><span>chaos</span></span></span>"#;
        let kids = child_blocks(block, "span");
        assert_eq!(kids.len(), 4);
        assert_eq!(text_of(kids[1]), "7");
        assert_eq!(text_of(kids[3]), "chaos");
    }

    #[test]
    fn fragments_keep_text_and_elements_apart() {
        let s = "  hello <div class=\"row\"><div>a</div></div><!-- c --><br> tail ";
        let frags = top_level_fragments(s);
        assert_eq!(frags.len(), 4);
        assert_eq!(frags[0], Fragment::Text(s!("hello")));
        assert_eq!(frags[1], Fragment::Element("<div class=\"row\"><div>a</div></div>"));
        assert_eq!(frags[2], Fragment::Element("<br>"));
        assert_eq!(frags[3], Fragment::Text(s!("tail")));
    }
}
