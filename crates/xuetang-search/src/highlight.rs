//! Turn match spans into display segments.

use std::ops::Range;

/// A run of text, marked when it lies inside a match span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub marked: bool,
}

/// Split `text` at the given character ranges.
///
/// Ranges may overlap, touch, or extend past the end of the text; they are
/// clamped and merged first. Empty segments are never produced.
///
/// ```
/// use xuetang_search::highlight;
///
/// let segments = highlight("Mesa Basics", &[0..4]);
/// assert_eq!(segments[0].text, "Mesa");
/// assert!(segments[0].marked);
/// assert_eq!(segments[1].text, " Basics");
/// ```
pub fn highlight<'a>(text: &'a str, ranges: &[Range<usize>]) -> Vec<Segment<'a>> {
    // Byte offset of every char boundary, including the end.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = bounds.len() - 1;

    let mut spans: Vec<Range<usize>> = ranges
        .iter()
        .map(|r| r.start.min(char_count)..r.end.min(char_count))
        .filter(|r| r.start < r.end)
        .collect();
    spans.sort_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }

    let mut segments = Vec::with_capacity(merged.len() * 2 + 1);
    let mut cursor = 0;
    for span in merged {
        if cursor < span.start {
            segments.push(Segment {
                text: &text[bounds[cursor]..bounds[span.start]],
                marked: false,
            });
        }
        segments.push(Segment {
            text: &text[bounds[span.start]..bounds[span.end]],
            marked: true,
        });
        cursor = span.end;
    }
    if cursor < char_count {
        segments.push(Segment {
            text: &text[bounds[cursor]..],
            marked: false,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(segments: &[Segment<'_>]) -> String {
        segments
            .iter()
            .map(|s| {
                if s.marked {
                    format!("[{}]", s.text)
                } else {
                    s.text.to_string()
                }
            })
            .collect()
    }

    #[test]
    fn test_no_ranges() {
        assert_eq!(render(&highlight("plain", &[])), "plain");
        assert!(highlight("", &[0..3]).is_empty());
    }

    #[test]
    fn test_multiple_ranges() {
        let segments = highlight("mesa and mesa", &[0..4, 9..13]);
        assert_eq!(render(&segments), "[mesa] and [mesa]");
    }

    #[test]
    fn test_overlapping_and_adjacent_ranges_merge() {
        let segments = highlight("abcdefgh", &[4..6, 1..3, 2..4]);
        assert_eq!(render(&segments), "a[bcdef]gh");
    }

    #[test]
    fn test_multibyte_characters() {
        let segments = highlight("城市交通数据", &[2..4]);
        assert_eq!(render(&segments), "城市[交通]数据");
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let segments = highlight("gis", &[1..10, 7..9]);
        assert_eq!(render(&segments), "g[is]");
    }
}
