use std::rc::Rc;

/// Width a tab contributes to a column. Tabs add a flat amount, they do not
/// round up to the next stop.
pub const TAB_SIZE: usize = 4;

/// One physical line of the source, without its trailing newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub offset: usize,
    pub number: usize,
    pub length: usize,
}

/// Wraps the analyzed text together with its line index.
#[derive(Debug, Clone)]
pub struct Source {
    code: Rc<str>,
    lines: Vec<Line>,
}

impl Source {
    pub fn new(code: &str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;

        for (i, byte) in code.bytes().enumerate() {
            if byte == b'\n' {
                lines.push(Line {
                    offset: start,
                    number: lines.len() + 1,
                    length: i - start,
                });
                start = i + 1;
            }
        }

        lines.push(Line {
            offset: start,
            number: lines.len() + 1,
            length: code.len() - start,
        });

        Source {
            code: Rc::from(code),
            lines,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// A cheap shared handle on the text, held by every token.
    pub fn handle(&self) -> Rc<str> {
        Rc::clone(&self.code)
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Text of a 1-based line number.
    pub fn line_text(&self, number: usize) -> Option<&str> {
        let line = self.lines.get(number.checked_sub(1)?)?;
        Some(&self.code[line.offset..line.offset + line.length])
    }

    /// Index into `lines()` of the line holding `offset`.
    pub fn line_index(&self, offset: usize) -> usize {
        self.lines
            .partition_point(|line| line.offset <= offset)
            .saturating_sub(1)
    }

    /// 1-based column of `offset` on the line at `line_index`.
    pub fn column(&self, line_index: usize, offset: usize) -> usize {
        let line = &self.lines[line_index];
        let end = offset.min(line.offset + line.length);

        1 + self.code[line.offset..end]
            .chars()
            .map(|c| if c == '\t' { TAB_SIZE } else { 1 })
            .sum::<usize>()
    }

    /// Maps an offset to its 1-based `(line, column)`.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let index = self.line_index(offset);
        (self.lines[index].number, self.column(index, offset))
    }
}
