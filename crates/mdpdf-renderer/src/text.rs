//! Plain-text paginated layout.
//!
//! [`TextTheme`] realizes theme hooks as fixed-width text: paragraphs are
//! word-wrapped, containers contribute line prefixes (list markers, quote
//! bars) and the finished line sequence is cut into pages framed by an
//! optional running header and a page-number footer.

use std::mem;

use mdpdf_ast::Alignment;

use crate::theme::{InlineStyle, ListInfo, ListItemInfo, Position, StyleSet, TableShape, Theme};

/// Narrowest column wrapped text is ever squeezed into.
const MIN_COLUMN: usize = 10;

/// Page geometry and list decoration for [`TextTheme`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLayout {
    /// Columns per line.
    pub width: usize,
    /// Lines per page, header and footer included.
    pub height: usize,
    /// Running header; empty disables it.
    pub header: String,
    /// Footer with `{page}` and `{pages}` placeholders; empty disables it.
    pub footer: String,
    /// Width of the list marker column.
    pub indent: usize,
    /// Bullet per nesting depth, the last one repeating.
    pub bullets: Vec<String>,
    /// Numbering pattern per nesting depth: `%d` number, `%a` letter.
    pub numbering: Vec<String>,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            width: 80,
            height: 60,
            header: String::new(),
            footer: "{page} / {pages}".to_owned(),
            indent: 4,
            bullets: vec!["•".to_owned(), "◦".to_owned(), "–".to_owned()],
            numbering: vec!["%d.".to_owned(), "%a.".to_owned(), "%d)".to_owned()],
        }
    }
}

/// Line prefix contributed by an open container.
#[derive(Debug)]
struct Prefix {
    first: String,
    rest: String,
    used: bool,
}

#[derive(Debug)]
struct TableLine {
    cells: Vec<String>,
    header: bool,
}

#[derive(Debug, Default)]
struct TableBuffer {
    rows: Vec<TableLine>,
    aligns: Vec<Alignment>,
    row: Vec<String>,
}

/// Theme laying a document out as paginated plain text.
///
/// Hooks accumulate lines; [`Theme::finish`] cuts them into pages, which are
/// then available through [`pages`](Self::pages) and [`render`](Self::render).
#[derive(Debug, Default)]
pub struct TextTheme {
    layout: TextLayout,
    lines: Vec<String>,
    prefixes: Vec<Prefix>,
    inline: Option<String>,
    links: Vec<usize>,
    table: Option<TableBuffer>,
    pages: Vec<String>,
}

impl TextTheme {
    #[must_use]
    pub fn new(layout: TextLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Pages produced by [`Theme::finish`], each ending with a newline.
    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// All pages joined by form feeds.
    #[must_use]
    pub fn render(&self) -> String {
        self.pages.join("\u{c}")
    }

    fn inline_mut(&mut self) -> &mut String {
        self.inline.get_or_insert_with(String::new)
    }

    fn available_width(&self) -> usize {
        let used: usize = self.prefixes.iter().map(|p| p.rest.chars().count()).sum();
        self.layout.width.saturating_sub(used).max(MIN_COLUMN)
    }

    /// Emit one line behind the current container prefixes.
    fn emit(&mut self, content: &str) {
        let mut line = String::new();
        for prefix in &mut self.prefixes {
            if prefix.used {
                line.push_str(&prefix.rest);
            } else {
                line.push_str(&prefix.first);
                prefix.used = true;
            }
        }
        line.push_str(content);
        line.truncate(line.trim_end().len());
        self.lines.push(line);
    }

    /// Emit a separator line unless one was just emitted.
    fn blank(&mut self) {
        let mut line: String = self.prefixes.iter().map(|p| p.rest.as_str()).collect();
        line.truncate(line.trim_end().len());
        if self.lines.last().is_some_and(|last| *last != line) {
            self.lines.push(line);
        }
    }

    fn end_block(&mut self, position: Position) {
        if !position.is_last() {
            self.blank();
        }
    }

    /// Wrap and emit pending inline content.
    fn flush_inline(&mut self) {
        let Some(text) = self.inline.take() else {
            return;
        };
        for line in wrap(&text, self.available_width()) {
            self.emit(&line);
        }
    }

    fn marker(&self, item: &ListItemInfo) -> String {
        let patterns = if item.ordered {
            &self.layout.numbering
        } else {
            &self.layout.bullets
        };
        let pattern = patterns
            .get(item.depth)
            .or_else(|| patterns.last())
            .map_or("-", String::as_str);

        if item.ordered {
            pattern
                .replace("%d", &item.number.to_string())
                .replace("%a", &alpha(item.number))
        } else {
            pattern.to_owned()
        }
    }

    fn emit_table(&mut self, table: TableBuffer) {
        let columns = table
            .rows
            .iter()
            .map(|row| row.cells.len())
            .max()
            .unwrap_or(0)
            .max(table.aligns.len());
        if columns == 0 {
            return;
        }

        let mut widths = vec![3; columns];
        for row in &table.rows {
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header_rows = table.rows.iter().take_while(|row| row.header).count();
        for (i, row) in table.rows.iter().enumerate() {
            self.emit(&format_row(&row.cells, &widths, &table.aligns));
            if i + 1 == header_rows {
                self.emit(&separator_row(&widths, &table.aligns));
            }
        }
    }

    fn paginate(&mut self) {
        let chrome = |text: &str| if text.is_empty() { 0 } else { 2 };
        let body = self
            .layout
            .height
            .saturating_sub(chrome(&self.layout.header) + chrome(&self.layout.footer))
            .max(1);

        let mut pages: Vec<Vec<String>> = Vec::new();
        let mut current = Vec::with_capacity(body);
        for line in mem::take(&mut self.lines) {
            if current.is_empty() && line.is_empty() {
                continue;
            }
            current.push(line);
            if current.len() == body {
                pages.push(mem::take(&mut current));
            }
        }
        if !current.is_empty() || pages.is_empty() {
            pages.push(current);
        }

        let total = pages.len();
        let composed = pages
            .iter()
            .enumerate()
            .map(|(i, lines)| self.compose_page(i + 1, total, lines, body))
            .collect();
        self.pages = composed;
        tracing::debug!(pages = total, "Paginated document");
    }

    fn compose_page(&self, page: usize, pages: usize, lines: &[String], body: usize) -> String {
        let mut out = String::new();
        if !self.layout.header.is_empty() {
            out.push_str(self.layout.header.trim_end());
            out.push_str("\n\n");
        }
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
        if !self.layout.footer.is_empty() {
            for _ in lines.len()..body {
                out.push('\n');
            }
            let footer = self
                .layout
                .footer
                .replace("{page}", &page.to_string())
                .replace("{pages}", &pages.to_string());
            let width = self.layout.width;
            out.push('\n');
            out.push_str(format!("{footer:^width$}").trim_end());
            out.push('\n');
        }
        out
    }
}

impl Theme for TextTheme {
    fn enter_paragraph(&mut self, _position: Position) {
        self.flush_inline();
    }

    fn leave_paragraph(&mut self, position: Position) {
        self.flush_inline();
        self.end_block(position);
    }

    fn enter_heading(&mut self, _level: u8, _position: Position) {
        self.flush_inline();
    }

    fn leave_heading(&mut self, level: u8, position: Position) {
        let text = self.inline.take().unwrap_or_default();
        let lines = wrap(&text, self.available_width());
        match level {
            1 | 2 => {
                let rule = if level == 1 { "=" } else { "-" };
                let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
                for line in &lines {
                    self.emit(line);
                }
                self.emit(&rule.repeat(width));
            }
            _ => {
                let mark = "#".repeat(usize::from(level));
                for (i, line) in lines.iter().enumerate() {
                    if i == 0 {
                        self.emit(&format!("{mark} {line}"));
                    } else {
                        self.emit(line);
                    }
                }
            }
        }
        self.end_block(position);
    }

    fn enter_list(&mut self, _list: &ListInfo, _position: Position) {
        self.flush_inline();
    }

    fn leave_list(&mut self, _list: &ListInfo, position: Position) {
        self.flush_inline();
        self.end_block(position);
    }

    fn enter_list_item(&mut self, item: &ListItemInfo, _position: Position) {
        self.flush_inline();
        let marker = self.marker(item);
        let width = self.layout.indent.max(marker.chars().count() + 1);
        self.prefixes.push(Prefix {
            first: format!("{marker:<width$}"),
            rest: " ".repeat(width),
            used: false,
        });
    }

    fn leave_list_item(&mut self, _item: &ListItemInfo, _position: Position) {
        self.flush_inline();
        if self.prefixes.last().is_some_and(|p| !p.used) {
            self.emit("");
        }
        self.prefixes.pop();
    }

    fn enter_table(&mut self, shape: TableShape, _position: Position) {
        self.flush_inline();
        self.table = Some(TableBuffer {
            aligns: vec![Alignment::Left; shape.columns],
            ..TableBuffer::default()
        });
    }

    fn leave_table(&mut self, _shape: TableShape, position: Position) {
        if let Some(table) = self.table.take() {
            self.emit_table(table);
        }
        self.end_block(position);
    }

    fn enter_table_row(&mut self, _cells: usize, _header: bool, _position: Position) {
        if let Some(table) = &mut self.table {
            table.row.clear();
        }
    }

    fn leave_table_row(&mut self, _cells: usize, header: bool, _position: Position) {
        if let Some(table) = &mut self.table {
            let cells = mem::take(&mut table.row);
            table.rows.push(TableLine { cells, header });
        }
    }

    fn enter_table_cell(&mut self, _header: bool, _align: Alignment, _position: Position) {
        self.inline = Some(String::new());
    }

    fn leave_table_cell(&mut self, _header: bool, align: Alignment, _position: Position) {
        let text = self.inline.take().unwrap_or_default();
        let cell = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if let Some(table) = &mut self.table {
            let column = table.row.len();
            if column >= table.aligns.len() {
                table.aligns.resize(column + 1, Alignment::Left);
            }
            table.aligns[column] = align;
            table.row.push(cell);
        }
    }

    fn enter_style(&mut self, style: InlineStyle, _position: Position) {
        self.inline_mut().push_str(style_mark(style));
    }

    fn leave_style(&mut self, style: InlineStyle, _position: Position) {
        self.inline_mut().push_str(style_mark(style));
    }

    fn text(&mut self, text: &str, _styles: StyleSet, _position: Position) {
        let text = text.replace('\n', " ");
        self.inline_mut().push_str(&text);
    }

    fn linebreak(&mut self, _position: Position) {
        self.inline_mut().push('\n');
    }

    fn ruler(&mut self, position: Position) {
        self.flush_inline();
        let width = self.available_width();
        self.emit(&"─".repeat(width));
        self.end_block(position);
    }

    fn enter_blockquote(&mut self, _position: Position) {
        self.flush_inline();
        self.prefixes.push(Prefix {
            first: "> ".to_owned(),
            rest: "> ".to_owned(),
            used: true,
        });
    }

    fn leave_blockquote(&mut self, position: Position) {
        self.flush_inline();
        self.prefixes.pop();
        self.end_block(position);
    }

    fn code_block(&mut self, code: &str, _language: &str, position: Position) {
        self.flush_inline();
        for line in code.trim_end_matches('\n').lines() {
            self.emit(&format!("    {line}"));
        }
        self.end_block(position);
    }

    fn html(&mut self, html: &str, position: Position) {
        self.flush_inline();
        for line in html.trim_end().lines() {
            self.emit(line);
        }
        self.end_block(position);
    }

    fn enter_link(&mut self, _href: &str, _title: &str, _position: Position) {
        let start = self.inline_mut().len();
        self.links.push(start);
    }

    fn leave_link(&mut self, href: &str, _title: &str, _position: Position) {
        let start = self.links.pop().unwrap_or_default();
        let inline = self.inline_mut();
        let label = inline.get(start..).unwrap_or_default().trim();
        if !href.is_empty() && label != href {
            inline.push_str(&format!(" ({href})"));
        }
    }

    fn image(&mut self, href: &str, _title: &str, alt: &str, _position: Position) {
        let label = if alt.is_empty() { href } else { alt };
        let text = format!("[image: {label}]");
        self.inline_mut().push_str(&text);
    }

    fn finish(&mut self) {
        self.flush_inline();
        self.paginate();
    }
}

fn style_mark(style: InlineStyle) -> &'static str {
    match style {
        InlineStyle::Bold => "**",
        InlineStyle::Italic => "_",
        InlineStyle::Strikethrough => "~~",
        InlineStyle::Monospace => "`",
    }
}

/// Greedy word wrap; `\n` forces a break.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;
        for word in segment.split_whitespace() {
            let word_len = word.chars().count();
            if len > 0 && len + 1 + word_len > width {
                lines.push(mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            line.push_str(word);
            len += word_len;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Letter numbering: 1 is `a`, 26 is `z`, 27 is `aa`.
fn alpha(number: u64) -> String {
    if number == 0 {
        return "0".to_owned();
    }
    let mut n = number;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        let offset = u8::try_from(n % 26).unwrap_or(0);
        letters.push(char::from(b'a' + offset));
        n /= 26;
    }
    letters.iter().rev().collect()
}

fn pad(text: &str, width: usize, align: Alignment) -> String {
    match align {
        Alignment::Left => format!("{text:<width$}"),
        Alignment::Center => format!("{text:^width$}"),
        Alignment::Right => format!("{text:>width$}"),
    }
}

fn format_row(cells: &[String], widths: &[usize], aligns: &[Alignment]) -> String {
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map_or("", String::as_str);
        let align = aligns.get(i).copied().unwrap_or_default();
        line.push(' ');
        line.push_str(&pad(cell, *width, align));
        line.push_str(" |");
    }
    line
}

fn separator_row(widths: &[usize], aligns: &[Alignment]) -> String {
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let rule = match aligns.get(i).copied().unwrap_or_default() {
            Alignment::Left => "-".repeat(*width),
            Alignment::Center => format!(":{}:", "-".repeat(width - 2)),
            Alignment::Right => format!("{}:", "-".repeat(width - 1)),
        };
        line.push(' ');
        line.push_str(&rule);
        line.push_str(" |");
    }
    line
}

#[cfg(test)]
mod tests {
    use mdpdf_ast::{AstRenderer, CellFlags, Renderer, decode};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::generator::Generator;

    fn layout(width: usize) -> TextLayout {
        TextLayout {
            width,
            footer: String::new(),
            ..TextLayout::default()
        }
    }

    fn render(code: &str, layout: TextLayout) -> TextTheme {
        let root = decode(code).unwrap();
        let mut theme = TextTheme::new(layout);
        Generator::new(&mut theme).generate(&root).unwrap();
        theme
    }

    #[test]
    fn test_paragraph_wraps_at_width() {
        let r = AstRenderer;
        let code = r.paragraph("The quick brown fox jumps over the lazy dog");
        let theme = render(&code, layout(20));
        assert_eq!(
            theme.render(),
            "The quick brown fox\njumps over the lazy\ndog\n"
        );
    }

    #[test]
    fn test_heading_paragraph_and_nested_list() {
        let r = AstRenderer;
        let nested = r.list(&r.listitem("x"), true, 1);
        let list = r.list(
            &format!("{}{}", r.listitem("a"), r.listitem(&format!("b{nested}"))),
            false,
            1,
        );
        let code = format!(
            "{}{}{}",
            r.heading("Title", 1, "Title"),
            r.paragraph(&format!("Body {}", r.strong("bold"))),
            list
        );

        let theme = render(&code, layout(40));

        assert_eq!(
            theme.render(),
            "Title\n=====\n\nBody **bold**\n\n•   a\n•   b\n    1.  x\n"
        );
    }

    #[test]
    fn test_letter_numbering_at_second_depth() {
        assert_eq!(alpha(1), "a");
        assert_eq!(alpha(26), "z");
        assert_eq!(alpha(28), "ab");

        let theme = TextTheme::new(TextLayout::default());
        let item = ListItemInfo {
            ordered: true,
            depth: 1,
            number: 3,
        };
        assert_eq!(theme.marker(&item), "c.");
        let deep = ListItemInfo {
            ordered: false,
            depth: 7,
            number: 1,
        };
        assert_eq!(theme.marker(&deep), "–");
    }

    #[test]
    fn test_table_alignment() {
        let r = AstRenderer;
        let cell = |text: &str, header, align| {
            r.tablecell(
                text,
                CellFlags {
                    header,
                    align: Some(align),
                },
            )
        };
        let header = r.tablerow(&format!(
            "{}{}",
            cell("Name", true, Alignment::Left),
            cell("Qty", true, Alignment::Right)
        ));
        let body = r.tablerow(&format!(
            "{}{}",
            cell("apple", false, Alignment::Left),
            cell("3", false, Alignment::Right)
        ));

        let theme = render(&r.table(&header, &body), layout(40));

        assert_eq!(
            theme.render(),
            "| Name  | Qty |\n| ----- | --: |\n| apple |   3 |\n"
        );
    }

    #[test]
    fn test_blockquote_and_link() {
        let r = AstRenderer;
        let quote = r.blockquote(&r.paragraph(&format!(
            "see {}",
            r.link("https://x.org", "", "docs")
        )));
        let theme = render(&quote, layout(40));
        assert_eq!(theme.render(), "> see docs (https://x.org)\n");
    }

    #[test]
    fn test_pagination_with_header_and_footer() {
        let r = AstRenderer;
        let code = r.code("l1\nl2\nl3\nl4\nl5\nl6\nl7\nl8\n", "", false);
        let theme = render(
            &code,
            TextLayout {
                width: 20,
                height: 10,
                header: "Doc".to_owned(),
                ..TextLayout::default()
            },
        );

        assert_eq!(theme.pages().len(), 2);
        assert_eq!(
            theme.pages()[1],
            "Doc\n\n    l7\n    l8\n\n\n\n\n\n       2 / 2\n"
        );
        assert!(theme.render().contains('\u{c}'));
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let theme = render("", layout(20));
        assert_eq!(theme.pages(), [String::new()]);
    }
}
