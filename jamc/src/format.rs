//! Fixed-width table of tokens, used by `--tokens`.

use crate::parser::token::Token;

const KIND_WIDTH: usize = 10;
const LEXEME_WIDTH: usize = 18;
const LITERAL_WIDTH: usize = 11;
const LINE_WIDTH: usize = 9;
const COLUMNS_WIDTH: usize = 12;

/// Centers `s` in `width` columns, truncating when it does not fit.
fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.chars().take(width).collect();
    }
    let pad = width - len;
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(pad - left))
}

fn row(cells: [&str; 5]) -> String {
    let widths = [
        KIND_WIDTH,
        LEXEME_WIDTH,
        LITERAL_WIDTH,
        LINE_WIDTH,
        COLUMNS_WIDTH,
    ];
    let mut out = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(&center(cell, width));
        out.push('|');
    }
    out
}

pub fn format_token(token: &Token) -> String {
    let lexeme = format!("'{}'", token.escaped_lexeme());
    let literal = token
        .literal
        .map(|lit| lit.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let line = format!("line {}", token.span.line);
    let columns = format!("col {}-{}", token.span.col_start, token.span.col_end);

    row([token.kind.name(), &lexeme, &literal, &line, &columns])
}

pub fn format_tokens(tokens: &[Token]) -> String {
    let header = row(["TYPE", "LEXEME", "LITERAL", "LINE", "COLUMNS"]);
    let separator = "-".repeat(header.chars().count());

    let mut lines = vec![separator.clone(), header, separator.clone()];
    lines.extend(tokens.iter().map(format_token));
    lines.push(separator);
    lines.join("\n")
}
