/// Render rows under a header line, columns padded to their widest cell.
///
/// With `max_width`, the widest columns are narrowed (never below their
/// header) and overlong cells end in `…`.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    if let Some(limit) = max_width {
        shrink_to(&mut widths, headers, limit);
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    let rule_len = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
    out.push(format_line(headers.iter().copied(), &widths));
    out.push("-".repeat(rule_len));
    for row in rows {
        let cells = (0..headers.len()).map(|col| row.get(col).map_or("-", String::as_str));
        out.push(format_line(cells, &widths));
    }
    out.join("\n")
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| {
            let cell = clip(cell, *width);
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn shrink_to(widths: &mut [usize], headers: &[&str], limit: usize) {
    let gaps = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + gaps > limit {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(col, width)| **width > headers[*col].chars().count().max(4))
            .max_by_key(|(_, width)| **width)
            .map(|(col, _)| col);
        match widest {
            Some(col) => widths[col] -= 1,
            None => break,
        }
    }
}

fn clip(cell: &str, width: usize) -> String {
    let cell = cell.replace('\n', " ");
    if cell.chars().count() <= width {
        return cell;
    }
    let mut out: String = cell.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
