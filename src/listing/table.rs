use super::Resource;

/// Render records as an aligned text table
pub fn render_table<R: Resource>(records: &[R]) -> String {
    let columns = R::columns();
    let rows: Vec<Vec<String>> = records.iter().map(Resource::row).collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(&header, &widths));
    lines.push("-".repeat(total));
    lines.extend(rows.iter().map(|row| format_line(row, &widths)));
    lines.join("\n")
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Render labelled fields, one per line, labels aligned
pub fn render_detail(fields: &[(&str, String)]) -> String {
    let width = fields
        .iter()
        .map(|(label, _)| label.chars().count() + 1)
        .max()
        .unwrap_or(0);

    fields
        .iter()
        .map(|(label, value)| format!("{:<width$} {}", format!("{}:", label), value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amenity;

    fn amenity(id: &str, name: &str) -> Amenity {
        Amenity {
            id: id.into(),
            name: name.into(),
            created_at: Some("2025-05-01T10:00:00".into()),
        }
    }

    #[test]
    fn test_table_alignment() {
        let table = render_table(&[amenity("a1", "WiFi"), amenity("a2", "Swimming pool")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "ID  NAME           CREATED");
        assert_eq!(lines[2], "a1  WiFi           2025-05-01");
        assert_eq!(lines[3], "a2  Swimming pool  2025-05-01");
        assert_eq!(lines[1].len(), lines[2].len());
    }

    #[test]
    fn test_detail_alignment() {
        let text = render_detail(&[("ID", "a1".into()), ("Name", "WiFi".into())]);
        assert_eq!(text, "ID:   a1\nName: WiFi");
    }
}
