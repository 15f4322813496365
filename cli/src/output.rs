use serde::Serialize;
use kobodb::types::UserSummary;

pub fn yaml<T>(value: &T) -> Result<String, String>
where
    T: Serialize + ?Sized,
{
    serde_yaml::to_string(value)
        .map_err(|e| format!("error formatting output: {e}"))
}

/// Render rows under a header, with columns padded to a common width.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count())
        .collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells.iter().zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        padded.join(" | ").trim_end().to_owned() + "\n"
    };

    let mut out = render_row(headers.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&(rule.join("-+-") + "\n"));
    for row in rows {
        out.push_str(&render_row(row.iter().map(|c| c.as_str()).collect()));
    }
    out
}

pub fn users_table(users: &[UserSummary]) -> String {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let rows: Vec<Vec<String>> = users.iter()
        .map(|u| vec![
            opt(&u.kobo_id),
            opt(&u.pin),
            opt(&u.first_name),
            opt(&u.surname),
            opt(&u.role),
            u.created_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        ])
        .collect();
    table(&["kobo_id", "pin", "first_name", "surname", "role", "created_at"],
          &rows)
}
