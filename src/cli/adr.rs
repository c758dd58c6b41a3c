//! ADR commands: init, new, update, list, show

use std::io;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde_json::json;

use super::format::{format_adr, status_color};
use super::output::Output;
use super::prompt::{prompt_status, resolve_status};
use crate::document::extract_metadata;
use crate::domain::{count_by_status, filter_by_query, AdrSummary, Status};
use crate::storage::{Repository, StatusUpdater, Workspace};

/// Column gap in text tables
const TABLE_PADDING: usize = 3;

/// Parses a user-supplied ADR ID
fn parse_id(raw: &str) -> Result<u32> {
    let n: i64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid ADR ID {:?}: must be a number", raw))?;
    if n <= 0 {
        bail!("invalid ADR ID {}: must be positive", n);
    }
    u32::try_from(n).map_err(|_| anyhow!("invalid ADR ID {:?}: must be a number", raw))
}

/// Colour is on unless `--plain` is given or `NO_COLOR` is set and non-empty
fn use_color(plain: bool) -> bool {
    !plain && std::env::var_os("NO_COLOR").map_or(true, |v| v.is_empty())
}

/// Shows a path relative to the current directory when it lies beneath it
fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

/// Opens the workspace and checks that its ADR directory exists
fn open_workspace(output: &Output) -> Result<Workspace> {
    let workspace = Workspace::open_current()?;
    let dir = workspace.adr_dir();
    output.verbose_ctx("workspace", &format!("root {}, ADRs in {}", workspace.root().display(), dir.display()));

    if !dir.is_dir() {
        bail!("ADR directory {} not found", dir.display());
    }
    Ok(workspace)
}

/// Left-aligned text table with the last column unpadded
///
/// Cells are `(plain, styled)` pairs: widths come from the plain text so
/// escape codes don't skew alignment.
#[derive(Debug, Default)]
struct Table {
    rows: Vec<Vec<(String, String)>>,
}

impl Table {
    fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(
            cells
                .into_iter()
                .map(|c| {
                    let c: String = c.into();
                    (c.clone(), c)
                })
                .collect(),
        );
    }

    fn styled_row(&mut self, cells: Vec<(String, String)>) {
        self.rows.push(cells);
    }

    fn render(&self) -> String {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in &self.rows {
            for (i, (plain, _)) in row.iter().enumerate() {
                widths[i] = widths[i].max(plain.chars().count());
            }
        }

        let mut out = String::new();
        for row in &self.rows {
            for (i, (plain, styled)) in row.iter().enumerate() {
                out.push_str(styled);
                if i + 1 < row.len() {
                    let pad = widths[i] - plain.chars().count() + TABLE_PADDING;
                    out.push_str(&" ".repeat(pad));
                }
            }
            out.push('\n');
        }
        out
    }
}

pub fn init(output: &Output, path: &str, template: &str, template_file: &str, force: bool) -> Result<()> {
    let root = std::env::current_dir().context("reading current directory")?;
    output.verbose_ctx("init", &format!("directory {path}, template {template}, file {template_file}"));

    let workspace = Workspace::init(&root, path, template, template_file, force)?;

    output.emit(
        &json!({
            "directory": path,
            "template": template,
            "templateFile": workspace.template_path(),
        }),
        || format!("Initialized ADR directory at {} with template: {}", path, template),
    )
}

pub fn new(output: &Output, title: &str, supersedes: &[i64]) -> Result<()> {
    let ids = supersedes
        .iter()
        .map(|id| parse_id(&id.to_string()))
        .collect::<Result<Vec<_>>>()?;

    let workspace = open_workspace(output)?;
    let repo = workspace.repository();
    output.verbose_ctx("new", &format!("title {:?}, supersedes {:?}", title, ids));

    let created = repo.create(title, &ids).context("creating ADR")?;

    let file = display_path(&created.path);
    let superseded: Vec<String> = created.superseded.iter().map(|p| display_path(p)).collect();

    output.emit(
        &json!({
            "number": created.record.number,
            "title": created.record.title,
            "status": created.record.status,
            "date": created.record.date_string(),
            "file": file,
            "superseded": superseded,
        }),
        || {
            let mut lines: Vec<String> = superseded.iter().map(|p| format!("Superseded {p}")).collect();
            lines.push(format!("Created {file}"));
            lines.join("\n")
        },
    )
}

pub fn update(output: &Output, id: &str, status: Option<&str>) -> Result<()> {
    let id = parse_id(id)?;
    let workspace = open_workspace(output)?;
    let repo = workspace.repository();

    let filename = repo.find_adr_file(id)?;
    output.verbose_ctx("update", &format!("ADR {} is {}", id, filename));

    let status = match status {
        Some(raw) => resolve_status(raw)?,
        None => prompt_status(io::stdin().lock(), io::stdout().lock())?,
    };

    let record = repo.update_status(id, status)?;

    output.emit(
        &json!({
            "number": record.number,
            "file": filename,
            "status": record.status,
        }),
        || format!("Updated {} status to {}", filename, status),
    )
}

pub fn list(output: &Output, plain: bool, search: Option<&str>, count: bool) -> Result<()> {
    let workspace = open_workspace(output)?;
    let mut records = workspace.repository().list()?;
    output.verbose_ctx("list", &format!("{} records", records.len()));

    if let Some(query) = search.filter(|q| !q.is_empty()) {
        records = filter_by_query(records, query);
        output.verbose_ctx("list", &format!("{} match {:?}", records.len(), query));
    }

    let color = use_color(plain);

    if count {
        let counts = count_by_status(&records);
        return output.emit(&counts, || {
            let mut table = Table::default();
            table.row(["Status", "Count"]);
            for status in Status::all() {
                let label = status.as_str();
                table.styled_row(vec![
                    (label.to_string(), status_color(label, color)),
                    (counts.get(*status).to_string(), counts.get(*status).to_string()),
                ]);
            }

            // Blank line, then the total aligned on its own
            let mut total = Table::default();
            total.row(["Total".to_string(), counts.total.to_string()]);
            format!("{}\n{}", table.render(), total.render())
        });
    }

    let summaries: Vec<AdrSummary> = records.iter().map(AdrSummary::from).collect();
    output.emit(&summaries, || {
        let mut table = Table::default();
        table.row(["ID", "Date", "Title", "Status"]);
        for summary in &summaries {
            let status = summary.status.as_str();
            table.styled_row(vec![
                (summary.number.to_string(), summary.number.to_string()),
                (summary.date.clone(), summary.date.clone()),
                (summary.title.clone(), summary.title.clone()),
                (status.to_string(), status_color(status, color)),
            ]);
        }
        table.render()
    })
}

pub fn show(output: &Output, id: &str, plain: bool) -> Result<()> {
    let id = parse_id(id)?;
    let workspace = open_workspace(output)?;
    let repo = workspace.repository();

    let filename = repo.find_adr_file(id)?;
    let path = repo.dir().join(&filename);
    let content = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;

    let meta = extract_metadata(&content);
    let number = if meta.number == 0 { id } else { meta.number };

    output.emit(
        &json!({
            "number": number,
            "title": meta.title,
            "status": meta.status,
            "date": meta.date,
            "file": filename,
            "body": content,
        }),
        || format_adr(&content, use_color(plain)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_numbers() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert_eq!(parse_id(" 12 ").unwrap(), 12);
    }

    #[test]
    fn parse_id_rejects_non_numbers() {
        let err = parse_id("abc").unwrap_err().to_string();
        assert_eq!(err, "invalid ADR ID \"abc\": must be a number");
    }

    #[test]
    fn parse_id_rejects_non_positive() {
        assert_eq!(parse_id("0").unwrap_err().to_string(), "invalid ADR ID 0: must be positive");
        assert_eq!(parse_id("-3").unwrap_err().to_string(), "invalid ADR ID -3: must be positive");
    }

    #[test]
    fn table_aligns_on_plain_width() {
        let mut table = Table::default();
        table.row(["ID", "Title", "Status"]);
        table.styled_row(vec![
            ("12".into(), "12".into()),
            ("Use Rust".into(), "Use Rust".into()),
            ("Accepted".into(), "\u{1b}[32mAccepted\u{1b}[39m".into()),
        ]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID   Title      Status");
        assert!(lines[1].starts_with("12   Use Rust   \u{1b}[32m"));
    }

    #[test]
    fn table_last_column_is_unpadded() {
        let mut table = Table::default();
        table.row(["a", "b"]);
        table.row(["long", "c"]);
        assert_eq!(table.render(), "a      b\nlong   c\n");
    }
}
