use crate::Result;
use crate::records::Snapshot;
use core::fmt::Write;
use owo_colors::OwoColorize;

const MISSING: &str = "n/a";

struct Section<'a> {
    title: &'a str,
    rows: Vec<(&'static str, Option<&'a str>)>,
    error: Option<&'a str>,
}

pub fn generate<W: Write>(snapshot: &Snapshot, use_colors: bool, writer: &mut W) -> Result<()> {
    let heading = "Gonka network snapshot";
    if use_colors {
        writeln!(writer, "{}", heading.bold())?;
    } else {
        writeln!(writer, "{heading}")?;
    }
    writeln!(writer, "Collected at {}", snapshot.collected_at.format("%Y-%m-%d %H:%M:%S UTC"))?;

    writeln!(writer)?;
    write_title(writer, "Nodes", use_colors)?;
    if snapshot.nodes.is_empty() {
        writeln!(writer, "  none configured")?;
    }

    for node in &snapshot.nodes {
        let status = match node.error() {
            None => paint("reachable", Status::Good, use_colors),
            Some(reason) => paint(&format!("unreachable ({reason})"), Status::Bad, use_colors),
        };
        writeln!(writer, "  {} : {status}", node.source_identifier)?;

        if let Some(metrics) = node.metrics.as_ref() {
            write_rows(
                writer,
                4,
                &[
                    ("Total compute power", metrics.total_compute_power.as_deref()),
                    ("Validators", metrics.validators.as_deref()),
                    ("Next round", metrics.next_round_eta.as_deref()),
                ],
            )?;
        }
    }

    let community = snapshot.community.as_ref();
    let follower = snapshot.follower.as_ref();
    let repository = snapshot.repository.as_ref();
    let price = snapshot.price.as_ref();

    let sections = [
        Section {
            title: "Community",
            rows: vec![
                ("Online", community.and_then(|m| m.online_count.as_deref())),
                ("Members", community.and_then(|m| m.member_count.as_deref())),
            ],
            error: snapshot.community.error(),
        },
        Section {
            title: "Followers",
            rows: vec![("Followers", follower.and_then(|m| m.follower_count.as_deref()))],
            error: snapshot.follower.error(),
        },
        Section {
            title: "Repository",
            rows: vec![("Stars", repository.and_then(|m| m.star_count.as_deref()))],
            error: snapshot.repository.error(),
        },
        Section {
            title: "Price",
            rows: vec![("Current price", price.and_then(|m| m.price.as_deref()))],
            error: snapshot.price.error(),
        },
    ];

    for section in &sections {
        writeln!(writer)?;
        write_title(writer, section.title, use_colors)?;
        write_rows(writer, 2, &section.rows)?;

        if let Some(reason) = section.error {
            writeln!(writer, "  {}", paint(&format!("Error: {reason}"), Status::Bad, use_colors))?;
        }
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum Status {
    Good,
    Bad,
}

fn paint(text: &str, status: Status, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }

    match status {
        Status::Good => text.green().to_string(),
        Status::Bad => text.red().bold().to_string(),
    }
}

fn write_title<W: Write>(writer: &mut W, title: &str, use_colors: bool) -> Result<()> {
    if use_colors {
        writeln!(writer, "{}", title.bold())?;
    } else {
        writeln!(writer, "{title}")?;
    }
    Ok(())
}

fn write_rows<W: Write>(writer: &mut W, indent: usize, rows: &[(&str, Option<&str>)]) -> Result<()> {
    let max_name_len = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    for (name, value) in rows {
        writeln!(
            writer,
            "{:indent$}{name:<max_name_len$} : {}",
            "",
            value.unwrap_or(MISSING),
            indent = indent
        )?;
    }
    Ok(())
}
