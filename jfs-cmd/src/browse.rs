//! Incident browser driven from the command line.
//!
//! Event tokens: `next` (`n`), `prev`/`previous` (`p`) and
//! `factor=<name>`. Every applied event prints the resulting view.

use crate::{read_line, write_json};
use jfs_data::browser::{BrowserEvent, BrowserSession, BrowserView};
use jfs_data::context::DataContext;
use serde::Serialize;
use std::io::{BufRead, Write};

/// Parse one event token.
pub fn parse_event(token: &str) -> Option<BrowserEvent> {
    let token = token.trim();
    if let Some(factor) = token
        .strip_prefix("factor=")
        .or_else(|| token.strip_prefix("factor:"))
    {
        return Some(BrowserEvent::FactorChanged(factor.trim().to_string()));
    }
    match token.to_ascii_lowercase().as_str() {
        "next" | "n" => Some(BrowserEvent::Next),
        "prev" | "previous" | "p" => Some(BrowserEvent::Previous),
        _ => None,
    }
}

#[derive(Serialize)]
struct Frame<'a> {
    factor: &'a str,
    #[serde(flatten)]
    view: &'a BrowserView,
}

fn write_frame(session: &BrowserSession<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
    write_json(
        out,
        &Frame {
            factor: &session.state().selected_factor,
            view: session.view(),
        },
    )
}

fn open<'a>(ctx: &'a DataContext, factor: Option<String>) -> BrowserSession<'a> {
    match factor {
        Some(f) => BrowserSession::start_with(ctx, f),
        None => BrowserSession::start(ctx),
    }
}

/// Apply a fixed list of events, printing the initial view and one per event.
pub fn run_scripted(
    ctx: &DataContext,
    factor: Option<String>,
    events: &[String],
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let parsed = events
        .iter()
        .map(|token| {
            parse_event(token).ok_or_else(|| anyhow::anyhow!("unknown browser event {:?}", token))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut session = open(ctx, factor);
    write_frame(&session, out)?;
    for event in &parsed {
        session.apply(event);
        write_frame(&session, out)?;
    }
    Ok(())
}

/// Read event tokens line by line until end of input or `q`.
pub fn run_interactive(
    ctx: &DataContext,
    factor: Option<String>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut session = open(ctx, factor);
    write_frame(&session, out)?;
    while let Some(line) = read_line(input)? {
        if line.is_empty() {
            continue;
        }
        if line == "q" || line == "quit" {
            break;
        }
        match parse_event(&line) {
            Some(event) => {
                session.apply(&event);
                write_frame(&session, out)?;
            }
            None => writeln!(out, "unknown event {:?}; use next, prev, factor=<name> or q", line)?,
        }
    }
    Ok(())
}
