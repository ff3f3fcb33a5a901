//! Line-oriented JSON front end for the control panel.
//!
//! Each input line is one control event, e.g.
//! `{"event":"fft_exponent_changed","exponent":10}`; each output line is one
//! notification. `{"event":"snapshot"}` prints the current control values.

use crate::controls::{ControlEvent, ControlPanel, Notification};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::io::{BufRead, Write};
use tracing::{info, warn};

pub fn run<R: BufRead, W: Write>(
    panel: &mut ControlPanel,
    mut input: R,
    mut output: W,
) -> Result<()> {
    write_all(&mut output, &panel.announce())?;

    let mut buf = Vec::new();
    let mut line_no = 0usize;
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("reading control events")?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let Ok(text) = std::str::from_utf8(&buf) else {
            warn!("[headless] line {line_no}: not UTF-8");
            continue;
        };
        let line = text.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(err) => {
                warn!("[headless] line {line_no}: not JSON: {err}");
                continue;
            }
        };

        if value.get("event").and_then(Value::as_str) == Some("snapshot") {
            write_line(&mut output, &panel.snapshot())?;
            continue;
        }

        match serde_json::from_value::<ControlEvent>(value) {
            Ok(event) => write_all(&mut output, &panel.handle(event))?,
            Err(err) => warn!("[headless] line {line_no}: unknown event: {err}"),
        }
    }

    info!("[headless] input closed");
    Ok(())
}

fn write_all<W: Write>(output: &mut W, notifications: &[Notification]) -> Result<()> {
    for notification in notifications {
        write_line(output, notification)?;
    }
    Ok(())
}

fn write_line<W: Write, T: Serialize>(output: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *output, value).context("encoding notification")?;
    output.write_all(b"\n").context("writing notification")?;
    output.flush().context("flushing notifications")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::events::PanelSnapshot;
    use std::io::Cursor;

    fn run_lines(input: &str) -> Vec<Value> {
        let mut panel = ControlPanel::default();
        let mut output = Vec::new();
        run(&mut panel, Cursor::new(input), &mut output).expect("headless run");
        String::from_utf8(output)
            .expect("utf-8 output")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect()
    }

    #[test]
    fn announces_then_answers_events_in_order() {
        let out = run_lines(
            "{\"event\":\"fft_exponent_changed\",\"exponent\":7}\n\
             {\"event\":\"zoom_exponent_changed\",\"exponent\":10}\n",
        );
        assert_eq!(out.len(), 6);
        assert_eq!(out[0]["notification"], "sample_rate_changed");
        assert_eq!(out[1]["fft_size"], 512);
        assert_eq!(out[4]["notification"], "parameters_changed");
        assert_eq!(out[4]["fft_size"], 128);
        assert_eq!(out[5]["zoom_size"], 128);
    }

    #[test]
    fn skips_blank_and_malformed_lines() {
        let out = run_lines("\n   \nnot json\n{\"event\":\"warp_drive\"}\n{\"event\":\"zoom_in\"}\n");
        assert_eq!(out.len(), 5);
        assert_eq!(out[4]["zoom_size"], 2);
    }

    #[test]
    fn cursor_labels_serialize_flat() {
        let out = run_lines(
            "{\"event\":\"cursors_toggled\",\"enabled\":true}\n\
             {\"event\":\"interval_measured\",\"seconds\":0.5}\n\
             {\"event\":\"cursors_toggled\",\"enabled\":false}\n",
        );
        assert_eq!(out[4]["notification"], "cursor_labels");
        assert_eq!(out[4]["frequency"], "2Hz");
        assert_eq!(out[4]["bit_period"], "0.5s");
        assert_eq!(out[5]["period"], "");
    }

    #[test]
    fn undecodable_bytes_skip_only_their_line() {
        let mut panel = ControlPanel::default();
        let mut output = Vec::new();
        let input: &[u8] = b"\xff\xfe garbage\n{\"event\":\"zoom_in\"}\n";
        run(&mut panel, input, &mut output).expect("headless run");

        let lines: Vec<Value> = String::from_utf8(output)
            .expect("utf-8 output")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4]["notification"], "parameters_changed");
        assert_eq!(lines[4]["zoom_size"], 2);
    }

    #[test]
    fn file_chosen_with_null_path_is_ignored() {
        let out = run_lines(
            "{\"event\":\"file_chosen\",\"path\":null}\n\
             {\"event\":\"file_chosen\",\"path\":\"/tmp/rx.cu8\"}\n",
        );
        assert_eq!(out.len(), 5);
        assert_eq!(out[4]["notification"], "open_file");
        assert_eq!(out[4]["path"], "/tmp/rx.cu8");
    }

    #[test]
    fn snapshot_request_reports_controls() {
        let out = run_lines("{\"event\":\"power_min_changed\",\"db\":-70}\n{\"event\":\"snapshot\"}\n");
        let snapshot: PanelSnapshot =
            serde_json::from_value(out.last().cloned().expect("snapshot line")).expect("snapshot");
        assert_eq!(snapshot.power_min, -70);
        assert_eq!(snapshot.fft_size, 512);
    }
}
