//! Radial ASCII rendering for `DBGPRINTV` and `DBGPRINTC`.
//!
//! Items are laid out on an ellipse drawn with alternating shaded sectors,
//! one sector per item. The item under the cursor is bracketed. The canvas
//! grows with the square of the item count, so collections larger than
//! [`MAX_RING_ITEMS`] fall back to a flat listing.

use crate::control::ControlStream;
use crate::wheel::Wheel;
use std::f64::consts::TAU;

const SHADES: [char; 2] = ['░', '▓'];

/// Largest collection drawn as a ring.
pub const MAX_RING_ITEMS: usize = 64;

/// Render a wheel, followed by a line listing its values.
pub fn render_wheel(wheel: &Wheel) -> Vec<String> {
    if wheel.is_empty() {
        return vec!["no variables".to_string()];
    }
    let labels: Vec<String> = wheel.values().iter().map(ToString::to_string).collect();
    let mut lines = if labels.len() <= MAX_RING_ITEMS {
        render_ring(&labels, wheel.cursor())
    } else {
        vec![format!("{} values, cursor at {}", labels.len(), wheel.cursor())]
    };
    lines.push(format!("[{}]", labels.join(" ")));
    lines
}

/// Render the control stream, one `MNEMONIC int text` label per instruction.
pub fn render_control(control: &ControlStream<'_>) -> Vec<String> {
    if control.is_empty() {
        return vec!["no instructions".to_string()];
    }
    let labels: Vec<String> = control
        .instructions()
        .iter()
        .map(|inst| {
            format!("{} {} {}", inst.opcode, inst.int_arg, inst.text_arg)
                .trim_end()
                .to_string()
        })
        .collect();
    if labels.len() <= MAX_RING_ITEMS {
        render_ring(&labels, control.cursor())
    } else {
        render_flat(&labels, control.cursor())
    }
}

/// One label per line, the selected one bracketed.
fn render_flat(labels: &[String], selected: usize) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == selected {
                format!("[{label}]")
            } else {
                label.clone()
            }
        })
        .collect()
}

fn render_ring(labels: &[String], selected: usize) -> Vec<String> {
    let n = labels.len();
    let radius_y = (n as f64 * 0.8).max(4.0);
    let radius_x = radius_y * 2.0;
    let height = (2.0 * radius_y) as usize + 1;
    let width = (2.0 * radius_x) as usize + 1;
    let sector_angle = TAU / n as f64;

    let mut canvas = vec![vec![' '; width]; height];
    for (row, cells) in canvas.iter_mut().enumerate() {
        let y = row as f64 - radius_y;
        for (col, cell) in cells.iter_mut().enumerate() {
            let x = col as f64 - radius_x;
            if (x * x) / (radius_x * radius_x) + (y * y) / (radius_y * radius_y) > 1.0 {
                continue;
            }
            let angle = y.atan2(x).rem_euclid(TAU);
            let shifted = (angle + sector_angle / 2.0) % TAU;
            let sector = (shifted / sector_angle).floor() as usize;
            *cell = SHADES[sector % 2];
        }
    }

    for (i, label) in labels.iter().enumerate() {
        let angle = i as f64 * sector_angle;
        let x = (radius_x * angle.cos() + radius_x) as i64;
        let y = (radius_y * angle.sin() + radius_y) as i64;
        let Some(cells) = usize::try_from(y).ok().and_then(|y| canvas.get_mut(y)) else {
            continue;
        };
        let text: Vec<char> = if i == selected {
            format!("[{label}]").chars().collect()
        } else {
            label.chars().collect()
        };
        // Keep labels on the canvas near the left and right edges.
        let start = (x - (text.len() / 2) as i64)
            .min(width as i64 - text.len() as i64)
            .max(0);
        for (k, ch) in text.into_iter().enumerate() {
            if let Some(cell) = usize::try_from(start + k as i64)
                .ok()
                .and_then(|col| cells.get_mut(col))
            {
                *cell = ch;
            }
        }
    }

    canvas
        .into_iter()
        .map(|cells| cells.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}
