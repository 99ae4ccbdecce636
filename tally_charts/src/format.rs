// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

/// Formats `v` with just enough decimals to distinguish ticks `step` apart.
///
/// Large magnitudes get thousands separators (`12,500`); `-0` prints as `0`.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let decimals = if step > 0.0 && step.is_finite() {
        let d = -step.log10().floor();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped to a small non-negative range"
        )]
        {
            d.clamp(0.0, 6.0) as usize
        }
    } else {
        0
    };
    let s = format!("{v:.decimals$}");
    let s = if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_owned()
    } else {
        s
    };
    group_thousands(&s)
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = s.strip_prefix('-').map_or(("", s), |r| ("-", r));
    let (int, frac) = rest.split_once('.').map_or((rest, None), |(i, f)| (i, Some(f)));
    if int.len() <= 3 {
        return s.to_owned();
    }
    let mut out = String::with_capacity(s.len() + int.len() / 3);
    out.push_str(sign);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}
